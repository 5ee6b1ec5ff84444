// src/native/layout.rs

//! Packed layout tables for the native package records
//!
//! All three records are declared sequential with 4-byte packing: each field
//! sits at the next multiple of `min(natural alignment, 4)` and the record
//! size is rounded up to a multiple of the largest such alignment.

use crate::native::PointerWidth;

/// Maximum field alignment of the packed records
pub const PACK: usize = 4;

/// Size of a native SYSTEMTIME (eight u16 words)
pub const SYSTEMTIME_SIZE: usize = 16;

/// Shape of a single native field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Pointer to a NUL-terminated UTF-16 string (PCWSTR)
    WideString,
    /// Pointer to an array of sub-records
    Pointer,
    /// 32-bit unsigned count (UINT)
    U32,
    /// 32-bit Win32 BOOL
    Bool,
    /// 32-bit enumeration value
    Enum,
    /// SYSTEMTIME
    SystemTime,
}

impl FieldKind {
    pub fn size(self, width: PointerWidth) -> usize {
        match self {
            FieldKind::WideString | FieldKind::Pointer => width.bytes(),
            FieldKind::U32 | FieldKind::Bool | FieldKind::Enum => 4,
            FieldKind::SystemTime => SYSTEMTIME_SIZE,
        }
    }

    /// Natural alignment before packing is applied
    pub fn align(self, width: PointerWidth) -> usize {
        match self {
            FieldKind::WideString | FieldKind::Pointer => width.bytes(),
            FieldKind::U32 | FieldKind::Bool | FieldKind::Enum => 4,
            FieldKind::SystemTime => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::WideString => "PCWSTR",
            FieldKind::Pointer => "pointer",
            FieldKind::U32 => "UINT",
            FieldKind::Bool => "BOOL",
            FieldKind::Enum => "enum",
            FieldKind::SystemTime => "SYSTEMTIME",
        }
    }
}

/// A field declaration: name and kind, in native order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> FieldDef {
    FieldDef { name, kind }
}

/// `DismPackageInfo`
pub const PACKAGE_INFO_FIELDS: &[FieldDef] = &[
    field("PackageName", FieldKind::WideString),
    field("PackageState", FieldKind::Enum),
    field("ReleaseType", FieldKind::Enum),
    field("InstallTime", FieldKind::SystemTime),
    field("Applicable", FieldKind::Bool),
    field("Copyright", FieldKind::WideString),
    field("Company", FieldKind::WideString),
    field("CreationTime", FieldKind::SystemTime),
    field("DisplayName", FieldKind::WideString),
    field("Description", FieldKind::WideString),
    field("InstallClient", FieldKind::WideString),
    field("InstallPackageName", FieldKind::WideString),
    field("LastUpdateTime", FieldKind::SystemTime),
    field("ProductName", FieldKind::WideString),
    field("ProductVersion", FieldKind::WideString),
    field("RestartRequired", FieldKind::Enum),
    field("FullyOffline", FieldKind::Enum),
    field("SupportInformation", FieldKind::WideString),
    field("CustomProperty", FieldKind::Pointer),
    field("CustomPropertyCount", FieldKind::U32),
    field("Feature", FieldKind::Pointer),
    field("FeatureCount", FieldKind::U32),
];

/// `DismCustomProperty`
pub const CUSTOM_PROPERTY_FIELDS: &[FieldDef] = &[
    field("Name", FieldKind::WideString),
    field("Value", FieldKind::WideString),
    field("Path", FieldKind::WideString),
];

/// `DismFeature`
pub const FEATURE_FIELDS: &[FieldDef] = &[
    field("FeatureName", FieldKind::WideString),
    field("State", FieldKind::Enum),
];

/// A field with its resolved position inside a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldOffset {
    pub name: &'static str,
    pub kind: FieldKind,
    pub offset: usize,
    pub size: usize,
}

/// Resolved layout of one record type for one pointer width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    name: &'static str,
    fields: Vec<FieldOffset>,
    size: usize,
}

fn align_up(value: usize, align: usize) -> usize {
    value.div_ceil(align) * align
}

impl RecordLayout {
    /// Lay out `defs` sequentially with 4-byte packing
    pub fn compute(name: &'static str, defs: &[FieldDef], width: PointerWidth) -> Self {
        let mut fields = Vec::with_capacity(defs.len());
        let mut offset = 0;
        let mut record_align = 1;

        for def in defs {
            let align = def.kind.align(width).min(PACK);
            let size = def.kind.size(width);
            offset = align_up(offset, align);
            record_align = record_align.max(align);

            fields.push(FieldOffset {
                name: def.name,
                kind: def.kind,
                offset,
                size,
            });
            offset += size;
        }

        Self {
            name,
            fields,
            size: align_up(offset, record_align),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn fields(&self) -> &[FieldOffset] {
        &self.fields
    }

    /// Total record size, which is also the array stride
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn field(&self, name: &str) -> Option<&FieldOffset> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Layouts of all three records for one pointer width
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    width: PointerWidth,
    package: RecordLayout,
    custom_property: RecordLayout,
    feature: RecordLayout,
}

impl Layout {
    pub fn new(width: PointerWidth) -> Self {
        Self {
            width,
            package: RecordLayout::compute("DismPackageInfo", PACKAGE_INFO_FIELDS, width),
            custom_property: RecordLayout::compute(
                "DismCustomProperty",
                CUSTOM_PROPERTY_FIELDS,
                width,
            ),
            feature: RecordLayout::compute("DismFeature", FEATURE_FIELDS, width),
        }
    }

    pub fn width(&self) -> PointerWidth {
        self.width
    }

    pub fn package(&self) -> &RecordLayout {
        &self.package
    }

    pub fn custom_property(&self) -> &RecordLayout {
        &self.custom_property
    }

    pub fn feature(&self) -> &RecordLayout {
        &self.feature
    }

    pub fn records(&self) -> [&RecordLayout; 3] {
        [&self.package, &self.custom_property, &self.feature]
    }
}
