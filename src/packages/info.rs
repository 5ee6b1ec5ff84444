// src/packages/info.rs

//! Immutable package information snapshots
//!
//! `PackageInfo` is built once from a native record and owns every value it
//! exposes. Identity is the display name: two snapshots compare equal when
//! their display names do, whatever their other fields hold. Display names
//! are not guaranteed unique by the servicing API, so this is a lookup key
//! rather than a uniqueness guarantee.

use crate::error::Result;
use crate::native::{
    Address, ArrayView, DecodeOptions, Layout, NativeMemory, ProcessMemory, SystemTime,
};
use crate::packages::collection::{Collection, CustomPropertyCollection, FeatureCollection};
use crate::packages::custom_property::CustomProperty;
use crate::packages::feature::Feature;
use crate::packages::record::PackageRecord;
use crate::packages::types::{
    FullyOfflineInstallableType, PackageFeatureState, ReleaseType, RestartType,
};
use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use std::collections::hash_map::DefaultHasher;
use std::ffi::c_void;
use std::hash::{Hash, Hasher};
use tracing::{debug, trace, warn};

/// Detailed information about one package in an image
#[derive(Debug, Clone)]
pub struct PackageInfo {
    package_name: Option<String>,
    package_state: PackageFeatureState,
    release_type: ReleaseType,
    install_time: SystemTime,
    applicable: bool,
    copyright: Option<String>,
    company: Option<String>,
    creation_time: SystemTime,
    display_name: Option<String>,
    description: Option<String>,
    install_client: Option<String>,
    install_package_name: Option<String>,
    last_update_time: SystemTime,
    product_name: Option<String>,
    product_version: Option<String>,
    restart_required: RestartType,
    fully_offline: FullyOfflineInstallableType,
    support_information: Option<String>,
    custom_properties: CustomPropertyCollection,
    features: FeatureCollection,
}

/// Walk a "pointer + count" array, or return an empty collection when the
/// array is absent
fn read_array<T, M, F>(
    memory: &M,
    base: Address,
    count: u32,
    stride: usize,
    kind: &'static str,
    mut read: F,
) -> Result<Collection<T>>
where
    M: NativeMemory + ?Sized,
    F: FnMut(&M, Address) -> Result<T>,
{
    let Some(view) = ArrayView::present(base, stride, count) else {
        if count > 0 {
            warn!("{} count is {} but the array pointer is null; treating as empty", kind, count);
        } else if !base.is_null() {
            debug!("{} array at {} has a zero count; treating as empty", kind, base);
        }
        return Ok(Collection::default());
    };

    debug!("Reading {} {} records at {} (stride {})", view.len(), kind, view.base(), stride);

    let mut items = Vec::with_capacity(view.len().min(1024));
    for address in view.addresses() {
        let address = address?;
        trace!("Reading {} record at {}", kind, address);
        items.push(read(memory, address)?);
    }

    Ok(items.into())
}

impl PackageInfo {
    /// Decode the package record at `address`
    ///
    /// Everything is copied out of `memory`; the result borrows nothing.
    pub fn from_address<M: NativeMemory + ?Sized>(
        memory: &M,
        address: Address,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let layout = Layout::new(options.pointer_width);
        let record = PackageRecord::read_with_layout(memory, address, &layout, options)?;
        Self::from_record_with_layout(record, memory, &layout, options)
    }

    /// Decode a package record that lives in the current process
    ///
    /// # Safety
    ///
    /// `ptr` must point to a valid native package information record laid out
    /// for this process's pointer width. Every string it references must be
    /// NUL-terminated and readable, and each sub-record array must be
    /// readable for its declared count. The memory is only read during this
    /// call and is not retained.
    pub unsafe fn from_ptr(ptr: *const c_void) -> Result<Self> {
        // SAFETY: forwarded to the caller through this function's contract.
        let memory = unsafe { ProcessMemory::new() };
        Self::from_address(&memory, Address::from_ptr(ptr), &DecodeOptions::default())
    }

    /// Build from an already deserialized record
    ///
    /// The custom property and feature arrays the record points to are read
    /// from `memory` in native order. An array is read only when its count is
    /// nonzero and its pointer is non-null; otherwise the collection is empty.
    pub fn from_record<M: NativeMemory + ?Sized>(
        record: PackageRecord,
        memory: &M,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let layout = Layout::new(options.pointer_width);
        Self::from_record_with_layout(record, memory, &layout, options)
    }

    fn from_record_with_layout<M: NativeMemory + ?Sized>(
        record: PackageRecord,
        memory: &M,
        layout: &Layout,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let custom_properties = read_array(
            memory,
            record.custom_property,
            record.custom_property_count,
            layout.custom_property().size(),
            "custom property",
            |memory, address| CustomProperty::read(memory, address, layout, options),
        )?;

        let features = read_array(
            memory,
            record.feature,
            record.feature_count,
            layout.feature().size(),
            "feature",
            |memory, address| Feature::read(memory, address, layout, options),
        )?;

        debug!(
            "Decoded package {} ({} custom properties, {} features)",
            record.package_name.as_deref().unwrap_or("<unnamed>"),
            custom_properties.len(),
            features.len()
        );

        Ok(Self {
            package_name: record.package_name,
            package_state: record.package_state,
            release_type: record.release_type,
            install_time: record.install_time,
            applicable: record.applicable,
            copyright: record.copyright,
            company: record.company,
            creation_time: record.creation_time,
            display_name: record.display_name,
            description: record.description,
            install_client: record.install_client,
            install_package_name: record.install_package_name,
            last_update_time: record.last_update_time,
            product_name: record.product_name,
            product_version: record.product_version,
            restart_required: record.restart_required,
            fully_offline: record.fully_offline,
            support_information: record.support_information,
            custom_properties,
            features,
        })
    }

    /// Whether the package is applicable to the image
    pub fn applicable(&self) -> bool {
        self.applicable
    }

    /// The company that released the package
    pub fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }

    pub fn copyright(&self) -> Option<&str> {
        self.copyright.as_deref()
    }

    /// When the package was created, in local time of the machine that
    /// created it
    pub fn creation_time(&self) -> Option<NaiveDateTime> {
        self.creation_time.to_naive()
    }

    pub fn creation_time_raw(&self) -> SystemTime {
        self.creation_time
    }

    pub fn custom_properties(&self) -> &CustomPropertyCollection {
        &self.custom_properties
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn features(&self) -> &FeatureCollection {
        &self.features
    }

    /// Whether the package can be installed offline without booting the image
    pub fn fully_offline(&self) -> FullyOfflineInstallableType {
        self.fully_offline
    }

    /// The client that installed the package
    pub fn install_client(&self) -> Option<&str> {
        self.install_client.as_deref()
    }

    /// Original file name of the package at install time
    pub fn install_package_name(&self) -> Option<&str> {
        self.install_package_name.as_deref()
    }

    /// When the package was installed, in local time of the servicing host
    pub fn install_time(&self) -> Option<NaiveDateTime> {
        self.install_time.to_naive()
    }

    pub fn install_time_raw(&self) -> SystemTime {
        self.install_time
    }

    /// When the package was last updated, in local time of the servicing host
    pub fn last_update_time(&self) -> Option<NaiveDateTime> {
        self.last_update_time.to_naive()
    }

    pub fn last_update_time_raw(&self) -> SystemTime {
        self.last_update_time
    }

    pub fn package_name(&self) -> Option<&str> {
        self.package_name.as_deref()
    }

    pub fn package_state(&self) -> PackageFeatureState {
        self.package_state
    }

    pub fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref()
    }

    pub fn product_version(&self) -> Option<&str> {
        self.product_version.as_deref()
    }

    pub fn release_type(&self) -> ReleaseType {
        self.release_type
    }

    /// Whether installing on an online image needs a restart
    pub fn restart_required(&self) -> RestartType {
        self.restart_required
    }

    pub fn support_information(&self) -> Option<&str> {
        self.support_information.as_deref()
    }

    /// Hash of the display name, or 0 when it is absent or empty
    pub fn hash_code(&self) -> u64 {
        match self.display_name.as_deref() {
            None | Some("") => 0,
            Some(name) => {
                let mut hasher = DefaultHasher::new();
                name.hash(&mut hasher);
                hasher.finish()
            }
        }
    }
}

impl PartialEq for PackageInfo {
    fn eq(&self, other: &Self) -> bool {
        self.display_name == other.display_name
    }
}

impl Eq for PackageInfo {}

impl Hash for PackageInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash_code());
    }
}

/// Serialized form with timestamps already converted
#[derive(Serialize)]
struct PackageInfoView<'a> {
    package_name: Option<&'a str>,
    display_name: Option<&'a str>,
    description: Option<&'a str>,
    package_state: PackageFeatureState,
    release_type: ReleaseType,
    applicable: bool,
    install_time: Option<NaiveDateTime>,
    creation_time: Option<NaiveDateTime>,
    last_update_time: Option<NaiveDateTime>,
    copyright: Option<&'a str>,
    company: Option<&'a str>,
    install_client: Option<&'a str>,
    install_package_name: Option<&'a str>,
    product_name: Option<&'a str>,
    product_version: Option<&'a str>,
    restart_required: RestartType,
    fully_offline: FullyOfflineInstallableType,
    support_information: Option<&'a str>,
    custom_properties: &'a CustomPropertyCollection,
    features: &'a FeatureCollection,
}

impl Serialize for PackageInfo {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        PackageInfoView {
            package_name: self.package_name(),
            display_name: self.display_name(),
            description: self.description(),
            package_state: self.package_state,
            release_type: self.release_type,
            applicable: self.applicable,
            install_time: self.install_time(),
            creation_time: self.creation_time(),
            last_update_time: self.last_update_time(),
            copyright: self.copyright(),
            company: self.company(),
            install_client: self.install_client(),
            install_package_name: self.install_package_name(),
            product_name: self.product_name(),
            product_version: self.product_version(),
            restart_required: self.restart_required,
            fully_offline: self.fully_offline,
            support_information: self.support_information(),
            custom_properties: &self.custom_properties,
            features: &self.features,
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::native::{ImageBuilder, MemoryImage, PointerWidth};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    const BASE: Address = Address(0x7ff6_0000_0000);

    fn options() -> DecodeOptions {
        DecodeOptions::with_pointer_width(PointerWidth::Bits64)
    }

    fn property(name: &str, value: &str) -> CustomProperty {
        CustomProperty::new(Some(name.to_string()), Some(value.to_string()), Some(format!("\\{}", name)))
    }

    fn build(
        record: &PackageRecord,
        properties: &[CustomProperty],
        features: &[Feature],
    ) -> (MemoryImage, Address) {
        let mut builder = ImageBuilder::new(BASE, PointerWidth::Bits64);
        let address = builder.write_package(record, properties, features).unwrap();
        (builder.finish(), address)
    }

    fn named(display_name: Option<&str>, product_version: &str) -> PackageInfo {
        let record = PackageRecord {
            display_name: display_name.map(str::to_string),
            product_version: Some(product_version.to_string()),
            ..Default::default()
        };
        let (image, address) = build(&record, &[], &[]);
        PackageInfo::from_address(&image, address, &options()).unwrap()
    }

    #[test]
    fn test_update_with_two_custom_properties() {
        let record = PackageRecord {
            display_name: Some("Update1".to_string()),
            ..Default::default()
        };
        let properties = [property("Second", "2"), property("First", "1")];
        let (image, address) = build(&record, &properties, &[]);

        let info = PackageInfo::from_address(&image, address, &options()).unwrap();
        assert_eq!(info.display_name(), Some("Update1"));
        assert_eq!(info.features().len(), 0);
        assert_eq!(info.custom_properties().len(), 2);
        assert_eq!(info.custom_properties()[0].name(), Some("Second"));
        assert_eq!(info.custom_properties()[1].name(), Some("First"));
        assert_eq!(info.custom_properties()[1].path(), Some("\\First"));
    }

    #[test]
    fn test_collections_keep_count_and_order() {
        let features: Vec<Feature> = (0..5)
            .map(|i| Feature::new(Some(format!("Feature{}", i)), PackageFeatureState::try_from(i % 8).unwrap()))
            .collect();
        let (image, address) = build(&PackageRecord::default(), &[], &features);

        let info = PackageInfo::from_address(&image, address, &options()).unwrap();
        assert_eq!(info.features().as_slice(), features.as_slice());
        assert!(info.custom_properties().is_empty());
    }

    #[test]
    fn test_duplicate_sub_records_are_kept() {
        let properties = [property("Same", "x"), property("Same", "x")];
        let (image, address) = build(&PackageRecord::default(), &properties, &[]);

        let info = PackageInfo::from_address(&image, address, &options()).unwrap();
        assert_eq!(info.custom_properties().len(), 2);
    }

    #[test]
    fn test_count_with_null_pointer_reads_nothing() {
        let record = PackageRecord {
            custom_property: Address::NULL,
            custom_property_count: 7,
            feature: Address::NULL,
            feature_count: 3,
            ..Default::default()
        };
        let image = MemoryImage::new(Address(0x1000), Vec::new());

        let info = PackageInfo::from_record(record, &image, &options()).unwrap();
        assert!(info.custom_properties().is_empty());
        assert!(info.features().is_empty());
    }

    #[test]
    fn test_pointer_with_zero_count_reads_nothing() {
        // Pointers aim outside the (empty) image; any read would fail
        let record = PackageRecord {
            custom_property: Address(0xdead_0000),
            custom_property_count: 0,
            feature: Address(0xbeef_0000),
            feature_count: 0,
            ..Default::default()
        };
        let image = MemoryImage::new(Address(0x1000), Vec::new());

        let info = PackageInfo::from_record(record, &image, &options()).unwrap();
        assert!(info.custom_properties().is_empty());
        assert!(info.features().is_empty());
    }

    #[test]
    fn test_each_array_is_checked_independently() {
        let mut builder = ImageBuilder::new(BASE, PointerWidth::Bits64);
        let features = [Feature::new(Some("Only".to_string()), PackageFeatureState::Installed)];
        let feature = builder.write_features(&features).unwrap();
        let image = builder.finish();

        let record = PackageRecord {
            custom_property_count: 4,
            feature,
            feature_count: 1,
            ..Default::default()
        };
        let info = PackageInfo::from_record(record, &image, &options()).unwrap();
        assert!(info.custom_properties().is_empty());
        assert_eq!(info.features().len(), 1);
    }

    #[test]
    fn test_array_past_end_of_image_fails_whole_read() {
        let mut builder = ImageBuilder::new(BASE, PointerWidth::Bits64);
        let feature = builder
            .write_features(&[Feature::default(), Feature::default()])
            .unwrap();
        let image = builder.finish();

        let record = PackageRecord {
            feature,
            feature_count: 1000,
            ..Default::default()
        };
        assert!(matches!(
            PackageInfo::from_record(record, &image, &options()),
            Err(Error::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_scalar_fields_preserved() {
        let install = NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_milli_opt(10, 20, 30, 400)
            .unwrap();
        let record = PackageRecord {
            package_name: Some("Package_for_RollupFix~31bf3856ad364e35~amd64~~22621.1778.1.9".to_string()),
            package_state: PackageFeatureState::InstallPending,
            release_type: ReleaseType::UpdateRollup,
            install_time: SystemTime::from_naive(&install).unwrap(),
            applicable: true,
            copyright: Some("(c) Contoso".to_string()),
            company: Some("Contoso".to_string()),
            display_name: Some("Rollup".to_string()),
            description: Some("Monthly rollup".to_string()),
            install_client: Some("DISM Package Manager Provider".to_string()),
            install_package_name: Some("update.mum".to_string()),
            product_name: Some("Windows".to_string()),
            product_version: Some("10.0.22621.1778".to_string()),
            restart_required: RestartType::Required,
            fully_offline: FullyOfflineInstallableType::NotInstallable,
            support_information: Some("https://support.example.com".to_string()),
            ..Default::default()
        };
        let (image, address) = build(&record, &[], &[]);

        let info = PackageInfo::from_address(&image, address, &options()).unwrap();
        assert_eq!(info.package_name(), record.package_name.as_deref());
        assert_eq!(info.package_state(), PackageFeatureState::InstallPending);
        assert_eq!(info.release_type(), ReleaseType::UpdateRollup);
        assert_eq!(info.install_time(), Some(install));
        assert_eq!(info.install_time_raw(), record.install_time);
        assert!(info.applicable());
        assert_eq!(info.copyright(), Some("(c) Contoso"));
        assert_eq!(info.company(), Some("Contoso"));
        assert_eq!(info.creation_time(), None);
        assert_eq!(info.description(), Some("Monthly rollup"));
        assert_eq!(info.install_client(), Some("DISM Package Manager Provider"));
        assert_eq!(info.install_package_name(), Some("update.mum"));
        assert_eq!(info.last_update_time(), None);
        assert_eq!(info.product_name(), Some("Windows"));
        assert_eq!(info.product_version(), Some("10.0.22621.1778"));
        assert_eq!(info.restart_required(), RestartType::Required);
        assert_eq!(info.fully_offline(), FullyOfflineInstallableType::NotInstallable);
        assert_eq!(info.support_information(), Some("https://support.example.com"));
    }

    #[test]
    fn test_equality_uses_display_name_only() {
        let a = named(Some("KB123"), "1.0");
        let b = named(Some("KB123"), "2.0");
        let c = named(Some("KB123"), "3.0");
        let other = named(Some("kb123"), "1.0");

        assert_eq!(a, a);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(b, c);
        assert_eq!(a, c);
        assert_ne!(a, other);
        assert_eq!(a.hash_code(), b.hash_code());
    }

    #[test]
    fn test_absent_and_empty_display_names() {
        let absent = named(None, "1.0");
        let empty = named(Some(""), "1.0");

        assert_eq!(absent.hash_code(), 0);
        assert_eq!(empty.hash_code(), 0);
        assert_eq!(absent, named(None, "2.0"));
        assert_ne!(absent, empty);
        assert_ne!(named(Some("x"), "1.0").hash_code(), 0);
    }

    #[test]
    fn test_hash_set_deduplicates_by_display_name() {
        let mut set = HashSet::new();
        set.insert(named(Some("KB123"), "1.0"));
        set.insert(named(Some("KB123"), "2.0"));
        set.insert(named(Some("KB456"), "1.0"));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_serializes_converted_timestamps() {
        let created = NaiveDate::from_ymd_opt(2020, 2, 29)
            .unwrap()
            .and_hms_milli_opt(23, 59, 59, 0)
            .unwrap();
        let record = PackageRecord {
            display_name: Some("Leap".to_string()),
            creation_time: SystemTime::from_naive(&created).unwrap(),
            release_type: ReleaseType::Hotfix,
            ..Default::default()
        };
        let (image, address) = build(&record, &[property("K", "V")], &[]);
        let info = PackageInfo::from_address(&image, address, &options()).unwrap();

        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["display_name"], "Leap");
        assert_eq!(json["creation_time"], "2020-02-29T23:59:59");
        assert_eq!(json["install_time"], serde_json::Value::Null);
        assert_eq!(json["release_type"], "hotfix");
        assert_eq!(json["custom_properties"][0]["value"], "V");
    }

    #[test]
    fn test_snapshot_outlives_memory() {
        let record = PackageRecord {
            display_name: Some("Detached".to_string()),
            ..Default::default()
        };
        let (image, address) = build(&record, &[property("A", "B")], &[]);
        let info = PackageInfo::from_address(&image, address, &options()).unwrap();
        drop(image);

        assert_eq!(info.display_name(), Some("Detached"));
        assert_eq!(info.custom_properties()[0].value(), Some("B"));
    }

    #[test]
    fn test_snapshot_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PackageInfo>();
    }

    #[allow(dead_code)]
    #[repr(C, packed(4))]
    struct RawCustomProperty {
        name: *const u16,
        value: *const u16,
        path: *const u16,
    }

    #[allow(dead_code)]
    #[repr(C, packed(4))]
    struct RawFeature {
        feature_name: *const u16,
        state: u32,
    }

    #[allow(dead_code)]
    #[repr(C, packed(4))]
    struct RawPackageInfo {
        package_name: *const u16,
        package_state: u32,
        release_type: u32,
        install_time: [u16; 8],
        applicable: i32,
        copyright: *const u16,
        company: *const u16,
        creation_time: [u16; 8],
        display_name: *const u16,
        description: *const u16,
        install_client: *const u16,
        install_package_name: *const u16,
        last_update_time: [u16; 8],
        product_name: *const u16,
        product_version: *const u16,
        restart_required: u32,
        fully_offline: u32,
        support_information: *const u16,
        custom_property: *const RawCustomProperty,
        custom_property_count: u32,
        feature: *const RawFeature,
        feature_count: u32,
    }

    fn wide(text: &str) -> Vec<u16> {
        text.encode_utf16().chain(std::iter::once(0)).collect()
    }

    #[test]
    fn test_native_struct_sizes_match_layout() {
        let layout = Layout::new(PointerWidth::native());
        assert_eq!(std::mem::size_of::<RawPackageInfo>(), layout.package().size());
        assert_eq!(std::mem::size_of::<RawCustomProperty>(), layout.custom_property().size());
        assert_eq!(std::mem::size_of::<RawFeature>(), layout.feature().size());
    }

    #[test]
    fn test_from_ptr_reads_native_struct() {
        let name = wide("Package_for_KB123");
        let display = wide("KB123");
        let version = wide("10.0.1");
        let prop_name = wide("Owner");
        let prop_value = wide("Servicing");
        let feature_a = wide("FeatureA");
        let feature_b = wide("FeatureB");

        let properties = [RawCustomProperty {
            name: prop_name.as_ptr(),
            value: prop_value.as_ptr(),
            path: std::ptr::null(),
        }];
        let features = [
            RawFeature {
                feature_name: feature_a.as_ptr(),
                state: PackageFeatureState::Installed.raw(),
            },
            RawFeature {
                feature_name: feature_b.as_ptr(),
                state: PackageFeatureState::Staged.raw(),
            },
        ];

        let raw = RawPackageInfo {
            package_name: name.as_ptr(),
            package_state: PackageFeatureState::Installed.raw(),
            release_type: ReleaseType::Update.raw(),
            install_time: [2022, 5, 2, 17, 9, 45, 0, 125],
            applicable: 1,
            copyright: std::ptr::null(),
            company: std::ptr::null(),
            creation_time: [0; 8],
            display_name: display.as_ptr(),
            description: std::ptr::null(),
            install_client: std::ptr::null(),
            install_package_name: std::ptr::null(),
            last_update_time: [0; 8],
            product_name: std::ptr::null(),
            product_version: version.as_ptr(),
            restart_required: RestartType::No.raw(),
            fully_offline: FullyOfflineInstallableType::Installable.raw(),
            support_information: std::ptr::null(),
            custom_property: properties.as_ptr(),
            custom_property_count: properties.len() as u32,
            feature: features.as_ptr(),
            feature_count: features.len() as u32,
        };

        let info = unsafe { PackageInfo::from_ptr(&raw as *const RawPackageInfo as *const c_void) }
            .unwrap();

        assert_eq!(info.package_name(), Some("Package_for_KB123"));
        assert_eq!(info.display_name(), Some("KB123"));
        assert_eq!(info.product_version(), Some("10.0.1"));
        assert_eq!(info.company(), None);
        assert_eq!(info.release_type(), ReleaseType::Update);
        assert!(info.applicable());
        assert_eq!(
            info.install_time(),
            NaiveDate::from_ymd_opt(2022, 5, 17).unwrap().and_hms_milli_opt(9, 45, 0, 125)
        );
        assert_eq!(info.custom_properties().len(), 1);
        assert_eq!(info.custom_properties()[0].value(), Some("Servicing"));
        assert_eq!(info.custom_properties()[0].path(), None);

        let names: Vec<_> = info.features().iter().map(|f| f.feature_name().unwrap()).collect();
        assert_eq!(names, vec!["FeatureA", "FeatureB"]);
        assert_eq!(info.features()[1].state(), PackageFeatureState::Staged);
    }
}
