// src/packages/record.rs

//! The native-shaped intermediate package record
//!
//! `PackageRecord` mirrors `DismPackageInfo` field for field. Strings are
//! already copied out of native memory, but the two sub-record arrays are
//! still raw "pointer + count" pairs; `PackageInfo::from_record` walks them.

use crate::error::Result;
use crate::native::fields::FieldReader;
use crate::native::{Address, DecodeOptions, Layout, NativeMemory, SystemTime, read_wide_string};
use crate::packages::types::{
    FullyOfflineInstallableType, PackageFeatureState, ReleaseType, RestartType,
};
use tracing::debug;

/// Field-for-field copy of a native package information record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageRecord {
    pub package_name: Option<String>,
    pub package_state: PackageFeatureState,
    pub release_type: ReleaseType,
    /// Local time of the servicing host
    pub install_time: SystemTime,
    pub applicable: bool,
    pub copyright: Option<String>,
    pub company: Option<String>,
    /// Local time of the host that created the package
    pub creation_time: SystemTime,
    pub display_name: Option<String>,
    pub description: Option<String>,
    pub install_client: Option<String>,
    pub install_package_name: Option<String>,
    /// Local time of the servicing host
    pub last_update_time: SystemTime,
    pub product_name: Option<String>,
    pub product_version: Option<String>,
    pub restart_required: RestartType,
    pub fully_offline: FullyOfflineInstallableType,
    pub support_information: Option<String>,
    pub custom_property: Address,
    pub custom_property_count: u32,
    pub feature: Address,
    pub feature_count: u32,
}

impl PackageRecord {
    /// Deserialize the record at `address`
    pub fn read<M: NativeMemory + ?Sized>(
        memory: &M,
        address: Address,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let layout = Layout::new(options.pointer_width);
        Self::read_with_layout(memory, address, &layout, options)
    }

    pub(crate) fn read_with_layout<M: NativeMemory + ?Sized>(
        memory: &M,
        address: Address,
        layout: &Layout,
        options: &DecodeOptions,
    ) -> Result<Self> {
        debug!("Reading {} package record at {}", layout.width(), address);

        let mut fields = FieldReader::read(memory, address, layout.package(), layout.width())?;
        let text = |ptr: Address| read_wide_string(memory, ptr, options.max_string_units);
        let strict = options.strict_enums;

        let package_name = fields.wide_string();
        let package_state = PackageFeatureState::decode(fields.enumeration(), strict)?;
        let release_type = ReleaseType::decode(fields.enumeration(), strict)?;
        let install_time = fields.system_time();
        let applicable = fields.bool();
        let copyright = fields.wide_string();
        let company = fields.wide_string();
        let creation_time = fields.system_time();
        let display_name = fields.wide_string();
        let description = fields.wide_string();
        let install_client = fields.wide_string();
        let install_package_name = fields.wide_string();
        let last_update_time = fields.system_time();
        let product_name = fields.wide_string();
        let product_version = fields.wide_string();
        let restart_required = RestartType::decode(fields.enumeration(), strict)?;
        let fully_offline = FullyOfflineInstallableType::decode(fields.enumeration(), strict)?;
        let support_information = fields.wide_string();
        let custom_property = fields.pointer();
        let custom_property_count = fields.u32();
        let feature = fields.pointer();
        let feature_count = fields.u32();

        Ok(Self {
            package_name: text(package_name)?,
            package_state,
            release_type,
            install_time,
            applicable,
            copyright: text(copyright)?,
            company: text(company)?,
            creation_time,
            display_name: text(display_name)?,
            description: text(description)?,
            install_client: text(install_client)?,
            install_package_name: text(install_package_name)?,
            last_update_time,
            product_name: text(product_name)?,
            product_version: text(product_version)?,
            restart_required,
            fully_offline,
            support_information: text(support_information)?,
            custom_property,
            custom_property_count,
            feature,
            feature_count,
        })
    }
}
