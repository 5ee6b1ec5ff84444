// src/packages/encode.rs

//! Package-level writers for `ImageBuilder`
//!
//! These lay out package records and their sub-record arrays exactly as the
//! native API does, so fixtures and sample dumps decode through the same
//! path as live memory.

use crate::error::{Error, Result};
use crate::native::fields::FieldWriter;
use crate::native::layout::PACK;
use crate::native::{Address, ImageBuilder};
use crate::packages::custom_property::CustomProperty;
use crate::packages::feature::Feature;
use crate::packages::record::PackageRecord;

/// Element count as stored in the native record
fn native_count(len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::CountOverflow(len))
}

impl ImageBuilder {
    fn encode_custom_property(&mut self, property: &CustomProperty) -> Result<Vec<u8>> {
        let name = self.push_wide_string(property.name())?;
        let value = self.push_wide_string(property.value())?;
        let path = self.push_wide_string(property.path())?;

        let layout = self.layout().clone();
        let mut fields = FieldWriter::new(layout.custom_property(), layout.width());
        fields.wide_string(name)?;
        fields.wide_string(value)?;
        fields.wide_string(path)?;
        Ok(fields.finish())
    }

    fn encode_feature(&mut self, feature: &Feature) -> Result<Vec<u8>> {
        let name = self.push_wide_string(feature.feature_name())?;

        let layout = self.layout().clone();
        let mut fields = FieldWriter::new(layout.feature(), layout.width());
        fields.wide_string(name)?;
        fields.enumeration(feature.state().raw());
        Ok(fields.finish())
    }

    /// Write a single custom property record
    pub fn write_custom_property(&mut self, property: &CustomProperty) -> Result<Address> {
        let bytes = self.encode_custom_property(property)?;
        self.push_bytes(&bytes, PACK)
    }

    /// Write a single feature record
    pub fn write_feature(&mut self, feature: &Feature) -> Result<Address> {
        let bytes = self.encode_feature(feature)?;
        self.push_bytes(&bytes, PACK)
    }

    /// Write a contiguous custom property array; empty yields a null pointer
    pub fn write_custom_properties(&mut self, properties: &[CustomProperty]) -> Result<Address> {
        let records = properties
            .iter()
            .map(|p| self.encode_custom_property(p))
            .collect::<Result<Vec<_>>>()?;
        self.push_array(&records)
    }

    /// Write a contiguous feature array; empty yields a null pointer
    pub fn write_features(&mut self, features: &[Feature]) -> Result<Address> {
        let records = features
            .iter()
            .map(|f| self.encode_feature(f))
            .collect::<Result<Vec<_>>>()?;
        self.push_array(&records)
    }

    /// Write a package record exactly as given, array pointers and counts
    /// included
    pub fn write_package_record(&mut self, record: &PackageRecord) -> Result<Address> {
        let package_name = self.push_wide_string(record.package_name.as_deref())?;
        let copyright = self.push_wide_string(record.copyright.as_deref())?;
        let company = self.push_wide_string(record.company.as_deref())?;
        let display_name = self.push_wide_string(record.display_name.as_deref())?;
        let description = self.push_wide_string(record.description.as_deref())?;
        let install_client = self.push_wide_string(record.install_client.as_deref())?;
        let install_package_name =
            self.push_wide_string(record.install_package_name.as_deref())?;
        let product_name = self.push_wide_string(record.product_name.as_deref())?;
        let product_version = self.push_wide_string(record.product_version.as_deref())?;
        let support_information =
            self.push_wide_string(record.support_information.as_deref())?;

        let layout = self.layout().clone();
        let mut fields = FieldWriter::new(layout.package(), layout.width());
        fields.wide_string(package_name)?;
        fields.enumeration(record.package_state.raw());
        fields.enumeration(record.release_type.raw());
        fields.system_time(&record.install_time);
        fields.bool(record.applicable);
        fields.wide_string(copyright)?;
        fields.wide_string(company)?;
        fields.system_time(&record.creation_time);
        fields.wide_string(display_name)?;
        fields.wide_string(description)?;
        fields.wide_string(install_client)?;
        fields.wide_string(install_package_name)?;
        fields.system_time(&record.last_update_time);
        fields.wide_string(product_name)?;
        fields.wide_string(product_version)?;
        fields.enumeration(record.restart_required.raw());
        fields.enumeration(record.fully_offline.raw());
        fields.wide_string(support_information)?;
        fields.pointer(record.custom_property)?;
        fields.u32(record.custom_property_count);
        fields.pointer(record.feature)?;
        fields.u32(record.feature_count);

        self.push_bytes(&fields.finish(), PACK)
    }

    /// Write a package record together with its sub-record arrays
    ///
    /// The array pointers and counts of `record` are replaced by the arrays
    /// written here.
    pub fn write_package(
        &mut self,
        record: &PackageRecord,
        properties: &[CustomProperty],
        features: &[Feature],
    ) -> Result<Address> {
        let mut record = record.clone();
        record.custom_property_count = native_count(properties.len())?;
        record.feature_count = native_count(features.len())?;
        record.custom_property = self.write_custom_properties(properties)?;
        record.feature = self.write_features(features)?;

        self.write_package_record(&record)
    }
}
