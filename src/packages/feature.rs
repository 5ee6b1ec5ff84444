// src/packages/feature.rs

//! Features declared by a package (`DismFeature`)

use crate::error::Result;
use crate::native::fields::FieldReader;
use crate::native::{Address, DecodeOptions, Layout, NativeMemory, read_wide_string};
use crate::packages::types::PackageFeatureState;
use serde::{Deserialize, Serialize};

/// A feature name and its state in the image
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Feature {
    feature_name: Option<String>,
    state: PackageFeatureState,
}

impl Feature {
    pub fn new(feature_name: Option<String>, state: PackageFeatureState) -> Self {
        Self {
            feature_name,
            state,
        }
    }

    /// Decode the feature record at `address`
    pub fn read<M: NativeMemory + ?Sized>(
        memory: &M,
        address: Address,
        layout: &Layout,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let mut fields = FieldReader::read(memory, address, layout.feature(), layout.width())?;

        let feature_name = fields.wide_string();
        let state = PackageFeatureState::decode(fields.enumeration(), options.strict_enums)?;

        Ok(Self {
            feature_name: read_wide_string(memory, feature_name, options.max_string_units)?,
            state,
        })
    }

    pub fn feature_name(&self) -> Option<&str> {
        self.feature_name.as_deref()
    }

    pub fn state(&self) -> PackageFeatureState {
        self.state
    }
}
