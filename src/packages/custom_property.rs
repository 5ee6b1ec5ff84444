// src/packages/custom_property.rs

//! Custom properties attached to a package (`DismCustomProperty`)

use crate::error::Result;
use crate::native::fields::FieldReader;
use crate::native::{Address, DecodeOptions, Layout, NativeMemory, read_wide_string};
use serde::{Deserialize, Serialize};

/// A name/value pair with the path of the property inside the package
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomProperty {
    name: Option<String>,
    value: Option<String>,
    path: Option<String>,
}

impl CustomProperty {
    pub fn new(name: Option<String>, value: Option<String>, path: Option<String>) -> Self {
        Self { name, value, path }
    }

    /// Decode the custom property record at `address`
    pub fn read<M: NativeMemory + ?Sized>(
        memory: &M,
        address: Address,
        layout: &Layout,
        options: &DecodeOptions,
    ) -> Result<Self> {
        let mut fields =
            FieldReader::read(memory, address, layout.custom_property(), layout.width())?;
        let limit = options.max_string_units;

        let name = fields.wide_string();
        let value = fields.wide_string();
        let path = fields.wide_string();

        Ok(Self {
            name: read_wide_string(memory, name, limit)?,
            value: read_wide_string(memory, value, limit)?,
            path: read_wide_string(memory, path, limit)?,
        })
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// Path of the property, e.g. `\Microsoft-Windows-Foundation`
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }
}
