// src/packages/mod.rs

//! Package metadata records
//!
//! This module turns native package information records into owned values:
//! - `PackageRecord`: the native-shaped intermediate copy
//! - `PackageInfo`: the immutable snapshot with derived collections
//! - `CustomProperty` and `Feature`: the two sub-record types
//! - The enumerations carried by the records

pub mod collection;
pub mod custom_property;
mod encode;
pub mod feature;
pub mod info;
pub mod record;
pub mod types;

pub use collection::{Collection, CustomPropertyCollection, FeatureCollection};
pub use custom_property::CustomProperty;
pub use feature::Feature;
pub use info::PackageInfo;
pub use record::PackageRecord;
pub use types::{FullyOfflineInstallableType, PackageFeatureState, ReleaseType, RestartType};
