// src/lib.rs

//! dismpkg
//!
//! Decodes the native package information record produced by the Windows
//! image servicing API into owned, immutable Rust values.
//!
//! # Architecture
//!
//! - `native`: bounds-checked views over native memory, the packed layout
//!   tables, and an image builder that produces records bit-for-bit
//! - `packages`: the intermediate native-shaped record and the public
//!   `PackageInfo` snapshot with its custom property and feature collections
//!
//! Nothing returned by this crate borrows native memory. Every text field,
//! timestamp and sub-record is copied out during construction.

pub mod native;
mod error;
pub mod packages;

pub use error::{Error, Result};
pub use native::{Address, DecodeOptions, Layout, MemoryImage, NativeMemory, PointerWidth};
pub use packages::{CustomProperty, Feature, PackageInfo, PackageRecord};
