// src/native/mod.rs

//! Native memory access for dismpkg
//!
//! This module provides the read-only views the decoders work through:
//! - `NativeMemory`: the trait every decoder reads from
//! - `MemoryImage`: an owned, bounds-checked byte region mapped at a base address
//! - `ProcessMemory`: live memory of the current process (unsafe to construct)
//! - Packed layout tables, field readers/writers and an image builder

pub mod builder;
pub mod fields;
pub mod image;
pub mod layout;
pub mod system_time;

pub use builder::ImageBuilder;
pub use image::MemoryImage;
pub use layout::{FieldKind, Layout, RecordLayout};
pub use system_time::SystemTime;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default cap on the length of a wide string, in UTF-16 code units
pub const DEFAULT_MAX_STRING_UNITS: usize = 32_768;

/// An address in the native address space being decoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(pub u64);

impl Address {
    pub const NULL: Address = Address(0);

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Add a byte offset, returning `None` on overflow
    pub fn checked_add(self, bytes: u64) -> Option<Address> {
        self.0.checked_add(bytes).map(Address)
    }

    /// Address of a pointer in the current process
    pub fn from_ptr<T>(ptr: *const T) -> Self {
        Address(ptr as usize as u64)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Pointer size of the image that produced the records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerWidth {
    Bits32,
    Bits64,
}

impl PointerWidth {
    /// Pointer width of the current build target
    pub const fn native() -> Self {
        if cfg!(target_pointer_width = "64") {
            PointerWidth::Bits64
        } else {
            PointerWidth::Bits32
        }
    }

    pub const fn bytes(self) -> usize {
        match self {
            PointerWidth::Bits32 => 4,
            PointerWidth::Bits64 => 8,
        }
    }

    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            32 => Ok(PointerWidth::Bits32),
            64 => Ok(PointerWidth::Bits64),
            other => Err(Error::InvalidPointerWidth(other.to_string())),
        }
    }
}

impl Default for PointerWidth {
    fn default() -> Self {
        Self::native()
    }
}

impl fmt::Display for PointerWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PointerWidth::Bits32 => write!(f, "32-bit"),
            PointerWidth::Bits64 => write!(f, "64-bit"),
        }
    }
}

impl FromStr for PointerWidth {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let bits = s
            .trim()
            .trim_end_matches("-bit")
            .parse::<u32>()
            .map_err(|_| Error::InvalidPointerWidth(s.trim().to_string()))?;
        Self::from_bits(bits)
    }
}

/// Settings that control how native records are decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Pointer width of the image the records came from
    pub pointer_width: PointerWidth,

    /// Longest wide string accepted before it is treated as unterminated
    pub max_string_units: usize,

    /// Reject enumeration values with no defined constant instead of keeping
    /// them raw
    pub strict_enums: bool,
}

impl DecodeOptions {
    pub fn with_pointer_width(pointer_width: PointerWidth) -> Self {
        Self {
            pointer_width,
            ..Self::default()
        }
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            pointer_width: PointerWidth::native(),
            max_string_units: DEFAULT_MAX_STRING_UNITS,
            strict_enums: false,
        }
    }
}

/// Read-only access to a native address space
pub trait NativeMemory {
    /// Fill `buf` with the bytes starting at `address`
    fn read_into(&self, address: Address, buf: &mut [u8]) -> Result<()>;

    /// Read `len` bytes starting at `address`
    fn read_vec(&self, address: Address, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read_into(address, &mut buf)?;
        Ok(buf)
    }

    /// Read a little-endian u16
    fn read_u16(&self, address: Address) -> Result<u16> {
        let mut buf = [0u8; 2];
        self.read_into(address, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }
}

impl<M: NativeMemory + ?Sized> NativeMemory for &M {
    fn read_into(&self, address: Address, buf: &mut [u8]) -> Result<()> {
        (**self).read_into(address, buf)
    }
}

/// Memory of the current process, read through raw pointers
#[derive(Debug)]
pub struct ProcessMemory {
    _private: (),
}

impl ProcessMemory {
    /// Create a view over the current process's memory
    ///
    /// # Safety
    ///
    /// Every range later read through this value must be valid for reads
    /// for the duration of the read. That covers the record itself, every
    /// string it points to up to and including the terminator, and both
    /// sub-record arrays for their declared counts.
    pub unsafe fn new() -> Self {
        Self { _private: () }
    }
}

impl NativeMemory for ProcessMemory {
    fn read_into(&self, address: Address, buf: &mut [u8]) -> Result<()> {
        if address.is_null() {
            return Err(Error::NullAddress("process memory read"));
        }

        let ptr = usize::try_from(address.0).map_err(|_| Error::OutOfBounds {
            address: address.0,
            len: buf.len(),
        })? as *const u8;

        // SAFETY: the caller of `ProcessMemory::new` vouched for every range read.
        unsafe {
            std::ptr::copy_nonoverlapping(ptr, buf.as_mut_ptr(), buf.len());
        }

        Ok(())
    }
}

/// Read a NUL-terminated UTF-16LE string
///
/// A null address yields `None`. Unpaired surrogates are replaced with
/// U+FFFD rather than rejected.
pub fn read_wide_string<M: NativeMemory + ?Sized>(
    memory: &M,
    address: Address,
    limit: usize,
) -> Result<Option<String>> {
    if address.is_null() {
        return Ok(None);
    }

    let mut units = Vec::new();
    let mut cursor = address;

    loop {
        let unit = memory.read_u16(cursor)?;
        if unit == 0 {
            break;
        }
        if units.len() == limit {
            return Err(Error::UnterminatedString {
                address: address.0,
                limit,
            });
        }
        units.push(unit);
        cursor = cursor.checked_add(2).ok_or(Error::AddressOverflow {
            base: address.0,
            index: units.len(),
            stride: 2,
        })?;
    }

    Ok(Some(String::from_utf16_lossy(&units)))
}

/// A "pointer + count" array of fixed-size elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArrayView {
    base: Address,
    stride: usize,
    count: usize,
}

impl ArrayView {
    /// View the array only when it is actually present
    ///
    /// Both `count > 0` and a non-null `base` are required; anything else is
    /// treated as an absent array.
    pub fn present(base: Address, stride: usize, count: u32) -> Option<Self> {
        if count == 0 || base.is_null() {
            return None;
        }

        Some(Self {
            base,
            stride,
            count: count as usize,
        })
    }

    pub fn base(&self) -> Address {
        self.base
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Address of the element at `index`
    pub fn element(&self, index: usize) -> Result<Address> {
        if index >= self.count {
            return Err(Error::OutOfBounds {
                address: self.base.0,
                len: self.stride.saturating_mul(index.saturating_add(1)),
            });
        }

        let overflow = || Error::AddressOverflow {
            base: self.base.0,
            index,
            stride: self.stride,
        };

        let offset = (index as u64)
            .checked_mul(self.stride as u64)
            .ok_or_else(overflow)?;
        self.base.checked_add(offset).ok_or_else(overflow)
    }

    /// Element addresses in array order
    pub fn addresses(&self) -> impl Iterator<Item = Result<Address>> + '_ {
        (0..self.count).map(move |index| self.element(index))
    }
}
