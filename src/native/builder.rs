// src/native/builder.rs

//! Builds native memory images bit-for-bit
//!
//! `ImageBuilder` is an append-only arena mapped at a base address. Records,
//! arrays and strings are placed with the same packed layout the decoders
//! read, which makes it the producer side of the format. The package-level
//! writers live in `packages::encode`.

use crate::error::{Error, Result};
use crate::native::layout::{Layout, PACK};
use crate::native::{Address, MemoryImage, PointerWidth};

/// Zeroed bytes kept at the start of every image so that no allocation
/// lands on the base address itself
const GUARD_SIZE: usize = 16;

/// Append-only builder for a `MemoryImage`
#[derive(Debug)]
pub struct ImageBuilder {
    base: Address,
    layout: Layout,
    bytes: Vec<u8>,
}

impl ImageBuilder {
    pub fn new(base: Address, width: PointerWidth) -> Self {
        Self {
            base,
            layout: Layout::new(width),
            bytes: vec![0u8; GUARD_SIZE],
        }
    }

    pub fn width(&self) -> PointerWidth {
        self.layout.width()
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Reserve `size` zeroed bytes aligned to `align`
    pub fn alloc(&mut self, size: usize, align: usize) -> Result<Address> {
        let offset = self.bytes.len().div_ceil(align.max(1)) * align.max(1);
        let address = self
            .base
            .checked_add(offset as u64)
            .and_then(|a| a.checked_add(size as u64).map(|_| a))
            .ok_or(Error::AddressOverflow {
                base: self.base.0,
                index: offset,
                stride: 1,
            })?;

        if self.width() == PointerWidth::Bits32 && address.0 + size as u64 > u64::from(u32::MAX) + 1 {
            return Err(Error::PointerTruncation {
                address: address.0,
                bits: 32,
            });
        }

        self.bytes.resize(offset + size, 0);
        Ok(address)
    }

    /// Overwrite bytes at an address previously handed out by `alloc`
    pub fn write_at(&mut self, address: Address, data: &[u8]) -> Result<()> {
        let out_of_bounds = Error::OutOfBounds {
            address: address.0,
            len: data.len(),
        };
        let start = address
            .0
            .checked_sub(self.base.0)
            .and_then(|o| usize::try_from(o).ok());

        match start.and_then(|s| self.bytes.get_mut(s..s.checked_add(data.len())?)) {
            Some(target) => {
                target.copy_from_slice(data);
                Ok(())
            }
            None => Err(out_of_bounds),
        }
    }

    /// Append raw bytes and return their address
    pub fn push_bytes(&mut self, data: &[u8], align: usize) -> Result<Address> {
        let address = self.alloc(data.len(), align)?;
        self.write_at(address, data)?;
        Ok(address)
    }

    /// Append a NUL-terminated UTF-16LE string; `None` yields a null pointer
    pub fn push_wide_string(&mut self, text: Option<&str>) -> Result<Address> {
        let Some(text) = text else {
            return Ok(Address::NULL);
        };

        let mut data = Vec::with_capacity((text.len() + 1) * 2);
        for unit in text.encode_utf16().chain(std::iter::once(0)) {
            data.extend_from_slice(&unit.to_le_bytes());
        }
        self.push_bytes(&data, 2)
    }

    /// Append encoded records back to back as one array
    ///
    /// An empty slice produces a null pointer.
    pub fn push_array(&mut self, records: &[Vec<u8>]) -> Result<Address> {
        if records.is_empty() {
            return Ok(Address::NULL);
        }

        let data: Vec<u8> = records.concat();
        self.push_bytes(&data, PACK)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.len() <= GUARD_SIZE
    }

    pub fn finish(self) -> MemoryImage {
        MemoryImage::new(self.base, self.bytes)
    }
}
