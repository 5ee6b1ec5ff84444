// src/native/image.rs

//! Owned memory images
//!
//! A `MemoryImage` is a copy of a native memory region together with the
//! address it was mapped at. Every read is checked against the region.

use crate::error::{Error, Result};
use crate::native::{Address, NativeMemory};
use std::fs;
use std::path::Path;
use tracing::debug;

/// A contiguous byte region mapped at `base`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryImage {
    base: Address,
    bytes: Vec<u8>,
}

impl MemoryImage {
    pub fn new(base: Address, bytes: Vec<u8>) -> Self {
        Self { base, bytes }
    }

    /// Load a raw dump file that was captured starting at `base`
    pub fn load(path: impl AsRef<Path>, base: Address) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        debug!(
            "Loaded memory image {} ({} bytes at {})",
            path.display(),
            bytes.len(),
            base
        );
        Ok(Self::new(base, bytes))
    }

    /// Write the raw bytes of the image; the base address is not stored
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, &self.bytes)?;
        Ok(())
    }

    pub fn base(&self) -> Address {
        self.base
    }

    /// One past the last mapped address
    pub fn end(&self) -> Address {
        Address(self.base.0.saturating_add(self.bytes.len() as u64))
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn contains(&self, address: Address, len: usize) -> bool {
        self.range(address, len).is_some()
    }

    fn range(&self, address: Address, len: usize) -> Option<std::ops::Range<usize>> {
        let start = usize::try_from(address.0.checked_sub(self.base.0)?).ok()?;
        let end = start.checked_add(len)?;
        (end <= self.bytes.len()).then_some(start..end)
    }
}

impl NativeMemory for MemoryImage {
    fn read_into(&self, address: Address, buf: &mut [u8]) -> Result<()> {
        let range = self.range(address, buf.len()).ok_or(Error::OutOfBounds {
            address: address.0,
            len: buf.len(),
        })?;
        buf.copy_from_slice(&self.bytes[range]);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bounds_checked_reads() {
        let image = MemoryImage::new(Address(0x1000), vec![1, 2, 3, 4]);

        assert_eq!(image.read_vec(Address(0x1000), 4).unwrap(), vec![1, 2, 3, 4]);
        assert_eq!(image.read_vec(Address(0x1002), 2).unwrap(), vec![3, 4]);
        assert_eq!(image.read_vec(Address(0x1004), 0).unwrap(), Vec::<u8>::new());

        assert!(matches!(
            image.read_vec(Address(0x1002), 3),
            Err(Error::OutOfBounds { address: 0x1002, len: 3 })
        ));
        assert!(image.read_vec(Address(0x0fff), 1).is_err());
        assert!(image.read_vec(Address(u64::MAX), 2).is_err());
    }

    #[test]
    fn test_contains_and_end() {
        let image = MemoryImage::new(Address(0x1000), vec![0; 16]);
        assert_eq!(image.end(), Address(0x1010));
        assert!(image.contains(Address(0x1000), 16));
        assert!(!image.contains(Address(0x1001), 16));
        assert!(!image.is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let image = MemoryImage::new(Address(0x4000), vec![9, 8, 7]);
        let temp_file = NamedTempFile::new().unwrap();

        image.save(temp_file.path()).unwrap();
        let loaded = MemoryImage::load(temp_file.path(), Address(0x4000)).unwrap();
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = MemoryImage::load("/nonexistent/dump.bin", Address(0x1000));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
