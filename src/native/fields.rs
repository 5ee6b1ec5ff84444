// src/native/fields.rs

//! Sequential field access over packed record bytes
//!
//! `FieldReader` and `FieldWriter` walk a `RecordLayout` in declaration
//! order, so decoding and encoding share one source of offsets.

use crate::error::{Error, Result};
use crate::native::layout::{FieldKind, FieldOffset, RecordLayout, SYSTEMTIME_SIZE};
use crate::native::{Address, NativeMemory, PointerWidth, SystemTime};

/// Reads the fields of one record, in order
#[derive(Debug)]
pub struct FieldReader<'a> {
    layout: &'a RecordLayout,
    width: PointerWidth,
    bytes: Vec<u8>,
    next: usize,
}

impl<'a> FieldReader<'a> {
    /// Copy the record at `address` out of `memory`
    pub fn read<M: NativeMemory + ?Sized>(
        memory: &M,
        address: Address,
        layout: &'a RecordLayout,
        width: PointerWidth,
    ) -> Result<Self> {
        if address.is_null() {
            return Err(Error::NullAddress(layout.name()));
        }

        let bytes = memory.read_vec(address, layout.size())?;
        Ok(Self::from_bytes(layout, width, bytes))
    }

    /// Wrap bytes already copied out of native memory
    ///
    /// Short input is zero-extended to the record size.
    pub fn from_bytes(layout: &'a RecordLayout, width: PointerWidth, mut bytes: Vec<u8>) -> Self {
        bytes.resize(layout.size(), 0);
        Self {
            layout,
            width,
            bytes,
            next: 0,
        }
    }

    fn take(&mut self, kind: FieldKind) -> &[u8] {
        let field: FieldOffset = self.layout.fields()[self.next];
        debug_assert_eq!(
            field.kind, kind,
            "{}.{} read out of order",
            self.layout.name(),
            field.name
        );
        self.next += 1;
        &self.bytes[field.offset..field.offset + field.size]
    }

    fn take_address(&mut self, kind: FieldKind) -> Address {
        let width = self.width;
        let raw = self.take(kind);
        match width {
            PointerWidth::Bits32 => Address(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as u64),
            PointerWidth::Bits64 => {
                let mut word = [0u8; 8];
                word.copy_from_slice(&raw[..8]);
                Address(u64::from_le_bytes(word))
            }
        }
    }

    fn take_u32(&mut self, kind: FieldKind) -> u32 {
        let raw = self.take(kind);
        u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]])
    }

    /// PCWSTR field
    pub fn wide_string(&mut self) -> Address {
        self.take_address(FieldKind::WideString)
    }

    /// Array pointer field
    pub fn pointer(&mut self) -> Address {
        self.take_address(FieldKind::Pointer)
    }

    pub fn u32(&mut self) -> u32 {
        self.take_u32(FieldKind::U32)
    }

    /// Raw enumeration value
    pub fn enumeration(&mut self) -> u32 {
        self.take_u32(FieldKind::Enum)
    }

    /// Win32 BOOL: any nonzero value is true
    pub fn bool(&mut self) -> bool {
        self.take_u32(FieldKind::Bool) != 0
    }

    pub fn system_time(&mut self) -> SystemTime {
        let mut raw = [0u8; SYSTEMTIME_SIZE];
        raw.copy_from_slice(self.take(FieldKind::SystemTime));
        SystemTime::from_le_bytes(raw)
    }
}

/// Writes the fields of one record, in order, into a zeroed buffer
#[derive(Debug)]
pub struct FieldWriter<'a> {
    layout: &'a RecordLayout,
    width: PointerWidth,
    bytes: Vec<u8>,
    next: usize,
}

impl<'a> FieldWriter<'a> {
    pub fn new(layout: &'a RecordLayout, width: PointerWidth) -> Self {
        Self {
            layout,
            width,
            bytes: vec![0u8; layout.size()],
            next: 0,
        }
    }

    fn put(&mut self, kind: FieldKind, data: &[u8]) {
        let field: FieldOffset = self.layout.fields()[self.next];
        debug_assert_eq!(
            field.kind, kind,
            "{}.{} written out of order",
            self.layout.name(),
            field.name
        );
        self.next += 1;
        self.bytes[field.offset..field.offset + data.len()].copy_from_slice(data);
    }

    fn put_address(&mut self, kind: FieldKind, address: Address) -> Result<()> {
        match self.width {
            PointerWidth::Bits32 => {
                let narrow = u32::try_from(address.0).map_err(|_| Error::PointerTruncation {
                    address: address.0,
                    bits: 32,
                })?;
                self.put(kind, &narrow.to_le_bytes());
            }
            PointerWidth::Bits64 => self.put(kind, &address.0.to_le_bytes()),
        }
        Ok(())
    }

    pub fn wide_string(&mut self, address: Address) -> Result<()> {
        self.put_address(FieldKind::WideString, address)
    }

    pub fn pointer(&mut self, address: Address) -> Result<()> {
        self.put_address(FieldKind::Pointer, address)
    }

    pub fn u32(&mut self, value: u32) {
        self.put(FieldKind::U32, &value.to_le_bytes());
    }

    pub fn enumeration(&mut self, value: u32) {
        self.put(FieldKind::Enum, &value.to_le_bytes());
    }

    pub fn bool(&mut self, value: bool) {
        self.put(FieldKind::Bool, &u32::from(value).to_le_bytes());
    }

    pub fn system_time(&mut self, value: &SystemTime) {
        self.put(FieldKind::SystemTime, &value.to_le_bytes());
    }

    pub fn finish(self) -> Vec<u8> {
        debug_assert_eq!(
            self.next,
            self.layout.fields().len(),
            "{} left fields unwritten",
            self.layout.name()
        );
        self.bytes
    }
}
