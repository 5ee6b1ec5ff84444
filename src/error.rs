// src/error.rs

use thiserror::Error;

/// Core error types for dismpkg
#[derive(Error, Debug)]
pub enum Error {
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A read fell outside the memory that backs the view
    #[error("Read of {len} bytes at {address:#x} is outside mapped memory")]
    OutOfBounds { address: u64, len: usize },

    /// A required address was null
    #[error("Null address for {0}")]
    NullAddress(&'static str),

    /// Element address computation overflowed the address space
    #[error("Address overflow computing element {index} from base {base:#x} (stride {stride})")]
    AddressOverflow { base: u64, index: usize, stride: usize },

    /// An enumeration field held a value with no defined constant
    #[error("Invalid {kind} value: {value}")]
    InvalidEnum { kind: &'static str, value: u32 },

    /// A wide string ran past the configured limit without a terminator
    #[error("Unterminated wide string at {address:#x} (limit {limit} code units)")]
    UnterminatedString { address: u64, limit: usize },

    /// An address too large for the image's pointer width
    #[error("Address {address:#x} does not fit in a {bits}-bit pointer")]
    PointerTruncation { address: u64, bits: u32 },

    /// An array too long for the native 32-bit element count
    #[error("Array of {0} elements does not fit a 32-bit count")]
    CountOverflow(usize),

    /// Pointer width other than 32 or 64 bits
    #[error("Invalid pointer width: {0:?} (expected 32 or 64)")]
    InvalidPointerWidth(String),
}

/// Result type alias using dismpkg's Error type
pub type Result<T> = std::result::Result<T, Error>;
