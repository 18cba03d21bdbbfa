use std::fmt;

use thiserror::Error;

/// Canvas axis named in a capacity error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Invalid sheet dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Sheet {axis} {computed} exceeds the configured maximum of {limit}")]
    CapacityExceeded { axis: Axis, limit: u32, computed: u64 },
    #[error("Item #{index} has a zero-sized image ({width}x{height})")]
    DegenerateItem { index: usize, width: u32, height: u32 },
    #[error("Layout/compositor contract violated: {0}")]
    ContractViolation(String),
    #[error("Encoding error: {0}")]
    Encode(String),
}

pub type Result<T> = std::result::Result<T, SheetError>;
