use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadtreeError {
    /// The handle's generation no longer matches the slot: the rectangle was
    /// released (or released and re-acquired) since the handle was issued.
    StaleRectHandle {
        index: u32,
        expected: u64,
        found: u64,
    },
    RectHandleOutOfRange {
        index: u32,
        len: usize,
    },
}

pub type QuadtreeResult<T> = Result<T, QuadtreeError>;

impl fmt::Display for QuadtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuadtreeError::StaleRectHandle {
                index,
                expected,
                found,
            } => {
                write!(
                    f,
                    "stale rectangle handle for pool slot {} (handle generation: {}, slot generation: {})",
                    index, expected, found
                )
            }
            QuadtreeError::RectHandleOutOfRange { index, len } => {
                write!(
                    f,
                    "rectangle handle slot {} is out of range for a pool of {} slots",
                    index, len
                )
            }
        }
    }
}

impl std::error::Error for QuadtreeError {}
