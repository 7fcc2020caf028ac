use std::fmt;

/// Error kinds the maze core can surface.
///
/// The solver itself never returns one of these: absence of a solution is
/// encoded as an empty [`crate::path::Path`], per the solver's error policy.
/// Only parsing can fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// The parser encountered an illegal character or a malformed header.
    InputInvalid { reason: String },
    /// The stream ended before `height` rows were read.
    InputTruncated,
    /// `width` or `height` exceeds 254 or is zero.
    SizeOutOfRange { width: u32, height: u32 },
    /// A caller expected a non-empty path but the solver found none.
    NoPath,
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MazeError::InputInvalid { reason } => write!(f, "invalid maze input: {reason}"),
            MazeError::InputTruncated => write!(f, "maze input ended before all rows were read"),
            MazeError::SizeOutOfRange { width, height } => {
                write!(f, "maze size {width}x{height} is out of range (1..=254)")
            }
            MazeError::NoPath => write!(f, "no path between start and end"),
        }
    }
}

impl std::error::Error for MazeError {}

impl From<MazeError> for std::io::Error {
    fn from(err: MazeError) -> Self {
        std::io::Error::other(err.to_string())
    }
}
