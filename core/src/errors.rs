//! Reading a pHYs chunk can only go wrong in two ways: the file cannot be
//! opened, or it ends before a structure the scanner expects.
//! Every failure is terminal for the whole parse.

use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PngPhysErrorCode {
    /// The file could not be opened for reading `(reason)`
    CannotOpenFile(String),
    /// Stream is shorter than the 8 byte PNG signature
    PrematureEndOfPngHeader,
    /// Stream ended inside the 8 byte length + type header of a chunk
    PrematureEndOfChunkHeader,
    /// Stream ended inside one of the pHYs density fields
    PrematureEndOfUint32,
    /// Stream ended right before the pHYs unit specifier
    PrematureEndOfUnitsByte,
    /// Stream ended before the declared chunk data and its CRC could be skipped
    PrematureEndOfChunkData,
}

impl PngPhysErrorCode {
    /// Static, human readable description of the failure.
    pub fn message(&self) -> &'static str {
        match self {
            PngPhysErrorCode::CannotOpenFile(_) => "Error opening file",
            PngPhysErrorCode::PrematureEndOfPngHeader => {
                "Premature end of file (expected PNG header)"
            }
            PngPhysErrorCode::PrematureEndOfChunkHeader => {
                "Premature end of file (expected a chunk header)"
            }
            PngPhysErrorCode::PrematureEndOfUint32 => "Premature end of file (expected a uint32_t)",
            PngPhysErrorCode::PrematureEndOfUnitsByte => {
                "Premature end of file (expected the pHYs units byte)"
            }
            PngPhysErrorCode::PrematureEndOfChunkData => {
                "Premature end of file (expected complete chunk data and CRC)"
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PngPhysError {
    pub code: PngPhysErrorCode,
    /// Number of bytes consumed from the stream when the error was raised.
    /// A failed read may have consumed part of the structure it was after,
    /// so this points somewhere inside that structure rather than at its start.
    approx_byte_location: usize,
}

impl PngPhysError {
    pub fn new(code: PngPhysErrorCode, approx_byte_location: usize) -> Self {
        Self {
            code,
            approx_byte_location,
        }
    }

    /// The string handed across to callers that only log the failure.
    pub fn message(&self) -> &'static str {
        self.code.message()
    }

    pub fn approx_byte_location(&self) -> usize {
        self.approx_byte_location
    }

    /// `true` for every failure except a file that could not be opened.
    pub fn is_premature_end(&self) -> bool {
        !matches!(self.code, PngPhysErrorCode::CannotOpenFile(_))
    }
}

impl Error for PngPhysError {}

impl fmt::Display for PngPhysError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            PngPhysErrorCode::CannotOpenFile(reason) => {
                write!(fmt, "{}: {}", self.message(), reason)
            }
            _ => write!(
                fmt,
                "{} [Approx. byte location of error]: {}",
                self.message(),
                self.approx_byte_location
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_failure_is_not_a_premature_end() {
        let err = PngPhysError::new(
            PngPhysErrorCode::CannotOpenFile("no such file".to_string()),
            0,
        );
        assert!(!err.is_premature_end());
        assert_eq!(err.message(), "Error opening file");
        assert_eq!(err.to_string(), "Error opening file: no such file");
    }

    #[test]
    fn premature_end_keeps_location() {
        let err = PngPhysError::new(PngPhysErrorCode::PrematureEndOfUint32, 37);
        assert!(err.is_premature_end());
        assert_eq!(err.approx_byte_location(), 37);
        assert_eq!(
            err.to_string(),
            "Premature end of file (expected a uint32_t) [Approx. byte location of error]: 37"
        );
    }
}
