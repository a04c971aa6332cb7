use std::{
    fmt,
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

use log::{debug, trace, warn};
use wasm_bindgen::prelude::wasm_bindgen;

use crate::{
    byte_reader::{ByteReader, ChunkHeader},
    chunk_helpers::{self, PhysUnit, DEFAULT_PIXELS_PER_METER},
    chunk_types::{self, ChunkTypes},
    errors::{PngPhysError, PngPhysErrorCode},
};

/// Data length of a well formed pHYs chunk.
pub const PHYS_CHUNK_LENGTH: u32 = 9;

/// http://www.libpng.org/pub/png/spec/1.2/PNG-Chunks.html#C.pHYs
///
/// Pixels per unit, X axis: 4 bytes (unsigned integer)
///
/// Pixels per unit, Y axis: 4 bytes (unsigned integer)
///
/// Unit specifier:          1 byte
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PhysicalPixelDimensions {
    pub x_pixels_per_unit: u32,
    pub y_pixels_per_unit: u32,
    /// 0: unknown, 1: metre. Kept verbatim, see [PhysicalPixelDimensions::unit].
    pub units: u8,
}

#[wasm_bindgen]
impl PhysicalPixelDimensions {
    #[wasm_bindgen(constructor)]
    pub fn new(x_pixels_per_unit: u32, y_pixels_per_unit: u32, units: u8) -> Self {
        PhysicalPixelDimensions {
            x_pixels_per_unit,
            y_pixels_per_unit,
            units,
        }
    }

    /// True for the record returned when the image has no pHYs chunk.
    #[wasm_bindgen(js_name = isDefault)]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Pixel aspect ratio, x over y.
    #[wasm_bindgen(js_name = aspectRatio)]
    pub fn aspect_ratio(&self) -> f64 {
        if self.y_pixels_per_unit == 0 {
            return 1.0;
        }
        self.x_pixels_per_unit as f64 / self.y_pixels_per_unit as f64
    }
}

impl PhysicalPixelDimensions {
    /// `None` if the unit byte is neither 0 nor 1.
    pub fn unit(&self) -> Option<PhysUnit> {
        PhysUnit::try_from(self.units).ok()
    }

    /// `(x, y)` dots per inch. Only defined when the unit is the metre.
    pub fn dots_per_inch(&self) -> Option<(f64, f64)> {
        match self.unit() {
            Some(PhysUnit::Meter) => Some((
                chunk_helpers::pixels_per_meter_to_dpi(self.x_pixels_per_unit),
                chunk_helpers::pixels_per_meter_to_dpi(self.y_pixels_per_unit),
            )),
            _ => None,
        }
    }
}

/// About 300 DPI, in metres.
impl Default for PhysicalPixelDimensions {
    fn default() -> Self {
        PhysicalPixelDimensions {
            x_pixels_per_unit: DEFAULT_PIXELS_PER_METER,
            y_pixels_per_unit: DEFAULT_PIXELS_PER_METER,
            units: PhysUnit::Meter as u8,
        }
    }
}

impl fmt::Display for PhysicalPixelDimensions {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            fmt,
            "{} {} {}",
            self.x_pixels_per_unit, self.y_pixels_per_unit, self.units
        )
    }
}

/// Walks the chunks of a PNG stream until it finds pHYs or the first IDAT.
///
/// Only the pHYs payload is ever interpreted. Every other chunk is skipped by
/// its declared length, which is trusted: a corrupt length shows up as a
/// premature end of file on the next read or skip.
pub struct PhysReader<R> {
    /// Takes care of reading the raw bytes, so the scanner only decides
    /// what to do with each chunk.
    byte_reader: ByteReader<R>,
}

impl<R: Read> PhysReader<R> {
    /// `reader` must be positioned at the first byte of the PNG signature.
    pub fn new(reader: R) -> PhysReader<R> {
        PhysReader {
            byte_reader: ByteReader::new(reader),
        }
    }

    /// Reads the 9 byte payload of a pHYs chunk whose header was just read.
    /// Neither the rest of the chunk nor its CRC is consumed.
    fn decode_phys_chunk(
        &mut self,
        header: &ChunkHeader,
    ) -> Result<PhysicalPixelDimensions, PngPhysError> {
        if header.length != PHYS_CHUNK_LENGTH {
            warn!(
                "pHYs chunk declares a length of {} instead of {}. Reading the first {} bytes anyway.",
                header.length, PHYS_CHUNK_LENGTH, PHYS_CHUNK_LENGTH
            );
        }
        let x_pixels_per_unit = self.byte_reader.read_uint32()?;
        let y_pixels_per_unit = self.byte_reader.read_uint32()?;
        let units = self.byte_reader.read_units_byte()?;

        Ok(PhysicalPixelDimensions {
            x_pixels_per_unit,
            y_pixels_per_unit,
            units,
        })
    }

    pub fn run(&mut self) -> Result<PhysicalPixelDimensions, PngPhysError> {
        self.byte_reader.skip_png_signature()?;

        loop {
            let header = self.byte_reader.read_chunk_header()?;
            trace!(
                "chunk {} with {} bytes of data at byte {}",
                chunk_types::chunk_type_to_string(&header.chunk_type),
                header.length,
                self.byte_reader.get_current_byte_pos() - 8
            );

            match header.chunk_type {
                // pHYs must come before the first IDAT. A later one is not conformant.
                ChunkTypes::IDAT => break,
                ChunkTypes::pHYs => {
                    let phys = self.decode_phys_chunk(&header)?;
                    debug!("found pHYs: {}", phys);
                    return Ok(phys);
                }
                _ => self.byte_reader.skip_chunk_data_and_crc(header.length)?,
            }
        }

        let phys = PhysicalPixelDimensions::default();
        debug!("reached IDAT without a pHYs chunk, using {}", phys);
        Ok(phys)
    }

    /// Bytes taken from the underlying reader so far.
    pub fn bytes_consumed(&self) -> usize {
        self.byte_reader.get_current_byte_pos()
    }

    pub fn into_inner(self) -> R {
        self.byte_reader.into_inner()
    }
}

/// Reads the pHYs chunk from a stream positioned at the start of a PNG file.
///
/// The stream is left open. On success it is positioned right after the
/// pHYs unit byte, or right after the first IDAT chunk header when no pHYs
/// chunk was found. On failure it is wherever the failing read stopped.
pub fn read_png_phys<R: Read + ?Sized>(
    reader: &mut R,
) -> Result<PhysicalPixelDimensions, PngPhysError> {
    PhysReader::new(reader).run()
}

/// Opens `file_path`, reads its pHYs chunk and closes the file again,
/// whether the read succeeded or not.
pub fn read_png_phys_from_path<P: AsRef<Path>>(
    file_path: P,
) -> Result<PhysicalPixelDimensions, PngPhysError> {
    let path = file_path.as_ref();
    let file = File::open(path).map_err(|why| {
        PngPhysError::new(
            PngPhysErrorCode::CannotOpenFile(format!("{}: {}", path.display(), why)),
            0,
        )
    })?;

    // the file is dropped, and closed, when this returns
    read_png_phys(&mut BufReader::new(file))
}

/// Reads the pHYs chunk from an in-memory PNG.
pub fn read_png_phys_from_bytes(bytes: &[u8]) -> Result<PhysicalPixelDimensions, PngPhysError> {
    let mut cursor = bytes;
    read_png_phys(&mut cursor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk_helpers::PNG_HEADER;

    fn chunk(chunk_type: &[u8; 4], data: &[u8]) -> Vec<u8> {
        let mut bytes = (data.len() as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(chunk_type);
        bytes.extend_from_slice(data);
        bytes.extend_from_slice(&[0xDE, 0xAD, 0xBE, 0xEF]);
        bytes
    }

    fn png(chunks: &[Vec<u8>]) -> Vec<u8> {
        let mut bytes = PNG_HEADER.to_vec();
        for c in chunks {
            bytes.extend_from_slice(c);
        }
        bytes
    }

    #[test]
    fn stops_right_after_units_byte() {
        let bytes = png(&[
            chunk(b"pHYs", &[0, 0, 0x0B, 0xB8, 0, 0, 0x0B, 0xB8, 1]),
            chunk(b"IDAT", &[1, 2, 3]),
        ]);
        let mut reader = PhysReader::new(bytes.as_slice());
        let phys = reader.run().unwrap();
        assert_eq!(phys, PhysicalPixelDimensions::new(3000, 3000, 1));
        assert_eq!(reader.bytes_consumed(), 8 + 8 + 9);
        // the CRC of pHYs is next
        assert_eq!(&reader.into_inner()[..4], &[0xDE, 0xAD, 0xBE, 0xEF]);
    }

    #[test]
    fn stops_right_after_idat_header() {
        let bytes = png(&[
            chunk(b"IHDR", &[0; 13]),
            chunk(b"IDAT", &[9, 9]),
        ]);
        let mut reader = PhysReader::new(bytes.as_slice());
        assert!(reader.run().unwrap().is_default());
        assert_eq!(reader.bytes_consumed(), 8 + 25 + 8);
        assert_eq!(&reader.into_inner()[..2], &[9, 9]);
    }

    #[test]
    fn short_phys_chunk_still_reads_nine_bytes() {
        // the declared length is not trusted for pHYs itself, the CRC is read as data
        let mut short = chunk(b"pHYs", &[0, 0, 0, 1, 0, 0, 0, 2]);
        short.extend_from_slice(&chunk(b"IDAT", &[]));
        let bytes = png(&[short]);
        assert_eq!(
            read_png_phys_from_bytes(&bytes),
            Ok(PhysicalPixelDimensions::new(1, 2, 0xDE))
        );
    }

    #[test]
    fn missing_idat_and_phys_ends_in_error() {
        let bytes = png(&[chunk(b"IHDR", &[0; 13]), chunk(b"IEND", &[])]);
        let err = read_png_phys_from_bytes(&bytes).unwrap_err();
        assert_eq!(err.code, PngPhysErrorCode::PrematureEndOfChunkHeader);
        assert_eq!(err.approx_byte_location(), bytes.len());
    }

    #[test]
    fn unit_and_dpi_views() {
        let phys = PhysicalPixelDimensions::default();
        assert_eq!(phys.unit(), Some(PhysUnit::Meter));
        let (x, y) = phys.dots_per_inch().unwrap();
        assert!((x - 300.0).abs() < 0.01 && (y - 300.0).abs() < 0.01);

        let aspect_only = PhysicalPixelDimensions::new(2, 1, 0);
        assert_eq!(aspect_only.unit(), Some(PhysUnit::Unspecified));
        assert_eq!(aspect_only.dots_per_inch(), None);
        assert_eq!(aspect_only.aspect_ratio(), 2.0);

        let odd_unit = PhysicalPixelDimensions::new(1, 0, 5);
        assert_eq!(odd_unit.unit(), None);
        assert_eq!(odd_unit.dots_per_inch(), None);
        assert_eq!(odd_unit.aspect_ratio(), 1.0);
    }

    #[test]
    fn display_matches_log_line() {
        assert_eq!(
            PhysicalPixelDimensions::default().to_string(),
            "11811 11811 1"
        );
    }
}
