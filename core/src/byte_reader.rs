use std::io::{self, Read};

use log::debug;

use crate::{
    chunk_types::ChunkType,
    errors::{PngPhysError, PngPhysErrorCode},
};

/// The PNG signature is skipped, never checked.
pub const PNG_SIGNATURE_LENGTH: u64 = 8;
/// Every chunk ends with a 4 byte CRC over its type and data.
pub const CRC_LENGTH: u64 = 4;

/// Length and type of a chunk. Length counts the data bytes only,
/// not the type tag or the trailing CRC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkHeader {
    pub length: u32,
    pub chunk_type: ChunkType,
}

/// Reads fixed size structures from a stream, front to back.
///
/// Any `Read` works: files, `&[u8]`, sockets. Skipping reads forward into a
/// sink instead of seeking, so a length pointing past the end of the stream
/// is caught at the skip rather than at the next read.
pub struct ByteReader<R> {
    inner: R,
    /// Bytes consumed so far, including those of a failed read.
    current_byte_pos: usize,
}

impl<R: Read> ByteReader<R> {
    pub fn new(inner: R) -> ByteReader<R> {
        ByteReader {
            inner,
            current_byte_pos: 0,
        }
    }

    /// Reads exactly `N` bytes. A short read (end of stream or an I/O error)
    /// fails with `code` and is never retried.
    fn read_next_n_bytes<const N: usize>(
        &mut self,
        code: PngPhysErrorCode,
    ) -> Result<[u8; N], PngPhysError> {
        let mut buffer: Vec<u8> = Vec::with_capacity(N);
        let outcome = (&mut self.inner)
            .take(N as u64)
            .read_to_end(&mut buffer);
        self.current_byte_pos += buffer.len();

        if let Err(reason) = &outcome {
            debug!(
                "read of {} bytes failed after {}: {}",
                N,
                buffer.len(),
                reason
            );
        }

        match <[u8; N]>::try_from(buffer.as_slice()) {
            Ok(bytes) if outcome.is_ok() => Ok(bytes),
            _ => Err(self.create_error(code)),
        }
    }

    /// Consumes `n` bytes without looking at them.
    fn skip_next_n_bytes(&mut self, n: u64, code: PngPhysErrorCode) -> Result<(), PngPhysError> {
        let outcome = io::copy(&mut (&mut self.inner).take(n), &mut io::sink());
        match outcome {
            Ok(skipped) => {
                self.current_byte_pos += skipped as usize;
                if skipped == n {
                    Ok(())
                } else {
                    Err(self.create_error(code))
                }
            }
            Err(reason) => {
                debug!("skipping {} bytes failed: {}", n, reason);
                Err(self.create_error(code))
            }
        }
    }

    fn create_error(&self, code: PngPhysErrorCode) -> PngPhysError {
        PngPhysError::new(code, self.current_byte_pos)
    }

    pub fn skip_png_signature(&mut self) -> Result<(), PngPhysError> {
        self.skip_next_n_bytes(
            PNG_SIGNATURE_LENGTH,
            PngPhysErrorCode::PrematureEndOfPngHeader,
        )
    }

    /// Big endian, most significant byte first.
    pub fn read_uint32(&mut self) -> Result<u32, PngPhysError> {
        let bytes = self.read_next_n_bytes::<4>(PngPhysErrorCode::PrematureEndOfUint32)?;
        Ok(u32::from_be_bytes(bytes))
    }

    pub fn read_units_byte(&mut self) -> Result<u8, PngPhysError> {
        let [units] = self.read_next_n_bytes::<1>(PngPhysErrorCode::PrematureEndOfUnitsByte)?;
        Ok(units)
    }

    pub fn read_chunk_header(&mut self) -> Result<ChunkHeader, PngPhysError> {
        let bytes = self.read_next_n_bytes::<8>(PngPhysErrorCode::PrematureEndOfChunkHeader)?;
        let [l0, l1, l2, l3, t0, t1, t2, t3] = bytes;
        Ok(ChunkHeader {
            length: u32::from_be_bytes([l0, l1, l2, l3]),
            chunk_type: [t0, t1, t2, t3],
        })
    }

    /// Skips the data of a chunk whose header has just been read, plus its CRC.
    /// The CRC is not validated.
    pub fn skip_chunk_data_and_crc(&mut self, length: u32) -> Result<(), PngPhysError> {
        self.skip_next_n_bytes(
            u64::from(length) + CRC_LENGTH,
            PngPhysErrorCode::PrematureEndOfChunkData,
        )
    }

    pub fn get_current_byte_pos(&self) -> usize {
        self.current_byte_pos
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}
