//! Reads the physical pixel dimensions (pHYs chunk) of a PNG image
//! without decoding it. Only the chunks in front of the pHYs chunk, or of the
//! first IDAT chunk, are touched.

pub mod byte_reader;
pub mod chunk_helpers;
pub mod chunk_types;
pub mod errors;
pub mod phys;

pub use errors::{PngPhysError, PngPhysErrorCode};
pub use phys::{
    read_png_phys, read_png_phys_from_bytes, read_png_phys_from_path, PhysReader,
    PhysicalPixelDimensions,
};
