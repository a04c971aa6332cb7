use png_phys::{phys, PhysicalPixelDimensions};

use wasm_bindgen::prelude::*;

/// Reads the pHYs chunk of a PNG handed over as raw bytes.
/// Throws with the parser's error message on truncated input.
#[wasm_bindgen]
pub fn read_phys_from_raw_bytes(raw_bytes: Vec<u8>) -> Result<PhysicalPixelDimensions, JsError> {
    phys::read_png_phys_from_bytes(&raw_bytes).map_err(|e| JsError::new(e.message()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use png_phys::chunk_helpers::PNG_HEADER;

    #[test]
    fn reads_phys_from_raw_bytes() {
        let mut raw_bytes = PNG_HEADER.to_vec();
        raw_bytes.extend_from_slice(&[0, 0, 0, 9]);
        raw_bytes.extend_from_slice(b"pHYs");
        raw_bytes.extend_from_slice(&[0, 0, 0x0E, 0xC4, 0, 0, 0x0E, 0xC4, 1]);

        let phys = read_phys_from_raw_bytes(raw_bytes).ok().unwrap();
        assert_eq!(phys, PhysicalPixelDimensions::new(3780, 3780, 1));
    }
}
