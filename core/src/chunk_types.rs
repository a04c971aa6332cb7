/// 4 byte ASCII chunk tag, compared byte for byte (case matters).
pub type ChunkType = [u8; 4];

#[derive(Debug, Clone)]
pub struct ChunkTypes();

#[allow(non_upper_case_globals)]
impl ChunkTypes {
    pub const IHDR: ChunkType = *b"IHDR";
    pub const IDAT: ChunkType = *b"IDAT";
    pub const pHYs: ChunkType = *b"pHYs";
}

/// Printable form of a chunk tag for log output. Non-ASCII bytes are escaped.
pub fn chunk_type_to_string(chunk_type: &ChunkType) -> String {
    chunk_type
        .iter()
        .flat_map(|b| std::ascii::escape_default(*b))
        .map(char::from)
        .collect()
}
