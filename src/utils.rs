/// Render digest bytes as lowercase hex: two characters per byte, no prefix or separators.
pub fn encode_digest(bytes: &[u8]) -> String {
    hex::encode(bytes)
}
