use rand::{thread_rng, RngCore};

/// Opaque bearer token: `bytes` of OS-seeded entropy as lowercase hex.
/// Session links use 32 bytes, refresh tokens 64.
pub fn generate_token_hex(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}
