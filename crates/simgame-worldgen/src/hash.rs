//! 32-bit FNV-1a hashing, used to turn seed text into a numeric seed.

/// FNV-1a 32-bit offset basis.
pub const FNV_OFFSET_BASIS: u32 = 0x811C_9DC5;

/// FNV-1a 32-bit prime.
pub const FNV_PRIME: u32 = 0x0100_0193;

/// Hash a byte slice with 32-bit FNV-1a.
pub const fn fnv1a(bytes: &[u8]) -> u32 {
    fnv1a_continue(FNV_OFFSET_BASIS, bytes)
}

/// Continue an FNV-1a hash from an intermediate state.
pub const fn fnv1a_continue(mut hash: u32, bytes: &[u8]) -> u32 {
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Hash a string's UTF-8 bytes with 32-bit FNV-1a.
pub fn fnv1a_str(text: &str) -> u32 {
    fnv1a(text.as_bytes())
}
