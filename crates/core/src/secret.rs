//! Secret masking for logs and metadata.

/// Mask a secret to its first `reveal_len` characters plus an ellipsis.
///
/// The count is in characters, not bytes, so multi-byte input cannot split a
/// UTF-8 boundary. Masking is irreversible; the result is safe to persist.
pub fn mask_secret(secret: &str, reveal_len: usize) -> String {
    let prefix: String = secret.chars().take(reveal_len).collect();
    format!("{prefix}...")
}
