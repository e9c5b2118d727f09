use crate::error::{CheckpointError, ErrorCode};

pub const HASH_BYTES: usize = 32;

pub type Hash = [u8; HASH_BYTES];

/// Decodes a 64-character hex string (either case) into a block hash.
pub fn parse_hash_hex(value: &str) -> Result<Hash, CheckpointError> {
    if value.len() != HASH_BYTES * 2 {
        return Err(CheckpointError::new(
            ErrorCode::MalformedInput,
            format!(
                "hash: expected {} hex chars, got {}",
                HASH_BYTES * 2,
                value.len()
            ),
        ));
    }
    let bytes = hex::decode(value)
        .map_err(|e| CheckpointError::new(ErrorCode::MalformedInput, format!("hash: {e}")))?;
    let mut out = [0u8; HASH_BYTES];
    out.copy_from_slice(&bytes);
    Ok(out)
}

pub fn hash_to_hex(hash: &Hash) -> String {
    hex::encode(hash)
}
