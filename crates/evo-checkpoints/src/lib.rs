pub mod checkpoints;
pub mod config;
pub mod error;
pub mod hash;
pub mod loader;
pub mod network;
pub mod shared;

pub use checkpoints::{BlockCheck, Checkpoints};
pub use config::{
    default_checkpoint_config, hashfile_path, CheckpointConfig, CHECKPOINT_HASHFILE_NAME,
};
pub use error::{CheckpointError, ErrorCode};
pub use hash::{hash_to_hex, parse_hash_hex, Hash, HASH_BYTES};
pub use loader::{
    encode_hashfile, fetch_new_checkpoints, init_checkpoints, load_checkpoints_from_json,
    load_checkpoints_from_source, load_new_checkpoints, read_hashfile, CheckpointSource,
    NoDnsCheckpoints,
};
pub use network::Network;
pub use shared::SharedCheckpoints;

#[cfg(test)]
mod tests;
