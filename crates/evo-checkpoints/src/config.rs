use std::path::PathBuf;

use serde::Deserialize;

use crate::network::Network;

pub const CHECKPOINT_HASHFILE_NAME: &str = "checkpoints.json";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    pub network: Network,
    /// Optional JSON hashfile layered on top of the built-in table.
    pub hashfile_path: Option<PathBuf>,
    pub enable_dns: bool,
    /// Leave the built-in table out, for chains spun up by integration tests.
    pub integration_test_hooks: bool,
}

pub fn default_checkpoint_config(network: Network) -> CheckpointConfig {
    CheckpointConfig {
        network,
        hashfile_path: None,
        enable_dns: false,
        integration_test_hooks: false,
    }
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        default_checkpoint_config(Network::default())
    }
}

pub fn hashfile_path<P: AsRef<std::path::Path>>(data_dir: P) -> PathBuf {
    data_dir.as_ref().join(CHECKPOINT_HASHFILE_NAME)
}
