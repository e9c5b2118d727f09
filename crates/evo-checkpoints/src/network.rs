use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CheckpointError, ErrorCode};

pub const MAINNET_CHECKPOINTS: &[(u64, &str)] = &[(
    0,
    "c106ebad646e2dc0f9ab96741b2c320d3435b43d6f6f9660b1f318f33a764ad2",
)];
pub const TESTNET_CHECKPOINTS: &[(u64, &str)] = &[];
pub const STAGENET_CHECKPOINTS: &[(u64, &str)] = &[];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Testnet,
    Stagenet,
    Fakechain,
    Undefined,
}

impl Network {
    pub fn as_str(self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Testnet => "testnet",
            Network::Stagenet => "stagenet",
            Network::Fakechain => "fakechain",
            Network::Undefined => "undefined",
        }
    }

    /// Compiled-in `(height, hex hash)` pins for this network.
    pub fn default_checkpoints(self) -> &'static [(u64, &'static str)] {
        match self {
            Network::Mainnet => MAINNET_CHECKPOINTS,
            Network::Testnet => TESTNET_CHECKPOINTS,
            Network::Stagenet => STAGENET_CHECKPOINTS,
            Network::Fakechain | Network::Undefined => &[],
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Network {
    type Err = CheckpointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mainnet" => Ok(Network::Mainnet),
            "testnet" => Ok(Network::Testnet),
            "stagenet" => Ok(Network::Stagenet),
            "fakechain" => Ok(Network::Fakechain),
            "undefined" => Ok(Network::Undefined),
            other => Err(CheckpointError::new(
                ErrorCode::MalformedInput,
                format!("unknown network: {other}"),
            )),
        }
    }
}
