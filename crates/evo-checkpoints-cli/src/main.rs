use std::path::PathBuf;

use evo_checkpoints::{
    default_checkpoint_config, fetch_new_checkpoints, init_checkpoints, parse_hash_hex,
    CheckpointConfig, CheckpointError, CheckpointSource, Checkpoints, Network, NoDnsCheckpoints,
};
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

#[derive(Deserialize)]
struct Request {
    op: String,

    #[serde(default = "default_network")]
    network: String,

    #[serde(default)]
    hashfile: String,

    #[serde(default)]
    enable_dns: bool,

    #[serde(default)]
    height: u64,

    #[serde(default)]
    hash: String,

    #[serde(default)]
    chain_height: u64,

    #[serde(default)]
    block_height: u64,
}

fn default_network() -> String {
    Network::Mainnet.as_str().to_string()
}

#[derive(Debug, Serialize)]
struct PointOut {
    height: u64,
    hash: String,
}

#[derive(Debug, Default, Serialize)]
struct Response {
    ok: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    err: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    points: Option<Vec<PointOut>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    max_height: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    passed: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    is_checkpoint: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    in_zone: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    allowed: Option<bool>,
}

impl Response {
    fn fail(err: impl Into<String>) -> Self {
        Self {
            ok: false,
            err: Some(err.into()),
            ..Default::default()
        }
    }

    fn from_error(e: CheckpointError) -> Self {
        tracing::debug!(error = %e, "request failed");
        Self::fail(e.code.as_str())
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn config_for(req: &Request) -> Result<CheckpointConfig, CheckpointError> {
    let network: Network = req.network.parse()?;
    let mut cfg = default_checkpoint_config(network);
    if !req.hashfile.is_empty() {
        cfg.hashfile_path = Some(PathBuf::from(&req.hashfile));
    }
    cfg.enable_dns = req.enable_dns;
    Ok(cfg)
}

fn handle(req: Request, dns: &dyn CheckpointSource) -> Result<Response, CheckpointError> {
    let cfg = config_for(&req)?;

    if req.op == "check_conflicts" {
        // Each configured source is compared against the built-in table on its
        // own, so one source cannot hide another's entries. Nothing is merged.
        let builtin = Checkpoints::for_network(cfg.network)?;
        for (source, pairs) in fetch_new_checkpoints(&cfg, dns)? {
            let mut loaded = Checkpoints::new();
            loaded.load_ordered_hex(pairs)?;
            builtin.check_for_conflicts(&loaded).map_err(|e| {
                CheckpointError::new(e.code, format!("{source}: {}", e.msg))
            })?;
        }
        return Ok(Response {
            ok: true,
            ..Default::default()
        });
    }

    let checkpoints = init_checkpoints(&cfg, dns)?;

    let resp = match req.op.as_str() {
        "points" => Response {
            ok: true,
            points: Some(
                checkpoints
                    .get_points()
                    .iter()
                    .map(|(height, hash)| PointOut {
                        height: *height,
                        hash: hex::encode(hash),
                    })
                    .collect(),
            ),
            ..Default::default()
        },
        "max_height" => Response {
            ok: true,
            max_height: Some(checkpoints.get_max_height()?),
            ..Default::default()
        },
        "check_block" => {
            let hash = parse_hash_hex(&req.hash)?;
            let check = checkpoints.check_block(req.height, &hash);
            Response {
                ok: true,
                passed: Some(check.passed),
                is_checkpoint: Some(check.is_checkpoint),
                ..Default::default()
            }
        }
        "in_zone" => Response {
            ok: true,
            in_zone: Some(checkpoints.is_in_checkpoint_zone(req.height)),
            ..Default::default()
        },
        "alt_block_allowed" => Response {
            ok: true,
            allowed: Some(
                checkpoints.is_alternative_block_allowed(req.chain_height, req.block_height),
            ),
            ..Default::default()
        },
        _ => Response::fail("unknown op"),
    };
    Ok(resp)
}

fn main() {
    init_logging();

    let resp = match serde_json::from_reader::<_, Request>(std::io::stdin()) {
        Ok(req) => handle(req, &NoDnsCheckpoints).unwrap_or_else(Response::from_error),
        Err(e) => Response::fail(format!("bad request: {e}")),
    };
    let _ = serde_json::to_writer(std::io::stdout(), &resp);
}
