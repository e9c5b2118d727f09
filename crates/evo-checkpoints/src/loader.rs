use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::checkpoints::{Checkpoints, LOG_TARGET};
use crate::config::CheckpointConfig;
use crate::error::{CheckpointError, ErrorCode};
use crate::network::Network;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HashLine {
    height: u64,
    hash: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct HashFile {
    hashlines: Vec<HashLine>,
}

/// Out-of-band checkpoint feed (DNS records and the like).
pub trait CheckpointSource {
    fn name(&self) -> &str;
    fn fetch(&self, network: Network) -> Result<Vec<(u64, String)>, CheckpointError>;
}

/// DNS checkpoint distribution is not wired up; it never reports anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDnsCheckpoints;

impl CheckpointSource for NoDnsCheckpoints {
    fn name(&self) -> &str {
        "dns"
    }

    fn fetch(&self, _network: Network) -> Result<Vec<(u64, String)>, CheckpointError> {
        Ok(Vec::new())
    }
}

/// Reads `(height, hex hash)` pairs from a JSON hashfile.
/// `Ok(None)` when the file does not exist.
pub fn read_hashfile<P: AsRef<Path>>(
    path: P,
) -> Result<Option<Vec<(u64, String)>>, CheckpointError> {
    let path = path.as_ref();
    let raw = match fs::read(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(
                target: LOG_TARGET,
                path = %path.display(),
                "blockchain checkpoints file not found"
            );
            return Ok(None);
        }
        Err(e) => {
            return Err(CheckpointError::new(
                ErrorCode::SourceRead,
                format!("read hashfile {}: {e}", path.display()),
            ))
        }
    };
    let file: HashFile = serde_json::from_slice(&raw).map_err(|e| {
        CheckpointError::new(
            ErrorCode::SourceParse,
            format!("parse hashfile {}: {e}", path.display()),
        )
    })?;
    Ok(Some(
        file.hashlines
            .into_iter()
            .map(|line| (line.height, line.hash))
            .collect(),
    ))
}

/// Serializes pairs in hashfile layout, e.g. for operators exporting a table.
pub fn encode_hashfile(checkpoints: &Checkpoints) -> Result<Vec<u8>, CheckpointError> {
    let file = HashFile {
        hashlines: checkpoints
            .get_points()
            .iter()
            .map(|(height, hash)| HashLine {
                height: *height,
                hash: hex::encode(hash),
            })
            .collect(),
    };
    let mut raw = serde_json::to_vec_pretty(&file).map_err(|e| {
        CheckpointError::new(ErrorCode::Encode, format!("encode hashfile: {e}"))
    })?;
    raw.push(b'\n');
    Ok(raw)
}

pub fn load_checkpoints_from_json<P: AsRef<Path>>(
    checkpoints: &mut Checkpoints,
    path: P,
) -> Result<(), CheckpointError> {
    let Some(pairs) = read_hashfile(path)? else {
        return Ok(());
    };
    apply_pairs(checkpoints, "hashfile", pairs)
}

pub fn load_checkpoints_from_source(
    checkpoints: &mut Checkpoints,
    source: &dyn CheckpointSource,
    network: Network,
) -> Result<(), CheckpointError> {
    let pairs = source.fetch(network)?;
    apply_pairs(checkpoints, source.name(), pairs)
}

pub(crate) fn apply_pairs(
    checkpoints: &mut Checkpoints,
    source: &str,
    pairs: Vec<(u64, String)>,
) -> Result<(), CheckpointError> {
    if pairs.is_empty() {
        return Ok(());
    }
    tracing::debug!(
        target: LOG_TARGET,
        source,
        count = pairs.len(),
        prior_max_height = ?checkpoints.get_max_height().ok(),
        "adding checkpoints"
    );
    checkpoints.load_ordered_hex(pairs)
}

/// Everything the configured external sources report, hashfile first.
pub fn fetch_new_checkpoints(
    cfg: &CheckpointConfig,
    dns: &dyn CheckpointSource,
) -> Result<Vec<(&'static str, Vec<(u64, String)>)>, CheckpointError> {
    let mut batches = Vec::new();
    if let Some(path) = cfg.hashfile_path.as_ref() {
        if let Some(pairs) = read_hashfile(path)? {
            batches.push(("hashfile", pairs));
        }
    }
    if cfg.enable_dns {
        batches.push(("dns", dns.fetch(cfg.network)?));
    }
    Ok(batches)
}

pub fn load_new_checkpoints(
    checkpoints: &mut Checkpoints,
    cfg: &CheckpointConfig,
    dns: &dyn CheckpointSource,
) -> Result<(), CheckpointError> {
    for (source, pairs) in fetch_new_checkpoints(cfg, dns)? {
        apply_pairs(checkpoints, source, pairs)?;
    }
    Ok(())
}

/// Built-in table for the configured network, then any external sources.
pub fn init_checkpoints(
    cfg: &CheckpointConfig,
    dns: &dyn CheckpointSource,
) -> Result<Checkpoints, CheckpointError> {
    let mut checkpoints = if cfg.integration_test_hooks {
        Checkpoints::new()
    } else {
        Checkpoints::for_network(cfg.network)?
    };
    load_new_checkpoints(&mut checkpoints, cfg, dns)?;
    Ok(checkpoints)
}
