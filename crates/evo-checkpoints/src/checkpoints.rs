use std::collections::BTreeMap;

use crate::error::{CheckpointError, ErrorCode};
use crate::hash::{hash_to_hex, parse_hash_hex, Hash};
use crate::network::Network;

pub(crate) const LOG_TARGET: &str = "checkpoints";

/// Outcome of comparing a block against the checkpoint table.
///
/// `passed == false` means the block contradicts a pinned hash; the caller
/// must reject the block and the chain carrying it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockCheck {
    pub passed: bool,
    pub is_checkpoint: bool,
}

/// Height → hash pins. Append-only: entries are never replaced or removed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Checkpoints {
    points: BTreeMap<u64, Hash>,
}

impl Checkpoints {
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    /// Builds a registry from a static `(height, hex hash)` table.
    pub fn from_table(table: &[(u64, &str)]) -> Result<Self, CheckpointError> {
        let mut cp = Self::new();
        for (height, hash_hex) in table {
            cp.add_hex(*height, hash_hex)?;
        }
        Ok(cp)
    }

    pub fn for_network(network: Network) -> Result<Self, CheckpointError> {
        Self::from_table(network.default_checkpoints())
    }

    pub fn add(&mut self, height: u64, hash: Hash) -> Result<(), CheckpointError> {
        if let Some(existing) = self.points.get(&height) {
            if *existing != hash {
                tracing::error!(
                    target: LOG_TARGET,
                    height,
                    existing = %hash_to_hex(existing),
                    offered = %hash_to_hex(&hash),
                    "checkpoint at given height already exists with a different hash"
                );
                return Err(CheckpointError::conflict(height, existing, &hash));
            }
            return Ok(());
        }
        self.points.insert(height, hash);
        Ok(())
    }

    pub fn add_hex(&mut self, height: u64, hash_hex: &str) -> Result<(), CheckpointError> {
        let hash = parse_hash_hex(hash_hex).map_err(|e| {
            CheckpointError::new(e.code, format!("checkpoint height {height}: {}", e.msg))
        })?;
        self.add(height, hash)
    }

    pub fn is_in_checkpoint_zone(&self, height: u64) -> bool {
        match self.points.last_key_value() {
            Some((max, _)) => height <= *max,
            None => false,
        }
    }

    pub fn check_block(&self, height: u64, hash: &Hash) -> BlockCheck {
        let Some(expected) = self.points.get(&height) else {
            return BlockCheck {
                passed: true,
                is_checkpoint: false,
            };
        };

        if expected == hash {
            tracing::info!(
                target: LOG_TARGET,
                height,
                hash = %hash_to_hex(hash),
                "checkpoint passed"
            );
            BlockCheck {
                passed: true,
                is_checkpoint: true,
            }
        } else {
            tracing::warn!(
                target: LOG_TARGET,
                height,
                expected = %hash_to_hex(expected),
                fetched = %hash_to_hex(hash),
                "checkpoint failed"
            );
            BlockCheck {
                passed: false,
                is_checkpoint: true,
            }
        }
    }

    pub fn check_block_hash(&self, height: u64, hash: &Hash) -> bool {
        self.check_block(height, hash).passed
    }

    pub fn get_max_height(&self) -> Result<u64, CheckpointError> {
        self.points
            .last_key_value()
            .map(|(height, _)| *height)
            .ok_or_else(|| {
                CheckpointError::new(ErrorCode::NoCheckpoints, "checkpoint table is empty")
            })
    }

    // The guard compares against the newest checkpoint at or below the current
    // tip. Whether a candidate exactly at that checkpoint should be refused is
    // kept as-is; see DESIGN.md.
    pub fn is_alternative_block_allowed(
        &self,
        current_chain_height: u64,
        candidate_block_height: u64,
    ) -> bool {
        if candidate_block_height == 0 {
            return false;
        }

        match self.points.range(..=current_chain_height).next_back() {
            None => true,
            Some((checkpoint_height, _)) => *checkpoint_height < candidate_block_height,
        }
    }

    pub fn get_points(&self) -> &BTreeMap<u64, Hash> {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Fails on the first height both tables pin to different hashes. Does not merge.
    pub fn check_for_conflicts(&self, other: &Checkpoints) -> Result<(), CheckpointError> {
        for (height, hash) in other.get_points() {
            if let Some(existing) = self.points.get(height) {
                if existing != hash {
                    tracing::error!(
                        target: LOG_TARGET,
                        height = *height,
                        existing = %hash_to_hex(existing),
                        offered = %hash_to_hex(hash),
                        "checkpoint sets disagree"
                    );
                    return Err(CheckpointError::conflict(*height, existing, hash));
                }
            }
        }
        Ok(())
    }

    /// Applies a batch of pins on top of the current table.
    ///
    /// Heights at or below the maximum recorded before the batch are skipped,
    /// even when the hash matches. The first failing entry aborts the batch:
    /// entries before it stay applied, entries after it are not looked at.
    pub fn load_ordered<I>(&mut self, pairs: I) -> Result<(), CheckpointError>
    where
        I: IntoIterator<Item = (u64, Hash)>,
    {
        let prev_max = self.points.last_key_value().map(|(height, _)| *height);
        for (height, hash) in pairs {
            if prev_max.is_some_and(|max| height <= max) {
                tracing::debug!(target: LOG_TARGET, height, "ignoring checkpoint height");
                continue;
            }
            tracing::debug!(
                target: LOG_TARGET,
                height,
                hash = %hash_to_hex(&hash),
                "adding checkpoint"
            );
            self.add(height, hash)?;
        }
        Ok(())
    }

    /// Like [`Checkpoints::load_ordered`], decoding each hash right before it
    /// is applied so a malformed entry aborts the batch at its position.
    pub fn load_ordered_hex<I, S>(&mut self, pairs: I) -> Result<(), CheckpointError>
    where
        I: IntoIterator<Item = (u64, S)>,
        S: AsRef<str>,
    {
        let prev_max = self.points.last_key_value().map(|(height, _)| *height);
        for (height, hash_hex) in pairs {
            if prev_max.is_some_and(|max| height <= max) {
                tracing::debug!(target: LOG_TARGET, height, "ignoring checkpoint height");
                continue;
            }
            tracing::debug!(
                target: LOG_TARGET,
                height,
                hash = hash_hex.as_ref(),
                "adding checkpoint"
            );
            self.add_hex(height, hash_hex.as_ref())?;
        }
        Ok(())
    }
}
