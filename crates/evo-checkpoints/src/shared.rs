use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::checkpoints::{BlockCheck, Checkpoints};
use crate::config::CheckpointConfig;
use crate::error::CheckpointError;
use crate::hash::Hash;
use crate::loader::{apply_pairs, fetch_new_checkpoints, CheckpointSource};

/// Registry handle shared between the validation path and loaders.
///
/// Every query takes the read lock and every write holds the write lock for
/// its whole batch, so readers never see a batch half-applied. Source I/O
/// happens before the lock is taken.
#[derive(Clone, Debug, Default)]
pub struct SharedCheckpoints {
    inner: Arc<RwLock<Checkpoints>>,
}

impl SharedCheckpoints {
    pub fn new(checkpoints: Checkpoints) -> Self {
        Self {
            inner: Arc::new(RwLock::new(checkpoints)),
        }
    }

    pub fn add(&self, height: u64, hash: Hash) -> Result<(), CheckpointError> {
        self.inner.write().add(height, hash)
    }

    pub fn load_ordered<I>(&self, pairs: I) -> Result<(), CheckpointError>
    where
        I: IntoIterator<Item = (u64, Hash)>,
    {
        // Drain the caller's iterator first; it may block or read this handle.
        let pairs: Vec<(u64, Hash)> = pairs.into_iter().collect();
        self.inner.write().load_ordered(pairs)
    }

    pub fn load_new_checkpoints(
        &self,
        cfg: &CheckpointConfig,
        dns: &dyn CheckpointSource,
    ) -> Result<(), CheckpointError> {
        let batches = fetch_new_checkpoints(cfg, dns)?;
        let mut guard = self.inner.write();
        for (source, pairs) in batches {
            apply_pairs(&mut guard, source, pairs)?;
        }
        Ok(())
    }

    pub fn is_in_checkpoint_zone(&self, height: u64) -> bool {
        self.inner.read().is_in_checkpoint_zone(height)
    }

    pub fn check_block(&self, height: u64, hash: &Hash) -> BlockCheck {
        self.inner.read().check_block(height, hash)
    }

    pub fn get_max_height(&self) -> Result<u64, CheckpointError> {
        self.inner.read().get_max_height()
    }

    pub fn is_alternative_block_allowed(
        &self,
        current_chain_height: u64,
        candidate_block_height: u64,
    ) -> bool {
        self.inner
            .read()
            .is_alternative_block_allowed(current_chain_height, candidate_block_height)
    }

    pub fn check_for_conflicts(&self, other: &Checkpoints) -> Result<(), CheckpointError> {
        self.inner.read().check_for_conflicts(other)
    }

    pub fn get_points(&self) -> BTreeMap<u64, Hash> {
        self.inner.read().get_points().clone()
    }

    pub fn snapshot(&self) -> Checkpoints {
        self.inner.read().clone()
    }
}

impl From<Checkpoints> for SharedCheckpoints {
    fn from(checkpoints: Checkpoints) -> Self {
        Self::new(checkpoints)
    }
}
