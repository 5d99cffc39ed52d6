//! The append-only movement log.

use std::sync::Arc;

use tracing::debug;

use shared_types::{
    BatchId, MovementId, MovementStore, NewMovement, ScriptId, ScriptMovement, TimeSource,
};

use super::errors::LedgerError;

/// Append-only log of custody transfers.
pub struct CustodyLedger {
    store: Arc<dyn MovementStore>,
    clock: Arc<dyn TimeSource>,
}

impl CustodyLedger {
    pub fn new(store: Arc<dyn MovementStore>, clock: Arc<dyn TimeSource>) -> Self {
        Self { store, clock }
    }

    /// Append a movement and return its id.
    ///
    /// The timestamp is assigned here, clamped so that it never precedes
    /// the newest movement already recorded for the same batch. No
    /// business rules are validated: callers are responsible for only
    /// appending transfers they have already decided are legal.
    pub fn append(&self, movement: NewMovement) -> Result<MovementId, LedgerError> {
        let mut recorded_at = self.clock.now();
        if let Some(batch_id) = movement.batch_id {
            if let Some(latest) = self.store.latest_for_batch(batch_id)? {
                if latest > recorded_at {
                    recorded_at = latest;
                }
            }
        }

        let id = self.store.append(movement.clone(), recorded_at)?;
        debug!(
            movement_id = id,
            movement_type = ?movement.movement_type,
            batch_id = movement.batch_id,
            script_id = movement.script_id,
            "movement appended"
        );
        Ok(id)
    }

    /// Movement history for a batch, most recent first.
    pub fn history_for_batch(
        &self,
        batch_id: BatchId,
        limit: usize,
    ) -> Result<Vec<ScriptMovement>, LedgerError> {
        Ok(self.store.history_for_batch(batch_id, limit)?)
    }

    /// Movement history for a single script, most recent first.
    pub fn history_for_script(
        &self,
        script_id: ScriptId,
        limit: usize,
    ) -> Result<Vec<ScriptMovement>, LedgerError> {
        Ok(self.store.history_for_script(script_id, limit)?)
    }
}
