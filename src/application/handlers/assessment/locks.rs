//! Per-assessment write locks.
//!
//! Recomputations of one assessment are serialised; different assessments
//! proceed in parallel. Lock entries are created on first use and dropped
//! once no task holds or waits for them.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::AssessmentId;

/// Registry of one async mutex per assessment.
#[derive(Debug, Clone, Default)]
pub struct AssessmentLocks {
    locks: Arc<Mutex<HashMap<AssessmentId, Arc<Mutex<()>>>>>,
}

impl AssessmentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits for exclusive access to one assessment.
    ///
    /// The registry lock is released before waiting on the assessment lock,
    /// so a long recomputation never blocks other assessments.
    pub async fn acquire(&self, assessment_id: AssessmentId) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            prune_idle(&mut locks);
            locks.entry(assessment_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of assessments whose lock is held or awaited.
    pub async fn tracked_count(&self) -> usize {
        let mut locks = self.locks.lock().await;
        prune_idle(&mut locks);
        locks.len()
    }
}

/// Removes entries only the registry still references. Guards and waiting
/// tasks each hold a clone of the entry.
fn prune_idle(locks: &mut HashMap<AssessmentId, Arc<Mutex<()>>>) {
    locks.retain(|_, lock| Arc::strong_count(lock) > 1);
}
