//! Proximity checking and unlock emission.
use crate::BadgeAwarder;
use crate::badges::BadgeBook;
use crate::constants::{BADGE_FIRST_UNLOCK, BADGE_ROUTE_COMPLETE};
use crate::data::Checkpoint;
use crate::geo;
use crate::position::PositionFix;
use crate::unlocks::{UnlockLedger, UnlockRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;
use smallvec::SmallVec;
use std::cmp::Ordering;

/// A first-time proximity match against a checkpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnlockEvent {
    pub checkpoint_id: String,
    pub distance_m: f64,
    pub unlocked_at: DateTime<Utc>,
}

/// Per-tick batch of unlock events; almost always empty or a single entry.
pub type UnlockBatch = SmallVec<[UnlockEvent; 2]>;

/// Check every still-locked checkpoint against the fix and record the ones
/// inside their unlock radius.
///
/// All qualifying checkpoints unlock in the same tick, ordered nearest
/// first (checkpoint id breaks distance ties) so multi-unlock ticks replay
/// deterministically. Idempotent: a checkpoint already present in the
/// ledger is never re-emitted, and invalid fixes are infinitely far from
/// everything.
pub fn check_proximity(
    fix: &PositionFix,
    checkpoints: &[Checkpoint],
    ledger: &mut UnlockLedger,
) -> UnlockBatch {
    let mut hits: UnlockBatch = checkpoints
        .iter()
        .filter(|checkpoint| !ledger.contains(&checkpoint.id))
        .filter_map(|checkpoint| {
            let distance_m = geo::distance_meters(fix.coordinates, checkpoint.coordinates);
            (distance_m <= checkpoint.unlock_radius_m).then(|| UnlockEvent {
                checkpoint_id: checkpoint.id.clone(),
                distance_m,
                unlocked_at: fix.timestamp,
            })
        })
        .collect();

    hits.sort_by(|a, b| {
        a.distance_m
            .partial_cmp(&b.distance_m)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.checkpoint_id.cmp(&b.checkpoint_id))
    });

    for event in &hits {
        ledger.insert(UnlockRecord {
            checkpoint_id: event.checkpoint_id.clone(),
            unlocked_at: event.unlocked_at,
        });
        log::info!(
            "checkpoint unlocked: {} at {:.0} m",
            event.checkpoint_id,
            event.distance_m
        );
    }
    hits
}

/// Counting predicate: has the ledger covered the whole catalog?
#[must_use]
pub fn route_complete(ledger: &UnlockLedger, total_checkpoints: usize) -> bool {
    total_checkpoints > 0 && ledger.len() >= total_checkpoints
}

/// Award the badges implied by a batch of fresh unlock events: each
/// checkpoint's own badge, the fixed first-unlock badge, and the completion
/// badge once the ledger covers the catalog.
pub fn award_unlock_badges(
    events: &[UnlockEvent],
    checkpoints: &[Checkpoint],
    ledger: &UnlockLedger,
    book: &mut BadgeBook,
    port: &mut dyn BadgeAwarder,
) {
    if events.is_empty() {
        return;
    }
    for event in events {
        if let Some(checkpoint) = checkpoints.iter().find(|cp| cp.id == event.checkpoint_id) {
            book.award(&checkpoint.badge_id, port);
        }
    }
    book.award(BADGE_FIRST_UNLOCK, port);
    if route_complete(ledger, checkpoints.len()) {
        book.award(BADGE_ROUTE_COMPLETE, port);
    }
}
