//! Progress cohort: the set of progress bars animated together for one batch.

use std::collections::BTreeMap;

use rand::Rng;

use super::line::{LineId, clamp_percent};

/// Result of one animation tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CohortStep {
    /// Rounded values to publish together, in id order.
    pub updates: Vec<(LineId, u8)>,
    /// Every member has reached 100.
    pub complete: bool,
}

/// In-flight progress values, keyed by record id.
///
/// Owned by the playback loop for the duration of one `Animating` phase.
/// Every member starts at 0 regardless of what its generator proposed.
#[derive(Debug, Clone, Default)]
pub struct ProgressCohort {
    members: BTreeMap<LineId, f64>,
}

impl ProgressCohort {
    pub fn new(ids: impl IntoIterator<Item = LineId>) -> Self {
        Self {
            members: ids.into_iter().map(|id| (id, 0.0)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = LineId> + '_ {
        self.members.keys().copied()
    }

    pub fn value(&self, id: LineId) -> Option<f64> {
        self.members.get(&id).copied()
    }

    /// Drops every member. The next step reports completion.
    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn is_complete(&self) -> bool {
        self.members.values().all(|v| *v >= 100.0)
    }

    /// Advances every unfinished member by its own increment.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CohortStep {
        let mut updates = Vec::new();
        for (id, value) in &mut self.members {
            if *value >= 100.0 {
                continue;
            }
            *value = (*value + increment(rng, *value)).min(100.0);
            updates.push((*id, clamp_percent(*value)));
        }
        CohortStep {
            updates,
            complete: self.is_complete(),
        }
    }
}

/// Increment curve: fast start, slower middle, fast finish.
pub fn increment<R: Rng + ?Sized>(rng: &mut R, current: f64) -> f64 {
    let (base, spread) = if current < 20.0 {
        (3.0, 5.0)
    } else if current < 80.0 {
        (2.0, 4.0)
    } else {
        (4.0, 6.0)
    };
    base + rng.r#gen::<f64>() * spread
}
