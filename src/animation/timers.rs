use crate::composition::layer::LayerId;
use crate::foundation::core::Rgb;

/// What a pending revert puts back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Revert {
    /// Remove a transient clip band.
    ClearClip,
    /// Restore the layer's fill color.
    Color(Rgb),
    /// Restore the layer's opacity.
    Opacity(f64),
}

/// A one-shot revert scheduled for `deadline`, valid only within `epoch`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct PendingRevert {
    pub(crate) deadline: f64,
    pub(crate) epoch: u64,
    pub(crate) layer: LayerId,
    pub(crate) action: Revert,
}

/// Cancellation set of outstanding reverts, in scheduling order.
#[derive(Debug, Default)]
pub(crate) struct RevertQueue {
    pending: Vec<PendingRevert>,
}

impl RevertQueue {
    pub(crate) fn schedule(&mut self, entry: PendingRevert) {
        self.pending.push(entry);
    }

    /// Drop every pending revert; returns how many were discarded.
    pub(crate) fn clear(&mut self) -> usize {
        let n = self.pending.len();
        self.pending.clear();
        n
    }

    /// Remove and return the entries due at `now`, earliest deadline first.
    pub(crate) fn pop_due(&mut self, now: f64) -> Vec<PendingRevert> {
        let mut due = Vec::new();
        self.pending.retain(|p| {
            if p.deadline <= now {
                due.push(*p);
                false
            } else {
                true
            }
        });
        due.sort_by(|a, b| a.deadline.total_cmp(&b.deadline));
        due
    }

    /// Whether `layer` already has a revert in flight.
    pub(crate) fn has_pending(&self, layer: LayerId) -> bool {
        self.pending.iter().any(|p| p.layer == layer)
    }

    pub(crate) fn next_deadline(&self) -> Option<f64> {
        self.pending
            .iter()
            .map(|p| p.deadline)
            .min_by(|a, b| a.total_cmp(b))
    }

    pub(crate) fn len(&self) -> usize {
        self.pending.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timers.rs"]
mod tests;
