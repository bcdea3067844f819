use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use tracing::{debug, trace};

use crate::{
    animation::oscillate::{drift_offset, tint_opacity},
    animation::timers::{PendingRevert, Revert, RevertQueue},
    composition::layer::{AnimSpec, Layer, VisualState},
    composition::model::Composition,
    composition::recipe::Timing,
    foundation::core::{ClipInset, Rgb},
};

/// Colors a tile may flash to.
const FLASH_COLORS: [Rgb; 4] = [
    Rgb::WHITE,
    Rgb::BLACK,
    Rgb::new(0xff, 0x00, 0x00),
    Rgb::new(0x00, 0xff, 0xff),
];

/// Opacity a tile drops to during an opacity flash.
const FLASH_OPACITY: f64 = 0.1;

/// Whether the host should schedule another frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Stopped,
}

/// Counters accumulated over the lifetime of a driver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct DriverStats {
    /// Frames that ran while the driver was live.
    pub frames: u64,
    /// Layer state writes, counting both frame updates and fired reverts.
    pub mutations: u64,
    pub reverts_fired: u64,
    /// Reverts dropped by teardown or because they belonged to an older epoch.
    pub reverts_discarded: u64,
}

/// Per-frame updater of a composition's layer states.
///
/// The driver never sleeps or spawns: the host calls [`frame`](Self::frame)
/// on every display refresh and [`fire_due`](Self::fire_due) whenever a revert
/// deadline may have passed. Every scheduled revert carries the epoch it was
/// created in; [`stop`](Self::stop) bumps the epoch and clears the queue, so
/// nothing can touch a layer after teardown.
#[derive(Debug)]
pub struct AnimationDriver {
    comp: Composition,
    rng: StdRng,
    timing: Timing,
    epoch: u64,
    running: bool,
    started_at: f64,
    reverts: RevertQueue,
    stats: DriverStats,
}

impl AnimationDriver {
    pub fn new(comp: Composition, rng: StdRng) -> Self {
        let timing = *comp.recipe.timing();
        Self {
            comp,
            rng,
            timing,
            epoch: 0,
            running: false,
            started_at: 0.0,
            reverts: RevertQueue::default(),
            stats: DriverStats::default(),
        }
    }

    /// Start the loop at `now`. Starting a running driver does nothing.
    pub fn start(&mut self, now: f64) {
        if self.running {
            return;
        }
        self.comp.reset_states();
        self.running = true;
        self.started_at = now;
        debug!(epoch = self.epoch, layers = self.comp.len(), "animation started");
    }

    /// Stop the loop and invalidate every outstanding revert.
    pub fn stop(&mut self) {
        if !self.running && self.reverts.is_empty() {
            return;
        }
        self.running = false;
        self.epoch += 1;
        let dropped = self.reverts.clear();
        self.stats.reverts_discarded += dropped as u64;
        debug!(epoch = self.epoch, dropped, "animation stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    pub fn composition(&self) -> &Composition {
        &self.comp
    }

    pub fn pending_reverts(&self) -> usize {
        self.reverts.len()
    }

    /// Earliest pending revert deadline, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        self.reverts.next_deadline()
    }

    /// Run one tick at wall-clock seconds `now`.
    pub fn frame(&mut self, now: f64) -> FrameStatus {
        if !self.running {
            return FrameStatus::Stopped;
        }
        self.stats.frames += 1;
        let elapsed = (now - self.started_at).max(0.0);

        for i in 0..self.comp.len() {
            let layer = &self.comp.layers()[i];
            let before = layer.state;
            let (next, flash) = step_layer(layer, &self.timing, now, elapsed, &mut self.rng);

            let flash = match flash {
                Some(f) if !self.reverts.has_pending(layer.id) => Some(f),
                _ => None,
            };
            let next = match flash {
                Some(f) => f.apply(next),
                None => next,
            };

            let id = layer.id;
            if let Some(f) = flash {
                let deadline = now + f.revert_ms as f64 / 1000.0;
                trace!(layer = id.0, deadline, action = ?f.revert, "flash scheduled");
                self.reverts.schedule(PendingRevert {
                    deadline,
                    epoch: self.epoch,
                    layer: id,
                    action: f.revert,
                });
            }
            if next != before {
                if let Some(l) = self.comp.layer_mut(id) {
                    l.state = next;
                }
                self.stats.mutations += 1;
            }
        }
        FrameStatus::Continue
    }

    /// Apply every revert whose deadline is `<= now`. A no-op after [`stop`](Self::stop).
    pub fn fire_due(&mut self, now: f64) -> usize {
        let mut fired = 0;
        for p in self.reverts.pop_due(now) {
            if !self.running || p.epoch != self.epoch {
                self.stats.reverts_discarded += 1;
                continue;
            }
            let Some(layer) = self.comp.layer_mut(p.layer) else {
                self.stats.reverts_discarded += 1;
                continue;
            };
            match p.action {
                Revert::ClearClip => layer.state.clip = None,
                Revert::Color(c) => layer.state.color = Some(c),
                Revert::Opacity(o) => layer.state.opacity = o,
            }
            self.stats.mutations += 1;
            self.stats.reverts_fired += 1;
            fired += 1;
        }
        fired
    }
}

/// A transient change plus how to undo it.
#[derive(Clone, Copy, Debug)]
struct Flash {
    change: Change,
    revert: Revert,
    revert_ms: u64,
}

#[derive(Clone, Copy, Debug)]
enum Change {
    Clip(ClipInset),
    Color(Rgb),
    Opacity(f64),
}

impl Flash {
    fn apply(self, mut state: VisualState) -> VisualState {
        match self.change {
            Change::Clip(c) => state.clip = Some(c),
            Change::Color(c) => state.color = Some(c),
            Change::Opacity(o) => state.opacity = o,
        }
        state
    }
}

fn random_band<R: Rng + ?Sized>(rng: &mut R) -> ClipInset {
    ClipInset::band(
        f64::from(rng.random_range(0u32..100)),
        f64::from(rng.random_range(0u32..100)),
    )
}

fn gated_clip<R: Rng + ?Sized>(timing: &Timing, t: f64, phase: f64, rng: &mut R) -> Option<ClipInset> {
    timing.clip_gate.is_open(t, phase).then(|| random_band(rng))
}

/// Next state of `layer` at wall-clock `t`, plus an optional one-shot flash.
fn step_layer<R: Rng + ?Sized>(
    layer: &Layer,
    timing: &Timing,
    t: f64,
    elapsed: f64,
    rng: &mut R,
) -> (VisualState, Option<Flash>) {
    let mut state = layer.state;
    let mut flash = None;
    match layer.anim {
        AnimSpec::Static => {}
        AnimSpec::Focal => {
            let spec = timing.image_flash;
            if rng.random_bool(spec.probability.clamp(0.0, 1.0)) {
                flash = Some(Flash {
                    change: Change::Clip(random_band(rng)),
                    revert: Revert::ClearClip,
                    revert_ms: spec.revert_ms,
                });
            }
        }
        AnimSpec::Tint(m) => {
            state.offset = drift_offset(t, m.speed, m.amplitude);
            state.opacity = tint_opacity(t);
            state.clip = gated_clip(timing, t, m.phase, rng);
        }
        AnimSpec::Shape(m) => {
            state.offset = drift_offset(t, m.speed, m.amplitude);
            state.clip = gated_clip(timing, t, m.phase, rng);
        }
        AnimSpec::Tile(m) => {
            state.offset = drift_offset(t, m.speed, m.amplitude);
            let spec = timing.tile_flash;
            if rng.random_bool(spec.probability.clamp(0.0, 1.0)) {
                let (change, revert) = if rng.random_bool(0.5) {
                    let color = FLASH_COLORS.choose(rng).copied().unwrap_or(Rgb::WHITE);
                    let rest = layer.base_color().unwrap_or(Rgb::WHITE);
                    (Change::Color(color), Revert::Color(rest))
                } else {
                    (Change::Opacity(FLASH_OPACITY), Revert::Opacity(layer.base_opacity))
                };
                flash = Some(Flash {
                    change,
                    revert,
                    revert_ms: spec.revert_ms,
                });
            }
        }
        AnimSpec::Pulse { scale, blink } => {
            state.scale = scale.sample(elapsed).unwrap_or(1.0);
            state.opacity = blink.sample(elapsed).unwrap_or(layer.base_opacity);
        }
        AnimSpec::Flicker(lp) => {
            state.opacity = lp.sample(elapsed).unwrap_or(layer.base_opacity);
        }
    }
    (state, flash)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
