//! Pure time functions behind the per-frame update.
//!
//! Everything here is a function of elapsed seconds and per-layer constants
//! only; randomness is injected by the driver at the gates.

use crate::foundation::core::Vec2;

/// Circular drift: `(sin(t·speed)·amp, cos(t·speed)·amp)`.
pub fn drift_offset(t: f64, speed: f64, amplitude: f64) -> Vec2 {
    let a = t * speed;
    Vec2::new(a.sin() * amplitude, a.cos() * amplitude)
}

/// Opacity of a tint overlay, cycling smoothly through `[0, 0.3]`.
pub fn tint_opacity(t: f64) -> f64 {
    (t * 0.5).sin() * 0.15 + 0.15
}

/// Periodic gate opening an intermittent clip window.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClipGate {
    pub frequency: f64,
    pub threshold: f64,
}

impl ClipGate {
    pub const DEFAULT: Self = Self {
        frequency: 0.2,
        threshold: 0.7,
    };

    /// `sin(t·frequency + phase) > threshold`.
    pub fn is_open(self, t: f64, phase: f64) -> bool {
        (t * self.frequency + phase).sin() > self.threshold
    }
}

impl Default for ClipGate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/oscillate.rs"]
mod tests;
