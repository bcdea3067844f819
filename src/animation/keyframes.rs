use crate::foundation::math::{lerp, wrap01};

/// One keyframe of a normalized curve: `at` in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stop {
    pub at: f64,
    pub value: f64,
}

const fn stop(at: f64, value: f64) -> Stop {
    Stop { at, value }
}

const PULSE_SCALE: &[Stop] = &[stop(0.0, 0.98), stop(0.5, 1.05), stop(1.0, 1.02)];
const BLINK: &[Stop] = &[
    stop(0.0, 0.8),
    stop(0.25, 0.05),
    stop(0.5, 0.9),
    stop(0.75, 0.0),
    stop(1.0, 0.8),
];
const FLICKER: &[Stop] = &[
    stop(0.0, 1.0),
    stop(0.25, 0.2),
    stop(0.5, 0.0),
    stop(0.75, 0.3),
    stop(1.0, 1.0),
];

/// Statically defined curves shared by every layer that loops them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Curve {
    PulseScale,
    Blink,
    Flicker,
}

impl Curve {
    pub fn stops(self) -> &'static [Stop] {
        match self {
            Self::PulseScale => PULSE_SCALE,
            Self::Blink => BLINK,
            Self::Flicker => FLICKER,
        }
    }

    /// Linear interpolation between the stops around `progress`.
    pub fn sample(self, progress: f64) -> f64 {
        sample_stops(self.stops(), progress)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoopMode {
    Repeat,
    /// Every other cycle runs backwards.
    PingPong,
}

/// An infinitely repeating curve with a start delay, parameterized per layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyframeLoop {
    pub curve: Curve,
    pub period_s: f64,
    pub delay_s: f64,
    pub mode: LoopMode,
}

impl KeyframeLoop {
    pub fn new(curve: Curve, period_s: f64, delay_s: f64, mode: LoopMode) -> Self {
        Self {
            curve,
            period_s,
            delay_s,
            mode,
        }
    }

    /// Progress through the current cycle, or `None` before the delay elapsed.
    pub fn progress(&self, elapsed_s: f64) -> Option<f64> {
        let local = elapsed_s - self.delay_s;
        if local < 0.0 || self.period_s <= 0.0 {
            return None;
        }
        let cycles = local / self.period_s;
        let p = wrap01(cycles);
        match self.mode {
            LoopMode::Repeat => Some(p),
            LoopMode::PingPong => {
                if (cycles.floor() as u64) % 2 == 0 {
                    Some(p)
                } else {
                    Some(1.0 - p)
                }
            }
        }
    }

    pub fn sample(&self, elapsed_s: f64) -> Option<f64> {
        self.progress(elapsed_s).map(|p| self.curve.sample(p))
    }
}

fn sample_stops(stops: &[Stop], progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    let Some(first) = stops.first() else {
        return 0.0;
    };
    if p <= first.at {
        return first.value;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if p <= b.at {
            let span = b.at - a.at;
            if span <= 0.0 {
                return b.value;
            }
            return lerp(a.value, b.value, (p - a.at) / span);
        }
    }
    stops.last().map_or(0.0, |s| s.value)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframes.rs"]
mod tests;
