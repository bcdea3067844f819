use tracing::{trace, warn};

use crate::{
    foundation::core::{ImageRef, Point, Rect},
    foundation::error::{GlitchError, GlitchResult},
    room::walls::{DEPTH_SETS, DEPTH_STEP, WallSide, WallText},
};

/// Zoom values below each threshold unlock one more reveal level.
pub const REVEAL_THRESHOLDS: [f64; 6] = [0.2, 0.4, 0.6, 0.9, 1.25, 1.75];

/// Perspective distance of the scene, in CSS pixels.
pub const PERSPECTIVE_PX: f64 = 1000.0;

/// Number of thresholds strictly greater than `zoom`.
///
/// `0.15 -> 6`, `1.0 -> 2`, `2.0 -> 0`.
pub fn reveal_level(zoom: f64) -> usize {
    REVEAL_THRESHOLDS.iter().filter(|t| **t > zoom).count()
}

/// Tunables of the room's input response.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RoomConfig {
    /// Degrees of rotation at the container edge.
    pub gain_deg: f64,
    /// Gain multiplier on touch-primary devices.
    pub touch_factor: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    pub zoom_step: f64,
    pub initial_zoom: f64,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            gain_deg: 10.0,
            touch_factor: 0.5,
            min_zoom: 0.1,
            max_zoom: 2.0,
            zoom_step: 0.05,
            initial_zoom: 1.0,
        }
    }
}

impl RoomConfig {
    pub fn validate(&self) -> GlitchResult<()> {
        let positive = |name: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(GlitchError::validation(format!("room.{name} must be finite and > 0, got {v}")))
            }
        };
        positive("gain_deg", self.gain_deg)?;
        positive("touch_factor", self.touch_factor)?;
        positive("zoom_step", self.zoom_step)?;
        positive("min_zoom", self.min_zoom)?;
        if !(self.max_zoom.is_finite() && self.max_zoom > self.min_zoom) {
            return Err(GlitchError::validation(format!(
                "room.max_zoom ({}) must be finite and greater than room.min_zoom ({})",
                self.max_zoom, self.min_zoom
            )));
        }
        if !(self.min_zoom..=self.max_zoom).contains(&self.initial_zoom) {
            return Err(GlitchError::validation(format!(
                "room.initial_zoom ({}) must lie in [{}, {}]",
                self.initial_zoom, self.min_zoom, self.max_zoom
            )));
        }
        Ok(())
    }
}

/// Orientation in degrees plus the zoom scalar.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RoomState {
    pub rotate_x: f64,
    pub rotate_y: f64,
    pub zoom: f64,
}

impl RoomState {
    pub fn reveal_level(&self) -> usize {
        reveal_level(self.zoom)
    }
}

/// Camera transform applied to the whole scene.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct SceneTransform {
    pub perspective: f64,
    pub rotate_x: f64,
    pub rotate_y: f64,
    /// Dolly scale; equal to the zoom scalar.
    pub scale: f64,
}

impl SceneTransform {
    pub fn to_css(&self) -> String {
        format!(
            "perspective({}px) rotateX({}deg) rotateY({}deg) scale({})",
            self.perspective, self.rotate_x, self.rotate_y, self.scale
        )
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum RoomLayerKind {
    /// The user image at the center, at depth 0.
    Image { src: ImageRef },
    Wall { side: WallSide, text: String },
    /// A word unlocked by zooming out.
    Depth { text: String, slot: usize },
}

/// One visible layer of the room with its simulated depth.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RoomLayer {
    #[serde(flatten)]
    pub kind: RoomLayerKind,
    /// Reveal level that unlocked this layer (0 for the base room).
    pub level: usize,
    /// `translateZ` offset, in CSS pixels; negative is further away.
    pub depth: f64,
    pub transform: String,
    pub origin: String,
    /// Text runs top to bottom.
    pub vertical: bool,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RoomScene {
    pub transform: SceneTransform,
    pub css: String,
    pub reveal_level: usize,
    pub layers: Vec<RoomLayer>,
}

/// A pseudo-3D corridor of text walls around one image.
///
/// Orientation follows the pointer; the wheel moves the zoom scalar in fixed
/// steps, and lower zoom unlocks deeper words.
#[derive(Clone, Debug)]
pub struct PerspectiveRoom {
    config: RoomConfig,
    image: ImageRef,
    walls: WallText,
    state: RoomState,
}

impl PerspectiveRoom {
    /// Build a room at rest. An invalid `config` is replaced by the defaults.
    pub fn new(config: RoomConfig, image: ImageRef, text: Option<&str>) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                warn!(%err, "invalid room config; using defaults");
                RoomConfig::default()
            }
        };
        let state = RoomState {
            rotate_x: 0.0,
            rotate_y: 0.0,
            zoom: config.initial_zoom,
        };
        Self {
            walls: WallText::from_text(text.unwrap_or("")),
            config,
            image,
            state,
        }
    }

    pub fn config(&self) -> &RoomConfig {
        &self.config
    }

    pub fn state(&self) -> RoomState {
        self.state
    }

    pub fn walls(&self) -> &WallText {
        &self.walls
    }

    pub fn reveal_level(&self) -> usize {
        self.state.reveal_level()
    }

    /// Re-orient from a pointer at `pos` over a container occupying `bounds`.
    ///
    /// Coordinates are normalized to `[-1, 1]` around the container center.
    /// Degenerate containers leave the orientation as it is.
    pub fn pointer_moved(&mut self, pos: Point, bounds: Rect, touch: bool) {
        let (half_w, half_h) = (bounds.width() / 2.0, bounds.height() / 2.0);
        if !(half_w > 0.0 && half_h > 0.0) || !pos.x.is_finite() || !pos.y.is_finite() {
            return;
        }
        let center = bounds.center();
        let factor = if touch { self.config.touch_factor } else { 1.0 };
        let rel_x = ((pos.x - center.x) / half_w).clamp(-1.0, 1.0) * factor;
        let rel_y = ((pos.y - center.y) / half_h).clamp(-1.0, 1.0) * factor;
        self.state.rotate_x = -self.config.gain_deg * rel_y;
        self.state.rotate_y = self.config.gain_deg * rel_x;
        trace!(rx = self.state.rotate_x, ry = self.state.rotate_y, "room oriented");
    }

    /// Step the zoom against the scroll direction. Zero deltas are ignored.
    pub fn wheel(&mut self, delta_y: f64) {
        if delta_y == 0.0 || delta_y.is_nan() {
            return;
        }
        let before = self.reveal_level();
        let next = self.state.zoom - self.config.zoom_step * delta_y.signum();
        self.state.zoom = quantize(next).clamp(self.config.min_zoom, self.config.max_zoom);
        let after = self.reveal_level();
        if after != before {
            trace!(zoom = self.state.zoom, level = after, "reveal level changed");
        }
    }

    pub fn scene_transform(&self) -> SceneTransform {
        SceneTransform {
            perspective: PERSPECTIVE_PX,
            rotate_x: self.state.rotate_x,
            rotate_y: self.state.rotate_y,
            scale: self.state.zoom,
        }
    }

    /// Every layer visible at the current zoom, back walls first.
    pub fn scene(&self) -> RoomScene {
        let level = self.reveal_level();
        let mut layers = Vec::with_capacity(6 + level * 3);

        layers.push(RoomLayer {
            kind: RoomLayerKind::Image {
                src: self.image.clone(),
            },
            level: 0,
            depth: 0.0,
            transform: "translateZ(0px)".to_string(),
            origin: "center".to_string(),
            vertical: false,
        });
        for side in WallSide::ALL {
            let depth = -DEPTH_STEP;
            layers.push(RoomLayer {
                kind: RoomLayerKind::Wall {
                    side,
                    text: self.walls.get(side).to_string(),
                },
                level: 0,
                depth,
                transform: format!("translateZ({depth}px) {}", side.fold()).trim_end().to_string(),
                origin: side.origin().to_string(),
                vertical: side.is_vertical(),
            });
        }
        for (i, words) in DEPTH_SETS.iter().take(level).enumerate() {
            let n = i + 1;
            let depth = -(n as f64) * DEPTH_STEP;
            for (slot, word) in words.iter().enumerate() {
                layers.push(RoomLayer {
                    kind: RoomLayerKind::Depth {
                        text: (*word).to_string(),
                        slot,
                    },
                    level: n,
                    depth,
                    transform: format!("translateZ({depth}px)"),
                    origin: "center".to_string(),
                    vertical: false,
                });
            }
        }

        let transform = self.scene_transform();
        RoomScene {
            css: transform.to_css(),
            transform,
            reveal_level: level,
            layers,
        }
    }
}

// Snap to a 1e-9 grid; accumulated steps land exactly on the thresholds.
fn quantize(v: f64) -> f64 {
    (v * 1e9).round() / 1e9
}

#[cfg(test)]
#[path = "../../tests/unit/room/perspective.rs"]
mod tests;
