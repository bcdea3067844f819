//! glitchroom builds procedurally generated, continuously animated "glitch"
//! compositions over a single image, plus a pseudo-3D typographic room.
//!
//! # Pipeline overview
//!
//! 1. **Select**: an [`EffectVariantSelector`] picks a [`RecipeId`], never repeating the
//!    current one on regenerate.
//! 2. **Compose**: [`compose`] turns an [`ImageRef`] and a [`Recipe`] into a [`Composition`],
//!    an arena of [`Layer`]s laid out in container percent.
//! 3. **Animate**: an [`AnimationDriver`] mutates each layer's [`VisualState`] once per
//!    host frame and reverts one-shot flashes at their deadlines.
//! 4. **Project**: [`render_styles`] maps layer state to declarative [`LayerStyle`] records
//!    that a host surface applies.
//!
//! [`GlitchEngine`] wires these together for one mounted instance and rebuilds the
//! composition from scratch whenever the image, theme or regenerate counter changes.
//! [`PerspectiveRoom`] is independent: pointer and wheel input drive its orientation,
//! zoom and reveal level.
//!
//! Everything is single-threaded and host-driven. Nothing sleeps or spawns; time comes
//! from a [`Clock`].
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod composition;
mod config;
mod engine;
mod foundation;
mod generate;
mod render;
mod room;
mod select;

pub use animation::clock::{Clock, ManualClock, SystemClock};
pub use animation::driver::{AnimationDriver, DriverStats, FrameStatus};
pub use animation::keyframes::{Curve, KeyframeLoop, LoopMode, Stop};
pub use animation::oscillate::{ClipGate, drift_offset, tint_opacity};
pub use assets::probe::{AssumeAvailable, FsProbe, SourceProbe};
pub use composition::compositor::compose;
pub use composition::layer::{
    AnimSpec, Blend, Layer, LayerId, LayerKind, LayerSource, Motion, VisualState,
};
pub use composition::model::Composition;
pub use composition::recipe::{COLLAGE_FOCAL, ColorTheme, FlashSpec, Recipe, RecipeId, Timing};
pub use config::EngineConfig;
pub use engine::GlitchEngine;
pub use foundation::core::{ClipInset, ImageRef, PctRect, Point, Rect, Rgb, Vec2};
pub use foundation::error::{GlitchError, GlitchResult};
pub use generate::geometry::{
    GridParams, Placement, ReservedBands, ShapeDescriptor, ShapeKind, ShapeParams, Span,
    TileDescriptor, generate_grid, generate_shapes,
};
pub use render::style::{FrameSnapshot, Fill, LayerStyle, layer_style, render_styles};
pub use room::perspective::{
    PERSPECTIVE_PX, PerspectiveRoom, REVEAL_THRESHOLDS, RoomConfig, RoomLayer, RoomLayerKind,
    RoomScene, RoomState, SceneTransform, reveal_level,
};
pub use room::walls::{DEPTH_SETS, DEPTH_STEP, DEFAULT_WORDS, FLOOR_TEXT, WallSide, WallText};
pub use select::selector::{EffectVariantSelector, Selection};
