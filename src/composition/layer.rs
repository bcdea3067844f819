use crate::{
    animation::keyframes::KeyframeLoop,
    foundation::core::{ClipInset, ImageRef, PctRect, Rgb, Vec2},
    generate::geometry::Placement,
};

/// Index of a layer inside its [`crate::Composition`] arena.
///
/// Ids are assigned in creation order and stay valid for the lifetime of the
/// composition that issued them.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct LayerId(pub u32);

impl LayerId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LayerKind {
    Background,
    BaseImage,
    TintOverlay,
    ShapeDot,
    ShapeRect,
    ShapeTile,
    ImageFragment,
    GridBlock,
}

/// What a layer paints.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum LayerSource {
    Color(Rgb),
    /// Left-to-right gradient with evenly spaced stops.
    Gradient(Vec<Rgb>),
    Image(ImageRef),
    /// Image painted over a solid color; the color shows through wherever the image is transparent.
    TintedImage { image: ImageRef, color: Rgb },
    /// Source failed to resolve; painted fully transparent.
    Missing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Blend {
    #[default]
    Normal,
    /// Additive-looking color separation over the image.
    Screen,
}

/// Circular drift parameters.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Motion {
    /// Angular speed, radians per second.
    pub speed: f64,
    /// Radius in percent of the container.
    pub amplitude: f64,
    /// Offset into the clip gate's sine, radians.
    pub phase: f64,
}

/// How the driver animates a layer. Fixed at construction time.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum AnimSpec {
    Static,
    /// Focal image: receives one-shot clip flashes.
    Focal,
    /// Drift, oscillating opacity and a gated clip band.
    Tint(Motion),
    /// Drift and a gated clip band.
    Shape(Motion),
    /// Small drift plus rare color/opacity flashes.
    Tile(Motion),
    /// Scale pulse with an independent opacity blink.
    Pulse {
        scale: KeyframeLoop,
        blink: KeyframeLoop,
    },
    /// Opacity flicker loop.
    Flicker(KeyframeLoop),
}

impl AnimSpec {
    pub fn motion(&self) -> Option<Motion> {
        match *self {
            Self::Tint(m) | Self::Shape(m) | Self::Tile(m) => Some(m),
            _ => None,
        }
    }
}

/// Mutable per-frame state of a layer.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualState {
    /// Translate offset in percent of the container.
    pub offset: Vec2,
    pub opacity: f64,
    pub clip: Option<ClipInset>,
    pub color: Option<Rgb>,
    pub scale: f64,
}

impl VisualState {
    pub fn at_rest(opacity: f64, color: Option<Rgb>) -> Self {
        Self {
            offset: Vec2::ZERO,
            opacity,
            clip: None,
            color,
            scale: 1.0,
        }
    }
}

/// One positioned, independently animated element of a composition.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layer {
    pub id: LayerId,
    pub kind: LayerKind,
    pub rect: PctRect,
    pub z: i32,
    pub source: LayerSource,
    pub blend: Blend,
    pub base_opacity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placement: Option<Placement>,
    pub anim: AnimSpec,
    pub state: VisualState,
}

impl Layer {
    pub fn base_color(&self) -> Option<Rgb> {
        match self.source {
            LayerSource::Color(c) | LayerSource::TintedImage { color: c, .. } => Some(c),
            _ => None,
        }
    }

    /// State the layer returns to when a transient flash is reverted.
    pub fn rest_state(&self) -> VisualState {
        VisualState::at_rest(self.base_opacity, self.base_color())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self.source, LayerSource::Missing)
    }
}
