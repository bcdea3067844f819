use crate::{
    composition::layer::{Blend, Layer, LayerId, LayerKind, LayerSource},
    composition::model::Composition,
    composition::recipe::RecipeId,
    foundation::core::{ImageRef, Rgb},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
/// Paint of one styled layer.
pub enum Fill {
    /// `#rrggbb`.
    Color(String),
    /// CSS `linear-gradient(...)`.
    Gradient(String),
    /// Image shown with cover fit.
    Image(ImageRef),
    /// Image with cover fit over a `#rrggbb` background color.
    TintedImage { image: ImageRef, color: String },
    /// Nothing is painted.
    Transparent,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Declarative style of one layer at one instant, in container percent.
pub struct LayerStyle {
    /// Source layer.
    pub id: LayerId,
    /// Layer kind, for hosts that style kinds differently.
    pub kind: LayerKind,
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Stacking order.
    pub z: i32,
    /// Final opacity in `[0, 1]`; missing sources are always 0.
    pub opacity: f64,
    /// `translate(x%, y%) scale(s)`.
    pub transform: String,
    /// `inset(a% 0 b% 0)` while a clip band is active.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub clip_path: Option<String>,
    pub fill: Fill,
    pub blend: Blend,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Styles of every layer of a composition, captured at one frame time.
pub struct FrameSnapshot {
    pub recipe: RecipeId,
    /// Frame time, in seconds.
    pub time: f64,
    /// Layers in painter order.
    pub styles: Vec<LayerStyle>,
}

impl FrameSnapshot {
    pub fn capture(comp: &Composition, time: f64) -> Self {
        Self {
            recipe: comp.recipe_id(),
            time,
            styles: render_styles(comp),
        }
    }
}

/// Project every layer's current state into a style record, back to front.
///
/// Pure: the same composition state always yields the same styles.
pub fn render_styles(comp: &Composition) -> Vec<LayerStyle> {
    comp.painter_order().into_iter().map(layer_style).collect()
}

/// Style record of a single layer.
pub fn layer_style(layer: &Layer) -> LayerStyle {
    let s = &layer.state;
    let opacity = if layer.is_missing() {
        0.0
    } else {
        s.opacity.clamp(0.0, 1.0)
    };
    LayerStyle {
        id: layer.id,
        kind: layer.kind,
        left: layer.rect.left,
        top: layer.rect.top,
        width: layer.rect.width,
        height: layer.rect.height,
        z: layer.z,
        opacity,
        transform: format!(
            "translate({}%, {}%) scale({})",
            s.offset.x, s.offset.y, s.scale
        ),
        clip_path: s.clip.map(|c| c.to_css()),
        fill: fill(layer),
        blend: layer.blend,
    }
}

fn fill(layer: &Layer) -> Fill {
    match &layer.source {
        LayerSource::Color(base) => Fill::Color(layer.state.color.unwrap_or(*base).to_hex()),
        LayerSource::Gradient(stops) => Fill::Gradient(linear_gradient(stops)),
        LayerSource::Image(src) => Fill::Image(src.clone()),
        LayerSource::TintedImage { image, color } => Fill::TintedImage {
            image: image.clone(),
            color: layer.state.color.unwrap_or(*color).to_hex(),
        },
        LayerSource::Missing => Fill::Transparent,
    }
}

fn linear_gradient(stops: &[Rgb]) -> String {
    let colors: Vec<String> = stops.iter().map(|c| c.to_hex()).collect();
    format!("linear-gradient(to right, {})", colors.join(", "))
}

#[cfg(test)]
#[path = "../../tests/unit/render/style.rs"]
mod tests;
