use crate::{
    composition::layer::{AnimSpec, Blend, Layer, LayerId, LayerKind, LayerSource, VisualState},
    composition::recipe::{ColorTheme, Recipe, RecipeId},
    foundation::core::{ImageRef, PctRect},
    generate::geometry::Placement,
};

/// The full set of layers representing one live effect instance.
///
/// Layers live in an index-addressed arena; the rendering surface is a pure
/// function of their current state (see [`crate::render_styles`]). A
/// composition is never patched structurally: when the image or recipe
/// changes it is dropped and rebuilt.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Composition {
    /// Recipe parameters that generated this composition.
    pub recipe: Recipe,
    pub theme: ColorTheme,
    /// Focal image reference.
    pub image: ImageRef,
    /// Area kept clear of generated clutter.
    pub reserved: PctRect,
    layers: Vec<Layer>,
}

/// Construction parameters for one layer.
#[derive(Clone, Debug)]
pub(crate) struct NewLayer {
    kind: LayerKind,
    rect: PctRect,
    z: i32,
    source: LayerSource,
    blend: Blend,
    opacity: f64,
    placement: Option<Placement>,
    anim: AnimSpec,
}

impl NewLayer {
    pub(crate) fn new(kind: LayerKind, rect: PctRect, z: i32, source: LayerSource) -> Self {
        Self {
            kind,
            rect,
            z,
            source,
            blend: Blend::Normal,
            opacity: 1.0,
            placement: None,
            anim: AnimSpec::Static,
        }
    }

    pub(crate) fn blend(mut self, blend: Blend) -> Self {
        self.blend = blend;
        self
    }

    pub(crate) fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub(crate) fn placement(mut self, placement: Placement) -> Self {
        self.placement = Some(placement);
        self
    }

    pub(crate) fn anim(mut self, anim: AnimSpec) -> Self {
        self.anim = anim;
        self
    }
}

impl Composition {
    pub(crate) fn new(recipe: Recipe, theme: ColorTheme, image: ImageRef, reserved: PctRect) -> Self {
        Self {
            recipe,
            theme,
            image,
            reserved,
            layers: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, spec: NewLayer) -> LayerId {
        let id = LayerId(self.layers.len() as u32);
        let mut layer = Layer {
            id,
            kind: spec.kind,
            rect: spec.rect,
            z: spec.z,
            source: spec.source,
            blend: spec.blend,
            base_opacity: spec.opacity,
            placement: spec.placement,
            anim: spec.anim,
            state: VisualState::at_rest(spec.opacity, None),
        };
        layer.state = layer.rest_state();
        self.layers.push(layer);
        id
    }

    pub fn recipe_id(&self) -> RecipeId {
        self.recipe.id()
    }

    /// Layers in creation order (index == id).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id.index())
    }

    pub(crate) fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn count_kind(&self, kind: LayerKind) -> usize {
        self.layers.iter().filter(|l| l.kind == kind).count()
    }

    /// Layers sorted back to front: by z, then creation order.
    pub fn painter_order(&self) -> Vec<&Layer> {
        let mut out: Vec<&Layer> = self.layers.iter().collect();
        out.sort_by_key(|l| (l.z, l.id));
        out
    }

    /// Put every layer back to its construction-time state.
    pub(crate) fn reset_states(&mut self) {
        for layer in &mut self.layers {
            layer.state = layer.rest_state();
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/model.rs"]
mod tests;
