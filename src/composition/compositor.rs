use rand::Rng;
use tracing::{debug, warn};

use crate::{
    animation::keyframes::{Curve, KeyframeLoop, LoopMode},
    assets::probe::SourceProbe,
    composition::layer::{AnimSpec, Blend, LayerKind, LayerSource, Motion},
    composition::model::{Composition, NewLayer},
    composition::recipe::{ColorTheme, Recipe, Timing},
    foundation::core::{ImageRef, PctRect, Rgb},
    generate::geometry::{
        GridParams, Placement, ShapeKind, ShapeParams, generate_grid, generate_shapes,
    },
};

const Z_BACKGROUND: i32 = 0;
const Z_BEHIND: i32 = 5;
const Z_FOCAL: i32 = 10;
const Z_OVERLAP: i32 = 12;
const Z_ACCENT: i32 = 15;
const Z_TINT: i32 = 20;
const Z_FRONT: i32 = 30;

/// A designed, non-random image fragment of the collage.
struct Fragment {
    rect: PctRect,
    z: i32,
    src: &'static str,
    animate: bool,
}

const FRAGMENTS: [Fragment; 7] = [
    Fragment {
        rect: PctRect::new(63.44, 3.78, 16.67, 22.22),
        z: 15,
        src: "/red1.png",
        animate: true,
    },
    Fragment {
        rect: PctRect::new(15.44, 55.78, 25.67, 25.22),
        z: 15,
        src: "/redhue2.png",
        animate: true,
    },
    Fragment {
        rect: PctRect::new(32.44, 5.78, 35.67, 19.0),
        z: 20,
        src: "/showblue.png",
        animate: false,
    },
    Fragment {
        rect: PctRect::new(5.44, 78.5, 25.67, 19.0),
        z: 25,
        src: "/logoblue.png",
        animate: false,
    },
    Fragment {
        rect: PctRect::new(60.44, 72.78, 18.67, 30.22),
        z: 15,
        src: "/blue3.png",
        animate: true,
    },
    Fragment {
        rect: PctRect::new(60.44, 32.78, 18.67, 30.22),
        z: 15,
        src: "/blueimg.png",
        animate: true,
    },
    Fragment {
        rect: PctRect::new(15.44, 20.0, 25.67, 22.22),
        z: 16,
        src: "/redimg2.png",
        animate: true,
    },
];

/// Blocks bleeding into the focal image's edges.
const OVERLAP_BLOCKS: [PctRect; 6] = [
    PctRect::new(27.78, 25.22, 5.11, 44.44),
    PctRect::new(27.78, 83.4, 11.11, 5.44),
    PctRect::new(67.11, 37.33, 5.11, 23.33),
    PctRect::new(53.89, 11.11, 19.22, 5.11),
    PctRect::new(20.89, 16.11, 22.22, 5.11),
    PctRect::new(50.44, 81.78, 22.67, 14.11),
];

/// Large corner accents.
const ACCENT_BLOCKS: [PctRect; 4] = [
    PctRect::new(0.0, 0.0, 22.32, 11.21),
    PctRect::new(77.78, 0.0, 22.32, 16.77),
    PctRect::new(0.0, 88.89, 16.77, 11.21),
    PctRect::new(88.89, 77.78, 11.21, 22.32),
];

/// Assemble a fresh composition for `recipe` over `image`.
///
/// Missing sources become transparent layers; nothing here fails.
#[tracing::instrument(skip_all, fields(recipe = %recipe.id(), theme = %theme))]
pub fn compose<R: Rng + ?Sized>(
    image: &ImageRef,
    recipe: Recipe,
    theme: ColorTheme,
    rng: &mut R,
    probe: &dyn SourceProbe,
) -> Composition {
    let reserved = match &recipe {
        Recipe::ScatteredShapes { shapes, .. } => shapes.reserved,
        Recipe::FineGridTiles { grid, .. } => grid.reserved,
        Recipe::FragmentCollage { focal, .. } => *focal,
    };
    let mut comp = Composition::new(recipe.clone(), theme, image.clone(), reserved);
    let timing = *recipe.timing();

    match &recipe {
        Recipe::ScatteredShapes {
            palette, shapes, ..
        } => {
            push_focal(&mut comp, image, PctRect::FULL, AnimSpec::Focal, probe);
            push_tints(&mut comp, image, palette, &timing, probe);
            push_shapes(&mut comp, rng, shapes, &timing);
        }
        Recipe::FineGridTiles { palette, grid, .. } => {
            push_focal(&mut comp, image, PctRect::FULL, AnimSpec::Focal, probe);
            push_tints(&mut comp, image, palette, &timing, probe);
            push_tiles(&mut comp, rng, grid, &timing);
        }
        Recipe::FragmentCollage {
            background,
            focal,
            blocks,
            flicker_ratio,
            ..
        } => {
            comp.push(NewLayer::new(
                LayerKind::Background,
                PctRect::FULL,
                Z_BACKGROUND,
                LayerSource::Gradient(background.clone()),
            ));
            push_focal(&mut comp, image, *focal, AnimSpec::Static, probe);
            push_fragments(&mut comp, rng, probe);
            push_blocks(&mut comp, rng, blocks, *flicker_ratio);
        }
    }

    debug!(layers = comp.len(), "composition built");
    comp
}

fn resolve(src: &ImageRef, probe: &dyn SourceProbe) -> LayerSource {
    if probe.is_available(src) {
        LayerSource::Image(src.clone())
    } else {
        warn!(source = %src, "image source unavailable; layer left transparent");
        LayerSource::Missing
    }
}

// Unavailable images leave the bare color wash.
fn tinted(image: &ImageRef, color: Rgb, available: bool) -> LayerSource {
    if available {
        LayerSource::TintedImage {
            image: image.clone(),
            color,
        }
    } else {
        LayerSource::Color(color)
    }
}

fn push_focal(
    comp: &mut Composition,
    image: &ImageRef,
    rect: PctRect,
    anim: AnimSpec,
    probe: &dyn SourceProbe,
) {
    comp.push(
        NewLayer::new(LayerKind::BaseImage, rect, Z_FOCAL, resolve(image, probe)).anim(anim),
    );
}

fn push_tints(
    comp: &mut Composition,
    image: &ImageRef,
    palette: &[Rgb],
    timing: &Timing,
    probe: &dyn SourceProbe,
) {
    let available = probe.is_available(image);
    for (i, color) in palette.iter().enumerate() {
        let n = i as f64;
        comp.push(
            NewLayer::new(
                LayerKind::TintOverlay,
                PctRect::FULL,
                Z_TINT,
                tinted(image, *color, available),
            )
            .blend(Blend::Screen)
            .opacity(0.0)
            .anim(AnimSpec::Tint(Motion {
                speed: (n + 1.0) * 0.5,
                amplitude: timing.tint_amplitude,
                phase: n,
            })),
        );
    }
}

fn push_shapes<R: Rng + ?Sized>(
    comp: &mut Composition,
    rng: &mut R,
    params: &ShapeParams,
    timing: &Timing,
) {
    for shape in generate_shapes(rng, params) {
        let kind = match shape.kind {
            ShapeKind::Dot => LayerKind::ShapeDot,
            ShapeKind::Rect => LayerKind::ShapeRect,
        };
        let z = match shape.placement {
            Placement::Front => Z_FRONT,
            Placement::Behind => Z_BEHIND,
        };
        comp.push(
            NewLayer::new(kind, shape.rect, z, LayerSource::Color(shape.color))
                .opacity(shape.opacity)
                .placement(shape.placement)
                .anim(AnimSpec::Shape(Motion {
                    speed: shape.speed,
                    amplitude: timing.shape_amplitude,
                    phase: shape.phase,
                })),
        );
    }
}

fn push_tiles<R: Rng + ?Sized>(
    comp: &mut Composition,
    rng: &mut R,
    params: &GridParams,
    timing: &Timing,
) {
    for tile in generate_grid(rng, params) {
        comp.push(
            NewLayer::new(
                LayerKind::ShapeTile,
                tile.rect,
                Z_FRONT,
                LayerSource::Color(tile.color),
            )
            .opacity(tile.opacity)
            .anim(AnimSpec::Tile(Motion {
                speed: tile.speed,
                amplitude: timing.tile_amplitude,
                phase: tile.phase,
            })),
        );
    }
}

fn push_fragments<R: Rng + ?Sized>(comp: &mut Composition, rng: &mut R, probe: &dyn SourceProbe) {
    for frag in &FRAGMENTS {
        let source = resolve(&ImageRef::new(frag.src), probe);
        let layer = NewLayer::new(LayerKind::ImageFragment, frag.rect, frag.z, source);
        let layer = if frag.animate {
            let scale = KeyframeLoop::new(
                Curve::PulseScale,
                rng.random_range(0.5..1.3),
                0.0,
                LoopMode::PingPong,
            );
            let blink = KeyframeLoop::new(
                Curve::Blink,
                rng.random_range(0.3..0.8),
                0.0,
                LoopMode::Repeat,
            );
            layer.opacity(0.9).anim(AnimSpec::Pulse { scale, blink })
        } else {
            layer
        };
        comp.push(layer);
    }
}

fn push_blocks<R: Rng + ?Sized>(
    comp: &mut Composition,
    rng: &mut R,
    params: &GridParams,
    flicker_ratio: f64,
) {
    for tile in generate_grid(rng, params) {
        let layer = NewLayer::new(
            LayerKind::GridBlock,
            tile.rect,
            Z_BEHIND,
            LayerSource::Color(tile.color),
        )
        .opacity(tile.opacity);
        let layer = if rng.random_bool(flicker_ratio.clamp(0.0, 1.0)) {
            layer.anim(AnimSpec::Flicker(KeyframeLoop::new(
                Curve::Flicker,
                rng.random_range(0.3..0.8),
                rng.random_range(0.0..5.0),
                LoopMode::Repeat,
            )))
        } else {
            layer
        };
        comp.push(layer);
    }

    let block_color = params.palette.first().copied().unwrap_or(Rgb::WHITE);
    for rect in OVERLAP_BLOCKS {
        comp.push(flicker_block(rect, Z_OVERLAP, block_color, 0.6, rng.random_range(0.0..2.0)));
    }
    for rect in ACCENT_BLOCKS {
        comp.push(flicker_block(rect, Z_ACCENT, block_color, 0.8, rng.random_range(0.0..3.0)));
    }
}

fn flicker_block(rect: PctRect, z: i32, color: Rgb, period_s: f64, delay_s: f64) -> NewLayer {
    NewLayer::new(LayerKind::GridBlock, rect, z, LayerSource::Color(color)).anim(AnimSpec::Flicker(
        KeyframeLoop::new(Curve::Flicker, period_s, delay_s, LoopMode::Repeat),
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/composition/compositor.rs"]
mod tests;
