use rand::SeedableRng;

use super::*;
use crate::composition::layer::{LayerKind, LayerSource, Motion};
use crate::composition::model::NewLayer;
use crate::composition::recipe::{ColorTheme, Recipe, RecipeId};
use crate::foundation::core::{ImageRef, PctRect, Vec2};

fn recipe_with(edit: impl FnOnce(&mut Timing)) -> Recipe {
    let mut recipe = Recipe::new(RecipeId::ScatteredShapes, ColorTheme::White);
    if let Recipe::ScatteredShapes { timing, .. } = &mut recipe {
        edit(timing);
    }
    recipe
}

fn comp_with(recipe: Recipe, layers: Vec<NewLayer>) -> Composition {
    let mut comp = Composition::new(
        recipe,
        ColorTheme::White,
        ImageRef::new("photo.jpg"),
        PctRect::centered(40.0, 40.0),
    );
    for l in layers {
        comp.push(l);
    }
    comp
}

fn focal() -> NewLayer {
    NewLayer::new(
        LayerKind::BaseImage,
        PctRect::FULL,
        10,
        LayerSource::Image(ImageRef::new("photo.jpg")),
    )
    .anim(AnimSpec::Focal)
}

fn tint(speed: f64, phase: f64) -> NewLayer {
    NewLayer::new(
        LayerKind::TintOverlay,
        PctRect::FULL,
        20,
        LayerSource::Color(Rgb::new(255, 0, 0)),
    )
    .opacity(0.0)
    .anim(AnimSpec::Tint(Motion {
        speed,
        amplitude: 6.0,
        phase,
    }))
}

fn driver(comp: Composition) -> AnimationDriver {
    AnimationDriver::new(comp, StdRng::seed_from_u64(7))
}

#[test]
fn frame_before_start_is_a_noop() {
    let mut d = driver(comp_with(recipe_with(|_| {}), vec![tint(1.0, 0.0)]));
    assert_eq!(d.frame(1.0), FrameStatus::Stopped);
    assert_eq!(d.stats(), DriverStats::default());
}

#[test]
fn tint_drift_and_opacity_follow_wall_clock() {
    let mut d = driver(comp_with(recipe_with(|_| {}), vec![tint(1.5, 0.0)]));
    d.start(0.0);
    let t = 3.25;
    assert_eq!(d.frame(t), FrameStatus::Continue);

    let state = d.composition().layers()[0].state;
    let expected = drift_offset(t, 1.5, 6.0);
    assert!((state.offset - expected).length() < 1e-12);
    assert!((state.opacity - tint_opacity(t)).abs() < 1e-12);
}

#[test]
fn clip_gate_controls_tint_band() {
    let mut d = driver(comp_with(recipe_with(|_| {}), vec![tint(1.0, 0.0)]));
    d.start(0.0);

    // sin(0.2·t) > 0.7 around t = π/0.4 ≈ 7.85.
    d.frame(7.85);
    let clip = d.composition().layers()[0].state.clip.unwrap();
    assert!((0.0..100.0).contains(&clip.top));
    assert_eq!(clip.top.fract(), 0.0);

    d.frame(0.0);
    assert_eq!(d.composition().layers()[0].state.clip, None);
}

#[test]
fn focal_flash_reverts_after_deadline() {
    let recipe = recipe_with(|t| t.image_flash.probability = 1.0);
    let mut d = driver(comp_with(recipe, vec![focal()]));
    d.start(10.0);
    d.frame(10.0);
    assert!(d.composition().layers()[0].state.clip.is_some());
    assert_eq!(d.pending_reverts(), 1);
    assert!((d.next_deadline().unwrap() - 10.1).abs() < 1e-9);

    // A second flash waits until the first one is reverted.
    d.frame(10.05);
    assert_eq!(d.pending_reverts(), 1);

    assert_eq!(d.fire_due(10.05), 0);
    assert_eq!(d.fire_due(10.11), 1);
    assert_eq!(d.composition().layers()[0].state.clip, None);
    assert_eq!(d.stats().reverts_fired, 1);
}

#[test]
fn tile_flash_restores_rest_values() {
    let recipe = recipe_with(|t| t.tile_flash.probability = 1.0);
    let tile = NewLayer::new(
        LayerKind::ShapeTile,
        PctRect::new(0.0, 0.0, 4.2, 4.2),
        30,
        LayerSource::Color(Rgb::new(0, 0, 255)),
    )
    .opacity(0.4)
    .anim(AnimSpec::Tile(Motion {
        speed: 1.0,
        amplitude: 0.6,
        phase: 0.0,
    }));
    let mut d = driver(comp_with(recipe, vec![tile]));
    d.start(0.0);
    d.frame(1.0);

    let flashed = d.composition().layers()[0].state;
    let color_swapped = flashed.color != Some(Rgb::new(0, 0, 255));
    let dimmed = flashed.opacity == FLASH_OPACITY;
    assert!(color_swapped || dimmed);

    assert_eq!(d.fire_due(1.2), 1);
    let state = d.composition().layers()[0].state;
    assert_eq!(state.color, Some(Rgb::new(0, 0, 255)));
    assert_eq!(state.opacity, 0.4);
}

#[test]
fn teardown_with_pending_revert_stops_all_mutation() {
    let recipe = recipe_with(|t| t.image_flash.probability = 1.0);
    let mut d = driver(comp_with(recipe, vec![focal(), tint(0.7, 1.0)]));
    d.start(0.0);
    d.frame(0.016);
    assert_eq!(d.pending_reverts(), 1);

    d.stop();
    let frozen = d.composition().clone();
    let mutations = d.stats().mutations;
    assert_eq!(d.stats().reverts_discarded, 1);

    assert_eq!(d.frame(0.032), FrameStatus::Stopped);
    assert_eq!(d.fire_due(5.0), 0);
    assert_eq!(d.stats().mutations, mutations);
    for (a, b) in frozen.layers().iter().zip(d.composition().layers()) {
        assert_eq!(a.state, b.state);
    }
}

#[test]
fn start_is_idempotent_and_restart_resets_state() {
    let mut d = driver(comp_with(recipe_with(|_| {}), vec![tint(1.0, 0.0)]));
    d.start(0.0);
    d.frame(2.0);
    let epoch = d.epoch();
    d.start(5.0);
    assert!(d.is_running());
    assert_eq!(d.epoch(), epoch);

    d.stop();
    d.stop();
    assert_eq!(d.epoch(), epoch + 1);

    d.start(9.0);
    let state = d.composition().layers()[0].state;
    assert_eq!(state.offset, Vec2::ZERO);
    assert_eq!(state.opacity, 0.0);
}

#[test]
fn flicker_loop_waits_for_its_delay() {
    use crate::animation::keyframes::{Curve, KeyframeLoop, LoopMode};

    let block = NewLayer::new(
        LayerKind::GridBlock,
        PctRect::FULL,
        5,
        LayerSource::Color(Rgb::WHITE),
    )
    .anim(AnimSpec::Flicker(KeyframeLoop::new(
        Curve::Flicker,
        0.8,
        2.0,
        LoopMode::Repeat,
    )));
    let mut d = driver(comp_with(recipe_with(|_| {}), vec![block]));
    d.start(100.0);
    d.frame(101.0);
    assert_eq!(d.composition().layers()[0].state.opacity, 1.0);
    // Half a period past the delay the curve sits at 0.
    d.frame(102.4);
    assert!(d.composition().layers()[0].state.opacity.abs() < 1e-9);
}
