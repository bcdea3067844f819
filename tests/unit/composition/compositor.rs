use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::assets::probe::AssumeAvailable;
use crate::composition::recipe::RecipeId;

struct RejectFragments;

impl SourceProbe for RejectFragments {
    fn is_available(&self, src: &ImageRef) -> bool {
        !src.as_str().starts_with('/')
    }
}

fn build(id: RecipeId, seed: u64) -> Composition {
    let mut rng = StdRng::seed_from_u64(seed);
    compose(
        &ImageRef::new("https://example.com/photo.jpg"),
        Recipe::new(id, ColorTheme::White),
        ColorTheme::White,
        &mut rng,
        &AssumeAvailable,
    )
}

#[test]
fn scattered_shapes_has_image_tints_and_shapes() {
    let comp = build(RecipeId::ScatteredShapes, 1);
    assert_eq!(comp.recipe_id(), RecipeId::ScatteredShapes);
    assert_eq!(comp.count_kind(LayerKind::BaseImage), 1);
    assert_eq!(comp.count_kind(LayerKind::TintOverlay), 5);
    let shapes = comp.count_kind(LayerKind::ShapeDot) + comp.count_kind(LayerKind::ShapeRect);
    assert_eq!(shapes, 40);

    for layer in comp.layers() {
        if matches!(layer.kind, LayerKind::ShapeDot | LayerKind::ShapeRect) {
            assert!(!comp.reserved.contains_rect(layer.rect));
            let expected_z = match layer.placement.unwrap() {
                Placement::Front => Z_FRONT,
                Placement::Behind => Z_BEHIND,
            };
            assert_eq!(layer.z, expected_z);
        }
    }
}

#[test]
fn tints_are_full_bleed_screen_layers_starting_invisible() {
    let comp = build(RecipeId::ScatteredShapes, 2);
    let tints: Vec<_> = comp
        .layers()
        .iter()
        .filter(|l| l.kind == LayerKind::TintOverlay)
        .collect();
    for (i, t) in tints.iter().enumerate() {
        assert_eq!(t.rect, PctRect::FULL);
        assert_eq!(t.blend, Blend::Screen);
        assert_eq!(t.state.opacity, 0.0);
        let LayerSource::TintedImage { image, color } = &t.source else {
            panic!("tint is not an image copy: {:?}", t.source);
        };
        assert_eq!(image.as_str(), "https://example.com/photo.jpg");
        assert_eq!(t.base_color(), Some(*color));
        let AnimSpec::Tint(m) = t.anim else {
            panic!("tint without tint animation");
        };
        assert_eq!(m.speed, (i as f64 + 1.0) * 0.5);
        assert_eq!(m.phase, i as f64);
    }
}

#[test]
fn tints_fall_back_to_color_wash_without_image() {
    struct RejectAll;
    impl SourceProbe for RejectAll {
        fn is_available(&self, _: &ImageRef) -> bool {
            false
        }
    }

    let mut rng = StdRng::seed_from_u64(9);
    let comp = compose(
        &ImageRef::new("/gone.png"),
        Recipe::new(RecipeId::FineGridTiles, ColorTheme::Blue),
        ColorTheme::Blue,
        &mut rng,
        &RejectAll,
    );
    let tints: Vec<_> = comp
        .layers()
        .iter()
        .filter(|l| l.kind == LayerKind::TintOverlay)
        .collect();
    assert!(!tints.is_empty());
    for t in tints {
        assert!(matches!(t.source, LayerSource::Color(_)));
    }
}

#[test]
fn fine_grid_omits_reserved_center() {
    let comp = build(RecipeId::FineGridTiles, 3);
    // 24x24 with middle 40% reserved: bands 7..17 on both axes.
    assert_eq!(comp.count_kind(LayerKind::ShapeTile), 24 * 24 - 10 * 10);
}

#[test]
fn collage_uses_fixed_fragment_geometry() {
    let a = build(RecipeId::FragmentCollage, 4);
    let b = build(RecipeId::FragmentCollage, 5);
    let frags = |c: &Composition| -> Vec<PctRect> {
        c.layers()
            .iter()
            .filter(|l| l.kind == LayerKind::ImageFragment)
            .map(|l| l.rect)
            .collect()
    };
    assert_eq!(frags(&a).len(), 7);
    assert_eq!(frags(&a), frags(&b));
    assert_eq!(a.count_kind(LayerKind::Background), 1);

    let focal = a
        .layers()
        .iter()
        .find(|l| l.kind == LayerKind::BaseImage)
        .unwrap();
    assert_eq!(focal.rect, crate::composition::recipe::COLLAGE_FOCAL);

    let Recipe::FragmentCollage { blocks, .. } = &a.recipe else {
        panic!("collage recipe expected");
    };
    let reserved = blocks.reserved_bands().cell_count();
    assert_eq!(reserved, 16 * 30);
    // Grid minus the focal band, plus 6 overlap and 4 accent blocks.
    assert_eq!(a.count_kind(LayerKind::GridBlock), 36 * 36 - reserved + 10);
}

#[test]
fn collage_animated_fragments_pulse() {
    let comp = build(RecipeId::FragmentCollage, 6);
    let pulsing = comp
        .layers()
        .iter()
        .filter(|l| matches!(l.anim, AnimSpec::Pulse { .. }))
        .count();
    assert_eq!(pulsing, 5);
    for l in comp.layers() {
        if let AnimSpec::Pulse { scale, blink } = l.anim {
            assert!((0.5..1.3).contains(&scale.period_s));
            assert!((0.3..0.8).contains(&blink.period_s));
            assert_eq!(l.base_opacity, 0.9);
        }
    }
}

#[test]
fn missing_sources_degrade_to_transparent_layers() {
    let mut rng = StdRng::seed_from_u64(8);
    let comp = compose(
        &ImageRef::new("https://example.com/photo.jpg"),
        Recipe::new(RecipeId::FragmentCollage, ColorTheme::Red),
        ColorTheme::Red,
        &mut rng,
        &RejectFragments,
    );
    let missing: Vec<_> = comp.layers().iter().filter(|l| l.is_missing()).collect();
    assert_eq!(missing.len(), 7);
    assert!(missing.iter().all(|l| l.kind == LayerKind::ImageFragment));
    let focal = comp
        .layers()
        .iter()
        .find(|l| l.kind == LayerKind::BaseImage)
        .unwrap();
    assert!(!focal.is_missing());
}
