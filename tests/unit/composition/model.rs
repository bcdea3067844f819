use super::*;
use crate::foundation::core::{Rgb, Vec2};

fn empty_comp() -> Composition {
    Composition::new(
        Recipe::new(RecipeId::ScatteredShapes, ColorTheme::White),
        ColorTheme::White,
        ImageRef::new("photo.jpg"),
        PctRect::centered(40.0, 40.0),
    )
}

#[test]
fn push_assigns_sequential_ids_and_rest_state() {
    let mut comp = empty_comp();
    let a = comp.push(NewLayer::new(
        LayerKind::BaseImage,
        PctRect::FULL,
        10,
        LayerSource::Image(ImageRef::new("photo.jpg")),
    ));
    let b = comp.push(
        NewLayer::new(
            LayerKind::ShapeDot,
            PctRect::new(1.0, 2.0, 3.0, 3.0),
            5,
            LayerSource::Color(Rgb::new(255, 0, 0)),
        )
        .opacity(0.4),
    );
    assert_eq!(a, LayerId(0));
    assert_eq!(b, LayerId(1));

    let dot = comp.layer(b).unwrap();
    assert_eq!(dot.state.opacity, 0.4);
    assert_eq!(dot.state.color, Some(Rgb::new(255, 0, 0)));
    assert_eq!(dot.state.offset, Vec2::ZERO);
    assert_eq!(comp.layer(a).unwrap().state.color, None);
}

#[test]
fn opacity_is_clamped_at_construction() {
    let mut comp = empty_comp();
    let id = comp.push(
        NewLayer::new(LayerKind::TintOverlay, PctRect::FULL, 1, LayerSource::Missing).opacity(3.0),
    );
    assert_eq!(comp.layer(id).unwrap().base_opacity, 1.0);
}

#[test]
fn painter_order_sorts_by_z_then_id() {
    let mut comp = empty_comp();
    let src = || LayerSource::Color(Rgb::WHITE);
    let high = comp.push(NewLayer::new(LayerKind::ShapeRect, PctRect::FULL, 20, src()));
    let low = comp.push(NewLayer::new(LayerKind::ShapeRect, PctRect::FULL, 0, src()));
    let tie = comp.push(NewLayer::new(LayerKind::ShapeRect, PctRect::FULL, 0, src()));
    let order: Vec<LayerId> = comp.painter_order().iter().map(|l| l.id).collect();
    assert_eq!(order, vec![low, tie, high]);
    assert_eq!(comp.count_kind(LayerKind::ShapeRect), 3);
}

#[test]
fn reset_states_restores_rest_values() {
    let mut comp = empty_comp();
    let id = comp.push(NewLayer::new(
        LayerKind::ShapeTile,
        PctRect::FULL,
        0,
        LayerSource::Color(Rgb::WHITE),
    ));
    {
        let l = comp.layer_mut(id).unwrap();
        l.state.opacity = 0.0;
        l.state.color = Some(Rgb::BLACK);
        l.state.offset = Vec2::new(3.0, 4.0);
    }
    comp.reset_states();
    let l = comp.layer(id).unwrap();
    assert_eq!(l.state, l.rest_state());
}

#[test]
fn composition_serializes_layers() {
    let mut comp = empty_comp();
    comp.push(NewLayer::new(
        LayerKind::GridBlock,
        PctRect::new(0.0, 0.0, 2.8, 2.8),
        5,
        LayerSource::Color(Rgb::WHITE),
    ));
    let v = serde_json::to_value(&comp).unwrap();
    assert_eq!(v["layers"][0]["kind"], "grid-block");
    assert_eq!(v["recipe"]["recipe"], "scattered-shapes");
    let back: Composition = serde_json::from_value(v).unwrap();
    assert_eq!(back.len(), 1);
}
