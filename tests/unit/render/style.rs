use super::*;
use crate::composition::model::NewLayer;
use crate::composition::recipe::{ColorTheme, Recipe};
use crate::foundation::core::{ClipInset, PctRect, Vec2};

fn comp() -> Composition {
    Composition::new(
        Recipe::new(RecipeId::FragmentCollage, ColorTheme::White),
        ColorTheme::White,
        ImageRef::new("photo.jpg"),
        PctRect::centered(40.0, 40.0),
    )
}

#[test]
fn styles_follow_painter_order() {
    let mut c = comp();
    let top = c.push(NewLayer::new(
        LayerKind::ShapeRect,
        PctRect::new(1.0, 2.0, 3.0, 4.0),
        30,
        LayerSource::Color(Rgb::new(255, 0, 0)),
    ));
    let bottom = c.push(NewLayer::new(
        LayerKind::Background,
        PctRect::FULL,
        0,
        LayerSource::Gradient(vec![Rgb::WHITE, Rgb::new(0xf0, 0xf0, 0xf0)]),
    ));
    let styles = render_styles(&c);
    let ids: Vec<LayerId> = styles.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![bottom, top]);
    assert_eq!(
        styles[0].fill,
        Fill::Gradient("linear-gradient(to right, #ffffff, #f0f0f0)".to_string())
    );
    assert_eq!(styles[1].left, 1.0);
    assert_eq!(styles[1].height, 4.0);
}

#[test]
fn state_drives_transform_clip_and_color() {
    let mut c = comp();
    let id = c.push(
        NewLayer::new(
            LayerKind::ShapeTile,
            PctRect::FULL,
            30,
            LayerSource::Color(Rgb::new(0, 0, 255)),
        )
        .opacity(0.5),
    );
    {
        let l = c.layer_mut(id).unwrap();
        l.state.offset = Vec2::new(1.5, -2.0);
        l.state.scale = 1.05;
        l.state.clip = Some(ClipInset::band(12.0, 40.0));
        l.state.color = Some(Rgb::BLACK);
    }
    let s = layer_style(c.layer(id).unwrap());
    assert_eq!(s.transform, "translate(1.5%, -2%) scale(1.05)");
    assert_eq!(s.clip_path.as_deref(), Some("inset(12% 0 40% 0)"));
    assert_eq!(s.fill, Fill::Color("#000000".to_string()));
    assert_eq!(s.opacity, 0.5);
}

#[test]
fn missing_source_is_transparent() {
    let mut c = comp();
    let id = c.push(NewLayer::new(
        LayerKind::ImageFragment,
        PctRect::new(60.0, 30.0, 18.0, 30.0),
        15,
        LayerSource::Missing,
    ));
    let s = layer_style(c.layer(id).unwrap());
    assert_eq!(s.opacity, 0.0);
    assert_eq!(s.fill, Fill::Transparent);
}

#[test]
fn snapshot_serializes_without_inactive_clip() {
    let mut c = comp();
    c.push(NewLayer::new(
        LayerKind::BaseImage,
        PctRect::FULL,
        10,
        LayerSource::Image(ImageRef::new("photo.jpg")),
    ));
    let snap = FrameSnapshot::capture(&c, 1.25);
    let v = serde_json::to_value(&snap).unwrap();
    assert_eq!(v["recipe"], "fragment-collage");
    assert_eq!(v["styles"][0]["fill"]["type"], "image");
    assert_eq!(v["styles"][0]["fill"]["value"], "photo.jpg");
    assert!(v["styles"][0].get("clip_path").is_none());
}

#[test]
fn tinted_image_keeps_picture_and_color() {
    let mut c = comp();
    c.push(
        NewLayer::new(
            LayerKind::TintOverlay,
            PctRect::FULL,
            20,
            LayerSource::TintedImage {
                image: ImageRef::new("photo.jpg"),
                color: Rgb::new(0, 0xff, 0xff),
            },
        )
        .blend(Blend::Screen),
    );
    let styles = render_styles(&c);
    assert_eq!(
        styles[0].fill,
        Fill::TintedImage {
            image: ImageRef::new("photo.jpg"),
            color: "#00ffff".to_string(),
        }
    );
    let v = serde_json::to_value(&styles[0]).unwrap();
    assert_eq!(v["fill"]["type"], "tinted-image");
    assert_eq!(v["fill"]["value"]["image"], "photo.jpg");
    assert_eq!(v["fill"]["value"]["color"], "#00ffff");
    assert_eq!(v["blend"], "screen");
}
