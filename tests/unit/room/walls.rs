use super::*;

#[test]
fn custom_text_fills_walls_in_order() {
    let w = WallText::from_text("  hello   big\tworld ");
    assert_eq!(w.get(WallSide::Front), "hello");
    assert_eq!(w.get(WallSide::Back), "big");
    assert_eq!(w.get(WallSide::Left), "world");
    assert_eq!(w.get(WallSide::Right), "MORE");
    assert_eq!(w.get(WallSide::Floor), "2023");
}

#[test]
fn empty_text_uses_defaults() {
    let w = WallText::default();
    assert_eq!(
        [w.front.as_str(), w.back.as_str(), w.left.as_str(), w.right.as_str()],
        DEFAULT_WORDS
    );
}

#[test]
fn only_side_walls_are_vertical() {
    let vertical: Vec<_> = WallSide::ALL.into_iter().filter(|s| s.is_vertical()).collect();
    assert_eq!(vertical, vec![WallSide::Left, WallSide::Right]);
}
