/// Words shown when custom text runs out, in wall order.
pub const DEFAULT_WORDS: [&str; 4] = ["ONE", "MORE", "ONE", "MORE"];

/// Text painted on the floor.
pub const FLOOR_TEXT: &str = "2023";

/// Simulated depth between consecutive reveal levels, in CSS pixels.
pub const DEPTH_STEP: f64 = 200.0;

/// Words unlocked per reveal level, shallowest first.
pub const DEPTH_SETS: [&[&str]; 6] = [
    &["AGAIN", "AND", "AGAIN"],
    &["DEEPER", "STILL"],
    &["NO", "EXIT"],
    &["ECHO", "ECHO", "ECHO"],
    &["SIGNAL", "LOST"],
    &["ONE", "MORE", "TIME"],
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WallSide {
    Front,
    Back,
    Left,
    Right,
    Floor,
}

impl WallSide {
    pub const ALL: [Self; 5] = [Self::Front, Self::Back, Self::Left, Self::Right, Self::Floor];

    /// Fold of the wall plane around its anchored edge.
    pub fn fold(self) -> &'static str {
        match self {
            Self::Front => "rotateX(90deg)",
            Self::Back => "rotateX(-90deg)",
            Self::Left => "rotateY(-90deg)",
            Self::Right => "rotateY(90deg)",
            Self::Floor => "",
        }
    }

    pub fn origin(self) -> &'static str {
        match self {
            Self::Front => "bottom",
            Self::Back => "top",
            Self::Left => "left",
            Self::Right => "right",
            Self::Floor => "center",
        }
    }

    /// Side walls run their text vertically.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Labels of the five base walls.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WallText {
    pub front: String,
    pub back: String,
    pub left: String,
    pub right: String,
    pub floor: String,
}

impl WallText {
    /// Split `text` on whitespace; the first four tokens label front, back,
    /// left and right. Extra tokens are ignored.
    pub fn from_text(text: &str) -> Self {
        let mut tokens = text.split_whitespace();
        let mut next = |fallback: &str| tokens.next().unwrap_or(fallback).to_string();
        Self {
            front: next(DEFAULT_WORDS[0]),
            back: next(DEFAULT_WORDS[1]),
            left: next(DEFAULT_WORDS[2]),
            right: next(DEFAULT_WORDS[3]),
            floor: FLOOR_TEXT.to_string(),
        }
    }

    pub fn get(&self, side: WallSide) -> &str {
        match side {
            WallSide::Front => &self.front,
            WallSide::Back => &self.back,
            WallSide::Left => &self.left,
            WallSide::Right => &self.right,
            WallSide::Floor => &self.floor,
        }
    }
}

impl Default for WallText {
    fn default() -> Self {
        Self::from_text("")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/room/walls.rs"]
mod tests;
