use std::{fmt, str::FromStr};

use crate::{
    animation::oscillate::ClipGate,
    foundation::core::{PctRect, Rgb},
    foundation::error::GlitchError,
    generate::geometry::{GridParams, ShapeParams, Span},
};

/// Available composition strategies.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum RecipeId {
    ScatteredShapes,
    FineGridTiles,
    FragmentCollage,
}

impl RecipeId {
    pub const ALL: [Self; 3] = [
        Self::ScatteredShapes,
        Self::FineGridTiles,
        Self::FragmentCollage,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ScatteredShapes => "scattered-shapes",
            Self::FineGridTiles => "fine-grid-tiles",
            Self::FragmentCollage => "fragment-collage",
        }
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RecipeId {
    type Err = GlitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|r| r.label() == s.trim())
            .ok_or_else(|| GlitchError::validation(format!("unknown recipe '{s}'")))
    }
}

/// Color theme selected by the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    #[default]
    White,
    Blue,
    Red,
}

impl ColorTheme {
    pub const ALL: [Self; 3] = [Self::White, Self::Blue, Self::Red];

    pub fn label(self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Blue => "blue",
            Self::Red => "red",
        }
    }

    /// Five colors used for tints, shapes and tiles.
    pub fn glitch_palette(self) -> Vec<Rgb> {
        let hex: [u32; 5] = match self {
            Self::White => [0xff0000, 0x00ff00, 0x0000ff, 0xffff00, 0x00ffff],
            Self::Blue => [0x0047ff, 0x00a3ff, 0x00e5ff, 0x3d5afe, 0xffffff],
            Self::Red => [0xff1a1a, 0xff6b6b, 0xff00aa, 0xffb199, 0xffffff],
        };
        hex.into_iter().map(rgb_from_u32).collect()
    }

    /// Fill of the collage grid blocks.
    pub fn block_color(self) -> Rgb {
        match self {
            Self::White => Rgb::WHITE,
            Self::Blue => rgb_from_u32(0x1e3cff),
            Self::Red => rgb_from_u32(0xff2a2a),
        }
    }

    pub fn background(self) -> Vec<Rgb> {
        vec![Rgb::WHITE, rgb_from_u32(0xf0f0f0), Rgb::WHITE]
    }
}

impl fmt::Display for ColorTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ColorTheme {
    type Err = GlitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == s.trim())
            .ok_or_else(|| GlitchError::validation(format!("unknown color theme '{s}'")))
    }
}

fn rgb_from_u32(v: u32) -> Rgb {
    Rgb::new((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// A transient state change and how long it lasts.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlashSpec {
    /// Chance per frame (per layer).
    pub probability: f64,
    pub revert_ms: u64,
}

/// Timing constants the driver applies to a recipe's layers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Timing {
    pub tint_amplitude: f64,
    pub shape_amplitude: f64,
    pub tile_amplitude: f64,
    pub clip_gate: ClipGate,
    pub image_flash: FlashSpec,
    pub tile_flash: FlashSpec,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            tint_amplitude: 6.0,
            shape_amplitude: 3.0,
            tile_amplitude: 0.6,
            clip_gate: ClipGate::DEFAULT,
            image_flash: FlashSpec {
                probability: 0.05,
                revert_ms: 100,
            },
            tile_flash: FlashSpec {
                probability: 0.008,
                revert_ms: 150,
            },
        }
    }
}

/// Designed rectangle of the collage's focal image.
pub const COLLAGE_FOCAL: PctRect = PctRect::new(27.78, 11.11, 44.44, 77.78);

/// A recipe: one strategy plus all of its generation and timing constants.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "recipe", rename_all = "kebab-case")]
pub enum Recipe {
    ScatteredShapes {
        palette: Vec<Rgb>,
        shapes: ShapeParams,
        timing: Timing,
    },
    FineGridTiles {
        palette: Vec<Rgb>,
        grid: GridParams,
        timing: Timing,
    },
    FragmentCollage {
        background: Vec<Rgb>,
        focal: PctRect,
        blocks: GridParams,
        /// Share of grid blocks that get a flicker loop.
        flicker_ratio: f64,
        timing: Timing,
    },
}

impl Recipe {
    pub fn new(id: RecipeId, theme: ColorTheme) -> Self {
        let palette = theme.glitch_palette();
        let timing = Timing::default();
        let reserved = PctRect::centered(40.0, 40.0);
        match id {
            RecipeId::ScatteredShapes => Self::ScatteredShapes {
                shapes: ShapeParams {
                    count: 40,
                    palette: palette.clone(),
                    size: Span::new(2.0, 12.0),
                    opacity: Span::new(0.35, 0.9),
                    speed: Span::new(0.3, 1.6),
                    dot_ratio: 0.5,
                    reserved,
                },
                palette,
                timing,
            },
            RecipeId::FineGridTiles => Self::FineGridTiles {
                grid: GridParams {
                    rows: 24,
                    cols: 24,
                    palette: palette.clone(),
                    opacity: Span::new(0.15, 0.6),
                    speed: Span::new(0.5, 2.5),
                    reserved,
                    overlap: 0.05,
                },
                palette,
                timing,
            },
            RecipeId::FragmentCollage => Self::FragmentCollage {
                background: theme.background(),
                focal: COLLAGE_FOCAL,
                blocks: GridParams {
                    rows: 36,
                    cols: 36,
                    palette: vec![theme.block_color()],
                    opacity: Span::fixed(1.0),
                    speed: Span::fixed(0.0),
                    reserved: COLLAGE_FOCAL,
                    overlap: 0.05,
                },
                flicker_ratio: 0.15,
                timing,
            },
        }
    }

    pub fn id(&self) -> RecipeId {
        match self {
            Self::ScatteredShapes { .. } => RecipeId::ScatteredShapes,
            Self::FineGridTiles { .. } => RecipeId::FineGridTiles,
            Self::FragmentCollage { .. } => RecipeId::FragmentCollage,
        }
    }

    pub fn timing(&self) -> &Timing {
        match self {
            Self::ScatteredShapes { timing, .. }
            | Self::FineGridTiles { timing, .. }
            | Self::FragmentCollage { timing, .. } => timing,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/recipe.rs"]
mod tests;
