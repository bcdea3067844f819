use std::ops::Range;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::foundation::core::{PctRect, Rgb};
use crate::foundation::math::pct_span_to_cells;

/// Redraws allowed before a shape is pushed off the reserved center.
const MAX_PLACEMENT_ATTEMPTS: usize = 16;

/// Closed numeric range sampled uniformly.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub const fn fixed(v: f64) -> Self {
        Self { min: v, max: v }
    }

    pub fn sample<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        if self.max > self.min {
            rng.random_range(self.min..=self.max)
        } else {
            self.min
        }
    }

    pub fn contains(self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Inputs for a scattered batch of decorative shapes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeParams {
    pub count: usize,
    pub palette: Vec<Rgb>,
    /// Edge length in percent of the container.
    pub size: Span,
    pub opacity: Span,
    /// Angular speed in radians per second.
    pub speed: Span,
    /// Probability that a shape is a dot rather than a rectangle.
    pub dot_ratio: f64,
    /// Area no shape may sit entirely inside.
    pub reserved: PctRect,
}

/// Inputs for a rows×cols tile grid with a reserved center band.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GridParams {
    pub rows: u32,
    pub cols: u32,
    pub palette: Vec<Rgb>,
    pub opacity: Span,
    pub speed: Span,
    /// Percent rectangle translated into a row band and a column band.
    pub reserved: PctRect,
    /// Extra width/height added to every cell so neighbours overlap and no seams show.
    pub overlap: f64,
}

impl GridParams {
    /// Row and column bands left empty by [`generate_grid`].
    pub fn reserved_bands(&self) -> ReservedBands {
        let (r0, r1) = pct_span_to_cells(self.reserved.top, self.reserved.bottom(), self.rows);
        let (c0, c1) = pct_span_to_cells(self.reserved.left, self.reserved.right(), self.cols);
        ReservedBands {
            rows: r0..r1,
            cols: c0..c1,
        }
    }
}

/// Half-open cell bands of the reserved center.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReservedBands {
    pub rows: Range<u32>,
    pub cols: Range<u32>,
}

impl ReservedBands {
    pub fn covers(&self, row: u32, col: u32) -> bool {
        self.rows.contains(&row) && self.cols.contains(&col)
    }

    pub fn cell_count(&self) -> usize {
        self.rows.len() * self.cols.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShapeKind {
    Dot,
    Rect,
}

/// Whether a generated layer sits above or below the focal subject.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Placement {
    Front,
    Behind,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ShapeDescriptor {
    pub kind: ShapeKind,
    pub rect: PctRect,
    pub color: Rgb,
    pub opacity: f64,
    pub speed: f64,
    pub phase: f64,
    pub placement: Placement,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TileDescriptor {
    pub row: u32,
    pub col: u32,
    pub rect: PctRect,
    pub color: Rgb,
    pub opacity: f64,
    pub speed: f64,
    pub phase: f64,
}

/// Generate `params.count` shapes, none of which hides entirely inside the reserved center.
pub fn generate_shapes<R: Rng + ?Sized>(rng: &mut R, params: &ShapeParams) -> Vec<ShapeDescriptor> {
    let mut out = Vec::with_capacity(params.count);
    for _ in 0..params.count {
        let kind = if rng.random_bool(params.dot_ratio.clamp(0.0, 1.0)) {
            ShapeKind::Dot
        } else {
            ShapeKind::Rect
        };

        let mut rect = random_rect(rng, kind, params.size);
        let mut attempts = 1;
        while params.reserved.contains_rect(rect) && attempts < MAX_PLACEMENT_ATTEMPTS {
            rect = random_rect(rng, kind, params.size);
            attempts += 1;
        }
        if params.reserved.contains_rect(rect) {
            rect = push_out(rect, params.reserved);
        }

        out.push(ShapeDescriptor {
            kind,
            rect,
            color: pick_color(rng, &params.palette),
            opacity: params.opacity.sample(rng),
            speed: params.speed.sample(rng),
            phase: rng.random_range(0.0..std::f64::consts::TAU),
            placement: if rng.random_bool(0.5) {
                Placement::Front
            } else {
                Placement::Behind
            },
        });
    }
    out
}

/// Generate one tile per grid cell, skipping cells inside the reserved bands.
///
/// Reserved bounds larger than the grid leave nothing; callers are expected to
/// keep them inside the container.
pub fn generate_grid<R: Rng + ?Sized>(rng: &mut R, params: &GridParams) -> Vec<TileDescriptor> {
    let bands = params.reserved_bands();
    let cell_w = 100.0 / f64::from(params.cols.max(1));
    let cell_h = 100.0 / f64::from(params.rows.max(1));

    let total = (params.rows as usize) * (params.cols as usize);
    let mut out = Vec::with_capacity(total.saturating_sub(bands.cell_count()));
    for row in 0..params.rows {
        for col in 0..params.cols {
            if bands.covers(row, col) {
                continue;
            }
            out.push(TileDescriptor {
                row,
                col,
                rect: PctRect::new(
                    f64::from(col) * cell_w,
                    f64::from(row) * cell_h,
                    cell_w + params.overlap,
                    cell_h + params.overlap,
                ),
                color: pick_color(rng, &params.palette),
                opacity: params.opacity.sample(rng),
                speed: params.speed.sample(rng),
                phase: rng.random_range(0.0..std::f64::consts::TAU),
            });
        }
    }
    out
}

fn random_rect<R: Rng + ?Sized>(rng: &mut R, kind: ShapeKind, size: Span) -> PctRect {
    let width = size.sample(rng);
    let height = match kind {
        ShapeKind::Dot => width,
        ShapeKind::Rect => size.sample(rng),
    };
    let left = random_offset(rng, 100.0 - width);
    let top = random_offset(rng, 100.0 - height);
    PctRect::new(left, top, width, height)
}

fn random_offset<R: Rng + ?Sized>(rng: &mut R, max: f64) -> f64 {
    if max > 0.0 {
        rng.random_range(0.0..max)
    } else {
        0.0
    }
}

// Straddle the nearer vertical edge of the reserved area, or the nearer
// horizontal edge when the container has no room at the sides.
fn push_out(rect: PctRect, reserved: PctRect) -> PctRect {
    let straddle = |pos: f64, size: f64, lo: f64, extent: f64| {
        let edge = if pos + size / 2.0 < lo + extent / 2.0 {
            lo
        } else {
            lo + extent
        };
        (edge - size / 2.0).clamp(0.0, (100.0 - size).max(0.0))
    };

    let sideways = PctRect {
        left: straddle(rect.left, rect.width, reserved.left, reserved.width),
        ..rect
    };
    if !reserved.contains_rect(sideways) {
        return sideways;
    }
    PctRect {
        top: straddle(rect.top, rect.height, reserved.top, reserved.height),
        ..rect
    }
}

fn pick_color<R: Rng + ?Sized>(rng: &mut R, palette: &[Rgb]) -> Rgb {
    palette.choose(rng).copied().unwrap_or(Rgb::WHITE)
}

#[cfg(test)]
#[path = "../../tests/unit/generate/geometry.rs"]
mod tests;
