//! Crystal placement and the player start point.
//!
//! A crystal needs a flat, untouched patch of grass: every cell within
//! `grass_radius` must be grass, the surface may not climb faster than
//! `max_slope` towards eight probes at the full and half radius, and no other
//! crystal may be closer than `min_distance`.

use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use glam::DVec2;
use log::warn;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use super::config::CrystalConfig;
use super::packed::PackedPlacement;
use super::{retry_budget, PlacementReport};
use crate::geometry::neighbors::{offset, CARDINAL};
use crate::terrain::{Material, TerrainGrid};

/// Errors that prevent crystal placement from running at all.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    #[error("Crystal grass radius must be at least 2, got {0}")]
    RadiusTooSmall(u32),
    #[error("Crystal grass radius {radius} does not fit a {size}x{size} grid")]
    RadiusTooLarge { radius: u32, size: usize },
}

/// Crystals placed on a world plus the start point derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct CrystalField {
    pub crystals: Vec<PackedPlacement>,
    /// `None` when no crystal could be placed.
    pub start_point: Option<PackedPlacement>,
    pub report: PlacementReport,
}

/// Coordinates at which a disc of `radius` plus its probes stays inside the
/// grid with a one-cell margin.
fn candidate_span(size: usize, radius: usize) -> Option<RangeInclusive<usize>> {
    let lo = radius + 1;
    let hi = size.checked_sub(radius + 2)?;
    (lo <= hi).then_some(lo..=hi)
}

/// True if the surface slope from `(x, y)` to every probe is within `max_slope`.
fn slope_ok(grid: &TerrainGrid, x: usize, y: usize, radius: usize, max_slope: f64) -> bool {
    let here = f64::from(grid.top(x, y));
    [radius, radius / 2].into_iter().all(|d| {
        CARDINAL.iter().all(|&(dx, dy)| {
            offset(grid.size, x, y, dx * d as isize, dy * d as isize).is_some_and(|(px, py)| {
                ((here - f64::from(grid.top(px, py))) / d as f64).abs() <= max_slope
            })
        })
    })
}

/// True if every cell within `radius` of `(x, y)` is grass.
fn disc_is_grass(grid: &TerrainGrid, x: usize, y: usize, radius: usize) -> bool {
    let r = radius as isize;
    (-r..=r).all(|dy| {
        (-r..=r).all(|dx| {
            dx * dx + dy * dy > r * r
                || offset(grid.size, x, y, dx, dy).is_some_and(|(px, py)| grid.material(px, py) == Material::Grass)
        })
    })
}

/// Picks the start point at `distance` from `first` in a random direction.
///
/// The offset is truncated towards zero and clamped into the grid.
pub fn derive_start_point(
    grid: &TerrainGrid,
    first: PackedPlacement,
    distance: f64,
    rng: &mut impl Rng,
) -> PackedPlacement {
    let angle = rng.random::<f64>() * TAU;
    let step = DVec2::from_angle(angle) * distance;
    let max = (grid.size - 1) as i64;
    let x = (i64::from(first.x()) + step.x as i64).clamp(0, max) as usize;
    let y = (i64::from(first.y()) + step.y as i64).clamp(0, max) as usize;
    PackedPlacement::at_surface(x, y, grid.top(x, y))
}

/// Places crystals by rejection sampling and derives the start point.
///
/// Does not modify the grid. Running out of the retry budget is reported as
/// a shortfall; with no crystals at all the start point is `None`.
pub fn grow_crystals(grid: &TerrainGrid, config: &CrystalConfig) -> Result<CrystalField, PlacementError> {
    if config.grass_radius < 2 {
        return Err(PlacementError::RadiusTooSmall(config.grass_radius));
    }
    let radius = config.grass_radius as usize;
    let span = candidate_span(grid.size, radius).ok_or(PlacementError::RadiusTooLarge {
        radius: config.grass_radius,
        size: grid.size,
    })?;

    let mut rng = ChaCha8Rng::seed_from_u64(u64::from(config.seed));
    let budget = retry_budget(grid.size);
    let target = config.count as usize;
    let min_distance_sq = u64::from(config.min_distance).pow(2);

    let mut crystals: Vec<PackedPlacement> = Vec::with_capacity(target.min(grid.cell_count()));
    let mut attempts = 0u64;

    while crystals.len() < target && attempts < budget {
        attempts += 1;
        let x = rng.random_range(span.clone());
        let y = rng.random_range(span.clone());

        if grid.material(x, y) != Material::Grass {
            continue;
        }
        if crystals.iter().any(|c| c.distance_sq(x, y) < min_distance_sq) {
            continue;
        }
        if !slope_ok(grid, x, y, radius, config.max_slope) {
            continue;
        }
        if !disc_is_grass(grid, x, y, radius) {
            continue;
        }

        crystals.push(PackedPlacement::at_surface(x, y, grid.top(x, y)));
    }

    let report = PlacementReport {
        requested: config.count,
        placed: crystals.len() as u32,
        attempts,
    };
    if report.is_shortfall() {
        warn!("could only grow {} of {} crystals", report.placed, report.requested);
    }

    let start_point = crystals
        .first()
        .map(|&first| derive_start_point(grid, first, config.start_point_distance, &mut rng));
    if start_point.is_none() {
        warn!("no crystals placed, start point will be invalid");
    }

    Ok(CrystalField {
        crystals,
        start_point,
        report,
    })
}
