// Dense 2D tile grid for the campus.
//
// The grid is stored as a flat `Vec<Tile>` indexed by `x + y * size`, giving
// O(1) read/write. Out-of-bounds reads return `None`; out-of-bounds writes are
// no-ops. The grid is allocated once at campaign start and never resized.
//
// Besides storage, this module owns the only autonomous tile mutation in the
// sim: `advance_growth`, which rolls each seed/sapling tile forward along its
// species chain (see `catalog::GROWTH_CHAINS`). It also aggregates the
// per-tick `BuildingCounts` snapshot that every engine downstream of the grid
// reads from.
//
// Iteration order is always row-major (y outer, x inner). The growth step and
// the visitor target scan both depend on this order for reproducible draws
// and tie-breaking.

use crate::catalog::{self, BuildingCatalog, CENTERPIECE};
use crate::config::{GrowthParams, SimConfig};
use crate::types::{BuildingType, GridCoord, Orientation};
use campus_prng::RandomSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    /// The occupying building, or `None` for an empty tile.
    pub building: Option<BuildingType>,
    /// Growth progress (0–100) for seeds and saplings; visual variety otherwise.
    pub variant: u8,
    pub orientation: Orientation,
}

/// Fixed-size square campus grid.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CampusGrid {
    /// Flat storage: index = x + y * size.
    tiles: Vec<Tile>,
    pub size: u32,
}

impl CampusGrid {
    /// Create an empty grid.
    pub fn new(size: u32) -> Self {
        let total = size as usize * size as usize;
        Self {
            tiles: vec![Tile::default(); total],
            size,
        }
    }

    /// Create the opening campus: the centerpiece in the middle and a sparse
    /// ring of mature trees far from it.
    pub fn generate<R: RandomSource>(config: &SimConfig, rng: &mut R) -> Self {
        let mut grid = Self::new(config.grid_size);
        let center = grid.center();
        let scatter = &config.opening_trees;

        for y in 0..grid.size as i32 {
            for x in 0..grid.size as i32 {
                let coord = GridCoord::new(x, y);
                let building = if coord == center {
                    Some(CENTERPIECE)
                } else {
                    let dx = f64::from(x - center.x);
                    let dy = f64::from(y - center.y);
                    let dist = (dx * dx + dy * dy).sqrt();
                    if dist > scatter.min_distance && rng.random_bool(scatter.chance) {
                        if rng.random_bool(scatter.oak_fraction) {
                            Some(BuildingType::OakTree)
                        } else {
                            Some(BuildingType::PineTree)
                        }
                    } else {
                        None
                    }
                };
                if let Some(building) = building {
                    grid.set(
                        coord,
                        Tile {
                            building: Some(building),
                            variant: 100,
                            orientation: Orientation::default(),
                        },
                    );
                }
            }
        }
        grid
    }

    /// The middle tile, where the centerpiece stands.
    pub fn center(&self) -> GridCoord {
        let c = (self.size / 2) as i32;
        GridCoord::new(c, c)
    }

    /// Check whether a coordinate is within bounds.
    pub fn in_bounds(&self, coord: GridCoord) -> bool {
        coord.x >= 0 && coord.y >= 0 && (coord.x as u32) < self.size && (coord.y as u32) < self.size
    }

    fn index(&self, coord: GridCoord) -> Option<usize> {
        if self.in_bounds(coord) {
            Some(coord.x as usize + coord.y as usize * self.size as usize)
        } else {
            None
        }
    }

    pub fn get(&self, coord: GridCoord) -> Option<&Tile> {
        self.index(coord).and_then(|i| self.tiles.get(i))
    }

    /// The building on a tile; `None` for empty or out-of-bounds tiles.
    pub fn building_at(&self, coord: GridCoord) -> Option<BuildingType> {
        self.get(coord).and_then(|t| t.building)
    }

    /// Write a tile. No-op for out-of-bounds coordinates.
    pub fn set(&mut self, coord: GridCoord, tile: Tile) {
        if let Some(slot) = self.index(coord).and_then(|i| self.tiles.get_mut(i)) {
            *slot = tile;
        }
    }

    /// All tiles with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (GridCoord, &Tile)> + '_ {
        let size = self.size as usize;
        self.tiles.iter().enumerate().map(move |(i, tile)| {
            let coord = GridCoord::new((i % size) as i32, (i / size) as i32);
            (coord, tile)
        })
    }

    /// In-bounds orthogonal neighbours (north, east, south, west).
    pub fn neighbors(&self, coord: GridCoord) -> impl Iterator<Item = GridCoord> + '_ {
        [(0, -1), (1, 0), (0, 1), (-1, 0)]
            .into_iter()
            .map(move |(dx, dy)| GridCoord::new(coord.x + dx, coord.y + dy))
            .filter(|&c| self.in_bounds(c))
    }

    /// Tally buildings on the grid.
    pub fn counts(&self) -> BuildingCounts {
        let mut counts = BuildingCounts::default();
        for tile in &self.tiles {
            if let Some(building) = tile.building {
                counts.add(building, 1);
            }
        }
        counts
    }

    /// Roll every seed and sapling forward.
    ///
    /// Each growing tile, with probability `params.chance`, gains
    /// `params.increment` variant points; reaching `params.mature_at`
    /// promotes it one stage along its chain and resets the variant. Returns
    /// the new grid and whether any tile changed.
    pub fn advance_growth<R: RandomSource>(
        &self,
        rng: &mut R,
        params: &GrowthParams,
    ) -> (CampusGrid, bool) {
        let mut next = self.clone();
        let mut changed = false;
        for tile in &mut next.tiles {
            let Some(building) = tile.building else {
                continue;
            };
            let Some(successor) = catalog::growth_successor(building) else {
                continue;
            };
            if !rng.random_bool(params.chance) {
                continue;
            }
            tile.variant = tile.variant.saturating_add(params.increment);
            if tile.variant >= params.mature_at {
                tile.building = Some(successor);
                tile.variant = 0;
            }
            changed = true;
        }
        (next, changed)
    }
}

/// Per-type building tally, taken once per tick.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingCounts(BTreeMap<BuildingType, u32>);

impl BuildingCounts {
    pub fn get(&self, building: BuildingType) -> u32 {
        self.0.get(&building).copied().unwrap_or(0)
    }

    pub fn add(&mut self, building: BuildingType, n: u32) {
        *self.0.entry(building).or_insert(0) += n;
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuildingType, u32)> + '_ {
        self.0.iter().map(|(&b, &n)| (b, n))
    }

    /// Total population (nature score) generated by these buildings.
    pub fn population(&self, catalog: &BuildingCatalog) -> i64 {
        self.iter()
            .filter_map(|(b, n)| catalog.get(b).map(|e| e.population_gen * i64::from(n)))
            .sum()
    }
}

impl FromIterator<(BuildingType, u32)> for BuildingCounts {
    fn from_iter<I: IntoIterator<Item = (BuildingType, u32)>>(iter: I) -> Self {
        let mut counts = Self::default();
        for (building, n) in iter {
            counts.add(building, n);
        }
        counts
    }
}
