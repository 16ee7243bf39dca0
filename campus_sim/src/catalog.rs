// Static building catalog and the lookup tables derived from it.
//
// `BuildingCatalog` maps every `BuildingType` to a `BuildingCatalogEntry`:
// cost, population and income generation, unlock day, school affinity and
// per-stat bonuses. The catalog lives inside `SimConfig` (see `config.rs`) and
// is never mutated after startup. `BuildingCatalog::standard()` reproduces the
// shipped game balance.
//
// Three explicit tables sit alongside it, replacing what would otherwise be
// name-pattern checks scattered through the tick loop:
// - `GROWTH_CHAINS`: species → seed/sapling/tree stage sequence.
// - `FLAGSHIP_SCHOOL_BONUSES`: flat school bonuses for flagship buildings on
//   top of the generic per-building formula.
// - `CENTERPIECE`: the immovable campus heart that visitors spawn at.
//
// See also: `grid.rs` for the growth step that walks `GROWTH_CHAINS`,
// `metrics.rs` for the consumer of stat bonuses and flagship bonuses,
// `sim.rs` for placement validation against cost and unlock day.

use crate::types::{BuildingType, SchoolType, StatCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Number of in-game days per campaign year.
pub const DAYS_PER_YEAR: u32 = 365;

/// The campus centerpiece: placed at world creation, protected from clearing,
/// and the spawn point of every scripted visitor.
pub const CENTERPIECE: BuildingType = BuildingType::MemorialChurch;

/// Seed → sapling → tree stage sequences, one per species.
pub const GROWTH_CHAINS: [[BuildingType; 3]; 3] = [
    [
        BuildingType::OakSeed,
        BuildingType::OakSapling,
        BuildingType::OakTree,
    ],
    [
        BuildingType::PineSeed,
        BuildingType::PineSapling,
        BuildingType::PineTree,
    ],
    [
        BuildingType::PalmSeed,
        BuildingType::PalmSapling,
        BuildingType::PalmTree,
    ],
];

/// Flat school bonuses awarded per flagship building, beyond the generic
/// 10-per-building school base. Applied only when the building's catalog
/// school matches the listed school.
pub const FLAGSHIP_SCHOOL_BONUSES: [(BuildingType, SchoolType, f64); 1] =
    [(BuildingType::EngineeringQuad, SchoolType::Engineering, 50.0)];

/// The next stage in this building's growth chain, or `None` if it is not a
/// growing stage (mature trees and ordinary buildings).
pub fn growth_successor(building: BuildingType) -> Option<BuildingType> {
    GROWTH_CHAINS.iter().find_map(|chain| {
        let idx = chain.iter().position(|&stage| stage == building)?;
        chain.get(idx + 1).copied()
    })
}

/// Static definition of one building kind.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildingCatalogEntry {
    /// Display name for the presentation layer.
    pub name: String,
    /// Purchase price, debited on placement outside creative mode.
    pub cost: u64,
    /// Contribution to population (the nature score) per placed unit.
    /// Negative for buildings that drive people away.
    pub population_gen: i64,
    /// Income a passing student generates when visiting this building.
    /// Consumed by the external presence simulation, not the tick loop.
    pub income_gen: u64,
    /// First campaign day on which placement is legal.
    pub unlock_day: u32,
    /// School this building feeds, if any.
    #[serde(default)]
    pub school: Option<SchoolType>,
    /// Per-unit additive bonus to named metrics.
    #[serde(default)]
    pub stat_bonuses: BTreeMap<StatCategory, f64>,
    /// Whether the player may buy and place this building directly.
    #[serde(default = "default_placeable")]
    pub placeable: bool,
    /// Whether each unit adds to the long-term health penalty every tick.
    #[serde(default)]
    pub harmful: bool,
}

fn default_placeable() -> bool {
    true
}

/// The full building table, keyed by `BuildingType`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingCatalog {
    entries: BTreeMap<BuildingType, BuildingCatalogEntry>,
}

impl BuildingCatalog {
    pub fn get(&self, building: BuildingType) -> Option<&BuildingCatalogEntry> {
        self.entries.get(&building)
    }

    pub fn insert(&mut self, building: BuildingType, entry: BuildingCatalogEntry) {
        self.entries.insert(building, entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = (BuildingType, &BuildingCatalogEntry)> + '_ {
        self.entries.iter().map(|(&b, e)| (b, e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The shipped campus catalog.
    pub fn standard() -> Self {
        use BuildingType as B;
        use SchoolType as S;
        use StatCategory::*;

        let year = |n: u32| (n - 1) * DAYS_PER_YEAR;
        let mut catalog = Self::default();
        let mut add = |building: BuildingType,
                       name: &str,
                       cost: u64,
                       population_gen: i64,
                       income_gen: u64,
                       unlock_day: u32,
                       school: Option<SchoolType>,
                       bonuses: &[(StatCategory, f64)]| {
            catalog.insert(
                building,
                BuildingCatalogEntry {
                    name: name.to_string(),
                    cost,
                    population_gen,
                    income_gen,
                    unlock_day,
                    school,
                    stat_bonuses: bonuses.iter().copied().collect(),
                    placeable: true,
                    harmful: false,
                },
            );
        };

        add(B::Path, "Path", 200, 0, 0, year(1), None, &[(Wellbeing, 1.0)]);
        add(
            B::MemorialChurch,
            "Mem. Church",
            0,
            50,
            200,
            year(1),
            Some(S::Humanities),
            &[(Prestige, 20.0), (Culture, 25.0), (Wellbeing, 10.0)],
        );
        add(
            B::HooverTower,
            "Hoover Tower",
            300_000,
            50,
            400,
            year(9),
            None,
            &[(Prestige, 50.0), (Innovation, 10.0)],
        );
        add(
            B::EngineeringQuad,
            "Eng. Quad",
            750_000,
            60,
            600,
            year(10),
            Some(S::Engineering),
            &[(Innovation, 40.0), (Research, 40.0), (Prestige, 20.0)],
        );
        add(
            B::ArrillagaHall,
            "Arrillaga Hall",
            150_000,
            20,
            300,
            year(2),
            Some(S::Business),
            &[(Wellbeing, 25.0), (Culture, 10.0)],
        );
        add(
            B::CoupaCafe,
            "Coupa Cafe",
            15_000,
            2,
            150,
            180,
            Some(S::Business),
            &[(Wellbeing, 5.0), (Culture, 2.0)],
        );
        add(
            B::TraderJoes,
            "Trader Joe's",
            25_000,
            5,
            200,
            year(4),
            Some(S::Business),
            &[(Wellbeing, 10.0), (Culture, 5.0)],
        );
        add(
            B::DSchool,
            "d.school",
            120_000,
            15,
            150,
            year(5),
            Some(S::Humanities),
            &[(Innovation, 25.0), (Culture, 25.0)],
        );
        add(B::StudentDorm, "Dorm", 50_000, 20, 50, year(1), None, &[(Wellbeing, 5.0)]);
        add(
            B::LectureHall,
            "Lecture Hall",
            100_000,
            10,
            100,
            year(3),
            Some(S::Education),
            &[(Research, 10.0), (Innovation, 5.0)],
        );
        add(
            B::VapeStore,
            "Vape Shop",
            25_000,
            -5,
            500,
            year(5),
            None,
            &[(Wellbeing, -10.0), (Culture, -5.0)],
        );
        add(B::OakSeed, "Acorn", 500, 1, 0, year(1), Some(S::Sustainability), &[(Nature, 1.0)]);
        add(B::OakSapling, "Oak Sapling", 0, 2, 0, year(1), None, &[(Nature, 2.0)]);
        add(B::OakTree, "Oak Tree", 0, 10, 10, year(1), Some(S::Sustainability), &[(Nature, 5.0)]);
        add(B::PineSeed, "Pine Cone", 500, 1, 0, year(1), Some(S::Sustainability), &[(Nature, 1.0)]);
        add(B::PineSapling, "Pine Sapling", 0, 2, 0, year(1), None, &[(Nature, 2.0)]);
        add(B::PineTree, "Pine Tree", 0, 8, 10, year(1), Some(S::Sustainability), &[(Nature, 4.0)]);
        add(B::PalmSeed, "Coconut", 600, 1, 0, year(4), Some(S::Sustainability), &[(Nature, 1.0)]);
        add(B::PalmSapling, "Palm Sapling", 0, 2, 0, year(4), None, &[(Nature, 2.0)]);
        add(B::PalmTree, "Palm Tree", 0, 8, 10, year(4), Some(S::Sustainability), &[(Nature, 4.0)]);
        add(
            B::StudySpot,
            "Study Spot",
            5_000,
            5,
            25,
            year(1),
            Some(S::Education),
            &[(Wellbeing, 2.0), (Research, 1.0)],
        );
        add(
            B::PicnicTable,
            "Picnic Table",
            2_000,
            3,
            10,
            year(1),
            None,
            &[(Wellbeing, 3.0), (Culture, 1.0)],
        );
        add(B::StreetLamp, "Street Lamp", 1_000, 1, 5, year(1), None, &[(Wellbeing, 1.0)]);
        add(
            B::RoseBush,
            "Rose Bush",
            1_500,
            5,
            5,
            year(2),
            None,
            &[(Nature, 2.0), (Culture, 1.0)],
        );
        add(B::GardenBed, "Garden Bed", 3_000, 8, 5, year(2), None, &[(Nature, 3.0)]);
        add(B::Hedge, "Hedge", 1_000, 2, 0, year(1), None, &[(Nature, 1.0)]);
        add(
            B::TennisCourt,
            "Tennis Court",
            40_000,
            5,
            80,
            year(2),
            Some(S::Education),
            &[(Wellbeing, 5.0), (Prestige, 2.0)],
        );
        add(
            B::VolleyballCourt,
            "Beach Volleyball",
            25_000,
            5,
            60,
            year(3),
            None,
            &[(Wellbeing, 4.0), (Culture, 1.0)],
        );
        add(
            B::FootballField,
            "Football Field",
            150_000,
            15,
            300,
            year(7),
            Some(S::Business),
            &[(Prestige, 15.0), (Culture, 5.0), (Wellbeing, 5.0)],
        );
        add(
            B::TrackField,
            "Track & Field",
            120_000,
            15,
            250,
            year(5),
            Some(S::Medicine),
            &[(Wellbeing, 10.0), (Prestige, 5.0)],
        );
        add(
            B::Oval,
            "The Oval",
            80_000,
            30,
            100,
            year(8),
            Some(S::Sustainability),
            &[(Nature, 20.0), (Wellbeing, 10.0), (Culture, 5.0)],
        );
        add(
            B::ClawFountain,
            "The Claw",
            45_000,
            25,
            60,
            year(4),
            Some(S::Humanities),
            &[(Culture, 15.0), (Prestige, 5.0)],
        );
        add(
            B::RodinSculpture,
            "Rodin Sculpture",
            60_000,
            35,
            50,
            year(6),
            Some(S::Humanities),
            &[(Culture, 25.0), (Prestige, 10.0)],
        );
        add(
            B::TotemSculpture,
            "PNG Totem",
            35_000,
            20,
            40,
            year(8),
            Some(S::Humanities),
            &[(Culture, 15.0), (Nature, 5.0)],
        );

        // Stages the sim produces itself are never bought.
        for building in [CENTERPIECE]
            .into_iter()
            .chain(GROWTH_CHAINS.iter().flat_map(|chain| chain[1..].iter().copied()))
        {
            if let Some(entry) = catalog.entries.get_mut(&building) {
                entry.placeable = false;
            }
        }
        if let Some(vape) = catalog.entries.get_mut(&B::VapeStore) {
            vape.harmful = true;
        }

        catalog
    }
}
