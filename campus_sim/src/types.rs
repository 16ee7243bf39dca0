// Core types shared across the simulation.
//
// Defines grid coordinates (`GridCoord`), tile orientation, the building
// identifier enum, the game modes, and the two named score taxonomies
// (`StatCategory` for campus metrics, `SchoolType` for school performance).
// Everything derives `Serialize`/`Deserialize` so the presentation layer can
// receive state snapshots as JSON, and `Ord` so these can key `BTreeMap`s.
//
// Building identifiers are a closed enum rather than strings: growth chains,
// discipline tables and the flagship exception all key on variants (see
// `catalog.rs`), so there is no substring matching anywhere in the sim.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Spatial types
// ---------------------------------------------------------------------------

/// A tile position on the campus grid. `x` grows east, `y` grows south.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCoord {
    pub x: i32,
    pub y: i32,
}

impl GridCoord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two coordinates.
    pub fn manhattan_distance(self, other: Self) -> u32 {
        (self.x - other.x).unsigned_abs() + (self.y - other.y).unsigned_abs()
    }
}

impl fmt::Display for GridCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Tile rotation in quarter turns (0 = 0°, 1 = 90°, 2 = 180°, 3 = 270°).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Orientation(u8);

impl Orientation {
    /// Build an orientation; values wrap modulo four.
    pub const fn from_quarter_turns(turns: u8) -> Self {
        Self(turns % 4)
    }

    pub const fn quarter_turns(self) -> u8 {
        self.0
    }

    /// The next orientation clockwise.
    pub const fn rotated(self) -> Self {
        Self((self.0 + 1) % 4)
    }
}

// ---------------------------------------------------------------------------
// Buildings
// ---------------------------------------------------------------------------

/// Every kind of structure that can occupy a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BuildingType {
    Path,
    /// The campus centerpiece. Placed at world creation, never movable.
    MemorialChurch,
    HooverTower,
    EngineeringQuad,
    ArrillagaHall,
    CoupaCafe,
    TraderJoes,
    DSchool,
    StudentDorm,
    LectureHall,
    VapeStore,
    OakSeed,
    OakSapling,
    OakTree,
    PineSeed,
    PineSapling,
    PineTree,
    PalmSeed,
    PalmSapling,
    PalmTree,
    StudySpot,
    TennisCourt,
    FootballField,
    Oval,
    TrackField,
    VolleyballCourt,
    ClawFountain,
    RodinSculpture,
    TotemSculpture,
    PicnicTable,
    StreetLamp,
    RoseBush,
    GardenBed,
    Hedge,
}

impl BuildingType {
    pub const ALL: [BuildingType; 34] = [
        BuildingType::Path,
        BuildingType::MemorialChurch,
        BuildingType::HooverTower,
        BuildingType::EngineeringQuad,
        BuildingType::ArrillagaHall,
        BuildingType::CoupaCafe,
        BuildingType::TraderJoes,
        BuildingType::DSchool,
        BuildingType::StudentDorm,
        BuildingType::LectureHall,
        BuildingType::VapeStore,
        BuildingType::OakSeed,
        BuildingType::OakSapling,
        BuildingType::OakTree,
        BuildingType::PineSeed,
        BuildingType::PineSapling,
        BuildingType::PineTree,
        BuildingType::PalmSeed,
        BuildingType::PalmSapling,
        BuildingType::PalmTree,
        BuildingType::StudySpot,
        BuildingType::TennisCourt,
        BuildingType::FootballField,
        BuildingType::Oval,
        BuildingType::TrackField,
        BuildingType::VolleyballCourt,
        BuildingType::ClawFountain,
        BuildingType::RodinSculpture,
        BuildingType::TotemSculpture,
        BuildingType::PicnicTable,
        BuildingType::StreetLamp,
        BuildingType::RoseBush,
        BuildingType::GardenBed,
        BuildingType::Hedge,
    ];
}

// ---------------------------------------------------------------------------
// Modes and score taxonomies
// ---------------------------------------------------------------------------

/// Which ruleset a campaign runs under.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Timed focus sessions: income accrues only while the focus clock runs.
    Focus,
    /// Income always accrues, scaled by wellbeing.
    Standard,
    /// Sandbox: free placement, no missions, no scripted events, no win/loss.
    Creative,
}

impl GameMode {
    pub fn is_creative(self) -> bool {
        self == GameMode::Creative
    }

    /// Whether the one-second focus clock runs in this mode.
    pub fn runs_focus_clock(self) -> bool {
        matches!(self, GameMode::Focus | GameMode::Creative)
    }
}

/// Campus-wide metric categories (0–100 each).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StatCategory {
    Innovation,
    Research,
    Prestige,
    Culture,
    Nature,
    Wellbeing,
}

impl StatCategory {
    pub const ALL: [StatCategory; 6] = [
        StatCategory::Innovation,
        StatCategory::Research,
        StatCategory::Prestige,
        StatCategory::Culture,
        StatCategory::Nature,
        StatCategory::Wellbeing,
    ];
}

/// Schools whose performance is tracked (0–100 each).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SchoolType {
    Engineering,
    Medicine,
    Business,
    Law,
    Humanities,
    Sustainability,
    Education,
}

impl SchoolType {
    pub const ALL: [SchoolType; 7] = [
        SchoolType::Engineering,
        SchoolType::Medicine,
        SchoolType::Business,
        SchoolType::Law,
        SchoolType::Humanities,
        SchoolType::Sustainability,
        SchoolType::Education,
    ];
}
