// Sequential mission dispenser.
//
// Missions come from an ordered catalog (`MissionCatalog`). At most one is
// current at a time; the next one handed out is the first catalog entry whose
// id has not been claimed yet. A mission moves through
//
//   dispensed (completed = false) → completed (predicate met on a tick)
//     → claimed (reward paid, slot emptied) → next dispensed
//
// Completion and claiming are decoupled: the tick marks a mission completed,
// but only an explicit claim pays the reward and frees the slot. Nothing here
// runs in creative mode; `sim.rs` skips the calls.
//
// One aggregation rule is special: an OakTree count target also counts oak
// saplings (`mission_count`).

use crate::error::ClaimError;
use crate::grid::BuildingCounts;
use crate::types::BuildingType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What a mission asks for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MissionTarget {
    Money { at_least: f64 },
    Population { at_least: i64 },
    Wellbeing { at_least: f64 },
    BuildingCount { building: BuildingType, at_least: u32 },
}

/// Read-only view of the stats a mission predicate is checked against.
#[derive(Clone, Copy, Debug)]
pub struct MissionProgress<'a> {
    pub money: f64,
    pub population: i64,
    pub wellbeing: f64,
    pub counts: &'a BuildingCounts,
}

impl MissionTarget {
    pub fn is_met(&self, progress: &MissionProgress<'_>) -> bool {
        match *self {
            MissionTarget::Money { at_least } => progress.money >= at_least,
            MissionTarget::Population { at_least } => progress.population >= at_least,
            MissionTarget::Wellbeing { at_least } => progress.wellbeing >= at_least,
            MissionTarget::BuildingCount { building, at_least } => {
                mission_count(progress.counts, building) >= at_least
            }
        }
    }
}

/// Units counted toward a building-count target.
pub fn mission_count(counts: &BuildingCounts, building: BuildingType) -> u32 {
    let saplings = if building == BuildingType::OakTree {
        counts.get(BuildingType::OakSapling)
    } else {
        0
    };
    counts.get(building) + saplings
}

/// Catalog entry for one mission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MissionTemplate {
    pub id: String,
    pub description: String,
    pub target: MissionTarget,
    pub reward: f64,
}

/// A dispensed mission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub id: String,
    pub description: String,
    pub target: MissionTarget,
    pub reward: f64,
    pub completed: bool,
}

impl From<&MissionTemplate> for Mission {
    fn from(t: &MissionTemplate) -> Self {
        Self {
            id: t.id.clone(),
            description: t.description.clone(),
            target: t.target.clone(),
            reward: t.reward,
            completed: false,
        }
    }
}

/// Ordered mission list.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MissionCatalog(Vec<MissionTemplate>);

impl MissionCatalog {
    pub fn new(templates: Vec<MissionTemplate>) -> Self {
        Self(templates)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MissionTemplate> {
        self.0.iter()
    }

    /// First mission whose id is not in `claimed`.
    pub fn next_after(&self, claimed: &BTreeSet<String>) -> Option<Mission> {
        self.0
            .iter()
            .find(|t| !claimed.contains(&t.id))
            .map(Mission::from)
    }

    /// The shipped mission ladder.
    pub fn standard() -> Self {
        use BuildingType as B;
        let count = |building, at_least| MissionTarget::BuildingCount { building, at_least };
        let missions = [
            ("m1", "Plant 3 Oak Trees to start your forest.", count(B::OakTree, 3), 50_000.0),
            ("m2", "Build a Path network of 10 tiles.", count(B::Path, 10), 20_000.0),
            ("m3", "Create 2 Study Spots for students.", count(B::StudySpot, 2), 100_000.0),
            (
                "m4",
                "Reach 100 Nature Score.",
                MissionTarget::Population { at_least: 100 },
                75_000.0,
            ),
            ("m5", "Build a Student Dorm for residents.", count(B::StudentDorm, 1), 250_000.0),
            ("m6", "Build a Lecture Hall for classes.", count(B::LectureHall, 1), 300_000.0),
            (
                "m7",
                "Maintain 90% Student Well-being.",
                MissionTarget::Wellbeing { at_least: 90.0 },
                200_000.0,
            ),
            ("m8", "Build a Coupa Cafe to serve coffee.", count(B::CoupaCafe, 1), 200_000.0),
            (
                "m9",
                "Reach $2,000,000 in Revenue.",
                MissionTarget::Money {
                    at_least: 2_000_000.0,
                },
                500_000.0,
            ),
            ("m10", "Expand the forest to 30 Pine Trees.", count(B::PineTree, 30), 250_000.0),
        ];
        Self(
            missions
                .into_iter()
                .map(|(id, description, target, reward)| MissionTemplate {
                    id: id.to_string(),
                    description: description.to_string(),
                    target,
                    reward,
                })
                .collect(),
        )
    }
}

/// The single mission slot plus the ids already claimed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MissionTracker {
    pub current: Option<Mission>,
    pub claimed: BTreeSet<String>,
}

impl MissionTracker {
    /// Fill an empty slot from the catalog. Returns the id of the newly
    /// dispensed mission, if any.
    pub fn dispense(&mut self, catalog: &MissionCatalog) -> Option<&str> {
        if self.current.is_some() {
            return None;
        }
        self.current = catalog.next_after(&self.claimed);
        self.current.as_ref().map(|m| m.id.as_str())
    }

    /// Check the current mission's predicate. Returns the mission if it became
    /// completed on this call.
    pub fn evaluate(&mut self, progress: &MissionProgress<'_>) -> Option<&Mission> {
        let mission = self.current.as_mut()?;
        if mission.completed || !mission.target.is_met(progress) {
            return None;
        }
        mission.completed = true;
        Some(&*mission)
    }

    /// Take the completed mission out of the slot and record its id.
    pub fn claim(&mut self) -> Result<Mission, ClaimError> {
        let current = self.current.as_ref().ok_or(ClaimError::NoActiveMission)?;
        if !current.completed {
            return Err(ClaimError::MissionNotCompleted);
        }
        let mission = self.current.take().ok_or(ClaimError::NoActiveMission)?;
        self.claimed.insert(mission.id.clone());
        Ok(mission)
    }
}
