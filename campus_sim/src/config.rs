// Data-driven simulation configuration.
//
// Every tunable number the tick engine reads lives in `SimConfig`, grouped
// into parameter sub-structs per engine (`GrowthParams`, `WellbeingParams`,
// `EconomyParams`, `FocusParams`, `VisitorParams`, `LegacyParams`). The static
// catalogs (buildings, missions, scripted events) and the narrative pools are
// part of the config too, so a whole balance pass is one JSON file.
//
// `SimConfig::default()` reproduces the shipped game. `SimConfig::from_json`
// accepts partial documents: any omitted field falls back to its default.
//
// See also: `sim.rs`, which holds the config behind an `Arc` in `SimState`;
// `catalog.rs`, `mission.rs`, `scripted.rs` and `narrative.rs` for the
// catalog types and their `standard()` constructors.
//
// **Critical constraint: determinism.** Config values feed directly into the
// tick. Two runs with the same config, seed and inputs produce the same
// states and events.

use crate::catalog::BuildingCatalog;
use crate::mission::MissionCatalog;
use crate::narrative::NarrativePools;
use crate::scripted::ScriptedEventCatalog;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ---------------------------------------------------------------------------
// Engine parameter groups
// ---------------------------------------------------------------------------

/// Mature trees scattered over the opening campus.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpeningTreeParams {
    /// Trees only appear strictly farther than this (Euclidean, in tiles)
    /// from the centerpiece.
    pub min_distance: f64,
    /// Per-tile chance of a tree beyond `min_distance`.
    pub chance: f64,
    /// Fraction of scattered trees that are oaks; the rest are pines.
    pub oak_fraction: f64,
}

impl Default for OpeningTreeParams {
    fn default() -> Self {
        Self {
            min_distance: 18.0,
            chance: 0.08,
            oak_fraction: 0.4,
        }
    }
}

/// Seed and sapling growth.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrowthParams {
    /// Per-tick chance that a growing tile advances.
    pub chance: f64,
    /// Variant points gained per successful roll.
    pub increment: u8,
    /// Variant at which the tile promotes to its next stage.
    pub mature_at: u8,
}

impl Default for GrowthParams {
    fn default() -> Self {
        Self {
            chance: 0.2,
            increment: 10,
            mature_at: 100,
        }
    }
}

/// Long-term health penalty rates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WellbeingParams {
    pub penalty_per_harmful_unit: f64,
    pub penalty_decay: f64,
}

impl Default for WellbeingParams {
    fn default() -> Self {
        Self {
            penalty_per_harmful_unit: 0.2,
            penalty_decay: 0.1,
        }
    }
}

/// Income scaling in the always-accruing modes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EconomyParams {
    /// Floor on the wellbeing efficiency factor.
    pub min_efficiency: f64,
    /// Prestige multiplier is `1 + population / prestige_divisor`.
    pub prestige_divisor: f64,
}

impl Default for EconomyParams {
    fn default() -> Self {
        Self {
            min_efficiency: 0.1,
            prestige_divisor: 100.0,
        }
    }
}

/// One step of the focus income multiplier.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocusTier {
    /// The tier applies once elapsed focus time is strictly greater than this.
    pub after_seconds: u32,
    pub multiplier: f64,
}

/// Focus-session clock.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FocusParams {
    pub focus_seconds: u32,
    pub break_seconds: u32,
    /// Money credited when a focus session runs to completion.
    pub completion_bonus: f64,
    /// Multiplier steps, ascending by `after_seconds`. Below the first step
    /// the multiplier is 1.
    pub tiers: Vec<FocusTier>,
}

impl FocusParams {
    /// Income multiplier for a session that has run `elapsed` seconds.
    pub fn multiplier_for(&self, elapsed: u32) -> f64 {
        self.tiers
            .iter()
            .filter(|t| elapsed > t.after_seconds)
            .max_by_key(|t| t.after_seconds)
            .map_or(1.0, |t| t.multiplier)
    }
}

impl Default for FocusParams {
    fn default() -> Self {
        Self {
            focus_seconds: 25 * 60,
            break_seconds: 5 * 60,
            completion_bonus: 800_000.0,
            tiers: vec![
                FocusTier {
                    after_seconds: 60,
                    multiplier: 2.0,
                },
                FocusTier {
                    after_seconds: 15 * 60,
                    multiplier: 5.0,
                },
                FocusTier {
                    after_seconds: 25 * 60,
                    multiplier: 10.0,
                },
            ],
        }
    }
}

/// Scripted visitor timings and chance rolls.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VisitorParams {
    /// Ticks spent at each building before choosing the next one.
    pub visit_ticks: u32,
    /// Ticks spent chatting before departure.
    pub chat_ticks: u32,
    /// Per-tick chance of a chat interaction while chatting.
    pub chat_chance: f64,
    /// Per-tick chance of a photo while chatting.
    pub photo_chance: f64,
    /// Delay the presentation layer should wait before showing the quote.
    pub quote_delay_ticks: u32,
    /// Chatboard ring-buffer length.
    pub chatboard_capacity: usize,
}

impl Default for VisitorParams {
    fn default() -> Self {
        Self {
            visit_ticks: 3,
            chat_ticks: 5,
            chat_chance: 0.3,
            photo_chance: 0.15,
            quote_delay_ticks: 2,
            chatboard_capacity: 5,
        }
    }
}

/// Donation tier attached to a scripted event.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EventTier {
    /// Minimum campus buzz for the donation to land.
    pub buzz_threshold: f64,
    /// Applied to raw legacy energy at departure.
    pub legacy_multiplier: f64,
    pub description: String,
}

/// Legacy energy, buzz and the guest-lecture buff.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyParams {
    pub energy_per_visited_building: u64,
    pub energy_per_chat: u64,
    pub energy_per_photo: u64,
    /// Tier assumed for events that do not name one.
    pub default_tier: u8,
    pub tiers: BTreeMap<u8, EventTier>,
    /// Cumulative ledger totals that announce an unlock when crossed.
    pub unlocks: BTreeMap<u64, String>,
    /// Upper bound of the campus buzz scalar.
    pub max_buzz: f64,
    /// Buzz at or above which a departing visitor starts a guest lecture.
    pub guest_lecture_buzz: f64,
    pub guest_lecture_magnitude: f64,
    pub guest_lecture_days: u32,
}

impl LegacyParams {
    /// Tier entry for an event, falling back to `default_tier`.
    pub fn tier(&self, tier: Option<u8>) -> Option<&EventTier> {
        self.tiers.get(&tier.unwrap_or(self.default_tier))
    }
}

impl Default for LegacyParams {
    fn default() -> Self {
        let tier = |buzz_threshold: f64, legacy_multiplier: f64, description: &str| EventTier {
            buzz_threshold,
            legacy_multiplier,
            description: description.to_string(),
        };
        let tiers = BTreeMap::from([
            (1, tier(80.0, 2.0, "Transformational Impact")),
            (2, tier(60.0, 1.5, "Major Contribution")),
            (3, tier(40.0, 1.0, "Significant Gift")),
        ]);
        let unlocks = [
            (25, "Quantum Computing Lab Unlocked"),
            (50, "AI Research Center Unlocked"),
            (75, "Biotech Innovation Hub Unlocked"),
            (100, "Fusion Energy Breakthrough"),
            (150, "Nanotechnology Institute Unlocked"),
            (200, "Space Technology Research Center"),
            (300, "Advanced Materials Lab Unlocked"),
            (500, "Nobel Prize Research Milestone"),
        ]
        .into_iter()
        .map(|(at, name)| (at, name.to_string()))
        .collect();

        Self {
            energy_per_visited_building: 10,
            energy_per_chat: 5,
            energy_per_photo: 3,
            default_tier: 3,
            tiers,
            unlocks,
            max_buzz: 100.0,
            guest_lecture_buzz: 70.0,
            guest_lecture_magnitude: 10.0,
            guest_lecture_days: 7,
        }
    }
}

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level simulation configuration. Loaded once, never mutated at runtime.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Real-world milliseconds between `SimState::step` calls (one in-game
    /// day). Read by the host loop; the sim itself has no clock.
    pub tick_duration_ms: u32,
    /// Real-world milliseconds between `SimState::tick_focus_second` calls.
    /// Read by the host loop.
    pub focus_tick_ms: u32,
    /// Side length of the square campus grid.
    pub grid_size: u32,
    pub initial_money: f64,
    /// Money at which the campaign is won.
    pub campaign_goal: f64,
    /// Day on which an unwon campaign is lost.
    pub max_campaign_days: u32,
    /// Per-tick chance of an ambient news item.
    pub ambient_news_chance: f64,
    /// Ambient news turns into the protest item below this wellbeing.
    pub protest_below_wellbeing: f64,

    pub opening_trees: OpeningTreeParams,
    pub growth: GrowthParams,
    pub wellbeing: WellbeingParams,
    pub economy: EconomyParams,
    pub focus: FocusParams,
    pub visitor: VisitorParams,
    pub legacy: LegacyParams,

    pub buildings: BuildingCatalog,
    pub missions: MissionCatalog,
    pub scripted_events: ScriptedEventCatalog,
    pub narrative: NarrativePools,
}

impl SimConfig {
    /// Parse a config document. Omitted fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms: 1000,
            focus_tick_ms: 1000,
            grid_size: 60,
            initial_money: 25_000.0,
            campaign_goal: 1_000_000_000.0,
            max_campaign_days: 3650,
            ambient_news_chance: 0.05,
            protest_below_wellbeing: 50.0,
            opening_trees: OpeningTreeParams::default(),
            growth: GrowthParams::default(),
            wellbeing: WellbeingParams::default(),
            economy: EconomyParams::default(),
            focus: FocusParams::default(),
            visitor: VisitorParams::default(),
            legacy: LegacyParams::default(),
            buildings: BuildingCatalog::standard(),
            missions: MissionCatalog::standard(),
            scripted_events: ScriptedEventCatalog::standard(),
            narrative: NarrativePools::standard(),
        }
    }
}
