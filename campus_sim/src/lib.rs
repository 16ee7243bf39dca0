// campus_sim — pure Rust campus-building simulation library.
//
// This crate contains the whole game core for the campus builder: grid
// state, building catalog, wellbeing, metrics, economy, missions, the
// scripted alumni timeline with its touring visitor, legacy rewards and the
// focus clock. It knows nothing about rendering, input or wall-clock time;
// a frontend drives it by calling `SimState::step` once per in-game day and
// `SimState::tick_focus_second` once per real second, and reads back state
// snapshots and `SimEvent`s.
//
// Module overview:
// - `sim.rs`:       SimState, the day tick, player actions, focus clock driver.
// - `types.rs`:     GridCoord, Orientation, BuildingType, GameMode, stat/school enums.
// - `catalog.rs`:   BuildingCatalog, growth chains, flagship school bonuses.
// - `grid.rs`:      CampusGrid, opening generation, growth, BuildingCounts.
// - `wellbeing.rs`: Amenity coverage and the long-term health penalty.
// - `metrics.rs`:   Campus metrics and school scores.
// - `economy.rs`:   Per-tick income.
// - `mission.rs`:   Mission ladder, predicates, the single mission slot.
// - `focus.rs`:     Focus/break clock state machine.
// - `scripted.rs`:  Alumni timeline, discipline table, historical years.
// - `visitor.rs`:   The touring visitor state machine.
// - `legacy.rs`:    Legacy energy ledger, buzz, guest lecture, chatboard.
// - `narrative.rs`: Flavor-text pools (news, chat, photos, chatboard).
// - `modifiers.rs`: TickModifier hook for event bonuses.
// - `command.rs`:   SimCommand, external inputs folded into a tick.
// - `event.rs`:     SimEvent notifications.
// - `config.rs`:    SimConfig, every tunable parameter and content table.
// - `error.rs`:     Typed rejections for player actions.
// - `prng`:         Re-exported from `campus_prng`.
//
// **Critical constraint: determinism.** The tick is a pure function:
// `(state, rng, commands) -> (new_state, events)`. All randomness comes from
// the `RandomSource` the caller passes in. No `HashMap`, no system time, no
// OS entropy. Use `BTreeMap` for ordered collections.

pub mod catalog;
pub mod command;
pub mod config;
pub mod economy;
pub mod error;
pub mod event;
pub mod focus;
pub mod grid;
pub mod legacy;
pub mod metrics;
pub mod mission;
pub mod modifiers;
pub mod narrative;
pub use campus_prng as prng;
pub mod scripted;
pub mod sim;
pub mod types;
pub mod visitor;
pub mod wellbeing;

pub use command::SimCommand;
pub use config::SimConfig;
pub use error::{ClaimError, ClearError, PlacementError};
pub use event::{SimEvent, SimEventKind};
pub use sim::{CampaignStats, SimState, StepResult, TickOutcome};
pub use types::{BuildingType, GameMode, GridCoord, Orientation};
