// Inputs folded into a tick.
//
// The day tick consumes a batch of `SimCommand`s produced by collaborators
// outside the core (the student presence simulation). Player actions such as
// placing buildings are not commands; they are direct calls on `SimState`
// that return `Result`s (see `sim.rs`).
//
// See also: `sim.rs` for `SimState::apply_tick`, which folds these into
// pending income before the economy step.

use crate::types::BuildingType;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimCommand {
    /// A wandering student visited a building and generated income.
    StudentVisit { building: BuildingType, income: u64 },
}
