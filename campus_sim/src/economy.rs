// Per-tick income.
//
// Income comes only from `pending`, the visitor income folded in from
// `SimCommand::StudentVisit` inputs since the last tick. The orchestrator
// zeroes it every tick whatever this function returns.
//
// Every mode scales by a prestige multiplier, `1 + population / divisor`.
// Standard and creative modes also scale by wellbeing efficiency (floored at
// `min_efficiency`) and round down. Focus mode pays nothing unless the focus
// clock is running, and scales by the clock's elapsed-time tier instead,
// rounding up. Money stays `f64`; rounding happens only here.

use crate::config::{EconomyParams, FocusParams};
use crate::focus::FocusClock;
use crate::types::GameMode;

pub fn prestige_multiplier(population: i64, params: &EconomyParams) -> f64 {
    1.0 + population as f64 / params.prestige_divisor
}

/// Income to credit this tick.
pub fn compute_income(
    mode: GameMode,
    pending: f64,
    wellbeing: f64,
    population: i64,
    focus: FocusClock,
    economy: &EconomyParams,
    focus_params: &FocusParams,
) -> i64 {
    let prestige = prestige_multiplier(population, economy);
    match mode {
        GameMode::Standard | GameMode::Creative => {
            let efficiency = (wellbeing / 100.0).max(economy.min_efficiency);
            (pending * efficiency * prestige).floor() as i64
        }
        GameMode::Focus => {
            if !focus.is_focusing() {
                return 0;
            }
            let tier = focus_params.multiplier_for(focus.elapsed(focus_params));
            (pending * tier * prestige).ceil() as i64
        }
    }
}
