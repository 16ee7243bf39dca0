// Pluggable tick modifiers.
//
// Scripted events carry stat bonuses and school growth modifiers, and the
// guest lecture carries a magnitude, but the base game gives none of them a
// formula. `TickModifier` is the seam where a caller can give them one: the
// orchestrator asks it for a wellbeing adjustment (added before clamping)
// and an income multiplier (applied to the tick's income before it is
// credited). `NeutralModifier` returns 0 and 1 and is what `apply_tick`
// uses.

use crate::types::{SchoolType, StatCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated bonus data from fired scripted events.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EventBonuses {
    pub stats: BTreeMap<StatCategory, f64>,
    pub growth: BTreeMap<SchoolType, f64>,
}

impl EventBonuses {
    pub fn absorb(
        &mut self,
        stats: &BTreeMap<StatCategory, f64>,
        growth: &BTreeMap<SchoolType, f64>,
    ) {
        for (&stat, &v) in stats {
            *self.stats.entry(stat).or_insert(0.0) += v;
        }
        for (&school, &v) in growth {
            *self.growth.entry(school).or_insert(0.0) += v;
        }
    }
}

/// What a modifier can see when it is consulted.
#[derive(Clone, Copy, Debug)]
pub struct ModifierContext<'a> {
    pub day: u32,
    pub guest_lecture_magnitude: f64,
    pub event_bonuses: &'a EventBonuses,
}

pub trait TickModifier {
    /// Added to wellbeing after the health penalty, before clamping.
    fn wellbeing_adjustment(&self, _ctx: &ModifierContext<'_>) -> f64 {
        0.0
    }

    /// Multiplies the tick's income.
    fn income_multiplier(&self, _ctx: &ModifierContext<'_>) -> f64 {
        1.0
    }
}

/// Applies nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeutralModifier;

impl TickModifier for NeutralModifier {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neutral_modifier_changes_nothing() {
        let bonuses = EventBonuses::default();
        let ctx = ModifierContext {
            day: 10,
            guest_lecture_magnitude: 10.0,
            event_bonuses: &bonuses,
        };
        assert_eq!(NeutralModifier.wellbeing_adjustment(&ctx), 0.0);
        assert_eq!(NeutralModifier.income_multiplier(&ctx), 1.0);
    }

    #[test]
    fn bonuses_accumulate() {
        let mut bonuses = EventBonuses::default();
        let stats = BTreeMap::from([(StatCategory::Innovation, 5.0)]);
        let growth = BTreeMap::from([(SchoolType::Engineering, 0.1)]);
        bonuses.absorb(&stats, &growth);
        bonuses.absorb(&stats, &BTreeMap::new());
        assert_eq!(bonuses.stats[&StatCategory::Innovation], 10.0);
        assert_eq!(bonuses.growth[&SchoolType::Engineering], 0.1);
    }
}
