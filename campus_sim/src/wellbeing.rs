// Student wellbeing: amenity coverage plus a long-term health penalty.
//
// Base wellbeing measures how well amenities keep up with housing. Each dorm
// creates demand for lecture halls, study spots and cafes at fixed ratios;
// each amenity's coverage ratio is clamped to [0, 1] and scaled to 0–100, and
// the base score is the unweighted mean of the three. No housing means no
// demand, so the score is a flat 100.
//
// The health penalty is a separate accumulator carried across ticks. Every
// harmful building (catalog flag, the vape shop in the shipped catalog) adds
// a fixed amount per tick; with none present the penalty decays by a smaller
// fixed amount, floored at zero. Removing the harmful building therefore
// stops the damage but recovery is gradual.
//
// Both functions are pure: the orchestrator in `sim.rs` threads the previous
// penalty in and stores the returned one.

use crate::catalog::BuildingCatalog;
use crate::config::WellbeingParams;
use crate::grid::BuildingCounts;
use crate::types::BuildingType;

/// The housing building every demand ratio is anchored to.
pub const HOUSING: BuildingType = BuildingType::StudentDorm;

/// How many units of an amenity a given number of housing units requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Demand {
    /// One amenity unit per `n` housing units, rounded up.
    OnePer(u32),
    /// `n` amenity units per housing unit.
    PerHousing(u32),
}

impl Demand {
    pub fn required(self, housing: u32) -> u32 {
        match self {
            Demand::OnePer(n) => housing.div_ceil(n.max(1)),
            Demand::PerHousing(n) => housing * n,
        }
    }
}

/// Amenity demand table: lecture halls 1 per 2 dorms, study spots 2 per dorm,
/// cafes 1 per 3 dorms.
pub const AMENITY_DEMANDS: [(BuildingType, Demand); 3] = [
    (BuildingType::LectureHall, Demand::OnePer(2)),
    (BuildingType::StudySpot, Demand::PerHousing(2)),
    (BuildingType::CoupaCafe, Demand::OnePer(3)),
];

/// Base wellbeing (0–100) from amenity coverage.
pub fn compute_wellbeing(counts: &BuildingCounts) -> f64 {
    let housing = counts.get(HOUSING);
    if housing == 0 {
        return 100.0;
    }

    let total: f64 = AMENITY_DEMANDS
        .iter()
        .map(|&(amenity, demand)| {
            let required = demand.required(housing).max(1);
            let ratio = f64::from(counts.get(amenity)) / f64::from(required);
            ratio.min(1.0) * 100.0
        })
        .sum();

    (total / AMENITY_DEMANDS.len() as f64).clamp(0.0, 100.0)
}

/// Number of harmful building units on the campus.
pub fn harmful_units(counts: &BuildingCounts, catalog: &BuildingCatalog) -> u32 {
    counts
        .iter()
        .filter(|&(b, _)| catalog.get(b).is_some_and(|e| e.harmful))
        .map(|(_, n)| n)
        .sum()
}

/// Advance the long-term health penalty by one tick.
pub fn advance_penalty(previous: f64, harmful: u32, params: &WellbeingParams) -> f64 {
    let next = if harmful > 0 {
        previous + f64::from(harmful) * params.penalty_per_harmful_unit
    } else if previous > 0.0 {
        previous - params.penalty_decay
    } else {
        previous
    };
    next.max(0.0)
}

/// Final wellbeing after the penalty and any external adjustment.
pub fn final_wellbeing(base: f64, penalty: f64, adjustment: f64) -> f64 {
    (base - penalty + adjustment).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(BuildingType, u32)]) -> BuildingCounts {
        entries.iter().copied().collect()
    }

    #[test]
    fn no_housing_is_full_wellbeing() {
        assert_eq!(compute_wellbeing(&BuildingCounts::default()), 100.0);
        assert_eq!(compute_wellbeing(&counts(&[(HOUSING, 0)])), 100.0);
        assert_eq!(compute_wellbeing(&counts(&[(BuildingType::VapeStore, 4)])), 100.0);
    }

    #[test]
    fn bare_dorm_scores_zero() {
        assert_eq!(compute_wellbeing(&counts(&[(HOUSING, 1)])), 0.0);
    }

    #[test]
    fn fully_served_dorms_score_hundred() {
        let c = counts(&[
            (HOUSING, 3),
            (BuildingType::LectureHall, 2),
            (BuildingType::StudySpot, 6),
            (BuildingType::CoupaCafe, 1),
        ]);
        assert_eq!(compute_wellbeing(&c), 100.0);
    }

    #[test]
    fn partial_coverage_is_mean_of_ratios() {
        // 2 dorms: need 1 hall (have 1 → 100), 4 spots (have 2 → 50),
        // 1 cafe (have 0 → 0).
        let c = counts(&[
            (HOUSING, 2),
            (BuildingType::LectureHall, 1),
            (BuildingType::StudySpot, 2),
        ]);
        assert!((compute_wellbeing(&c) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn surplus_amenities_do_not_exceed_hundred() {
        let c = counts(&[
            (HOUSING, 1),
            (BuildingType::LectureHall, 10),
            (BuildingType::StudySpot, 10),
            (BuildingType::CoupaCafe, 10),
        ]);
        assert_eq!(compute_wellbeing(&c), 100.0);
    }

    #[test]
    fn penalty_grows_per_harmful_unit() {
        let params = WellbeingParams::default();
        let p = advance_penalty(0.0, 3, &params);
        assert!((p - 0.6).abs() < 1e-9);
    }

    #[test]
    fn penalty_decays_monotonically_to_exact_zero() {
        let params = WellbeingParams::default();
        let mut penalty = 1.05;
        let mut ticks = 0;
        while penalty > 0.0 {
            let next = advance_penalty(penalty, 0, &params);
            assert!(next < penalty);
            penalty = next;
            ticks += 1;
            assert!(ticks < 100, "penalty should reach zero");
        }
        assert_eq!(penalty, 0.0);
        for _ in 0..10 {
            penalty = advance_penalty(penalty, 0, &params);
            assert_eq!(penalty, 0.0);
        }
    }

    #[test]
    fn final_wellbeing_is_floored() {
        assert_eq!(final_wellbeing(20.0, 35.0, 0.0), 0.0);
        assert_eq!(final_wellbeing(80.0, 5.0, 0.0), 75.0);
    }
}
