// Campus metrics and school performance.
//
// Metrics: every placed building adds `bonus * count` to each metric named in
// its catalog stat-bonus map. The Wellbeing metric is not part of that sum; it
// mirrors the wellbeing score computed by `wellbeing.rs`, which is already in
// [0, 100].
//
// Schools: each school starts from 10 points per affiliated building, plus
// any flagship bonus from `catalog::FLAGSHIP_SCHOOL_BONUSES`, and is then
// boosted by a fixed linear combination of metrics (`SCHOOL_WEIGHTS`). The
// boost reads the metric sums *before* they are capped, so a campus with
// Innovation 140 still pushes Engineering by 70.
//
// Every metric except Wellbeing and every school score is clamped to
// [0, 100] independently.

use crate::catalog::{BuildingCatalog, FLAGSHIP_SCHOOL_BONUSES};
use crate::grid::BuildingCounts;
use crate::types::{SchoolType, StatCategory};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Points each affiliated building contributes to its school.
pub const SCHOOL_POINTS_PER_BUILDING: f64 = 10.0;

/// Metric weights that boost each school.
pub const SCHOOL_WEIGHTS: [(SchoolType, &[(StatCategory, f64)]); 7] = [
    (SchoolType::Engineering, &[(StatCategory::Innovation, 0.5)]),
    (SchoolType::Medicine, &[(StatCategory::Research, 0.5)]),
    (SchoolType::Business, &[(StatCategory::Prestige, 0.3)]),
    (SchoolType::Humanities, &[(StatCategory::Culture, 0.5)]),
    (SchoolType::Sustainability, &[(StatCategory::Nature, 0.5)]),
    (
        SchoolType::Education,
        &[(StatCategory::Research, 0.3), (StatCategory::Wellbeing, 0.2)],
    ),
    (
        SchoolType::Law,
        &[(StatCategory::Prestige, 0.2), (StatCategory::Culture, 0.2)],
    ),
];

/// Output of one metrics pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CampusScores {
    pub metrics: BTreeMap<StatCategory, f64>,
    pub schools: BTreeMap<SchoolType, f64>,
}

impl CampusScores {
    pub fn metric(&self, stat: StatCategory) -> f64 {
        self.metrics.get(&stat).copied().unwrap_or(0.0)
    }

    pub fn school(&self, school: SchoolType) -> f64 {
        self.schools.get(&school).copied().unwrap_or(0.0)
    }
}

fn cap(value: f64) -> f64 {
    value.clamp(0.0, 100.0)
}

/// Compute metrics and school scores from a building tally.
pub fn compute_metrics(
    counts: &BuildingCounts,
    catalog: &BuildingCatalog,
    wellbeing: f64,
) -> CampusScores {
    let mut metrics: BTreeMap<StatCategory, f64> =
        StatCategory::ALL.iter().map(|&s| (s, 0.0)).collect();
    let mut schools: BTreeMap<SchoolType, f64> =
        SchoolType::ALL.iter().map(|&s| (s, 0.0)).collect();

    for (building, count) in counts.iter() {
        let Some(entry) = catalog.get(building) else {
            continue;
        };
        let count = f64::from(count);

        for (&stat, &bonus) in &entry.stat_bonuses {
            if stat != StatCategory::Wellbeing {
                *metrics.entry(stat).or_insert(0.0) += bonus * count;
            }
        }

        if let Some(school) = entry.school {
            *schools.entry(school).or_insert(0.0) += SCHOOL_POINTS_PER_BUILDING * count;
            for &(flagship, flagship_school, bonus) in &FLAGSHIP_SCHOOL_BONUSES {
                if building == flagship && school == flagship_school {
                    *schools.entry(school).or_insert(0.0) += bonus;
                }
            }
        }
    }
    metrics.insert(StatCategory::Wellbeing, wellbeing);

    for (school, weights) in SCHOOL_WEIGHTS {
        let boost: f64 = weights
            .iter()
            .map(|&(stat, w)| metrics.get(&stat).copied().unwrap_or(0.0) * w)
            .sum();
        let score = schools.entry(school).or_insert(0.0);
        *score = cap(*score + boost);
    }

    for (&stat, value) in metrics.iter_mut() {
        if stat != StatCategory::Wellbeing {
            *value = cap(*value);
        }
    }

    CampusScores { metrics, schools }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BuildingType;

    fn counts(entries: &[(BuildingType, u32)]) -> BuildingCounts {
        entries.iter().copied().collect()
    }

    #[test]
    fn engineering_quad_flagship_bonus() {
        let catalog = BuildingCatalog::standard();
        let scores = compute_metrics(&counts(&[(BuildingType::EngineeringQuad, 1)]), &catalog, 80.0);
        // base 10 + flagship 50 + Innovation 40 * 0.5
        assert_eq!(scores.school(SchoolType::Engineering), 80.0);
        assert_eq!(scores.metric(StatCategory::Innovation), 40.0);
        assert_eq!(scores.metric(StatCategory::Research), 40.0);
        // Medicine: Research 40 * 0.5
        assert_eq!(scores.school(SchoolType::Medicine), 20.0);
        // Education: Research 40 * 0.3 + wellbeing 80 * 0.2
        assert!((scores.school(SchoolType::Education) - 28.0).abs() < 1e-9);
        assert_eq!(scores.metric(StatCategory::Wellbeing), 80.0);
    }

    #[test]
    fn two_quads_cap_engineering_at_hundred() {
        let catalog = BuildingCatalog::standard();
        let scores = compute_metrics(&counts(&[(BuildingType::EngineeringQuad, 2)]), &catalog, 50.0);
        assert_eq!(scores.school(SchoolType::Engineering), 100.0);
        assert_eq!(scores.metric(StatCategory::Innovation), 80.0);
    }

    #[test]
    fn school_boost_uses_uncapped_metrics() {
        let catalog = BuildingCatalog::standard();
        // 5 Rodin sculptures: Culture 125 (capped to 100), Humanities base 50.
        let scores = compute_metrics(&counts(&[(BuildingType::RodinSculpture, 5)]), &catalog, 100.0);
        assert_eq!(scores.metric(StatCategory::Culture), 100.0);
        // Law: Prestige 50 * 0.2 + Culture 125 * 0.2 = 35
        assert!((scores.school(SchoolType::Law) - 35.0).abs() < 1e-9);
    }

    #[test]
    fn negative_sums_clamp_to_zero() {
        let catalog = BuildingCatalog::standard();
        let scores = compute_metrics(&counts(&[(BuildingType::VapeStore, 3)]), &catalog, 40.0);
        assert_eq!(scores.metric(StatCategory::Culture), 0.0);
        assert_eq!(scores.school(SchoolType::Humanities), 0.0);
        assert_eq!(scores.school(SchoolType::Law), 0.0);
    }

    #[test]
    fn every_output_is_within_range() {
        let catalog = BuildingCatalog::standard();
        for &n in &[0u32, 1, 3, 25, 400] {
            let tally: BuildingCounts = BuildingType::ALL.iter().map(|&b| (b, n)).collect();
            for &wb in &[0.0, 37.5, 100.0] {
                let scores = compute_metrics(&tally, &catalog, wb);
                for (stat, v) in &scores.metrics {
                    assert!((0.0..=100.0).contains(v), "{stat:?} = {v}");
                }
                for (school, v) in &scores.schools {
                    assert!((0.0..=100.0).contains(v), "{school:?} = {v}");
                }
            }
        }
    }

    #[test]
    fn empty_campus_has_zero_schools() {
        let catalog = BuildingCatalog::standard();
        let scores = compute_metrics(&BuildingCounts::default(), &catalog, 100.0);
        assert_eq!(scores.school(SchoolType::Engineering), 0.0);
        // Education still picks up wellbeing * 0.2.
        assert_eq!(scores.school(SchoolType::Education), 20.0);
    }
}
