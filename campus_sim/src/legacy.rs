// Long-lived rewards of scripted visits: the legacy-energy ledger, campus
// buzz, the guest-lecture buff and the chatboard.
//
// The ledger is append-only. Each departing visitor adds one record whose
// amount is `floor(raw * tier multiplier)`; any configured unlock threshold
// strictly crossed by that addition (previous total < threshold <= new total)
// is reported once, in ascending order.
//
// Buzz is a [0, max_buzz] scalar raised by visitor photos and read at
// departure to decide the donation and the guest lecture. It persists across
// visitors.
//
// The guest-lecture buff is time-boxed: activation sets (not extends) its
// expiry and magnitude; the orchestrator expires it every tick once the day
// reaches the expiry day. Nothing in the core reads its magnitude except the
// `TickModifier` hook.

use crate::config::LegacyParams;
use crate::narrative::ChatboardCategory;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One ledger entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LegacyEnergyRecord {
    pub amount: u64,
    pub source: String,
    /// Unlock names whose thresholds this record crossed.
    pub unlocks: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LegacyLedger {
    records: Vec<LegacyEnergyRecord>,
    total: u64,
}

impl LegacyLedger {
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn records(&self) -> &[LegacyEnergyRecord] {
        &self.records
    }

    /// Append a record and return the unlock names it triggered.
    pub fn record(&mut self, amount: u64, source: &str, params: &LegacyParams) -> Vec<String> {
        let previous = self.total;
        self.total = previous.saturating_add(amount);
        let unlocks: Vec<String> = if self.total > previous {
            params
                .unlocks
                .range(previous + 1..=self.total)
                .map(|(_, name)| name.clone())
                .collect()
        } else {
            Vec::new()
        };
        self.records.push(LegacyEnergyRecord {
            amount,
            source: source.to_string(),
            unlocks: unlocks.clone(),
        });
        unlocks
    }
}

/// Raw energy before the tier multiplier.
pub fn raw_energy(visited: usize, chats: u32, photos: u32, params: &LegacyParams) -> u64 {
    visited as u64 * params.energy_per_visited_building
        + u64::from(chats) * params.energy_per_chat
        + u64::from(photos) * params.energy_per_photo
}

/// Apply a tier multiplier, rounding down.
pub fn tiered_energy(raw: u64, multiplier: f64) -> u64 {
    (raw as f64 * multiplier).floor().max(0.0) as u64
}

/// Raise buzz, clamped to `[0, max]`.
pub fn add_buzz(buzz: f64, amount: f64, max: f64) -> f64 {
    (buzz + amount).clamp(0.0, max)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GuestLectureBonus {
    pub active: bool,
    pub expires_on_day: u32,
    pub magnitude: f64,
}

impl GuestLectureBonus {
    pub fn activate(&mut self, day: u32, params: &LegacyParams) {
        self.active = true;
        self.expires_on_day = day + params.guest_lecture_days;
        self.magnitude = params.guest_lecture_magnitude;
    }

    /// Deactivate once `day` reaches the expiry day. Returns whether it
    /// expired on this call.
    pub fn expire(&mut self, day: u32) -> bool {
        if self.active && day >= self.expires_on_day {
            self.active = false;
            self.magnitude = 0.0;
            true
        } else {
            false
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatboardMessage {
    pub id: String,
    pub notable: String,
    pub message: String,
    pub day: u32,
    pub category: ChatboardCategory,
}

/// Ring buffer of the most recent chatboard messages, newest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Chatboard {
    messages: VecDeque<ChatboardMessage>,
}

impl Chatboard {
    pub fn post(&mut self, message: ChatboardMessage, capacity: usize) {
        self.messages.push_front(message);
        self.messages.truncate(capacity);
    }

    pub fn messages(&self) -> impl Iterator<Item = &ChatboardMessage> {
        self.messages.iter()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn departure_energy_scenario() {
        let params = LegacyParams::default();
        let raw = raw_energy(3, 4, 2, &params);
        assert_eq!(raw, 56);
        assert_eq!(tiered_energy(raw, 1.5), 84);
        assert_eq!(tiered_energy(7, 1.5), 10);
    }

    #[test]
    fn crossing_reports_each_threshold_once_in_order() {
        let params = LegacyParams::default();
        let mut ledger = LegacyLedger::default();
        assert_eq!(ledger.record(20, "first", &params), Vec::<String>::new());

        let unlocks = ledger.record(84, "second", &params);
        assert_eq!(
            unlocks,
            vec![
                "Quantum Computing Lab Unlocked",
                "AI Research Center Unlocked",
                "Biotech Innovation Hub Unlocked",
                "Fusion Energy Breakthrough",
            ]
        );
        assert_eq!(ledger.total(), 104);
        assert_eq!(ledger.records().len(), 2);
        assert_eq!(ledger.records()[1].unlocks.len(), 4);
    }

    #[test]
    fn landing_exactly_on_threshold_counts() {
        let params = LegacyParams::default();
        let mut ledger = LegacyLedger::default();
        assert_eq!(ledger.record(25, "a", &params), vec!["Quantum Computing Lab Unlocked"]);
        // Starting on the threshold does not re-fire it.
        assert!(ledger.record(24, "b", &params).is_empty());
        assert_eq!(ledger.record(0, "c", &params), Vec::<String>::new());
    }

    #[test]
    fn buzz_is_clamped() {
        assert_eq!(add_buzz(95.0, 12.0, 100.0), 100.0);
        assert_eq!(add_buzz(10.0, 5.0, 100.0), 15.0);
    }

    #[test]
    fn guest_lecture_resets_instead_of_stacking() {
        let params = LegacyParams::default();
        let mut bonus = GuestLectureBonus::default();
        bonus.activate(100, &params);
        assert_eq!(bonus.expires_on_day, 107);
        bonus.activate(103, &params);
        assert_eq!(bonus.expires_on_day, 110);
        assert_eq!(bonus.magnitude, params.guest_lecture_magnitude);

        assert!(!bonus.expire(109));
        assert!(bonus.expire(110));
        assert!(!bonus.active);
        assert_eq!(bonus.magnitude, 0.0);
        assert!(!bonus.expire(111));
    }

    #[test]
    fn chatboard_keeps_latest_five() {
        let mut board = Chatboard::default();
        for day in 0..8 {
            board.post(
                ChatboardMessage {
                    id: format!("m{day}"),
                    notable: "Ada".into(),
                    message: "Ship it.".into(),
                    day,
                    category: ChatboardCategory::Advice,
                },
                5,
            );
        }
        assert_eq!(board.len(), 5);
        let days: Vec<_> = board.messages().map(|m| m.day).collect();
        assert_eq!(days, vec![7, 6, 5, 4, 3]);
    }
}
