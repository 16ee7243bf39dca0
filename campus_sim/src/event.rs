// Notifications emitted by the simulation.
//
// Every tick and player action returns the `SimEvent`s it produced, in the
// order they happened. These are the only side channel from the core to the
// presentation layer (news ticker, chat feed, toasts); the core never
// formats user-facing strings beyond the flavor text it draws from the
// narrative pools.
//
// See also: `sim.rs` for where each kind is emitted, `narrative.rs` for
// `Tone` and the pools behind the flavor text.

use crate::narrative::{ChatboardCategory, Tone};
use crate::types::BuildingType;
use serde::{Deserialize, Serialize};

/// A notification stamped with the campaign day it describes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimEvent {
    pub day: u32,
    pub kind: SimEventKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SimEventKind {
    /// Ambient news ticker item.
    News { tone: Tone, text: String },
    CampaignWon,
    CampaignLost,
    MissionDispensed { mission_id: String },
    MissionCompleted { mission_id: String, reward: f64 },
    /// A scripted event fired; carries its article.
    ScriptedEventFired {
        event_id: String,
        notable: String,
        milestone_title: String,
        article_message: String,
        historical_year: u32,
        student_dialogue: Vec<String>,
    },
    /// The notable's quote, to be shown after `delay_ticks`.
    DelayedQuote {
        notable: String,
        quote: String,
        delay_ticks: u32,
    },
    /// A scripted event made a building placeable early.
    BuildingUnlocked { building: BuildingType },
    VisitorChat { sender: String, text: String },
    VisitorPhoto { text: String, buzz_gain: f64, buzz: f64 },
    LegacyUnlocked { name: String, total: u64 },
    DonationReceived {
        notable: String,
        amount: u64,
        tier_description: String,
    },
    DonationMissed {
        notable: String,
        buzz: f64,
        required: f64,
    },
    GuestLectureStarted { notable: String, expires_on_day: u32 },
    GuestLectureEnded,
    ChatboardPosted {
        notable: String,
        category: ChatboardCategory,
    },
    VisitorDeparted { notable: String, legacy_energy: u64 },
    FocusSessionComplete { bonus: f64 },
    FocusStreakBroken,
}

impl SimEventKind {
    /// Presentation sentiment of this notification.
    pub fn tone(&self) -> Tone {
        match self {
            SimEventKind::News { tone, .. } => *tone,
            SimEventKind::CampaignWon
            | SimEventKind::MissionCompleted { .. }
            | SimEventKind::BuildingUnlocked { .. }
            | SimEventKind::LegacyUnlocked { .. }
            | SimEventKind::DonationReceived { .. }
            | SimEventKind::GuestLectureStarted { .. }
            | SimEventKind::FocusSessionComplete { .. } => Tone::Positive,
            SimEventKind::CampaignLost
            | SimEventKind::DonationMissed { .. }
            | SimEventKind::FocusStreakBroken => Tone::Negative,
            _ => Tone::Neutral,
        }
    }
}
