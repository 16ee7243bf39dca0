// Year-indexed scripted events: notable alumni visiting campus.
//
// Each `ScriptedEvent` names a trigger year (1..=10). On the first tick whose
// campaign year matches, the first not-yet-fired event for that year fires:
// it is marked fired, announced, may unlock a building early, and spawns a
// visitor at the centerpiece if none is active (see `visitor.rs` for the
// walk/visit/chat machine and `sim.rs` for the departure sequence).
//
// The discipline table maps an event id to the building types its visitor
// cares about; unmapped ids fall back to the centerpiece.
//
// Event `bonuses` and `growth_modifiers` are carried as data only. The core
// records them for the `TickModifier` hook and applies no formula of its own.

use crate::catalog::{CENTERPIECE, DAYS_PER_YEAR};
use crate::types::{BuildingType, SchoolType, StatCategory};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// First calendar year the campaign maps onto.
pub const HISTORICAL_START_YEAR: u32 = 1950;
/// Calendar years represented by one campaign year.
pub const HISTORICAL_YEARS_PER_CAMPAIGN_YEAR: f64 = 7.5;

/// Campaign year (1-based) for a day.
pub fn campaign_year(day: u32) -> u32 {
    day / DAYS_PER_YEAR + 1
}

/// Calendar year shown alongside a campaign day.
pub fn historical_year(day: u32) -> u32 {
    let years = f64::from(day) / f64::from(DAYS_PER_YEAR);
    (f64::from(HISTORICAL_START_YEAR) + years * HISTORICAL_YEARS_PER_CAMPAIGN_YEAR).floor() as u32
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEvent {
    pub id: String,
    pub trigger_year: u32,
    /// The real-world year the event commemorates.
    pub historical_year: u32,
    pub notable: String,
    pub milestone_title: String,
    pub article_message: String,
    pub direct_quote: String,
    /// Donation tier (1 is the largest). `None` means the default tier.
    #[serde(default)]
    pub tier: Option<u8>,
    #[serde(default)]
    pub donation: Option<u64>,
    #[serde(default)]
    pub bonuses: BTreeMap<StatCategory, f64>,
    #[serde(default)]
    pub growth_modifiers: BTreeMap<SchoolType, f64>,
    /// Building made placeable immediately, ahead of its unlock day.
    #[serde(default)]
    pub building_unlock: Option<BuildingType>,
    /// Lines students say about the event, for the frontend's chat feed.
    #[serde(default)]
    pub student_dialogue: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptedEventCatalog {
    pub events: Vec<ScriptedEvent>,
    /// Event id → buildings its visitor tours.
    pub disciplines: BTreeMap<String, Vec<BuildingType>>,
}

impl ScriptedEventCatalog {
    pub fn get(&self, id: &str) -> Option<&ScriptedEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// The event that should fire on `day`, if any: the first catalog entry
    /// for the current campaign year that has not fired.
    pub fn due(&self, day: u32, fired: &BTreeSet<String>) -> Option<&ScriptedEvent> {
        let year = campaign_year(day);
        self.events
            .iter()
            .find(|e| e.trigger_year == year && !fired.contains(&e.id))
    }

    /// Building types relevant to an event's visitor.
    pub fn relevant_buildings(&self, event_id: &str) -> &[BuildingType] {
        match self.disciplines.get(event_id) {
            Some(buildings) if !buildings.is_empty() => buildings.as_slice(),
            _ => &[CENTERPIECE],
        }
    }

    /// The shipped alumni timeline and discipline table.
    pub fn standard() -> Self {
        use BuildingType as B;

        let disciplines: BTreeMap<String, Vec<BuildingType>> = [
            ("hp_engineering_quad", vec![B::EngineeringQuad, B::LectureHall]),
            ("nike_knight", vec![B::TrackField, B::FootballField]),
            ("trader_joes", vec![B::TraderJoes, B::CoupaCafe]),
            ("sun_microsystems", vec![B::EngineeringQuad]),
            ("cisco_systems", vec![B::EngineeringQuad]),
            ("yahoo_jerry_david", vec![B::EngineeringQuad, B::LectureHall]),
            ("google_larry_sergey", vec![B::EngineeringQuad]),
            ("netflix_hastings", vec![B::ArrillagaHall]),
            ("paypal_thiel", vec![B::ArrillagaHall]),
            ("linkedin_hoffman", vec![B::ArrillagaHall]),
            ("tesla_musk", vec![B::EngineeringQuad]),
            ("youtube_jawed", vec![B::EngineeringQuad]),
            ("instagram_systrom", vec![B::DSchool, B::ArrillagaHall]),
            ("snapchat_spiegel", vec![B::DSchool]),
            ("stripe_collison", vec![B::EngineeringQuad]),
            ("openai_altman", vec![B::EngineeringQuad]),
            ("nvidia_huang", vec![B::EngineeringQuad]),
            ("dschool_kelley", vec![B::DSchool]),
        ]
        .into_iter()
        .map(|(id, buildings)| (id.to_string(), buildings))
        .collect();

        let event = |id: &str,
                     trigger_year: u32,
                     historical_year: u32,
                     notable: &str,
                     milestone_title: &str,
                     article_message: &str,
                     direct_quote: &str,
                     student_dialogue: &[&str]| ScriptedEvent {
            id: id.to_string(),
            trigger_year,
            historical_year,
            notable: notable.to_string(),
            milestone_title: milestone_title.to_string(),
            article_message: article_message.to_string(),
            direct_quote: direct_quote.to_string(),
            tier: None,
            donation: None,
            bonuses: BTreeMap::new(),
            growth_modifiers: BTreeMap::new(),
            building_unlock: None,
            student_dialogue: student_dialogue.iter().map(|s| s.to_string()).collect(),
        };

        let events = vec![
            ScriptedEvent {
                tier: Some(1),
                donation: Some(100_000_000),
                bonuses: BTreeMap::from([(StatCategory::Innovation, 5.0)]),
                growth_modifiers: BTreeMap::from([(SchoolType::Engineering, 0.1)]),
                ..event(
                    "hp_engineering_quad",
                    1,
                    1950,
                    "Bill Hewlett & David Packard",
                    "The Garage That Started It All",
                    "Two engineering alumni return to fund labs for the next generation of builders.",
                    "Start in a garage if you have to. Just start.",
                    &["Is that really the garage from the history books?", "My lab partner wants to start a company in her parents' garage now."],
                )
            },
            ScriptedEvent {
                tier: Some(2),
                donation: Some(25_000_000),
                bonuses: BTreeMap::from([(StatCategory::Prestige, 3.0)]),
                growth_modifiers: BTreeMap::from([(SchoolType::Business, 0.05)]),
                ..event(
                    "nike_knight",
                    2,
                    1962,
                    "Phil Knight",
                    "A Business Plan for Running Shoes",
                    "A business school paper about athletic shoes becomes a global brand.",
                    "Play by the rules, but be ferocious.",
                    &["The track team is getting new spikes!", "I read his class paper. It's actually pretty short."],
                )
            },
            ScriptedEvent {
                tier: Some(3),
                donation: Some(5_000_000),
                bonuses: BTreeMap::from([(StatCategory::Culture, 2.0)]),
                ..event(
                    "trader_joes",
                    3,
                    1967,
                    "Joe Coulombe",
                    "A Grocery Store with a Personality",
                    "An alumnus opens a neighbourhood grocery that students swear by.",
                    "Give people something they can't get anywhere else.",
                    &["Finally, decent snacks near campus.", "The frozen aisle alone is worth the bike ride."],
                )
            },
            ScriptedEvent {
                bonuses: BTreeMap::from([(StatCategory::Research, 3.0)]),
                ..event(
                    "sun_microsystems",
                    4,
                    1982,
                    "Andy Bechtolsheim & Scott McNealy",
                    "The Network Is the Computer",
                    "A workstation designed on campus ships to universities worldwide.",
                    "Build the tool you wish existed, then give it to everyone.",
                    &["Our CS lab still has one of those workstations.", "Open standards for the win."],
                )
            },
            ScriptedEvent {
                bonuses: BTreeMap::from([(StatCategory::Innovation, 3.0)]),
                ..event(
                    "cisco_systems",
                    5,
                    1984,
                    "Len Bosack & Sandy Lerner",
                    "Connecting the Campus Networks",
                    "Two campus staffers wire departments together and found a networking giant.",
                    "We just wanted to send email across campus.",
                    &["Wait, they met working at the computer center?", "Every router on campus traces back to this."],
                )
            },
            ScriptedEvent {
                tier: Some(2),
                donation: Some(25_000_000),
                bonuses: BTreeMap::from([(StatCategory::Innovation, 4.0)]),
                growth_modifiers: BTreeMap::from([(SchoolType::Engineering, 0.05)]),
                ..event(
                    "yahoo_jerry_david",
                    6,
                    1994,
                    "Jerry Yang & David Filo",
                    "A Guide to the World Wide Web",
                    "Two graduate students turn a list of bookmarks into the front page of the web.",
                    "We were just organizing our favorite links.",
                    &["They built it in a trailer behind the engineering building!", "I keep a bookmarks list too. Should I drop out?"],
                )
            },
            ScriptedEvent {
                tier: Some(1),
                donation: Some(100_000_000),
                bonuses: BTreeMap::from([
                    (StatCategory::Innovation, 8.0),
                    (StatCategory::Research, 5.0),
                ]),
                growth_modifiers: BTreeMap::from([(SchoolType::Engineering, 0.15)]),
                building_unlock: Some(B::EngineeringQuad),
                ..event(
                    "google_larry_sergey",
                    7,
                    1998,
                    "Larry Page & Sergey Brin",
                    "Organizing the World's Information",
                    "A research project on ranking web pages outgrows its dorm-room servers.",
                    "Have a healthy disregard for the impossible.",
                    &["Their first server rack was made of LEGO bricks.", "I hope they fund more GPUs for the AI lab."],
                )
            },
            ScriptedEvent {
                bonuses: BTreeMap::from([(StatCategory::Culture, 3.0)]),
                ..event(
                    "netflix_hastings",
                    8,
                    1997,
                    "Reed Hastings",
                    "Movies by Mail",
                    "A computer science alumnus reinvents how the world watches film.",
                    "Most entrepreneurial ideas will sound crazy at first.",
                    &["He used to mail DVDs? Wild.", "Movie night in the dorm is on him, then."],
                )
            },
            ScriptedEvent {
                tier: Some(3),
                donation: Some(5_000_000),
                bonuses: BTreeMap::from([(StatCategory::Culture, 4.0)]),
                growth_modifiers: BTreeMap::from([(SchoolType::Humanities, 0.05)]),
                ..event(
                    "instagram_systrom",
                    9,
                    2010,
                    "Kevin Systrom",
                    "A Filter for Everything",
                    "A photo-sharing app born from a design class reaches a billion people.",
                    "Do the simple thing first.",
                    &["The d.school is packed today.", "Everyone is taking photos of the quad with filters now."],
                )
            },
            ScriptedEvent {
                tier: Some(1),
                donation: Some(100_000_000),
                bonuses: BTreeMap::from([
                    (StatCategory::Research, 8.0),
                    (StatCategory::Innovation, 6.0),
                ]),
                growth_modifiers: BTreeMap::from([(SchoolType::Engineering, 0.2)]),
                ..event(
                    "nvidia_huang",
                    10,
                    2017,
                    "Jensen Huang",
                    "Accelerated Computing Comes Home",
                    "An electrical engineering alumnus funds the next wave of computing research.",
                    "Pain and suffering build character.",
                    &["He said the same thing at commencement!", "The new compute cluster is going to be huge."],
                )
            },
        ];

        Self {
            events,
            disciplines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_boundaries() {
        assert_eq!(campaign_year(0), 1);
        assert_eq!(campaign_year(364), 1);
        assert_eq!(campaign_year(365), 2);
        assert_eq!(campaign_year(3649), 10);
    }

    #[test]
    fn historical_year_maps_ten_years_onto_seventy_five() {
        assert_eq!(historical_year(0), 1950);
        assert_eq!(historical_year(365), 1957);
        assert_eq!(historical_year(730), 1965);
        assert_eq!(historical_year(3650), 2025);
    }

    #[test]
    fn standard_catalog_has_one_event_per_year() {
        let catalog = ScriptedEventCatalog::standard();
        let years: Vec<_> = catalog.events.iter().map(|e| e.trigger_year).collect();
        assert_eq!(years, (1..=10).collect::<Vec<_>>());
        for event in &catalog.events {
            assert!(catalog.disciplines.contains_key(&event.id), "{}", event.id);
            assert!(!event.student_dialogue.is_empty(), "{} has no dialogue", event.id);
            if event.donation.is_some() {
                assert!(event.tier.is_some(), "{} donates without a tier", event.id);
            }
        }
    }

    #[test]
    fn due_skips_fired_events() {
        let catalog = ScriptedEventCatalog::standard();
        let mut fired = BTreeSet::new();
        assert_eq!(catalog.due(0, &fired).unwrap().id, "hp_engineering_quad");
        fired.insert("hp_engineering_quad".to_string());
        assert!(catalog.due(10, &fired).is_none());
        assert_eq!(catalog.due(400, &fired).unwrap().id, "nike_knight");
    }

    #[test]
    fn unmapped_event_defaults_to_centerpiece() {
        let catalog = ScriptedEventCatalog::standard();
        assert_eq!(catalog.relevant_buildings("unknown"), &[CENTERPIECE]);
        assert_eq!(
            catalog.relevant_buildings("trader_joes"),
            &[BuildingType::TraderJoes, BuildingType::CoupaCafe]
        );
    }
}
