// Flavor-text pools and the rules for drawing from them.
//
// The wording is data (`NarrativePools`, part of `SimConfig`); this module
// owns only the selection contract: which pool a line comes from, keyed by
// the building the visitor stands on or by category, and which random draws
// decide it. Templates may contain `{name}`, replaced by the visiting
// notable's name.
//
// Draw order matters for reproducibility and is fixed:
// - ambient news: one pick from the neutral pool (none when protesting).
// - chat: context roll, template pick, sender pick.
// - photo: context roll (only if the building has a context pool), then pick.
// - chatboard: category pick, then message pick.

use crate::types::BuildingType;
use campus_prng::RandomSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sentiment of a notification, for presentation styling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChatboardCategory {
    Inspiration,
    Advice,
    Challenge,
}

impl ChatboardCategory {
    pub const ALL: [ChatboardCategory; 3] = [
        ChatboardCategory::Inspiration,
        ChatboardCategory::Advice,
        ChatboardCategory::Challenge,
    ];
}

/// A photo caption and how much campus buzz it generates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhotoTemplate {
    pub text: String,
    pub buzz: f64,
}

/// A chat line overheard during a visit.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatLine {
    pub sender: String,
    pub text: String,
}

/// All configurable wording plus the selection cut-offs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NarrativePools {
    pub news: Vec<String>,
    pub protest: String,
    pub chat_context: BTreeMap<BuildingType, Vec<String>>,
    pub chat_faculty: Vec<String>,
    pub chat_student: Vec<String>,
    pub chat_senders: Vec<String>,
    pub photo_context: BTreeMap<BuildingType, Vec<PhotoTemplate>>,
    pub photo_general: Vec<PhotoTemplate>,
    pub chatboard: BTreeMap<ChatboardCategory, Vec<String>>,
    /// A context chat line is used when the roll is above this.
    pub context_chat_above: f64,
    /// Otherwise a faculty line is used when the roll is above this.
    pub faculty_chat_above: f64,
    /// A context photo is used when the roll is above this.
    pub context_photo_above: f64,
}

fn fill(template: &str, name: &str) -> String {
    template.replace("{name}", name)
}

impl NarrativePools {
    /// One ambient news item: the protest line when wellbeing is low,
    /// otherwise a random neutral template.
    pub fn ambient_news<R: RandomSource>(
        &self,
        wellbeing: f64,
        protest_below: f64,
        rng: &mut R,
    ) -> Option<(Tone, String)> {
        if wellbeing < protest_below {
            return Some((Tone::Negative, self.protest.clone()));
        }
        rng.pick(&self.news).map(|t| (Tone::Neutral, t.clone()))
    }

    /// A chat line for a visitor standing on `building`.
    pub fn chat<R: RandomSource>(
        &self,
        name: &str,
        building: Option<BuildingType>,
        rng: &mut R,
    ) -> Option<ChatLine> {
        let roll = rng.next_f64();
        let context = building.and_then(|b| self.chat_context.get(&b));
        let pool = match context {
            Some(pool) if roll > self.context_chat_above => pool,
            _ if roll > self.faculty_chat_above => &self.chat_faculty,
            _ => &self.chat_student,
        };
        let text = rng.pick(pool)?;
        let sender = rng.pick(&self.chat_senders)?;
        Some(ChatLine {
            sender: sender.clone(),
            text: fill(text, name),
        })
    }

    /// A photo caption for a visitor standing on `building`.
    pub fn photo<R: RandomSource>(
        &self,
        name: &str,
        building: Option<BuildingType>,
        rng: &mut R,
    ) -> Option<PhotoTemplate> {
        let context = building
            .and_then(|b| self.photo_context.get(&b))
            .filter(|_| rng.next_f64() > self.context_photo_above);
        let pool = context.unwrap_or(&self.photo_general);
        rng.pick(pool).map(|p| PhotoTemplate {
            text: fill(&p.text, name),
            buzz: p.buzz,
        })
    }

    /// A chatboard message: uniform category, then uniform message.
    pub fn chatboard_message<R: RandomSource>(
        &self,
        rng: &mut R,
    ) -> Option<(ChatboardCategory, String)> {
        let category = *rng.pick(&ChatboardCategory::ALL)?;
        let message = rng.pick(self.chatboard.get(&category)?)?;
        Some((category, message.clone()))
    }

    /// The shipped wording.
    pub fn standard() -> Self {
        let strings = |lines: &[&str]| lines.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        let photos = |lines: &[(&str, f64)]| {
            lines
                .iter()
                .map(|&(text, buzz)| PhotoTemplate {
                    text: text.to_string(),
                    buzz,
                })
                .collect::<Vec<_>>()
        };

        let news = strings(&[
            "Students are loving the new study spots!",
            "The forest air is helping everyone focus.",
            "A squirrel was seen stealing a bagel at Coupa.",
            "Midterms are approaching, coffee consumption is up.",
            "The campus looks beautiful this time of year.",
            "More trees mean more shade for studying.",
            "Students are requesting more walking paths.",
            "Focus levels are at an all-time high.",
            "Someone left a laptop in the quad... and it's still there.",
            "The band is practicing nearby.",
            "Local residents appreciate the greenery.",
            "Alumni are visiting to see the new forest.",
            "Dorm life is buzzing with activity.",
        ]);

        let chat_context = BTreeMap::from([
            (
                BuildingType::EngineeringQuad,
                strings(&[
                    "{name} is touring the Engineering labs!",
                    "Just saw {name} reviewing student projects in Engineering",
                    "{name} is discussing AI research with professors",
                    "Engineering students are crowding around {name}!",
                ]),
            ),
            (
                BuildingType::LectureHall,
                strings(&[
                    "{name} just gave an impromptu lecture!",
                    "Students are taking notes as {name} speaks",
                    "{name} is answering questions in the lecture hall",
                    "The lecture hall is packed to see {name}!",
                ]),
            ),
            (
                BuildingType::DSchool,
                strings(&[
                    "{name} is critiquing design prototypes at the d.school",
                    "Design thinking session with {name} happening now!",
                    "{name} loves the creative energy at d.school",
                    "Students are pitching ideas to {name} at d.school",
                ]),
            ),
            (
                BuildingType::ArrillagaHall,
                strings(&[
                    "{name} is networking with business students",
                    "MBA students getting career advice from {name}",
                    "{name} sharing entrepreneurship stories at Arrillaga",
                    "Business school is buzzing with {name}'s visit",
                ]),
            ),
            (
                BuildingType::TrackField,
                strings(&[
                    "{name} is watching the track team practice!",
                    "Athletes are starstruck seeing {name} at the track",
                    "{name} is talking about discipline and performance",
                    "Track team getting motivational talk from {name}!",
                ]),
            ),
        ]);

        let chat_faculty = strings(&[
            "Professor just invited {name} to guest lecture next quarter",
            "Faculty are discussing research collaboration with {name}",
            "{name} is meeting with department heads",
            "Dean is giving {name} a campus tour",
            "{name} and professors talking about industry partnerships",
        ]);

        let chat_student = strings(&[
            "Just saw {name} chatting with a CS student!",
            "{name} is giving career advice at the quad",
            "OMG {name} just took a selfie with me!",
            "{name} stopped by my research lab!",
            "Can't believe {name} is here on campus!",
            "{name} just shared startup tips with our class",
            "Spotted {name} at the library!",
            "{name} is so down to earth, wow",
            "Just got a LinkedIn connection from {name}!",
            "{name} signed my laptop!",
            "{name} is answering questions about their company",
            "Students are asking {name} for internship advice",
        ]);

        let chat_senders = strings(&[
            "Excited Student",
            "CS Major",
            "MBA Candidate",
            "PhD Student",
            "Undergrad",
            "Grad Student",
            "Research Assistant",
            "Engineering Student",
            "Design Student",
            "Freshman",
        ]);

        let photo_context = BTreeMap::from([
            (
                BuildingType::EngineeringQuad,
                photos(&[
                    ("{name} selfie with Engineering students goes viral!", 8.0),
                    ("Epic photo: {name} in front of Engineering Quad!", 7.0),
                    ("{name} posing with student robotics project!", 10.0),
                ]),
            ),
            (
                BuildingType::MemorialChurch,
                photos(&[
                    ("Iconic: {name} at Stanford Memorial Church!", 12.0),
                    ("{name} photo at the heart of Stanford trending!", 10.0),
                ]),
            ),
            (
                BuildingType::DSchool,
                photos(&[
                    ("{name} design thinking photo session at d.school!", 9.0),
                    ("Creative energy: {name} with d.school students!", 8.0),
                ]),
            ),
            (
                BuildingType::HooverTower,
                photos(&[
                    ("{name} at Hoover Tower - Stanford's most iconic shot!", 15.0),
                    ("Legendary photo: {name} with Hoover Tower backdrop!", 12.0),
                ]),
            ),
        ]);

        let photo_general = photos(&[
            ("{name} photo goes viral on campus social media!", 5.0),
            ("Students posting selfies with {name} everywhere!", 6.0),
            ("{name} Instagram story gets 10k likes!", 7.0),
            ("Campus buzz: {name} sighting trending!", 5.0),
            ("{name} TikTok moment breaks the internet!", 10.0),
            ("Group photo with {name} becomes meme!", 8.0),
            ("{name} candid shot gets 50k retweets!", 9.0),
        ]);

        let chatboard = BTreeMap::from([
            (
                ChatboardCategory::Inspiration,
                strings(&[
                    "Dream big, work hard, and never give up on your vision.",
                    "The best time to start is now. Don't wait for the perfect moment.",
                    "Your Stanford education is just the beginning. Keep learning forever.",
                    "Failure is not the opposite of success, it's part of success.",
                    "Build something people want. Everything else is secondary.",
                    "The future belongs to those who believe in their dreams.",
                    "Take risks. You're young, brilliant, and at Stanford - you can do anything.",
                ]),
            ),
            (
                ChatboardCategory::Advice,
                strings(&[
                    "Focus on solving real problems, not chasing trends.",
                    "Surround yourself with people smarter than you.",
                    "Customer feedback is gold. Listen more than you talk.",
                    "Start small, think big, move fast.",
                    "Your network is your net worth. Build genuine relationships.",
                    "Execution beats ideas. Ship early, iterate often.",
                    "Don't be afraid to pivot when the data tells you to.",
                ]),
            ),
            (
                ChatboardCategory::Challenge,
                strings(&[
                    "What impossible problem will you solve this year?",
                    "Are you building something that matters?",
                    "Challenge yourself: what would you do if you couldn't fail?",
                    "The world needs your unique perspective. What will you create?",
                    "Don't just join a company. Start one.",
                    "Think 10x, not 10%. What's your moonshot?",
                    "Your generation will solve climate change. Are you ready?",
                ]),
            ),
        ]);

        Self {
            news,
            protest: "Students are protesting lack of amenities!".to_string(),
            chat_context,
            chat_faculty,
            chat_student,
            chat_senders,
            photo_context,
            photo_general,
            chatboard,
            context_chat_above: 0.3,
            faculty_chat_above: 0.7,
            context_photo_above: 0.4,
        }
    }
}
