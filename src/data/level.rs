//! The level script
//!
//! Three sequential missions. Each level carries exactly one success rule;
//! [`Level::rule`] is an exhaustive match so a new level cannot be added
//! without a rule.

use super::{Era, Event, Item};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    #[default]
    FirstParadox,
    CommunicationChain,
    DigitalEvolution,
}

/// What solving a level does to integrity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityGain {
    /// Add this many points, capped at 100
    Raise(u8),
    /// Set straight to 100
    Restore,
}

/// What happens once the success message has been on screen for a while
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unlock {
    Level(Level),
    Victory,
}

/// The single way to solve a level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    /// Any one of these items will do
    pub items: &'static [Item],
    pub event: Event,
    pub era: Era,
    /// Events that must already be completed, keyed by the era they belong to
    pub prerequisites: &'static [(Era, Event)],
    pub gain: IntegrityGain,
    pub unlock: Unlock,
    pub success_message: &'static str,
}

impl Rule {
    /// Whether `(item, event, era)` is this rule's combination
    pub fn matches(&self, item: Item, event: Event, era: Era) -> bool {
        self.items.contains(&item) && self.targets(event, era)
    }

    /// Whether the rule is about `event` happening in `era`, whatever the item
    pub fn targets(&self, event: Event, era: Era) -> bool {
        self.event == event && self.era == era
    }
}

impl Level {
    pub const ALL: [Level; 3] = [
        Level::FirstParadox,
        Level::CommunicationChain,
        Level::DigitalEvolution,
    ];

    pub fn number(&self) -> u8 {
        match self {
            Level::FirstParadox => 1,
            Level::CommunicationChain => 2,
            Level::DigitalEvolution => 3,
        }
    }

    pub fn next(&self) -> Option<Level> {
        match self {
            Level::FirstParadox => Some(Level::CommunicationChain),
            Level::CommunicationChain => Some(Level::DigitalEvolution),
            Level::DigitalEvolution => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Level::FirstParadox => "The First Paradox",
            Level::CommunicationChain => "Communication Chain",
            Level::DigitalEvolution => "Digital Evolution",
        }
    }

    pub fn objective(&self) -> &'static str {
        match self {
            Level::FirstParadox => "Help the scientist in 1960s by finding a transistor from 1980s",
            Level::CommunicationChain => "Fix the computer in 1980s using parts from 1940s",
            Level::DigitalEvolution => {
                "Enable internet in 1990s by ensuring tech development in earlier eras"
            }
        }
    }

    /// Walkthrough steps shown on request
    pub fn hints(&self) -> &'static [&'static str] {
        match self {
            Level::FirstParadox => &["Pick up transistor in 1980s", "Give it to scientist in 1960s"],
            Level::CommunicationChain => &[
                "Get radio parts in 1940s",
                "Use them to fix computer in 1980s",
            ],
            Level::DigitalEvolution => &["Complete all events in 1960s, 1980s, then 1990s"],
        }
    }

    pub fn rule(&self) -> Rule {
        match self {
            Level::FirstParadox => Rule {
                items: &[Item::Transistor],
                event: Event::HelpScientist,
                era: Era::Sixties,
                prerequisites: &[],
                gain: IntegrityGain::Raise(20),
                unlock: Unlock::Level(Level::CommunicationChain),
                success_message: "✓ You helped the scientist! The transistor advanced technology!",
            },
            Level::CommunicationChain => Rule {
                items: &[Item::RadioParts],
                event: Event::FixComputer,
                era: Era::Eighties,
                prerequisites: &[],
                gain: IntegrityGain::Raise(20),
                unlock: Unlock::Level(Level::DigitalEvolution),
                success_message: "✓ Computer repaired! Technology is advancing properly!",
            },
            Level::DigitalEvolution => Rule {
                items: &[Item::Modem, Item::CdRom],
                event: Event::ConnectInternet,
                era: Era::Nineties,
                prerequisites: &[
                    (Era::Sixties, Event::HelpScientist),
                    (Era::Eighties, Event::FixComputer),
                ],
                gain: IntegrityGain::Restore,
                unlock: Unlock::Victory,
                success_message: "✓ Internet connected! Timeline restored!",
            },
        }
    }

    /// Banner shown when this level becomes the current one
    pub fn unlock_banner(&self) -> String {
        format!("Level {} Unlocked: {}", self.number(), self.title())
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.number(), Level::ALL.len())
    }
}
