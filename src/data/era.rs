//! The five destinations of the time machine

use super::{Event, Item};
use crate::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A historical setting the player can travel to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Era {
    #[serde(rename = "1920s")]
    Twenties,
    #[serde(rename = "1940s")]
    Forties,
    #[serde(rename = "1960s")]
    Sixties,
    #[serde(rename = "1980s")]
    Eighties,
    #[serde(rename = "1990s")]
    Nineties,
}

impl Era {
    /// Every era, in chronological order
    pub const ALL: [Era; 5] = [
        Era::Twenties,
        Era::Forties,
        Era::Sixties,
        Era::Eighties,
        Era::Nineties,
    ];

    /// Where every new session begins
    pub const START: Era = Era::Sixties;

    /// Position in [`Era::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn key(&self) -> &'static str {
        match self {
            Era::Twenties => "1920s",
            Era::Forties => "1940s",
            Era::Sixties => "1960s",
            Era::Eighties => "1980s",
            Era::Nineties => "1990s",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Era::Twenties => "Roaring Twenties",
            Era::Forties => "WWII Era",
            Era::Sixties => "Space Race",
            Era::Eighties => "Tech Boom",
            Era::Nineties => "Digital Age",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Era::Twenties => "Jazz, flappers, and prohibition",
            Era::Forties => "Innovation through adversity",
            Era::Sixties => "One giant leap for mankind",
            Era::Eighties => "Personal computers revolution",
            Era::Nineties => "The internet changes everything",
        }
    }

    /// Items that can be found here, in display order
    pub fn items(&self) -> &'static [Item] {
        match self {
            Era::Twenties => &[Item::VinylRecord, Item::ArtDecoBlueprint],
            Era::Forties => &[Item::RadioParts, Item::EncryptionCode],
            Era::Sixties => &[Item::MoonRock, Item::Transistor],
            Era::Eighties => &[Item::FloppyDisk, Item::Microchip],
            Era::Nineties => &[Item::CdRom, Item::Modem],
        }
    }

    /// Events that take place here, in display order
    pub fn events(&self) -> &'static [Event] {
        match self {
            Era::Twenties => &[Event::HelpMusician, Event::FindBlueprint],
            Era::Forties => &[Event::RepairRadio, Event::DecodeMessage],
            Era::Sixties => &[Event::HelpScientist, Event::FindTransistor],
            Era::Eighties => &[Event::FixComputer, Event::ProgramSoftware],
            Era::Nineties => &[Event::ConnectInternet, Event::UpgradeHardware],
        }
    }

    pub fn offers(&self, item: Item) -> bool {
        self.items().contains(&item)
    }

    pub fn hosts(&self, event: Event) -> bool {
        self.events().contains(&event)
    }
}

impl std::fmt::Display for Era {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Era {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Era::ALL
            .into_iter()
            .find(|era| era.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GameError::UnknownEra(wanted.to_string()))
    }
}
