//! Scripted objectives tied to an era

use super::Era;
use crate::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Event {
    HelpMusician,
    FindBlueprint,
    RepairRadio,
    DecodeMessage,
    HelpScientist,
    FindTransistor,
    FixComputer,
    ProgramSoftware,
    ConnectInternet,
    UpgradeHardware,
}

impl Event {
    pub const ALL: [Event; 10] = [
        Event::HelpMusician,
        Event::FindBlueprint,
        Event::RepairRadio,
        Event::DecodeMessage,
        Event::HelpScientist,
        Event::FindTransistor,
        Event::FixComputer,
        Event::ProgramSoftware,
        Event::ConnectInternet,
        Event::UpgradeHardware,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Event::HelpMusician => "help-musician",
            Event::FindBlueprint => "find-blueprint",
            Event::RepairRadio => "repair-radio",
            Event::DecodeMessage => "decode-message",
            Event::HelpScientist => "help-scientist",
            Event::FindTransistor => "find-transistor",
            Event::FixComputer => "fix-computer",
            Event::ProgramSoftware => "program-software",
            Event::ConnectInternet => "connect-internet",
            Event::UpgradeHardware => "upgrade-hardware",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Event::HelpMusician => "Help the Jazz Musician",
            Event::FindBlueprint => "Study Art Deco Plans",
            Event::RepairRadio => "Repair the Radio",
            Event::DecodeMessage => "Decode Secret Message",
            Event::HelpScientist => "Help the Scientist (needs Transistor)",
            Event::FindTransistor => "Find Electronic Components",
            Event::FixComputer => "Fix the Computer (needs Radio Parts)",
            Event::ProgramSoftware => "Program New Software",
            Event::ConnectInternet => "Connect to Internet (needs Modem/CD)",
            Event::UpgradeHardware => "Upgrade Hardware",
        }
    }

    pub fn era(&self) -> Era {
        match self {
            Event::HelpMusician | Event::FindBlueprint => Era::Twenties,
            Event::RepairRadio | Event::DecodeMessage => Era::Forties,
            Event::HelpScientist | Event::FindTransistor => Era::Sixties,
            Event::FixComputer | Event::ProgramSoftware => Era::Eighties,
            Event::ConnectInternet | Event::UpgradeHardware => Era::Nineties,
        }
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Event {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Event::ALL
            .into_iter()
            .find(|event| event.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GameError::UnknownEvent(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_era_agrees_with_era_table() {
        for event in Event::ALL {
            assert!(event.era().hosts(event), "{event}");
        }
    }

    #[test]
    fn unknown_key_is_reported() {
        let err = "save-the-world".parse::<Event>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown event: save-the-world");
    }
}
