//! Collectible items

use super::Era;
use crate::GameError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Something the player can carry between eras
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Item {
    VinylRecord,
    ArtDecoBlueprint,
    RadioParts,
    EncryptionCode,
    MoonRock,
    Transistor,
    FloppyDisk,
    Microchip,
    CdRom,
    Modem,
}

impl Item {
    pub const ALL: [Item; 10] = [
        Item::VinylRecord,
        Item::ArtDecoBlueprint,
        Item::RadioParts,
        Item::EncryptionCode,
        Item::MoonRock,
        Item::Transistor,
        Item::FloppyDisk,
        Item::Microchip,
        Item::CdRom,
        Item::Modem,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Item::VinylRecord => "vinyl-record",
            Item::ArtDecoBlueprint => "art-deco-blueprint",
            Item::RadioParts => "radio-parts",
            Item::EncryptionCode => "encryption-code",
            Item::MoonRock => "moon-rock",
            Item::Transistor => "transistor",
            Item::FloppyDisk => "floppy-disk",
            Item::Microchip => "microchip",
            Item::CdRom => "cd-rom",
            Item::Modem => "modem",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Item::VinylRecord => "Vinyl Record",
            Item::ArtDecoBlueprint => "Art Deco Blueprint",
            Item::RadioParts => "Radio Parts",
            Item::EncryptionCode => "Encryption Code",
            Item::MoonRock => "Moon Rock",
            Item::Transistor => "Transistor",
            Item::FloppyDisk => "Floppy Disk",
            Item::Microchip => "Microchip",
            Item::CdRom => "CD-ROM",
            Item::Modem => "Modem",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Item::VinylRecord => "🎵",
            Item::ArtDecoBlueprint => "📐",
            Item::RadioParts => "📻",
            Item::EncryptionCode => "🔐",
            Item::MoonRock => "🌑",
            Item::Transistor => "⚡",
            Item::FloppyDisk => "💾",
            Item::Microchip => "🔲",
            Item::CdRom => "💿",
            Item::Modem => "📡",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Item::VinylRecord => "Jazz recording from 1920s",
            Item::ArtDecoBlueprint => "Building plans from the 1920s",
            Item::RadioParts => "Components for early communication",
            Item::EncryptionCode => "Secret wartime cipher",
            Item::MoonRock => "Sample from Apollo mission",
            Item::Transistor => "Revolutionary electronic component",
            Item::FloppyDisk => "Data storage from the 80s",
            Item::Microchip => "Integrated circuit processor",
            Item::CdRom => "Optical disc technology",
            Item::Modem => "Device for internet connection",
        }
    }

    /// The era this item is found in
    pub fn era(&self) -> Era {
        match self {
            Item::VinylRecord | Item::ArtDecoBlueprint => Era::Twenties,
            Item::RadioParts | Item::EncryptionCode => Era::Forties,
            Item::MoonRock | Item::Transistor => Era::Sixties,
            Item::FloppyDisk | Item::Microchip => Era::Eighties,
            Item::CdRom | Item::Modem => Era::Nineties,
        }
    }
}

impl std::fmt::Display for Item {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Item {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Item::ALL
            .into_iter()
            .find(|item| item.key().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| GameError::UnknownItem(wanted.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_era_agrees_with_era_table() {
        for item in Item::ALL {
            assert!(item.era().offers(item), "{item} missing from {}", item.era());
        }
        let listed: usize = Era::ALL.iter().map(|era| era.items().len()).sum();
        assert_eq!(listed, Item::ALL.len());
    }

    #[test]
    fn keys_round_trip_through_parse() {
        for item in Item::ALL {
            assert_eq!(item.key().parse::<Item>().unwrap(), item);
        }
        assert!("flux-capacitor".parse::<Item>().is_err());
    }

    #[test]
    fn serde_uses_the_same_keys() {
        assert_eq!(serde_json::to_string(&Item::CdRom).unwrap(), "\"cd-rom\"");
        assert_eq!(
            serde_json::to_string(&Item::ArtDecoBlueprint).unwrap(),
            "\"art-deco-blueprint\""
        );
    }
}
