//! Static game data
//!
//! Defines the eras, items, events and levels of the twentieth-century
//! timeline. Everything here is fixed at compile time; the mutable side of
//! the game lives in [`crate::game`].

pub mod era;
pub mod event;
pub mod item;
pub mod level;

pub use era::*;
pub use event::*;
pub use item::*;
pub use level::*;

use serde::{Deserialize, Serialize};

/// Timeline integrity, a percentage in `0..=100`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct Integrity(u8);

impl Integrity {
    pub const MAX: u8 = 100;

    pub fn new(percent: u8) -> Self {
        Self(percent.min(Self::MAX))
    }

    pub fn full() -> Self {
        Self(Self::MAX)
    }

    pub fn percent(&self) -> u8 {
        self.0
    }

    /// Raise by `amount`, capped at 100
    pub fn raise(&mut self, amount: u8) {
        self.0 = self.0.saturating_add(amount).min(Self::MAX);
    }

    pub fn restore(&mut self) {
        self.0 = Self::MAX;
    }

    /// Label used by the status meter
    pub fn grade(&self) -> &'static str {
        match self.0 {
            90..=100 => "Stable",
            60..=89 => "Wavering",
            30..=59 => "Fractured",
            _ => "Collapsing",
        }
    }
}

impl From<u8> for Integrity {
    fn from(percent: u8) -> Self {
        Self::new(percent)
    }
}

impl Default for Integrity {
    fn default() -> Self {
        Self::full()
    }
}

impl std::fmt::Display for Integrity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}%", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integrity_is_capped_at_one_hundred() {
        let mut integrity = Integrity::new(90);
        integrity.raise(20);
        assert_eq!(integrity.percent(), 100);

        integrity.raise(u8::MAX);
        assert_eq!(integrity.percent(), 100);
    }

    #[test]
    fn integrity_construction_clamps() {
        assert_eq!(Integrity::new(250).percent(), 100);
        assert_eq!(Integrity::new(0).percent(), 0);
        assert_eq!(Integrity::default(), Integrity::full());
    }

    #[test]
    fn deserializing_clamps_out_of_range_values() {
        let integrity: Integrity = serde_json::from_str("250").unwrap();
        assert_eq!(integrity, Integrity::full());

        let integrity: Integrity = serde_json::from_str("40").unwrap();
        assert_eq!(integrity.percent(), 40);
        assert_eq!(serde_json::to_string(&integrity).unwrap(), "40");
    }

    #[test]
    fn restore_returns_to_full() {
        let mut integrity = Integrity::new(12);
        assert_eq!(integrity.grade(), "Collapsing");
        integrity.restore();
        assert_eq!(integrity.to_string(), "100%");
        assert_eq!(integrity.grade(), "Stable");
    }
}
