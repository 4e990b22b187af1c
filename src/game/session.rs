//! The game state store

use crate::data::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// What has happened in one era
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EraState {
    pub era: Era,
    pub visited: bool,
    pub items_taken: BTreeSet<Item>,
    pub events_completed: BTreeSet<Event>,
}

impl EraState {
    pub fn new(era: Era) -> Self {
        Self {
            era,
            visited: era == Era::START,
            items_taken: BTreeSet::new(),
            events_completed: BTreeSet::new(),
        }
    }

    pub fn has_taken(&self, item: Item) -> bool {
        self.items_taken.contains(&item)
    }

    pub fn has_completed(&self, event: Event) -> bool {
        self.events_completed.contains(&event)
    }
}

/// A transient message for the player.
///
/// The serial identifies this particular showing so a delayed fade only
/// removes the message it was scheduled for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub serial: u64,
    pub text: String,
}

/// Everything the presentation layer needs to draw a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub current_era: Era,
    /// Held items in pickup order, no duplicates
    pub inventory: Vec<Item>,
    /// Indexed by [`Era::index`]
    pub eras: [EraState; 5],
    pub current_level: Level,
    pub timeline_integrity: Integrity,
    pub game_won: bool,
    pub message: Option<Message>,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            current_era: Era::START,
            inventory: Vec::new(),
            eras: Era::ALL.map(EraState::new),
            current_level: Level::default(),
            timeline_integrity: Integrity::full(),
            game_won: false,
            message: None,
        }
    }

    pub fn era_state(&self, era: Era) -> &EraState {
        &self.eras[era.index()]
    }

    pub(crate) fn era_state_mut(&mut self, era: Era) -> &mut EraState {
        &mut self.eras[era.index()]
    }

    /// State of the era the player is standing in
    pub fn here(&self) -> &EraState {
        self.era_state(self.current_era)
    }

    pub fn holds(&self, item: Item) -> bool {
        self.inventory.contains(&item)
    }

    pub fn is_completed(&self, era: Era, event: Event) -> bool {
        self.era_state(era).has_completed(event)
    }

    pub fn message_text(&self) -> Option<&str> {
        self.message.as_ref().map(|m| m.text.as_str())
    }

    /// Count of eras visited so far
    pub fn eras_visited(&self) -> usize {
        self.eras.iter().filter(|e| e.visited).count()
    }

    /// Mark `era` visited; returns true the first time
    pub(crate) fn visit(&mut self, era: Era) -> bool {
        let state = self.era_state_mut(era);
        let first = !state.visited;
        state.visited = true;
        first
    }

    /// Remove one copy of `item` from the inventory
    pub(crate) fn consume(&mut self, item: Item) -> bool {
        match self.inventory.iter().position(|held| *held == item) {
            Some(pos) => {
                self.inventory.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Clear the message only if it is still the showing with `serial`
    pub(crate) fn fade_message(&mut self, serial: u64) -> bool {
        if self.message.as_ref().is_some_and(|m| m.serial == serial) {
            self.message = None;
            true
        } else {
            false
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
