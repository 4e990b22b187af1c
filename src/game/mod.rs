//! Core game logic and state management
//!
//! [`Game`] owns the [`GameSession`] and the queue of deferred effects. Every
//! player intent goes through one of its operations; the host advances the
//! virtual clock with [`Game::advance`] so delayed effects can land.

pub mod rules;
pub mod schedule;
pub mod session;

pub use rules::{judge, Verdict};
pub use schedule::Schedule;
pub use session::{EraState, GameSession, Message};

use crate::config::Timings;
use crate::data::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Something the player asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    TravelTo(Era),
    PickUp(Item),
    Use(Item, Event),
    Reset,
}

impl Intent {
    pub fn description(&self) -> String {
        match self {
            Intent::TravelTo(era) => format!("Travel to {} ({})", era.name(), era),
            Intent::PickUp(item) => format!("Pick up {}", item.name()),
            Intent::Use(item, event) => format!("Use {} on {}", item.name(), event.label()),
            Intent::Reset => "Reset the timeline".to_string(),
        }
    }
}

/// How the game answered an intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed or a follow-up was scheduled
    Accepted,
    /// Nothing to do, nothing shown
    Ignored,
    /// Refused; the session is untouched apart from the message
    Rejected(Rejection),
}

/// Why an intent was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The item is already in the inventory
    AlreadyHeld,
    /// The item is not found in the current era at all
    NotInThisEra,
    /// The item was already taken from this era
    NoLongerHere,
    /// Tried to use an item that is not in the inventory
    NotHeld,
    /// The event has already been completed
    AlreadyDone,
    /// The final rule was not satisfied: earlier events are open or the item is wrong
    PreviousErasIncomplete,
    /// No rule of the current level matches
    NoEffect,
    /// The game is won; only a reset is accepted
    TimelineRestored,
}

impl Rejection {
    /// What the player is told, if anything
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Rejection::AlreadyHeld => Some("You already have this item!"),
            Rejection::NotInThisEra => Some("There's nothing like that here."),
            Rejection::NoLongerHere => Some("This item is no longer here."),
            Rejection::NotHeld => Some("You need the right item for this!"),
            Rejection::AlreadyDone => Some("That's already taken care of."),
            Rejection::PreviousErasIncomplete => Some("Complete previous eras first!"),
            Rejection::NoEffect => Some("This item doesn't work here yet..."),
            Rejection::TimelineRestored => None,
        }
    }

    /// Whether the message clears itself after the notice delay.
    /// Pickup refusals stay until something replaces them.
    fn fades(&self) -> bool {
        !matches!(
            self,
            Rejection::AlreadyHeld | Rejection::NotInThisEra | Rejection::NoLongerHere
        )
    }
}

/// A delayed effect waiting in the schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Deferred {
    /// Finish a trip; clears the travel message if it is still showing
    Arrive { era: Era, serial: u64 },
    /// Clear the message with this serial if it is still showing
    Fade { serial: u64 },
    /// Make `Level` the current one
    Unlock(Level),
    Victory,
}

/// The transition engine
#[derive(Debug, Clone)]
pub struct Game {
    session: GameSession,
    schedule: Schedule<Deferred>,
    timings: Timings,
    next_serial: u64,
    /// Every message shown since the last [`Game::take_notices`]
    notices: Vec<String>,
}

impl Game {
    pub fn new() -> Self {
        Self::with_timings(Timings::default())
    }

    pub fn with_timings(timings: Timings) -> Self {
        Self {
            session: GameSession::new(),
            schedule: Schedule::new(),
            timings,
            next_serial: 0,
            notices: Vec::new(),
        }
    }

    /// Read-only snapshot for rendering
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn timings(&self) -> &Timings {
        &self.timings
    }

    /// Virtual time since the game was created
    pub fn now(&self) -> Duration {
        self.schedule.now()
    }

    /// Number of deferred effects still waiting
    pub fn pending(&self) -> usize {
        self.schedule.len()
    }

    /// Messages shown since the last call, oldest first
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.notices)
    }

    /// Route an intent to its operation
    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        debug!(intent = ?intent, "dispatch");
        match intent {
            Intent::TravelTo(era) => self.travel_to_era(era),
            Intent::PickUp(item) => self.pick_up_item(item),
            Intent::Use(item, event) => self.use_item(item, event),
            Intent::Reset => self.reset_game(),
        }
    }

    /// Start a trip to `era`; the arrival lands after the travel delay
    pub fn travel_to_era(&mut self, era: Era) -> Outcome {
        if self.session.game_won {
            return self.reject(Rejection::TimelineRestored);
        }
        if era == self.session.current_era {
            return Outcome::Ignored;
        }

        let serial = self.say(format!("Traveling to {}...", era.name()));
        self.schedule.after(self.timings.travel, Deferred::Arrive { era, serial });
        info!(from = %self.session.current_era, to = %era, "travel started");
        Outcome::Accepted
    }

    /// Take `item` from the current era
    pub fn pick_up_item(&mut self, item: Item) -> Outcome {
        if self.session.game_won {
            return self.reject(Rejection::TimelineRestored);
        }
        if self.session.holds(item) {
            return self.reject(Rejection::AlreadyHeld);
        }
        let era = self.session.current_era;
        if !era.offers(item) {
            return self.reject(Rejection::NotInThisEra);
        }
        if self.session.here().has_taken(item) {
            return self.reject(Rejection::NoLongerHere);
        }

        self.session.inventory.push(item);
        self.session.era_state_mut(era).items_taken.insert(item);
        let serial = self.say(format!("Picked up {}!", item.name()));
        self.schedule.after(self.timings.notice, Deferred::Fade { serial });
        info!(item = %item, era = %era, "item picked up");
        Outcome::Accepted
    }

    /// Use a held item on an event of the current era
    pub fn use_item(&mut self, item: Item, event: Event) -> Outcome {
        if self.session.game_won {
            return self.reject(Rejection::TimelineRestored);
        }
        if !self.session.holds(item) {
            return self.reject(Rejection::NotHeld);
        }
        if self.session.here().has_completed(event) {
            return self.reject(Rejection::AlreadyDone);
        }

        let rule = match judge(&self.session, item, event) {
            Verdict::Solved(rule) => rule,
            Verdict::Blocked => return self.reject(Rejection::PreviousErasIncomplete),
            Verdict::NoEffect => return self.reject(Rejection::NoEffect),
        };

        self.session.consume(item);
        self.complete_event(event);
        match rule.gain {
            IntegrityGain::Raise(points) => self.session.timeline_integrity.raise(points),
            IntegrityGain::Restore => self.session.timeline_integrity.restore(),
        }
        self.say(rule.success_message.to_string());

        let next = match rule.unlock {
            Unlock::Level(level) => Deferred::Unlock(level),
            Unlock::Victory => Deferred::Victory,
        };
        self.schedule.after(self.timings.reveal, next);
        info!(
            level = self.session.current_level.number(),
            item = %item,
            event = %event,
            integrity = self.session.timeline_integrity.percent(),
            "level solved"
        );
        Outcome::Accepted
    }

    /// Record `event` as completed in the current era
    fn complete_event(&mut self, event: Event) -> bool {
        let era = self.session.current_era;
        self.session
            .era_state_mut(era)
            .events_completed
            .insert(event)
    }

    /// Put everything back the way a new session starts.
    ///
    /// Pending effects are dropped so nothing from the old run lands in the
    /// new one.
    pub fn reset_game(&mut self) -> Outcome {
        let dropped = self.schedule.len();
        self.session = GameSession::new();
        self.schedule.clear();
        info!(dropped_effects = dropped, "timeline reset");
        Outcome::Accepted
    }

    /// Move the clock forward by `elapsed`, applying every effect that falls
    /// due on the way (including ones scheduled by those effects)
    pub fn advance(&mut self, elapsed: Duration) {
        let until = self.schedule.now().saturating_add(elapsed);
        while let Some(task) = self.schedule.pop_due(until) {
            self.apply(task);
        }
        self.schedule.set_now(until);
    }

    /// Run the clock until nothing is pending
    pub fn settle(&mut self) {
        while let Some(due) = self.schedule.next_due() {
            let now = self.schedule.now();
            self.advance(due.saturating_sub(now));
        }
    }

    /// One-line summary for status bars
    pub fn status_line(&self) -> String {
        let s = &self.session;
        format!(
            "Level {} | Era: {} | Integrity: {} | Items: {} | Eras visited: {}/{}",
            s.current_level,
            s.current_era,
            s.timeline_integrity,
            s.inventory.len(),
            s.eras_visited(),
            Era::ALL.len(),
        )
    }

    fn apply(&mut self, task: Deferred) {
        match task {
            Deferred::Arrive { era, serial } => {
                self.session.current_era = era;
                if self.session.visit(era) {
                    info!(era = %era, "first visit");
                }
                self.session.fade_message(serial);
                debug!(era = %era, "arrived");
            }
            Deferred::Fade { serial } => {
                self.session.fade_message(serial);
            }
            Deferred::Unlock(level) => {
                self.session.current_level = level;
                let serial = self.say(level.unlock_banner());
                self.schedule.after(self.timings.banner, Deferred::Fade { serial });
                info!(level = level.number(), title = level.title(), "level unlocked");
            }
            Deferred::Victory => {
                self.session.game_won = true;
                info!("timeline restored, game won");
            }
        }
    }

    /// Show `text` as the current message and return its serial
    fn say(&mut self, text: String) -> u64 {
        self.next_serial += 1;
        let serial = self.next_serial;
        self.notices.push(text.clone());
        self.session.message = Some(Message { serial, text });
        serial
    }

    fn reject(&mut self, rejection: Rejection) -> Outcome {
        if let Some(text) = rejection.message() {
            let serial = self.say(text.to_string());
            if rejection.fades() {
                self.schedule.after(self.timings.notice, Deferred::Fade { serial });
            }
        }
        debug!(rejection = ?rejection, "intent rejected");
        Outcome::Rejected(rejection)
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn travel(game: &mut Game, era: Era) {
        game.travel_to_era(era);
        game.advance(game.timings().travel);
        assert_eq!(game.session().current_era, era);
    }

    /// Game at level one with the transistor in hand, standing in the 1960s
    fn holding_transistor() -> Game {
        let mut game = Game::new();
        assert_eq!(game.pick_up_item(Item::Transistor), Outcome::Accepted);
        game
    }

    #[test]
    fn travel_lands_after_the_delay() {
        let mut game = Game::new();
        assert_eq!(game.travel_to_era(Era::Forties), Outcome::Accepted);
        assert_eq!(game.session().message_text(), Some("Traveling to WWII Era..."));
        assert_eq!(game.session().current_era, Era::Sixties);
        assert!(!game.session().era_state(Era::Forties).visited);

        game.advance(ms(499));
        assert_eq!(game.session().current_era, Era::Sixties);

        game.advance(ms(1));
        assert_eq!(game.session().current_era, Era::Forties);
        assert!(game.session().era_state(Era::Forties).visited);
        assert_eq!(game.session().message, None);
    }

    #[test]
    fn travel_to_current_era_is_ignored() {
        let mut game = Game::new();
        assert_eq!(game.travel_to_era(Era::Sixties), Outcome::Ignored);
        assert_eq!(game.session().message, None);
        assert_eq!(game.pending(), 0);
    }

    #[test]
    fn revisiting_leaves_other_eras_alone() {
        let mut game = Game::new();
        travel(&mut game, Era::Twenties);
        travel(&mut game, Era::Sixties);
        travel(&mut game, Era::Twenties);

        let visited: Vec<_> = Era::ALL
            .into_iter()
            .filter(|era| game.session().era_state(*era).visited)
            .collect();
        assert_eq!(visited, vec![Era::Twenties, Era::Sixties]);
    }

    #[test]
    fn pickup_confirms_then_fades() {
        let mut game = Game::new();
        assert_eq!(game.pick_up_item(Item::MoonRock), Outcome::Accepted);
        assert_eq!(game.session().inventory, vec![Item::MoonRock]);
        assert!(game.session().here().has_taken(Item::MoonRock));
        assert_eq!(game.session().message_text(), Some("Picked up Moon Rock!"));

        game.advance(ms(1999));
        assert!(game.session().message.is_some());
        game.advance(ms(1));
        assert_eq!(game.session().message, None);
    }

    #[test]
    fn picking_up_twice_does_not_duplicate() {
        let mut game = holding_transistor();
        let before = game.session().clone();

        assert_eq!(
            game.pick_up_item(Item::Transistor),
            Outcome::Rejected(Rejection::AlreadyHeld)
        );
        assert_eq!(game.session().inventory, before.inventory);
        assert_eq!(game.session().message_text(), Some("You already have this item!"));
    }

    #[test]
    fn taken_item_is_no_longer_here() {
        let mut game = holding_transistor();
        game.use_item(Item::Transistor, Event::HelpScientist);
        assert!(!game.session().holds(Item::Transistor));

        assert_eq!(
            game.pick_up_item(Item::Transistor),
            Outcome::Rejected(Rejection::NoLongerHere)
        );
        assert!(game.session().inventory.is_empty());
        assert_eq!(game.session().message_text(), Some("This item is no longer here."));
    }

    #[test]
    fn pickup_refusals_do_not_fade() {
        let mut game = holding_transistor();
        game.advance(ms(2000));
        game.pick_up_item(Item::Transistor);
        game.advance(ms(60_000));
        assert_eq!(game.session().message_text(), Some("You already have this item!"));
    }

    #[test]
    fn items_from_other_eras_cannot_be_picked_up() {
        let mut game = Game::new();
        assert_eq!(
            game.pick_up_item(Item::Modem),
            Outcome::Rejected(Rejection::NotInThisEra)
        );
        assert!(game.session().inventory.is_empty());
        assert!(game.session().era_state(Era::Nineties).items_taken.is_empty());
    }

    #[test]
    fn using_an_unheld_item_changes_nothing() {
        let mut game = Game::new();
        let before = game.session().clone();

        assert_eq!(
            game.use_item(Item::Transistor, Event::HelpScientist),
            Outcome::Rejected(Rejection::NotHeld)
        );
        let after = GameSession {
            message: None,
            ..game.session().clone()
        };
        assert_eq!(after, before);
        assert_eq!(
            game.session().message_text(),
            Some("You need the right item for this!")
        );

        game.advance(ms(2000));
        assert_eq!(game.session().message, None);
    }

    #[test]
    fn wrong_combination_does_not_work_yet() {
        let mut game = Game::new();
        game.pick_up_item(Item::MoonRock);
        let before = game.session().clone();

        assert_eq!(
            game.use_item(Item::MoonRock, Event::HelpScientist),
            Outcome::Rejected(Rejection::NoEffect)
        );
        assert_eq!(game.session().inventory, before.inventory);
        assert_eq!(game.session().eras, before.eras);
        assert_eq!(
            game.session().message_text(),
            Some("This item doesn't work here yet...")
        );
    }

    #[test]
    fn solving_level_one_unlocks_level_two_later() {
        let mut game = holding_transistor();
        assert_eq!(
            game.use_item(Item::Transistor, Event::HelpScientist),
            Outcome::Accepted
        );

        let session = game.session();
        assert!(session.is_completed(Era::Sixties, Event::HelpScientist));
        assert!(session.inventory.is_empty());
        assert_eq!(session.timeline_integrity.percent(), 100);
        assert_eq!(session.current_level, Level::FirstParadox);
        assert_eq!(
            session.message_text(),
            Some("✓ You helped the scientist! The transistor advanced technology!")
        );

        game.advance(ms(2000));
        assert_eq!(game.session().current_level, Level::CommunicationChain);
        assert_eq!(
            game.session().message_text(),
            Some("Level 2 Unlocked: Communication Chain")
        );

        game.advance(ms(3000));
        assert_eq!(game.session().message, None);
    }

    #[test]
    fn completed_event_cannot_be_repeated() {
        let mut game = Game::new();
        game.session.current_level = Level::DigitalEvolution;
        game.session.current_era = Era::Nineties;
        for (era, event) in Level::DigitalEvolution.rule().prerequisites {
            game.session.era_state_mut(*era).events_completed.insert(*event);
        }
        game.pick_up_item(Item::Modem);
        game.pick_up_item(Item::CdRom);

        assert_eq!(game.use_item(Item::Modem, Event::ConnectInternet), Outcome::Accepted);
        assert_eq!(
            game.use_item(Item::CdRom, Event::ConnectInternet),
            Outcome::Rejected(Rejection::AlreadyDone)
        );
        assert_eq!(game.session().inventory, vec![Item::CdRom]);
    }

    #[test]
    fn final_rule_refuses_without_earlier_events() {
        let mut game = Game::new();
        game.session.current_level = Level::DigitalEvolution;
        travel(&mut game, Era::Nineties);
        game.pick_up_item(Item::Modem);
        let before = game.session().clone();

        assert_eq!(
            game.use_item(Item::Modem, Event::ConnectInternet),
            Outcome::Rejected(Rejection::PreviousErasIncomplete)
        );
        assert_eq!(game.session().inventory, before.inventory);
        assert_eq!(game.session().eras, before.eras);
        assert_eq!(game.session().message_text(), Some("Complete previous eras first!"));
    }

    #[test]
    fn final_rule_refuses_wrong_item_as_incomplete() {
        let mut game = Game::new();
        game.session.current_level = Level::DigitalEvolution;
        for (era, event) in Level::DigitalEvolution.rule().prerequisites {
            game.session.era_state_mut(*era).events_completed.insert(*event);
        }
        travel(&mut game, Era::Eighties);
        game.pick_up_item(Item::FloppyDisk);
        travel(&mut game, Era::Nineties);
        let before = game.session().clone();

        assert_eq!(
            game.use_item(Item::FloppyDisk, Event::ConnectInternet),
            Outcome::Rejected(Rejection::PreviousErasIncomplete)
        );
        assert_eq!(game.session().inventory, before.inventory);
        assert_eq!(game.session().eras, before.eras);
        assert_eq!(game.session().message_text(), Some("Complete previous eras first!"));

        game.advance(ms(2000));
        assert_eq!(game.session().message, None);
    }

    #[test]
    fn arrival_keeps_a_message_shown_mid_trip() {
        let mut game = Game::new();
        game.travel_to_era(Era::Forties);
        game.advance(ms(100));
        assert_eq!(game.pick_up_item(Item::MoonRock), Outcome::Accepted);

        game.advance(ms(400));
        assert_eq!(game.session().current_era, Era::Forties);
        assert_eq!(game.session().message_text(), Some("Picked up Moon Rock!"));

        game.advance(ms(1600));
        assert_eq!(game.session().message, None);
    }

    #[test]
    fn victory_lands_after_the_reveal() {
        let mut game = Game::new();
        game.session.current_level = Level::DigitalEvolution;
        game.session.timeline_integrity = Integrity::new(40);
        for (era, event) in Level::DigitalEvolution.rule().prerequisites {
            game.session.era_state_mut(*era).events_completed.insert(*event);
        }
        travel(&mut game, Era::Nineties);
        game.pick_up_item(Item::CdRom);

        assert_eq!(game.use_item(Item::CdRom, Event::ConnectInternet), Outcome::Accepted);
        assert_eq!(game.session().timeline_integrity.percent(), 100);
        assert!(!game.session().game_won);

        game.advance(ms(2000));
        assert!(game.session().game_won);
        assert_eq!(
            game.travel_to_era(Era::Twenties),
            Outcome::Rejected(Rejection::TimelineRestored)
        );
        assert_eq!(game.pending(), 0);
    }

    #[test]
    fn reset_restores_defaults_and_drops_pending_effects() {
        let mut game = holding_transistor();
        game.use_item(Item::Transistor, Event::HelpScientist);
        game.travel_to_era(Era::Eighties);
        assert!(game.pending() > 0);

        assert_eq!(game.reset_game(), Outcome::Accepted);
        assert_eq!(game.session(), &GameSession::new());
        assert_eq!(game.pending(), 0);

        game.advance(ms(10_000));
        assert_eq!(game.session(), &GameSession::new());
    }

    #[test]
    fn stale_fade_leaves_newer_message() {
        let mut game = Game::new();
        game.pick_up_item(Item::MoonRock);
        game.advance(ms(1900));
        game.pick_up_item(Item::MoonRock);

        // The pickup fade falls due here but the refusal replaced it
        game.advance(ms(100));
        assert_eq!(game.session().message_text(), Some("You already have this item!"));
    }

    #[test]
    fn overlapping_trips_end_at_the_latest_destination() {
        let mut game = Game::new();
        game.travel_to_era(Era::Twenties);
        game.advance(ms(200));
        game.travel_to_era(Era::Nineties);
        game.settle();

        assert_eq!(game.session().current_era, Era::Nineties);
        assert!(game.session().era_state(Era::Twenties).visited);
        assert_eq!(game.session().message, None);
    }

    #[test]
    fn dispatch_routes_intents() {
        let mut game = Game::new();
        assert_eq!(game.dispatch(Intent::PickUp(Item::Transistor)), Outcome::Accepted);
        assert_eq!(
            game.dispatch(Intent::Use(Item::Transistor, Event::HelpScientist)),
            Outcome::Accepted
        );
        assert_eq!(game.dispatch(Intent::TravelTo(Era::Forties)), Outcome::Accepted);
        game.settle();
        assert_eq!(game.session().current_level, Level::CommunicationChain);
        assert_eq!(game.dispatch(Intent::Reset), Outcome::Accepted);
        assert_eq!(game.session().current_level, Level::FirstParadox);
    }

    #[test]
    fn notices_record_every_message() {
        let mut game = Game::new();
        game.pick_up_item(Item::Transistor);
        game.pick_up_item(Item::Transistor);
        assert_eq!(
            game.take_notices(),
            vec!["Picked up Transistor!", "You already have this item!"]
        );
        assert!(game.take_notices().is_empty());
    }

    #[test]
    fn status_line_summarizes_progress() {
        let game = Game::new();
        assert_eq!(
            game.status_line(),
            "Level 1/3 | Era: 1960s | Integrity: 100% | Items: 0 | Eras visited: 1/5"
        );
        assert_eq!(
            Intent::Use(Item::Modem, Event::ConnectInternet).description(),
            "Use Modem on Connect to Internet (needs Modem/CD)"
        );
    }
}
