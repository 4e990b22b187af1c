//! Matching a use of an item against the level script

use super::session::GameSession;
use crate::data::*;

/// How the active level's rule answers an attempted use
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The combination solves the level
    Solved(Rule),
    /// Right event in the right era of a gated rule, but not solved: earlier
    /// events are still open or the item is wrong
    Blocked,
    /// Not what the level is asking for
    NoEffect,
}

/// Judge `item` used on `event` in the current era at the current level
pub fn judge(session: &GameSession, item: Item, event: Event) -> Verdict {
    let rule = session.current_level.rule();
    let era = session.current_era;

    if !rule.targets(event, era) {
        return Verdict::NoEffect;
    }

    let ready = rule
        .prerequisites
        .iter()
        .all(|(era, event)| session.is_completed(*era, *event));
    if ready && rule.matches(item, event, era) {
        return Verdict::Solved(rule);
    }

    // A gated rule reports every miss on its target as blocked
    if rule.prerequisites.is_empty() {
        Verdict::NoEffect
    } else {
        Verdict::Blocked
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session_at(level: Level, era: Era) -> GameSession {
        let mut session = GameSession::new();
        session.current_level = level;
        session.current_era = era;
        session
    }

    #[test]
    fn transistor_helps_the_scientist_at_level_one() {
        let session = session_at(Level::FirstParadox, Era::Sixties);
        assert!(matches!(
            judge(&session, Item::Transistor, Event::HelpScientist),
            Verdict::Solved(rule) if rule.unlock == Unlock::Level(Level::CommunicationChain)
        ));
    }

    #[test]
    fn level_gates_the_rule() {
        let session = session_at(Level::CommunicationChain, Era::Sixties);
        assert_eq!(
            judge(&session, Item::Transistor, Event::HelpScientist),
            Verdict::NoEffect
        );

        let early = session_at(Level::FirstParadox, Era::Eighties);
        assert_eq!(
            judge(&early, Item::RadioParts, Event::FixComputer),
            Verdict::NoEffect
        );
    }

    #[test]
    fn era_gates_the_rule() {
        let session = session_at(Level::FirstParadox, Era::Eighties);
        assert_eq!(
            judge(&session, Item::Transistor, Event::HelpScientist),
            Verdict::NoEffect
        );
    }

    #[test]
    fn final_level_needs_earlier_events() {
        let mut session = session_at(Level::DigitalEvolution, Era::Nineties);
        assert_eq!(
            judge(&session, Item::Modem, Event::ConnectInternet),
            Verdict::Blocked
        );

        session
            .era_state_mut(Era::Sixties)
            .events_completed
            .insert(Event::HelpScientist);
        assert_eq!(
            judge(&session, Item::CdRom, Event::ConnectInternet),
            Verdict::Blocked
        );

        session
            .era_state_mut(Era::Eighties)
            .events_completed
            .insert(Event::FixComputer);
        assert!(matches!(
            judge(&session, Item::CdRom, Event::ConnectInternet),
            Verdict::Solved(rule) if rule.unlock == Unlock::Victory
        ));
        assert_eq!(
            judge(&session, Item::MoonRock, Event::ConnectInternet),
            Verdict::Blocked
        );
    }

    #[test]
    fn ungated_rule_misses_have_no_effect() {
        let session = session_at(Level::FirstParadox, Era::Sixties);
        assert_eq!(
            judge(&session, Item::MoonRock, Event::HelpScientist),
            Verdict::NoEffect
        );
    }
}
