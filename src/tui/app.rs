//! Main application state and rendering

use crate::data::{Era, Event, Item};
use crate::game::{Game, Intent, Outcome, Rejection};
use crate::tui::widgets::{IntegrityMeter, MessageBanner, VictoryBox};
use crate::tui::{centered, era_color, focus_block, styled_block, Theme, HELP_TEXT, SMALL_LOGO};
use crate::tui::{create_content_layout, create_era_layout, create_main_layout, create_side_layout};
use crate::Config;
use chrono::{DateTime, Local};
use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use std::time::{Duration, Instant};
use tracing::debug;

/// Journal entries kept before the oldest are dropped
const JOURNAL_LIMIT: usize = 200;

/// Application state
pub struct App {
    pub game: Game,
    pub theme: Theme,
    pub running: bool,
    pub show_help: bool,
    pub focus: Panel,
    pub era_list: ListState,
    pub item_list: ListState,
    pub event_list: ListState,
    /// Which inventory slot Enter on an event uses
    pub selected_slot: usize,
    pub input_mode: InputMode,
    pub input_buffer: String,
    pub journal: Vec<JournalEntry>,
    tick_rate: Duration,
    last_tick: Instant,
}

/// Which panel arrow keys and Enter act on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Eras,
    Items,
    Events,
}

/// Input mode for command prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A command the player typed
    Command,
    /// A message the game showed
    Notice,
    System,
    Error,
}

/// One line of the journal
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub at: DateTime<Local>,
    pub kind: EntryKind,
    pub text: String,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let mut era_list = ListState::default();
        era_list.select(Some(Era::START.index()));
        let mut item_list = ListState::default();
        item_list.select(Some(0));
        let mut event_list = ListState::default();
        event_list.select(Some(0));

        let mut app = Self {
            game: Game::with_timings(config.timings),
            theme: Theme::default(),
            running: true,
            show_help: false,
            focus: Panel::Eras,
            era_list,
            item_list,
            event_list,
            selected_slot: 0,
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            journal: Vec::new(),
            tick_rate: config.tick_rate,
            last_tick: Instant::now(),
        };
        app.log(
            EntryKind::System,
            "The timeline is unraveling. Press ? for help, : to type commands.",
        );
        app
    }

    /// Wait up to one tick for a key, then advance the game clock.
    /// Returns false once the player quits.
    pub fn handle_input(&mut self) -> std::io::Result<bool> {
        if event::poll(self.tick_rate)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }

        let now = Instant::now();
        self.tick(now.duration_since(self.last_tick));
        self.last_tick = now;
        Ok(self.running)
    }

    /// Advance the game clock and collect whatever it said
    pub fn tick(&mut self, elapsed: Duration) {
        self.game.advance(elapsed);
        self.collect_notices();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.input_mode == InputMode::Command {
            match key.code {
                KeyCode::Enter => {
                    self.execute_command();
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Esc => {
                    self.input_buffer.clear();
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Backspace => {
                    self.input_buffer.pop();
                }
                KeyCode::Char(c) => self.input_buffer.push(c),
                _ => {}
            }
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        // Only a reset (or quitting) is offered once the timeline is restored
        if self.game.session().game_won {
            match key.code {
                KeyCode::Char('q') => self.running = false,
                KeyCode::Char('r') | KeyCode::Enter => self.dispatch(Intent::Reset),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') => self.running = false,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char(':') | KeyCode::Char('/') => {
                self.input_mode = InputMode::Command;
                self.input_buffer.clear();
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.era_list.select(Some(index));
                self.dispatch(Intent::TravelTo(Era::ALL[index]));
            }
            KeyCode::Char('[') => self.cycle_slot(false),
            KeyCode::Char(']') => self.cycle_slot(true),
            KeyCode::Char('h') => self.show_hint(),
            KeyCode::Char('r') => self.dispatch(Intent::Reset),
            KeyCode::Tab => self.cycle_panel(),
            KeyCode::Up => self.navigate(false),
            KeyCode::Down => self.navigate(true),
            KeyCode::Enter => self.handle_enter(),
            _ => {}
        }
    }

    /// Send an intent to the game and journal the result
    pub fn dispatch(&mut self, intent: Intent) {
        debug!(intent = %intent.description(), "ui intent");
        let outcome = self.game.dispatch(intent);
        self.collect_notices();

        match (intent, outcome) {
            (Intent::TravelTo(era), Outcome::Ignored) => {
                self.log(EntryKind::System, &format!("You are already in the {}.", era));
            }
            (Intent::Reset, Outcome::Accepted) => {
                self.selected_slot = 0;
                self.era_list.select(Some(Era::START.index()));
                self.log(EntryKind::System, "Timeline reset. Back to the Space Race.");
            }
            (_, Outcome::Rejected(Rejection::TimelineRestored)) => {
                self.log(EntryKind::System, "The timeline is already restored. Reset to play again.");
            }
            _ => {}
        }
    }

    /// The inventory item Enter on an event will use
    pub fn held_item(&self) -> Option<Item> {
        let inventory = &self.game.session().inventory;
        let last = inventory.len().checked_sub(1)?;
        inventory.get(self.selected_slot.min(last)).copied()
    }

    fn execute_command(&mut self) {
        let cmd = self.input_buffer.trim().to_string();
        self.input_buffer.clear();
        if cmd.is_empty() {
            return;
        }
        self.log(EntryKind::Command, &format!("> {}", cmd));

        for (kind, line) in self.process_command(&cmd) {
            self.log(kind, &line);
        }
    }

    /// Process a command and return journal lines
    pub fn process_command(&mut self, cmd: &str) -> Vec<(EntryKind, String)> {
        let lower = cmd.to_lowercase();
        let parts: Vec<&str> = lower.split_whitespace().collect();
        let Some((&verb, args)) = parts.split_first() else {
            return vec![];
        };

        let system = |text: &str| (EntryKind::System, text.to_string());
        let error = |text: String| (EntryKind::Error, text);

        match verb {
            "help" | "?" => vec![
                system("travel <era>         - Travel to 1920s, 1940s, 1960s, 1980s or 1990s"),
                system("take <item>          - Pick up an item in this era"),
                system("use <item> <event>   - Use a held item on an event here"),
                system("look                 - List what is here"),
                system("inventory            - List what you carry"),
                system("status | hint | dump | reset | clear"),
            ],

            "travel" | "go" => match args {
                [era] => match era.parse::<Era>() {
                    Ok(era) => {
                        self.dispatch(Intent::TravelTo(era));
                        vec![]
                    }
                    Err(e) => vec![error(e.to_string())],
                },
                _ => vec![error("Usage: travel <era>".to_string())],
            },

            "take" | "pick" | "get" => match args {
                [item] => match item.parse::<Item>() {
                    Ok(item) => {
                        self.dispatch(Intent::PickUp(item));
                        vec![]
                    }
                    Err(e) => vec![error(e.to_string())],
                },
                _ => vec![error("Usage: take <item>".to_string())],
            },

            "use" => {
                let args: Vec<&str> = args.iter().copied().filter(|a| *a != "on").collect();
                match args.as_slice() {
                    [item, event] => match (item.parse::<Item>(), event.parse::<Event>()) {
                        (Ok(item), Ok(event)) => {
                            self.dispatch(Intent::Use(item, event));
                            vec![]
                        }
                        (Err(e), _) | (_, Err(e)) => vec![error(e.to_string())],
                    },
                    _ => vec![error("Usage: use <item> <event>".to_string())],
                }
            }

            "look" | "ls" => {
                let session = self.game.session();
                let here = session.here();
                let era = session.current_era;
                let mut out = vec![system(&format!("{} ({}): {}", era.name(), era, era.description()))];
                for item in era.items() {
                    let state = if here.has_taken(*item) { "collected" } else { "available" };
                    out.push(system(&format!("  {} {} [{}] - {}", item.icon(), item.key(), state, item.description())));
                }
                for event in era.events() {
                    let state = if here.has_completed(*event) { "completed" } else { "open" };
                    out.push(system(&format!("  {} [{}] - {}", event.key(), state, event.label())));
                }
                out
            }

            "inventory" | "inv" | "i" => {
                let inventory = &self.game.session().inventory;
                if inventory.is_empty() {
                    vec![system("No items collected yet")]
                } else {
                    inventory
                        .iter()
                        .map(|item| system(&format!("  {} {} - {}", item.icon(), item.key(), item.name())))
                        .collect()
                }
            }

            "status" => vec![system(&self.game.status_line())],

            "hint" => self.hint_lines(),

            "dump" => match serde_json::to_string_pretty(self.game.session()) {
                Ok(json) => json.lines().map(system).collect(),
                Err(e) => vec![error(format!("Could not serialize session: {}", e))],
            },

            "reset" => {
                self.dispatch(Intent::Reset);
                vec![]
            }

            "clear" | "cls" => {
                self.journal.clear();
                vec![system("Journal cleared.")]
            }

            _ => vec![error(format!("Unknown command: {}. Type 'help' for commands.", verb))],
        }
    }

    fn hint_lines(&self) -> Vec<(EntryKind, String)> {
        let level = self.game.session().current_level;
        let mut out = vec![(EntryKind::System, format!("Mission {}: {}", level.number(), level.title()))];
        out.extend(
            level
                .hints()
                .iter()
                .enumerate()
                .map(|(i, hint)| (EntryKind::System, format!("  {}. {}", i + 1, hint))),
        );
        out
    }

    fn show_hint(&mut self) {
        for (kind, line) in self.hint_lines() {
            self.log(kind, &line);
        }
    }

    fn handle_enter(&mut self) {
        let session = self.game.session();
        let era = session.current_era;
        match self.focus {
            Panel::Eras => {
                let index = self.era_list.selected().unwrap_or(0).min(Era::ALL.len() - 1);
                self.dispatch(Intent::TravelTo(Era::ALL[index]));
            }
            Panel::Items => {
                let items = era.items();
                let index = self.item_list.selected().unwrap_or(0).min(items.len() - 1);
                self.dispatch(Intent::PickUp(items[index]));
            }
            Panel::Events => {
                let events = era.events();
                let index = self.event_list.selected().unwrap_or(0).min(events.len() - 1);
                match self.held_item() {
                    Some(item) => self.dispatch(Intent::Use(item, events[index])),
                    None => self.log(EntryKind::System, "Your inventory is empty."),
                }
            }
        }
    }

    fn cycle_panel(&mut self) {
        self.focus = match self.focus {
            Panel::Eras => Panel::Items,
            Panel::Items => Panel::Events,
            Panel::Events => Panel::Eras,
        };
    }

    fn navigate(&mut self, down: bool) {
        let era = self.game.session().current_era;
        let (state, len) = match self.focus {
            Panel::Eras => (&mut self.era_list, Era::ALL.len()),
            Panel::Items => (&mut self.item_list, era.items().len()),
            Panel::Events => (&mut self.event_list, era.events().len()),
        };
        let i = state.selected().unwrap_or(0);
        let next = if down { (i + 1).min(len - 1) } else { i.saturating_sub(1) };
        state.select(Some(next));
    }

    fn cycle_slot(&mut self, forward: bool) {
        let len = self.game.session().inventory.len();
        if len == 0 {
            self.selected_slot = 0;
            return;
        }
        let current = self.selected_slot.min(len - 1);
        self.selected_slot = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
    }

    fn collect_notices(&mut self) {
        for text in self.game.take_notices() {
            self.log(EntryKind::Notice, &text);
        }
    }

    fn log(&mut self, kind: EntryKind, text: &str) {
        self.journal.push(JournalEntry {
            at: Local::now(),
            kind,
            text: text.to_string(),
        });
        if self.journal.len() > JOURNAL_LIMIT {
            let excess = self.journal.len() - JOURNAL_LIMIT;
            self.journal.drain(..excess);
        }
    }

    // Rendering

    pub fn render(&mut self, frame: &mut Frame) {
        if self.game.session().game_won {
            self.render_victory(frame);
        } else {
            self.render_game(frame);
        }

        if self.show_help {
            self.render_help_overlay(frame);
        }
    }

    fn render_game(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let layout = create_main_layout(area);

        self.render_header(frame, layout[0]);
        self.render_mission(frame, layout[1]);

        let content = create_content_layout(layout[2]);
        let side = create_side_layout(content[0]);
        self.render_eras(frame, side[0]);
        self.render_inventory(frame, side[1]);

        let main = create_era_layout(content[1]);
        self.render_era_card(frame, main[0]);
        self.render_items(frame, main[1]);
        self.render_events(frame, main[2]);
        self.render_message(frame, main[3]);
        self.render_journal(frame, main[4]);
        self.render_prompt(frame, main[5]);

        self.render_status_bar(frame, layout[3]);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(24),
                Constraint::Min(20),
                Constraint::Length(40),
            ])
            .split(area);

        let logo = Paragraph::new(SMALL_LOGO)
            .style(Style::default().fg(self.theme.header).add_modifier(Modifier::BOLD))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(logo, chunks[0]);

        let session = self.game.session();
        let level = Paragraph::new(format!("Level {}  |  Time Paradox Puzzle - 20th Century", session.current_level))
            .style(Style::default().fg(self.theme.accent))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border)));
        frame.render_widget(level, chunks[1]);

        let meter_block = Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.border));
        let inner = meter_block.inner(chunks[2]);
        frame.render_widget(meter_block, chunks[2]);
        frame.render_widget(
            IntegrityMeter::new(session.timeline_integrity).color(self.theme.success),
            inner,
        );
    }

    fn render_mission(&self, frame: &mut Frame, area: Rect) {
        let level = self.game.session().current_level;
        let text = vec![
            Line::from(vec![
                Span::styled("⚡ Current Mission: ", Style::default().fg(self.theme.warning)),
                Span::styled(level.title(), Style::default().fg(self.theme.fg).add_modifier(Modifier::BOLD)),
            ]),
            Line::from(Span::styled(level.objective(), Style::default().fg(self.theme.header))),
        ];
        let mission = Paragraph::new(text)
            .block(styled_block("Mission", &self.theme))
            .wrap(Wrap { trim: true });
        frame.render_widget(mission, area);
    }

    fn render_eras(&mut self, frame: &mut Frame, area: Rect) {
        let session = self.game.session();
        let items: Vec<ListItem> = Era::ALL
            .iter()
            .enumerate()
            .map(|(i, era)| {
                let here = *era == session.current_era;
                let mut spans = vec![
                    Span::styled(format!("{} ", i + 1), Style::default().fg(self.theme.border)),
                    Span::styled(
                        format!("{:<17}", era.name()),
                        if here {
                            Style::default().fg(era_color(era)).add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(self.theme.fg)
                        },
                    ),
                    Span::styled(era.key(), Style::default().fg(self.theme.border)),
                ];
                if session.era_state(*era).visited {
                    spans.push(Span::styled(" ✓", Style::default().fg(self.theme.success)));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(focus_block("Time Travel", &self.theme, self.focus == Panel::Eras))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.era_list);
    }

    fn render_inventory(&self, frame: &mut Frame, area: Rect) {
        let inventory = &self.game.session().inventory;
        let selected = self.held_item();
        let lines: Vec<Line> = if inventory.is_empty() {
            vec![Line::from(Span::styled("No items collected yet", Style::default().fg(self.theme.border)))]
        } else {
            inventory
                .iter()
                .map(|item| {
                    let marker = if Some(*item) == selected { "▶ " } else { "  " };
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(self.theme.focus)),
                        Span::raw(format!("{} ", item.icon())),
                        Span::styled(item.name(), Style::default().fg(self.theme.fg).add_modifier(Modifier::BOLD)),
                    ])
                })
                .collect()
        };

        let panel = Paragraph::new(lines)
            .block(styled_block(&format!("Inventory ({})", inventory.len()), &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(panel, area);
    }

    fn render_era_card(&self, frame: &mut Frame, area: Rect) {
        let era = self.game.session().current_era;
        let color = era_color(&era);
        let text = vec![
            Line::from(Span::styled(era.name(), Style::default().fg(color).add_modifier(Modifier::BOLD))),
            Line::from(vec![
                Span::raw(era.description()),
                Span::styled(format!("  (Era: {})", era), Style::default().fg(self.theme.border)),
            ]),
        ];
        let card = Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color))
                .title(" Now "),
        );
        frame.render_widget(card, area);
    }

    fn render_items(&mut self, frame: &mut Frame, area: Rect) {
        let session = self.game.session();
        let here = session.here();
        let items: Vec<ListItem> = session
            .current_era
            .items()
            .iter()
            .map(|item| {
                let taken = here.has_taken(*item);
                let style = if taken {
                    Style::default().fg(self.theme.border)
                } else {
                    Style::default().fg(self.theme.fg)
                };
                let mut spans = vec![
                    Span::raw(format!("{} ", item.icon())),
                    Span::styled(item.name(), style),
                ];
                if taken {
                    spans.push(Span::styled("  Collected", Style::default().fg(self.theme.border)));
                } else {
                    spans.push(Span::styled(
                        format!("  {}", item.description()),
                        Style::default().fg(self.theme.border),
                    ));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(focus_block("Items Available", &self.theme, self.focus == Panel::Items))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.item_list);
    }

    fn render_events(&mut self, frame: &mut Frame, area: Rect) {
        let session = self.game.session();
        let here = session.here();
        let items: Vec<ListItem> = session
            .current_era
            .events()
            .iter()
            .map(|event| {
                if here.has_completed(*event) {
                    ListItem::new(Line::from(vec![
                        Span::styled(event.label(), Style::default().fg(self.theme.success)),
                        Span::styled("  ✓ Completed", Style::default().fg(self.theme.success)),
                    ]))
                } else {
                    ListItem::new(Line::from(Span::styled(event.label(), Style::default().fg(self.theme.fg))))
                }
            })
            .collect();

        let title = match self.held_item() {
            Some(item) => format!("Actions (using {} {})", item.icon(), item.name()),
            None => "Actions".to_string(),
        };
        let list = List::new(items)
            .block(focus_block(&title, &self.theme, self.focus == Panel::Events))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
        frame.render_stateful_widget(list, area, &mut self.event_list);
    }

    fn render_message(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(MessageBanner::new(self.game.session().message_text()), inner);
    }

    fn render_journal(&self, frame: &mut Frame, area: Rect) {
        let visible = area.height.saturating_sub(2) as usize;
        let start = self.journal.len().saturating_sub(visible);
        let lines: Vec<Line> = self.journal[start..]
            .iter()
            .map(|entry| {
                let color = match entry.kind {
                    EntryKind::Command => self.theme.fg,
                    EntryKind::Notice => Color::LightBlue,
                    EntryKind::System => self.theme.focus,
                    EntryKind::Error => self.theme.alert,
                };
                Line::from(vec![
                    Span::styled(entry.at.format("%H:%M:%S ").to_string(), Style::default().fg(self.theme.border)),
                    Span::styled(entry.text.as_str(), Style::default().fg(color)),
                ])
            })
            .collect();

        let journal = Paragraph::new(lines)
            .block(styled_block("Journal", &self.theme))
            .wrap(Wrap { trim: false });
        frame.render_widget(journal, area);
    }

    fn render_prompt(&self, frame: &mut Frame, area: Rect) {
        let active = self.input_mode == InputMode::Command;
        let era = self.game.session().current_era;
        let prompt = if active {
            format!("traveler@{}:~$ {}_", era, self.input_buffer)
        } else {
            format!("traveler@{}:~$ [Press : to type a command]", era)
        };

        let input = Paragraph::new(prompt)
            .style(Style::default().fg(if active { self.theme.success } else { self.theme.border }))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(if active { self.theme.success } else { self.theme.border }))
                    .title(" Command "),
            );
        frame.render_widget(input, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let status = Paragraph::new(format!(" {} | Press ? for help ", self.game.status_line()))
            .style(Style::default().fg(self.theme.fg).bg(Color::DarkGray));
        frame.render_widget(status, area);
    }

    fn render_victory(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Clear, area);
        frame.render_widget(Block::default().style(Style::default().bg(self.theme.bg)), area);

        let session = self.game.session();
        let lines = vec![
            String::new(),
            "🏆 Timeline Restored!".to_string(),
            String::new(),
            "You successfully navigated the paradoxes".to_string(),
            "of the 20th century and restored the timeline!".to_string(),
            String::new(),
            format!("Timeline Integrity: {}", session.timeline_integrity),
            "All 3 Levels Complete".to_string(),
            String::new(),
            "Press r or Enter to play again, q to quit".to_string(),
        ];
        let height = lines.len() as u16 + 2;
        frame.render_widget(
            VictoryBox::new("VICTORY").content(lines).border_color(self.theme.warning),
            centered(area, 56, height),
        );
    }

    fn render_help_overlay(&self, frame: &mut Frame) {
        let area = frame.area();
        let popup_area = centered(area, 68, 28);
        frame.render_widget(Clear, popup_area);

        let help = Paragraph::new(HELP_TEXT)
            .style(Style::default().fg(self.theme.fg))
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(self.theme.accent)));
        frame.render_widget(help, popup_area);
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
