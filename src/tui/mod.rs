//! Terminal User Interface
//!
//! Renders the session with ratatui and turns key presses and typed commands
//! into game intents.

pub mod app;
pub mod widgets;

pub use app::App;

use crate::data::Era;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders},
};

/// Color scheme for the game
pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub accent: Color,
    pub alert: Color,
    pub success: Color,
    pub warning: Color,
    pub border: Color,
    pub focus: Color,
    pub header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            accent: Color::Magenta,
            alert: Color::Red,
            success: Color::Green,
            warning: Color::Yellow,
            border: Color::DarkGray,
            focus: Color::Cyan,
            header: Color::LightMagenta,
        }
    }
}

/// Signature color of an era
pub fn era_color(era: &Era) -> Color {
    match era {
        Era::Twenties => Color::Yellow,
        Era::Forties => Color::Gray,
        Era::Sixties => Color::Blue,
        Era::Eighties => Color::Magenta,
        Era::Nineties => Color::Green,
    }
}

/// Create a styled border block
pub fn styled_block<'a>(title: &str, theme: &Theme) -> Block<'a> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .title_style(Style::default().fg(theme.accent).add_modifier(Modifier::BOLD))
}

/// Same as [`styled_block`], highlighted when the panel has focus
pub fn focus_block<'a>(title: &str, theme: &Theme, focused: bool) -> Block<'a> {
    let block = styled_block(title, theme);
    if focused {
        block.border_style(Style::default().fg(theme.focus))
    } else {
        block
    }
}

/// Smaller logo for header
pub const SMALL_LOGO: &str = " ⏳ MY TIME MACHINE ";

/// Help text
pub const HELP_TEXT: &str = r#"
╔═══════════════════════════════════════════════════════════════╗
║                       CONTROLS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  1-5   Travel to 1920s / 1940s / 1960s / 1980s / 1990s        ║
║  Tab   Switch between Eras, Items and Events                  ║
║  ↑/↓   Move the selection                                     ║
║  Enter Travel / pick up / use on the selected entry           ║
║  [ ]   Choose which inventory item to use                     ║
║  :     Type a command                                         ║
║  h     Hint for the current mission                           ║
║  r     Reset the timeline                                     ║
║  ?     Toggle this help                                       ║
║  q     Quit game                                              ║
╠═══════════════════════════════════════════════════════════════╣
║                       COMMANDS                                ║
╠═══════════════════════════════════════════════════════════════╣
║  travel <era>          e.g. travel 1980s                      ║
║  take <item>           e.g. take transistor                   ║
║  use <item> <event>    e.g. use transistor help-scientist     ║
║  look | inventory | status | hint | dump | reset | clear      ║
╚═══════════════════════════════════════════════════════════════╝
"#;

/// Create the main layout
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),   // Header
            Constraint::Length(4),   // Mission
            Constraint::Min(12),     // Main content
            Constraint::Length(1),   // Status bar
        ])
        .split(area)
        .to_vec()
}

/// Create the game content layout (side panel + era view)
pub fn create_content_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(30),  // Eras and inventory
            Constraint::Percentage(70),  // Current era
        ])
        .split(area)
        .to_vec()
}

/// Create the side panel layout (era list + inventory)
pub fn create_side_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(Era::ALL.len() as u16 + 2),  // Eras
            Constraint::Min(4),                             // Inventory
        ])
        .split(area)
        .to_vec()
}

/// Create the era view layout (card, items, events, banner, journal, prompt)
pub fn create_era_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),   // Era card
            Constraint::Length(4),   // Items
            Constraint::Length(4),   // Events
            Constraint::Length(3),   // Message banner
            Constraint::Min(3),      // Journal
            Constraint::Length(3),   // Command prompt
        ])
        .split(area)
        .to_vec()
}

/// A rectangle of at most `width` x `height` centered in `area`
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
