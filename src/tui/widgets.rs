//! Custom widgets for the game UI

use crate::data::Integrity;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Horizontal meter for timeline integrity
pub struct IntegrityMeter {
    integrity: Integrity,
    color: Color,
    warning_threshold: u8,
    danger_threshold: u8,
}

impl IntegrityMeter {
    pub fn new(integrity: Integrity) -> Self {
        Self {
            integrity,
            color: Color::Green,
            warning_threshold: 60,
            danger_threshold: 30,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Low integrity is the dangerous end
    fn current_color(&self) -> Color {
        let value = self.integrity.percent();
        if value < self.danger_threshold {
            Color::Red
        } else if value < self.warning_threshold {
            Color::Yellow
        } else {
            self.color
        }
    }
}

impl Widget for IntegrityMeter {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let label = format!("Timeline {} ", self.integrity);
        let label_width = label.chars().count() as u16;
        if area.width < label_width + 3 || area.height < 1 {
            return;
        }

        let color = self.current_color();
        buf.set_string(area.x, area.y, &label, Style::default().fg(color));

        let bar_x = area.x + label_width;
        let inner = area.width - label_width - 2;
        let filled = (u32::from(self.integrity.percent()) * u32::from(inner)
            / u32::from(Integrity::MAX)) as u16;

        buf.set_string(bar_x, area.y, "[", Style::default());
        buf.set_string(bar_x + inner + 1, area.y, "]", Style::default());
        for x in 0..inner {
            let (glyph, style) = if x < filled {
                ("█", Style::default().fg(color))
            } else {
                ("░", Style::default().fg(Color::DarkGray))
            };
            buf.set_string(bar_x + 1 + x, area.y, glyph, style);
        }
    }
}

/// The transient message, centered on one line
pub struct MessageBanner<'a> {
    text: Option<&'a str>,
    color: Color,
}

impl<'a> MessageBanner<'a> {
    pub fn new(text: Option<&'a str>) -> Self {
        Self {
            text,
            color: Color::LightBlue,
        }
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }
}

impl Widget for MessageBanner<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some(text) = self.text else {
            return;
        };
        if area.width == 0 || area.height == 0 {
            return;
        }

        let width = text.chars().count().min(area.width as usize) as u16;
        let x = area.x + (area.width - width) / 2;
        buf.set_stringn(
            x,
            area.y,
            text,
            area.width as usize,
            Style::default().fg(self.color).add_modifier(Modifier::BOLD),
        );
    }
}

/// Double-lined box for the victory screen
pub struct VictoryBox {
    title: String,
    content: Vec<String>,
    border_color: Color,
}

impl VictoryBox {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: Vec::new(),
            border_color: Color::Yellow,
        }
    }

    pub fn content(mut self, lines: Vec<String>) -> Self {
        self.content = lines;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }
}

impl Widget for VictoryBox {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }
        let style = Style::default().fg(self.border_color);
        let right = area.x + area.width - 1;
        let bottom = area.y + area.height - 1;

        buf.set_string(area.x, area.y, "╔", style);
        buf.set_string(right, area.y, "╗", style);
        buf.set_string(area.x, bottom, "╚", style);
        buf.set_string(right, bottom, "╝", style);
        for x in area.x + 1..right {
            buf.set_string(x, area.y, "═", style);
            buf.set_string(x, bottom, "═", style);
        }
        for y in area.y + 1..bottom {
            buf.set_string(area.x, y, "║", style);
            buf.set_string(right, y, "║", style);
        }

        let title = format!(" {} ", self.title);
        let title_width = (title.chars().count() as u16).min(area.width - 2);
        buf.set_stringn(
            area.x + (area.width - title_width) / 2,
            area.y,
            &title,
            title_width as usize,
            style.add_modifier(Modifier::BOLD),
        );

        // Content lines centered, clipped to the inside of the box
        let inner_width = area.width - 4;
        for (i, line) in self.content.iter().enumerate() {
            let y = area.y + 1 + i as u16;
            if y >= bottom {
                break;
            }
            let width = (line.chars().count() as u16).min(inner_width);
            buf.set_stringn(
                area.x + 2 + (inner_width - width) / 2,
                y,
                line,
                inner_width as usize,
                Style::default().fg(Color::White),
            );
        }
    }
}
