//! Built-in slot widgets: clock, breadcrumbs, plain text

use chrono::Local;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::registry::SlotContent;

/// Session clock, re-read from the wall clock on every draw tick.
pub struct ClockWidget;

impl SlotContent for ClockWidget {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let now = Local::now();
        let line = Line::from(vec![
            Span::styled(
                now.format("%H:%M:%S").to_string(),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(
                now.format("  %a %d %b").to_string(),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        frame.render_widget(Paragraph::new(line).right_aligned(), area);
    }

    fn width_hint(&self) -> u16 {
        19
    }
}

/// Breadcrumb trail for the files page. Re-registered under the same slot id
/// whenever the directory changes.
pub struct BreadcrumbWidget {
    trail: Vec<String>,
}

impl BreadcrumbWidget {
    pub fn new(trail: Vec<String>) -> Self {
        Self { trail }
    }
}

impl SlotContent for BreadcrumbWidget {
    fn render(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled("⌂", Style::default().fg(Color::Cyan))];
        for (i, segment) in self.trail.iter().enumerate() {
            spans.push(Span::styled(" / ", Style::default().fg(Color::DarkGray)));
            let style = if i + 1 == self.trail.len() {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            spans.push(Span::styled(segment.clone(), style));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn width_hint(&self) -> u16 {
        let len: usize = 1 + self.trail.iter().map(|s| s.chars().count() + 3).sum::<usize>();
        len.min(u16::MAX as usize) as u16
    }
}

/// Static styled text, used for the brand mark and page tool hints.
pub struct TextSlot {
    text: String,
    style: Style,
}

impl TextSlot {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::default().fg(Color::Gray),
        }
    }

    pub fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

impl SlotContent for TextSlot {
    fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Paragraph::new(Span::styled(self.text.clone(), self.style)),
            area,
        );
    }

    fn width_hint(&self) -> u16 {
        self.text.chars().count().min(u16::MAX as usize) as u16
    }
}
