//! Navigation dock rendering

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Padding},
    Frame,
};

use crate::model::{FocusPane, UiState, DOCK_ITEMS};

pub fn render_dock(frame: &mut Frame, area: Rect, ui_state: &UiState, current_path: &str) {
    let focused = ui_state.focus == FocusPane::Dock;

    let items: Vec<ListItem> = DOCK_ITEMS
        .iter()
        .enumerate()
        .map(|(i, (label, path))| {
            let active = *path == current_path;
            let marker = if active { "● " } else { "  " };
            let style = if i == ui_state.dock_selected && focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if i == ui_state.dock_selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else if active {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!("{}{} {}", marker, i + 1, label)).style(style)
        })
        .collect();

    let border_style = if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Dock ")
            .padding(Padding::horizontal(1))
            .border_style(border_style),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(ui_state.dock_selected));

    frame.render_stateful_widget(list, area, &mut list_state);
}
