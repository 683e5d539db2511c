//! Top bar rendering - the single consumer of the slot registry

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
    Frame,
};

use crate::topbar::{SharedSlotRegistry, SlotEntry, SlotPosition};

const SLOT_GAP: u16 = 2;

pub fn render_top_bar(frame: &mut Frame, area: Rect, registry: &SharedSlotRegistry) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 {
        return;
    }

    let registry = registry.lock();
    render_group(frame, inner, &registry.for_position(SlotPosition::Left), Align::Left);
    render_group(frame, inner, &registry.for_position(SlotPosition::Center), Align::Center);
    render_group(frame, inner, &registry.for_position(SlotPosition::Right), Align::Right);
}

enum Align {
    Left,
    Center,
    Right,
}

fn render_group(frame: &mut Frame, area: Rect, entries: &[&SlotEntry], align: Align) {
    if entries.is_empty() {
        return;
    }

    let total: u16 = entries
        .iter()
        .map(|e| e.content.width_hint().saturating_add(SLOT_GAP))
        .sum::<u16>()
        .saturating_sub(SLOT_GAP);

    let mut x = match align {
        Align::Left => area.x,
        Align::Center => area.x + area.width.saturating_sub(total) / 2,
        Align::Right => area.x + area.width.saturating_sub(total),
    };

    let end = area.x + area.width;
    for entry in entries {
        if x >= end {
            break;
        }
        let width = entry.content.width_hint().min(end - x);
        let slot_area = Rect {
            x,
            y: area.y,
            width,
            height: 1,
        };
        entry.content.render(frame, slot_area);
        x = x.saturating_add(width).saturating_add(SLOT_GAP);
    }
}
