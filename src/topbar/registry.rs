//! Named-slot registry for dynamically supplied top-bar content

use std::sync::Arc;

use parking_lot::Mutex;
use ratatui::{layout::Rect, Frame};

/// Horizontal grouping of a slot within the top bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SlotPosition {
    Left,
    Center,
    Right,
}

/// Anything a producer can hang into the top bar. The consumer imposes no
/// schema beyond "renderable into a rect".
pub trait SlotContent: Send {
    fn render(&self, frame: &mut Frame, area: Rect);

    /// Columns the content would like to occupy. Purely advisory.
    fn width_hint(&self) -> u16 {
        16
    }
}

pub struct SlotEntry {
    pub id: String,
    pub content: Box<dyn SlotContent>,
    pub position: SlotPosition,
    pub priority: i32,
    seq: u64,
}

/// Registry of top-bar slots. Producers register entries keyed by id; the
/// top bar is the single consumer and renders them grouped by position,
/// ascending by priority, ties in last-write order.
#[derive(Default)]
pub struct SlotRegistry {
    entries: Vec<SlotEntry>,
    next_seq: u64,
}

impl SlotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent upsert: an existing id is replaced in place and takes the
    /// last-write position among entries of equal priority.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        content: Box<dyn SlotContent>,
        position: SlotPosition,
        priority: i32,
    ) {
        let id = id.into();
        self.entries.retain(|e| e.id != id);
        let seq = self.next_seq;
        self.next_seq += 1;
        tracing::trace!(slot = %id, ?position, priority, "Slot registered");
        self.entries.push(SlotEntry {
            id,
            content,
            position,
            priority,
            seq,
        });
        self.entries.sort_by_key(|e| (e.priority, e.seq));
    }

    /// Remove an entry; absent ids are a no-op.
    pub fn unregister(&mut self, id: &str) {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        if self.entries.len() < before {
            tracing::trace!(slot = %id, "Slot unregistered");
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries for one position, already in render order.
    pub fn for_position(&self, position: SlotPosition) -> Vec<&SlotEntry> {
        self.entries
            .iter()
            .filter(|e| e.position == position)
            .collect()
    }

    #[cfg(test)]
    fn ids_at(&self, position: SlotPosition) -> Vec<&str> {
        self.for_position(position)
            .into_iter()
            .map(|e| e.id.as_str())
            .collect()
    }
}

pub type SharedSlotRegistry = Arc<Mutex<SlotRegistry>>;

pub fn shared_registry() -> SharedSlotRegistry {
    Arc::new(Mutex::new(SlotRegistry::new()))
}

/// Scoped registration: registers on construction, unregisters on drop, so
/// every register is paired with exactly one unregister on every exit path.
pub struct SlotGuard {
    registry: SharedSlotRegistry,
    id: String,
}

impl SlotGuard {
    pub fn bind(
        registry: &SharedSlotRegistry,
        id: impl Into<String>,
        content: Box<dyn SlotContent>,
        position: SlotPosition,
        priority: i32,
    ) -> Self {
        let id = id.into();
        registry.lock().register(id.clone(), content, position, priority);
        Self {
            registry: registry.clone(),
            id,
        }
    }
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.registry.lock().unregister(&self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::widgets::Paragraph;
    use ratatui::Terminal;

    struct Tag(&'static str);

    impl SlotContent for Tag {
        fn render(&self, frame: &mut Frame, area: Rect) {
            frame.render_widget(Paragraph::new(self.0), area);
        }
    }

    fn rendered(entry: &SlotEntry) -> String {
        let backend = TestBackend::new(20, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| entry.content.render(f, f.area()))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        (0..20)
            .filter_map(|x| buffer.cell((x, 0)).map(|c| c.symbol().to_string()))
            .collect()
    }

    #[test]
    fn entries_order_by_priority_then_insertion() {
        let mut registry = SlotRegistry::new();
        registry.register("clock", Box::new(Tag("clock")), SlotPosition::Right, 2);
        registry.register("crumbs", Box::new(Tag("crumbs")), SlotPosition::Right, 1);
        registry.register("tools", Box::new(Tag("tools")), SlotPosition::Right, 2);
        assert_eq!(registry.ids_at(SlotPosition::Right), vec!["crumbs", "clock", "tools"]);
    }

    #[test]
    fn reregister_replaces_and_moves_to_last_write_among_ties() {
        let mut registry = SlotRegistry::new();
        registry.register("a", Box::new(Tag("first")), SlotPosition::Left, 1);
        registry.register("b", Box::new(Tag("b")), SlotPosition::Left, 1);
        registry.register("a", Box::new(Tag("second")), SlotPosition::Left, 1);

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.ids_at(SlotPosition::Left), vec!["b", "a"]);

        let entry = registry
            .for_position(SlotPosition::Left)
            .into_iter()
            .find(|e| e.id == "a")
            .unwrap();
        assert!(rendered(entry).starts_with("second"));
    }

    #[test]
    fn unregister_absent_id_is_a_no_op() {
        let mut registry = SlotRegistry::new();
        registry.register("a", Box::new(Tag("a")), SlotPosition::Left, 1);
        registry.unregister("ghost");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn positions_are_disjoint_groups() {
        let mut registry = SlotRegistry::new();
        registry.register("l", Box::new(Tag("l")), SlotPosition::Left, 1);
        registry.register("c", Box::new(Tag("c")), SlotPosition::Center, 1);
        registry.register("r", Box::new(Tag("r")), SlotPosition::Right, 1);
        assert_eq!(registry.ids_at(SlotPosition::Left), vec!["l"]);
        assert_eq!(registry.ids_at(SlotPosition::Center), vec!["c"]);
        assert_eq!(registry.ids_at(SlotPosition::Right), vec!["r"]);
    }

    #[test]
    fn guard_unregisters_on_drop() {
        let registry = shared_registry();
        {
            let _clock = SlotGuard::bind(
                &registry,
                "clock",
                Box::new(Tag("clock")),
                SlotPosition::Right,
                1,
            );
            assert_eq!(registry.lock().len(), 1);
        }
        assert!(registry.lock().is_empty());
    }

    #[test]
    fn rapid_rebind_churn_leaks_nothing() {
        let registry = shared_registry();
        for _ in 0..100 {
            let guard = SlotGuard::bind(
                &registry,
                "crumbs",
                Box::new(Tag("crumbs")),
                SlotPosition::Left,
                1,
            );
            drop(guard);
        }
        assert!(registry.lock().is_empty());
    }
}
