//! Top-bar slot system - registry and built-in widgets
//!
//! UI producers register renderable content into named, positioned,
//! priority-ordered slots; the top bar is the single consumer. Entries are
//! bound to a scope through [`SlotGuard`], which unregisters on drop:
//!
//! - `registry`: the slot registry, shared handle and RAII guard
//! - `widgets`: clock, breadcrumb and plain-text slot content

mod registry;
mod widgets;

pub use registry::{
    shared_registry, SharedSlotRegistry, SlotContent, SlotEntry, SlotGuard, SlotPosition,
    SlotRegistry,
};
pub use widgets::{BreadcrumbWidget, ClockWidget, TextSlot};
