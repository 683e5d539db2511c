//! View module - UI rendering
//!
//! This module handles all UI rendering for the application using ratatui.
//! It is organized into submodules by component type:
//!
//! - `utils`: Shared formatting helpers
//! - `topbar`: The top bar, fed entirely from the slot registry
//! - `layout`: Navigation dock
//! - `content`: Page rendering per route
//! - `player_bar`: Progress gauge and spectrum sparkline
//! - `overlays`: Modal overlays (error, track picker, help)

mod content;
mod layout;
mod overlays;
mod player_bar;
mod topbar;
mod utils;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::config::Config;
use crate::model::{Catalog, DashboardData, NavInfo, PlaybackInfo, UiState};
use crate::router::LayoutKind;
use crate::topbar::SharedSlotRegistry;

/// Everything one frame needs, snapshotted from the model before drawing.
pub struct RenderContext<'a> {
    pub nav: &'a NavInfo,
    pub ui: &'a UiState,
    pub playback: &'a PlaybackInfo,
    pub spectrum: Option<&'a [f32]>,
    pub registry: &'a SharedSlotRegistry,
    pub catalog: &'a Catalog,
    pub dashboard: &'a DashboardData,
    /// Track titles, for the picker overlay.
    pub playlist: &'a [String],
    pub config: &'a Config,
}

pub struct AppView;

impl AppView {
    pub fn render(frame: &mut Frame, ctx: &RenderContext) {
        match ctx.nav.layout {
            LayoutKind::Auth => {
                content::render_page(frame, frame.area(), ctx);
            }
            LayoutKind::Simple => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([Constraint::Length(3), Constraint::Min(0)])
                    .split(frame.area());

                topbar::render_top_bar(frame, chunks[0], ctx.registry);
                content::render_page(frame, chunks[1], ctx);
            }
            LayoutKind::Main => {
                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // top bar
                        Constraint::Min(0),    // dock + content
                        Constraint::Length(3), // player bar
                    ])
                    .split(frame.area());

                topbar::render_top_bar(frame, chunks[0], ctx.registry);

                let body = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Length(20), Constraint::Min(0)])
                    .split(chunks[1]);

                layout::render_dock(frame, body[0], ctx.ui, &ctx.nav.path);
                content::render_page(frame, body[1], ctx);

                player_bar::render_player_bar(frame, chunks[2], ctx.playback, ctx.spectrum);
            }
        }

        if ctx.ui.error_message.is_some() {
            overlays::render_error_notification(frame, ctx.ui);
        }

        if ctx.ui.show_track_picker {
            overlays::render_track_picker(frame, ctx.ui, ctx.playlist);
        }

        if ctx.ui.show_help {
            overlays::render_help_popup(frame);
        }
    }
}
