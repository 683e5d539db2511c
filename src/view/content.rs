//! Main content area rendering, one function per page

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, List, ListItem, ListState, Padding, Paragraph, Wrap},
    Frame,
};

use crate::model::{
    weekly_activity, ActivityKind, FileEntry, FileKind, FocusPane, ViewMode,
};
use crate::router::PageKind;

use super::utils::{format_size, truncate_string};
use super::RenderContext;

pub fn render_page(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    match ctx.nav.page {
        Some(PageKind::Home) => render_home(frame, area, ctx),
        Some(PageKind::Files) => render_files(frame, area, ctx),
        Some(PageKind::FileDetail) => render_file_detail(frame, area, ctx),
        Some(PageKind::Dashboard) => render_dashboard(frame, area, ctx),
        Some(PageKind::Analytics) => render_analytics(frame, area, ctx),
        Some(PageKind::Settings) => render_settings(frame, area, ctx),
        Some(PageKind::Login) => render_login(frame, area),
        None => render_not_found(frame, area, &ctx.nav.path),
    }
}

fn content_focused(ctx: &RenderContext) -> bool {
    ctx.ui.focus == FocusPane::Content
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    }
}

/// Color per activity type, one arm per variant.
fn activity_color(kind: ActivityKind) -> Color {
    match kind {
        ActivityKind::Create => Color::Green,
        ActivityKind::Modify => Color::Yellow,
        ActivityKind::Delete => Color::Red,
        ActivityKind::Share => Color::Cyan,
        ActivityKind::Download => Color::Blue,
    }
}

/// Tint per file kind, one arm per variant.
fn kind_color(kind: FileKind) -> Color {
    match kind {
        FileKind::Folder => Color::Cyan,
        FileKind::Document => Color::White,
        FileKind::Image => Color::Magenta,
        FileKind::Video => Color::LightRed,
        FileKind::Audio => Color::Green,
        FileKind::Archive => Color::Yellow,
        FileKind::Code => Color::LightBlue,
        FileKind::Other => Color::Gray,
    }
}

// ============================================================================
// Home
// ============================================================================

fn render_home(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // stat tiles
            Constraint::Min(0),    // favorites + activity
            Constraint::Length(3), // quick access
        ])
        .split(area);

    render_stat_tiles(frame, rows[0], ctx);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[1]);

    render_favorite_folders(frame, columns[0], ctx);
    render_activity_list(frame, columns[1], ctx, " Recent Activity ");
    render_quick_access(frame, rows[2], ctx);
}

fn render_stat_tiles(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let stats = &ctx.dashboard.stats;
    let tiles = [
        ("Files", stats.total_files.to_string()),
        ("Folders", stats.total_folders.to_string()),
        ("Used", format_size(stats.total_size)),
        ("Free", format_size(stats.available_space)),
        ("Users", stats.active_users.to_string()),
    ];

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 5); 5])
        .split(area);

    for (chunk, (label, value)) in chunks.iter().zip(tiles.iter()) {
        let tile = Paragraph::new(vec![
            Line::from(Span::styled(
                value.clone(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(*label, Style::default().fg(Color::DarkGray))),
        ])
        .centered()
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(tile, *chunk);
    }
}

fn render_favorite_folders(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let focused = content_focused(ctx);
    let items: Vec<ListItem> = ctx
        .dashboard
        .favorite_folders
        .iter()
        .enumerate()
        .map(|(i, folder)| {
            let selected = i == ctx.ui.home_selected;
            let style = if selected && focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(format!(
                "▸ {}  ({} items)  {}  · {}",
                folder.name,
                folder.item_count,
                folder.path,
                folder.last_accessed.format("%b %d")
            ))
            .style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Favorite Folders ")
            .padding(Padding::horizontal(1))
            .border_style(focus_border(focused)),
    );

    let mut state = ListState::default();
    state.select(Some(ctx.ui.home_selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_activity_list(frame: &mut Frame, area: Rect, ctx: &RenderContext, title: &str) {
    let items: Vec<ListItem> = ctx
        .dashboard
        .activity
        .iter()
        .map(|entry| {
            let who = entry.user.as_deref().unwrap_or("someone");
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:<10}", entry.kind.label()),
                    Style::default().fg(activity_color(entry.kind)),
                ),
                Span::raw(format!("{}  ", entry.file_name)),
                Span::styled(
                    format!("{} · {}", who, entry.when),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(list, area);
}

fn render_quick_access(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let mut spans = vec![Span::styled("Quick access: ", Style::default().fg(Color::DarkGray))];
    for (i, item) in ctx.dashboard.quick_access.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("{} {}", item.kind.icon(), item.name),
            Style::default().fg(kind_color(item.kind)),
        ));
    }
    let bar = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).padding(Padding::horizontal(1)));
    frame.render_widget(bar, area);
}

// ============================================================================
// Files
// ============================================================================

fn render_files(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let focused = content_focused(ctx);
    let children = ctx.catalog.children_of(&ctx.ui.files_path);

    let title = format!(
        " Files — {}  ({} items) ",
        ctx.ui.files_path,
        children.len()
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding::horizontal(1))
        .border_style(focus_border(focused));

    if children.is_empty() {
        let empty = Paragraph::new("This folder is empty.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    match ctx.ui.view_mode {
        ViewMode::List => render_files_list(frame, area, ctx, &children, block, focused),
        ViewMode::Grid => render_files_grid(frame, area, ctx, &children, block, focused),
    }
}

fn render_files_list(
    frame: &mut Frame,
    area: Rect,
    ctx: &RenderContext,
    children: &[&FileEntry],
    block: Block,
    focused: bool,
) {
    let name_width = (area.width as usize).saturating_sub(40).max(16);

    let items: Vec<ListItem> = children
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let selected = i == ctx.ui.files_selected;
            let size = entry.size.map(format_size).unwrap_or_else(|| "—".to_string());
            let share_marker = if entry.shared { "⇡" } else { " " };
            let row = format!(
                "{} {:<name_width$} {:>9}  {}  {}",
                entry.kind.icon(),
                truncate_string(&entry.name, name_width),
                size,
                entry.modified.format("%Y-%m-%d"),
                share_marker,
            );
            let style = if selected && focused {
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
            } else if selected {
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(kind_color(entry.kind))
            };
            ListItem::new(row).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    state.select(Some(ctx.ui.files_selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_files_grid(
    frame: &mut Frame,
    area: Rect,
    ctx: &RenderContext,
    children: &[&FileEntry],
    block: Block,
    focused: bool,
) {
    let inner = block.inner(area);
    frame.render_widget(block, area);

    const CELL_WIDTH: u16 = 22;
    const CELL_HEIGHT: u16 = 3;
    let columns = (inner.width / CELL_WIDTH).max(1) as usize;

    for (i, entry) in children.iter().enumerate() {
        let col = (i % columns) as u16;
        let row = (i / columns) as u16;
        let y = inner.y + row * CELL_HEIGHT;
        if y + CELL_HEIGHT > inner.y + inner.height {
            break;
        }
        let cell = Rect {
            x: inner.x + col * CELL_WIDTH,
            y,
            width: CELL_WIDTH.min(inner.width.saturating_sub(col * CELL_WIDTH)),
            height: CELL_HEIGHT,
        };

        let selected = i == ctx.ui.files_selected;
        let border_style = if selected && focused {
            Style::default().fg(Color::Green)
        } else if selected {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let label = format!(
            "{} {}",
            entry.kind.icon(),
            truncate_string(&entry.name, CELL_WIDTH as usize - 5)
        );
        let tile = Paragraph::new(label)
            .style(Style::default().fg(kind_color(entry.kind)))
            .block(Block::default().borders(Borders::ALL).border_style(border_style));
        frame.render_widget(tile, cell);
    }
}

// ============================================================================
// File detail
// ============================================================================

fn render_file_detail(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let id = ctx.nav.params.get("id").map(String::as_str).unwrap_or("");

    let Some(entry) = ctx.catalog.find(id) else {
        let missing = Paragraph::new(format!("No entry with id {id:?} in the catalog."))
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" File Detail "))
            .wrap(Wrap { trim: false });
        frame.render_widget(missing, area);
        return;
    };

    let permissions = format!(
        "{}{}{}",
        if entry.permissions.read { "r" } else { "-" },
        if entry.permissions.write { "w" } else { "-" },
        if entry.permissions.share { "s" } else { "-" },
    );

    let mut lines = vec![
        detail_line("Name", &entry.name),
        detail_line("Type", entry.kind.label()),
        detail_line(
            "Extension",
            entry.extension.as_deref().unwrap_or("—"),
        ),
        detail_line("Path", &entry.path),
        detail_line(
            "Size",
            &entry.size.map(format_size).unwrap_or_else(|| "—".to_string()),
        ),
        detail_line("Created", &entry.created.format("%Y-%m-%d").to_string()),
        detail_line("Modified", &entry.modified.format("%Y-%m-%d").to_string()),
        detail_line("Permissions", &permissions),
        detail_line("Shared", if entry.shared { "yes" } else { "no" }),
    ];

    if entry.kind == FileKind::Audio {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            "♪ This is an audio file. Press m to open the track picker.",
            Style::default().fg(Color::Green),
        )));
    }

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} {} ", entry.kind.icon(), entry.name))
            .padding(Padding::new(2, 2, 1, 1)),
    );
    frame.render_widget(card, area);
}

fn detail_line<'a>(label: &'a str, value: &str) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{:>12}  ", label),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(value.to_string(), Style::default().fg(Color::White)),
    ])
}

// ============================================================================
// Dashboard, analytics, settings
// ============================================================================

fn render_dashboard(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    render_stat_tiles(frame, rows[0], ctx);

    let backup = Paragraph::new(Span::styled(
        format!(
            " Last backup: {}",
            ctx.dashboard.stats.last_backup.format("%Y-%m-%d")
        ),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(backup, rows[1]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(rows[2]);

    let files: Vec<ListItem> = ctx
        .dashboard
        .favorite_files
        .iter()
        .map(|f| {
            ListItem::new(format!(
                "≡ {:<28} {:>9}  {}",
                truncate_string(&f.name, 28),
                format_size(f.size),
                f.last_modified.format("%Y-%m-%d")
            ))
        })
        .collect();
    let files_list = List::new(files).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Favorite Files ")
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(files_list, columns[0]);

    render_activity_list(frame, columns[1], ctx, " Latest Changes ");
}

fn render_analytics(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(9)])
        .split(area);

    let data = weekly_activity();
    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Activity This Week ")
                .padding(Padding::horizontal(1)),
        )
        .data(&data)
        .bar_width(5)
        .bar_gap(2)
        .bar_style(Style::default().fg(Color::Cyan))
        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
    frame.render_widget(chart, rows[0]);

    render_activity_list(frame, rows[1], ctx, " Event Log ");
}

fn render_settings(frame: &mut Frame, area: Rect, ctx: &RenderContext) {
    let music_dir = ctx
        .config
        .music_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(not configured)".to_string());

    let lines = vec![
        detail_line("Start path", &ctx.config.start_path),
        detail_line("Music dir", &music_dir),
        detail_line("Volume", &format!("{:.0}%", ctx.playback.volume * 100.0)),
        detail_line("Tracks", &ctx.playlist.len().to_string()),
        detail_line("Catalog", &format!("{} entries", ctx.catalog.len())),
        Line::default(),
        Line::from(Span::styled(
            format!("Settings are read from {} at startup.", crate::config::CONFIG_FILE),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let card = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Settings ")
            .padding(Padding::new(2, 2, 1, 1)),
    );
    frame.render_widget(card, area);
}

// ============================================================================
// Login and fallback
// ============================================================================

fn render_login(frame: &mut Frame, area: Rect) {
    let card_width = 44.min(area.width.saturating_sub(4));
    let card_height = 7.min(area.height.saturating_sub(2));
    let card = Rect {
        x: area.x + area.width.saturating_sub(card_width) / 2,
        y: area.y + area.height.saturating_sub(card_height) / 2,
        width: card_width,
        height: card_height,
    };

    let body = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            "Welcome to Cubert",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Press Enter to sign in · q to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .centered()
    .block(Block::default().borders(Borders::ALL).title(" Sign In "));

    frame.render_widget(body, card);
}

fn render_not_found(frame: &mut Frame, area: Rect, path: &str) {
    let card_width = 50.min(area.width.saturating_sub(4));
    let card_height = 7.min(area.height.saturating_sub(2));
    let card = Rect {
        x: area.x + area.width.saturating_sub(card_width) / 2,
        y: area.y + area.height.saturating_sub(card_height) / 2,
        width: card_width,
        height: card_height,
    };

    let body = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(
            "404",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("Nothing lives at {path}")),
        Line::from(Span::styled(
            "Esc to go back",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .centered()
    .block(Block::default().borders(Borders::ALL));

    frame.render_widget(body, card);
}
