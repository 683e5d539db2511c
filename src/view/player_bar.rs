//! Player bar rendering: progress gauge and spectrum sparkline

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Gauge, Sparkline},
    Frame,
};

use crate::model::{PlaybackInfo, PlayerPhase};

use super::utils::{format_duration, truncate_string};

pub fn render_player_bar(
    frame: &mut Frame,
    area: Rect,
    playback: &PlaybackInfo,
    spectrum: Option<&[f32]>,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    render_progress(frame, chunks[0], playback);
    render_spectrum(frame, chunks[1], spectrum);
}

fn render_progress(frame: &mut Frame, area: Rect, playback: &PlaybackInfo) {
    let status_text = match (&playback.track_title, playback.phase) {
        (None, _) => " No track loaded".to_string(),
        (Some(title), PlayerPhase::Playing) => {
            format!(" ▶ {}{}", title, artist_suffix(playback))
        }
        (Some(title), PlayerPhase::Loading) => {
            format!(" … {}{}", title, artist_suffix(playback))
        }
        (Some(title), _) => format!(" ⏸ {}{}", title, artist_suffix(playback)),
    };

    let position_text = format!(
        "{} / {}",
        format_duration(playback.position),
        format_duration(playback.duration)
    );

    let progress_ratio = if playback.duration > 0.0 {
        (playback.position / playback.duration).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let track_counter = if playback.playlist_len > 0 {
        format!(
            " track {}/{} | vol {:.0}% ",
            playback.current_index + 1,
            playback.playlist_len,
            playback.volume * 100.0
        )
    } else {
        format!(" vol {:.0}% ", playback.volume * 100.0)
    };

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} ", truncate_string(&status_text, 60)))
                .title_bottom(Line::from(track_counter).right_aligned()),
        )
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(progress_ratio)
        .label(position_text);

    frame.render_widget(gauge, area);
}

fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: Option<&[f32]>) {
    let block = Block::default().borders(Borders::ALL).title(" Spectrum ");

    match spectrum {
        Some(buckets) if !buckets.is_empty() => {
            let data: Vec<u64> = buckets.iter().map(|&m| (m * 100.0) as u64).collect();
            let sparkline = Sparkline::default()
                .block(block)
                .style(Style::default().fg(Color::Magenta))
                .max(100)
                .data(&data);
            frame.render_widget(sparkline, area);
        }
        _ => {
            // No analysis tap attached; show an idle bar instead.
            let idle = Sparkline::default()
                .block(block)
                .style(Style::default().fg(Color::DarkGray))
                .max(100)
                .data(&[2; 28]);
            frame.render_widget(idle, area);
        }
    }
}

fn artist_suffix(playback: &PlaybackInfo) -> String {
    playback
        .artist
        .as_ref()
        .map(|a| format!(" | {}", a))
        .unwrap_or_default()
}
