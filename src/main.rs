mod audio;
mod config;
mod controller;
mod library;
mod logging;
mod model;
mod router;
mod routes;
mod topbar;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::Mutex;

use audio::{AudioBackend, MediaEvent, NullBackend, RodioBackend};
use config::Config;
use controller::AppController;
use model::{sample_catalog, sample_dashboard, AppModel};
use router::Navigator;
use view::{AppView, RenderContext};

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== Cubert Starting ===");

    let config = Config::load();

    // Build the catalog: demo data plus whatever the music scan finds.
    let mut catalog = sample_catalog();
    let mut tracks = Vec::new();
    if let Some(music_dir) = &config.music_dir {
        let (found_tracks, entries) = library::scan_music_dir(music_dir);
        tracks = found_tracks;
        catalog.append(entries);
    }

    // Audio output is optional; without it the player is simply inert.
    let (audio, media_events): (Arc<dyn AudioBackend>, UnboundedReceiver<MediaEvent>) =
        match RodioBackend::new() {
            Ok((backend, events)) => (Arc::new(backend), events),
            Err(e) => {
                tracing::warn!(error = %e, "Audio unavailable, player will be inert");
                let (backend, events) = NullBackend::new();
                (Arc::new(backend), events)
            }
        };

    let navigator = Navigator::new(routes::route_table(), &config.start_path);
    let app_model = AppModel::new(navigator, catalog, sample_dashboard(), config.volume);
    let model = Arc::new(Mutex::new(app_model));

    if !tracks.is_empty() {
        let model_guard = model.lock().await;
        model_guard.load_tracks(tracks).await;
    }

    let controller = AppController::new(model.clone(), audio.clone());
    controller.start_media_event_listener(media_events);
    controller.start_session().await;

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller, audio, config).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("Cubert shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    audio: Arc<dyn AudioBackend>,
    config: Config,
) -> io::Result<()> {
    loop {
        // Snapshot current state for this frame.
        let (nav, ui_state, playback, playlist, registry, catalog, dashboard, should_quit) = {
            let model_guard = model.lock().await;

            // Auto-clear old errors (after 5 seconds)
            model_guard.auto_clear_old_errors().await;

            (
                model_guard.nav_info().await,
                model_guard.get_ui_state().await,
                model_guard.playback_info().await,
                model_guard.playlist_titles().await,
                model_guard.registry.clone(),
                model_guard.catalog(),
                model_guard.dashboard(),
                model_guard.should_quit().await,
            )
        };

        // Pull-based spectrum snapshot, one per frame.
        let spectrum = audio.spectrum();

        terminal.draw(|f| {
            let ctx = RenderContext {
                nav: &nav,
                ui: &ui_state,
                playback: &playback,
                spectrum: spectrum.as_deref(),
                registry: &registry,
                catalog: &catalog,
                dashboard: &dashboard,
                playlist: &playlist,
                config: &config,
            };
            AppView::render(f, &ctx);
        })?;

        // Short poll keeps the clock and spectrum moving between keys.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                let _ = controller.handle_key_event(key).await;
            }
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
