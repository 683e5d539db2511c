//! Route changes, history, slot lifecycle and the session scope

use std::io;

use crossterm::{execute, terminal::SetTitle};
use ratatui::style::{Color, Style};

use crate::model::Catalog;
use crate::router::PageKind;
use crate::topbar::{BreadcrumbWidget, ClockWidget, SlotGuard, SlotPosition, TextSlot};

use super::AppController;

impl AppController {
    /// Install session-scoped slots and the chrome for the initial route.
    pub async fn start_session(&self) {
        let model = self.model.lock().await;
        let registry = model.registry.clone();

        let mut slots = self.session_slots.lock().await;
        slots.clear();
        slots.push(SlotGuard::bind(
            &registry,
            "brand",
            Box::new(TextSlot::styled(
                "CUBERT",
                Style::default().fg(Color::Cyan),
            )),
            SlotPosition::Left,
            0,
        ));
        slots.push(SlotGuard::bind(
            &registry,
            "clock",
            Box::new(ClockWidget),
            SlotPosition::Right,
            9,
        ));
        drop(slots);

        let title = model.current_title().await;
        let info = model.nav_info().await;
        drop(model);

        Self::apply_title(title);
        self.sync_page_slots().await;
        tracing::info!(page = ?info.page, path = %info.path, "Session started");
    }

    /// Navigate to a path, apply the route title and swap page slots.
    pub async fn navigate(&self, path: &str) {
        let model = self.model.lock().await;
        let title = model.navigate(path).await;
        model.sync_dock_to_path(path).await;
        drop(model);

        Self::apply_title(title);
        self.sync_page_slots().await;
    }

    pub async fn history_back(&self) {
        let model = self.model.lock().await;
        let title = model.history_back().await;
        let path = model.nav_info().await.path;
        model.sync_dock_to_path(&path).await;
        drop(model);

        Self::apply_title(title);
        self.sync_page_slots().await;
    }

    pub async fn history_forward(&self) {
        let model = self.model.lock().await;
        let title = model.history_forward().await;
        let path = model.nav_info().await.path;
        model.sync_dock_to_path(&path).await;
        drop(model);

        Self::apply_title(title);
        self.sync_page_slots().await;
    }

    /// Open whatever the files page has selected: descend into folders,
    /// navigate to the detail route for files.
    pub async fn open_selected_file(&self) {
        let model = self.model.lock().await;
        let Some(entry) = model.selected_file().await else {
            return;
        };

        if entry.is_folder() {
            model.set_files_path(&entry.path).await;
            drop(model);
            self.sync_page_slots().await;
        } else {
            drop(model);
            self.navigate(&format!("/files/{}", entry.id)).await;
        }
    }

    /// Step the files page up to the parent directory. At the root this
    /// falls through to history back.
    pub async fn files_up_or_back(&self) {
        let model = self.model.lock().await;
        let path = model.files_path().await;
        let trail = Catalog::breadcrumbs(&path);
        if trail.is_empty() {
            drop(model);
            self.history_back().await;
            return;
        }
        let parent = if trail.len() == 1 {
            "/".to_string()
        } else {
            format!("/{}", trail[..trail.len() - 1].join("/"))
        };
        model.set_files_path(&parent).await;
        drop(model);
        self.sync_page_slots().await;
    }

    pub async fn open_dock_selection(&self) {
        let path = {
            let model = self.model.lock().await;
            model.selected_dock_path().await
        };
        self.navigate(path).await;
    }

    pub async fn open_selected_favorite(&self) {
        let target = {
            let model = self.model.lock().await;
            model.selected_favorite_path().await
        };
        if let Some(path) = target {
            {
                let model = self.model.lock().await;
                model.set_files_path(&path).await;
            }
            self.navigate("/files").await;
        }
    }

    /// Mock sign-in from the login page.
    pub async fn login(&self) {
        {
            let model = self.model.lock().await;
            model.set_authenticated(true).await;
        }
        self.start_session().await;
        self.navigate("/").await;
        tracing::info!("Signed in");
    }

    /// End the session scope: playback and every registered slot go away.
    pub async fn logout(&self) {
        {
            let model = self.model.lock().await;
            model.set_authenticated(false).await;
            model.reset_player().await;
        }
        self.audio.stop().await;
        *self.loaded.lock().await = None;
        self.page_slots.lock().await.clear();
        self.session_slots.lock().await.clear();
        self.navigate("/login").await;
        tracing::info!("Signed out, session state dropped");
    }

    /// Rebuild the slots owned by the current page. Old guards are dropped
    /// first so a page re-registering the same id does not race its own
    /// cleanup.
    pub(crate) async fn sync_page_slots(&self) {
        let model = self.model.lock().await;
        if !model.is_authenticated().await {
            drop(model);
            self.page_slots.lock().await.clear();
            return;
        }

        let registry = model.registry.clone();
        let page = model.current_page().await;
        let files_path = model.files_path().await;
        let detail_entry = match page {
            Some(PageKind::FileDetail) => match model.route_param("id").await {
                Some(id) => model.catalog().find(&id).cloned(),
                None => None,
            },
            _ => None,
        };
        drop(model);

        let mut slots = self.page_slots.lock().await;
        slots.clear();

        match page {
            Some(PageKind::Files) => {
                slots.push(SlotGuard::bind(
                    &registry,
                    "breadcrumbs",
                    Box::new(BreadcrumbWidget::new(Catalog::breadcrumbs(&files_path))),
                    SlotPosition::Left,
                    2,
                ));
                slots.push(SlotGuard::bind(
                    &registry,
                    "page-tools",
                    Box::new(TextSlot::new("enter open · u up · v view")),
                    SlotPosition::Center,
                    5,
                ));
            }
            Some(PageKind::FileDetail) => {
                if let Some(entry) = detail_entry {
                    slots.push(SlotGuard::bind(
                        &registry,
                        "breadcrumbs",
                        Box::new(BreadcrumbWidget::new(Catalog::breadcrumbs(&entry.path))),
                        SlotPosition::Left,
                        2,
                    ));
                }
            }
            Some(PageKind::Dashboard) | Some(PageKind::Analytics) => {
                slots.push(SlotGuard::bind(
                    &registry,
                    "page-tools",
                    Box::new(TextSlot::new("1-5 jump · tab focus")),
                    SlotPosition::Center,
                    5,
                ));
            }
            _ => {}
        }
    }

    fn apply_title(title: Option<&'static str>) {
        if let Some(title) = title {
            if let Err(e) = execute!(io::stdout(), SetTitle(title)) {
                tracing::warn!(error = %e, "Could not set terminal title");
            }
        }
    }
}
