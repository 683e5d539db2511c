//! Navigation state: current path, derived params, history stack

use std::collections::HashMap;

use super::resolver::{resolve, ResolvedRoute, Route};

/// Owns the current path and its resolution against the route table, and
/// mirrors browser history semantics: `navigate` pushes an entry and
/// truncates the forward tail, `back`/`forward` move a cursor without
/// pushing. Params are always recomputed from the resolved pattern, never
/// set directly.
pub struct Navigator {
    routes: Vec<Route>,
    history: Vec<String>,
    cursor: usize,
    resolved: Option<ResolvedRoute>,
}

impl Navigator {
    /// Seed the store from the environment's current location.
    pub fn new(routes: Vec<Route>, initial_path: &str) -> Self {
        let resolved = resolve(&routes, initial_path);
        Self {
            routes,
            history: vec![initial_path.to_string()],
            cursor: 0,
            resolved,
        }
    }

    pub fn current_path(&self) -> &str {
        &self.history[self.cursor]
    }

    /// The resolution of the current path, or `None` for the 404 fallback.
    pub fn resolved(&self) -> Option<&ResolvedRoute> {
        self.resolved.as_ref()
    }

    pub fn params(&self) -> HashMap<String, String> {
        self.resolved
            .as_ref()
            .map(|r| r.params.clone())
            .unwrap_or_default()
    }

    /// The title carried by the current route, if any. The caller applies it
    /// to the terminal window as a side effect.
    pub fn title(&self) -> Option<&'static str> {
        self.resolved.as_ref().and_then(|r| r.title)
    }

    /// Push a new history entry and re-resolve. The path string is taken as
    /// given; navigating to an unmatched path is valid and yields the
    /// fallback resolution.
    pub fn navigate(&mut self, path: &str) {
        self.history.truncate(self.cursor + 1);
        self.history.push(path.to_string());
        self.cursor = self.history.len() - 1;
        self.re_resolve();
        tracing::debug!(path, depth = self.history.len(), "Navigated");
    }

    /// Move one entry back, the popstate-equivalent external transition.
    /// Returns false at the start of history.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.re_resolve();
        tracing::debug!(path = %self.current_path(), "History back");
        true
    }

    /// Move one entry forward. Returns false at the end of history.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.history.len() {
            return false;
        }
        self.cursor += 1;
        self.re_resolve();
        tracing::debug!(path = %self.current_path(), "History forward");
        true
    }

    fn re_resolve(&mut self) {
        self.resolved = resolve(&self.routes, &self.history[self.cursor]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::resolver::{LayoutKind, PageKind};

    fn table() -> Vec<Route> {
        vec![
            Route::new("/", PageKind::Home)
                .layout(LayoutKind::Main)
                .exact()
                .title("Cubert - Dashboard"),
            Route::new("/files/:id", PageKind::FileDetail).title("Cubert - File Detail"),
        ]
    }

    #[test]
    fn initial_path_is_resolved_at_startup() {
        let nav = Navigator::new(table(), "/");
        assert_eq!(nav.current_path(), "/");
        assert_eq!(nav.resolved().unwrap().page, PageKind::Home);
        assert_eq!(nav.title(), Some("Cubert - Dashboard"));
    }

    #[test]
    fn navigate_recomputes_params() {
        let mut nav = Navigator::new(table(), "/");
        nav.navigate("/files/42");
        assert_eq!(nav.resolved().unwrap().page, PageKind::FileDetail);
        assert_eq!(nav.params().get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn unmatched_path_is_valid_and_unresolved() {
        let mut nav = Navigator::new(table(), "/");
        nav.navigate("/nowhere");
        assert_eq!(nav.current_path(), "/nowhere");
        assert!(nav.resolved().is_none());
        assert!(nav.params().is_empty());
    }

    #[test]
    fn back_and_forward_walk_the_stack() {
        let mut nav = Navigator::new(table(), "/");
        nav.navigate("/files/1");
        nav.navigate("/files/2");

        assert!(nav.back());
        assert_eq!(nav.current_path(), "/files/1");
        assert_eq!(nav.params().get("id").map(String::as_str), Some("1"));

        assert!(nav.back());
        assert_eq!(nav.current_path(), "/");
        assert!(!nav.back());

        assert!(nav.forward());
        assert_eq!(nav.current_path(), "/files/1");
    }

    #[test]
    fn navigate_truncates_forward_tail() {
        let mut nav = Navigator::new(table(), "/");
        nav.navigate("/files/1");
        nav.back();
        nav.navigate("/files/9");
        assert!(!nav.forward());
        assert_eq!(nav.current_path(), "/files/9");
    }

    #[test]
    fn navigate_always_pushes_even_for_the_same_path() {
        let mut nav = Navigator::new(table(), "/files/1");
        nav.navigate("/files/1");
        assert!(nav.back());
        assert_eq!(nav.current_path(), "/files/1");
    }
}
