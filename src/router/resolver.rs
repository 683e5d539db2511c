//! Route table types and nested-route resolution

use std::collections::HashMap;

use super::matcher::{extract_params, match_exact, match_prefix};

/// Which chrome wraps a page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutKind {
    /// Top bar, navigation dock, content area and player bar.
    Main,
    /// Top bar and content area only.
    Simple,
    /// Bare centered card, no chrome.
    Auth,
}

/// Every navigable view in the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Login,
    Files,
    FileDetail,
    Dashboard,
    Analytics,
    Settings,
}

/// A path pattern bound to a page, with optional layout/title metadata and
/// nested children. Defined once at startup, immutable thereafter.
#[derive(Clone, Debug)]
pub struct Route {
    pub path: &'static str,
    pub page: PageKind,
    pub layout: Option<LayoutKind>,
    pub exact: bool,
    pub title: Option<&'static str>,
    pub children: Vec<Route>,
}

impl Route {
    pub fn new(path: &'static str, page: PageKind) -> Self {
        Self {
            path,
            page,
            layout: None,
            exact: false,
            title: None,
            children: Vec::new(),
        }
    }

    pub fn layout(mut self, layout: LayoutKind) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    pub fn title(mut self, title: &'static str) -> Self {
        self.title = Some(title);
        self
    }

    pub fn children(mut self, children: Vec<Route>) -> Self {
        self.children = children;
        self
    }
}

/// The outcome of matching a path against the route table.
#[derive(Clone, Debug)]
pub struct ResolvedRoute {
    pub page: PageKind,
    pub layout: LayoutKind,
    /// The pattern that matched, e.g. `/files/:id`.
    pub pattern: &'static str,
    pub title: Option<&'static str>,
    pub params: HashMap<String, String>,
}

/// Find the route matching `path`.
///
/// Depth-first over the table in encounter order: the first route whose
/// pattern matches wins, and once a parent's subtree is entered there is no
/// backtracking across siblings. A descendant inherits its ancestor's layout
/// only when its own is unset. Returns `None` when nothing matches; the
/// caller supplies the fallback (404) presentation.
pub fn resolve(routes: &[Route], path: &str) -> Option<ResolvedRoute> {
    resolve_with_layout(routes, path, None)
}

fn resolve_with_layout(
    routes: &[Route],
    path: &str,
    inherited: Option<LayoutKind>,
) -> Option<ResolvedRoute> {
    for route in routes {
        let matched = if route.exact {
            match_exact(route.path, path)
        } else {
            match_prefix(route.path, path)
        };

        let layout = route.layout.or(inherited);

        if matched {
            return Some(ResolvedRoute {
                page: route.page,
                layout: layout.unwrap_or(LayoutKind::Main),
                pattern: route.path,
                title: route.title,
                params: extract_params(route.path, path),
            });
        }

        if !route.children.is_empty() {
            if let Some(resolved) = resolve_with_layout(&route.children, path, layout) {
                return Some(resolved);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> Vec<Route> {
        vec![
            Route::new("/", PageKind::Home)
                .layout(LayoutKind::Main)
                .exact()
                .title("Cubert - Dashboard"),
            Route::new("/login", PageKind::Login)
                .layout(LayoutKind::Auth)
                .exact()
                .title("Cubert - Sign In"),
            Route::new("/files", PageKind::Files)
                .layout(LayoutKind::Main)
                .exact()
                .title("Cubert - Files"),
            Route::new("/files/:id", PageKind::FileDetail)
                .layout(LayoutKind::Main)
                .title("Cubert - File Detail"),
            Route::new("/dashboard", PageKind::Dashboard)
                .layout(LayoutKind::Main)
                .children(vec![
                    Route::new("/dashboard/analytics", PageKind::Analytics)
                        .title("Cubert - Analytics"),
                    Route::new("/dashboard/settings", PageKind::Settings)
                        .layout(LayoutKind::Simple)
                        .title("Cubert - Settings"),
                ]),
        ]
    }

    #[test]
    fn resolves_exact_route() {
        let resolved = resolve(&table(), "/").unwrap();
        assert_eq!(resolved.page, PageKind::Home);
        assert_eq!(resolved.layout, LayoutKind::Main);
        assert_eq!(resolved.title, Some("Cubert - Dashboard"));
    }

    #[test]
    fn param_route_binds_values() {
        let resolved = resolve(&table(), "/files/42").unwrap();
        assert_eq!(resolved.page, PageKind::FileDetail);
        assert_eq!(resolved.params.get("id").map(String::as_str), Some("42"));
    }

    #[test]
    fn exact_home_does_not_swallow_other_paths() {
        // "/" is exact, so "/files/42" must fall through to the file route.
        let resolved = resolve(&table(), "/files/42").unwrap();
        assert_eq!(resolved.pattern, "/files/:id");
    }

    #[test]
    fn first_match_wins_in_encounter_order() {
        let routes = vec![
            Route::new("/files/:id", PageKind::FileDetail),
            Route::new("/files/shared", PageKind::Files),
        ];
        // The param route comes first and is a prefix match, so the more
        // specific literal route behind it is never reached.
        let resolved = resolve(&routes, "/files/shared").unwrap();
        assert_eq!(resolved.page, PageKind::FileDetail);
    }

    #[test]
    fn child_inherits_parent_layout_when_unset() {
        // /dashboard prefix-matches /dashboard/analytics before the children
        // are consulted, so use a table where the parent is exact.
        let routes = vec![Route::new("/dashboard", PageKind::Dashboard)
            .layout(LayoutKind::Main)
            .exact()
            .children(vec![
                Route::new("/dashboard/analytics", PageKind::Analytics),
                Route::new("/dashboard/settings", PageKind::Settings)
                    .layout(LayoutKind::Simple),
            ])];

        let analytics = resolve(&routes, "/dashboard/analytics").unwrap();
        assert_eq!(analytics.layout, LayoutKind::Main);

        let settings = resolve(&routes, "/dashboard/settings").unwrap();
        assert_eq!(settings.layout, LayoutKind::Simple);
    }

    #[test]
    fn unmatched_path_yields_none() {
        assert!(resolve(&table(), "/no/such/page").is_none());
    }

    #[test]
    fn resolution_is_deterministic() {
        let first = resolve(&table(), "/files/42").unwrap();
        let second = resolve(&table(), "/files/42").unwrap();
        assert_eq!(first.page, second.page);
        assert_eq!(first.pattern, second.pattern);
        assert_eq!(first.params, second.params);
    }
}
