//! The static route table, supplied once at startup

use crate::router::{LayoutKind, PageKind, Route};

pub fn route_table() -> Vec<Route> {
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
        // The parent is exact so its children stay reachable under
        // first-match-wins resolution.
        Route::new("/dashboard", PageKind::Dashboard)
            .layout(LayoutKind::Main)
            .exact()
            .title("Cubert - Overview")
            .children(vec![
                Route::new("/dashboard/analytics", PageKind::Analytics)
                    .exact()
                    .title("Cubert - Analytics"),
                Route::new("/dashboard/settings", PageKind::Settings)
                    .layout(LayoutKind::Simple)
                    .exact()
                    .title("Cubert - Settings"),
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::resolve;

    #[test]
    fn every_declared_path_resolves_to_its_own_page() {
        let table = route_table();
        let cases = [
            ("/", PageKind::Home),
            ("/login", PageKind::Login),
            ("/files", PageKind::Files),
            ("/files/42", PageKind::FileDetail),
            ("/dashboard", PageKind::Dashboard),
            ("/dashboard/analytics", PageKind::Analytics),
            ("/dashboard/settings", PageKind::Settings),
        ];
        for (path, page) in cases {
            let resolved = resolve(&table, path).expect(path);
            assert_eq!(resolved.page, page, "{path}");
        }
    }

    #[test]
    fn settings_child_overrides_inherited_layout() {
        let resolved = resolve(&route_table(), "/dashboard/settings").unwrap();
        assert_eq!(resolved.layout, LayoutKind::Simple);
        let resolved = resolve(&route_table(), "/dashboard/analytics").unwrap();
        assert_eq!(resolved.layout, LayoutKind::Main);
    }
}
