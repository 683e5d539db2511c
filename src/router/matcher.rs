//! Path-segment matching with `:param` wildcards

use std::collections::HashMap;

/// Split a path into non-empty segments.
///
/// Leading, trailing and duplicate slashes all produce empty segments, which
/// are filtered out here so malformed paths are normalized rather than
/// rejected.
pub fn split_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn segment_matches(route_segment: &str, path_segment: &str) -> bool {
    route_segment.starts_with(':') || route_segment == path_segment
}

/// Exact match: segment counts must be equal, literal segments must compare
/// equal, `:name` segments match any value.
pub fn match_exact(route_path: &str, path: &str) -> bool {
    let route_segments = split_segments(route_path);
    let path_segments = split_segments(path);

    route_segments.len() == path_segments.len()
        && route_segments
            .iter()
            .zip(path_segments.iter())
            .all(|(r, p)| segment_matches(r, p))
}

/// Prefix match: the route may have fewer or equal segments than the path,
/// with the same per-segment rule as [`match_exact`].
pub fn match_prefix(route_path: &str, path: &str) -> bool {
    let route_segments = split_segments(route_path);
    let path_segments = split_segments(path);

    if route_segments.len() > path_segments.len() {
        return false;
    }

    route_segments
        .iter()
        .zip(path_segments.iter())
        .all(|(r, p)| segment_matches(r, p))
}

/// Bind every `:name` route segment to the path segment at the same index.
/// A missing path segment binds the empty string.
pub fn extract_params(route_path: &str, path: &str) -> HashMap<String, String> {
    let route_segments = split_segments(route_path);
    let path_segments = split_segments(path);
    let mut params = HashMap::new();

    for (index, segment) in route_segments.iter().enumerate() {
        if let Some(name) = segment.strip_prefix(':') {
            let value = path_segments.get(index).copied().unwrap_or("");
            params.insert(name.to_string(), value.to_string());
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_filters_empty_segments() {
        assert_eq!(split_segments("/files//42/"), vec!["files", "42"]);
        assert_eq!(split_segments("files/42"), vec!["files", "42"]);
        assert!(split_segments("/").is_empty());
        assert!(split_segments("").is_empty());
    }

    #[test]
    fn exact_requires_equal_segment_count() {
        assert!(match_exact("/files", "/files"));
        assert!(match_exact("/files", "files/"));
        assert!(!match_exact("/files", "/files/42"));
        assert!(!match_exact("/files/42", "/files"));
    }

    #[test]
    fn exact_matches_params_against_any_value() {
        assert!(match_exact("/files/:id", "/files/42"));
        assert!(match_exact("/files/:id", "/files/report.pdf"));
        assert!(!match_exact("/files/:id", "/folders/42"));
    }

    #[test]
    fn prefix_allows_longer_paths() {
        assert!(match_prefix("/files", "/files/42/preview"));
        assert!(match_prefix("/files/:id", "/files/42"));
        assert!(!match_prefix("/files/:id/preview", "/files/42"));
        assert!(!match_prefix("/folders", "/files/42"));
    }

    #[test]
    fn root_route_prefix_matches_everything() {
        assert!(match_prefix("/", "/anything/at/all"));
        assert!(match_prefix("/", "/"));
    }

    #[test]
    fn extracts_named_params() {
        let params = extract_params("/files/:id", "/files/42");
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn missing_path_segment_binds_empty_string() {
        let params = extract_params("/files/:id", "/files");
        assert_eq!(params.get("id").map(String::as_str), Some(""));
    }

    #[test]
    fn literal_segments_bind_nothing() {
        assert!(extract_params("/files/all", "/files/all").is_empty());
    }

    #[test]
    fn duplicate_slashes_normalize_before_extraction() {
        let params = extract_params("/files/:id", "//files///42");
        assert_eq!(params.get("id").map(String::as_str), Some("42"));
    }
}
