//! File catalog: entries, directory queries and the demo data set

use chrono::NaiveDate;

use super::types::FileKind;
use crate::router::matcher::split_segments;

#[derive(Clone, Copy, Debug, Default)]
pub struct Permissions {
    pub read: bool,
    pub write: bool,
    pub share: bool,
}

/// One file or folder in the virtual catalog.
#[derive(Clone, Debug)]
pub struct FileEntry {
    pub id: String,
    pub name: String,
    pub kind: FileKind,
    /// Bytes, files only.
    pub size: Option<u64>,
    pub extension: Option<String>,
    pub created: NaiveDate,
    pub modified: NaiveDate,
    pub permissions: Permissions,
    pub shared: bool,
    /// Full virtual path, e.g. `/Projects/Frontend`.
    pub path: String,
}

impl FileEntry {
    pub fn is_folder(&self) -> bool {
        self.kind == FileKind::Folder
    }

    /// Path of the directory containing this entry: `/` for top-level
    /// entries, otherwise everything before the last segment.
    pub fn parent_path(&self) -> String {
        let segments = split_segments(&self.path);
        if segments.len() <= 1 {
            "/".to_string()
        } else {
            format!("/{}", segments[..segments.len() - 1].join("/"))
        }
    }
}

/// The browsable set of entries. Static demo data plus whatever audio files
/// the music-directory scan contributes; never mutated after startup.
pub struct Catalog {
    entries: Vec<FileEntry>,
}

impl Catalog {
    pub fn new(entries: Vec<FileEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn find(&self, id: &str) -> Option<&FileEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Direct children of a directory path, folders first, each group in
    /// name order.
    pub fn children_of(&self, dir: &str) -> Vec<&FileEntry> {
        let normalized = normalize_dir(dir);
        let mut children: Vec<&FileEntry> = self
            .entries
            .iter()
            .filter(|e| e.parent_path() == normalized)
            .collect();
        children.sort_by(|a, b| {
            b.is_folder()
                .cmp(&a.is_folder())
                .then_with(|| a.name.cmp(&b.name))
        });
        children
    }

    /// Breadcrumb trail for a directory path.
    pub fn breadcrumbs(dir: &str) -> Vec<String> {
        split_segments(dir).into_iter().map(str::to_string).collect()
    }

    pub fn append(&mut self, mut entries: Vec<FileEntry>) {
        self.entries.append(&mut entries);
    }
}

fn normalize_dir(dir: &str) -> String {
    let segments = split_segments(dir);
    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn folder(id: &str, path: &str, created: NaiveDate, modified: NaiveDate, shared: bool) -> FileEntry {
    let name = split_segments(path).last().map(|s| s.to_string()).unwrap_or_default();
    FileEntry {
        id: id.to_string(),
        name,
        kind: FileKind::Folder,
        size: None,
        extension: None,
        created,
        modified,
        permissions: Permissions { read: true, write: true, share: shared },
        shared,
        path: path.to_string(),
    }
}

fn file(id: &str, path: &str, size: u64, modified: NaiveDate) -> FileEntry {
    let name = split_segments(path).last().map(|s| s.to_string()).unwrap_or_default();
    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_string());
    let kind = extension
        .as_deref()
        .map(FileKind::from_extension)
        .unwrap_or(FileKind::Other);
    FileEntry {
        id: id.to_string(),
        name,
        kind,
        size: Some(size),
        extension,
        created: modified,
        modified,
        permissions: Permissions { read: true, write: true, share: true },
        shared: false,
        path: path.to_string(),
    }
}

/// The demo catalog, nested a few levels deep so breadcrumbs have something
/// to show.
pub fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        folder("folder-1", "/Documents", date(2024, 1, 15), date(2025, 9, 25), false),
        folder("folder-2", "/Projects", date(2024, 2, 10), date(2025, 9, 26), false),
        folder("folder-3", "/Pictures", date(2024, 3, 5), date(2025, 9, 20), true),
        folder("folder-4", "/Videos", date(2024, 4, 12), date(2025, 9, 15), true),
        folder("folder-5", "/Downloads", date(2024, 5, 20), date(2025, 9, 27), false),
        folder("folder-6", "/Projects/Frontend", date(2024, 6, 1), date(2025, 9, 25), false),
        folder("folder-7", "/Projects/Frontend/React", date(2024, 6, 15), date(2025, 9, 24), true),
        folder("folder-8", "/Projects/Backend", date(2024, 7, 1), date(2025, 9, 23), false),
        file("file-1", "/Documents/quarterly-report.pdf", 2_400_000, date(2025, 9, 22)),
        file("file-2", "/Documents/meeting-notes.md", 18_000, date(2025, 9, 26)),
        file("file-3", "/Documents/budget-2025.xlsx", 560_000, date(2025, 9, 18)),
        file("file-4", "/Pictures/team-offsite.jpg", 4_800_000, date(2025, 8, 30)),
        file("file-5", "/Pictures/logo-draft.svg", 96_000, date(2025, 9, 10)),
        file("file-6", "/Videos/product-demo.mp4", 128_000_000, date(2025, 9, 5)),
        file("file-7", "/Downloads/toolkit.zip", 52_000_000, date(2025, 9, 27)),
        file("file-8", "/Projects/Frontend/React/app.tsx", 12_000, date(2025, 9, 24)),
        file("file-9", "/Projects/Backend/server.go", 31_000, date(2025, 9, 23)),
        file("file-10", "/Projects/roadmap.md", 7_500, date(2025, 9, 21)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_path_of_top_level_entry_is_root() {
        let catalog = sample_catalog();
        let docs = catalog.find("folder-1").unwrap();
        assert_eq!(docs.parent_path(), "/");
    }

    #[test]
    fn children_are_scoped_to_the_directory() {
        let catalog = sample_catalog();
        let root = catalog.children_of("/");
        assert!(root.iter().all(|e| e.parent_path() == "/"));
        assert!(root.iter().any(|e| e.name == "Projects"));
        assert!(!root.iter().any(|e| e.name == "Frontend"));

        let frontend = catalog.children_of("/Projects/Frontend");
        assert_eq!(frontend.len(), 1);
        assert_eq!(frontend[0].name, "React");
    }

    #[test]
    fn folders_sort_before_files() {
        let catalog = sample_catalog();
        let children = catalog.children_of("/Projects");
        let first_file = children.iter().position(|e| !e.is_folder());
        let last_folder = children.iter().rposition(|e| e.is_folder());
        if let (Some(file), Some(folder)) = (first_file, last_folder) {
            assert!(folder < file);
        }
    }

    #[test]
    fn dir_queries_normalize_slashes() {
        let catalog = sample_catalog();
        assert_eq!(
            catalog.children_of("/Projects/").len(),
            catalog.children_of("/Projects").len()
        );
        assert_eq!(
            catalog.children_of("//").len(),
            catalog.children_of("/").len()
        );
    }

    #[test]
    fn breadcrumbs_follow_the_path() {
        assert_eq!(
            Catalog::breadcrumbs("/Projects/Frontend/React"),
            vec!["Projects", "Frontend", "React"]
        );
        assert!(Catalog::breadcrumbs("/").is_empty());
    }

    #[test]
    fn file_kind_derives_from_extension() {
        let catalog = sample_catalog();
        assert_eq!(catalog.find("file-1").unwrap().kind, FileKind::Document);
        assert_eq!(catalog.find("file-6").unwrap().kind, FileKind::Video);
        assert_eq!(catalog.find("file-8").unwrap().kind, FileKind::Code);
    }
}
