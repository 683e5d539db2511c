//! Core type definitions for the application

use std::time::Instant;

/// Which pane currently receives list-navigation keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusPane {
    Dock,
    Content,
}

impl FocusPane {
    pub fn next(self) -> Self {
        match self {
            FocusPane::Dock => FocusPane::Content,
            FocusPane::Content => FocusPane::Dock,
        }
    }
}

/// Entries in the navigation dock, in display order.
pub const DOCK_ITEMS: [(&str, &str); 5] = [
    ("Home", "/"),
    ("Files", "/files"),
    ("Overview", "/dashboard"),
    ("Analytics", "/dashboard/analytics"),
    ("Settings", "/dashboard/settings"),
];

/// How the files page lays out directory entries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    List,
    Grid,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Grid,
            ViewMode::Grid => ViewMode::List,
        }
    }
}

/// Broad classification of a catalog entry, derived from its extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileKind {
    Folder,
    Document,
    Image,
    Video,
    Audio,
    Archive,
    Code,
    Other,
}

impl FileKind {
    /// Classify by extension, lowercased. Unknown extensions fall through to
    /// `Other` rather than failing.
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "pdf" | "doc" | "docx" | "txt" | "md" | "odt" | "xls" | "xlsx" | "csv" => {
                FileKind::Document
            }
            "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" | "bmp" => FileKind::Image,
            "mp4" | "mkv" | "avi" | "mov" | "webm" => FileKind::Video,
            "mp3" | "flac" | "wav" | "ogg" | "m4a" => FileKind::Audio,
            "zip" | "tar" | "gz" | "rar" | "7z" => FileKind::Archive,
            "rs" | "ts" | "tsx" | "js" | "go" | "py" | "c" | "h" | "toml" | "json" | "yaml" => {
                FileKind::Code
            }
            _ => FileKind::Other,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            FileKind::Folder => "▸",
            FileKind::Document => "≡",
            FileKind::Image => "◩",
            FileKind::Video => "▶",
            FileKind::Audio => "♪",
            FileKind::Archive => "▣",
            FileKind::Code => "{}",
            FileKind::Other => "·",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FileKind::Folder => "Folder",
            FileKind::Document => "Document",
            FileKind::Image => "Image",
            FileKind::Video => "Video",
            FileKind::Audio => "Audio",
            FileKind::Archive => "Archive",
            FileKind::Code => "Code",
            FileKind::Other => "File",
        }
    }
}

/// UI state shared across pages.
#[derive(Clone)]
pub struct UiState {
    pub focus: FocusPane,
    pub dock_selected: usize,
    /// Virtual directory the files page is showing.
    pub files_path: String,
    pub files_selected: usize,
    pub view_mode: ViewMode,
    pub home_selected: usize,
    pub playlist_selected: usize,
    pub show_track_picker: bool,
    pub authenticated: bool,
    pub show_help: bool,
    pub error_message: Option<String>,
    pub error_timestamp: Option<Instant>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            focus: FocusPane::Dock,
            dock_selected: 0,
            files_path: "/".to_string(),
            files_selected: 0,
            view_mode: ViewMode::List,
            home_selected: 0,
            playlist_selected: 0,
            show_track_picker: false,
            authenticated: true,
            show_help: false,
            error_message: None,
            error_timestamp: None,
        }
    }
}
