//! Dashboard data: stats, favorites, activity feed, quick access

use chrono::NaiveDate;

use super::types::FileKind;

#[derive(Clone, Debug)]
pub struct SystemStats {
    pub total_files: u64,
    pub total_folders: u64,
    pub total_size: u64,
    pub available_space: u64,
    pub last_backup: NaiveDate,
    pub active_users: u32,
}

#[derive(Clone, Debug)]
pub struct FavoriteFolder {
    pub name: String,
    pub path: String,
    pub item_count: u32,
    pub last_accessed: NaiveDate,
}

#[derive(Clone, Debug)]
pub struct FavoriteFile {
    pub name: String,
    pub size: u64,
    pub last_modified: NaiveDate,
}

/// What happened in an activity-feed row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActivityKind {
    Create,
    Modify,
    Delete,
    Share,
    Download,
}

impl ActivityKind {
    pub fn label(self) -> &'static str {
        match self {
            ActivityKind::Create => "created",
            ActivityKind::Modify => "modified",
            ActivityKind::Delete => "deleted",
            ActivityKind::Share => "shared",
            ActivityKind::Download => "downloaded",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ActivityEntry {
    pub kind: ActivityKind,
    pub file_name: String,
    pub when: String,
    pub user: Option<String>,
}

#[derive(Clone, Debug)]
pub struct QuickAccessItem {
    pub name: String,
    pub kind: FileKind,
}

#[derive(Clone, Debug)]
pub struct DashboardData {
    pub stats: SystemStats,
    pub favorite_folders: Vec<FavoriteFolder>,
    pub favorite_files: Vec<FavoriteFile>,
    pub activity: Vec<ActivityEntry>,
    pub quick_access: Vec<QuickAccessItem>,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

pub fn sample_dashboard() -> DashboardData {
    DashboardData {
        stats: SystemStats {
            total_files: 1_247,
            total_folders: 89,
            total_size: 24_700_000_000,
            available_space: 487_300_000_000,
            last_backup: date(2025, 9, 26),
            active_users: 3,
        },
        favorite_folders: vec![
            FavoriteFolder {
                name: "Key Projects".to_string(),
                path: "/Projects".to_string(),
                item_count: 24,
                last_accessed: date(2025, 9, 26),
            },
            FavoriteFolder {
                name: "Family Photos".to_string(),
                path: "/Pictures".to_string(),
                item_count: 156,
                last_accessed: date(2025, 9, 25),
            },
            FavoriteFolder {
                name: "Paperwork".to_string(),
                path: "/Documents".to_string(),
                item_count: 67,
                last_accessed: date(2025, 9, 23),
            },
        ],
        favorite_files: vec![
            FavoriteFile {
                name: "quarterly-report.pdf".to_string(),
                size: 2_400_000,
                last_modified: date(2025, 9, 22),
            },
            FavoriteFile {
                name: "budget-2025.xlsx".to_string(),
                size: 560_000,
                last_modified: date(2025, 9, 18),
            },
            FavoriteFile {
                name: "roadmap.md".to_string(),
                size: 7_500,
                last_modified: date(2025, 9, 21),
            },
        ],
        activity: vec![
            ActivityEntry {
                kind: ActivityKind::Modify,
                file_name: "meeting-notes.md".to_string(),
                when: "12 minutes ago".to_string(),
                user: Some("ana".to_string()),
            },
            ActivityEntry {
                kind: ActivityKind::Create,
                file_name: "toolkit.zip".to_string(),
                when: "1 hour ago".to_string(),
                user: Some("mario".to_string()),
            },
            ActivityEntry {
                kind: ActivityKind::Share,
                file_name: "team-offsite.jpg".to_string(),
                when: "3 hours ago".to_string(),
                user: Some("ana".to_string()),
            },
            ActivityEntry {
                kind: ActivityKind::Download,
                file_name: "product-demo.mp4".to_string(),
                when: "yesterday".to_string(),
                user: None,
            },
            ActivityEntry {
                kind: ActivityKind::Delete,
                file_name: "old-draft.doc".to_string(),
                when: "2 days ago".to_string(),
                user: Some("mario".to_string()),
            },
        ],
        quick_access: vec![
            QuickAccessItem {
                name: "Downloads".to_string(),
                kind: FileKind::Folder,
            },
            QuickAccessItem {
                name: "product-demo.mp4".to_string(),
                kind: FileKind::Video,
            },
            QuickAccessItem {
                name: "toolkit.zip".to_string(),
                kind: FileKind::Archive,
            },
        ],
    }
}

/// Activity volume per weekday for the analytics chart.
pub fn weekly_activity() -> [(&'static str, u64); 7] {
    [
        ("Mon", 34),
        ("Tue", 48),
        ("Wed", 27),
        ("Thu", 61),
        ("Fri", 55),
        ("Sat", 12),
        ("Sun", 8),
    ]
}
