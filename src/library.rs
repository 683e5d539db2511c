//! Music directory scan: seeds the playlist and the `/Music` catalog branch

use std::path::Path;

use chrono::{DateTime, Local};

use crate::model::{FileEntry, FileKind, Permissions, Track};

const AUDIO_EXTENSIONS: [&str; 5] = ["mp3", "flac", "wav", "ogg", "m4a"];

/// Scan a directory (non-recursively) for audio files. Returns playlist
/// tracks plus matching catalog entries under the virtual `/Music` folder.
/// A missing or unreadable directory simply yields nothing.
pub fn scan_music_dir(dir: &Path) -> (Vec<Track>, Vec<FileEntry>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Music directory not readable");
            return (Vec::new(), Vec::new());
        }
    };

    let mut names: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| e.path())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| AUDIO_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        })
        .collect();
    names.sort();

    let mut tracks = Vec::new();
    let mut catalog_entries = vec![music_folder()];

    for (index, path) in names.iter().enumerate() {
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name)
            .replace(['_', '-'], " ");

        let id = format!("music-{}", index + 1);
        let (size, modified) = match std::fs::metadata(path) {
            Ok(meta) => {
                let modified = meta
                    .modified()
                    .map(|t| DateTime::<Local>::from(t).date_naive())
                    .unwrap_or_default();
                (meta.len(), modified)
            }
            Err(_) => (0, Default::default()),
        };

        tracks.push(Track {
            id: id.clone(),
            title,
            source: path.clone(),
            artist: None,
            duration_hint: None,
        });

        let extension = file_name.rsplit_once('.').map(|(_, ext)| ext.to_string());
        catalog_entries.push(FileEntry {
            id,
            name: file_name.to_string(),
            kind: FileKind::Audio,
            size: Some(size),
            extension,
            created: modified,
            modified,
            permissions: Permissions {
                read: true,
                write: false,
                share: true,
            },
            shared: false,
            path: format!("/Music/{file_name}"),
        });
    }

    tracing::info!(
        dir = %dir.display(),
        tracks = tracks.len(),
        "Music directory scanned"
    );
    (tracks, catalog_entries)
}

fn music_folder() -> FileEntry {
    FileEntry {
        id: "folder-music".to_string(),
        name: "Music".to_string(),
        kind: FileKind::Folder,
        size: None,
        extension: None,
        created: Default::default(),
        modified: Default::default(),
        permissions: Permissions {
            read: true,
            write: false,
            share: false,
        },
        shared: false,
        path: "/Music".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_yields_nothing() {
        let (tracks, entries) = scan_music_dir(Path::new("/no/such/directory"));
        assert!(tracks.is_empty());
        assert!(entries.is_empty());
    }
}
