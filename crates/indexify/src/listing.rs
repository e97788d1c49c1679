use std::{
    cmp::Ordering,
    hash::{DefaultHasher, Hash, Hasher},
    path::{Path, PathBuf},
    time::SystemTime,
};

use anyhow::{Context, Result, bail};
use jwalk::WalkDir;
use tablify::{Item, ItemKind, SortDirection, SortSpec};
use time::{OffsetDateTime, macros::format_description};
use tracing::{debug, warn};

const IMAGE_EXTENSIONS: [&str; 7] = ["png", "jpg", "jpeg", "gif", "webp", "bmp", "svg"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListingQuery {
    pub folder: PathBuf,
    pub sort: String,
    /// 1-based.
    pub page: usize,
    pub limit: usize,
}

#[derive(Clone, Debug)]
pub enum ListingRequest {
    Fetch(ListingQuery),
    /// Re-run the last fetch, e.g. after the folder changed on disk.
    Refresh,
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub item: Item,
    pub path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct Listing {
    pub query: ListingQuery,
    pub entries: Vec<Entry>,
    pub count: usize,
    pub error: Option<String>,
}

impl Listing {
    pub fn failed(query: ListingQuery, error: impl Into<String>) -> Self {
        Self {
            query,
            entries: vec![],
            count: 0,
            error: Some(error.into()),
        }
    }
}

struct Record {
    kind: ItemKind,
    title: String,
    size: u64,
    modified: Option<SystemTime>,
    path: PathBuf,
}

/// Lists one folder, ordered by `query.sort` with folders first, and returns
/// the requested page along with the total entry count.
pub fn list_folder(query: &ListingQuery) -> Result<Listing> {
    if !query.folder.is_dir() {
        bail!("{} is not a folder", query.folder.display());
    }

    let spec = query.sort.parse::<SortSpec>().unwrap_or_else(|e| {
        warn!("falling back to title order: {e}");
        SortSpec::new("title", SortDirection::Asc)
    });

    let mut records = read_records(&query.folder)?;
    records.sort_by(|a, b| compare(a, b, &spec));

    let count = records.len();
    let offset = query.page.max(1).saturating_sub(1).saturating_mul(query.limit);
    let entries = records
        .into_iter()
        .skip(offset)
        .take(query.limit)
        .map(into_entry)
        .collect::<Vec<_>>();

    debug!(
        "listed {} of {} entries in {}",
        entries.len(),
        count,
        query.folder.display()
    );
    Ok(Listing {
        query: query.clone(),
        entries,
        count,
        error: None,
    })
}

fn read_records(folder: &Path) -> Result<Vec<Record>> {
    let mut records = vec![];
    for entry in WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .skip_hidden(true)
    {
        let entry = entry.with_context(|| format!("reading {}", folder.display()))?;
        let path = entry.path();
        let metadata = match entry.metadata() {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("skipping {}: {e}", path.display());
                continue;
            }
        };

        let kind = if metadata.is_dir() {
            ItemKind::Folder
        } else {
            ItemKind::File
        };
        records.push(Record {
            kind,
            title: entry.file_name().to_string_lossy().into_owned(),
            size: if metadata.is_dir() { 0 } else { metadata.len() },
            modified: metadata.modified().ok(),
            path,
        });
    }
    Ok(records)
}

fn compare(a: &Record, b: &Record, spec: &SortSpec) -> Ordering {
    let folders_first = match (a.kind, b.kind) {
        (ItemKind::Folder, ItemKind::File) => Ordering::Less,
        (ItemKind::File, ItemKind::Folder) => Ordering::Greater,
        _ => Ordering::Equal,
    };

    let by_title = || a.title.to_lowercase().cmp(&b.title.to_lowercase());
    let by_column = match spec.column.as_str() {
        "size" => a.size.cmp(&b.size).then_with(by_title),
        "lastUpdated" => a.modified.cmp(&b.modified).then_with(by_title),
        _ => by_title(),
    };
    let by_column = match spec.direction {
        SortDirection::Asc => by_column,
        SortDirection::Desc => by_column.reverse(),
    };

    folders_first.then(by_column)
}

fn into_entry(record: Record) -> Entry {
    let is_folder = record.kind == ItemKind::Folder;
    let thumbnail_url = (!is_folder && is_image(&record.path))
        .then(|| record.path.to_string_lossy().into_owned());

    let item = Item {
        id: stable_id(&record.path),
        kind: record.kind,
        title: record.title,
        thumbnail_url,
        size: record.size,
        last_updated: record.modified.map(format_modified).unwrap_or_default(),
        ..Default::default()
    };
    Entry {
        item,
        path: record.path,
    }
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

/// Positive id derived from the path, so it survives re-listing.
pub fn stable_id(path: &Path) -> i64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    ((hasher.finish() >> 1) as i64).max(1)
}

fn format_modified(modified: SystemTime) -> String {
    let format = format_description!("[year]-[month]-[day] [hour]:[minute]");
    OffsetDateTime::from(modified)
        .format(&format)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(kind: ItemKind, title: &str, size: u64) -> Record {
        Record {
            kind,
            title: title.to_string(),
            size,
            modified: None,
            path: PathBuf::from(title),
        }
    }

    #[test]
    fn folders_stay_first_in_both_directions() {
        let folder = record(ItemKind::Folder, "zeta", 0);
        let file = record(ItemKind::File, "alpha", 10);

        for direction in [SortDirection::Asc, SortDirection::Desc] {
            let spec = SortSpec::new("title", direction);
            assert_eq!(compare(&folder, &file, &spec), Ordering::Less);
        }
    }

    #[test]
    fn size_ties_break_on_title() {
        let a = record(ItemKind::File, "a.txt", 10);
        let b = record(ItemKind::File, "B.txt", 10);
        let spec = SortSpec::new("size", SortDirection::Asc);
        assert_eq!(compare(&a, &b, &spec), Ordering::Less);
    }

    #[test]
    fn ids_are_positive_and_repeatable() {
        let path = Path::new("/tmp/gallery/a.png");
        assert!(stable_id(path) > 0);
        assert_eq!(stable_id(path), stable_id(path));
        assert_ne!(stable_id(path), stable_id(Path::new("/tmp/gallery/b.png")));
    }

    #[test]
    fn only_image_files_get_thumbnails() {
        assert!(is_image(Path::new("photo.JPG")));
        assert!(!is_image(Path::new("notes.txt")));
        assert!(!is_image(Path::new("Makefile")));
    }
}
