use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize, Serializer};

/// `ctime(3)` layout, e.g. `Thu Oct 16 23:27:00 2026`.
pub const CTIME_FORMAT: &str = "%a %b %e %H:%M:%S %Y";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Alphabetical, ignoring case.
    #[default]
    Name,
    /// Largest first.
    Size,
    /// Newest first.
    Date,
}

impl SortKey {
    /// Unknown or absent keys sort by name.
    pub fn from_query(sort: Option<&str>) -> Self {
        match sort {
            Some("size") => SortKey::Size,
            Some("date") => SortKey::Date,
            _ => SortKey::Name,
        }
    }

    pub fn apply(self, entries: &mut [FileEntry]) {
        match self {
            SortKey::Name => entries.sort_by_cached_key(|e| e.filename.to_lowercase()),
            SortKey::Size => entries.sort_by(|a, b| b.size.cmp(&a.size)),
            SortKey::Date => entries.sort_by(|a, b| b.last_modified.cmp(&a.last_modified)),
        }
    }
}

/// A regular file directly under the root directory, built fresh per listing.
#[derive(Debug, Clone, Serialize)]
pub struct FileEntry {
    pub filename: String,
    // Size of the file in bytes.
    pub size: u64,
    #[serde(serialize_with = "as_ctime")]
    pub last_modified: DateTime<Local>,
}

fn as_ctime<S: Serializer>(time: &DateTime<Local>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format(CTIME_FORMAT))
}

#[derive(Serialize)]
pub struct FileList {
    pub files: Vec<FileEntry>,
}

/// Query string pairs in request order.
#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryArgs(Vec<(String, String)>);

impl QueryArgs {
    /// The first value given for `key`. Later repeats are ignored.
    pub fn get(&self, key: &str) -> Option<String> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.clone())
    }
}

/// Response to an upload or a delete.
#[derive(Serialize)]
pub struct FileMessage {
    pub message: &'static str,
    pub filename: String,
}

#[derive(Serialize)]
pub struct MoveResult {
    pub message: &'static str,
    pub file: String,
    pub from: String,
    pub to: String,
}

#[derive(Serialize)]
pub struct RenameResult {
    pub message: &'static str,
    pub old_name: String,
    pub new_name: String,
}
