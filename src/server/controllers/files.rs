use std::path::{Path, PathBuf};
use std::sync::Arc;

use key_mutex::tokio::KeyMutex;
use tokio::fs::{self, File};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio_util::io::ReaderStream;
use tracing::trace;

use crate::server::error::{ServerError, ServerResult};
use crate::server::models::files::{FileEntry, SortKey};

/// Files are read and written in blocks of this many bytes.
pub const CHUNK_SIZE: usize = 4096;

pub type FileController = Arc<FileControllerInner>;

/// Filesystem operations on a single root directory.
pub struct FileControllerInner {
    root: PathBuf,
    // Concurrent uploads of one name would otherwise interleave their chunks.
    active_uploads: Arc<KeyMutex<PathBuf, ()>>,
}

/// An opened file, ready to be streamed to a client.
pub struct Download {
    pub stream: ReaderStream<File>,
    /// Last component of the requested name.
    pub file_name: String,
    pub content_type: &'static str,
}

impl FileControllerInner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            active_uploads: Arc::new(KeyMutex::new()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Regular files directly under the root, sorted by `sort`.
    pub async fn list(&self, sort: SortKey) -> ServerResult<Vec<FileEntry>> {
        let mut dir = fs::read_dir(&self.root).await?;
        let mut entries = Vec::new();

        while let Some(entry) = dir.next_entry().await? {
            // Broken links and the like are skipped, same as directories.
            let Ok(metadata) = fs::metadata(entry.path()).await else {
                continue;
            };
            if !metadata.is_file() {
                continue;
            }

            entries.push(FileEntry {
                filename: entry.file_name().to_string_lossy().into_owned(),
                size: metadata.len(),
                last_modified: metadata.modified()?.into(),
            });
        }

        sort.apply(&mut entries);
        Ok(entries)
    }

    pub async fn open(&self, name: &str) -> ServerResult<Download> {
        let path = self.resolve(name);

        match fs::metadata(&path).await {
            Ok(m) if m.is_file() => {}
            _ => return Err(ServerError::file_not_found()),
        }

        let file = File::open(&path).await?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());
        let content_type = mime_guess::from_path(&path)
            .first_raw()
            .unwrap_or("application/octet-stream");

        Ok(Download {
            stream: ReaderStream::with_capacity(file, CHUNK_SIZE),
            file_name,
            content_type,
        })
    }

    /// Copies `reader` to `root/<file_name>` chunk by chunk, replacing any
    /// existing file. Returns the number of bytes written.
    ///
    /// If the copy fails midway the partially written file is left behind.
    pub async fn save_upload<R>(&self, file_name: &str, mut reader: R) -> ServerResult<u64>
    where
        R: AsyncRead + Unpin,
    {
        let path = self.resolve(file_name);

        let guard = self.active_uploads.lock(path.clone()).await;

        let mut file = File::create(&path).await?;
        let mut buf = [0u8; CHUNK_SIZE];
        let mut written: u64 = 0;

        loop {
            let n = reader.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            file.write_all(&buf[..n]).await?;
            written += n as u64;
        }

        file.flush().await?;
        drop(file);
        drop(guard);

        trace!("Stored upload {} ({written} bytes)", path.to_string_lossy());
        Ok(written)
    }

    pub async fn delete(&self, name: &str) -> ServerResult<()> {
        let path = self.resolve(name);

        if !exists(&path).await {
            return Err(ServerError::file_not_found());
        }

        fs::remove_file(&path).await?;
        trace!("Deleted {}", path.to_string_lossy());
        Ok(())
    }

    /// Moves `root/<file>` into the existing folder `root/<to>`, keeping its
    /// name. An existing file at the destination is handled however the
    /// platform's rename handles it.
    ///
    /// Returns the resolved source and destination paths.
    pub async fn mv(&self, file: &str, to: &str) -> ServerResult<(PathBuf, PathBuf)> {
        let source = self.resolve(file);
        let target_dir = self.resolve(to);
        let target = target_dir.join(file);

        if !exists(&source).await {
            return Err(ServerError::file_not_found());
        }

        if !exists(&target_dir).await {
            return Err(ServerError::NotFound { why: "Target folder does not exist".into() });
        }

        fs::rename(&source, &target).await?;
        trace!("Moved {} to {}", source.to_string_lossy(), target.to_string_lossy());

        Ok((source, target))
    }

    /// Renames within the root. Refuses to replace an existing file.
    pub async fn rename(&self, old_name: &str, new_name: &str) -> ServerResult<()> {
        let old_path = self.resolve(old_name);
        let new_path = self.resolve(new_name);

        if !exists(&old_path).await {
            return Err(ServerError::file_not_found());
        }

        if exists(&new_path).await {
            return Err(ServerError::ValidationError { why: "File with new name already exists".into() });
        }

        fs::rename(&old_path, &new_path).await?;
        trace!("Renamed {old_name} to {new_name}");
        Ok(())
    }
}

async fn exists(path: &Path) -> bool {
    fs::try_exists(path).await.unwrap_or(false)
}
