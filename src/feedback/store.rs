use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use dashmap::DashMap;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::feedback::{errors::FeedbackError, record::FeedbackRecord};

/// One lock per store path, shared by every handle in the process, so the
/// empty-check and the append happen as a single step.
static STORE_LOCKS: LazyLock<DashMap<PathBuf, Arc<Mutex<()>>>> = LazyLock::new(DashMap::new);

/// Append-only CSV log of user feedback.
#[derive(Debug, Clone)]
pub struct FeedbackStore {
    path: PathBuf,
    lock: Arc<Mutex<()>>,
}

impl FeedbackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let key = std::path::absolute(&path).unwrap_or_else(|_| path.clone());
        let lock = STORE_LOCKS.entry(key).or_default().clone();
        Self { path, lock }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build a record from raw inputs and append it.
    pub async fn record(
        &self,
        article: &str,
        summary: &str,
        rating: i64,
        version: &str,
    ) -> Result<(), FeedbackError> {
        let record = FeedbackRecord::new(article, summary, rating, version)?;
        self.append(&record).await
    }

    /// Append one row, writing the header first when the store is missing or empty.
    #[instrument(skip_all, fields(path = %self.path.display(), version = %record.version))]
    pub async fn append(&self, record: &FeedbackRecord) -> Result<(), FeedbackError> {
        let _guard = self.lock.lock().await;

        let needs_header = self.is_empty().await?;
        let row = encode(record, needs_header)?;

        if needs_header
            && let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| FeedbackError::io(parent, e))?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| FeedbackError::io(&self.path, e))?;
        file.write_all(&row)
            .await
            .map_err(|e| FeedbackError::io(&self.path, e))?;
        file.flush()
            .await
            .map_err(|e| FeedbackError::io(&self.path, e))?;

        if needs_header {
            info!("feedback store created");
        }
        debug!(rating = record.rating, "feedback recorded");
        Ok(())
    }

    async fn is_empty(&self) -> Result<bool, FeedbackError> {
        match fs::metadata(&self.path).await {
            Ok(meta) => Ok(meta.len() == 0),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(true),
            Err(e) => Err(FeedbackError::io(&self.path, e)),
        }
    }
}

/// Header (optional) plus one row, minimal quoting, as a single buffer.
fn encode(record: &FeedbackRecord, with_header: bool) -> Result<Vec<u8>, FeedbackError> {
    let mut writer = WriterBuilder::new()
        .has_headers(with_header)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.serialize(record)?;
    writer
        .into_inner()
        .map_err(|e| FeedbackError::Csv(csv::Error::from(e.into_error())))
}
