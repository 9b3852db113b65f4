//! Local file system backing store

use crate::core::types::Metric;
use crate::storage::BackingStore;
use crate::utils::error::{Result, TelemetryError};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// Checkpoint file holding one JSON record per metric
#[derive(Debug)]
pub struct FileBackingStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileBackingStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

#[async_trait]
impl BackingStore for FileBackingStore {
    async fn get_list(&self) -> Result<Vec<Metric>> {
        let content = match fs::read(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Checkpoint file {} does not exist yet", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(TelemetryError::storage(format!(
                    "Failed to read {}: {}",
                    self.path.display(),
                    e
                )));
            }
        };

        serde_json::Deserializer::from_slice(&content)
            .into_iter::<Metric>()
            .enumerate()
            .map(|(index, record)| {
                record.map_err(|e| {
                    TelemetryError::storage(format!(
                        "Failed to decode record {} of {}: {}",
                        index + 1,
                        self.path.display(),
                        e
                    ))
                })
            })
            .collect()
    }

    async fn update_list(&self, metrics: &[Metric]) -> Result<()> {
        let mut buffer = Vec::with_capacity(metrics.len() * 64);
        for metric in metrics {
            serde_json::to_writer(&mut buffer, metric)?;
            buffer.push(b'\n');
        }

        let _guard = self.write_lock.lock().await;

        fs::create_dir_all(self.parent_dir()).await.map_err(|e| {
            TelemetryError::storage(format!("Failed to create checkpoint directory: {}", e))
        })?;

        // Rewrite the whole file; the rename replaces the previous checkpoint.
        let tmp = self.temp_path();
        fs::write(&tmp, &buffer)
            .await
            .map_err(|e| TelemetryError::storage(format!("Failed to write checkpoint: {}", e)))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| TelemetryError::storage(format!("Failed to replace checkpoint: {}", e)))?;

        debug!(
            "Wrote {} metrics to {}",
            metrics.len(),
            self.path.display()
        );
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let dir = self.parent_dir();
        match fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => Ok(()),
            Ok(_) => Err(TelemetryError::storage(format!(
                "{} is not a directory",
                dir.display()
            ))),
            Err(e) => Err(TelemetryError::storage(format!(
                "Checkpoint directory {} is unavailable: {}",
                dir.display(),
                e
            ))),
        }
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
