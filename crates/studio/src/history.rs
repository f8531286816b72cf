//! Track history
//!
//! Generated tracks are kept in a single pretty-printed JSON array on disk.
//! Appends are serialized through an async mutex and land via write-then-rename,
//! so concurrent readers see either the old or the new array, never a torn file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use melodia_shared::{GenerationMode, TrackId};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::error::{StudioError, StudioResult};

/// A generated piece of music
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: TrackId,
    pub owner: String,
    pub title: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,
    pub mode: GenerationMode,
    pub model_id: String,
    pub style: String,
    pub mood: String,
    /// Seconds
    pub duration: u32,
    pub tempo: String,
    pub vocal_type: String,
    pub audio_url: String,
    pub created_at: DateTime<Utc>,
}

/// Append/query store over a JSON array file
pub struct HistoryStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a track, creating the file and its directories on first use
    pub async fn append(&self, track: Track) -> StudioResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut tracks = self.read_all().await?;
        tracks.push(track);

        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(dir).await?;
        }

        let json = serde_json::to_string_pretty(&tracks)
            .map_err(|err| std::io::Error::new(ErrorKind::InvalidData, err))?;

        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, json).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        tracing::debug!(
            path = %self.path.display(),
            tracks = tracks.len(),
            "track history written"
        );

        Ok(())
    }

    /// Every track, oldest first
    pub async fn list(&self) -> StudioResult<Vec<Track>> {
        let mut tracks = self.read_all().await?;
        tracks.sort_by_key(|track| track.created_at);
        Ok(tracks)
    }

    /// Tracks generated by `owner`, oldest first
    pub async fn list_for(&self, owner: &str) -> StudioResult<Vec<Track>> {
        let mut tracks = self.list().await?;
        tracks.retain(|track| track.owner == owner);
        Ok(tracks)
    }

    /// Number of tracks `owner` generated at or after `since`
    pub async fn count_since(&self, owner: &str, since: DateTime<Utc>) -> StudioResult<usize> {
        Ok(self
            .read_all()
            .await?
            .iter()
            .filter(|track| track.owner == owner && track.created_at >= since)
            .count())
    }

    async fn read_all(&self) -> StudioResult<Vec<Track>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|err| {
            tracing::error!(
                path = %self.path.display(),
                error = %err,
                "track history is not a JSON array of tracks"
            );
            StudioError::CorruptHistory(err.to_string())
        })
    }
}
