//! Mock music generation
//!
//! There is no audio pipeline behind this service: a generation waits for a
//! configurable delay, fabricates an audio URL and records the track.
//!
//! Generations for one owner are serialized through [`OwnerSlot`], so a quota
//! check and the track it admits are recorded as a single step.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use melodia_shared::TrackId;
use tokio::sync::OwnedMutexGuard;

use crate::error::StudioResult;
use crate::history::{HistoryStore, Track};
use crate::request::GenerationRequest;

/// Exclusive right to generate for one owner; released on drop
pub struct OwnerSlot {
    owner: String,
    _guard: OwnedMutexGuard<()>,
}

impl OwnerSlot {
    pub fn owner(&self) -> &str {
        &self.owner
    }
}

pub struct GenerationService {
    history: Arc<HistoryStore>,
    delay: Duration,
    audio_base_url: String,
    owner_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
    /// Tracks handed out whose history write failed, by owner
    unrecorded: Mutex<HashMap<String, Vec<DateTime<Utc>>>>,
}

impl GenerationService {
    pub fn new(history: Arc<HistoryStore>, delay: Duration, audio_base_url: &str) -> Self {
        Self {
            history,
            delay,
            audio_base_url: audio_base_url.trim_end_matches('/').to_string(),
            owner_locks: Mutex::new(HashMap::new()),
            unrecorded: Mutex::new(HashMap::new()),
        }
    }

    /// Wait until no other generation for `owner` is in flight.
    ///
    /// Hold the slot from the quota check through [`Self::generate`].
    pub async fn acquire(&self, owner: &str) -> OwnerSlot {
        let lock = {
            let mut locks = self.owner_locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(owner.to_string()).or_default().clone()
        };

        OwnerSlot {
            owner: owner.to_string(),
            _guard: lock.lock_owned().await,
        }
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Produce a track for `request` and record it in the history.
    ///
    /// A failed history write is logged and still counts toward
    /// [`Self::generated_today`]; the caller gets the track either way.
    pub async fn generate(&self, slot: &OwnerSlot, request: GenerationRequest) -> Track {
        let owner = slot.owner();
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let created_at = Utc::now();
        let track = Track {
            id: TrackId::new(),
            owner: owner.to_string(),
            title: title_for(&request),
            audio_url: format!(
                "{}/music_{}.mp3",
                self.audio_base_url,
                created_at.timestamp_millis()
            ),
            description: request.description,
            lyrics: request.lyrics,
            mode: request.mode,
            model_id: request.model_id,
            style: request.style,
            mood: request.mood,
            duration: request.duration,
            tempo: request.tempo,
            vocal_type: request.vocal_type,
            created_at,
        };

        if let Err(err) = self.history.append(track.clone()).await {
            tracing::error!(
                track_id = %track.id,
                owner = owner,
                error = %err,
                "failed to record generated track"
            );
            self.unrecorded
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .entry(owner.to_string())
                .or_default()
                .push(track.created_at);
        }

        tracing::info!(
            track_id = %track.id,
            owner = owner,
            mode = %track.mode,
            model_id = %track.model_id,
            duration = track.duration,
            "music generated"
        );

        track
    }

    /// Tracks `owner` generated since the start of the current UTC day
    pub async fn generated_today(&self, owner: &str) -> StudioResult<usize> {
        let since = start_of_day(Utc::now());
        let recorded = self.history.count_since(owner, since).await?;
        let unrecorded = self
            .unrecorded
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(owner)
            .map_or(0, |times| times.iter().filter(|at| **at >= since).count());

        Ok(recorded + unrecorded)
    }
}

fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .unwrap_or(now)
}

/// The requested name, or "Style mood" when the name is blank
fn title_for(request: &GenerationRequest) -> String {
    let name = request.name.trim();
    if !name.is_empty() {
        return name.to_string();
    }

    let mut style = request.style.chars();
    let style = match style.next() {
        Some(first) => first.to_uppercase().chain(style).collect::<String>(),
        None => String::new(),
    };
    format!("{} {}", style, request.mood).trim().to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use melodia_shared::GenerationMode;

    fn request(name: &str) -> GenerationRequest {
        GenerationRequest {
            mode: GenerationMode::Inspiration,
            name: name.to_string(),
            description: "Upbeat synths".to_string(),
            lyrics: None,
            style: "electronic".to_string(),
            mood: "happy".to_string(),
            duration: 30,
            tempo: "fast".to_string(),
            vocal_type: "random".to_string(),
            model_id: "Chirp v4.5".to_string(),
        }
    }

    fn service(dir: &tempfile::TempDir) -> GenerationService {
        let history = Arc::new(HistoryStore::new(dir.path().join("music.json")));
        GenerationService::new(history, Duration::ZERO, "https://cdn.example.com/")
    }

    #[test]
    fn test_title_falls_back_to_style_and_mood() {
        assert_eq!(title_for(&request("Sunrise")), "Sunrise");
        assert_eq!(title_for(&request("  ")), "Electronic happy");
    }

    #[test]
    fn test_start_of_day_is_midnight() {
        let midnight = start_of_day(Utc::now());
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.minute(), 0);
        assert_eq!(midnight.second(), 0);
    }

    #[tokio::test]
    async fn test_generate_records_track() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);

        let slot = service.acquire("ana").await;
        let track = service.generate(&slot, request("Sunrise")).await;
        assert_eq!(track.title, "Sunrise");
        assert_eq!(track.owner, "ana");
        assert_eq!(track.model_id, "Chirp v4.5");
        assert!(track.audio_url.starts_with("https://cdn.example.com/music_"));
        assert!(track.audio_url.ends_with(".mp3"));

        let stored = service.history().list().await.unwrap();
        assert_eq!(stored, vec![track]);
        assert_eq!(service.generated_today("ana").await.unwrap(), 1);
        assert_eq!(service.generated_today("ben").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_generate_survives_history_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("music.json");
        tokio::fs::write(&path, "not json").await.unwrap();
        let history = Arc::new(HistoryStore::new(&path));
        let service = GenerationService::new(history, Duration::ZERO, "https://example.com");

        let slot = service.acquire("ana").await;
        let track = service.generate(&slot, request("Sunrise")).await;
        assert_eq!(track.title, "Sunrise");
        assert!(service.generated_today("ana").await.is_err());
    }

    #[tokio::test]
    async fn test_unrecorded_tracks_count_toward_today() {
        let dir = tempfile::tempdir().unwrap();
        let service = service(&dir);
        let path = service.history().path().to_path_buf();

        let slot = service.acquire("ana").await;
        service.generate(&slot, request("One")).await;
        drop(slot);

        // A directory where the file should be makes the next write fail.
        tokio::fs::remove_file(&path).await.unwrap();
        tokio::fs::create_dir(&path).await.unwrap();

        let slot = service.acquire("ana").await;
        service.generate(&slot, request("Two")).await;
        drop(slot);

        tokio::fs::remove_dir(&path).await.unwrap();
        assert_eq!(service.generated_today("ana").await.unwrap(), 1);
        assert_eq!(service.generated_today("ben").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_acquire_serializes_one_owner() {
        let dir = tempfile::tempdir().unwrap();
        let service = Arc::new(service(&dir));

        let held = service.acquire("ana").await;

        // Another owner is not blocked.
        let other = tokio::time::timeout(Duration::from_millis(50), service.acquire("ben")).await;
        assert!(other.is_ok());

        let waiting = tokio::spawn({
            let service = Arc::clone(&service);
            async move {
                service.acquire("ana").await;
            }
        });
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!waiting.is_finished());

        drop(held);
        waiting.await.unwrap();
    }
}
