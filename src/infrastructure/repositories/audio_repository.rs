use crate::domain::speech::AudioAsset;
use moka::future::Cache;
use std::time::Duration;
use uuid::Uuid;

/// In-memory handle store for synthesized audio.
///
/// Assets are evicted once the capacity is reached or after `time_to_idle`
/// without being read.
#[derive(Clone)]
pub struct AudioRepository {
    cache: Cache<Uuid, AudioAsset>,
}

impl AudioRepository {
    pub fn new(capacity: u64, time_to_idle: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(capacity)
            .time_to_idle(time_to_idle)
            .build();

        Self { cache }
    }

    pub async fn insert(&self, asset: AudioAsset) {
        tracing::debug!(
            audio_id = %asset.id,
            audio_size = asset.audio_data.len(),
            "Caching audio asset"
        );
        self.cache.insert(asset.id, asset).await;
    }

    pub async fn get(&self, id: Uuid) -> Option<AudioAsset> {
        self.cache.get(&id).await
    }
}
