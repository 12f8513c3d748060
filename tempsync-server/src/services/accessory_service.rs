use std::collections::HashMap;

use tokio::sync::{RwLock, broadcast};
use uuid::Uuid;

use crate::configs::Storage;
use crate::errors::{ErrorReporter, HapStatus, StorageError};
use crate::models::{
    Accessory, AccessorySnapshot, CachedAccessory, CharacteristicEvent, CharacteristicKind,
    CharacteristicValue, SurfaceKind,
};

/// Sink for characteristic updates pushed by the pollers.
pub trait DisplayLayer: Send + Sync {
    fn publish(&self, event: CharacteristicEvent);
}

/// Accessory hub: cached registrations on disk and the live accessories served to readers.
pub struct AccessoryService {
    storage: Storage,
    cached: RwLock<HashMap<Uuid, CachedAccessory>>,
    live: RwLock<HashMap<Uuid, Accessory>>,
    sender: broadcast::Sender<CharacteristicEvent>,
    reporter: ErrorReporter,
}

impl AccessoryService {
    pub async fn restore(
        storage: Storage,
        sender: broadcast::Sender<CharacteristicEvent>,
        reporter: ErrorReporter,
    ) -> Result<Self, StorageError> {
        let mut cached = HashMap::new();
        for record in storage.load().await? {
            tracing::debug!("Loading accessory from cache: {}", record.display_name);
            cached.insert(record.uuid, record);
        }
        tracing::info!("restored {} cached accessories", cached.len());

        Ok(Self {
            storage,
            cached: RwLock::new(cached),
            live: RwLock::new(HashMap::new()),
            sender,
            reporter,
        })
    }

    pub async fn cached(&self, uuid: Uuid) -> Option<CachedAccessory> {
        self.cached.read().await.get(&uuid).cloned()
    }

    pub async fn cached_accessories(&self) -> Vec<CachedAccessory> {
        self.cached.read().await.values().cloned().collect()
    }

    pub async fn register(&self, record: CachedAccessory) -> Result<(), StorageError> {
        tracing::info!("Registering accessory: {}", record.display_name);
        self.store(record).await
    }

    pub async fn update(&self, record: CachedAccessory) -> Result<(), StorageError> {
        tracing::debug!("Updating cached accessory: {}", record.display_name);
        self.store(record).await
    }

    async fn store(&self, record: CachedAccessory) -> Result<(), StorageError> {
        let mut cached = self.cached.write().await;
        cached.insert(record.uuid, record);

        let mut records: Vec<CachedAccessory> = cached.values().cloned().collect();
        records.sort_by_key(|r| r.uuid);

        self.storage.save(&records).await
    }

    /// Replaces any accessory previously attached under the same UUID.
    pub async fn attach(&self, accessory: Accessory) {
        self.live.write().await.insert(accessory.uuid, accessory);
    }

    pub async fn accessory(&self, uuid: Uuid) -> Option<Accessory> {
        self.live.read().await.get(&uuid).cloned()
    }

    pub async fn accessories(&self) -> Vec<AccessorySnapshot> {
        let mut snapshots: Vec<AccessorySnapshot> = self
            .live
            .read()
            .await
            .values()
            .map(Accessory::snapshot)
            .collect();
        snapshots.sort_by(|a, b| a.display_name.cmp(&b.display_name));

        snapshots
    }

    pub async fn read(
        &self,
        uuid: Uuid,
        surface: SurfaceKind,
        characteristic: CharacteristicKind,
    ) -> Result<CharacteristicValue, HapStatus> {
        let live = self.live.read().await;
        let accessory = live.get(&uuid).ok_or(HapStatus::ResourceDoesNotExist)?;

        let value = accessory.read(surface, characteristic);
        if let (SurfaceKind::ProbeTemperature, Err(HapStatus::ResourceDoesNotExist)) =
            (surface, &value)
        {
            if accessory.has_probe() {
                tracing::error!(
                    "{}",
                    self.reporter.format_error_message(
                        "Incorrectly initialized or removed temperature probe.",
                        Some(&format!("Reading {}.", accessory.display_name)),
                    )
                );
            }
        }

        value
    }

    pub fn subscribe(&self) -> broadcast::Receiver<CharacteristicEvent> {
        self.sender.subscribe()
    }
}

impl DisplayLayer for AccessoryService {
    fn publish(&self, event: CharacteristicEvent) {
        tracing::debug!(
            "{} {:?}/{:?} = {:?}",
            event.uuid,
            event.surface,
            event.characteristic,
            event.value
        );

        // No subscribers is not an error.
        let _ = self.sender.send(event);
    }
}
