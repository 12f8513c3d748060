use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serde_json::Value;
use tempsync_api::models::SensorReading;
use tempsync_api::uuid::accessory_uuid;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use super::{AccessoryService, PollPlan, PollScheduler, SensorSource};
use crate::configs::TempStick;
use crate::errors::{ApiError, ErrorReporter};
use crate::models::{Accessory, CachedAccessory};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscoveryReport {
    /// New devices registered with the hub
    pub registered: usize,
    /// Cached devices brought back to life
    pub restored: usize,
    /// Devices already polled whose context was refreshed
    pub updated: usize,
    /// Schedulers aborted because their device disappeared
    pub stopped: usize,
}

/// Reconciles the account's device list with the hub and owns the pollers.
pub struct DiscoveryService {
    source: Arc<dyn SensorSource>,
    hub: Arc<AccessoryService>,
    schedulers: Mutex<HashMap<Uuid, JoinHandle<()>>>,
    user_delay: Duration,
    reporter: ErrorReporter,
}

impl DiscoveryService {
    pub fn new(
        source: Arc<dyn SensorSource>,
        hub: Arc<AccessoryService>,
        settings: &TempStick,
    ) -> Self {
        Self {
            source,
            hub,
            schedulers: Mutex::new(HashMap::new()),
            user_delay: settings.user_delay(),
            reporter: ErrorReporter::new(&settings.issue_tracker),
        }
    }

    /// One discovery pass; failures are logged.
    pub async fn discover(&self) {
        match self.run_discovery().await {
            Ok(report) => tracing::info!(
                "discovery finished: {} registered, {} restored, {} updated, {} stopped",
                report.registered,
                report.restored,
                report.updated,
                report.stopped
            ),
            Err(e) => tracing::error!("{}", self.reporter.api_error(&e, None)),
        }
    }

    /// The scheduler map is only locked to snapshot it and to apply the
    /// result, never across hub writes.
    pub async fn run_discovery(&self) -> Result<DiscoveryReport, ApiError> {
        let devices = self.source.fetch_all().await?;

        let active: HashSet<Uuid> = self
            .schedulers
            .lock()
            .await
            .iter()
            .filter(|(_, h)| !h.is_finished())
            .map(|(uuid, _)| *uuid)
            .collect();

        let mut report = DiscoveryReport::default();
        let mut seen = HashSet::new();
        let mut started = Vec::new();

        for raw in devices {
            let reading = match SensorReading::from_value(&raw) {
                Ok(reading) => reading,
                Err(e) => {
                    tracing::error!(
                        "{}",
                        self.reporter.format_error_message(
                            &raw.to_string(),
                            Some(&format!("Skipping device: {e}.")),
                        )
                    );
                    continue;
                }
            };

            let uuid = accessory_uuid(&reading.mac_address);
            seen.insert(uuid);

            if active.contains(&uuid) {
                if let Some(record) = self.hub.cached(uuid).await {
                    self.refresh(record, raw).await;
                }
                report.updated += 1;
            } else if let Some(record) = self.hub.cached(uuid).await {
                tracing::info!("Restoring existing accessory from cache: {}", record.display_name);

                let display_name = record.display_name.clone();
                self.refresh(record, raw).await;
                started.push((uuid, self.start(uuid, &display_name, &reading).await));
                report.restored += 1;
            } else {
                tracing::info!("Adding new accessory: {}", reading.name);

                let record = CachedAccessory::new(uuid, &reading.name, raw);
                started.push((uuid, self.start(uuid, &record.display_name, &reading).await));
                if let Err(e) = self.hub.register(record).await {
                    tracing::error!("failed to persist {}: {}", reading.name, e);
                }
                report.registered += 1;
            }

            tracing::info!(
                "Updated accessory {}. It is {} with the last ambient temp was {}°C and ambient humidity of {}% {}with a battery level at {}%",
                reading.name,
                if reading.offline { "offline" } else { "online" },
                reading.ambient_temp_c,
                reading.humidity_pct,
                reading
                    .probe_temp_c
                    .map(|t| format!("and a probe temp of {t}°C "))
                    .unwrap_or_default(),
                reading.battery_pct,
            );
        }

        let mut schedulers = self.schedulers.lock().await;
        for (uuid, handle) in started {
            if let Some(previous) = schedulers.insert(uuid, handle) {
                previous.abort();
            }
        }

        let missing: Vec<Uuid> = schedulers
            .keys()
            .filter(|uuid| !seen.contains(uuid))
            .copied()
            .collect();
        for uuid in missing {
            if let Some(handle) = schedulers.remove(&uuid) {
                handle.abort();
                tracing::info!("stopped polling {}, no longer listed by the API", uuid);
                report.stopped += 1;
            }
        }

        Ok(report)
    }

    async fn refresh(&self, mut record: CachedAccessory, raw: Value) {
        record.context = raw;
        if let Err(e) = self.hub.update(record).await {
            tracing::error!("failed to persist accessory context: {}", e);
        }
    }

    async fn start(&self, uuid: Uuid, display_name: &str, reading: &SensorReading) -> JoinHandle<()> {
        if let Err(e) = reading.next_checkin_utc() {
            tracing::error!(
                "{}",
                self.reporter.format_error_message(
                    &format!("Next Checkin is invalid: {}", reading.next_checkin),
                    Some(&format!(
                        "Unsuccessfully parsed the next checkin date of the sensor {} ({e}).",
                        reading.id
                    )),
                )
            );
        }

        let plan = PollPlan::for_reading(reading, self.user_delay, OffsetDateTime::now_utc());
        let (accessory, state) = Accessory::new(uuid, display_name, reading);
        self.hub.attach(accessory.clone()).await;

        PollScheduler::new(
            self.source.clone(),
            self.hub.clone(),
            accessory,
            state,
            self.reporter.clone(),
        )
        .spawn(plan)
    }

    pub async fn running(&self) -> usize {
        self.schedulers
            .lock()
            .await
            .values()
            .filter(|h| !h.is_finished())
            .count()
    }

    /// Runs discovery now and then every `every`.
    pub fn spawn_rediscovery(self: &Arc<Self>, every: Duration) -> JoinHandle<()> {
        let discovery = self.clone();

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                discovery.discover().await;
            }
        })
    }

    /// Aborts every poller.
    pub async fn shutdown(&self) {
        for (_, handle) in self.schedulers.lock().await.drain() {
            handle.abort();
        }
    }
}
