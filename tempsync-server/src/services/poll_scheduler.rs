use std::sync::Arc;
use std::time::Duration;

use tempsync_api::models::{DisplayState, SensorReading};
use time::OffsetDateTime;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

use super::{DisplayLayer, SensorSource};
use crate::errors::{ApiError, ErrorReporter};
use crate::models::{Accessory, CharacteristicEvent};

const MIN_PERIOD: Duration = Duration::from_secs(1);
/// Upper bound for both the first wait and the poll period.
const MAX_PERIOD: Duration = Duration::from_secs(24 * 60 * 60);

/// When a device is polled first and how often afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPlan {
    pub initial_delay: Duration,
    pub period: Duration,
}

impl PollPlan {
    /// Aligns the first poll with the device's next check-in. An unreadable
    /// check-in falls back to one send interval. Both durations are capped
    /// at one day.
    pub fn for_reading(reading: &SensorReading, user_delay: Duration, now: OffsetDateTime) -> Self {
        let until_checkin = match reading.next_checkin_utc() {
            Ok(checkin) => Duration::try_from(checkin - now).unwrap_or(Duration::ZERO),
            Err(_) => reading.send_interval(),
        };

        let initial_delay = until_checkin
            .saturating_add(reading.wifi_connect_time())
            .saturating_add(user_delay);
        let period = reading
            .send_interval()
            .saturating_add(reading.wifi_connect_time());

        Self {
            initial_delay: initial_delay.min(MAX_PERIOD),
            period: period.clamp(MIN_PERIOD, MAX_PERIOD),
        }
    }
}

/// Polls one device and pushes its state to the display layer.
pub struct PollScheduler {
    source: Arc<dyn SensorSource>,
    display: Arc<dyn DisplayLayer>,
    accessory: Accessory,
    state: watch::Sender<DisplayState>,
    reporter: ErrorReporter,
}

impl PollScheduler {
    pub fn new(
        source: Arc<dyn SensorSource>,
        display: Arc<dyn DisplayLayer>,
        accessory: Accessory,
        state: watch::Sender<DisplayState>,
        reporter: ErrorReporter,
    ) -> Self {
        Self {
            source,
            display,
            accessory,
            state,
            reporter,
        }
    }

    pub fn spawn(self, plan: PollPlan) -> JoinHandle<()> {
        tracing::debug!(
            "scheduling {} in {:?}, then every {:?}",
            self.accessory.display_name,
            plan.initial_delay,
            plan.period
        );

        tokio::spawn(self.run(plan))
    }

    async fn run(self, plan: PollPlan) {
        tokio::time::sleep(plan.initial_delay).await;
        self.cycle().await;

        let start = Instant::now()
            .checked_add(plan.period)
            .unwrap_or_else(Instant::now);
        let mut interval = tokio::time::interval_at(start, plan.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            self.cycle().await;
        }
    }

    async fn cycle(&self) {
        if let Err(e) = self.poll().await {
            tracing::error!(
                "{}",
                self.reporter.api_error(
                    &e,
                    Some(&format!("Error requesting accessory {}.", self.accessory.display_name)),
                )
            );
        }
    }

    /// One fetch and update. The cached state is untouched on failure.
    pub async fn poll(&self) -> Result<DisplayState, ApiError> {
        let raw = self.source.fetch_sensor(&self.accessory.sensor_id).await?;
        let reading = SensorReading::from_value(&raw)?;
        let state = DisplayState::from_reading(&reading, self.accessory.has_probe());

        self.state.send_replace(state.clone());

        for (surface, characteristic, value) in self.accessory.updates(&state) {
            self.display.publish(CharacteristicEvent::new(
                self.accessory.uuid,
                surface,
                characteristic,
                value,
            ));
        }

        tracing::info!(
            "Updated accessory: {}. It is {}. The latest ambient temp was {}°C, ambient humidity of {}%, {}and battery level at {}%",
            reading.name,
            if state.fault_status.is_fault() { "offline" } else { "online" },
            state.ambient_temp,
            state.humidity,
            state
                .probe_temp
                .map(|t| format!("probe temp of {t}°C, "))
                .unwrap_or_default(),
            reading.battery_pct,
        );

        Ok(state)
    }
}
