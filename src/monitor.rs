//! Pressure trend evaluation cycle
//!
//! Runs fetch, trend building, warning evaluation and reporting once.
//! Any failure aborts the cycle; there is no partial result.

use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info, instrument, warn};

use crate::config::{NotificationConfig, TrendConfig};
use crate::models::EvaluationResult;
use crate::notify::{NotificationSink, TopicPublisher};
use crate::trend::{build_trend, evaluate, hpa_to_inhg};
use crate::weather::ForecastSource;

/// A notification sink bound to the topic warnings are published to
pub struct Notifier {
    pub sink: Box<dyn NotificationSink>,
    pub topic: String,
}

impl Notifier {
    pub fn new(sink: Box<dyn NotificationSink>, topic: impl Into<String>) -> Self {
        Self {
            sink,
            topic: topic.into(),
        }
    }

    /// Topic publisher for the configured topic, or `None` when no topic is
    /// set or publishing is turned off
    pub fn from_config(
        config: &NotificationConfig,
        enabled: bool,
        timeout: Duration,
    ) -> crate::Result<Option<Self>> {
        match &config.topic {
            Some(topic) if enabled => {
                let publisher = TopicPublisher::from_config(config, timeout)?;
                Ok(Some(Self::new(Box::new(publisher), topic.clone())))
            }
            Some(topic) => {
                info!("Publishing to topic '{}' disabled", topic);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

/// Orchestrates a single evaluation cycle
pub struct PressureMonitor {
    source: Box<dyn ForecastSource>,
    notifier: Option<Notifier>,
    trend: TrendConfig,
}

impl PressureMonitor {
    #[must_use]
    pub fn new(source: Box<dyn ForecastSource>, notifier: Option<Notifier>, trend: TrendConfig) -> Self {
        Self {
            source,
            notifier,
            trend,
        }
    }

    /// Fetch the forecast, evaluate the trend and publish a warning if needed
    #[instrument(skip(self), fields(
        hours_ahead = self.trend.hours_ahead,
        warning_hours_ahead = self.trend.warning_hours_ahead,
        drop_threshold = self.trend.drop_threshold
    ))]
    pub async fn run(&self) -> crate::Result<EvaluationResult> {
        let snapshot = self.source.fetch_snapshot().await?;

        let current_pressure = hpa_to_inhg(snapshot.current_pressure);
        info!("Current Pressure: {:.2}", current_pressure);

        let points = build_trend(&snapshot, self.trend.hours_ahead)?;
        let check = evaluate(
            &points,
            self.trend.warning_hours_ahead,
            self.trend.drop_threshold,
        )?;

        let result = EvaluationResult {
            evaluated_at: Utc::now(),
            current_pressure,
            lookahead_hours: self.trend.warning_hours_ahead,
            threshold: self.trend.drop_threshold,
            percent_change: check.percent_change,
            triggered: check.triggered,
            points,
        };

        match result.warning_message() {
            Some(warning) => {
                warn!("{}", warning);
                if let Some(notifier) = &self.notifier {
                    notifier
                        .sink
                        .publish(&notifier.topic, &result.notification_body())
                        .await?;
                } else {
                    debug!("No notification topic configured, skipping publish");
                }
            }
            None => info!(
                "No significant pressure drop in the next {} hours ({:.2}%)",
                result.lookahead_hours, result.percent_change
            ),
        }

        Ok(result)
    }
}
