//! Top-level fusion entry: windows, correlations, validated bundles.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::detect::Anomaly;
use crate::event::Event;
use crate::fusion::rules::correlate_window;
use crate::fusion::windowing::partition_events;
use crate::fusion::{schema, FusionBundle, FusionError, FusionOptions, WindowSummary};

pub struct FusionOrchestrator {
    opts: FusionOptions,
}

impl FusionOrchestrator {
    pub fn new(opts: FusionOptions) -> Self {
        Self { opts }
    }

    /// Partition events into windows, correlate each window's anomalies and
    /// return one validated bundle per window. A bundle failing the output
    /// schema aborts the whole call; no partial output is returned.
    pub fn orchestrate(
        &self,
        events: &[Event],
        anomalies: &[Anomaly],
    ) -> Result<Vec<FusionBundle>, FusionError> {
        let windows = partition_events(events, self.opts.window_minutes);
        info!(
            events = events.len(),
            anomalies = anomalies.len(),
            windows = windows.len(),
            "running fusion"
        );

        let mut bundles = Vec::with_capacity(windows.len());
        for window in windows {
            let event_ids: HashSet<&str> = window.events.iter().map(|e| e.id.as_str()).collect();
            let window_anomalies: Vec<Anomaly> = anomalies
                .iter()
                .filter(|a| event_ids.contains(a.source_event_id.as_str()))
                .cloned()
                .collect();

            let correlations =
                correlate_window(&window.events, &window_anomalies, self.opts.prior);
            debug!(
                start = %window.start,
                events = window.events.len(),
                anomalies = window_anomalies.len(),
                correlations = correlations.len(),
                "window correlated"
            );

            let bundle = FusionBundle {
                window: WindowSummary {
                    start: window.start,
                    end: window.end,
                    event_count: window.events.len(),
                    anomaly_count: window_anomalies.len(),
                },
                correlations,
            };

            if !schema::validate_bundle(&bundle) {
                return Err(FusionError::SchemaViolation {
                    start: window.start,
                });
            }
            bundles.push(bundle);
        }

        Ok(bundles)
    }
}

/// One-shot fusion with the given options.
pub fn orchestrate_fusion(
    events: &[Event],
    anomalies: &[Anomaly],
    opts: &FusionOptions,
) -> Result<Vec<FusionBundle>, FusionError> {
    FusionOrchestrator::new(opts.clone()).orchestrate(events, anomalies)
}
