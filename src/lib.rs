//! SentinelFuse -- multi-domain anomaly detection and Bayesian fusion.
//!
//! This crate is the analytic core of a multi-domain event pipeline. It takes
//! normalized sensor/report events (orbital, atmospheric, terrestrial) and
//! runs two stages: detection, which scores events against statistical and
//! lexical baselines, and fusion, which groups anomalies into time windows
//! per entity and computes a Bayesian posterior that the anomalies represent
//! coordinated activity.
//!
//! Every operation is a pure, synchronous transformation of its arguments;
//! ingestion, persistence and scheduling live outside this crate.

pub mod config;
pub mod detect;
pub mod event;
pub mod fusion;

pub use config::PipelineConfig;
pub use detect::engine::{detect_anomalies, DetectionEngine, DetectionOptions};
pub use detect::{Anomaly, DetectorKind, IdSource};
pub use event::Event;
pub use fusion::orchestrator::{orchestrate_fusion, FusionOrchestrator};
pub use fusion::{FusionBundle, FusionError, FusionOptions};

/// Run the full detect-then-fuse pipeline over a batch of events.
pub fn run_pipeline(
    events: &[Event],
    config: &PipelineConfig,
) -> Result<Vec<FusionBundle>, FusionError> {
    let anomalies = detect_anomalies(events, &config.detection);
    orchestrate_fusion(events, &anomalies, &config.fusion)
}
