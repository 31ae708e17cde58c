//! End-to-end detection + fusion over a synthetic multi-domain batch.

use sentinelfuse::detect::engine::DetectionOptions;
use sentinelfuse::detect::keyword::KeywordOptions;
use sentinelfuse::detect::numeric::NumericOptions;
use sentinelfuse::fusion::FusionOptions;
use sentinelfuse::{detect_anomalies, orchestrate_fusion, DetectorKind, Event};

/// Five events across two entities: asset-alpha degrades sharply on both
/// metrics while reporting jamming, asset-beta stays quiet except for one
/// interference report.
fn synthetic_events() -> Vec<Event> {
    serde_json::from_value(serde_json::json!([
        {
            "id": "evt-001",
            "timestamp": "2024-03-10T00:00:00.000Z",
            "entityId": "asset-alpha",
            "domain": "orbital",
            "metrics": { "signalStrength": 18, "latencyMs": 120 },
            "text": "Telemetry nominal and routine maintenance scheduled.",
            "source": "orbital"
        },
        {
            "id": "evt-002",
            "timestamp": "2024-03-10T00:02:30.000Z",
            "entityId": "asset-alpha",
            "domain": "orbital",
            "metrics": { "signalStrength": 21, "latencyMs": 110 },
            "text": "Telemetry nominal and calibration signal observed.",
            "source": "orbital"
        },
        {
            "id": "evt-003",
            "timestamp": "2024-03-10T00:04:30.000Z",
            "entityId": "asset-alpha",
            "domain": "orbital",
            "metrics": { "signalStrength": 55, "latencyMs": 520 },
            "text": "Critical: potential jamming detected with sustained interference.",
            "source": "orbital"
        },
        {
            "id": "evt-004",
            "timestamp": "2024-03-10T00:06:30.000Z",
            "entityId": "asset-beta",
            "domain": "terrestrial",
            "metrics": { "signalStrength": 17, "latencyMs": 130 },
            "text": "Field report indicates nominal conditions.",
            "source": "terrestrial"
        },
        {
            "id": "evt-005",
            "timestamp": "2024-03-10T00:08:30.000Z",
            "entityId": "asset-beta",
            "domain": "terrestrial",
            "metrics": { "signalStrength": 72, "latencyMs": 650 },
            "text": "Field unit reports interference and repeated jamming attempts.",
            "source": "terrestrial"
        }
    ]))
    .unwrap()
}

fn detection_options() -> DetectionOptions {
    DetectionOptions {
        numeric: NumericOptions {
            z_score_threshold: 1.5,
            mad_threshold: 3.5,
            metric_keys: Some(vec!["signalStrength".to_string(), "latencyMs".to_string()]),
        },
        keyword: KeywordOptions {
            keywords: vec!["jamming".to_string(), "interference".to_string()],
            surge_factor: 1.2,
        },
    }
}

#[test]
fn test_detection_finds_numeric_and_keyword_anomalies() {
    let events = synthetic_events();
    let anomalies = detect_anomalies(&events, &detection_options());

    let numeric: Vec<_> = anomalies
        .iter()
        .filter(|a| a.detector == DetectorKind::NumericZscore)
        .collect();
    let text: Vec<_> = anomalies
        .iter()
        .filter(|a| a.detector == DetectorKind::TextKeywordSurge)
        .collect();

    assert!(!numeric.is_empty());
    assert!(!text.is_empty());

    for anomaly in &numeric {
        assert!(["signalStrength", "latencyMs"].contains(&anomaly.metric.as_str()));
        assert!(anomaly.severity >= 0.0 && anomaly.severity <= 1.0);
    }

    for anomaly in &text {
        assert!(anomaly.rationale.contains("Keyword surge detected"));
        assert!(["evt-003", "evt-005"].contains(&anomaly.source_event_id.as_str()));
    }

    // Output is globally sorted by timestamp.
    for pair in anomalies.windows(2) {
        assert!(pair[0].timestamp <= pair[1].timestamp);
    }
}

#[test]
fn test_fusion_produces_bayesian_correlation_bundles() {
    let events = synthetic_events();
    let anomalies = detect_anomalies(&events, &detection_options());
    let bundles = orchestrate_fusion(
        &events,
        &anomalies,
        &FusionOptions {
            window_minutes: 5,
            prior: 0.25,
        },
    )
    .unwrap();

    // The 5-minute anchor at evt-001 holds the alpha events; evt-004 opens a
    // second window for beta.
    assert_eq!(bundles.len(), 2);
    for bundle in &bundles {
        assert!(bundle.window.event_count > 0);
    }

    let alpha = bundles
        .iter()
        .flat_map(|b| &b.correlations)
        .find(|c| c.involved_event_ids.contains(&"evt-003".to_string()))
        .expect("asset-alpha correlation");

    // Numeric degradation plus a keyword surge drives the posterior well
    // above the prior, with the multi-modal bonus in the evidence.
    assert!(alpha.posterior > 0.25);
    assert!(alpha.rationale.contains("posterior"));
    assert!(alpha.bayesian_evidence.len() > 1);
    assert_eq!(alpha.rule_id, "fusion:multi-modal");
    assert!(alpha
        .bayesian_evidence
        .iter()
        .any(|e| e.source == "rule:multi-modal"));

    let beta = bundles
        .iter()
        .flat_map(|b| &b.correlations)
        .find(|c| c.involved_event_ids.contains(&"evt-005".to_string()))
        .expect("asset-beta correlation");
    // Beta only surges on text: a single-stream hypothesis.
    assert_eq!(beta.rule_id, "fusion:single-stream");
    assert_eq!(beta.correlation_id, "corr-asset-beta-evt-005");
}

#[test]
fn test_every_anomaly_references_a_real_event() {
    let events = synthetic_events();
    let anomalies = detect_anomalies(&events, &detection_options());
    assert!(!anomalies.is_empty());
    for anomaly in &anomalies {
        assert!(events.iter().any(|e| e.id == anomaly.source_event_id));
    }
}
