//! Event-anchored time windows.
//!
//! Windows are anchored at the first event that opens them rather than a
//! fixed calendar grid: a window spans `[anchor, anchor + window_minutes)`,
//! and the first event at or past the end closes it and anchors the next.
//! Modeled as an explicit two-state machine so the same transition rule can
//! host a streaming variant later.

use chrono::{DateTime, Duration, Utc};

use crate::event::Event;

/// A contiguous, non-overlapping bucket of events. `end` is exclusive.
#[derive(Debug, Clone)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub events: Vec<Event>,
}

enum WindowState {
    NoOpenWindow,
    Open(Window),
}

/// Sort events ascending by timestamp and split them into event-anchored
/// windows of `window_minutes`. The union of the returned windows is exactly
/// the input set; empty input yields no windows.
pub fn partition_events(events: &[Event], window_minutes: i64) -> Vec<Window> {
    if events.is_empty() {
        return Vec::new();
    }

    let mut sorted: Vec<Event> = events.to_vec();
    sorted.sort_by_key(|e| e.timestamp);

    let span = Duration::minutes(window_minutes);
    let mut windows = Vec::new();
    let mut state = WindowState::NoOpenWindow;

    for event in sorted {
        state = match state {
            WindowState::NoOpenWindow => WindowState::Open(open_window(event, span)),
            WindowState::Open(mut window) => {
                if event.timestamp < window.end {
                    window.events.push(event);
                    WindowState::Open(window)
                } else {
                    // Single transition rule: at or past the end, close and
                    // re-anchor on this event.
                    windows.push(window);
                    WindowState::Open(open_window(event, span))
                }
            }
        };
    }

    if let WindowState::Open(window) = state {
        windows.push(window);
    }

    windows
}

fn open_window(event: Event, span: Duration) -> Window {
    Window {
        start: event.timestamp,
        end: event.timestamp + span,
        events: vec![event],
    }
}
