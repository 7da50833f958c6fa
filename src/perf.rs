//! Timing scopes and the editor event log.
//!
//! Both are plain `tracing` events: scope timings go to the `folio::perf`
//! target when `--perf` is on, editor events to `folio::events`. The
//! `--debug-log` file is a separate subscriber layer that only listens to
//! those two targets, so nothing reaches the terminal the editor draws on.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use tracing::{Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::filter::Targets;
use tracing_subscriber::registry::LookupSpan;

pub const PERF_TARGET: &str = "folio::perf";
pub const EVENT_TARGET: &str = "folio::events";

static ENABLED: AtomicBool = AtomicBool::new(false);

pub fn set_enabled(enabled: bool) {
    ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::Relaxed)
}

/// Times a region of work and reports it when dropped.
///
/// The clock only starts when timing is enabled, so a disabled scope costs a
/// flag load.
#[derive(Debug)]
#[must_use = "a scope reports when it is dropped"]
pub struct Scope {
    name: &'static str,
    start: Option<Instant>,
}

pub fn scope(name: &'static str) -> Scope {
    Scope {
        name,
        start: is_enabled().then(Instant::now),
    }
}

impl Scope {
    pub fn elapsed_ms(&self) -> Option<f64> {
        self.start.map(|start| start.elapsed().as_secs_f64() * 1000.0)
    }
}

impl Drop for Scope {
    fn drop(&mut self) {
        if let Some(elapsed_ms) = self.elapsed_ms() {
            tracing::info!(target: PERF_TARGET, scope = self.name, elapsed_ms, "scope finished");
        }
    }
}

/// Record an editor event such as a paste, a save or a resize.
pub fn log_event(name: &str, detail: impl AsRef<str>) {
    tracing::debug!(target: EVENT_TARGET, event = name, detail = detail.as_ref());
}

/// File layer for `--debug-log`: perf scopes and editor events, no colors.
pub fn debug_log_layer<S>(path: &Path) -> std::io::Result<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    let file = File::create(path)?;
    let targets = Targets::new()
        .with_target(PERF_TARGET, Level::INFO)
        .with_target(EVENT_TARGET, Level::DEBUG);
    Ok(tracing_subscriber::fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_filter(targets))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;
    use tracing_subscriber::prelude::*;

    #[test]
    fn test_debug_log_collects_events_and_scopes() {
        let temp_file = NamedTempFile::new().unwrap();
        let subscriber =
            tracing_subscriber::registry().with(debug_log_layer(temp_file.path()).unwrap());

        tracing::subscriber::with_default(subscriber, || {
            log_event("paginate.paste", "chars=12 pages=1");
            tracing::warn!(target: "folio::storage", "not for the event log");

            let timed = Scope {
                name: "storage.save",
                start: Some(Instant::now()),
            };
            assert!(timed.elapsed_ms().is_some());
            drop(timed);
        });

        let content = std::fs::read_to_string(temp_file.path()).unwrap();
        assert!(content.contains("paginate.paste"));
        assert!(content.contains("chars=12 pages=1"));
        assert!(content.contains("storage.save"));
        assert!(content.contains("scope finished"));
        assert!(!content.contains("not for the event log"));
    }

    #[test]
    fn test_disabled_scope_does_not_time() {
        assert!(!is_enabled());
        assert_eq!(scope("app.run.total").elapsed_ms(), None);
    }
}
