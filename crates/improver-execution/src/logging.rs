//! Subscriber setup shared by the binaries.

use crate::tracing_layer::{ProgressEvent, ProgressEventLayer};
use improver_application::orchestrator::PROGRESS_TARGET;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, Layer};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info";

fn env_filter(default: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Installs a stderr fmt layer filtered by `RUST_LOG`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

/// Like [`init_logging`], and also forwards orchestrator progress events to
/// the returned receiver.
///
/// `default_filter` lets interactive front ends stay quiet on stderr while
/// still receiving progress, which is forwarded regardless of the filter.
pub fn init_logging_with_progress(default_filter: &str) -> mpsc::UnboundedReceiver<ProgressEvent> {
    let (progress, receiver) = ProgressEventLayer::channel(PROGRESS_TARGET);
    let fmt = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(env_filter(default_filter));
    let _ = tracing_subscriber::registry()
        .with(fmt)
        .with(progress)
        .try_init();
    receiver
}
