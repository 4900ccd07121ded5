//! Tracing initialization and subscriber setup.

use super::exporter::file_tracer_provider;
use super::rotation::RotationPolicy;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the trace log inside the data directory.
pub const TRACE_FILE_NAME: &str = "zforum-otlp.json";

/// Installs the global subscriber: an `EnvFilter` from `config.trace_level`
/// (default `info`) feeding an OpenTelemetry layer that writes to
/// `<data dir>/zforum-otlp.json`.
///
/// Tracing is optional. If the data directory cannot be created nothing is
/// installed, and calls after the first successful one have no effect.
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "zforum"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = file_tracer_provider(
        data_dir.join(TRACE_FILE_NAME),
        RotationPolicy::default(),
        resource,
    );
    let otel_layer = OpenTelemetryLayer::new(provider.tracer("zforum"));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
