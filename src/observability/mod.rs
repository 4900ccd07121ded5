//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → opentelemetry_sdk → FileSpanExporter → zforum-otlp.json
//! ```
//!
//! The trace file lives in the plugin data directory and rotates by size,
//! keeping a few numbered backups. The filter level comes from the
//! `trace_level` plugin option and defaults to `info`.
//!
//! # Usage
//!
//! ```rust
//! use zforum::observability::init_tracing;
//! use zforum::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: Span exporter and tracer provider
//! - `otlp`: OTLP/JSON encoding
//! - `rotation`: Size-bounded trace file

mod exporter;
pub mod init;
mod otlp;
mod rotation;

pub use init::{init_tracing, TRACE_FILE_NAME};
pub use rotation::RotationPolicy;
