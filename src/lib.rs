// Foundation for building networked services: a lifecycle state machine
// every service instance obeys, and a structured error taxonomy whose
// constructions all pass through one shared log sink.

pub mod cli;
pub mod config;
pub mod error;
pub mod runtime;
pub mod service;
pub mod sink;
pub mod taxonomy;
pub mod telemetry;

pub use cli::Cli;
pub use config::{Config, load_config, load_config_from};
pub use error::{Error, Result};
pub use runtime::Runtime;
pub use service::{
    HealthStatus, Service, ServiceConfig, ServiceCore, ServiceMetrics, ServiceState, Status,
};
pub use sink::LogSink;
pub use taxonomy::{Details, ErrorCode, ErrorKind, ServiceError, Severity};
pub use telemetry::init_telemetry;
