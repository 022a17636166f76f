use std::collections::BTreeMap;
use std::time::Instant;

/// Lifecycle state of a service instance. The numeric codes are what
/// `metrics()` reports under the `state` key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Created = 0,
    Initialized = 1,
    Running = 2,
    Stopped = 3,
    Error = 4,
}

impl ServiceState {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Outcome of a lifecycle operation. Lifecycle failures are expected
/// caller-sequencing conditions, so they travel as values, never as errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    ok: bool,
    message: String,
}

impl Status {
    pub fn ok() -> Self {
        Self { ok: true, message: String::new() }
    }

    pub fn fail<M: Into<String>>(message: M) -> Self {
        Self { ok: false, message: message.into() }
    }

    pub fn is_ok(&self) -> bool {
        self.ok
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Health derived from the current state only; no external probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    healthy: bool,
    status: String,
}

impl HealthStatus {
    pub fn new<S: Into<String>>(healthy: bool, status: S) -> Self {
        Self { healthy, status: status.into() }
    }

    pub fn is_healthy(&self) -> bool {
        self.healthy
    }

    pub fn status(&self) -> &str {
        &self.status
    }
}

pub type ServiceConfig = BTreeMap<String, String>;
pub type ServiceMetrics = BTreeMap<String, String>;

/// Lifecycle every service implements. Adapters hold `Box<dyn Service>`
/// rather than a concrete type. Implementations perform no internal
/// locking; callers serialize access to a given instance.
pub trait Service {
    fn name(&self) -> &str;

    fn init(&mut self) -> Status;
    fn start(&mut self) -> Status;
    fn stop(&mut self) -> Status;

    fn check_health(&self) -> HealthStatus;

    /// Replace the configuration wholesale (no merging).
    fn set_config(&mut self, config: ServiceConfig) -> Status;
    /// Snapshot of the current configuration.
    fn config(&self) -> ServiceConfig;
    /// Metrics computed on demand, never stored.
    fn metrics(&self) -> ServiceMetrics;
}

/// Standard service implementation: the state machine, a config map, and
/// a monotonic start timestamp for uptime.
pub struct ServiceCore {
    name: String,
    state: ServiceState,
    config: ServiceConfig,
    started_at: Instant,
}

impl ServiceCore {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            state: ServiceState::Created,
            config: ServiceConfig::new(),
            started_at: Instant::now(),
        }
    }

    pub fn state(&self) -> ServiceState {
        self.state
    }
}

impl Service for ServiceCore {
    fn name(&self) -> &str {
        &self.name
    }

    // Unconditional so recovery after a failed start is just init() again.
    fn init(&mut self) -> Status {
        self.state = ServiceState::Initialized;
        Status::ok()
    }

    // The only gated transition: uptime must be measured from a
    // meaningful point.
    fn start(&mut self) -> Status {
        if self.state != ServiceState::Initialized {
            return Status::fail("Service not initialized");
        }
        self.state = ServiceState::Running;
        self.started_at = Instant::now();
        Status::ok()
    }

    // Unconditional so shutdown can never itself fail.
    fn stop(&mut self) -> Status {
        self.state = ServiceState::Stopped;
        Status::ok()
    }

    fn check_health(&self) -> HealthStatus {
        if self.state == ServiceState::Running {
            HealthStatus::new(true, "OK")
        } else {
            HealthStatus::new(false, "Service Stopped")
        }
    }

    fn set_config(&mut self, config: ServiceConfig) -> Status {
        self.config = config;
        Status::ok()
    }

    fn config(&self) -> ServiceConfig {
        self.config.clone()
    }

    fn metrics(&self) -> ServiceMetrics {
        let uptime = self.started_at.elapsed().as_secs();
        ServiceMetrics::from([
            ("uptime_seconds".to_string(), uptime.to_string()),
            ("state".to_string(), self.state.code().to_string()),
        ])
    }
}
