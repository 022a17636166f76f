use crate::error::Error;
use crate::service::{HealthStatus, Service, Status};
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;
use std::time::Duration;

/// Host shell that owns registered services and drives their lifecycle.
/// Owning them is what serializes access: services do no locking of
/// their own.
pub struct Runtime {
    services: Vec<Box<dyn Service>>,
}

impl Runtime {
    pub fn new() -> Self {
        Self { services: Vec::new() }
    }

    pub fn register<S: Service + 'static>(&mut self, service: S) {
        self.services.push(Box::new(service));
    }

    /// Initialize all services in registration order. First failure wins
    /// and is returned unchanged.
    pub fn init_all(&mut self) -> Status {
        for service in self.services.iter_mut() {
            let status = service.init();
            if !status.is_ok() {
                tracing::warn!(service = %service.name(), reason = %status.message(), "init failed");
                return status;
            }
        }
        Status::ok()
    }

    /// Start all services in registration order.
    pub fn start_all(&mut self) -> Status {
        for service in self.services.iter_mut() {
            let status = service.start();
            if !status.is_ok() {
                tracing::warn!(service = %service.name(), reason = %status.message(), "start failed");
                return status;
            }
        }
        Status::ok()
    }

    /// Stop all services in reverse registration order.
    pub fn stop_all(&mut self) -> Status {
        for service in self.services.iter_mut().rev() {
            let status = service.stop();
            if !status.is_ok() {
                tracing::warn!(service = %service.name(), reason = %status.message(), "stop failed");
                return status;
            }
        }
        Status::ok()
    }

    /// Aggregate health (first unhealthy wins).
    pub fn overall_health(&self) -> HealthStatus {
        for service in &self.services {
            let health = service.check_health();
            if !health.is_healthy() {
                return health;
            }
        }
        HealthStatus::new(true, "OK")
    }

    /// Initialize and start everything, block until Ctrl-C, then stop in
    /// reverse order. Returns Ok even if the Ctrl-C handler was already
    /// installed elsewhere.
    pub fn run_until_ctrlc(&mut self) -> crate::Result<()> {
        let status = self.init_all();
        if !status.is_ok() {
            return Err(Error::Lifecycle(status.message().to_string()));
        }
        let status = self.start_all();
        if !status.is_ok() {
            return Err(Error::Lifecycle(status.message().to_string()));
        }
        tracing::info!("runtime: started; press Ctrl-C to stop");

        let shutdown = Arc::new(AtomicBool::new(false));
        {
            let flag = shutdown.clone();
            let _ = ctrlc::set_handler(move || {
                flag.store(true, Ordering::SeqCst);
            });
        }

        while !shutdown.load(Ordering::SeqCst) {
            thread::sleep(Duration::from_millis(50));
        }

        tracing::info!("runtime: shutting down");
        let status = self.stop_all();
        if !status.is_ok() {
            return Err(Error::Lifecycle(status.message().to_string()));
        }
        tracing::info!("runtime: stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::{ServiceConfig, ServiceCore, ServiceMetrics};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn drives_a_service_through_its_lifecycle() {
        let mut rt = Runtime::new();
        rt.register(ServiceCore::new("core"));

        assert!(!rt.overall_health().is_healthy());

        assert!(rt.init_all().is_ok());
        assert!(rt.start_all().is_ok());
        assert_eq!(rt.overall_health(), HealthStatus::new(true, "OK"));

        assert!(rt.stop_all().is_ok());
        assert_eq!(rt.overall_health(), HealthStatus::new(false, "Service Stopped"));
    }

    #[test]
    fn start_without_init_surfaces_the_status() {
        let mut rt = Runtime::new();
        rt.register(ServiceCore::new("core"));

        let status = rt.start_all();
        assert!(!status.is_ok());
        assert_eq!(status.message(), "Service not initialized");
    }

    #[test]
    fn empty_runtime_is_healthy() {
        let rt = Runtime::new();
        assert!(rt.overall_health().is_healthy());
    }

    // Probe service that records lifecycle calls into a shared journal.
    struct Probe {
        name: &'static str,
        journal: Rc<RefCell<Vec<String>>>,
    }

    impl Service for Probe {
        fn name(&self) -> &str {
            self.name
        }
        fn init(&mut self) -> Status {
            self.journal.borrow_mut().push(format!("init {}", self.name));
            Status::ok()
        }
        fn start(&mut self) -> Status {
            self.journal.borrow_mut().push(format!("start {}", self.name));
            Status::ok()
        }
        fn stop(&mut self) -> Status {
            self.journal.borrow_mut().push(format!("stop {}", self.name));
            Status::ok()
        }
        fn check_health(&self) -> HealthStatus {
            HealthStatus::new(true, "OK")
        }
        fn set_config(&mut self, _config: ServiceConfig) -> Status {
            Status::ok()
        }
        fn config(&self) -> ServiceConfig {
            ServiceConfig::new()
        }
        fn metrics(&self) -> ServiceMetrics {
            ServiceMetrics::new()
        }
    }

    #[test]
    fn stops_in_reverse_registration_order() {
        let journal = Rc::new(RefCell::new(Vec::new()));
        let mut rt = Runtime::new();
        rt.register(Probe { name: "first", journal: journal.clone() });
        rt.register(Probe { name: "second", journal: journal.clone() });

        rt.init_all();
        rt.start_all();
        rt.stop_all();

        assert_eq!(
            *journal.borrow(),
            ["init first", "init second", "start first", "start second", "stop second", "stop first"]
        );
    }
}
