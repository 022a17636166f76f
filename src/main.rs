use clap::Parser;

use groundwork::{
    Cli, Details, LogSink, Result, Service, ServiceConfig, ServiceCore, ServiceError,
    init_telemetry, load_config,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

// Demo validation in the style every service is expected to follow:
// reject bad input with a structured validation error.
fn validate_service_name(name: &str, sink: &LogSink) -> std::result::Result<(), ServiceError> {
    if name.len() < 3 {
        return Err(ServiceError::validation(
            sink,
            "Service name too short",
            Details::from([
                ("field".to_string(), "service_name".to_string()),
                ("min_length".to_string(), "3".to_string()),
                ("actual_length".to_string(), name.len().to_string()),
            ]),
        ));
    }
    Ok(())
}

fn main() -> Result<()> {
    // Load config + init logs
    let cfg = load_config()?;
    init_telemetry(&cfg)?;
    tracing::info!(version = VERSION, service = %cfg.service_name, "groundwork starting");

    let sink = LogSink::new();
    if let Some(path) = &cfg.log_file {
        sink.set_log_file(path)?;
    }

    if let Err(mut error) = validate_service_name(&cfg.service_name, &sink) {
        error.add_stack_frame("main(): config validation");
        return Err(error.into());
    }

    let service = ServiceCore::new(&cfg.service_name);

    // CLI path
    if let Ok(cli) = Cli::try_parse() {
        return cli.run(service, &sink);
    }

    // Demo flow: drive one service through its lifecycle by hand.
    let mut service = service;
    sink.info(format!("{} created", service.name()));

    let status = service.init();
    tracing::info!(ok = status.is_ok(), "init");

    let status = service.start();
    if !status.is_ok() {
        sink.error(format!("start failed: {}", status.message()));
        return Ok(());
    }
    sink.info(format!("{} running", service.name()));

    let health = service.check_health();
    tracing::info!(healthy = health.is_healthy(), status = %health.status(), "health after start");

    service.set_config(ServiceConfig::from([
        ("log_level".to_string(), cfg.log_level.clone()),
        ("demo".to_string(), "true".to_string()),
    ]));
    tracing::info!(keys = service.config().len(), "config applied");

    println!("{}", serde_json::to_string(&service.metrics())?);

    let status = service.stop();
    tracing::info!(ok = status.is_ok(), "stop");
    sink.info(format!("{} stopped", service.name()));

    Ok(())
}
