use crate::error::Result;
use crate::runtime::Runtime;
use crate::service::{Service, ServiceConfig, ServiceCore};
use crate::sink::LogSink;
use crate::taxonomy::{Details, ServiceError};
use clap::{Parser, Subcommand};

// CLI definition
#[derive(Parser, Debug)]
#[command(name = "groundwork", author, version, about = "Service host CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Initialize and start the service, run until Ctrl-C, then stop it
    Run,

    /// Report service health
    Health,

    /// Print service metrics as JSON
    Metrics,

    /// Print the current service configuration as JSON
    GetConfig,

    /// Replace the service configuration from key=value pairs
    SetConfig {
        pairs: Vec<String>,
    },
}

impl Cli {
    pub fn run(self, mut service: ServiceCore, sink: &LogSink) -> Result<()> {
        match self.command {
            Command::Run => {
                sink.info(format!("{} host starting", service.name()));
                let mut rt = Runtime::new();
                rt.register(service);
                rt.run_until_ctrlc()?;
                sink.info("host stopped");
                Ok(())
            }
            Command::Health => {
                let health = service.check_health();
                tracing::info!(healthy = health.is_healthy(), status = %health.status(), "health");
                println!("healthy={} status={}", health.is_healthy(), health.status());
                Ok(())
            }
            Command::Metrics => {
                // Maps cross the CLI boundary as JSON objects.
                println!("{}", serde_json::to_string(&service.metrics())?);
                Ok(())
            }
            Command::GetConfig => {
                println!("{}", serde_json::to_string(&service.config())?);
                Ok(())
            }
            Command::SetConfig { pairs } => {
                let mut config = ServiceConfig::new();
                for pair in &pairs {
                    let Some((key, value)) = pair.split_once('=') else {
                        return Err(ServiceError::validation(
                            sink,
                            "Malformed config pair",
                            Details::from([("pair".to_string(), pair.clone())]),
                        )
                        .into());
                    };
                    config.insert(key.to_string(), value.to_string());
                }

                let status = service.set_config(config);
                tracing::info!(ok = status.is_ok(), keys = pairs.len(), "config replaced");
                sink.info(format!("configuration replaced ({} keys)", pairs.len()));
                Ok(())
            }
        }
    }
}
