//! Registry Search Main Entry Point
//!
//! Connects to the search engine and runs the vehicle index demo.

use dotenv::dotenv;
use registry_search::{demo, Dependencies, DemoOptions, RegistryError, Settings};
use std::env;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing/logging.
///
/// `LOG_FORMAT=json` switches from pretty console output to JSON lines.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("registry_search=info,registry_search_repository=info")
    });

    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .init();

        info!(
            service_name = "registry-search",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with JSON format"
        );
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .init();

        info!(
            service_name = "registry-search",
            service_version = env!("CARGO_PKG_VERSION"),
            "Tracing initialized with console output"
        );
    }
}

#[tokio::main]
async fn main() -> Result<(), RegistryError> {
    dotenv().ok();
    init_tracing();

    info!("Starting registry search demo");

    let settings = Settings::from_env()?;

    let deps = match Dependencies::new(settings).await {
        Ok(deps) => deps,
        Err(e) => {
            error!(error = %e, "Failed to initialize dependencies");
            return Err(e);
        }
    };

    let options = DemoOptions::from(&deps.settings);
    match demo::run(&deps.client, &options).await {
        Ok(report) => {
            info!(
                doc_id = %report.indexed.id,
                search_hits = report.search_hits.len(),
                documents = report.documents_listed,
                "Demo completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Demo failed");
            Err(e)
        }
    }
}
