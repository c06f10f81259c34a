//! Entry point for the Work-Time Engine binary.
//!
//! Running this binary starts an HTTP server that exposes the engine's
//! stateless API.  Settings come from the environment: the bind address
//! from `WORKTIME_BIND_ADDR` (default `127.0.0.1:3000`) and the workday
//! length applied when a request omits one from
//! `WORKTIME_DEFAULT_WORKDAY_HOURS` (default `8`).  Log verbosity
//! follows `RUST_LOG`.

use anyhow::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use worktime_engine::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("worktime_engine=info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).compact().init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("invalid configuration: {}", err);
            return Err(err.into());
        }
    };
    info!(
        bind = %config.bind_addr,
        default_workday_hours = config.default_workday_hours,
        "worktime_engine v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(err) = worktime_engine::api::serve(config).await {
        error!("error running server: {:#}", err);
        return Err(err);
    }
    Ok(())
}
