use aeroreach_console::{EmergencyView, ResponderBoard};
use aeroreach_dispatch::{bootstrap, Clock, DispatchConfig, LogNotifier, SystemClock};
use anyhow::{bail, Context};
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const USAGE: &str = "usage: aeroreach-console \
    [board | dispatch <request-id> <drone-id> | complete <request-id> | emergency]";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = DispatchConfig::from_env();
    info!("AeroReach console starting");
    info!("  storage: {:?}", config.storage);
    info!("  demo requests: {}", config.seed_demo_requests);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let notifier = Arc::new(LogNotifier);
    let services = bootstrap(&config, clock.clone(), notifier.clone())
        .context("failed to start dispatch core")?;

    let board = ResponderBoard::new(services.coordinator.clone(), clock.clone(), notifier);
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] | ["board"] => {}
        ["dispatch", request_id, drone_id] => {
            board
                .dispatch(request_id, Some(*drone_id))
                .await
                .with_context(|| format!("dispatch of {} to {} failed", drone_id, request_id))?;
        }
        ["complete", request_id] => {
            services
                .coordinator
                .complete(request_id)
                .await
                .with_context(|| format!("completion of {} failed", request_id))?;
        }
        ["emergency"] => {
            let view = EmergencyView::open(&services.guidance)?;
            for line in view.lines(clock.now_ms()) {
                info!("{}", line);
            }
            return Ok(());
        }
        _ => bail!(USAGE),
    }

    for line in board.snapshot().await.lines() {
        info!("{}", line);
    }

    Ok(())
}
