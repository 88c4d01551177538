use anteroom::{
    config::Config,
    durations::{SeededDurations, DEFAULT_SEED},
    event::{EventSink, TracingSink},
    system,
};
use anyhow::Result;
use clap::Parser;
use std::{sync::Arc, time::Duration};

/// Single-provider request scheduling simulation: a sleeping provider, two
/// priority classes, aging promotion, and a startup readiness barrier.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Number of high-priority requesters.
    #[arg(long, default_value_t = 7)]
    high: usize,

    /// Number of low-priority requesters.
    #[arg(long, default_value_t = 3)]
    low: usize,

    /// Capacity of the high-priority queue.
    #[arg(long, default_value_t = 100)]
    high_capacity: usize,

    /// Capacity of the low-priority queue.
    #[arg(long, default_value_t = 5)]
    low_capacity: usize,

    /// Capacity of the main queue the provider polls.
    #[arg(long, default_value_t = 5)]
    main_capacity: usize,

    /// Aging period in milliseconds.
    #[arg(long, default_value_t = 1000)]
    aging_period_ms: u64,

    /// Largest possible service duration in whole seconds.
    #[arg(long, default_value_t = 2)]
    max_service_secs: u64,

    /// Seed for the service duration generator.
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config {
        high_requesters: args.high,
        low_requesters: args.low,
        high_capacity: args.high_capacity,
        low_capacity: args.low_capacity,
        main_capacity: args.main_capacity,
        aging_period: Duration::from_millis(args.aging_period_ms),
    };
    let durations = Box::new(SeededDurations::new(args.seed, args.max_service_secs));
    let sink: Arc<dyn EventSink> = Arc::new(TracingSink);

    system::run_three_tier(&config, durations, sink).await?;
    Ok(())
}
