use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use prospect_core::{Config, Event, ManualClock, SessionRunner, TICK_INTERVAL};

#[derive(Args)]
pub struct RunArgs {
    /// Stop after this many seconds
    #[arg(long, default_value = "10")]
    pub secs: u64,
    /// Seed override
    #[arg(long)]
    pub seed: Option<u64>,
    /// Category id override (repeatable, up to three)
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

#[derive(Args)]
pub struct SimulateArgs {
    /// Number of 200 ms ticks to process
    #[arg(long, default_value = "3000")]
    pub ticks: u64,
    /// Seed override
    #[arg(long)]
    pub seed: Option<u64>,
    /// Category id override (repeatable, up to three)
    #[arg(long = "category")]
    pub categories: Vec<String>,
}

fn apply_overrides(config: &mut Config, seed: Option<u64>, categories: Vec<String>) {
    if seed.is_some() {
        config.session.seed = seed;
    }
    if !categories.is_empty() {
        config.session.categories = categories;
    }
}

fn print_event(event: &Event) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

pub fn run(args: RunArgs, mut config: Config) -> Result<(), Box<dyn std::error::Error>> {
    apply_overrides(&mut config, args.seed, args.categories);
    let runtime = tokio::runtime::Runtime::new()?;
    tracing::info!(secs = args.secs, "running live session");

    runtime.block_on(async move {
        let (mut runner, mut events) = SessionRunner::new(config.engine());
        runner.start();

        let deadline = tokio::time::sleep(Duration::from_secs(args.secs));
        tokio::pin!(deadline);
        loop {
            tokio::select! {
                _ = &mut deadline => break,
                Some(event) = events.recv() => print_event(&event)?,
            }
        }

        runner.pause();
        while let Ok(event) = events.try_recv() {
            print_event(&event)?;
        }
        print_event(&runner.with_engine(|engine| engine.snapshot()))?;
        println!("{}", runner.stats().to_json_pretty()?);
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

pub fn simulate(args: SimulateArgs, mut config: Config) -> Result<(), Box<dyn std::error::Error>> {
    apply_overrides(&mut config, args.seed, args.categories);
    let clock = ManualClock::default();
    let mut engine = config.engine().with_clock(Arc::new(clock.clone()));

    engine.start();
    for _ in 0..args.ticks {
        clock.advance(TICK_INTERVAL);
        if let Some(event) = engine.tick() {
            print_event(&event)?;
        }
    }
    engine.pause();
    tracing::info!(ticks = args.ticks, finds = engine.state().finds.len(), "simulation finished");

    println!("{}", engine.stats().to_json_pretty()?);
    Ok(())
}
