//! Fund Projection CLI
//!
//! Fetches the pool's rate table and prints the projected return for an investment

use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use fund_projection::rates::{load_rate_table, load_startup_data, HttpRateClient, RateSource, StaticRateSource};
use fund_projection::scenario::write_csv;
use fund_projection::{CalculatorSession, ClientConfig, Frequency, Fund, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "fund-projection", version, about = "Project the return of a recurring fund investment")]
struct Args {
    /// Amount invested (0-20000, snapped to steps of 100)
    #[arg(long, default_value_t = 0.0)]
    amount: f64,

    /// Weekly, Monthly or Yearly
    #[arg(long, default_value = "Weekly")]
    frequency: Frequency,

    /// Investment duration in years (1-10)
    #[arg(long, default_value_t = 1)]
    years: u32,

    #[arg(long, default_value = "Grayscale Bitcoin Trust")]
    fund: Fund,

    /// Pool whose rates are fetched (overrides FUND_PROJECTION_POOL_ID)
    #[arg(long)]
    pool_id: Option<u32>,

    /// API host (overrides FUND_PROJECTION_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,

    /// Read rates from a JSON file instead of the API
    #[arg(long)]
    rates_file: Option<PathBuf>,

    /// Also print the 1-10 year schedule
    #[arg(long)]
    schedule: bool,

    /// Write the results as CSV to this path
    #[arg(long)]
    csv: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = ClientConfig::from_env();
    if let Some(pool_id) = args.pool_id {
        config.pool_id = pool_id;
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = base_url.trim_end_matches('/').to_string();
    }

    let source: Box<dyn RateSource> = match &args.rates_file {
        Some(path) => {
            let table = load_rate_table(path)
                .with_context(|| format!("Failed to load rates from {}", path.display()))?;
            Box::new(StaticRateSource::new(table))
        }
        None => Box::new(HttpRateClient::new(config.clone())),
    };

    let startup = load_startup_data(source.as_ref(), config.pool_id).await;
    log::info!(
        "Startup data ready at {}: rates {}, {} pools",
        startup.fetched_at,
        if startup.rates.is_some() { "loaded" } else { "unavailable" },
        startup.pools.len()
    );

    let mut session = CalculatorSession::with_rates(startup.rates);
    session.set_amount(args.amount);
    session.set_fund(args.fund);
    session.set_frequency(args.frequency);
    session.set_duration_years(args.years);

    if session.amount() != args.amount {
        log::warn!("Amount {} adjusted to {}", args.amount, session.amount());
    }
    if session.duration_years() != args.years {
        log::warn!("Duration {} adjusted to {}", args.years, session.duration_years());
    }

    println!("Investment Calculator");
    println!("=====================\n");
    println!("  Investment Amount: {}", session.amount_label());
    println!("  Fund: {}", session.fund());
    println!("  Frequency: {}", session.frequency());
    println!("  Investment Duration: {} yrs", session.duration_years());
    println!();

    let result = session.calculate()?.clone();
    println!("Results");
    println!("{}", result);
    if result.is_skipped() {
        println!("(no {} rate available for pool {})", result.frequency, config.pool_id);
    }

    let mut rows = vec![result];

    if args.schedule {
        let runner = ScenarioRunner::with_rates(startup.rates_or_empty());
        let schedule = runner.duration_schedule(session.amount(), session.frequency())?;

        println!("\nSchedule ({}):", session.frequency());
        println!("{:>5} {:>14} {:>10}", "Years", "Final", "Change%");
        println!("{}", "-".repeat(31));
        for row in &schedule {
            println!("{:>5} {:>14.2} {:>10.2}", row.duration_years, row.final_amount, row.percentage_change);
        }
        rows = schedule;
    }

    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("Unable to create {}", path.display()))?;
        write_csv(&rows, file)?;
        println!("\nResults written to: {}", path.display());
    }

    session.close();
    Ok(())
}
