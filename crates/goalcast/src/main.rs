use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use goalcast::{DirectorySource, Report, init_logging, load_config};
use goalcast_core::{FinancialProfile, GoalRequest, PlannerConfig, plan_goal};

#[derive(Parser, Debug)]
#[command(name = "goalcast")]
#[command(about = "Estimate the odds of reaching a savings goal and what to change")]
struct Args {
    /// Directory holding net_worth.json, bank_transactions.json and
    /// (optionally) mutual_fund_transactions.json
    #[arg(short, long)]
    records: PathBuf,

    #[arg(long)]
    current_age: u32,

    #[arg(long)]
    target_age: u32,

    #[arg(long)]
    target_amount: f64,

    /// Monthly contribution (defaults to detected recurring investment)
    #[arg(long)]
    monthly_contribution: Option<f64>,

    /// Equity allocation in percent (defaults to current portfolio mix)
    #[arg(long)]
    equity_allocation: Option<f64>,

    /// Override the income estimated from bank records
    #[arg(long)]
    monthly_income: Option<f64>,

    /// Monte Carlo trials for the headline projection
    #[arg(long)]
    trials: Option<usize>,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,

    /// YAML planner configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the full plan as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(args.log_file.as_deref(), &args.log_level)?;

    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(trials) = args.trials {
        config.simulation.trials = trials;
    }
    if let Some(seed) = args.seed {
        config.simulation.seed = Some(seed);
    }

    let source = DirectorySource::new(&args.records);
    let mut profile = FinancialProfile::from_source(&source, &config.income)
        .wrap_err_with(|| format!("failed to load records from {}", args.records.display()))?;
    if let Some(income) = args.monthly_income {
        tracing::info!(
            estimated = profile.income.monthly_income,
            income,
            "overriding estimated income"
        );
        profile.income.monthly_income = income;
    }

    let goal = GoalRequest {
        current_age: args.current_age,
        target_age: args.target_age,
        target_amount: args.target_amount,
        monthly_contribution: args.monthly_contribution,
        equity_allocation: args.equity_allocation,
    };

    let mut rng = config.simulation.rng();
    let plan = plan_goal(&profile, &goal, &config, &mut rng).wrap_err("planning failed")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", Report::new(&plan, &config.insights.currency_symbol));
    }

    Ok(())
}
