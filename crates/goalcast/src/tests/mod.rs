//! End-to-end tests against the bundled sample records

use std::path::PathBuf;

use goalcast_core::model::IncomeSource;
use goalcast_core::{FinancialProfile, GoalRequest, PlannerConfig, plan_goal};

use crate::{DirectorySource, Report, load_config, parse_config};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn fixture_config() -> PlannerConfig {
    load_config(&fixtures().join("planner.yaml")).unwrap()
}

fn goal() -> GoalRequest {
    GoalRequest {
        current_age: 30,
        target_age: 40,
        target_amount: 5_000_000.0,
        monthly_contribution: None,
        equity_allocation: None,
    }
}

#[test]
fn test_fixture_config_overrides_only_named_fields() {
    let config = fixture_config();

    assert_eq!(config.simulation.trials, 2000);
    assert_eq!(config.simulation.seed, Some(11));
    assert_eq!(config.solver.search_trials, 500);
    assert_eq!(config.solver.target_probabilities, vec![60.0, 80.0, 90.0]);
    assert_eq!(config.solver.iterations, 20);
    assert_eq!(config.allocation.trials, 1000);
    assert_eq!(config.allocation.menu.len(), 5);
    assert_eq!(config.market.inflation_rate, 0.06);
}

#[test]
fn test_yaml_market_override() {
    let config = parse_config(
        "market:\n  equity:\n    mean: 0.10\n    volatility: 0.20\n",
    )
    .unwrap();
    assert_eq!(config.market.equity.mean, 0.10);
    assert_eq!(config.market.debt.mean, 0.07);
}

#[test]
fn test_missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_config(&dir.path().join("absent.yaml")).unwrap_err();
    assert!(err.to_string().contains("failed to read config"));
}

#[test]
fn test_profile_from_sample_records() {
    let source = DirectorySource::new(fixtures().join("sample"));
    let profile = FinancialProfile::from_source(&source, &PlannerConfig::default().income).unwrap();

    assert_eq!(profile.snapshot.total_net_worth, 1_000_000.0);
    assert_eq!(profile.snapshot.equity_percentage, 70.0);
    assert_eq!(profile.snapshot.invested_equity_share(), 68.63);
    assert_eq!(profile.income.source, IncomeSource::SalaryCredits);
    assert_eq!(profile.income.monthly_income, 145_000.0);

    let recurring = profile.recurring_investment.unwrap();
    assert_eq!(recurring.active_months, 3);
    assert!((recurring.monthly_average - 50_000.0 / 3.0).abs() < 1e-9);
}

#[test]
fn test_text_report_sections() {
    let config = fixture_config();
    let source = DirectorySource::new(fixtures().join("sample"));
    let profile = FinancialProfile::from_source(&source, &config.income).unwrap();
    let plan = plan_goal(&profile, &goal(), &config, &mut config.simulation.rng()).unwrap();

    let text = Report::new(&plan, &config.insights.currency_symbol).to_string();

    assert!(text.starts_with("Goal: ₹5,000,000 by age 40 (10 years)"));
    assert!(text.contains("Starting portfolio: ₹1,000,000 (68.63% equity)"));
    assert!(text.contains("Monthly income: ₹145,000 (salary credits, 2024-03-01 to 2024-05-01)"));
    assert!(text.contains("Projection (2000 trials)"));
    assert!(text.contains(&format!("Verdict: {}", plan.insights.summary.headline)));
    assert!(text.contains("Contribution needed"));
    assert!(text.contains("Allocation comparison"));
    assert!(text.contains("current]"));
    assert!(text.contains("Next steps"));
    assert!(text.contains("Review and adjust SIP amount quarterly"));
}

#[test]
fn test_seeded_runs_render_identically() {
    let config = fixture_config();
    let source = DirectorySource::new(fixtures().join("sample"));
    let profile = FinancialProfile::from_source(&source, &config.income).unwrap();

    let render = || {
        let plan = plan_goal(&profile, &goal(), &config, &mut config.simulation.rng()).unwrap();
        serde_json::to_string(&plan).unwrap()
    };
    assert_eq!(render(), render());
}

#[test]
fn test_json_plan_shape() {
    let config = fixture_config();
    let source = DirectorySource::new(fixtures().join("sample"));
    let profile = FinancialProfile::from_source(&source, &config.income).unwrap();
    let plan = plan_goal(&profile, &goal(), &config, &mut config.simulation.rng()).unwrap();

    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["request"]["target_age"], 40);
    assert_eq!(json["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(json["allocation"]["scenarios"].as_array().unwrap().len(), 5);
    assert!(json["insights"]["summary"]["headline"].is_string());
    assert_eq!(json["profile"]["income"]["first_salary_date"], "2024-03-01");
}
