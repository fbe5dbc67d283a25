//! Plain-text rendering of a [`GoalPlan`]

use std::fmt;

use goalcast_core::format::{format_currency, format_percentage};
use goalcast_core::model::IncomeSource;
use goalcast_core::planner::GoalPlan;

/// Display adapter for a plan
pub struct Report<'a> {
    plan: &'a GoalPlan,
    currency: &'a str,
}

impl<'a> Report<'a> {
    pub fn new(plan: &'a GoalPlan, currency: &'a str) -> Self {
        Self { plan, currency }
    }

    fn money(&self, value: f64) -> String {
        format_currency(value, self.currency)
    }
}

fn income_source_label(source: IncomeSource) -> &'static str {
    match source {
        IncomeSource::SalaryCredits => "salary credits",
        IncomeSource::LargestCredit => "largest credit",
        IncomeSource::Default => "assumed default",
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = self.plan;
        let params = &plan.parameters;
        let projection = &plan.projection;
        let income = &plan.profile.income;

        writeln!(
            f,
            "Goal: {} by age {} ({} years)",
            self.money(params.target_amount),
            params.target_age,
            projection.horizon_years
        )?;
        writeln!(
            f,
            "Starting portfolio: {} ({}% equity)",
            self.money(params.current_portfolio),
            params.equity_allocation
        )?;
        writeln!(
            f,
            "Monthly contribution: {}",
            self.money(params.monthly_contribution)
        )?;
        write!(
            f,
            "Monthly income: {} ({}",
            self.money(income.monthly_income),
            income_source_label(income.source)
        )?;
        if let (Some(first), Some(last)) = (income.first_salary_date, income.last_salary_date) {
            write!(f, ", {first} to {last}")?;
        }
        writeln!(f, ")")?;

        writeln!(f)?;
        writeln!(f, "Projection ({} trials)", projection.trials)?;
        writeln!(
            f,
            "  Success probability: {}",
            format_percentage(projection.success_probability)
        )?;
        writeln!(
            f,
            "  Median outcome: {} ({} in today's money)",
            self.money(projection.median_final_value),
            self.money(projection.real_median_final_value)
        )?;
        writeln!(
            f,
            "  10th-90th percentile: {} to {}",
            self.money(projection.p10_final_value),
            self.money(projection.p90_final_value)
        )?;

        writeln!(f)?;
        writeln!(f, "Verdict: {}", plan.insights.summary.headline)?;

        if !plan.recommendations.is_empty() {
            writeln!(f)?;
            writeln!(f, "Contribution needed")?;
            for rec in &plan.recommendations {
                writeln!(
                    f,
                    "  {:>6}  {:>14}/month  {}",
                    format_percentage(rec.target_probability),
                    self.money(rec.required_contribution),
                    rec.affordability.label()
                )?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Allocation comparison")?;
        let optimal = plan.allocation.optimal().map(|s| s.name.as_str());
        for scenario in &plan.allocation.scenarios {
            let mut marks = Vec::new();
            if Some(scenario.name.as_str()) == optimal {
                marks.push("best");
            }
            if plan.allocation.baseline.as_deref() == Some(scenario.name.as_str()) {
                marks.push("current");
            }
            let marks = if marks.is_empty() {
                String::new()
            } else {
                format!("  [{}]", marks.join(", "))
            };
            writeln!(
                f,
                "  {:<16} {:>3}% equity  {:>6}{marks}",
                scenario.name,
                scenario.equity_allocation,
                format_percentage(scenario.success_probability())
            )?;
        }

        if !plan.insights.recommendations.is_empty() {
            writeln!(f)?;
            writeln!(f, "Recommendations")?;
            for (i, rec) in plan.insights.recommendations.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, rec.message)?;
            }
        }

        if !plan.insights.risk_flags.is_empty() {
            writeln!(f)?;
            writeln!(f, "Risks")?;
            for flag in &plan.insights.risk_flags {
                writeln!(f, "  - {}", flag.message())?;
            }
        }

        writeln!(f)?;
        writeln!(f, "Next steps")?;
        for item in &plan.insights.action_items {
            writeln!(f, "  - {item}")?;
        }

        Ok(())
    }
}
