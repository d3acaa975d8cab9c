//! Terminal UI utilities for the estimator CLI

use colored::*;
use crossterm::terminal::size;
use std::io::{self, Write};

use rce_core::{EstimateInput, EvaluationScore, RagMetrics, Result};
use rce_engine::{EnhancementStatus, EstimateOutcome, ModelComparison};

/// Display startup banner
pub fn display_banner() {
    let terminal_width = size().map(|(w, _)| w as usize).unwrap_or(80);
    let banner_width = std::cmp::min(62, terminal_width.saturating_sub(4));

    let top_border = format!("┌{}┐", "─".repeat(banner_width - 2));
    let bottom_border = format!("└{}┘", "─".repeat(banner_width - 2));
    let empty_line = format!("│{}│", " ".repeat(banner_width - 2));

    println!();
    println!("{}", top_border.blue());
    println!("{}", empty_line.blue());

    let title = "RCE - Renovation Cost Estimator";
    println!(
        "│  {}{}│",
        title.blue().bold(),
        " ".repeat(banner_width.saturating_sub(title.len() + 4))
    );

    println!("{}", empty_line.blue());

    let feature_lines = vec![
        "🏠 AI-Assisted Renovation Estimates",
        "",
        "Features:",
        "• 📚 Grounded in comparable past projects",
        "• 🧮 Deterministic multi-factor cost model",
        "• 🤖 Optional LLM refinement, graceful fallback",
        "• 📊 Built-in estimate quality metrics",
        "",
        "v0.1.0",
    ];

    for line in feature_lines {
        if line.is_empty() {
            println!("{}", empty_line.blue());
        } else {
            let content = format!(
                "│  {}{}│",
                line,
                " ".repeat(banner_width.saturating_sub(line.len() + 4))
            );
            println!("{}", content.blue());
        }
    }

    println!("{}", empty_line.blue());
    println!("{}", bottom_border.blue());
    println!();
    println!(
        "{}",
        "💡 Tip: press Enter at any prompt to accept the default, or type 'back' / 'restart'"
            .dimmed()
    );
    println!();
}

/// Prompt for one line of input
pub fn prompt_line(label: &str) -> Result<String> {
    print!("{} ", format!("{}:", label).green().bold());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Confirm a question with the user, defaulting to yes
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} {} [Y/n]: ", "❓".cyan(), question);
    io::stdout().flush()?;

    let mut response = String::new();
    io::stdin().read_line(&mut response)?;
    let response = response.trim().to_lowercase();

    Ok(response.is_empty() || response == "y" || response == "yes")
}

/// Show the wizard draft before estimating
pub fn print_draft(draft: &EstimateInput) {
    let show = |value: Option<&str>| value.unwrap_or("(default)").to_string();
    println!("  Project type:   {}", show(draft.category.as_deref()));
    println!(
        "  Square footage: {}",
        draft
            .square_feet
            .map_or_else(|| "(default)".to_string(), |v| v.to_string())
    );
    println!("  Material grade: {}", show(draft.material_grade.as_deref()));
    println!("  ZIP code:       {}", show(draft.location_code.as_deref()));
    println!(
        "  Timeline:       {}",
        draft
            .timeline_months
            .map_or_else(|| "(default)".to_string(), |v| format!("{} months", v))
    );
}

/// Render a complete estimate outcome
pub fn render_estimate(outcome: &EstimateOutcome) {
    let estimate = &outcome.estimate;
    let (min, max) = estimate.total_range;

    println!();
    println!("{}", "Estimated cost".bold());
    println!(
        "  Total:           {}",
        format!("${}", format_dollars(estimate.total)).green().bold()
    );
    println!(
        "  Range:           ${} to ${}",
        format_dollars(min),
        format_dollars(max)
    );
    println!("  Per square foot: ${:.2}", estimate.per_square_foot);

    println!();
    println!("{}", "Breakdown".bold());
    for (name, amount) in estimate.cost_breakdown.entries() {
        println!("  {:<12} ${}", name, format_dollars(amount));
    }

    println!();
    println!("  Timeline:   {} weeks", estimate.timeline_weeks);
    println!("  Confidence: {:.0}%", estimate.confidence * 100.0);
    if !estimate.comparable_ids.is_empty() {
        println!(
            "  Comparables: {}",
            estimate.comparable_ids.join(", ").dimmed()
        );
    }

    match &outcome.enhancement {
        EnhancementStatus::Applied => {
            println!("  {} Refined by AI analysis", "✨".cyan());
        }
        EnhancementStatus::Unavailable(reason) => {
            println!(
                "  {} Enhancement unavailable ({}), showing base estimate",
                "⚠️".yellow(),
                reason
            );
        }
        EnhancementStatus::Disabled => {}
    }

    for insight in &estimate.insights {
        println!("  {} {}", "•".cyan(), insight);
    }
}

/// Render an evaluation score as a metric/threshold/verdict table
pub fn render_evaluation(score: &EvaluationScore) {
    let flags = [
        score.passed.faithfulness,
        score.passed.answer_relevancy,
        score.passed.context_precision,
        score.passed.context_recall,
    ];
    let thresholds = RagMetrics::THRESHOLDS.entries();

    println!();
    println!("{}", "Estimate quality".bold());
    for (i, (name, value)) in score.metrics.entries().iter().enumerate() {
        let verdict = if flags[i] {
            "PASS".green()
        } else {
            "FAIL".red()
        };
        println!(
            "  {:<18} {:>5.2}  (threshold {:.2})  {}",
            name, value, thresholds[i].1, verdict
        );
    }
}

/// Render the base-vs-enhanced scoring comparison
pub fn render_comparison(comparison: &ModelComparison) {
    println!();
    println!("{}", "Scoring model comparison".bold());
    println!("  base:     {}", comparison.base.name);
    println!("  enhanced: {}", comparison.enhanced.name);
    println!();

    let base = comparison.base.metrics.entries();
    let enhanced = comparison.enhanced.metrics.entries();
    let improvement = comparison.relative_improvement.entries();

    println!(
        "  {:<18} {:>6} {:>9} {:>8}",
        "metric".bold(),
        "base",
        "enhanced",
        "change"
    );
    for i in 0..base.len() {
        let (name, base_value) = base[i];
        let (_, enhanced_value) = enhanced[i];
        let (_, pct) = improvement[i];
        println!(
            "  {:<18} {:>6.2} {:>9.2} {:>8}",
            name,
            base_value,
            enhanced_value,
            format!("{:+.0}%", pct).green()
        );
    }
}

/// Format a dollar amount with thousands separators
fn format_dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(0), "0");
        assert_eq!(format_dollars(100), "100");
        assert_eq!(format_dollars(1_000), "1,000");
        assert_eq!(format_dollars(90_000), "90,000");
        assert_eq!(format_dollars(1_234_567), "1,234,567");
    }
}
