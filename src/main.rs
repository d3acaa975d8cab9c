use anyhow::Result;
use clap::Parser;
use colored::*;
use std::path::PathBuf;

// Import from our modular crates
use rce_cli::{
    WizardAction, WizardState, WizardStep, display_banner, print_draft, prompt_line,
    render_comparison, render_estimate, render_evaluation, transition,
};
use rce_core::{EstimateInput, EvaluationScorer};
use rce_engine::{
    CorpusRetriever, EstimationEnhancer, Estimator, EvalLog, ProjectCorpus, SimulatedScorer,
    compare_models,
};
use rce_openai::OpenAiClient;

#[derive(Parser)]
#[command(name = "rce")]
#[command(about = "AI-assisted renovation cost estimator", long_about = None)]
struct Cli {
    /// Project category (kitchen, bathroom, addition)
    #[arg(long)]
    category: Option<String>,

    /// Square footage
    #[arg(long)]
    square_feet: Option<f64>,

    /// Material grade (standard, premium, luxury)
    #[arg(long)]
    material: Option<String>,

    /// 5-digit ZIP code
    #[arg(long)]
    zip: Option<String>,

    /// Timeline in months (1-12)
    #[arg(long)]
    months: Option<i64>,

    /// Load the corpus from a JSON file instead of generating one
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Number of synthetic records when no corpus file is given
    #[arg(long, default_value_t = 20)]
    records: usize,

    /// Skip the LLM refinement call
    #[arg(long)]
    no_enhance: bool,

    /// Skip scoring the estimate
    #[arg(long)]
    no_evaluate: bool,

    /// Directory for the evaluation log
    #[arg(long, default_value = "data/evaluation")]
    eval_log: PathBuf,

    /// Print the base-vs-enhanced scoring comparison and exit
    #[arg(long)]
    compare_models: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.compare_models {
        render_comparison(&compare_models());
        return Ok(());
    }

    let corpus = match &cli.corpus {
        Some(path) => ProjectCorpus::from_json_file(path)?,
        None => ProjectCorpus::synthetic(cli.records, 2024),
    };
    let retriever = CorpusRetriever::new(corpus);

    // Enhancement is best-effort: a missing credential just disables it.
    let enhancer = if cli.no_enhance {
        None
    } else {
        match OpenAiClient::from_env() {
            Ok(client) => Some(EstimationEnhancer::new(client)),
            Err(e) => {
                tracing::info!(reason = %e, "enhancement disabled");
                None
            }
        }
    };
    let estimator = match enhancer {
        Some(enhancer) => Estimator::with_enhancer(retriever, enhancer),
        None => Estimator::<_, OpenAiClient>::new(retriever),
    };

    let one_shot = cli.category.is_some()
        || cli.square_feet.is_some()
        || cli.material.is_some()
        || cli.zip.is_some()
        || cli.months.is_some();

    let input = if one_shot {
        EstimateInput {
            category: cli.category.clone(),
            square_feet: cli.square_feet,
            material_grade: cli.material.clone(),
            location_code: cli.zip.clone(),
            timeline_months: cli.months,
        }
    } else {
        display_banner();
        collect_input()?
    };

    let outcome = estimator.estimate(&input).await?;
    render_estimate(&outcome);

    if !cli.no_evaluate {
        let question = outcome.request.query_text();
        let contexts: Vec<String> = outcome
            .comparables
            .iter()
            .map(|record| record.text.clone())
            .collect();
        let answer = format!(
            "Estimated total ${} (range ${} to ${})",
            outcome.estimate.total, outcome.estimate.total_range.0, outcome.estimate.total_range.1
        );

        let scorer = SimulatedScorer::new();
        let score = scorer.score(&question, &contexts, &answer).await?;
        render_evaluation(&score);

        match EvalLog::open(&cli.eval_log) {
            Ok(mut log) => {
                let id = log.append(&question, &contexts, &answer, score)?;
                tracing::debug!(id, "evaluation logged");
            }
            Err(e) => tracing::warn!(error = %e, "evaluation log unavailable"),
        }
    }

    Ok(())
}

/// Walk the wizard until the draft is complete
fn collect_input() -> Result<EstimateInput> {
    let mut state = WizardState::default();

    while !state.is_complete() {
        if state.step == WizardStep::Review {
            println!();
            println!("{}", "Review".bold());
            print_draft(&state.draft);
        }

        let raw = prompt_line(state.step.prompt())?;
        let action = match raw.to_lowercase().as_str() {
            "back" => WizardAction::Back,
            "restart" => WizardAction::Restart,
            _ => WizardAction::Answer(raw),
        };
        state = transition(state, action);
    }

    Ok(state.draft)
}
