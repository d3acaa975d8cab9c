//! CLI interface for the renovation cost estimator

mod ui;
mod wizard;

pub use ui::{
    confirm, display_banner, print_draft, prompt_line, render_comparison, render_estimate,
    render_evaluation,
};
pub use wizard::{WizardAction, WizardState, WizardStep, transition};

// Re-export core types
pub use rce_core::{Error, Result};
