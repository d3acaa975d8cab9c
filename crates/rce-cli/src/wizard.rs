//! Input-collection wizard as an explicit finite state machine
//!
//! Session state is a value, not ambient globals: `transition` is a pure
//! function of (state, action) → state. Answers are stored raw in the
//! draft; validation happens once, at the `EstimateRequest` boundary.

use rce_core::EstimateInput;

/// Steps of the input-collection wizard, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Category,
    SquareFeet,
    MaterialGrade,
    Location,
    Timeline,
    Review,
    Done,
}

impl WizardStep {
    /// Prompt shown to the user at this step
    pub fn prompt(&self) -> &'static str {
        match self {
            WizardStep::Category => "Project type (kitchen / bathroom / addition)",
            WizardStep::SquareFeet => "Square footage",
            WizardStep::MaterialGrade => "Material grade (standard / premium / luxury)",
            WizardStep::Location => "ZIP code",
            WizardStep::Timeline => "Timeline in months (1-12)",
            WizardStep::Review => "Press Enter to estimate",
            WizardStep::Done => "",
        }
    }

    fn next(&self) -> WizardStep {
        match self {
            WizardStep::Category => WizardStep::SquareFeet,
            WizardStep::SquareFeet => WizardStep::MaterialGrade,
            WizardStep::MaterialGrade => WizardStep::Location,
            WizardStep::Location => WizardStep::Timeline,
            WizardStep::Timeline => WizardStep::Review,
            WizardStep::Review | WizardStep::Done => WizardStep::Done,
        }
    }

    fn previous(&self) -> WizardStep {
        match self {
            // Backing out of the first step stays on it.
            WizardStep::Category | WizardStep::SquareFeet => WizardStep::Category,
            WizardStep::MaterialGrade => WizardStep::SquareFeet,
            WizardStep::Location => WizardStep::MaterialGrade,
            WizardStep::Timeline => WizardStep::Location,
            WizardStep::Review => WizardStep::Timeline,
            WizardStep::Done => WizardStep::Review,
        }
    }
}

/// User actions the wizard reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardAction {
    /// Raw answer for the current step; empty keeps the field unset
    Answer(String),
    /// Return to the previous step
    Back,
    /// Clear the draft and start over
    Restart,
}

/// Explicit wizard session state
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    pub step: WizardStep,
    pub draft: EstimateInput,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            step: WizardStep::Category,
            draft: EstimateInput::default(),
        }
    }
}

impl WizardState {
    pub fn is_complete(&self) -> bool {
        self.step == WizardStep::Done
    }
}

/// Apply one action to the wizard state, yielding the next state
pub fn transition(state: WizardState, action: WizardAction) -> WizardState {
    match action {
        WizardAction::Restart => WizardState::default(),
        WizardAction::Back => WizardState {
            step: state.step.previous(),
            draft: state.draft,
        },
        WizardAction::Answer(raw) => apply_answer(state, &raw),
    }
}

fn apply_answer(mut state: WizardState, raw: &str) -> WizardState {
    let raw = raw.trim();
    if !raw.is_empty() {
        match state.step {
            WizardStep::Category => state.draft.category = Some(raw.to_string()),
            // Unparseable numbers stay unset; the request boundary will
            // substitute the documented default.
            WizardStep::SquareFeet => state.draft.square_feet = raw.parse().ok(),
            WizardStep::MaterialGrade => state.draft.material_grade = Some(raw.to_string()),
            WizardStep::Location => state.draft.location_code = Some(raw.to_string()),
            WizardStep::Timeline => state.draft.timeline_months = raw.parse().ok(),
            WizardStep::Review | WizardStep::Done => {}
        }
    }
    state.step = state.step.next();
    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer(state: WizardState, raw: &str) -> WizardState {
        transition(state, WizardAction::Answer(raw.to_string()))
    }

    #[test]
    fn test_happy_path_fills_draft_in_order() {
        let mut state = WizardState::default();
        for raw in ["kitchen", "200", "premium", "90210", "2", ""] {
            state = answer(state, raw);
        }

        assert!(state.is_complete());
        assert_eq!(state.draft.category.as_deref(), Some("kitchen"));
        assert_eq!(state.draft.square_feet, Some(200.0));
        assert_eq!(state.draft.material_grade.as_deref(), Some("premium"));
        assert_eq!(state.draft.location_code.as_deref(), Some("90210"));
        assert_eq!(state.draft.timeline_months, Some(2));
    }

    #[test]
    fn test_empty_answer_advances_leaving_field_unset() {
        let state = answer(WizardState::default(), "");
        assert_eq!(state.step, WizardStep::SquareFeet);
        assert_eq!(state.draft.category, None);
    }

    #[test]
    fn test_unparseable_number_advances_with_field_unset() {
        let mut state = answer(WizardState::default(), "kitchen");
        state = answer(state, "lots");
        assert_eq!(state.step, WizardStep::MaterialGrade);
        assert_eq!(state.draft.square_feet, None);
    }

    #[test]
    fn test_back_returns_one_step_and_keeps_draft() {
        let state = answer(WizardState::default(), "bathroom");
        let state = transition(state, WizardAction::Back);
        assert_eq!(state.step, WizardStep::Category);
        assert_eq!(state.draft.category.as_deref(), Some("bathroom"));
    }

    #[test]
    fn test_back_at_first_step_stays_put() {
        let state = transition(WizardState::default(), WizardAction::Back);
        assert_eq!(state.step, WizardStep::Category);
    }

    #[test]
    fn test_restart_clears_everything() {
        let state = answer(WizardState::default(), "kitchen");
        let state = transition(state, WizardAction::Restart);
        assert_eq!(state, WizardState::default());
    }

    #[test]
    fn test_transition_is_pure() {
        let state = answer(WizardState::default(), "kitchen");
        let a = transition(state.clone(), WizardAction::Answer("150".to_string()));
        let b = transition(state, WizardAction::Answer("150".to_string()));
        assert_eq!(a, b);
    }
}
