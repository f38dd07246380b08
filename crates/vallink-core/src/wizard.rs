use crate::domain::{ProposalNew, ProposalRecord};
use crate::rules::validation::{validate_details, validate_message, ValidationErrors};
use crate::store::ProposalStore;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WizardStep {
    #[default]
    Details,
    Message,
    Theme,
    Preview,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Details,
        WizardStep::Message,
        WizardStep::Theme,
        WizardStep::Preview,
    ];

    pub fn number(&self) -> usize {
        match self {
            WizardStep::Details => 1,
            WizardStep::Message => 2,
            WizardStep::Theme => 3,
            WizardStep::Preview => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Details => "Your Details",
            WizardStep::Message => "Your Message",
            WizardStep::Theme => "Choose Theme",
            WizardStep::Preview => "Preview & Share",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            WizardStep::Details => "Tell us about yourself",
            WizardStep::Message => "What do you want to say?",
            WizardStep::Theme => "Pick a beautiful look",
            WizardStep::Preview => "See your creation",
        }
    }

    fn next(self) -> Self {
        match self {
            WizardStep::Details => WizardStep::Message,
            WizardStep::Message => WizardStep::Theme,
            WizardStep::Theme | WizardStep::Preview => WizardStep::Preview,
        }
    }

    fn prev(self) -> Self {
        match self {
            WizardStep::Details | WizardStep::Message => WizardStep::Details,
            WizardStep::Theme => WizardStep::Message,
            WizardStep::Preview => WizardStep::Theme,
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError<E>
where
    E: std::error::Error + 'static,
{
    #[error("please fill in all required fields: {0}")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Store(E),
}

/// Multi-step creation form. Only the details and message steps carry
/// validation; theme and preview always pass.
#[derive(Debug, Clone, Default)]
pub struct CreateWizard {
    step: WizardStep,
    draft: ProposalNew,
    errors: ValidationErrors,
}

impl CreateWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_draft(draft: ProposalNew) -> Self {
        Self {
            draft,
            ..Self::default()
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &ProposalNew {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ProposalNew {
        &mut self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Validates one step, replacing any previously reported errors.
    pub fn validate_step(&mut self, step: WizardStep) -> bool {
        self.errors = step_errors(&self.draft, step);
        self.errors.is_empty()
    }

    /// Advances when the current step is valid. Stays on the last step.
    pub fn next(&mut self) -> bool {
        if !self.validate_step(self.step) {
            return false;
        }
        self.step = self.step.next();
        true
    }

    pub fn back(&mut self) {
        self.step = self.step.prev();
    }

    pub fn submit<S>(&mut self, store: &S) -> Result<ProposalRecord, SubmitError<S::Error>>
    where
        S: ProposalStore + ?Sized,
        S::Error: std::error::Error + 'static,
    {
        let mut errors = step_errors(&self.draft, WizardStep::Details);
        errors.extend(step_errors(&self.draft, WizardStep::Message));
        self.errors = errors.clone();
        if !errors.is_empty() {
            return Err(SubmitError::Invalid(errors));
        }
        store
            .create(self.draft.clone())
            .map_err(SubmitError::Store)
    }
}

fn step_errors(draft: &ProposalNew, step: WizardStep) -> ValidationErrors {
    match step {
        WizardStep::Details => validate_details(&draft.sender_name, &draft.whatsapp_number),
        WizardStep::Message => validate_message(&draft.message),
        WizardStep::Theme | WizardStep::Preview => ValidationErrors::new(),
    }
}
