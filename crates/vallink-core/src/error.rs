use crate::reveal::RevealStage;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("proposal id is required")]
    EmptyProposalId,
    #[error("invalid proposal id: {0}")]
    InvalidProposalId(String),
    #[error("unknown theme: {0}")]
    InvalidTheme(String),
    #[error("invalid message template: {0}")]
    InvalidTemplateIndex(usize),
    #[error("reveal time unit must be positive")]
    InvalidTimeUnit,
    #[error("{action} is not available during the {stage} stage")]
    ActionNotAllowed {
        action: &'static str,
        stage: RevealStage,
    },
}
