use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const PROPOSAL_ID_LEN: usize = 8;

/// Short opaque identifier of a stored proposal.
///
/// Generated ids are hex, so they never collide with the reserved `demo`
/// token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProposalId(String);

impl ProposalId {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyProposalId);
        }
        if trimmed.contains('/') || trimmed.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidProposalId(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub(crate) fn new_unchecked(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProposalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProposalId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq<str> for ProposalId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProposalId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

pub trait IdGenerator {
    fn next_id(&self) -> ProposalId;
}

/// Takes the leading characters of a random v4 UUID. Collisions are not
/// checked against existing ids.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdGenerator;

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> ProposalId {
        let raw = Uuid::new_v4().simple().to_string();
        ProposalId::new_unchecked(&raw[..PROPOSAL_ID_LEN])
    }
}
