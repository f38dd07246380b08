use crate::domain::{demo_proposal, ProposalId, ProposalRecord, DEMO_ID};
use crate::store::ProposalStore;
use chrono::{DateTime, Utc};

pub const REVEAL_PREFIX: &str = "/v/";

pub fn reveal_path(id: &ProposalId) -> String {
    format!("{REVEAL_PREFIX}{id}")
}

/// Extracts the id from a `/v/<id>` path. A single trailing slash is allowed.
pub fn parse_reveal_path(path: &str) -> Option<ProposalId> {
    let rest = path.strip_prefix(REVEAL_PREFIX)?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    ProposalId::new(rest).ok()
}

/// Accepts either a bare id or a `/v/<id>` path.
pub fn parse_reveal_target(input: &str) -> Option<ProposalId> {
    let trimmed = input.trim();
    if trimmed.starts_with('/') {
        return parse_reveal_path(trimmed);
    }
    ProposalId::new(trimmed).ok()
}

/// Resolves the record for a reveal page. `demo` never touches the store.
pub fn load_reveal<S>(store: &S, id: &str, now: DateTime<Utc>) -> Option<ProposalRecord>
where
    S: ProposalStore + ?Sized,
{
    if id == DEMO_ID {
        return Some(demo_proposal(now));
    }
    store.get_by_id(id)
}
