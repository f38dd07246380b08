use crate::domain::{ProposalNew, ProposalRecord};

/// Append-only collection of proposals.
///
/// Reads never fail: a missing or unreadable collection is reported as
/// empty. Writes happen only in [`ProposalStore::create`], which must surface
/// persistence failures.
pub trait ProposalStore {
    type Error;

    fn list_all(&self) -> Vec<ProposalRecord>;

    fn get_by_id(&self, id: &str) -> Option<ProposalRecord> {
        self.list_all()
            .into_iter()
            .find(|proposal| proposal.id.as_str() == id)
    }

    fn create(&self, input: ProposalNew) -> Result<ProposalRecord, Self::Error>;
}
