use crate::backend::KeyValueBackend;
use crate::codec::{self, PROPOSALS_KEY};
use crate::error::{Result, StoreError};
use tracing::{debug, warn};
use vallink_core::{Clock, IdGenerator, ProposalNew, ProposalRecord, ProposalStore};

/// Proposal collection kept as one serialized value under [`PROPOSALS_KEY`].
/// Every create rewrites the whole collection.
pub struct ProposalsRepo<'a, B> {
    backend: B,
    ids: &'a dyn IdGenerator,
    clock: &'a dyn Clock,
}

impl<'a, B: KeyValueBackend> ProposalsRepo<'a, B> {
    pub fn new(backend: B, ids: &'a dyn IdGenerator, clock: &'a dyn Clock) -> Self {
        Self {
            backend,
            ids,
            clock,
        }
    }

    /// Strict read. Unlike [`ProposalStore::list_all`], an unreadable
    /// collection is an error here.
    pub fn load(&self) -> Result<Vec<ProposalRecord>> {
        match self.backend.get_item(PROPOSALS_KEY)? {
            Some(raw) => codec::decode(&raw),
            None => Ok(Vec::new()),
        }
    }
}

impl<B: KeyValueBackend> ProposalStore for ProposalsRepo<'_, B> {
    type Error = StoreError;

    fn list_all(&self) -> Vec<ProposalRecord> {
        match self.load() {
            Ok(proposals) => proposals,
            Err(err) => {
                warn!(error = %err, "proposal collection unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    fn create(&self, input: ProposalNew) -> Result<ProposalRecord> {
        input.validate()?;
        // An unreadable collection is left untouched rather than replaced.
        let mut proposals = self.load()?;
        let record = ProposalRecord::from_new(self.ids.next_id(), input, self.clock.now());
        proposals.push(record.clone());

        let encoded = codec::encode(&proposals)?;
        self.backend.set_item(PROPOSALS_KEY, &encoded)?;
        debug!(id = %record.id, total = proposals.len(), "proposal created");
        Ok(record)
    }
}
