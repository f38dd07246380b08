use crate::error::{Result, StoreError};
use serde::{Deserialize, Serialize};
use vallink_core::ProposalRecord;

pub const PROPOSALS_KEY: &str = "vallink_proposals";
pub const COLLECTION_VERSION: u32 = 1;

#[derive(Serialize)]
struct CollectionRef<'a> {
    version: u32,
    proposals: &'a [ProposalRecord],
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredCollection {
    Versioned {
        version: u32,
        proposals: Vec<ProposalRecord>,
    },
    // Bare array written before the collection carried a version.
    Legacy(Vec<ProposalRecord>),
}

pub fn encode(proposals: &[ProposalRecord]) -> Result<String> {
    let collection = CollectionRef {
        version: COLLECTION_VERSION,
        proposals,
    };
    Ok(serde_json::to_string(&collection)?)
}

pub fn decode(raw: &str) -> Result<Vec<ProposalRecord>> {
    let stored: StoredCollection =
        serde_json::from_str(raw).map_err(|err| StoreError::Corrupt(err.to_string()))?;
    match stored {
        StoredCollection::Versioned { version, proposals } if version == COLLECTION_VERSION => {
            Ok(proposals)
        }
        StoredCollection::Versioned { version, .. } => Err(StoreError::UnsupportedVersion(version)),
        StoredCollection::Legacy(proposals) => Ok(proposals),
    }
}

#[cfg(test)]
mod tests {
    use super::{decode, encode};
    use crate::error::StoreError;
    use chrono::{TimeZone, Utc};
    use vallink_core::{ProposalId, ProposalNew, ProposalRecord, Theme};

    fn record() -> ProposalRecord {
        ProposalRecord::from_new(
            ProposalId::new("ab12cd34").unwrap(),
            ProposalNew {
                sender_name: "Sam".to_string(),
                recipient_name: String::new(),
                whatsapp_number: "+12345678901".to_string(),
                message: "Be mine?".to_string(),
                theme: Theme::Elegant,
            },
            Utc.with_ymd_and_hms(2026, 2, 14, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn encode_writes_versioned_camel_case() {
        let raw = encode(&[record()]).unwrap();
        assert!(raw.starts_with("{\"version\":1,\"proposals\":["));
        assert!(raw.contains("\"senderName\":\"Sam\""));
        assert!(raw.contains("\"whatsappNumber\""));
        assert!(raw.contains("\"createdAt\":\"2026-02-14T08:00:00Z\""));
    }

    #[test]
    fn decode_accepts_legacy_arrays() {
        let raw = r#"[{"id":"1a2b3c4d","senderName":"Ana","recipientName":"","whatsappNumber":"+2348012345678","message":"Hi","theme":"playful","createdAt":"2026-02-13T20:15:00.123Z"}]"#;
        let proposals = decode(raw).unwrap();
        assert_eq!(proposals.len(), 1);
        assert_eq!(proposals[0].id, "1a2b3c4d");
        assert_eq!(proposals[0].theme, Theme::Playful);
    }

    #[test]
    fn decode_rejects_garbage_and_future_versions() {
        assert!(matches!(decode("{not json"), Err(StoreError::Corrupt(_))));
        assert!(matches!(
            decode(r#"{"version":9,"proposals":[]}"#),
            Err(StoreError::UnsupportedVersion(9))
        ));
    }
}
