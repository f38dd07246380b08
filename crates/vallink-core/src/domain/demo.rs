use crate::domain::ids::ProposalId;
use crate::domain::proposal::ProposalRecord;
use crate::domain::theme::Theme;
use chrono::{DateTime, Utc};

pub const DEMO_ID: &str = "demo";

const DEMO_MESSAGE: &str = "Every moment with you feels like a beautiful dream I never want to wake up from. You make my heart skip a beat every single day. 💕";

/// Built-in record served for the reserved `demo` id. Never persisted.
pub fn demo_proposal(now: DateTime<Utc>) -> ProposalRecord {
    ProposalRecord {
        id: ProposalId::new_unchecked(DEMO_ID),
        sender_name: "Your Secret Admirer".to_string(),
        recipient_name: "Beautiful Soul".to_string(),
        whatsapp_number: "+1234567890".to_string(),
        message: DEMO_MESSAGE.to_string(),
        theme: Theme::Romantic,
        created_at: now,
    }
}
