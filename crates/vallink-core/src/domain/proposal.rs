use crate::domain::ids::ProposalId;
use crate::domain::theme::Theme;
use crate::domain::MESSAGE_TEMPLATES;
use crate::rules::validation::{validate_proposal, ValidationErrors};
use crate::share::build_share_link;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const RECIPIENT_FALLBACK: &str = "Hey You";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalRecord {
    pub id: ProposalId,
    pub sender_name: String,
    #[serde(default)]
    pub recipient_name: String,
    pub whatsapp_number: String,
    pub message: String,
    pub theme: Theme,
    pub created_at: DateTime<Utc>,
}

impl ProposalRecord {
    pub fn from_new(id: ProposalId, input: ProposalNew, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            sender_name: input.sender_name,
            recipient_name: input.recipient_name,
            whatsapp_number: input.whatsapp_number,
            message: input.message,
            theme: input.theme,
            created_at,
        }
    }

    pub fn recipient_greeting(&self) -> &str {
        let trimmed = self.recipient_name.trim();
        if trimmed.is_empty() {
            RECIPIENT_FALLBACK
        } else {
            trimmed
        }
    }

    pub fn share_link(&self) -> String {
        build_share_link(&self.whatsapp_number, &self.sender_name)
    }
}

/// Creation input: a record without its id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalNew {
    pub sender_name: String,
    #[serde(default)]
    pub recipient_name: String,
    pub whatsapp_number: String,
    pub message: String,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for ProposalNew {
    fn default() -> Self {
        Self {
            sender_name: String::new(),
            recipient_name: String::new(),
            whatsapp_number: String::new(),
            message: MESSAGE_TEMPLATES[0].to_string(),
            theme: Theme::default(),
        }
    }
}

impl ProposalNew {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_proposal(self)
    }
}

#[cfg(test)]
mod tests {
    use super::{ProposalNew, ProposalRecord};
    use crate::domain::{ProposalId, Theme, MESSAGE_TEMPLATES};
    use chrono::{TimeZone, Utc};

    fn sample() -> ProposalRecord {
        ProposalRecord::from_new(
            ProposalId::new("ab12cd34").unwrap(),
            ProposalNew {
                sender_name: "Sam".to_string(),
                recipient_name: "  ".to_string(),
                whatsapp_number: "+1 (234) 567-8901".to_string(),
                message: "Be mine?".to_string(),
                theme: Theme::Playful,
            },
            Utc.with_ymd_and_hms(2026, 2, 14, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn recipient_greeting_falls_back_when_blank() {
        let mut record = sample();
        assert_eq!(record.recipient_greeting(), "Hey You");
        record.recipient_name = " Alex ".to_string();
        assert_eq!(record.recipient_greeting(), "Alex");
    }

    #[test]
    fn share_link_uses_record_number() {
        assert!(sample()
            .share_link()
            .starts_with("https://wa.me/12345678901?text="));
    }

    #[test]
    fn default_input_starts_from_first_template() {
        let input = ProposalNew::default();
        assert_eq!(input.message, MESSAGE_TEMPLATES[0]);
        assert_eq!(input.theme, Theme::Romantic);
    }
}
