use crate::error::invalid_input;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use url::Url;
use vallink_core::{parse_reveal_path, parse_reveal_target, ProposalId, Theme};

/// Accepts a bare id, a `/v/<id>` path, or a full share URL.
pub fn parse_target(raw: &str) -> Result<ProposalId> {
    let trimmed = raw.trim();
    let parsed = if trimmed.contains("://") {
        Url::parse(trimmed)
            .ok()
            .and_then(|url| parse_reveal_path(url.path()))
    } else {
        parse_reveal_target(trimmed)
    };
    parsed.ok_or_else(|| invalid_input(format!("not a proposal id or link: {trimmed}")))
}

pub fn parse_theme(raw: &str) -> Result<Theme> {
    raw.parse::<Theme>()
        .map_err(|_| invalid_input(format!("unknown theme: {raw} (expected romantic|elegant|playful|classic)")))
}

pub fn format_created_at(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse_target, parse_theme};
    use vallink_core::Theme;

    #[test]
    fn parse_target_accepts_ids_paths_and_urls() {
        assert_eq!(parse_target("ab12cd34").unwrap(), "ab12cd34");
        assert_eq!(parse_target("/v/ab12cd34").unwrap(), "ab12cd34");
        assert_eq!(
            parse_target("https://vallink.app/v/ab12cd34?ref=share").unwrap(),
            "ab12cd34"
        );
    }

    #[test]
    fn parse_target_rejects_other_links() {
        assert!(parse_target("https://vallink.app/create").is_err());
        assert!(parse_target("").is_err());
    }

    #[test]
    fn parse_theme_reports_choices() {
        assert_eq!(parse_theme("classic").unwrap(), Theme::Classic);
        let err = parse_theme("neon").unwrap_err();
        assert!(err.to_string().contains("romantic|elegant|playful|classic"));
    }
}
