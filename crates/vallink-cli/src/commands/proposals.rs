use crate::commands::{print_json, Context};
use crate::error::not_found;
use crate::util::{format_created_at, parse_target};
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use vallink_core::{load_reveal, ProposalRecord, ProposalStore};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Proposal id, `/v/<id>` path, or share link
    pub target: String,
}

#[derive(Debug, Args)]
pub struct LinkArgs {
    pub target: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LinkReport {
    pub id: String,
    pub reveal_url: String,
    pub whatsapp_link: String,
}

impl LinkReport {
    pub(crate) fn new(ctx: &Context<'_>, proposal: &ProposalRecord) -> Self {
        Self {
            id: proposal.id.to_string(),
            reveal_url: ctx.config.reveal_url(&proposal.id).to_string(),
            whatsapp_link: proposal.share_link(),
        }
    }
}

pub fn list(ctx: &Context<'_>) -> Result<()> {
    let mut proposals = ctx.store.proposals().list_all();
    proposals.sort_by(|a, b| a.created_at.cmp(&b.created_at));

    if ctx.json {
        return print_json(&proposals);
    }
    if proposals.is_empty() {
        println!("No proposals yet. Run `vallink create` to make one.");
        return Ok(());
    }
    for proposal in proposals {
        println!(
            "{}  {}  {} -> {}  [{}]",
            proposal.id,
            format_created_at(proposal.created_at),
            proposal.sender_name,
            proposal.recipient_greeting(),
            proposal.theme
        );
    }
    Ok(())
}

pub fn show(ctx: &Context<'_>, args: ShowArgs) -> Result<()> {
    let proposal = resolve(ctx, &args.target)?;
    if ctx.json {
        return print_json(&proposal);
    }
    println!("id:        {}", proposal.id);
    println!("from:      {}", proposal.sender_name);
    println!("to:        {}", proposal.recipient_greeting());
    println!("whatsapp:  {}", proposal.whatsapp_number);
    println!("theme:     {}", proposal.theme.display_name());
    println!("created:   {}", format_created_at(proposal.created_at));
    println!("message:   {}", proposal.message);
    println!("link:      {}", ctx.config.reveal_url(&proposal.id));
    Ok(())
}

pub fn link(ctx: &Context<'_>, args: LinkArgs) -> Result<()> {
    let proposal = resolve(ctx, &args.target)?;
    let report = LinkReport::new(ctx, &proposal);
    if ctx.json {
        return print_json(&report);
    }
    println!("{}", report.reveal_url);
    println!("{}", report.whatsapp_link);
    Ok(())
}

pub(crate) fn resolve(ctx: &Context<'_>, target: &str) -> Result<ProposalRecord> {
    let id = parse_target(target)?;
    load_reveal(&ctx.store.proposals(), id.as_str(), Utc::now())
        .ok_or_else(|| not_found("Valentine not found"))
}
