use crate::commands::proposals::LinkReport;
use crate::commands::{print_json, Context};
use crate::error::invalid_input;
use crate::util::parse_theme;
use anyhow::{Context as _, Result};
use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use tracing::debug;
use vallink_core::{
    message_template, CreateWizard, ProposalNew, ProposalRecord, SubmitError, Theme, WizardStep,
    MESSAGE_TEMPLATES,
};

#[derive(Debug, Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub sender: String,
    #[arg(long, default_value = "")]
    pub recipient: String,
    /// WhatsApp number, 10 to 15 digits; punctuation is ignored
    #[arg(long)]
    pub phone: String,
    #[arg(long, conflicts_with = "template")]
    pub message: Option<String>,
    /// Use a built-in message (see `vallink templates`)
    #[arg(long)]
    pub template: Option<usize>,
    #[arg(long)]
    pub theme: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatedReport<'a> {
    proposal: &'a ProposalRecord,
    #[serde(flatten)]
    link: LinkReport,
}

pub fn create(ctx: &Context<'_>, args: CreateArgs) -> Result<()> {
    let message = match (args.message, args.template) {
        (Some(message), _) => message,
        (None, Some(position)) => message_template(position)
            .ok_or_else(|| {
                invalid_input(format!(
                    "template must be between 1 and {}",
                    MESSAGE_TEMPLATES.len()
                ))
            })?
            .to_string(),
        (None, None) => MESSAGE_TEMPLATES[0].to_string(),
    };
    let theme = match args.theme.as_deref() {
        Some(raw) => parse_theme(raw)?,
        None => ctx.config.default_theme,
    };

    let mut wizard = CreateWizard::with_draft(ProposalNew {
        sender_name: args.sender,
        recipient_name: args.recipient,
        whatsapp_number: args.phone,
        message,
        theme,
    });
    let proposal = submit(ctx, &mut wizard)?;
    report_created(ctx, &proposal)
}

/// Prompts go to stderr under `--json` so stdout carries only the report.
pub fn wizard(ctx: &Context<'_>) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut wizard = CreateWizard::new();
    wizard.draft_mut().theme = ctx.config.default_theme;

    if ctx.json {
        prompt_all(&mut wizard, &mut input, io::stderr().lock())?;
    } else {
        prompt_all(&mut wizard, &mut input, io::stdout().lock())?;
    }

    let proposal = submit(ctx, &mut wizard)?;
    report_created(ctx, &proposal)
}

fn prompt_all<R: BufRead, W: Write>(
    wizard: &mut CreateWizard,
    input: &mut R,
    mut output: W,
) -> Result<()> {
    run_wizard(wizard, input, &mut output)?;
    writeln!(output)?;
    Ok(())
}

fn submit(ctx: &Context<'_>, wizard: &mut CreateWizard) -> Result<ProposalRecord> {
    match wizard.submit(&ctx.store.proposals()) {
        Ok(proposal) => {
            debug!(id = %proposal.id, "proposal created");
            Ok(proposal)
        }
        Err(SubmitError::Invalid(errors)) => Err(invalid_input(errors.to_string())),
        Err(SubmitError::Store(err)) => Err(err).with_context(|| "save proposal"),
    }
}

fn report_created(ctx: &Context<'_>, proposal: &ProposalRecord) -> Result<()> {
    let link = LinkReport::new(ctx, proposal);
    if ctx.json {
        return print_json(&CreatedReport { proposal, link });
    }
    println!("created {} for {}", proposal.id, proposal.recipient_greeting());
    println!("share:    {}", link.reveal_url);
    println!("whatsapp: {}", link.whatsapp_link);
    Ok(())
}

/// Walks the four wizard steps over line-oriented input. Typing `back` at
/// any prompt returns to the previous step.
pub(crate) fn run_wizard<R, W>(wizard: &mut CreateWizard, input: &mut R, output: &mut W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    loop {
        let step = wizard.step();
        writeln!(
            output,
            "\nStep {} of {}: {} - {}",
            step.number(),
            WizardStep::ALL.len(),
            step.title(),
            step.description()
        )?;

        let went_back = match step {
            WizardStep::Details => prompt_details(wizard, input, output)?,
            WizardStep::Message => prompt_message(wizard, input, output)?,
            WizardStep::Theme => prompt_theme(wizard, input, output)?,
            WizardStep::Preview => {
                write_preview(wizard.draft(), output)?;
                match prompt(input, output, "Create this proposal? [Y/n/back]")?.as_str() {
                    "back" => true,
                    "" | "y" | "yes" => return Ok(()),
                    _ => return Err(invalid_input("proposal creation cancelled")),
                }
            }
        };

        if went_back {
            wizard.back();
            continue;
        }
        if !wizard.next() {
            for (field, message) in wizard.errors().iter() {
                writeln!(output, "  ! {}: {}", field, message)?;
            }
        }
    }
}

fn prompt_details<R: BufRead, W: Write>(
    wizard: &mut CreateWizard,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    let sender = prompt(input, output, "Your name")?;
    if sender == "back" {
        return Ok(true);
    }
    let recipient = prompt(input, output, "Their name (optional)")?;
    let number = prompt(input, output, "Your WhatsApp number")?;
    let draft = wizard.draft_mut();
    draft.sender_name = sender;
    draft.recipient_name = recipient;
    draft.whatsapp_number = number;
    Ok(false)
}

fn prompt_message<R: BufRead, W: Write>(
    wizard: &mut CreateWizard,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    for (index, template) in MESSAGE_TEMPLATES.iter().enumerate() {
        writeln!(output, "  {}. {}", index + 1, template)?;
    }
    let answer = prompt(
        input,
        output,
        "Pick a template number, type your own message, or press enter to keep the current one",
    )?;
    if answer == "back" {
        return Ok(true);
    }
    if answer.is_empty() {
        return Ok(false);
    }
    let message = answer
        .parse::<usize>()
        .ok()
        .and_then(message_template)
        .map(str::to_string)
        .unwrap_or(answer);
    wizard.draft_mut().message = message;
    Ok(false)
}

fn prompt_theme<R: BufRead, W: Write>(
    wizard: &mut CreateWizard,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    for theme in Theme::ALL {
        writeln!(output, "  {:<10} {}", theme.id(), theme.display_name())?;
    }
    loop {
        let label = format!("Theme [{}]", wizard.draft().theme);
        let answer = prompt(input, output, &label)?;
        if answer == "back" {
            return Ok(true);
        }
        if answer.is_empty() {
            return Ok(false);
        }
        match answer.parse::<Theme>() {
            Ok(theme) => {
                wizard.draft_mut().theme = theme;
                return Ok(false);
            }
            Err(err) => writeln!(output, "  ! {}", err)?,
        }
    }
}

fn write_preview<W: Write>(draft: &ProposalNew, output: &mut W) -> Result<()> {
    let recipient = match draft.recipient_name.trim() {
        "" => "Hey You",
        name => name,
    };
    writeln!(output, "  To:      {}", recipient)?;
    writeln!(output, "  From:    {}", draft.sender_name)?;
    writeln!(output, "  Number:  {}", draft.whatsapp_number)?;
    writeln!(output, "  Theme:   {}", draft.theme.display_name())?;
    writeln!(output, "  Message: {}", draft.message)?;
    Ok(())
}

fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> Result<String> {
    write!(output, "{}: ", label)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(invalid_input("input ended before the wizard finished"));
    }
    Ok(line.trim().to_string())
}
