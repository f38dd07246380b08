use crate::commands::proposals::resolve;
use crate::commands::{print_json, Context};
use anyhow::{Context as _, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::thread;
use std::time::Duration;
use tracing::debug;
use vallink_core::{
    ButtonOffset, ManualScheduler, ParticleBurst, ProposalRecord, RandomOffsets, RevealEffects,
    RevealSession, RevealStage, RevealTiming,
};

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Proposal id, `/v/<id>` path, or share link
    pub target: String,
    /// Scripted answers to the question, consumed in order before stdin
    #[arg(long = "answer", value_enum)]
    pub answers: Vec<Answer>,
    /// Override the configured length of one reveal time unit
    #[arg(long)]
    pub time_unit_ms: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Answer {
    Yes,
    No,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PlayReport {
    id: String,
    stages: Vec<RevealStage>,
    declines: usize,
    cajoling_messages: Vec<&'static str>,
    /// Where the decline button was last dodged to, if it ever moved.
    decline_offset: Option<ButtonOffset>,
    final_stage: RevealStage,
    whatsapp_link: Option<String>,
}

struct TraceEffects;

impl RevealEffects for TraceEffects {
    fn start_particles(&mut self, burst: ParticleBurst) {
        debug!(
            duration_ms = burst.duration.as_millis() as u64,
            frames = burst.frame_count(),
            peak = burst.particles_at(Duration::ZERO),
            "particle burst started"
        );
    }

    fn stop_particles(&mut self) {
        debug!("particle burst stopped");
    }

    fn notify(&mut self, message: &str) {
        debug!(toast = message, "notification");
    }
}

pub fn play(ctx: &Context<'_>, args: PlayArgs) -> Result<()> {
    let proposal = resolve(ctx, &args.target)?;
    let timing = match args.time_unit_ms {
        Some(ms) => RevealTiming::new(Duration::from_millis(ms))
            .with_context(|| "invalid --time-unit-ms")?,
        None => ctx.config.reveal.timing(),
    };

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let report = run_reveal(&proposal, timing, args.answers, &mut input, ctx.json)?;

    if ctx.json {
        return print_json(&report);
    }
    Ok(())
}

fn run_reveal<R: BufRead>(
    proposal: &ProposalRecord,
    timing: RevealTiming,
    answers: Vec<Answer>,
    input: &mut R,
    quiet: bool,
) -> Result<PlayReport> {
    let mut session = RevealSession::start(
        proposal,
        timing,
        ManualScheduler::new(),
        TraceEffects,
        RandomOffsets::from_entropy(),
    );
    let mut scripted = answers.into_iter();
    let mut stages = Vec::new();
    let mut cajoling_messages = Vec::new();

    loop {
        let stage = session.stage();
        if stages.last() != Some(&stage) {
            debug!(stage = %stage, "reveal stage entered");
            stages.push(stage);
            if !quiet {
                render_stage(proposal, stage);
            }
        }
        if stage.is_terminal() {
            break;
        }

        if stage == RevealStage::Question {
            let answer = match scripted.next() {
                Some(answer) => Some(answer),
                None => read_answer(input, quiet)?,
            };
            match answer {
                Some(Answer::Yes) => session.accept()?,
                Some(Answer::No) => {
                    let message = session.decline()?;
                    cajoling_messages.push(message);
                    if !quiet {
                        let offset = session.decline_offset();
                        println!("  {}", message);
                        println!("  (the No button dodges to {:+.0}, {:+.0})", offset.x, offset.y);
                    }
                }
                None => {
                    debug!("input closed during question, leaving reveal");
                    session.teardown();
                    break;
                }
            }
            continue;
        }

        match session.time_until_next() {
            Some(wait) => {
                thread::sleep(wait);
                session.advance(wait);
            }
            None => break,
        }
    }

    Ok(PlayReport {
        id: proposal.id.to_string(),
        stages,
        declines: session.decline_count(),
        cajoling_messages,
        decline_offset: (session.decline_count() > 0).then(|| session.decline_offset()),
        final_stage: session.stage(),
        whatsapp_link: session.share_link(),
    })
}

fn render_stage(proposal: &ProposalRecord, stage: RevealStage) {
    match stage {
        RevealStage::Intro => {
            println!("💌 {}", proposal.recipient_greeting());
            println!("Someone special has a message for you...");
        }
        RevealStage::Message => {
            println!();
            println!("\"{}\"", proposal.message);
            println!("  - {}", proposal.sender_name);
        }
        RevealStage::Question => {
            println!();
            println!("Will You Be My Valentine?");
        }
        RevealStage::Celebration => {
            println!();
            println!("🎉 YES!!! 🎉");
        }
        RevealStage::Whatsapp => {
            println!();
            println!("Now let {} know the amazing news! 💕", proposal.sender_name);
            println!("{}", proposal.share_link());
        }
    }
}

/// `None` once input is exhausted.
fn read_answer<R: BufRead>(input: &mut R, quiet: bool) -> Result<Option<Answer>> {
    loop {
        if !quiet {
            print!("[yes/no] > ");
            io::stdout().flush()?;
        }
        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(Some(Answer::Yes)),
            "n" | "no" => return Ok(Some(Answer::No)),
            _ => continue,
        }
    }
}
