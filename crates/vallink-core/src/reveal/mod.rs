//! Recipient-facing reveal sequence.
//!
//! A [`RevealSession`] walks `intro -> message -> question -> celebration ->
//! whatsapp`. Timed stages advance through an injected [`Scheduler`]; only
//! the current stage's timer is ever pending, and a timer token that no
//! longer matches the pending one is ignored.

mod effects;
mod scheduler;

pub use effects::{ButtonOffset, NoEffects, OffsetSource, ParticleBurst, RandomOffsets, RevealEffects};
pub use scheduler::{ManualScheduler, Scheduler, TimerToken};

use crate::domain::ProposalRecord;
use crate::error::CoreError;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

pub const CAJOLING_MESSAGES: [&str; 5] = [
    "Are you sure? 🥺",
    "Please reconsider! 💔",
    "One more chance? 🙏",
    "My heart can't take this! 😢",
    "Okay okay, but... really? 💕",
];

const INTRO_UNITS: u32 = 3;
const MESSAGE_UNITS: u32 = 4;
const CELEBRATION_UNITS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealStage {
    Intro,
    Message,
    Question,
    Celebration,
    Whatsapp,
}

impl RevealStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevealStage::Intro => "intro",
            RevealStage::Message => "message",
            RevealStage::Question => "question",
            RevealStage::Celebration => "celebration",
            RevealStage::Whatsapp => "whatsapp",
        }
    }

    /// Delay in time units and the stage entered when it elapses.
    pub fn auto_advance(&self) -> Option<(u32, RevealStage)> {
        match self {
            RevealStage::Intro => Some((INTRO_UNITS, RevealStage::Message)),
            RevealStage::Message => Some((MESSAGE_UNITS, RevealStage::Question)),
            RevealStage::Celebration => Some((CELEBRATION_UNITS, RevealStage::Whatsapp)),
            RevealStage::Question | RevealStage::Whatsapp => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RevealStage::Whatsapp)
    }
}

impl fmt::Display for RevealStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealTiming {
    unit: Duration,
}

impl RevealTiming {
    pub const DEFAULT_UNIT: Duration = Duration::from_secs(1);

    pub fn new(unit: Duration) -> Result<Self, CoreError> {
        if unit.is_zero() {
            return Err(CoreError::InvalidTimeUnit);
        }
        Ok(Self { unit })
    }

    pub fn unit(&self) -> Duration {
        self.unit
    }

    pub fn units(&self, count: u32) -> Duration {
        self.unit * count
    }
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            unit: Self::DEFAULT_UNIT,
        }
    }
}

pub struct RevealSession<'a, S, E, O>
where
    S: Scheduler,
    E: RevealEffects,
    O: OffsetSource,
{
    proposal: &'a ProposalRecord,
    timing: RevealTiming,
    stage: RevealStage,
    pending: Option<TimerToken>,
    decline_count: usize,
    decline_offset: ButtonOffset,
    particles_started: bool,
    torn_down: bool,
    scheduler: S,
    effects: E,
    offsets: O,
}

impl<'a, S, E, O> RevealSession<'a, S, E, O>
where
    S: Scheduler,
    E: RevealEffects,
    O: OffsetSource,
{
    /// Enters `intro` and arms its timer.
    pub fn start(
        proposal: &'a ProposalRecord,
        timing: RevealTiming,
        scheduler: S,
        effects: E,
        offsets: O,
    ) -> Self {
        let mut session = Self {
            proposal,
            timing,
            stage: RevealStage::Intro,
            pending: None,
            decline_count: 0,
            decline_offset: ButtonOffset::default(),
            particles_started: false,
            torn_down: false,
            scheduler,
            effects,
            offsets,
        };
        session.arm_timer();
        session
    }

    pub fn stage(&self) -> RevealStage {
        self.stage
    }

    pub fn timing(&self) -> RevealTiming {
        self.timing
    }

    pub fn pending_timer(&self) -> Option<TimerToken> {
        self.pending
    }

    pub fn decline_count(&self) -> usize {
        self.decline_count
    }

    /// Index of the cajoling message the next decline will show.
    pub fn cajoling_index(&self) -> usize {
        self.decline_count % CAJOLING_MESSAGES.len()
    }

    pub fn decline_offset(&self) -> ButtonOffset {
        self.decline_offset
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// The WhatsApp hand-off, available once the session reaches its
    /// terminal stage.
    pub fn share_link(&self) -> Option<String> {
        if self.stage == RevealStage::Whatsapp {
            Some(self.proposal.share_link())
        } else {
            None
        }
    }

    /// Handles a fired timer. Returns `true` if it advanced the stage.
    pub fn on_timer(&mut self, token: TimerToken) -> bool {
        if self.torn_down || self.pending != Some(token) {
            return false;
        }
        self.pending = None;
        match self.stage.auto_advance() {
            Some((_, next)) => {
                self.enter(next);
                true
            }
            None => false,
        }
    }

    pub fn accept(&mut self) -> Result<(), CoreError> {
        self.ensure_question("accept")?;
        self.enter(RevealStage::Celebration);
        self.effects.start_particles(ParticleBurst::default());
        self.particles_started = true;
        Ok(())
    }

    /// Dodges and returns the cajoling message to show. The stage does not
    /// change; declining can be repeated indefinitely.
    pub fn decline(&mut self) -> Result<&'static str, CoreError> {
        self.ensure_question("decline")?;
        let message = CAJOLING_MESSAGES[self.cajoling_index()];
        self.decline_count += 1;
        self.decline_offset = self.offsets.next_offset();
        self.effects.notify(message);
        Ok(message)
    }

    /// Pointer drifting onto the decline button moves it without counting
    /// as a decline.
    pub fn hover_decline(&mut self) -> Result<ButtonOffset, CoreError> {
        self.ensure_question("hover")?;
        self.decline_offset = self.offsets.next_offset();
        Ok(self.decline_offset)
    }

    /// Cancels the pending timer and any running particle effect. Safe to
    /// call more than once; also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.cancel_timer();
        if self.particles_started {
            self.effects.stop_particles();
            self.particles_started = false;
        }
        self.torn_down = true;
    }

    fn ensure_question(&self, action: &'static str) -> Result<(), CoreError> {
        if self.torn_down || self.stage != RevealStage::Question {
            return Err(CoreError::ActionNotAllowed {
                action,
                stage: self.stage,
            });
        }
        Ok(())
    }

    fn enter(&mut self, stage: RevealStage) {
        self.cancel_timer();
        self.stage = stage;
        self.arm_timer();
    }

    fn arm_timer(&mut self) {
        if let Some((units, _)) = self.stage.auto_advance() {
            self.pending = Some(self.scheduler.schedule(self.timing.units(units)));
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}

impl<E, O> RevealSession<'_, ManualScheduler, E, O>
where
    E: RevealEffects,
    O: OffsetSource,
{
    /// Runs the virtual clock forward, firing every timer that comes due,
    /// including timers armed along the way.
    pub fn advance(&mut self, by: Duration) {
        let target = self.scheduler.now() + by;
        while let Some(token) = self.scheduler.pop_due(target) {
            self.on_timer(token);
        }
        self.scheduler.set_now(target);
    }

    pub fn advance_units(&mut self, units: u32) {
        self.advance(self.timing.units(units));
    }

    pub fn time_until_next(&self) -> Option<Duration> {
        self.scheduler
            .next_deadline()
            .map(|deadline| deadline.saturating_sub(self.scheduler.now()))
    }
}

impl<S, E, O> Drop for RevealSession<'_, S, E, O>
where
    S: Scheduler,
    E: RevealEffects,
    O: OffsetSource,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
