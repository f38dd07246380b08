pub mod domain;
pub mod error;
pub mod reveal;
pub mod route;
pub mod rules;
pub mod share;
pub mod store;
pub mod time;
pub mod wizard;

pub use domain::*;
pub use error::CoreError;
pub use reveal::{
    ButtonOffset, ManualScheduler, NoEffects, OffsetSource, ParticleBurst, RandomOffsets,
    RevealEffects, RevealSession, RevealStage, RevealTiming, Scheduler, TimerToken,
    CAJOLING_MESSAGES,
};
pub use route::{load_reveal, parse_reveal_path, parse_reveal_target, reveal_path};
pub use rules::*;
pub use share::{accepted_message, build_share_link};
pub use store::ProposalStore;
pub use time::{Clock, FixedClock, SystemClock};
pub use wizard::{CreateWizard, SubmitError, WizardStep};
