pub mod demo;
pub mod ids;
pub mod phone;
pub mod proposal;
pub mod templates;
pub mod theme;

pub use demo::{demo_proposal, DEMO_ID};
pub use ids::{IdGenerator, ProposalId, UuidIdGenerator, PROPOSAL_ID_LEN};
pub use phone::{phone_digits, validate_phone_number, MAX_PHONE_DIGITS, MIN_PHONE_DIGITS};
pub use proposal::{ProposalNew, ProposalRecord};
pub use templates::{message_template, MESSAGE_TEMPLATES};
pub use theme::Theme;
