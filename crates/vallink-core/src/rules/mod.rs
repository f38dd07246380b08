pub mod validation;

pub use validation::{
    validate_details, validate_message, validate_proposal, Field, ValidationErrors,
};
