use crate::domain::phone::validate_phone_number;
use crate::domain::ProposalNew;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

pub const SENDER_NAME_REQUIRED: &str = "Please enter your name";
pub const WHATSAPP_NUMBER_REQUIRED: &str = "Please enter your WhatsApp number";
pub const WHATSAPP_NUMBER_INVALID: &str = "Please enter a valid phone number (10-15 digits)";
pub const MESSAGE_REQUIRED: &str = "Please write or select a message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    SenderName,
    WhatsappNumber,
    Message,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::SenderName => "senderName",
            Field::WhatsappNumber => "whatsappNumber",
            Field::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-keyed validation messages. Empty means the input passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_details(sender_name: &str, whatsapp_number: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if sender_name.trim().is_empty() {
        errors.insert(Field::SenderName, SENDER_NAME_REQUIRED);
    }
    if whatsapp_number.trim().is_empty() {
        errors.insert(Field::WhatsappNumber, WHATSAPP_NUMBER_REQUIRED);
    } else if !validate_phone_number(whatsapp_number) {
        errors.insert(Field::WhatsappNumber, WHATSAPP_NUMBER_INVALID);
    }
    errors
}

pub fn validate_message(message: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if message.trim().is_empty() {
        errors.insert(Field::Message, MESSAGE_REQUIRED);
    }
    errors
}

pub fn validate_proposal(input: &ProposalNew) -> Result<(), ValidationErrors> {
    let mut errors = validate_details(&input.sender_name, &input.whatsapp_number);
    errors.extend(validate_message(&input.message));
    errors.into_result()
}
