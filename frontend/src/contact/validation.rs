use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+@\S+\.\S+").expect("valid email pattern"));

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Enter a valid email address";
pub const PHONE_REQUIRED: &str = "Phone is required";

/// What the visitor typed into the contact form, posted as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
    Message,
}

pub type FieldErrors = BTreeMap<Field, &'static str>;

#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub valid: bool,
    pub field_errors: FieldErrors,
}

impl ContactSubmission {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Phone => &self.phone,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Phone => self.phone = value,
            Field::Message => self.message = value,
        }
    }
}

pub fn validate(fields: &ContactSubmission) -> Validation {
    let mut field_errors = FieldErrors::new();

    if fields.name.trim().is_empty() {
        field_errors.insert(Field::Name, NAME_REQUIRED);
    }
    if fields.email.trim().is_empty() {
        field_errors.insert(Field::Email, EMAIL_REQUIRED);
    } else if !EMAIL_PATTERN.is_match(&fields.email) {
        field_errors.insert(Field::Email, EMAIL_INVALID);
    }
    if fields.phone.trim().is_empty() {
        field_errors.insert(Field::Phone, PHONE_REQUIRED);
    }

    Validation {
        valid: field_errors.is_empty(),
        field_errors,
    }
}
