use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Customer, CustomerChanges, CustomerPayload, Gender};

pub const NAME_MAX_LEN: usize = 50;
pub const PHONE_LEN: usize = 10;
pub const ADDRESS_MIN_LEN: usize = 10;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// Resolve a path segment into a customer id.
///
/// Only the canonical hyphenated UUID form is accepted. Anything else yields
/// `None` and must never be passed on to the store.
pub fn resolve_customer_id(raw: &str) -> Option<Uuid> {
    if raw.len() != uuid::fmt::Hyphenated::LENGTH {
        return None;
    }
    Uuid::try_parse(raw).ok()
}

/// Constraint violated by a single customer field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("is required")]
    Missing,
    #[error("must be between 1 and 50 characters")]
    NameLength,
    #[error("must be a valid email address")]
    InvalidEmail,
    #[error("must be exactly 10 characters")]
    PhoneLength,
    #[error("must contain only digits")]
    PhoneNotNumeric,
    #[error("must be at least 10 characters")]
    AddressTooShort,
    #[error("must be one of: male, female")]
    InvalidGender,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub error: FieldError,
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.error)
    }
}

/// Every violation found in one request body
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<FieldViolation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[FieldViolation] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, field: &'static str, error: FieldError) {
        self.0.push(FieldViolation { field, error });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn validate_name(name: &str) -> Result<(), FieldError> {
    let len = name.chars().count();
    if len == 0 || len > NAME_MAX_LEN {
        return Err(FieldError::NameLength);
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), FieldError> {
    if !EMAIL_PATTERN.is_match(email) {
        return Err(FieldError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), FieldError> {
    if phone.chars().count() != PHONE_LEN {
        return Err(FieldError::PhoneLength);
    }
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(FieldError::PhoneNotNumeric);
    }
    Ok(())
}

pub fn validate_address(address: &str) -> Result<(), FieldError> {
    if address.chars().count() < ADDRESS_MIN_LEN {
        return Err(FieldError::AddressTooShort);
    }
    Ok(())
}

pub fn parse_gender(gender: &str) -> Result<Gender, FieldError> {
    gender.parse().map_err(|_| FieldError::InvalidGender)
}

impl CustomerPayload {
    /// Check every supplied field; omitted fields are not evaluated.
    pub fn validate_partial(self) -> Result<CustomerChanges, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = checked(&mut errors, "name", self.name, validate_name);
        let email = checked(&mut errors, "email", self.email, validate_email);
        let phone = checked(&mut errors, "phone", self.phone, validate_phone);
        let address = checked(&mut errors, "address", self.address, validate_address);
        let gender = match self.gender.as_deref().map(parse_gender) {
            Some(Ok(gender)) => Some(gender),
            Some(Err(e)) => {
                errors.push("gender", e);
                None
            }
            None => None,
        };

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(CustomerChanges {
            name,
            email,
            phone,
            address,
            gender,
        })
    }

    /// Validate a full field set and build a new record under `id`.
    pub fn into_customer(self, id: Uuid) -> Result<Customer, ValidationErrors> {
        let mut missing = ValidationErrors::default();
        for (field, present) in [
            ("name", self.name.is_some()),
            ("email", self.email.is_some()),
            ("phone", self.phone.is_some()),
            ("address", self.address.is_some()),
            ("gender", self.gender.is_some()),
        ] {
            if !present {
                missing.push(field, FieldError::Missing);
            }
        }

        let changes = match self.validate_partial() {
            Ok(changes) if missing.is_empty() => changes,
            Ok(_) => return Err(missing),
            Err(mut invalid) => {
                invalid.0.extend(missing.0);
                return Err(invalid);
            }
        };

        match changes {
            CustomerChanges {
                name: Some(name),
                email: Some(email),
                phone: Some(phone),
                address: Some(address),
                gender: Some(gender),
            } => Ok(Customer {
                id,
                name,
                email,
                phone,
                address,
                gender,
            }),
            _ => Err(missing),
        }
    }
}

fn checked(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<String>,
    check: fn(&str) -> Result<(), FieldError>,
) -> Option<String> {
    let value = value?;
    match check(&value) {
        Ok(()) => Some(value),
        Err(e) => {
            errors.push(field, e);
            None
        }
    }
}
