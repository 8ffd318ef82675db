//! Client contact details value object.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Maximum length for contact name and email fields.
pub const MAX_CONTACT_FIELD_LENGTH: usize = 255;

/// Validated client contact details shared by bookings, quotes and
/// enrollments.
///
/// # Invariants
///
/// - `name`, `email` and `phone` are non-empty after trimming
/// - `email` passes a basic shape check (contains `@` and `.`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    name: String,
    email: String,
    phone: String,
}

impl ContactInfo {
    /// Builds validated contact details from raw input.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if any field is blank
    /// - `InvalidFormat` if the email does not look like an address
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into().trim().to_string();
        let email = email.into().trim().to_string();
        let phone = phone.into().trim().to_string();

        if name.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if name.len() > MAX_CONTACT_FIELD_LENGTH {
            return Err(ValidationError::invalid_format("name", "name is too long"));
        }
        if phone.is_empty() {
            return Err(ValidationError::empty_field("phone"));
        }
        if email.is_empty() {
            return Err(ValidationError::empty_field("email"));
        }
        if !email.contains('@') || !email.contains('.') {
            return Err(ValidationError::invalid_format(
                "email",
                "expected an address like name@example.com",
            ));
        }

        Ok(Self { name, email, phone })
    }

    /// Reconstitutes contact details from persistence (no validation).
    pub fn reconstitute(name: String, email: String, phone: String) -> Self {
        Self { name, email, phone }
    }

    /// Returns the contact's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contact's email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the contact's phone number.
    pub fn phone(&self) -> &str {
        &self.phone
    }
}
