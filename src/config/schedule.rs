//! Scheduling configuration

use serde::Deserialize;

use crate::domain::scheduling::{SlotDuration, DEFAULT_SLOT_MINUTES};

use super::error::ValidationError;

/// Scheduling and quoting configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleConfig {
    /// Length of the calendar slot a timed booking occupies, in minutes
    #[serde(default = "default_slot_duration")]
    pub slot_duration_minutes: i64,

    /// How long a sent quote stays valid when no expiry is given, in days
    #[serde(default = "default_quote_validity")]
    pub quote_validity_days: i64,

    /// IANA time zone the studio operates in
    #[serde(default = "default_time_zone")]
    pub time_zone: String,
}

impl ScheduleConfig {
    /// Returns the configured slot duration as a domain value.
    pub fn slot_duration(&self) -> Result<SlotDuration, ValidationError> {
        SlotDuration::from_minutes(self.slot_duration_minutes)
            .map_err(|_| ValidationError::InvalidSlotDuration)
    }

    /// Validate scheduling configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.slot_duration()?;
        if self.quote_validity_days < 1 {
            return Err(ValidationError::InvalidQuoteValidity);
        }
        if self.time_zone.is_empty() {
            return Err(ValidationError::MissingRequired("SCHEDULE_TIME_ZONE"));
        }
        Ok(())
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            slot_duration_minutes: default_slot_duration(),
            quote_validity_days: default_quote_validity(),
            time_zone: default_time_zone(),
        }
    }
}

fn default_slot_duration() -> i64 {
    DEFAULT_SLOT_MINUTES
}

fn default_quote_validity() -> i64 {
    30
}

fn default_time_zone() -> String {
    "Africa/Nairobi".to_string()
}
