//! Staff roles and service category eligibility.

use serde::{Deserialize, Serialize};

/// Role held by a staff member in the external user directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StaffRole {
    Admin,
    Photographer,
    Videography,
    Staff,
}

/// Broad category of a studio service, used for assignment eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceCategory {
    Photography,
    Videography,
}

impl ServiceCategory {
    /// Infers the category from a free-form service type label.
    ///
    /// Anything mentioning video is videography; everything else is treated
    /// as photography, the studio's default line of work.
    pub fn infer(service_type: &str) -> Self {
        if service_type.to_lowercase().contains("video") {
            ServiceCategory::Videography
        } else {
            ServiceCategory::Photography
        }
    }
}

impl StaffRole {
    /// Returns true if this role may fulfil work in the given category.
    ///
    /// Admins can take any assignment; specialists only their own category.
    /// General staff handle neither camera discipline.
    pub fn can_fulfill(&self, category: ServiceCategory) -> bool {
        match self {
            StaffRole::Admin => true,
            StaffRole::Photographer => category == ServiceCategory::Photography,
            StaffRole::Videography => category == ServiceCategory::Videography,
            StaffRole::Staff => false,
        }
    }
}
