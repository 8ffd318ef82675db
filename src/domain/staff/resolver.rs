//! Assignment eligibility resolution.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode, StaffId};
use crate::ports::StaffDirectory;

use super::{ServiceCategory, StaffRole};

/// Directory projection of a staff member, as assignment needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub id: StaffId,
    pub role: StaffRole,
    pub is_active: bool,
}

/// Resolves whether a staff member may be assigned work in a category.
///
/// Pure policy over the directory port: existence, activity, then role
/// eligibility, in that order.
pub struct AssignmentResolver {
    directory: Arc<dyn StaffDirectory>,
}

impl AssignmentResolver {
    pub fn new(directory: Arc<dyn StaffDirectory>) -> Self {
        Self { directory }
    }

    /// Resolves `staff_id` for work in `category`.
    ///
    /// # Errors
    ///
    /// - `StaffNotFound` if the directory has no such member
    /// - `IneligibleAssignee` if the member is inactive or their role
    ///   cannot fulfil the category
    pub async fn resolve(
        &self,
        category: ServiceCategory,
        staff_id: &StaffId,
    ) -> Result<StaffProfile, DomainError> {
        let profile = self
            .directory
            .get(staff_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::StaffNotFound,
                    format!("Staff member {} not found", staff_id),
                )
            })?;

        if !profile.is_active {
            return Err(DomainError::new(
                ErrorCode::IneligibleAssignee,
                format!("Staff member {} is not active", staff_id),
            ));
        }
        if !profile.role.can_fulfill(category) {
            return Err(DomainError::new(
                ErrorCode::IneligibleAssignee,
                format!(
                    "Staff member {} cannot fulfil {:?} work",
                    staff_id, category
                ),
            ));
        }

        Ok(profile)
    }
}
