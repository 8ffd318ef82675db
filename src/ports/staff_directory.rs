//! Staff directory lookup port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, StaffId};
use crate::domain::staff::StaffProfile;

/// Read port over the staff/user directory.
///
/// The directory itself is owned by the identity system; this port exposes
/// just what assignment resolution needs.
#[async_trait]
pub trait StaffDirectory: Send + Sync {
    /// Look up a staff member's profile. Returns `None` if no such member.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on read failure
    async fn get(&self, id: &StaffId) -> Result<Option<StaffProfile>, DomainError>;
}
