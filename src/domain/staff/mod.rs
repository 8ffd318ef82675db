//! Staff - role eligibility and assignment resolution.
//!
//! The user directory itself is external; the core only reads role and
//! active status through `crate::ports::StaffDirectory`.

mod resolver;
mod role;

pub use resolver::{AssignmentResolver, StaffProfile};
pub use role::{ServiceCategory, StaffRole};
