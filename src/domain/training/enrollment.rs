//! Enrollment aggregate entity.
//!
//! Tracks a prospective student from application through admission to a
//! cohort seat. The seat counter on the referenced cohort moves only in the
//! same atomic unit as this entity's status (enforced at the repository).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    CohortId, ContactInfo, DomainError, EnrollmentId, ErrorCode, StaffId, StateMachine, Timestamp,
};

use super::EnrollmentStatus;

/// A student's application and enrollment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enrollment {
    id: EnrollmentId,
    contact: ContactInfo,
    experience_level: Option<String>,
    has_own_camera: bool,
    learning_goals: Option<String>,
    preferred_intake: Option<String>,
    cohort_id: Option<CohortId>,
    status: EnrollmentStatus,
    registration_fee_paid: bool,
    payment_reference: Option<String>,
    reviewed_by: Option<StaffId>,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl Enrollment {
    /// Creates a new pending application. No cohort reference yet.
    pub fn new(id: EnrollmentId, contact: ContactInfo) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            contact,
            experience_level: None,
            has_own_camera: false,
            learning_goals: None,
            preferred_intake: None,
            cohort_id: None,
            status: EnrollmentStatus::Pending,
            registration_fee_paid: false,
            payment_reference: None,
            reviewed_by: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Reconstitutes an enrollment from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: EnrollmentId,
        contact: ContactInfo,
        experience_level: Option<String>,
        has_own_camera: bool,
        learning_goals: Option<String>,
        preferred_intake: Option<String>,
        cohort_id: Option<CohortId>,
        status: EnrollmentStatus,
        registration_fee_paid: bool,
        payment_reference: Option<String>,
        reviewed_by: Option<StaffId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            contact,
            experience_level,
            has_own_camera,
            learning_goals,
            preferred_intake,
            cohort_id,
            status,
            registration_fee_paid,
            payment_reference,
            reviewed_by,
            created_at,
            updated_at,
        }
    }

    /// Sets the applicant's experience level at intake.
    pub fn with_experience_level(mut self, level: Option<String>) -> Self {
        self.experience_level = level;
        self
    }

    /// Records whether the applicant owns a camera.
    pub fn with_own_camera(mut self, has_own_camera: bool) -> Self {
        self.has_own_camera = has_own_camera;
        self
    }

    /// Sets the applicant's learning goals at intake.
    pub fn with_learning_goals(mut self, goals: Option<String>) -> Self {
        self.learning_goals = goals;
        self
    }

    /// Sets the applicant's preferred intake at submission.
    pub fn with_preferred_intake(mut self, intake: Option<String>) -> Self {
        self.preferred_intake = intake;
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &EnrollmentId {
        &self.id
    }

    pub fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    pub fn experience_level(&self) -> Option<&str> {
        self.experience_level.as_deref()
    }

    pub fn has_own_camera(&self) -> bool {
        self.has_own_camera
    }

    pub fn learning_goals(&self) -> Option<&str> {
        self.learning_goals.as_deref()
    }

    pub fn preferred_intake(&self) -> Option<&str> {
        self.preferred_intake.as_deref()
    }

    pub fn cohort_id(&self) -> Option<&CohortId> {
        self.cohort_id.as_ref()
    }

    pub fn status(&self) -> EnrollmentStatus {
        self.status
    }

    pub fn registration_fee_paid(&self) -> bool {
        self.registration_fee_paid
    }

    pub fn payment_reference(&self) -> Option<&str> {
        self.payment_reference.as_deref()
    }

    pub fn reviewed_by(&self) -> Option<&StaffId> {
        self.reviewed_by.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if this record consumes a seat in its cohort.
    pub fn consumes_seat(&self) -> bool {
        self.status.consumes_seat()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Arranges an admission interview.
    pub fn schedule_interview(&mut self, reviewer: StaffId) -> Result<(), DomainError> {
        self.transition(EnrollmentStatus::InterviewScheduled, "schedule an interview for")?;
        self.reviewed_by = Some(reviewer);
        Ok(())
    }

    /// Approves the application. Does not consume a seat.
    pub fn accept_application(&mut self, reviewer: StaffId) -> Result<(), DomainError> {
        self.transition(EnrollmentStatus::Accepted, "accept")?;
        self.reviewed_by = Some(reviewer);
        Ok(())
    }

    /// Declines the application.
    pub fn reject_application(&mut self, reviewer: StaffId) -> Result<(), DomainError> {
        self.transition(EnrollmentStatus::Rejected, "reject")?;
        self.reviewed_by = Some(reviewer);
        Ok(())
    }

    /// Places the accepted student in a cohort.
    ///
    /// The repository commits this status change and the cohort's seat
    /// increment as one atomic unit.
    pub fn enroll(&mut self, cohort_id: CohortId) -> Result<(), DomainError> {
        self.transition(EnrollmentStatus::Enrolled, "enroll")?;
        self.cohort_id = Some(cohort_id);
        Ok(())
    }

    /// Withdraws an enrolled student, releasing their seat.
    pub fn withdraw(&mut self) -> Result<(), DomainError> {
        self.transition(EnrollmentStatus::Withdrawn, "withdraw")
    }

    /// Marks an enrolled student as having completed the programme.
    ///
    /// The seat stays counted against historical capacity.
    pub fn complete_training(&mut self) -> Result<(), DomainError> {
        self.transition(EnrollmentStatus::Completed, "complete")
    }

    /// Records a registration fee payment reference. Never validated here.
    pub fn record_payment(&mut self, reference: Option<String>) {
        self.registration_fee_paid = true;
        self.payment_reference = reference;
        self.updated_at = Timestamp::now();
    }

    fn transition(&mut self, target: EnrollmentStatus, verb: &str) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidTransition,
                format!("Cannot {} an enrollment in state {:?}", verb, self.status),
            )
        })?;
        self.updated_at = Timestamp::now();
        Ok(())
    }
}
