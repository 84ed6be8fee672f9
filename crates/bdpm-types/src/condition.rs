//! Prescription-condition type.
//!
//! One row of `CIS_CPD_bdpm.txt`: a free-text prescription restriction
//! attached to a specialty ("liste I", "prescription hospitalière", ...).

use crate::CisCode;

/// A prescription-restriction note belonging to a specialty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrescriptionCondition {
    /// CIS code of the owning specialty.
    pub cis: CisCode,
    /// Free-text condition as published.
    pub text: String,
}
