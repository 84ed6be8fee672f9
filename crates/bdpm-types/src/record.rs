//! Composite specialty record.
//!
//! The linker attaches every child entity to its owning specialty and
//! back-links group memberships, producing one [`SpecialtyRecord`] per
//! specialty. This is the unit served to the external API layer.

use crate::{Composition, CisCode, GroupId, PrescriptionCondition, Presentation, Specialty};

/// A fully cross-referenced specialty with all owned child records.
///
/// Child sequences keep the order they had in their source file; that
/// order is the display order for the served record.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpecialtyRecord {
    /// The specialty itself.
    pub specialty: Specialty,
    /// Active-substance rows owned by this specialty, in source order.
    pub compositions: Vec<Composition>,
    /// Packaging rows owned by this specialty, in source order.
    pub presentations: Vec<Presentation>,
    /// Prescription conditions owned by this specialty, in source order.
    pub conditions: Vec<PrescriptionCondition>,
    /// Generic groups this specialty belongs to (back-reference).
    pub group_ids: Vec<GroupId>,
}

impl SpecialtyRecord {
    /// Creates a record with no children attached yet.
    pub fn new(specialty: Specialty) -> Self {
        Self {
            specialty,
            compositions: Vec::new(),
            presentations: Vec::new(),
            conditions: Vec::new(),
            group_ids: Vec::new(),
        }
    }

    /// Returns the CIS code of the underlying specialty.
    pub fn cis(&self) -> CisCode {
        self.specialty.cis
    }

    /// Returns true if this specialty belongs to the given group.
    pub fn in_group(&self, group_id: GroupId) -> bool {
        self.group_ids.contains(&group_id)
    }
}
