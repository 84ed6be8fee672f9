//! Generic-equivalence group types.
//!
//! The generic-group source file (`CIS_GENER_bdpm.txt`) is row-per-member:
//! each row names a group, one member specialty, and the member's role.
//! [`GenericRow`] is the raw decoded row; [`GenericGroup`] is the resolved
//! group produced by the linker once members have been cross-referenced
//! against the specialty table.
//!
//! The source format carries the group identifier twice on every row, in
//! the leading and trailing column. The two occurrences are kept separate
//! on the raw row so the decoder can validate them against each other
//! instead of trusting either one blindly.

use crate::{CisCode, GroupId, MemberRole};

/// A raw row from the generic-group source file.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericRow {
    /// Group identifier, leading occurrence.
    pub group_id: GroupId,
    /// Display label of the group.
    pub label: String,
    /// CIS code of the member specialty.
    pub cis: CisCode,
    /// Numeric role code of the member (see [`MemberRole`]).
    pub role_code: u8,
    /// Sort index of the member within the group.
    pub sort_index: u32,
    /// Group identifier, trailing occurrence.
    pub group_id_trailing: GroupId,
}

impl GenericRow {
    /// Returns true if the two group-identifier occurrences agree.
    pub fn ids_consistent(&self) -> bool {
        self.group_id == self.group_id_trailing
    }

    /// Returns the member role enum value.
    ///
    /// Returns `None` if the role code is not recognized.
    pub fn role(&self) -> Option<MemberRole> {
        MemberRole::from_code(self.role_code)
    }
}

/// One resolved member of a generic group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GroupMember {
    /// CIS code of the member specialty.
    pub cis: CisCode,
    /// Role of the member within the group.
    pub role: MemberRole,
    /// Sort index of the member within the group.
    pub sort_index: u32,
}

/// A resolved generic-equivalence group.
///
/// Built by the linker from the valid group-source rows; every member CIS
/// is guaranteed to exist in the specialty table of the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericGroup {
    /// Unique group identifier.
    pub id: GroupId,
    /// Display label, taken from the first source row of the group.
    pub label: String,
    /// Members in source-row order.
    pub members: Vec<GroupMember>,
}

impl GenericGroup {
    /// Returns the members flagged as reference products.
    pub fn reference_members(&self) -> impl Iterator<Item = &GroupMember> {
        self.members
            .iter()
            .filter(|m| m.role == MemberRole::Reference)
    }

    /// Returns true if a specialty is a member of this group.
    pub fn contains(&self, cis: CisCode) -> bool {
        self.members.iter().any(|m| m.cis == cis)
    }
}
