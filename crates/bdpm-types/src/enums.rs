//! BDPM enumeration types.
//!
//! This module provides enum representations for the coded values carried
//! by the registry files: generic-group member roles and composition
//! component natures.

/// Role of a specialty inside a generic-equivalence group.
///
/// The generic-group source file tags each member with a numeric role code.
///
/// # Examples
///
/// ```
/// use bdpm_types::MemberRole;
///
/// let role = MemberRole::from_code(0);
/// assert_eq!(role, Some(MemberRole::Reference));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberRole {
    /// Reference product ("princeps").
    Reference,
    /// Generic of the reference product.
    Generic,
    /// Generic by posology equivalence.
    PosologyEquivalent,
    /// Substitutable generic.
    Substitutable,
}

impl MemberRole {
    /// Source code for the reference product.
    pub const REFERENCE_CODE: u8 = 0;
    /// Source code for a generic.
    pub const GENERIC_CODE: u8 = 1;
    /// Source code for a generic by posology equivalence.
    pub const POSOLOGY_EQUIVALENT_CODE: u8 = 2;
    /// Source code for a substitutable generic.
    pub const SUBSTITUTABLE_CODE: u8 = 4;

    /// Creates a MemberRole from its source code.
    ///
    /// Returns `None` if the code doesn't match a known role.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            Self::REFERENCE_CODE => Some(Self::Reference),
            Self::GENERIC_CODE => Some(Self::Generic),
            Self::POSOLOGY_EQUIVALENT_CODE => Some(Self::PosologyEquivalent),
            Self::SUBSTITUTABLE_CODE => Some(Self::Substitutable),
            _ => None,
        }
    }

    /// Returns the source code for this role.
    pub fn to_code(self) -> u8 {
        match self {
            Self::Reference => Self::REFERENCE_CODE,
            Self::Generic => Self::GENERIC_CODE,
            Self::PosologyEquivalent => Self::POSOLOGY_EQUIVALENT_CODE,
            Self::Substitutable => Self::SUBSTITUTABLE_CODE,
        }
    }
}

/// Nature of a composition component.
///
/// Distinguishes the active substance itself (`SA`) from its therapeutic
/// fraction (`FT`) when the two differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ComponentNature {
    /// Active substance.
    ActiveSubstance,
    /// Therapeutic fraction of the active substance.
    TherapeuticFraction,
}

impl ComponentNature {
    /// Source code for an active substance.
    pub const ACTIVE_SUBSTANCE_CODE: &'static str = "SA";
    /// Source code for a therapeutic fraction.
    pub const THERAPEUTIC_FRACTION_CODE: &'static str = "FT";

    /// Creates a ComponentNature from its source code.
    ///
    /// Returns `None` if the code doesn't match a known nature.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            Self::ACTIVE_SUBSTANCE_CODE => Some(Self::ActiveSubstance),
            Self::THERAPEUTIC_FRACTION_CODE => Some(Self::TherapeuticFraction),
            _ => None,
        }
    }

    /// Returns the source code for this nature.
    pub fn to_code(self) -> &'static str {
        match self {
            Self::ActiveSubstance => Self::ACTIVE_SUBSTANCE_CODE,
            Self::TherapeuticFraction => Self::THERAPEUTIC_FRACTION_CODE,
        }
    }
}
