//! BDPM identifier types.
//!
//! This module provides type aliases for the identifier codes used across
//! the registry files. They are registry codes, not ordinal positions.

/// A CIS code (Code Identifiant de Spécialité).
///
/// CIS codes are 8-digit integers that uniquely identify a pharmaceutical
/// specialty across every BDPM source file.
///
/// # Examples
///
/// ```
/// use bdpm_types::CisCode;
///
/// let doliprane: CisCode = 60234100;
/// ```
pub type CisCode = u64;

/// A generic-group identifier from the generic-equivalence source file.
pub type GroupId = u64;

/// A 13-digit CIP presentation code (long form).
pub type Cip13 = u64;

/// A 7-digit CIP presentation code (short, historical form).
pub type Cip7 = u32;
