//! Pharmaceutical specialty type.
//!
//! This module provides the `Specialty` struct representing one row of the
//! `CIS_bdpm.txt` registry file.

use crate::CisCode;

/// A pharmaceutical specialty from the BDPM specialty file.
///
/// Represents one row of `CIS_bdpm.txt`. This is the primary registry
/// entity: every other source file references a specialty by its CIS code.
///
/// # Examples
///
/// ```
/// use bdpm_types::Specialty;
///
/// let specialty = Specialty {
///     cis: 60234100,
///     name: "DOLIPRANE 1000 mg, comprimé".to_string(),
///     pharmaceutical_form: "comprimé".to_string(),
///     administration_routes: "orale".to_string(),
///     authorization_status: "Autorisation active".to_string(),
///     procedure_type: "Procédure nationale".to_string(),
///     marketing_status: "Commercialisée".to_string(),
///     authorization_date: Some(20020722),
///     bdm_status: None,
///     european_authorization: None,
///     holders: "SANOFI".to_string(),
///     enhanced_surveillance: false,
/// };
///
/// assert_eq!(specialty.routes(), vec!["orale"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Specialty {
    /// Unique identifier for this specialty (CIS code).
    pub cis: CisCode,
    /// Full registered name, including dosage and form.
    pub name: String,
    /// Pharmaceutical form (tablet, syrup, ...).
    pub pharmaceutical_form: String,
    /// Administration routes, `;`-separated as in the source file.
    pub administration_routes: String,
    /// Marketing-authorization status.
    pub authorization_status: String,
    /// Authorization procedure type (national, centralised, ...).
    pub procedure_type: String,
    /// Marketing status of the specialty itself.
    pub marketing_status: String,
    /// Authorization date in YYYYMMDD format (stored as u32 for efficiency).
    pub authorization_date: Option<u32>,
    /// BDM status annotation (alert, warning), when present.
    pub bdm_status: Option<String>,
    /// European authorization number for centralised procedures.
    pub european_authorization: Option<String>,
    /// Authorization holder names, `;`-separated as in the source file.
    pub holders: String,
    /// Whether the specialty is under enhanced surveillance.
    pub enhanced_surveillance: bool,
}

impl Specialty {
    /// Returns the administration routes as individual entries.
    pub fn routes(&self) -> Vec<&str> {
        self.administration_routes
            .split(';')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .collect()
    }

    /// Returns the authorization holders as individual entries.
    pub fn holder_names(&self) -> Vec<&str> {
        self.holders
            .split(';')
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .collect()
    }

    /// Returns true if the marketing authorization is currently active.
    pub fn is_authorization_active(&self) -> bool {
        self.authorization_status
            .to_lowercase()
            .starts_with("autorisation active")
    }
}
