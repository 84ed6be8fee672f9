//! Composition (active substance) type.
//!
//! One row of `CIS_COMPO_bdpm.txt`: a single active-substance line item
//! belonging to a specialty. A specialty with several ingredients has one
//! composition row per ingredient, tied together by the linkage number.

use crate::{CisCode, ComponentNature};

/// An active-substance line item belonging to a specialty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Composition {
    /// CIS code of the owning specialty.
    pub cis: CisCode,
    /// Pharmaceutical element the substance applies to (tablet, coating, ...).
    pub pharmaceutical_element: String,
    /// Registry code of the active substance.
    pub substance_code: u64,
    /// Name of the active substance.
    pub substance_name: String,
    /// Dosage expression, free text ("500 mg", "1000 UI/ml", ...).
    pub dosage: String,
    /// What the dosage is expressed relative to ("un comprimé", ...).
    pub dosage_reference: String,
    /// Component nature code, `SA` or `FT` in the source.
    pub nature: String,
    /// Linkage number grouping SA/FT rows of the same ingredient.
    pub linkage: Option<u32>,
}

impl Composition {
    /// Returns the component nature enum value.
    ///
    /// Returns `None` if the nature code is not recognized.
    pub fn component_nature(&self) -> Option<ComponentNature> {
        ComponentNature::from_code(&self.nature)
    }

    /// Returns true if this row describes an active substance (`SA`).
    pub fn is_active_substance(&self) -> bool {
        self.component_nature() == Some(ComponentNature::ActiveSubstance)
    }
}
