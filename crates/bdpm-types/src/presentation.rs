//! Presentation (packaging) type.
//!
//! One row of `CIS_CIP_bdpm.txt`: a commercial packaging of a specialty,
//! identified by its CIP code in both the 7-digit historical form and the
//! 13-digit form.

use crate::{Cip13, Cip7, CisCode};

/// A packaging/commercial-form line item belonging to a specialty.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Presentation {
    /// CIS code of the owning specialty.
    pub cis: CisCode,
    /// 7-digit CIP code (short form).
    pub cip7: Cip7,
    /// Packaging label ("plaquette(s) PVC PVDC aluminium de 14 comprimé(s)").
    pub label: String,
    /// Administrative status of the presentation.
    pub administrative_status: String,
    /// Marketing status of the presentation.
    pub marketing_status: String,
    /// Marketing declaration date in YYYYMMDD format.
    pub declaration_date: Option<u32>,
    /// 13-digit CIP code (long form); absent on some historical rows.
    pub cip13: Option<Cip13>,
    /// Whether the presentation is approved for institutional use
    /// ("agrément aux collectivités").
    pub institutional_agreement: Option<bool>,
    /// Reimbursement rate, free text as published ("65 %").
    pub reimbursement_rate: Option<String>,
    /// Price including taxes, free text as published ("2,18").
    pub price: Option<String>,
}

impl Presentation {
    /// Returns true if the presentation is currently marketed.
    pub fn is_marketed(&self) -> bool {
        self.marketing_status
            .to_lowercase()
            .starts_with("déclaration de commercialisation")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_presentation() -> Presentation {
        Presentation {
            cis: 61266250,
            cip7: 3234011,
            label: "plaquette(s) PVC PVDC aluminium de 12 gélule(s)".to_string(),
            administrative_status: "Présentation active".to_string(),
            marketing_status: "Déclaration de commercialisation".to_string(),
            declaration_date: Some(19870413),
            cip13: Some(3400932340118),
            institutional_agreement: Some(true),
            reimbursement_rate: Some("65 %".to_string()),
            price: Some("2,18".to_string()),
        }
    }

    #[test]
    fn test_is_marketed() {
        let presentation = make_presentation();
        assert!(presentation.is_marketed());

        let stopped = Presentation {
            marketing_status: "Arrêt de commercialisation".to_string(),
            ..presentation
        };
        assert!(!stopped.is_marketed());
    }

    #[test]
    fn test_optional_fields_absent() {
        let presentation = Presentation {
            declaration_date: None,
            cip13: None,
            institutional_agreement: None,
            reimbursement_rate: None,
            price: None,
            ..make_presentation()
        };

        assert_eq!(presentation.cip13, None);
        assert_eq!(presentation.reimbursement_rate, None);
    }
}
