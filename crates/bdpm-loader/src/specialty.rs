//! Specialty file decoder.
//!
//! Decodes rows of `CIS_bdpm.txt`.

use bdpm_types::Specialty;
use csv::StringRecord;

use crate::decode::{parse, TsvRecord};
use crate::types::{RegistryResult, SourceKind};

impl TsvRecord for Specialty {
    const COLUMN_COUNT: usize = 12;
    const SOURCE: SourceKind = SourceKind::Specialties;

    fn from_row(row: &StringRecord) -> RegistryResult<Self> {
        Ok(Specialty {
            cis: parse::cis(row.get(0).unwrap_or(""))?,
            name: row.get(1).unwrap_or("").trim().to_string(),
            pharmaceutical_form: row.get(2).unwrap_or("").trim().to_string(),
            administration_routes: row.get(3).unwrap_or("").trim().to_string(),
            authorization_status: row.get(4).unwrap_or("").trim().to_string(),
            procedure_type: row.get(5).unwrap_or("").trim().to_string(),
            marketing_status: row.get(6).unwrap_or("").trim().to_string(),
            authorization_date: parse::optional_date_dmy(row.get(7).unwrap_or(""))?,
            bdm_status: parse::optional_text(row.get(8).unwrap_or("")),
            european_authorization: parse::optional_text(row.get(9).unwrap_or("")),
            holders: row.get(10).unwrap_or("").trim().to_string(),
            enhanced_surveillance: parse::optional_flag(row.get(11).unwrap_or(""))?
                .unwrap_or(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_record(fields: &[&str]) -> StringRecord {
        let mut record = StringRecord::new();
        for field in fields {
            record.push_field(field);
        }
        record
    }

    #[test]
    fn test_decode_specialty_row() {
        let record = make_record(&[
            "60234100",
            "DOLIPRANE 1000 mg, comprimé",
            "comprimé",
            "orale",
            "Autorisation active",
            "Procédure nationale",
            "Commercialisée",
            "22/07/2002",
            "",
            "",
            "SANOFI",
            "Non",
        ]);

        let specialty = Specialty::from_row(&record).unwrap();
        assert_eq!(specialty.cis, 60234100);
        assert_eq!(specialty.name, "DOLIPRANE 1000 mg, comprimé");
        assert_eq!(specialty.pharmaceutical_form, "comprimé");
        assert_eq!(specialty.authorization_date, Some(20020722));
        assert_eq!(specialty.bdm_status, None);
        assert_eq!(specialty.european_authorization, None);
        assert!(!specialty.enhanced_surveillance);
        assert!(specialty.is_authorization_active());
    }

    #[test]
    fn test_decode_enhanced_surveillance() {
        let record = make_record(&[
            "66460334",
            "XARELTO 20 mg, comprimé pelliculé",
            "comprimé pelliculé",
            "orale",
            "Autorisation active",
            "Procédure centralisée",
            "Commercialisée",
            "30/09/2008",
            "Alerte",
            "EU/1/08/472/011",
            "BAYER AG",
            "Oui",
        ]);

        let specialty = Specialty::from_row(&record).unwrap();
        assert!(specialty.enhanced_surveillance);
        assert_eq!(specialty.bdm_status, Some("Alerte".to_string()));
        assert_eq!(
            specialty.european_authorization,
            Some("EU/1/08/472/011".to_string())
        );
    }

    #[test]
    fn test_decode_rejects_bad_cis() {
        let record = make_record(&[
            "not-a-cis",
            "NAME",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        assert!(Specialty::from_row(&record).is_err());
    }

    #[test]
    fn test_decode_rejects_bad_date() {
        let record = make_record(&[
            "60234100",
            "NAME",
            "",
            "",
            "",
            "",
            "",
            "07-22-2002",
            "",
            "",
            "",
            "",
        ]);
        assert!(Specialty::from_row(&record).is_err());
    }

    #[test]
    fn test_decode_empty_date_is_none() {
        let record = make_record(&[
            "60234100",
            "NAME",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
            "",
        ]);
        let specialty = Specialty::from_row(&record).unwrap();
        assert_eq!(specialty.authorization_date, None);
        assert!(!specialty.enhanced_surveillance);
    }
}
