//! Presentation file decoder.
//!
//! Decodes rows of `CIS_CIP_bdpm.txt`.

use bdpm_types::Presentation;
use csv::StringRecord;

use crate::decode::{parse, TsvRecord};
use crate::types::{RegistryResult, SourceKind};

impl TsvRecord for Presentation {
    const COLUMN_COUNT: usize = 10;
    const SOURCE: SourceKind = SourceKind::Presentations;

    fn from_row(row: &StringRecord) -> RegistryResult<Self> {
        Ok(Presentation {
            cis: parse::cis(row.get(0).unwrap_or(""))?,
            cip7: parse::integer(row.get(1).unwrap_or(""))?,
            label: row.get(2).unwrap_or("").trim().to_string(),
            administrative_status: row.get(3).unwrap_or("").trim().to_string(),
            marketing_status: row.get(4).unwrap_or("").trim().to_string(),
            declaration_date: parse::optional_date_dmy(row.get(5).unwrap_or(""))?,
            cip13: parse::optional_integer(row.get(6).unwrap_or(""))?,
            institutional_agreement: parse::optional_flag(row.get(7).unwrap_or(""))?,
            reimbursement_rate: parse::optional_text(row.get(8).unwrap_or("")),
            price: parse::optional_text(row.get(9).unwrap_or("")),
        })
    }
}
