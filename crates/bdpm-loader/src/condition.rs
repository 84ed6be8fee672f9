//! Prescription-condition file decoder.
//!
//! Decodes rows of `CIS_CPD_bdpm.txt`.

use bdpm_types::PrescriptionCondition;
use csv::StringRecord;

use crate::decode::{parse, TsvRecord};
use crate::types::{RegistryResult, SourceKind};

impl TsvRecord for PrescriptionCondition {
    const COLUMN_COUNT: usize = 2;
    const SOURCE: SourceKind = SourceKind::Conditions;

    fn from_row(row: &StringRecord) -> RegistryResult<Self> {
        Ok(PrescriptionCondition {
            cis: parse::cis(row.get(0).unwrap_or(""))?,
            text: row.get(1).unwrap_or("").trim().to_string(),
        })
    }
}
