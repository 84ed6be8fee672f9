//! Composition file decoder.
//!
//! Decodes rows of `CIS_COMPO_bdpm.txt`.

use bdpm_types::Composition;
use csv::StringRecord;

use crate::decode::{parse, TsvRecord};
use crate::types::{RegistryResult, SourceKind};

impl TsvRecord for Composition {
    const COLUMN_COUNT: usize = 8;
    const SOURCE: SourceKind = SourceKind::Compositions;

    fn from_row(row: &StringRecord) -> RegistryResult<Self> {
        Ok(Composition {
            cis: parse::cis(row.get(0).unwrap_or(""))?,
            pharmaceutical_element: row.get(1).unwrap_or("").trim().to_string(),
            substance_code: parse::integer(row.get(2).unwrap_or(""))?,
            substance_name: row.get(3).unwrap_or("").trim().to_string(),
            dosage: row.get(4).unwrap_or("").trim().to_string(),
            dosage_reference: row.get(5).unwrap_or("").trim().to_string(),
            nature: row.get(6).unwrap_or("").trim().to_string(),
            linkage: parse::optional_integer(row.get(7).unwrap_or(""))?,
        })
    }
}
