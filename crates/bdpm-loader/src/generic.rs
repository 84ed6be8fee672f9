//! Generic-group file decoder.
//!
//! Decodes rows of `CIS_GENER_bdpm.txt`. The upstream format repeats the
//! group identifier in the leading and trailing column of every row; the
//! two occurrences are validated against each other and a mismatch rejects
//! the row rather than trusting either occurrence.

use bdpm_types::{GenericRow, MemberRole};
use csv::StringRecord;

use crate::decode::{parse, TsvRecord};
use crate::types::{RegistryError, RegistryResult, SourceKind};

impl TsvRecord for GenericRow {
    const COLUMN_COUNT: usize = 6;
    const SOURCE: SourceKind = SourceKind::Groups;

    fn from_row(row: &StringRecord) -> RegistryResult<Self> {
        let role_field = row.get(3).unwrap_or("");
        let role_code: u8 = parse::integer(role_field)?;
        if MemberRole::from_code(role_code).is_none() {
            return Err(RegistryError::InvalidRole {
                value: role_field.to_string(),
            });
        }

        let decoded = GenericRow {
            group_id: parse::integer(row.get(0).unwrap_or(""))?,
            label: row.get(1).unwrap_or("").trim().to_string(),
            cis: parse::cis(row.get(2).unwrap_or(""))?,
            role_code,
            sort_index: parse::integer(row.get(4).unwrap_or(""))?,
            group_id_trailing: parse::integer(row.get(5).unwrap_or(""))?,
        };

        if !decoded.ids_consistent() {
            return Err(RegistryError::GroupIdMismatch {
                leading: decoded.group_id,
                trailing: decoded.group_id_trailing,
            });
        }

        Ok(decoded)
    }
}
