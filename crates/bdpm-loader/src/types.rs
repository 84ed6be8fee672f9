//! Loader-specific types for BDPM file processing.

use bdpm_types::{CisCode, GroupId};
use thiserror::Error;

/// The five BDPM source files, used to label errors and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// Specialty file (`CIS_bdpm.txt`).
    Specialties,
    /// Composition file (`CIS_COMPO_bdpm.txt`).
    Compositions,
    /// Presentation file (`CIS_CIP_bdpm.txt`).
    Presentations,
    /// Prescription-condition file (`CIS_CPD_bdpm.txt`).
    Conditions,
    /// Generic-group file (`CIS_GENER_bdpm.txt`).
    Groups,
}

impl SourceKind {
    /// All five sources, in the order a refresh cycle acquires them.
    pub const ALL: [SourceKind; 5] = [
        SourceKind::Specialties,
        SourceKind::Compositions,
        SourceKind::Presentations,
        SourceKind::Conditions,
        SourceKind::Groups,
    ];

    /// Conventional file name of this source in a BDPM distribution.
    pub fn file_name(self) -> &'static str {
        match self {
            SourceKind::Specialties => "CIS_bdpm.txt",
            SourceKind::Compositions => "CIS_COMPO_bdpm.txt",
            SourceKind::Presentations => "CIS_CIP_bdpm.txt",
            SourceKind::Conditions => "CIS_CPD_bdpm.txt",
            SourceKind::Groups => "CIS_GENER_bdpm.txt",
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SourceKind::Specialties => "specialties",
            SourceKind::Compositions => "compositions",
            SourceKind::Presentations => "presentations",
            SourceKind::Conditions => "conditions",
            SourceKind::Groups => "generic groups",
        };
        f.write_str(name)
    }
}

/// Errors that can occur while decoding, loading, or linking BDPM files.
///
/// Row-level variants (invalid values, column counts, mismatched group ids)
/// are recorded as [`RowReject`]s and never abort a load on their own.
/// Structural variants (`EmptySource`, `GarbledSource`, `DuplicateCis`)
/// abort the refresh cycle.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// I/O error reading a source.
    #[error("IO error reading BDPM source: {0}")]
    Io(#[from] std::io::Error),

    /// CSV-level parsing error.
    #[error("TSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Invalid CIS code format.
    #[error("Invalid CIS code: {value}")]
    InvalidCis {
        /// The invalid value that was encountered.
        value: String,
    },

    /// Invalid numeric value.
    #[error("Invalid numeric value: {value}")]
    InvalidNumber {
        /// The invalid numeric value.
        value: String,
    },

    /// Invalid date format (expected dd/mm/yyyy).
    #[error("Invalid date format: {value} (expected dd/mm/yyyy)")]
    InvalidDate {
        /// The invalid date value.
        value: String,
    },

    /// Invalid oui/non flag value.
    #[error("Invalid flag value: {value} (expected oui or non)")]
    InvalidFlag {
        /// The invalid flag value.
        value: String,
    },

    /// Invalid generic-group member role code.
    #[error("Invalid member role code: {value}")]
    InvalidRole {
        /// The invalid role code.
        value: String,
    },

    /// A row carried fewer columns than its layout requires.
    #[error("Row has {found} columns, expected at least {expected}")]
    ColumnCount {
        /// Expected column count.
        expected: usize,
        /// Found column count.
        found: usize,
    },

    /// The duplicated group-identifier columns of a group-source row disagree.
    #[error("Group id mismatch in group-source row: leading {leading}, trailing {trailing}")]
    GroupIdMismatch {
        /// Group id in the leading column.
        leading: GroupId,
        /// Group id in the trailing column.
        trailing: GroupId,
    },

    /// A source stream contained no rows at all.
    #[error("Source {kind} is empty")]
    EmptySource {
        /// The empty source.
        kind: SourceKind,
    },

    /// A source rejected enough rows to indicate format drift rather than
    /// isolated corruption.
    #[error("Source {kind} is garbled: {rejected} of {total} rows rejected")]
    GarbledSource {
        /// The garbled source.
        kind: SourceKind,
        /// Number of rejected rows.
        rejected: usize,
        /// Total number of rows read.
        total: usize,
    },

    /// The specialty file contained the same CIS code twice.
    #[error("Duplicate CIS code in specialty file: {cis}")]
    DuplicateCis {
        /// The duplicated CIS code.
        cis: CisCode,
    },
}

/// Result type for loader operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// One rejected source row, with its position and the reason it was refused.
#[derive(Debug)]
pub struct RowReject {
    /// 1-based row number within the source.
    pub line: u64,
    /// Why the row was rejected.
    pub reason: RegistryError,
}

/// Raw byte content of the five sources, as acquired for one refresh cycle.
#[derive(Debug, Default)]
pub struct RawSources {
    /// Specialty file content.
    pub specialties: Vec<u8>,
    /// Composition file content.
    pub compositions: Vec<u8>,
    /// Presentation file content.
    pub presentations: Vec<u8>,
    /// Prescription-condition file content.
    pub conditions: Vec<u8>,
    /// Generic-group file content.
    pub groups: Vec<u8>,
}
