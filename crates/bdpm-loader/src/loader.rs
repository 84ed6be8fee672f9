//! Entity loaders.
//!
//! An entity loader runs one source end-to-end through its row decoder,
//! producing the ordered valid records plus the rejected rows with reasons.
//! A minority of bad rows never fails the load; an empty or systematically
//! malformed stream does, as a structural error distinct from row rejects.

use std::collections::HashMap;
use std::io::Read;

use bdpm_types::CisCode;

#[cfg(feature = "parallel")]
use csv::StringRecord;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::decode::{decode_text, TsvDecoder, TsvRecord};
#[cfg(feature = "parallel")]
use crate::decode::decode_row;
use crate::types::{
    RawSources, RegistryError, RegistryResult, RowReject,
};

use bdpm_types::{Composition, GenericRow, PrescriptionCondition, Presentation, Specialty};

/// Reject ratio above which a source is considered garbled.
const MAX_REJECT_RATIO: f64 = 0.5;
/// Minimum row count before the reject ratio is meaningful.
const MIN_ROWS_FOR_RATIO: usize = 10;

/// The outcome of loading one source: accepted records in source order,
/// plus every rejected row with its reason.
#[derive(Debug)]
pub struct Loaded<T> {
    /// Valid records, in the order they appeared in the source.
    pub records: Vec<T>,
    /// Rejected rows with positions and reasons.
    pub rejects: Vec<RowReject>,
}

impl<T> Loaded<T> {
    /// Number of accepted records.
    pub fn accepted(&self) -> usize {
        self.records.len()
    }

    /// Number of rejected rows.
    pub fn rejected(&self) -> usize {
        self.rejects.len()
    }
}

/// Loads one source end-to-end through its row decoder.
///
/// # Errors
///
/// Returns a structural error if the stream holds no rows at all, if no
/// row decodes, or if the reject ratio indicates format drift.
pub fn load_source<T: TsvRecord, R: Read>(reader: R) -> RegistryResult<Loaded<T>> {
    let mut decoder = TsvDecoder::<R, T>::new(reader);
    let mut records = Vec::new();
    let mut rejects = Vec::new();

    while let Some(result) = decoder.next() {
        match result {
            Ok(record) => records.push(record),
            Err(reason) => rejects.push(RowReject {
                line: decoder.line(),
                reason,
            }),
        }
    }

    check_structure::<T>(records, rejects)
}

/// Loads one source with row decoding parallelized across lines.
///
/// Reads the whole source into memory first; useful for the larger BDPM
/// files on multi-core machines. Record and reject ordering matches the
/// sequential loader.
#[cfg(feature = "parallel")]
pub fn load_source_parallel<T: TsvRecord + Send>(content: &str) -> RegistryResult<Loaded<T>> {
    let results: Vec<(u64, RegistryResult<T>)> = content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .into_par_iter()
        .map(|(idx, line)| {
            let record = StringRecord::from(line.split('\t').collect::<Vec<_>>());
            (idx as u64 + 1, decode_row::<T>(&record))
        })
        .collect();

    let mut records = Vec::new();
    let mut rejects = Vec::new();
    for (line, result) in results {
        match result {
            Ok(record) => records.push(record),
            Err(reason) => rejects.push(RowReject { line, reason }),
        }
    }

    check_structure::<T>(records, rejects)
}

/// Applies the structural acceptance rules shared by both loaders.
fn check_structure<T: TsvRecord>(
    records: Vec<T>,
    rejects: Vec<RowReject>,
) -> RegistryResult<Loaded<T>> {
    let total = records.len() + rejects.len();

    if total == 0 {
        return Err(RegistryError::EmptySource { kind: T::SOURCE });
    }
    if records.is_empty() {
        return Err(RegistryError::GarbledSource {
            kind: T::SOURCE,
            rejected: rejects.len(),
            total,
        });
    }
    if total >= MIN_ROWS_FOR_RATIO && rejects.len() as f64 / total as f64 > MAX_REJECT_RATIO {
        return Err(RegistryError::GarbledSource {
            kind: T::SOURCE,
            rejected: rejects.len(),
            total,
        });
    }

    if !rejects.is_empty() {
        tracing::debug!(
            source = %T::SOURCE,
            accepted = records.len(),
            rejected = rejects.len(),
            "source loaded with row rejects"
        );
    }

    Ok(Loaded { records, rejects })
}

/// Builds the side-index from CIS code to record positions.
///
/// Index-first, scan-second: the linker looks children up through maps
/// like this one instead of rescanning the record sequence per lookup.
pub fn index_by_cis<T>(records: &[T], key: impl Fn(&T) -> CisCode) -> HashMap<CisCode, Vec<usize>> {
    let mut index: HashMap<CisCode, Vec<usize>> = HashMap::new();
    for (position, record) in records.iter().enumerate() {
        index.entry(key(record)).or_default().push(position);
    }
    index
}

/// All five sources loaded for one refresh cycle, awaiting linkage.
#[derive(Debug)]
pub struct LoadedSources {
    /// Loaded specialty file.
    pub specialties: Loaded<Specialty>,
    /// Loaded composition file.
    pub compositions: Loaded<Composition>,
    /// Loaded presentation file.
    pub presentations: Loaded<Presentation>,
    /// Loaded prescription-condition file.
    pub conditions: Loaded<PrescriptionCondition>,
    /// Loaded generic-group file.
    pub groups: Loaded<GenericRow>,
}

impl LoadedSources {
    /// Total accepted records across all five sources.
    pub fn total_accepted(&self) -> usize {
        self.specialties.accepted()
            + self.compositions.accepted()
            + self.presentations.accepted()
            + self.conditions.accepted()
            + self.groups.accepted()
    }

    /// Total rejected rows across all five sources.
    pub fn total_rejected(&self) -> usize {
        self.specialties.rejected()
            + self.compositions.rejected()
            + self.presentations.rejected()
            + self.conditions.rejected()
            + self.groups.rejected()
    }
}

/// Loads all five sources from their raw byte content.
///
/// Text is decoded leniently (UTF-8 with Latin-1 fallback) before row
/// decoding; any structural failure on any source fails the whole load.
pub fn load_all(raw: &RawSources) -> RegistryResult<LoadedSources> {
    let specialties = load_source(decode_text(&raw.specialties).as_bytes())?;
    let compositions = load_source(decode_text(&raw.compositions).as_bytes())?;
    let presentations = load_source(decode_text(&raw.presentations).as_bytes())?;
    let conditions = load_source(decode_text(&raw.conditions).as_bytes())?;
    let groups = load_source(decode_text(&raw.groups).as_bytes())?;

    Ok(LoadedSources {
        specialties,
        compositions,
        presentations,
        conditions,
        groups,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SourceKind;

    const CONDITIONS_OK: &str = "61266250\tliste I\n60234100\tliste II\n";

    #[test]
    fn test_load_source_accepts_valid_rows() {
        let loaded =
            load_source::<PrescriptionCondition, _>(CONDITIONS_OK.as_bytes()).unwrap();
        assert_eq!(loaded.accepted(), 2);
        assert_eq!(loaded.rejected(), 0);
        assert_eq!(loaded.records[0].cis, 61266250);
        assert_eq!(loaded.records[1].text, "liste II");
    }

    #[test]
    fn test_load_source_tolerates_minority_rejects() {
        // One corrupted row among valid ones: N accepted, exactly one reject.
        let content = "61266250\tliste I\nbad-cis\tliste I\n60234100\tliste II\n";
        let loaded = load_source::<PrescriptionCondition, _>(content.as_bytes()).unwrap();

        assert_eq!(loaded.accepted(), 2);
        assert_eq!(loaded.rejected(), 1);
        assert_eq!(loaded.rejects[0].line, 2);
        assert!(matches!(
            loaded.rejects[0].reason,
            RegistryError::InvalidCis { .. }
        ));
    }

    #[test]
    fn test_load_source_empty_is_structural() {
        let err = load_source::<PrescriptionCondition, _>("".as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::EmptySource {
                kind: SourceKind::Conditions
            }
        ));
    }

    #[test]
    fn test_load_source_all_rows_bad_is_structural() {
        let content = "x\ty\nz\tw\n";
        // Conditions layout needs a numeric CIS in column 0.
        let err = load_source::<PrescriptionCondition, _>(content.as_bytes()).unwrap_err();
        assert!(matches!(err, RegistryError::GarbledSource { .. }));
    }

    #[test]
    fn test_load_source_majority_bad_is_structural() {
        let mut content = String::new();
        for _ in 0..4 {
            content.push_str("61266250\tliste I\n");
        }
        for _ in 0..8 {
            content.push_str("bad\tliste I\n");
        }
        let err = load_source::<PrescriptionCondition, _>(content.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::GarbledSource {
                rejected: 8,
                total: 12,
                ..
            }
        ));
    }

    #[test]
    fn test_load_source_wrong_column_count_rejected() {
        let content = "61266250\tliste I\n60234100\n";
        let loaded = load_source::<PrescriptionCondition, _>(content.as_bytes()).unwrap();
        assert_eq!(loaded.accepted(), 1);
        assert_eq!(loaded.rejected(), 1);
        assert!(matches!(
            loaded.rejects[0].reason,
            RegistryError::ColumnCount {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn test_load_source_tolerates_trailing_column() {
        // Upstream rows often end with a trailing tab.
        let content = "61266250\tliste I\t\n";
        let loaded = load_source::<PrescriptionCondition, _>(content.as_bytes()).unwrap();
        assert_eq!(loaded.accepted(), 1);
    }

    #[test]
    fn test_index_by_cis() {
        let loaded = load_source::<PrescriptionCondition, _>(
            "1\ta\n2\tb\n1\tc\n".as_bytes(),
        )
        .unwrap();
        let index = index_by_cis(&loaded.records, |c| c.cis);

        assert_eq!(index[&1], vec![0, 2]);
        assert_eq!(index[&2], vec![1]);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let content = "61266250\tliste I\nbad-cis\tliste I\n60234100\tliste II\n";

        let sequential =
            load_source::<PrescriptionCondition, _>(content.as_bytes()).unwrap();
        let parallel = load_source_parallel::<PrescriptionCondition>(content).unwrap();

        assert_eq!(sequential.records, parallel.records);
        assert_eq!(sequential.rejected(), parallel.rejected());
        assert_eq!(sequential.rejects[0].line, parallel.rejects[0].line);
    }

    #[test]
    fn test_load_all_latin1_content() {
        let raw = RawSources {
            specialties: b"60234100\tDOLIPRANE 1000 mg, comprim\xe9\tcomprim\xe9\torale\tAutorisation active\tProc\xe9dure nationale\tCommercialis\xe9e\t22/07/2002\t\t\tSANOFI\tNon\n".to_vec(),
            compositions: "60234100\tcomprimé\t2202\tPARACETAMOL\t1000 mg\tun comprimé\tSA\t1\n".into(),
            presentations: "60234100\t3475355\tplaquette(s)\tPrésentation active\tDéclaration de commercialisation\t22/07/2002\t3400934753558\toui\t65 %\t1,50\n".into(),
            conditions: "60234100\tliste II\n".into(),
            groups: "1234\tPARACETAMOL 1000 mg\t60234100\t0\t1\t1234\n".into(),
        };

        let loaded = load_all(&raw).unwrap();
        assert_eq!(loaded.total_accepted(), 5);
        assert_eq!(loaded.total_rejected(), 0);
        assert_eq!(
            loaded.specialties.records[0].name,
            "DOLIPRANE 1000 mg, comprimé"
        );
    }
}
