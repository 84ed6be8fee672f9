//! Generic BDPM row decoder.
//!
//! Provides a streaming decoder for the tab-delimited registry files.
//! BDPM files carry no header row, use no quoting convention (free-text
//! fields contain stray `"` characters), and are published in Latin-1.

use std::borrow::Cow;
use std::io::Read;
use std::marker::PhantomData;

use csv::{Reader, ReaderBuilder, StringRecord};

use crate::types::{RegistryError, RegistryResult, SourceKind};

/// Trait for types decodable from one BDPM source row.
///
/// Implemented once per entity kind; the decoder guarantees the row has at
/// least [`COLUMN_COUNT`](TsvRecord::COLUMN_COUNT) columns before calling
/// [`from_row`](TsvRecord::from_row).
pub trait TsvRecord: Sized {
    /// Minimum number of columns a valid row carries. Trailing extra
    /// columns (a trailing tab is common upstream) are tolerated.
    const COLUMN_COUNT: usize;

    /// Which source file this record kind comes from.
    const SOURCE: SourceKind;

    /// Decode a record from a tab-separated row.
    ///
    /// Pure function of the row: numeric parse failures reject this row
    /// only, never the rest of the file.
    fn from_row(row: &StringRecord) -> RegistryResult<Self>;
}

/// A streaming decoder over one BDPM source.
///
/// Yields one `Result` per non-empty row so callers can accumulate rejects
/// without aborting the stream.
pub struct TsvDecoder<R: Read, T: TsvRecord> {
    reader: Reader<R>,
    line: u64,
    _marker: PhantomData<T>,
}

impl<R: Read, T: TsvRecord> TsvDecoder<R, T> {
    /// Creates a decoder from a reader over tab-separated content.
    pub fn new(reader: R) -> Self {
        let csv_reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .quoting(false)
            .flexible(true)
            .from_reader(reader);

        Self {
            reader: csv_reader,
            line: 0,
            _marker: PhantomData,
        }
    }

    /// 1-based number of the row most recently yielded.
    pub fn line(&self) -> u64 {
        self.line
    }
}

impl<R: Read, T: TsvRecord> Iterator for TsvDecoder<R, T> {
    type Item = RegistryResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut record = StringRecord::new();
            match self.reader.read_record(&mut record) {
                Ok(true) => {
                    self.line += 1;

                    // Skip blank rows
                    if record.is_empty() || record.iter().all(|f| f.trim().is_empty()) {
                        continue;
                    }

                    return Some(decode_row(&record));
                }
                Ok(false) => return None,
                Err(e) => {
                    self.line += 1;
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

/// Decodes one already-split row, enforcing the layout's column count.
pub fn decode_row<T: TsvRecord>(record: &StringRecord) -> RegistryResult<T> {
    if record.len() < T::COLUMN_COUNT {
        return Err(RegistryError::ColumnCount {
            expected: T::COLUMN_COUNT,
            found: record.len(),
        });
    }
    T::from_row(record)
}

/// Decodes raw source bytes to text.
///
/// BDPM publishes Latin-1; mirrors occasionally re-encode to UTF-8. Valid
/// UTF-8 passes through unchanged, anything else is read as Latin-1
/// (a byte-to-code-point mapping, so this never fails).
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| b as char).collect()),
    }
}

/// Helper functions for parsing BDPM field values.
pub mod parse {
    use bdpm_types::CisCode;

    use super::{RegistryError, RegistryResult};

    /// Parses a CIS code.
    pub fn cis(value: &str) -> RegistryResult<CisCode> {
        value
            .trim()
            .parse::<u64>()
            .map_err(|_| RegistryError::InvalidCis {
                value: value.to_string(),
            })
    }

    /// Parses a required integer value.
    pub fn integer<T: std::str::FromStr>(value: &str) -> RegistryResult<T> {
        value
            .trim()
            .parse::<T>()
            .map_err(|_| RegistryError::InvalidNumber {
                value: value.to_string(),
            })
    }

    /// Parses an optional integer value; empty means absent.
    pub fn optional_integer<T: std::str::FromStr>(value: &str) -> RegistryResult<Option<T>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        integer(value).map(Some)
    }

    /// Parses a `dd/mm/yyyy` date into YYYYMMDD as u32.
    pub fn date_dmy(value: &str) -> RegistryResult<u32> {
        let invalid = || RegistryError::InvalidDate {
            value: value.to_string(),
        };

        let mut parts = value.trim().splitn(3, '/');
        let day: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let month: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;
        let year: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(invalid)?;

        if day == 0 || day > 31 || month == 0 || month > 12 || year < 1000 || year > 9999 {
            return Err(invalid());
        }

        Ok(year * 10_000 + month * 100 + day)
    }

    /// Parses an optional `dd/mm/yyyy` date; empty means absent.
    pub fn optional_date_dmy(value: &str) -> RegistryResult<Option<u32>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        date_dmy(value).map(Some)
    }

    /// Parses an oui/non flag (case-insensitive).
    pub fn flag(value: &str) -> RegistryResult<bool> {
        match value.trim().to_lowercase().as_str() {
            "oui" => Ok(true),
            "non" => Ok(false),
            _ => Err(RegistryError::InvalidFlag {
                value: value.to_string(),
            }),
        }
    }

    /// Parses an optional oui/non flag; empty means absent.
    pub fn optional_flag(value: &str) -> RegistryResult<Option<bool>> {
        if value.trim().is_empty() {
            return Ok(None);
        }
        flag(value).map(Some)
    }

    /// Returns a trimmed owned copy of an optional text field; empty means absent.
    pub fn optional_text(value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}
