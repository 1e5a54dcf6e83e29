//! Labeled training corpus loading.
//!
//! The corpus is a headerless, Latin-1 encoded CSV with six positional
//! columns: polarity, id, date, query, user, text. Only polarity and text
//! are semantically used; the others are carried through the record type so
//! schema problems are caught by name at load time instead of surfacing as
//! misaligned columns somewhere downstream.
//!
//! Polarity uses the 2-class convention of the source dataset: 0 is
//! negative, 4 is positive. Rows with any other polarity are dropped and
//! counted rather than passed through as an accidental third class.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use csv::ReaderBuilder;
use log::{debug, info, warn};

use crate::error::{Result, SentiraError};
use crate::sentiment::SentimentLabel;

/// Number of columns every corpus row must have.
pub const CORPUS_COLUMNS: usize = 6;

/// A single labeled training example.
#[derive(Debug, Clone)]
pub struct LabeledExample {
    /// Raw comment text, before normalization.
    pub text: String,
    /// Sentiment label mapped from the polarity column.
    pub label: SentimentLabel,
}

/// One corpus row with its six columns bound to named fields.
#[derive(Debug, Clone)]
pub struct CorpusRecord {
    /// Polarity column: "0" (negative) or "4" (positive) in valid rows.
    pub polarity: String,
    /// Source-assigned row id.
    pub id: String,
    /// Collection date, as recorded by the source.
    pub date: String,
    /// Query term the row was collected for.
    pub query: String,
    /// Author username.
    pub user: String,
    /// Comment text.
    pub text: String,
}

impl CorpusRecord {
    fn from_byte_record(record: &csv::ByteRecord, line: u64) -> Result<Self> {
        if record.len() != CORPUS_COLUMNS {
            return Err(SentiraError::corpus(format!(
                "row {line}: expected {CORPUS_COLUMNS} columns, found {}",
                record.len()
            )));
        }
        Ok(CorpusRecord {
            polarity: decode_latin1(&record[0]),
            id: decode_latin1(&record[1]),
            date: decode_latin1(&record[2]),
            query: decode_latin1(&record[3]),
            user: decode_latin1(&record[4]),
            text: decode_latin1(&record[5]),
        })
    }
}

/// A fully loaded corpus, plus data-quality counters.
#[derive(Debug)]
pub struct LoadedCorpus {
    /// Usable labeled examples.
    pub examples: Vec<LabeledExample>,
    /// Rows dropped because their polarity was outside {0, 4}.
    pub skipped_rows: usize,
}

/// Reader for the six-column labeled corpus format.
#[derive(Debug, Clone, Default)]
pub struct CorpusReader;

impl CorpusReader {
    /// Create a new corpus reader.
    pub fn new() -> Self {
        CorpusReader
    }

    /// Load the corpus at `path`.
    ///
    /// A missing or unreadable file is a fatal corpus error. A first row
    /// whose polarity column is non-numeric is treated as a header and
    /// skipped; a non-numeric polarity anywhere else is a schema error
    /// naming the row.
    pub fn load<P: AsRef<Path>>(&self, path: P) -> Result<LoadedCorpus> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            SentiraError::corpus(format!("failed to open corpus {}: {e}", path.display()))
        })?;

        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(BufReader::new(file));

        let mut examples = Vec::new();
        let mut skipped_rows = 0usize;
        let mut first_row = true;
        let mut record = csv::ByteRecord::new();

        loop {
            let line = reader.position().line();
            if !reader.read_byte_record(&mut record)? {
                break;
            }

            let row = CorpusRecord::from_byte_record(&record, line)?;
            let polarity = row.polarity.trim();

            let value: i64 = match polarity.parse() {
                Ok(value) => value,
                Err(_) if first_row => {
                    warn!("first corpus row has non-numeric polarity {polarity:?}, skipping it as a header");
                    first_row = false;
                    continue;
                }
                Err(_) => {
                    return Err(SentiraError::corpus(format!(
                        "row {line}: polarity {polarity:?} is not numeric"
                    )));
                }
            };
            first_row = false;

            let label = match value {
                0 => SentimentLabel::Negative,
                4 => SentimentLabel::Positive,
                other => {
                    debug!("row {line}: dropping out-of-range polarity {other}");
                    skipped_rows += 1;
                    continue;
                }
            };

            examples.push(LabeledExample {
                text: row.text,
                label,
            });
        }

        if skipped_rows > 0 {
            warn!(
                "dropped {skipped_rows} corpus rows with polarity outside {{0, 4}} from {}",
                path.display()
            );
        }
        info!(
            "loaded {} labeled examples from {}",
            examples.len(),
            path.display()
        );

        Ok(LoadedCorpus {
            examples,
            skipped_rows,
        })
    }
}

/// Decode a Latin-1 byte string.
///
/// Latin-1 maps each byte to the Unicode code point of the same value, so
/// the decode is a direct char cast and can never fail.
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_corpus(bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_maps_polarity_to_labels() {
        let file = write_corpus(
            b"0,1,Mon Apr 06,NO_QUERY,alice,this is terrible\n\
              4,2,Mon Apr 06,NO_QUERY,bob,this is great\n",
        );

        let corpus = CorpusReader::new().load(file.path()).unwrap();
        assert_eq!(corpus.examples.len(), 2);
        assert_eq!(corpus.skipped_rows, 0);
        assert_eq!(corpus.examples[0].label, SentimentLabel::Negative);
        assert_eq!(corpus.examples[0].text, "this is terrible");
        assert_eq!(corpus.examples[1].label, SentimentLabel::Positive);
    }

    #[test]
    fn test_load_drops_out_of_range_polarity() {
        let file = write_corpus(
            b"0,1,d,q,u,bad\n\
              2,2,d,q,u,meh\n\
              4,3,d,q,u,good\n",
        );

        let corpus = CorpusReader::new().load(file.path()).unwrap();
        assert_eq!(corpus.examples.len(), 2);
        assert_eq!(corpus.skipped_rows, 1);
    }

    #[test]
    fn test_load_skips_header_row() {
        let file = write_corpus(
            b"polarity,id,date,query,user,text\n\
              4,1,d,q,u,nice\n",
        );

        let corpus = CorpusReader::new().load(file.path()).unwrap();
        assert_eq!(corpus.examples.len(), 1);
        assert_eq!(corpus.skipped_rows, 0);
    }

    #[test]
    fn test_load_rejects_wrong_column_count() {
        let file = write_corpus(b"0,1,d,q,u,text\n4,2,only,four,cols\n");

        let err = CorpusReader::new().load(file.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("expected 6 columns"), "{message}");
        assert!(message.contains("row 2"), "{message}");
    }

    #[test]
    fn test_load_rejects_non_numeric_polarity_mid_file() {
        let file = write_corpus(b"0,1,d,q,u,text\nfour,2,d,q,u,text\n");

        let err = CorpusReader::new().load(file.path()).unwrap_err();
        assert!(err.to_string().contains("not numeric"));
    }

    #[test]
    fn test_load_decodes_latin1_text() {
        // 0xE9 is 'é' in Latin-1 and invalid UTF-8 on its own.
        let file = write_corpus(b"4,1,d,q,u,caf\xe9 vibes\n");

        let corpus = CorpusReader::new().load(file.path()).unwrap();
        assert_eq!(corpus.examples[0].text, "café vibes");
    }

    #[test]
    fn test_load_missing_file_is_fatal() {
        let err = CorpusReader::new()
            .load("/nonexistent/corpus.csv")
            .unwrap_err();
        assert!(matches!(err, SentiraError::Corpus(_)));
    }
}
