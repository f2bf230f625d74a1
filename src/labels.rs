//src/labels.rs

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;

use crate::errors::PrepError;

/// Mapping from sequence identifier to binary label (1 = pathogenic).
/// Loaded once, immutable for the run.
pub type LabelIndex = AHashMap<String, u8>;

/// Parses a tab-separated label index with a header row containing at least
/// the columns `seq_id` and `label` (any column order, extra columns are
/// ignored). A missing file, missing column, or unparsable label is fatal.
pub fn load_label_index<P: AsRef<Path>>(path: P) -> Result<LabelIndex, PrepError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut lines = reader.lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => {
            return Err(PrepError::MalformedRecord {
                path: path.to_path_buf(),
                line: 1,
                details: "empty label index".to_string(),
            })
        }
    };
    let columns: Vec<&str> = header.split('\t').map(str::trim).collect();
    let seq_col = find_column(&columns, "seq_id", path)?;
    let label_col = find_column(&columns, "label", path)?;

    let mut index = LabelIndex::new();
    for (lineno, line) in lines.enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        let (seq_id, raw_label) = match (fields.get(seq_col), fields.get(label_col)) {
            (Some(s), Some(l)) => (*s, *l),
            _ => {
                return Err(PrepError::MalformedRecord {
                    path: path.to_path_buf(),
                    line: lineno + 2,
                    details: "too few columns".to_string(),
                })
            }
        };
        let label: u8 = raw_label.trim().parse().map_err(|_| PrepError::MalformedRecord {
            path: path.to_path_buf(),
            line: lineno + 2,
            details: format!("invalid label '{raw_label}'"),
        })?;
        index.insert(seq_id.trim().to_string(), label);
    }

    log::info!("Loaded {} sequence labels from {}", index.len(), path.display());
    Ok(index)
}

fn find_column(columns: &[&str], name: &str, path: &Path) -> Result<usize, PrepError> {
    columns
        .iter()
        .position(|c| *c == name)
        .ok_or_else(|| PrepError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}
