use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::MultiGzDecoder;

use crate::types::FastaRecord;

/// Minimal FASTA read function that also supports .gz
///
/// A record begins at a line starting with '>'; the remainder of that line,
/// whitespace-trimmed, becomes the header. All following non-header lines are
/// stripped and concatenated into the sequence until the next header or EOF.
/// Blank lines are skipped; the final record is flushed at end of input. A
/// file with no header lines yields zero records.
pub fn read_fasta_records(path: &Path) -> std::io::Result<Vec<FastaRecord>> {
    let f = File::open(path)?;

    // If the file ends with ".gz", wrap it in a MultiGzDecoder
    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn BufRead> = if is_gz {
        Box::new(BufReader::new(MultiGzDecoder::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };

    let mut records = Vec::new();
    let mut header: Option<String> = None;
    let mut seq = String::new();

    for line in reader.lines() {
        let line = line?;
        if let Some(rest) = line.strip_prefix('>') {
            if let Some(h) = header.take() {
                records.push(FastaRecord {
                    header: h,
                    seq: std::mem::take(&mut seq),
                });
            }
            header = Some(rest.trim().to_string());
            seq.clear();
        } else if header.is_some() {
            seq.push_str(line.trim());
        }
        // lines before the first header are ignored
    }

    if let Some(h) = header {
        records.push(FastaRecord { header: h, seq });
    }

    Ok(records)
}
