// src/lib.rs
pub mod cluster;
pub mod corpus;
pub mod errors;
pub mod fasta;
pub mod kmer;
pub mod labels;
pub mod locate;
pub mod types;

use std::fmt::Write as FmtWrite;
use std::path::Path;

use crate::corpus::{category_label, find_genomes, resolve_category_dir, CATEGORIES, HEADER_WIDTH};
use crate::errors::PrepError;
use crate::fasta::read_fasta_records;
use crate::kmer::{clean_seq, kmers, shorten_header, DEFAULT_K};
use crate::types::CorpusRecord;

/// A struct to hold corpus build results with minimal duplication.
/// Only structured records are stored; corpus text is generated on demand,
/// so each corpus file is written in a single atomic write.
#[derive(Debug)]
pub struct CorpusResults {
    /// One record per cleaned, non-empty sequence, in traversal order.
    pub records: Vec<CorpusRecord>,

    /// K-mer length used for the tokenized corpus.
    pub k: usize,

    /// FASTA file count per category key, in category order.
    pub category_file_counts: Vec<(String, usize)>,

    /// Files that failed to parse and were skipped.
    pub failed_files: usize,
}

impl CorpusResults {
    /// Generate plain corpus text on demand: `<label>\t<header>\t<sequence>`
    pub fn get_plain_corpus(&self) -> String {
        let mut output = String::new();
        for record in &self.records {
            writeln!(
                output,
                "{}\t{}\t{}",
                record.label,
                shorten_header(&record.header, HEADER_WIDTH),
                record.seq
            )
            .unwrap();
        }
        output
    }

    /// Generate k-mer corpus text on demand: `<label>\t<header>\t<k-mers>`.
    /// Records shorter than k produce no line here, so this file may hold
    /// fewer lines than the plain corpus.
    pub fn get_kmer_corpus(&self) -> String {
        let mut output = String::new();
        for record in &self.records {
            let parts = kmers(&record.seq, self.k);
            if parts.is_empty() {
                continue;
            }
            writeln!(
                output,
                "{}\t{}\t{}",
                record.label,
                shorten_header(&record.header, HEADER_WIDTH),
                parts.join(" ")
            )
            .unwrap();
        }
        output
    }

    /// Line count of the plain corpus.
    pub fn plain_line_count(&self) -> usize {
        self.records.len()
    }

    /// Line count of the k-mer corpus.
    pub fn kmer_line_count(&self) -> usize {
        self.records.iter().filter(|r| r.seq.len() >= self.k).count()
    }
}

/// Unified function to build both corpora from the raw genome collection.
///
/// Resolves each fixed category directory under `data_root` (healing common
/// naming gotchas), recursively discovers FASTA files, parses and cleans every
/// record, and accumulates labeled corpus records in memory. A missing
/// category is non-fatal; zero files across all categories aborts before any
/// output; a parse failure on one file is logged and skipped.
pub fn build_corpus(data_root: &Path, k: usize) -> Result<CorpusResults, PrepError> {
    let mut category_files = Vec::new();
    for (key, rel_parts) in CATEGORIES {
        let files = match resolve_category_dir(data_root, rel_parts) {
            Some(dir) => {
                let files = find_genomes(&dir)?;
                log::info!("{key}: {} -> {} fasta files", dir.display(), files.len());
                for sample in files.iter().take(5) {
                    log::info!("      - {}", sample.display());
                }
                files
            }
            None => {
                log::warn!(
                    "Missing folder: {}",
                    rel_parts.join("/")
                );
                Vec::new()
            }
        };
        category_files.push((key, files));
    }

    if category_files.iter().all(|(_, files)| files.is_empty()) {
        return Err(PrepError::NoFastaFiles);
    }

    let mut records = Vec::new();
    let mut failed_files = 0usize;
    for (key, files) in &category_files {
        let label = category_label(key);
        for path in files {
            match read_fasta_records(path) {
                Ok(parsed) => {
                    for rec in parsed {
                        let seq = clean_seq(&rec.seq);
                        if seq.is_empty() {
                            continue;
                        }
                        records.push(CorpusRecord {
                            label,
                            header: rec.header,
                            seq,
                        });
                    }
                }
                Err(err) => {
                    log::error!("Failed on {}: {err}", path.display());
                    failed_files += 1;
                }
            }
        }
    }

    Ok(CorpusResults {
        records,
        k,
        category_file_counts: category_files
            .into_iter()
            .map(|(key, files)| (key.to_string(), files.len()))
            .collect(),
        failed_files,
    })
}

/// Build both corpora with the default k-mer length.
pub fn build_corpus_default(data_root: &Path) -> Result<CorpusResults, PrepError> {
    build_corpus(data_root, DEFAULT_K)
}
