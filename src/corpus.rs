//src/corpus.rs

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::locate::resolve_path_variants;

/// Display width for corpus headers.
pub const HEADER_WIDTH: usize = 80;

/// Fixed dataset categories: short key plus directory below the data root.
/// The binary class is derived from the key, see [`category_label`].
pub const CATEGORIES: [(&str, &[&str]); 4] = [
    ("bact_pathogenic", &["Bacteria_ESKAPEE", "pathogenic set"]),
    ("bact_nonpath", &["Bacteria_ESKAPEE", "non-pathogenic set"]),
    ("virus_path", &["Viruses", "Human-pathogenic"]),
    ("virus_nonpath", &["Viruses", "Non-pathogenic comparators"]),
];

/// Binary class from the category key: 1 = pathogenic, 0 = non-pathogenic.
pub fn category_label(key: &str) -> u8 {
    if key.contains("path") && !key.contains("non") {
        1
    } else {
        0
    }
}

/// Resolves one category directory below `data_root`, healing common naming
/// gotchas via the locator. `None` when the directory cannot be found.
pub fn resolve_category_dir(data_root: &Path, rel_parts: &[&str]) -> Option<PathBuf> {
    let mut wanted = data_root.to_path_buf();
    for part in rel_parts {
        wanted.push(part);
    }
    resolve_path_variants(&wanted)
}

/// Recursively finds fasta-like files under `root`: extensions .fa, .fna,
/// .fasta (case-insensitive), optionally gzipped. Entries are visited in
/// sorted-name order so corpus line order is deterministic.
pub fn find_genomes(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(root)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<_>>()?;
    paths.sort();

    let mut found = Vec::new();
    for path in paths {
        if path.is_dir() {
            found.extend(find_genomes(&path)?);
        } else if is_fasta_path(&path) {
            found.push(path);
        }
    }
    Ok(found)
}

fn is_fasta_path(path: &Path) -> bool {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().to_lowercase(),
        None => return false,
    };
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    name.ends_with(".fa") || name.ends_with(".fna") || name.ends_with(".fasta")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn labels_derive_from_category_keys() {
        assert_eq!(category_label("bact_pathogenic"), 1);
        assert_eq!(category_label("virus_path"), 1);
        assert_eq!(category_label("bact_nonpath"), 0);
        assert_eq!(category_label("virus_nonpath"), 0);
    }

    #[test]
    fn discovery_matches_fasta_extensions_case_insensitively() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("strain_a");
        fs::create_dir(&nested).unwrap();
        for name in ["b.FNA", "a.fa", "notes.txt", "c.fasta.gz"] {
            fs::write(nested.join(name), ">x\nACGT\n").unwrap();
        }
        fs::write(dir.path().join("top.fasta"), ">y\nACGT\n").unwrap();

        let files = find_genomes(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.fa", "b.FNA", "c.fasta.gz", "top.fasta"]);
    }

    #[test]
    fn category_dir_resolution_heals_naming_variants() {
        let dir = tempdir().unwrap();
        let on_disk = dir.path().join("Viruses").join("Non-pathogenic comparators");
        fs::create_dir_all(&on_disk).unwrap();

        let resolved =
            resolve_category_dir(dir.path(), &["Viruses", "Non\u{2013}pathogenic  comparators "]);
        assert_eq!(resolved, Some(on_disk));
    }
}
