//src/locate.rs

use std::fs;
use std::path::{Path, PathBuf};

/// Normalizes a directory-entry name for loose comparison: en dashes become
/// hyphens, runs of whitespace (including non-breaking spaces) collapse to a
/// single space, trailing whitespace is dropped, and the result is lowercased.
fn normalize_component(name: &str) -> String {
    name.replace('\u{2013}', "-")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Returns a path that exists, trying common filename gotchas:
/// - trailing spaces
/// - non-breaking spaces
/// - en dash vs hyphen
///
/// Walks `path` component by component; at each step where the exact child is
/// missing, the current base's children are scanned for the first name that
/// loosely matches (normalized, case-insensitive). The first match in
/// `read_dir` order wins; that order is filesystem-dependent and not
/// guaranteed stable. Unmatched components are appended literally so the walk
/// can only fail at the final existence check. Returns `None` if the resolved
/// path does not exist.
pub fn resolve_path_variants(path: &Path) -> Option<PathBuf> {
    if path.exists() {
        return Some(path.to_path_buf());
    }

    let mut components = path.components();
    let mut base = PathBuf::from(components.next()?.as_os_str());

    for comp in components {
        let target = normalize_component(&comp.as_os_str().to_string_lossy());
        let mut matched: Option<PathBuf> = None;

        if base.exists() {
            if let Ok(entries) = fs::read_dir(&base) {
                for entry in entries.flatten() {
                    let name = entry.file_name();
                    if normalize_component(&name.to_string_lossy()) == target {
                        matched = Some(entry.path());
                        break;
                    }
                }
            }
        }

        match matched {
            Some(child) => base = child,
            None => base.push(comp.as_os_str()),
        }
    }

    if base.exists() {
        Some(base)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn exact_path_resolves_unchanged() {
        let dir = tempdir().unwrap();
        let child = dir.path().join("Viruses");
        fs::create_dir(&child).unwrap();

        assert_eq!(resolve_path_variants(&child), Some(child));
    }

    #[test]
    fn heals_en_dash_double_space_and_trailing_space() {
        let dir = tempdir().unwrap();
        let on_disk = dir.path().join("Non-pathogenic comparators");
        fs::create_dir(&on_disk).unwrap();

        // en dash, doubled space, trailing space
        let requested = dir.path().join("Non\u{2013}pathogenic  comparators ");
        assert_eq!(resolve_path_variants(&requested), Some(on_disk));
    }

    #[test]
    fn heals_non_breaking_space_and_case() {
        let dir = tempdir().unwrap();
        let on_disk = dir.path().join("pathogenic set");
        fs::create_dir(&on_disk).unwrap();

        let requested = dir.path().join("Pathogenic\u{00A0}set");
        assert_eq!(resolve_path_variants(&requested), Some(on_disk));
    }

    #[test]
    fn heals_nested_components() {
        let dir = tempdir().unwrap();
        let inner = dir.path().join("Bacteria_ESKAPEE").join("non-pathogenic set");
        fs::create_dir_all(&inner).unwrap();

        let requested = dir
            .path()
            .join("bacteria_eskapee")
            .join("Non\u{2013}pathogenic set ");
        assert_eq!(resolve_path_variants(&requested), Some(inner));
    }

    #[test]
    fn missing_path_yields_none() {
        let dir = tempdir().unwrap();
        let requested = dir.path().join("no such folder").join("deeper");
        assert_eq!(resolve_path_variants(&requested), None);
    }
}
