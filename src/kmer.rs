//src/kmer.rs

/// Default k-mer length for the tokenized corpus.
pub const DEFAULT_K: usize = 6;

/// Uppercases `s` and maps every character outside {A,C,G,T,N} to N.
/// The output always has the same character count as the input.
pub fn clean_seq(s: &str) -> String {
    s.chars()
        .map(|c| match c.to_ascii_uppercase() {
            b @ ('A' | 'C' | 'G' | 'T' | 'N') => b,
            _ => 'N',
        })
        .collect()
}

/// All k-mers of `s` via a sliding window of stride 1.
/// Empty when `s` is shorter than `k`. `s` must be ASCII (cleaned).
pub fn kmers(s: &str, k: usize) -> Vec<&str> {
    if k == 0 || s.len() < k {
        return Vec::new();
    }
    (0..=s.len() - k).map(|i| &s[i..i + k]).collect()
}

/// Collapses whitespace and truncates `header` to at most `width` display
/// characters, cutting at a word boundary and appending '…' when truncated.
pub fn shorten_header(header: &str, width: usize) -> String {
    let words: Vec<&str> = header.split_whitespace().collect();
    let joined = words.join(" ");
    if joined.chars().count() <= width {
        return joined;
    }

    let mut out = String::new();
    let mut used = 0usize;
    for word in &words {
        let word_len = word.chars().count();
        let extra = if used == 0 { word_len } else { word_len + 1 };
        // leave room for the placeholder
        if used + extra + 1 > width {
            break;
        }
        if used > 0 {
            out.push(' ');
        }
        out.push_str(word);
        used += extra;
    }
    out.push('\u{2026}');
    out
}
