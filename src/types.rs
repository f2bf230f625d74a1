//src/types.rs

/// One parsed FASTA record: free-text header plus the raw sequence with
/// per-line whitespace already stripped. Headers carry no uniqueness
/// guarantee.
#[derive(Debug, Clone)]
pub struct FastaRecord {
    pub header: String,
    pub seq: String,
}

/// One corpus entry: binary class, original header text, cleaned sequence.
/// Header truncation happens when the corpus text is rendered, not here.
#[derive(Debug, Clone)]
pub struct CorpusRecord {
    /// 1 = pathogenic, 0 = non-pathogenic.
    pub label: u8,
    pub header: String,
    /// Cleaned sequence, alphabet restricted to {A,C,G,T,N}.
    pub seq: String,
}

/// One similarity cluster from the membership file: representative id plus
/// member ids in input order. Duplicate member rows accumulate.
#[derive(Debug, Clone)]
pub struct Cluster {
    pub rep: String,
    pub members: Vec<String>,
}
