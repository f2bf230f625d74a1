use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;

use pathocorpus_rs::build_corpus;
use pathocorpus_rs::kmer::DEFAULT_K;

fn spinner(color: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&[
                "⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏",
            ])
            .template(&format!("{{spinner:.{color}}} {{msg}}"))
            .expect("Invalid spinner template"),
    );
    pb
}

fn main() {
    env_logger::init();

    let data_root = PathBuf::from("./data_collection");
    let out_dir = PathBuf::from("./tokenized");

    // 1. Scan the genome collection and build both corpora in memory
    let pb = spinner("blue");
    pb.set_message(format!(
        "Building corpora from '{}' (k={DEFAULT_K})...",
        data_root.display()
    ));

    let results = build_corpus(&data_root, DEFAULT_K).expect("Corpus build failed");

    pb.finish_with_message(format!(
        "Parsed {} sequences ({} files skipped).",
        results.records.len(),
        results.failed_files
    ));

    for (key, count) in &results.category_file_counts {
        println!("  {key}: {count} fasta files");
    }

    // 2. Write both corpus files, each in a single write
    let pb = spinner("yellow");
    pb.set_message("Writing corpus files...");

    fs::create_dir_all(&out_dir).expect("Could not create output directory");
    let plain_path = out_dir.join("corpus.txt");
    let kmer_path = out_dir.join(format!("corpus_k{DEFAULT_K}.txt"));

    fs::write(&plain_path, results.get_plain_corpus()).expect("Could not write corpus.txt");
    fs::write(&kmer_path, results.get_kmer_corpus()).expect("Could not write k-mer corpus");

    pb.finish_with_message("Corpus files written.");

    println!("Wrote plain corpus -> {}  ({} sequences)", plain_path.display(), results.plain_line_count());
    println!("Wrote k-mer corpus -> {}  ({} sequences)", kmer_path.display(), results.kmer_line_count());
}
