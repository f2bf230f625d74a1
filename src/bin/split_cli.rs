use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;

use pathocorpus_rs::cluster::{load_clusters, split_clusters, SPLIT_SEED};
use pathocorpus_rs::labels::load_label_index;

/// Clustering thresholds processed per run, each producing its own split files.
const THRESHOLDS: [u32; 3] = [80, 60, 40];

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

    let labels = load_label_index("manifests/header_label.tsv").expect("Could not load label index");

    fs::create_dir_all("splits").expect("Could not create splits directory");

    // One RNG stream for the whole batch; threshold runs consume it in
    // sequence and are never reseeded individually.
    let mut rng = StdRng::seed_from_u64(SPLIT_SEED);

    for threshold in THRESHOLDS {
        let pb = spinner("green");
        pb.set_message(format!("Splitting clusters at threshold {threshold}..."));

        let cluster_path = format!("splits/clusters_{threshold}.tsv");
        let clusters = load_clusters(&cluster_path).expect("Could not load cluster file");
        let split = split_clusters(&clusters, &labels, &mut rng);

        let prefix = format!("splits/split{threshold}");
        fs::write(format!("{prefix}_train.txt"), split.get_train_text())
            .expect("Could not write train split");
        fs::write(format!("{prefix}_val.txt"), split.get_validation_text())
            .expect("Could not write val split");
        fs::write(format!("{prefix}_test.txt"), split.get_test_text())
            .expect("Could not write test split");

        pb.finish_with_message(format!("Threshold {threshold} done."));

        println!(
            "split{threshold} clusters: {} -> train: {} val: {} test: {}",
            split.labeled_clusters,
            split.train.len(),
            split.validation.len(),
            split.test.len()
        );
    }
}
