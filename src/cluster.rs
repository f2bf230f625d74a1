//src/cluster.rs

use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::errors::PrepError;
use crate::labels::LabelIndex;
use crate::types::Cluster;

/// Seed for the split RNG stream. Set once per process; sequential threshold
/// runs consume one continuing stream and are never reseeded individually.
pub const SPLIT_SEED: u64 = 1337;

/// Fraction of each class's clusters assigned to train before validation carving.
const TRAIN_FRACTION: f64 = 0.8;

/// Fraction of the combined train pool carved out as validation.
const VALIDATION_FRACTION: f64 = 0.1;

/// Loads a cluster membership file in createtsv format:
/// ```text
/// <rep_seq_id>\t<member_seq_id>
/// ```
/// No header row. Members are grouped under each representative in input
/// order; representatives keep first-seen order so downstream shuffles are
/// reproducible for a fixed seed. A row with fewer than two fields is fatal.
pub fn load_clusters<P: AsRef<Path>>(path: P) -> Result<Vec<Cluster>, PrepError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut clusters: Vec<Cluster> = Vec::new();
    let mut slots: AHashMap<String, usize> = AHashMap::new();

    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split('\t');
        let (rep, member) = match (fields.next(), fields.next()) {
            (Some(r), Some(m)) => (r, m),
            _ => {
                return Err(PrepError::MalformedRecord {
                    path: path.to_path_buf(),
                    line: lineno + 1,
                    details: "expected <rep>\\t<member>".to_string(),
                })
            }
        };

        let slot = match slots.get(rep) {
            Some(&slot) => slot,
            None => {
                clusters.push(Cluster {
                    rep: rep.to_string(),
                    members: Vec::new(),
                });
                slots.insert(rep.to_string(), clusters.len() - 1);
                clusters.len() - 1
            }
        };
        clusters[slot].members.push(member.to_string());
    }

    Ok(clusters)
}

/// Majority label over a cluster's labeled members; `None` when no member
/// appears in the index. An exact positive/negative tie resolves to 1.
pub fn majority_label(cluster: &Cluster, labels: &LabelIndex) -> Option<u8> {
    let mut labeled = 0usize;
    let mut positives = 0usize;
    for member in &cluster.members {
        if let Some(&label) = labels.get(member) {
            labeled += 1;
            if label != 0 {
                positives += 1;
            }
        }
    }
    if labeled == 0 {
        None
    } else if positives * 2 >= labeled {
        Some(1)
    } else {
        Some(0)
    }
}

/// A cluster-level train/validation/test partition. Each list holds whole
/// clusters; membership files are rendered one member id per line.
pub struct ClusterSplit {
    pub train: Vec<Cluster>,
    pub validation: Vec<Cluster>,
    pub test: Vec<Cluster>,
    /// Clusters that had at least one labeled member and were partitioned.
    pub labeled_clusters: usize,
}

impl ClusterSplit {
    /// Generate train membership text on demand
    pub fn get_train_text(&self) -> String {
        members_text(&self.train)
    }

    /// Generate validation membership text on demand
    pub fn get_validation_text(&self) -> String {
        members_text(&self.validation)
    }

    /// Generate test membership text on demand
    pub fn get_test_text(&self) -> String {
        members_text(&self.test)
    }
}

fn members_text(clusters: &[Cluster]) -> String {
    let mut output = String::new();
    for cluster in clusters {
        for member in &cluster.members {
            writeln!(output, "{member}").unwrap();
        }
    }
    output
}

/// Stratified cluster split.
///
/// Clusters with no labeled member are dropped. The rest are separated by
/// majority label, each class is shuffled and cut at 80% (floor) into
/// train/test, the per-class pools are concatenated and reshuffled, and
/// validation is carved as a `max(1, 10%)` prefix of the combined train pool.
/// The caller threads one `StdRng` through sequential invocations so repeated
/// threshold runs share a single continuing pseudo-random stream.
pub fn split_clusters(
    clusters: &[Cluster],
    labels: &LabelIndex,
    rng: &mut StdRng,
) -> ClusterSplit {
    let mut positive: Vec<Cluster> = Vec::new();
    let mut negative: Vec<Cluster> = Vec::new();
    for cluster in clusters {
        match majority_label(cluster, labels) {
            Some(1) => positive.push(cluster.clone()),
            Some(_) => negative.push(cluster.clone()),
            None => {}
        }
    }
    let labeled_clusters = positive.len() + negative.len();

    positive.shuffle(rng);
    negative.shuffle(rng);

    let (pos_train, pos_test) = cut(positive, TRAIN_FRACTION);
    let (neg_train, neg_test) = cut(negative, TRAIN_FRACTION);

    let mut train = pos_train;
    train.extend(neg_train);
    let mut test = pos_test;
    test.extend(neg_test);
    train.shuffle(rng);
    test.shuffle(rng);

    let n_val = (VALIDATION_FRACTION * train.len() as f64) as usize;
    let n_val = n_val.max(1).min(train.len());
    let validation: Vec<Cluster> = train.drain(..n_val).collect();

    ClusterSplit {
        train,
        validation,
        test,
        labeled_clusters,
    }
}

fn cut(mut clusters: Vec<Cluster>, fraction: f64) -> (Vec<Cluster>, Vec<Cluster>) {
    let n = (clusters.len() as f64 * fraction) as usize;
    let rest = clusters.split_off(n);
    (clusters, rest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::collections::HashSet;
    use tempfile::tempdir;

    fn cluster(rep: &str, members: &[&str]) -> Cluster {
        Cluster {
            rep: rep.to_string(),
            members: members.iter().map(|m| m.to_string()).collect(),
        }
    }

    fn label_index(pairs: &[(&str, u8)]) -> LabelIndex {
        pairs
            .iter()
            .map(|(id, label)| (id.to_string(), *label))
            .collect()
    }

    #[test]
    fn loads_clusters_grouped_in_first_seen_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clusters_80.tsv");
        std::fs::write(&path, "r1\tm1\nr2\tm4\nr1\tm2\nr1\tm3\n").unwrap();

        let clusters = load_clusters(&path).unwrap();
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].rep, "r1");
        assert_eq!(clusters[0].members, vec!["m1", "m2", "m3"]);
        assert_eq!(clusters[1].members, vec!["m4"]);
    }

    #[test]
    fn malformed_cluster_row_is_fatal() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clusters.tsv");
        std::fs::write(&path, "r1\tm1\njust-one-field\n").unwrap();

        let err = load_clusters(&path).unwrap_err();
        assert!(matches!(err, PrepError::MalformedRecord { line: 2, .. }));
    }

    #[test]
    fn majority_two_of_three_positive_is_positive() {
        let labels = label_index(&[("m1", 1), ("m2", 1), ("m3", 0)]);
        let c = cluster("r1", &["m1", "m2", "m3"]);
        assert_eq!(majority_label(&c, &labels), Some(1));
    }

    #[test]
    fn exact_tie_resolves_to_positive() {
        let labels = label_index(&[("m1", 1), ("m2", 0)]);
        let c = cluster("r1", &["m1", "m2"]);
        assert_eq!(majority_label(&c, &labels), Some(1));
    }

    #[test]
    fn unlabeled_members_are_ignored_in_the_vote() {
        let labels = label_index(&[("m1", 0)]);
        let c = cluster("r1", &["m1", "unknown_a", "unknown_b"]);
        assert_eq!(majority_label(&c, &labels), Some(0));
    }

    #[test]
    fn fully_unlabeled_cluster_has_no_majority() {
        let labels = label_index(&[("elsewhere", 1)]);
        let c = cluster("r1", &["m1", "m2"]);
        assert_eq!(majority_label(&c, &labels), None);
    }

    fn many_clusters() -> (Vec<Cluster>, LabelIndex) {
        let mut clusters = Vec::new();
        let mut pairs = Vec::new();
        for i in 0..20 {
            let rep = format!("r{i}");
            let member = format!("m{i}");
            clusters.push(Cluster {
                rep,
                members: vec![member.clone()],
            });
            pairs.push((member, (i % 2) as u8));
        }
        // one cluster nobody labeled
        clusters.push(Cluster {
            rep: "r_unlabeled".to_string(),
            members: vec!["ghost".to_string()],
        });
        let labels: LabelIndex = pairs.into_iter().collect();
        (clusters, labels)
    }

    #[test]
    fn splits_partition_labeled_clusters_disjointly() {
        let (clusters, labels) = many_clusters();
        let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
        let split = split_clusters(&clusters, &labels, &mut rng);

        assert_eq!(split.labeled_clusters, 20);
        let mut seen: HashSet<String> = HashSet::new();
        let mut total = 0usize;
        for part in [&split.train, &split.validation, &split.test] {
            for c in part {
                assert!(seen.insert(c.rep.clone()), "cluster {} in two splits", c.rep);
                total += 1;
            }
        }
        assert_eq!(total, 20);
        assert!(!seen.contains("r_unlabeled"));
    }

    #[test]
    fn validation_is_at_least_one_cluster_when_train_is_nonempty() {
        let (clusters, labels) = many_clusters();
        let mut rng = StdRng::seed_from_u64(7);
        let split = split_clusters(&clusters, &labels, &mut rng);

        // 10 pos + 10 neg -> 8 + 8 train, 10% of 16 -> 1 validation cluster
        assert_eq!(split.test.len(), 4);
        assert_eq!(split.validation.len(), 1);
        assert_eq!(split.train.len(), 15);
    }

    #[test]
    fn empty_input_produces_empty_splits() {
        let labels = label_index(&[]);
        let mut rng = StdRng::seed_from_u64(1);
        let split = split_clusters(&[], &labels, &mut rng);
        assert!(split.train.is_empty());
        assert!(split.validation.is_empty());
        assert!(split.test.is_empty());
        assert_eq!(split.labeled_clusters, 0);
    }

    #[test]
    fn same_seed_yields_identical_membership_files() {
        let (clusters, labels) = many_clusters();

        let render = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let split = split_clusters(&clusters, &labels, &mut rng);
            (
                split.get_train_text(),
                split.get_validation_text(),
                split.get_test_text(),
            )
        };

        assert_eq!(render(SPLIT_SEED), render(SPLIT_SEED));
    }

    #[test]
    fn sequential_runs_consume_one_continuing_stream() {
        let (clusters, labels) = many_clusters();

        let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
        let first = split_clusters(&clusters, &labels, &mut rng);
        let second = split_clusters(&clusters, &labels, &mut rng);

        let mut rng = StdRng::seed_from_u64(SPLIT_SEED);
        let first_again = split_clusters(&clusters, &labels, &mut rng);
        let second_again = split_clusters(&clusters, &labels, &mut rng);

        assert_eq!(first.get_train_text(), first_again.get_train_text());
        assert_eq!(second.get_train_text(), second_again.get_train_text());
    }

    #[test]
    fn membership_files_list_one_member_per_line() {
        let labels = label_index(&[("m1", 1), ("m2", 1)]);
        let clusters = vec![cluster("r1", &["m1", "m2"])];
        let mut rng = StdRng::seed_from_u64(3);
        let split = split_clusters(&clusters, &labels, &mut rng);

        // single positive cluster: 80% of 1 floors to 0 -> test gets it
        assert!(split.train.is_empty());
        assert!(split.validation.is_empty());
        assert_eq!(split.get_test_text(), "m1\nm2\n");
    }
}
