use std::collections::BTreeMap;

use log::{info, warn};
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{CurateError, Result};
use crate::types::{MetadataTable, Split, SplitConfig};

/// Assigns every unique series to train or eval, stratified by label
///
/// Each label class contributes approximately `eval_fraction` of its unique
/// series to eval (rounded, but always leaving at least one series in
/// train). The shuffle uses a ChaCha8 generator seeded from the configured
/// constant and label classes are visited in sorted order, so identical
/// tables always produce identical assignments. Every row sharing a
/// `SeriesInstanceUID` receives the same split value.
///
/// A label with a single series cannot be proportionally split; it falls
/// back to train with a warning rather than skewing eval.
///
/// # Errors
///
/// Returns [`CurateError::Config`] for an eval fraction outside (0, 1) or
/// when any series has no `Label` to stratify on.
pub fn stratified_split(table: &mut MetadataTable, cfg: &SplitConfig) -> Result<()> {
    cfg.validate()?;

    // One label per unique series, keyed off its first row.
    let mut buckets: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for uid in table.unique_series_uids() {
        let label = table
            .get(&uid)
            .and_then(|row| row.label())
            .ok_or_else(|| {
                CurateError::Config(format!("series '{}' has no Label to stratify on", uid))
            })?;
        buckets.entry(label).or_default().push(uid);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
    let mut assignments: Vec<(String, Split)> = Vec::new();

    for (label, mut uids) in buckets {
        if uids.len() == 1 {
            warn!(
                "label '{}' has a single series; assigning it to train only",
                label
            );
            assignments.push((uids.remove(0), Split::Train));
            continue;
        }

        let take = ((uids.len() as f64) * cfg.eval_fraction).round() as usize;
        let take = take.min(uids.len() - 1);

        uids.shuffle(&mut rng);
        for (i, uid) in uids.into_iter().enumerate() {
            let split = if i < take { Split::Eval } else { Split::Train };
            assignments.push((uid, split));
        }
    }

    let n_eval = assignments.iter().filter(|(_, s)| *s == Split::Eval).count();
    info!(
        "{} series for train, {} series for evaluation",
        assignments.len() - n_eval,
        n_eval
    );

    for (uid, split) in assignments {
        table.set_split_for_series(&uid, split);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MetadataRow, COL_LABEL, COL_SERIES_UID};

    fn make_table(series: &[(&str, &str)]) -> MetadataTable {
        let mut table = MetadataTable::new();
        for (uid, label) in series {
            let mut row = MetadataRow::new();
            row.set(COL_SERIES_UID, *uid);
            row.set(COL_LABEL, *label);
            table.push(row).unwrap();
        }
        table
    }

    fn split_counts(table: &MetadataTable, label: &str) -> (usize, usize) {
        let mut train = 0;
        let mut eval = 0;
        for row in table.rows() {
            if row.label().as_deref() == Some(label) {
                match row.split() {
                    Some(Split::Train) => train += 1,
                    Some(Split::Eval) => eval += 1,
                    None => panic!("row left without split"),
                }
            }
        }
        (train, eval)
    }

    #[test]
    fn test_balanced_two_class_split() {
        // 100 unique series, labels 50/50, eval fraction 0.1.
        let series: Vec<(String, &str)> = (0..100)
            .map(|i| (format!("S{}", i), if i % 2 == 0 { "pos" } else { "neg" }))
            .collect();
        let refs: Vec<(&str, &str)> = series.iter().map(|(u, l)| (u.as_str(), *l)).collect();
        let mut table = make_table(&refs);

        stratified_split(&mut table, &SplitConfig::default()).unwrap();

        assert_eq!(split_counts(&table, "pos"), (45, 5));
        assert_eq!(split_counts(&table, "neg"), (45, 5));
    }

    #[test]
    fn test_split_is_reproducible() {
        let series: Vec<(String, &str)> = (0..40)
            .map(|i| (format!("S{}", i), if i % 2 == 0 { "a" } else { "b" }))
            .collect();
        let refs: Vec<(&str, &str)> = series.iter().map(|(u, l)| (u.as_str(), *l)).collect();

        let mut first = make_table(&refs);
        let mut second = make_table(&refs);
        let cfg = SplitConfig::default().with_seed(7);

        stratified_split(&mut first, &cfg).unwrap();
        stratified_split(&mut second, &cfg).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_different_seed_may_change_assignment() {
        let series: Vec<(String, &str)> = (0..40).map(|i| (format!("S{}", i), "a")).collect();
        let refs: Vec<(&str, &str)> = series.iter().map(|(u, l)| (u.as_str(), *l)).collect();

        let mut first = make_table(&refs);
        let mut second = make_table(&refs);

        stratified_split(&mut first, &SplitConfig::default().with_seed(0)).unwrap();
        stratified_split(&mut second, &SplitConfig::default().with_seed(1)).unwrap();

        let eval_uids = |t: &MetadataTable| -> Vec<String> {
            t.rows()
                .iter()
                .filter(|r| r.split() == Some(Split::Eval))
                .map(|r| r.series_uid().unwrap().to_string())
                .collect()
        };
        assert_ne!(eval_uids(&first), eval_uids(&second));
    }

    #[test]
    fn test_single_series_label_goes_to_train() {
        let mut table = make_table(&[("S1", "rare"), ("S2", "common"), ("S3", "common")]);
        stratified_split(&mut table, &SplitConfig::default()).unwrap();
        assert_eq!(table.get("S1").unwrap().split(), Some(Split::Train));
    }

    #[test]
    fn test_at_least_one_train_per_label() {
        // A high eval fraction must never drain a label class completely.
        let mut table = make_table(&[("S1", "a"), ("S2", "a")]);
        stratified_split(&mut table, &SplitConfig::default().with_eval_fraction(0.9)).unwrap();
        let (train, eval) = split_counts(&table, "a");
        assert_eq!((train, eval), (1, 1));
    }

    #[test]
    fn test_missing_label_is_config_error() {
        let mut table = MetadataTable::new();
        let mut row = MetadataRow::new();
        row.set(COL_SERIES_UID, "S1");
        table.push(row).unwrap();

        let result = stratified_split(&mut table, &SplitConfig::default());
        assert!(matches!(result, Err(CurateError::Config(_))));
    }

    #[test]
    fn test_invalid_fraction_rejected_before_any_assignment() {
        let mut table = make_table(&[("S1", "a"), ("S2", "a")]);
        let result = stratified_split(&mut table, &SplitConfig::default().with_eval_fraction(1.5));
        assert!(result.is_err());
        assert!(table.rows().iter().all(|r| r.split().is_none()));
    }
}
