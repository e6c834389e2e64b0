use indexmap::IndexSet;
use itertools::Itertools;

/// Cartesian product across component axes, one tuple per element.
///
/// The last axis varies fastest. Duplicate tuples are kept.
pub fn product(axes: &[Vec<f64>]) -> Vec<Vec<f64>> {
    axes.iter()
        .map(|axis| axis.iter().copied())
        .multi_cartesian_product()
        .collect()
}

/// Cartesian product across component axes with duplicate tuples removed.
///
/// Tuples compare by value (`-0.0 == 0.0`). The first occurrence of each
/// tuple keeps its position in product order, so the output is
/// deterministic for identical axes.
pub fn unique_combinations(axes: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let mut seen: IndexSet<Vec<u64>> = IndexSet::new();
    for tuple in axes
        .iter()
        .map(|axis| axis.iter().copied())
        .multi_cartesian_product()
    {
        seen.insert(tuple.into_iter().map(value_key).collect());
    }
    seen.into_iter()
        .map(|key| key.into_iter().map(f64::from_bits).collect())
        .collect()
}

fn value_key(value: f64) -> u64 {
    // Adding positive zero folds -0.0 onto 0.0.
    (value + 0.0).to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_order_matches_nested_loops() {
        let combos = product(&[vec![0.0, 1.0], vec![5.0, 6.0, 7.0]]);
        assert_eq!(
            combos,
            vec![
                vec![0.0, 5.0],
                vec![0.0, 6.0],
                vec![0.0, 7.0],
                vec![1.0, 5.0],
                vec![1.0, 6.0],
                vec![1.0, 7.0],
            ]
        );
    }

    #[test]
    fn duplicates_collapse_to_first_seen() {
        let combos = unique_combinations(&[vec![1.0, 1.0, 2.0], vec![3.0]]);
        assert_eq!(combos, vec![vec![1.0, 3.0], vec![2.0, 3.0]]);
    }

    #[test]
    fn signed_zero_is_one_value() {
        let combos = unique_combinations(&[vec![0.0, -0.0]]);
        assert_eq!(combos.len(), 1);
    }

    #[test]
    fn distinct_axes_keep_full_product() {
        let axes = vec![vec![0.0, 0.5, 1.0], vec![0.0, 0.5, 1.0]];
        assert_eq!(unique_combinations(&axes).len(), 9);
        assert_eq!(product(&axes).len(), 9);
    }
}
