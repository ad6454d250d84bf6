//! FILENAME: core/pivot-engine/src/aggregate.rs
//! PURPOSE: Scalar aggregation and single-field grouping.
//! CONTEXT: Values that do not coerce to a finite number never reach an
//! aggregate, so they do not count toward `count` either.

use std::collections::BTreeMap;

use engine::Row;

use crate::definition::AggregateFunction;

/// Folds `values` with `function`. Empty input yields 0 for every function.
pub fn aggregate(values: &[f64], function: AggregateFunction) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    match function {
        AggregateFunction::Sum => values.iter().sum(),
        AggregateFunction::Count => values.len() as f64,
        AggregateFunction::Average => values.iter().sum::<f64>() / values.len() as f64,
        AggregateFunction::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        AggregateFunction::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Groups rows by the label at `group_by` and aggregates the numeric values
/// at `value_key` within each group.
///
/// A group whose rows hold no numeric value still appears, with 0.
pub fn group_and_aggregate(
    rows: &[Row],
    group_by: &str,
    value_key: &str,
    function: AggregateFunction,
) -> BTreeMap<String, f64> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for row in rows {
        let bucket = groups.entry(row.value(group_by).label()).or_default();
        if let Some(n) = row.value(value_key).as_number() {
            bucket.push(n);
        }
    }

    log::debug!(
        target: "PIVOT",
        "group_and_aggregate by={} value={} fn={} groups={}",
        group_by, value_key, function, groups.len()
    );

    groups
        .into_iter()
        .map(|(label, values)| {
            let result = aggregate(&values, function);
            (label, result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_is_zero() {
        for f in AggregateFunction::ALL {
            assert_eq!(aggregate(&[], f), 0.0, "{f}");
        }
    }

    #[test]
    fn test_basic_functions() {
        assert_eq!(aggregate(&[1.0, 2.0, 3.0], AggregateFunction::Sum), 6.0);
        assert_eq!(aggregate(&[1.0, 2.0, 3.0, 4.0], AggregateFunction::Average), 2.5);
        assert_eq!(aggregate(&[1.0, 2.0, 3.0], AggregateFunction::Count), 3.0);
        assert_eq!(aggregate(&[4.0, -2.0, 9.0], AggregateFunction::Min), -2.0);
        assert_eq!(aggregate(&[4.0, -2.0, 9.0], AggregateFunction::Max), 9.0);
    }

    #[test]
    fn test_group_and_aggregate_skips_non_numeric() {
        let rows = vec![
            Row::new().with("region", "North").with("sales", 100.0),
            Row::new().with("region", "North").with("sales", "oops"),
            Row::new().with("region", "North").with("sales", "50"),
            Row::new().with("region", "South").with("sales", 200.0),
            Row::new().with("region", "East"),
        ];

        let counts = group_and_aggregate(&rows, "region", "sales", AggregateFunction::Count);
        assert_eq!(counts["North"], 2.0);
        assert_eq!(counts["South"], 1.0);
        assert_eq!(counts["East"], 0.0);

        let sums = group_and_aggregate(&rows, "region", "sales", AggregateFunction::Sum);
        assert_eq!(sums["North"], 150.0);
        let keys: Vec<&str> = sums.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["East", "North", "South"]);
    }

    #[test]
    fn test_group_labels_from_non_text_values() {
        let rows = vec![
            Row::new().with("year", 2024.0).with("v", 1.0),
            Row::new().with("year", 2024.0).with("v", 2.0),
            Row::new().with("v", 5.0),
        ];
        let sums = group_and_aggregate(&rows, "year", "v", AggregateFunction::Sum);
        assert_eq!(sums["2024"], 3.0);
        assert_eq!(sums[""], 5.0);
    }
}
