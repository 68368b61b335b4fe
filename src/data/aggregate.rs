use std::collections::BTreeMap;

use super::model::Observation;

// ---------------------------------------------------------------------------
// Per-year aggregation
// ---------------------------------------------------------------------------

/// Aggregated statistics for one year across all observations in that year.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub year: i32,
    /// Indicator → mean over the observations that have a value for it.
    /// `None` when no observation in this year carried the indicator.
    means: BTreeMap<String, Option<f64>>,
}

impl YearSummary {
    /// Mean of one indicator for this year, `None` when all values were missing.
    pub fn mean(&self, indicator: &str) -> Option<f64> {
        self.means.get(indicator).copied().flatten()
    }
}

/// Per-indicator running sum/count; a count of zero means "all missing".
#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Group observations by year and compute the mean of each requested
/// indicator over the values actually present in that year.
///
/// Missing values are excluded from the mean rather than treated as zero;
/// a year where every value of an indicator is missing still appears in the
/// output, with that indicator's mean set to `None`. Output is sorted
/// ascending by year. Pure: same input, same output, no side effects.
pub fn aggregate(observations: &[Observation], indicators: &[String]) -> Vec<YearSummary> {
    let mut groups: BTreeMap<i32, BTreeMap<&str, Accumulator>> = BTreeMap::new();

    for obs in observations {
        let group = groups.entry(obs.year).or_default();
        for indicator in indicators {
            let acc = group.entry(indicator.as_str()).or_default();
            if let Some(v) = obs.value(indicator) {
                acc.sum += v;
                acc.count += 1;
            }
        }
    }

    // BTreeMap iteration gives ascending year order.
    groups
        .into_iter()
        .map(|(year, group)| {
            let means = group
                .into_iter()
                .map(|(indicator, acc)| {
                    let mean = (acc.count > 0).then(|| acc.sum / acc.count as f64);
                    (indicator.to_string(), mean)
                })
                .collect();
            YearSummary { year, means }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn obs(country: &str, year: i32, values: &[(&str, f64)]) -> Observation {
        Observation {
            country: country.to_string(),
            code: None,
            year,
            values: values
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    fn indicators(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(aggregate(&[], &indicators(&["savings"])).is_empty());
    }

    #[test]
    fn means_skip_missing_and_keep_all_missing_years() {
        let rows = vec![
            obs("A", 2018, &[("savings", 10.0)]),
            obs("B", 2018, &[("savings", 20.0)]),
            obs("A", 2019, &[]),
        ];
        let out = aggregate(&rows, &indicators(&["savings"]));

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].year, 2018);
        assert_eq!(out[0].mean("savings"), Some(15.0));
        // 2019 has no data at all, but the year is not dropped.
        assert_eq!(out[1].year, 2019);
        assert_eq!(out[1].mean("savings"), None);
    }

    #[test]
    fn output_is_sorted_ascending_by_year() {
        let rows = vec![
            obs("A", 2020, &[("savings", 1.0)]),
            obs("A", 1990, &[("savings", 2.0)]),
            obs("A", 2005, &[("savings", 3.0)]),
        ];
        let out = aggregate(&rows, &indicators(&["savings"]));
        let years: Vec<i32> = out.iter().map(|s| s.year).collect();
        assert_eq!(years, vec![1990, 2005, 2020]);
    }

    #[test]
    fn missing_one_indicator_still_counts_toward_others() {
        let rows = vec![
            obs("A", 2018, &[("savings", 10.0), ("growth", 2.0)]),
            obs("B", 2018, &[("savings", 30.0)]),
        ];
        let out = aggregate(&rows, &indicators(&["savings", "growth"]));

        assert_eq!(out[0].mean("savings"), Some(20.0));
        // B has no growth value, so the growth mean is over A alone.
        assert_eq!(out[0].mean("growth"), Some(2.0));
    }

    #[test]
    fn single_observation_mean_is_that_value() {
        let rows = vec![obs("A", 2001, &[("savings", 7.5)])];
        let out = aggregate(&rows, &indicators(&["savings"]));
        assert_eq!(out[0].mean("savings"), Some(7.5));
    }

    #[test]
    fn order_independent_up_to_float_tolerance() {
        let mut rows = vec![
            obs("A", 2018, &[("savings", 10.1)]),
            obs("B", 2018, &[("savings", 19.7)]),
            obs("C", 2018, &[("savings", 33.3)]),
        ];
        let forward = aggregate(&rows, &indicators(&["savings"]));
        rows.reverse();
        let backward = aggregate(&rows, &indicators(&["savings"]));

        let a = forward[0].mean("savings").unwrap();
        let b = backward[0].mean("savings").unwrap();
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn aggregate_is_idempotent() {
        let rows = vec![
            obs("A", 2018, &[("savings", 10.0)]),
            obs("B", 2019, &[("savings", 20.0)]),
        ];
        let names = indicators(&["savings"]);
        assert_eq!(aggregate(&rows, &names), aggregate(&rows, &names));
    }

    #[test]
    fn zero_valued_data_is_not_missing() {
        let rows = vec![obs("A", 2018, &[("savings", 0.0)])];
        let out = aggregate(&rows, &indicators(&["savings"]));
        assert_eq!(out[0].mean("savings"), Some(0.0));
    }

    #[test]
    fn gross_savings_scenario() {
        // A and B report in 2018; A's 2019 value is missing.
        let rows = vec![
            obs("A", 2018, &[("sGross", 10.0)]),
            obs("B", 2018, &[("sGross", 20.0)]),
            obs("A", 2019, &[]),
        ];
        let out = aggregate(&rows, &indicators(&["sGross"]));

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].year, 2018);
        assert_eq!(out[0].mean("sGross"), Some(15.0));
        assert_eq!(out[1].year, 2019);
        assert_eq!(out[1].mean("sGross"), None);
    }
}
