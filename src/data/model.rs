use std::collections::{BTreeMap, BTreeSet};

// ---------------------------------------------------------------------------
// Observation – one row of the source table
// ---------------------------------------------------------------------------

/// A single observation: one country in one year, with a value per indicator
/// column. An indicator absent from `values` means the source had no data for
/// that country-year; absence is the missing marker and is never collapsed
/// into `0.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    /// Country name (the `Entity` column).
    pub country: String,
    /// Optional ISO code (the `Code` column; aggregates like "World" have none).
    pub code: Option<String>,
    /// Calendar year.
    pub year: i32,
    /// Indicator column → value. Missing cells are simply not present.
    pub values: BTreeMap<String, f64>,
}

impl Observation {
    /// Value of one indicator, `None` when the source had no data.
    pub fn value(&self, indicator: &str) -> Option<f64> {
        self.values.get(indicator).copied()
    }
}

// ---------------------------------------------------------------------------
// IndicatorDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed indices.
#[derive(Debug, Clone)]
pub struct IndicatorDataset {
    /// All observations (rows).
    pub observations: Vec<Observation>,
    /// Ordered list of indicator column names (excludes country, code, year).
    pub indicators: Vec<String>,
    /// Sorted distinct years present in the data.
    pub years: Vec<i32>,
    /// Sorted distinct country names.
    pub countries: BTreeSet<String>,
}

impl IndicatorDataset {
    /// Build indices from the loaded observations.
    pub fn from_observations(observations: Vec<Observation>) -> Self {
        let mut indicator_set: BTreeSet<String> = BTreeSet::new();
        let mut year_set: BTreeSet<i32> = BTreeSet::new();
        let mut countries: BTreeSet<String> = BTreeSet::new();

        for obs in &observations {
            for col in obs.values.keys() {
                indicator_set.insert(col.clone());
            }
            year_set.insert(obs.year);
            countries.insert(obs.country.clone());
        }

        IndicatorDataset {
            observations,
            indicators: indicator_set.into_iter().collect(),
            years: year_set.into_iter().collect(),
            countries,
        }
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }
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

    #[test]
    fn indices_are_sorted_and_deduplicated() {
        let ds = IndicatorDataset::from_observations(vec![
            obs("Norway", 2019, &[("savings", 35.1)]),
            obs("Chile", 2017, &[("savings", 20.4), ("gdp_growth", 1.2)]),
            obs("Norway", 2017, &[("savings", 33.0)]),
        ]);

        assert_eq!(ds.indicators, vec!["gdp_growth", "savings"]);
        assert_eq!(ds.years, vec![2017, 2019]);
        assert_eq!(ds.countries.len(), 2);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn missing_value_is_absent_not_zero() {
        let o = obs("Chad", 2018, &[]);
        assert_eq!(o.value("savings"), None);

        let o = obs("Chad", 2018, &[("savings", 0.0)]);
        assert_eq!(o.value("savings"), Some(0.0));
    }
}
