use super::model::IndicatorDataset;

// ---------------------------------------------------------------------------
// Country filter
// ---------------------------------------------------------------------------

/// Return indices of observations for `year` whose country name contains
/// `query` (case-insensitive). An empty query matches every country.
pub fn rows_for_year(dataset: &IndicatorDataset, year: i32, query: &str) -> Vec<usize> {
    let needle = query.trim().to_lowercase();

    dataset
        .observations
        .iter()
        .enumerate()
        .filter(|(_, obs)| {
            obs.year == year
                && (needle.is_empty() || obs.country.to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect()
}
