use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::Value as JsonValue;

use super::model::{IndicatorDataset, Observation};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an indicator dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – OWID/World Bank layout: `Entity,Code,Year,<indicator columns>`
/// * `.json` – records: `[{ "country": "...", "year": 2019, "<indicator>": 12.3, ... }]`
pub fn load_file(path: &Path) -> Result<IndicatorDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names. The `Entity` (or `Country`)
/// and `Year` columns are required, `Code` is optional; every other column
/// is a numeric indicator. Empty cells are missing data, not zero;
/// non-numeric or non-finite cells are load errors, not missing data.
fn load_csv(path: &Path) -> Result<IndicatorDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let country_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("entity") || h.eq_ignore_ascii_case("country"))
        .context("CSV missing 'Entity' column")?;
    let year_idx = headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case("year"))
        .context("CSV missing 'Year' column")?;
    let code_idx = headers.iter().position(|h| h.eq_ignore_ascii_case("code"));

    let mut observations = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let country = record
            .get(country_idx)
            .unwrap_or("")
            .trim()
            .to_string();
        if country.is_empty() {
            bail!("CSV row {row_no}: empty country name");
        }

        let year_text = record.get(year_idx).unwrap_or("").trim();
        let year: i32 = year_text
            .parse()
            .with_context(|| format!("CSV row {row_no}: '{year_text}' is not a year"))?;

        let code = code_idx
            .and_then(|i| record.get(i))
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        let mut values = BTreeMap::new();
        for (col_idx, cell) in record.iter().enumerate() {
            if col_idx == country_idx || col_idx == year_idx || Some(col_idx) == code_idx {
                continue;
            }
            let cell = cell.trim();
            if cell.is_empty() {
                // Missing cell: leave the indicator absent for this row.
                continue;
            }
            let value: f64 = cell.parse().with_context(|| {
                format!(
                    "CSV row {row_no}, column '{}': '{cell}' is not a number",
                    headers[col_idx]
                )
            })?;
            // "NaN" and "inf" parse as f64 but would poison the means.
            if !value.is_finite() {
                bail!(
                    "CSV row {row_no}, column '{}': non-finite value '{cell}'",
                    headers[col_idx]
                );
            }
            values.insert(headers[col_idx].clone(), value);
        }

        observations.push(Observation {
            country,
            code,
            year,
            values,
        });
    }

    Ok(IndicatorDataset::from_observations(observations))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One record of the JSON form; indicator columns are gathered by `flatten`.
#[derive(Debug, Deserialize)]
struct RawRecord {
    country: String,
    #[serde(default)]
    code: Option<String>,
    year: i32,
    #[serde(flatten)]
    rest: BTreeMap<String, JsonValue>,
}

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "country": "Norway", "code": "NOR", "year": 2019, "gross_savings": 35.1 },
///   { "country": "Chad",   "code": "TCD", "year": 2019, "gross_savings": null }
/// ]
/// ```
///
/// `null` (or an absent key) marks a missing value.
fn load_json(path: &Path) -> Result<IndicatorDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let records: Vec<RawRecord> =
        serde_json::from_str(&text).context("parsing JSON records")?;

    let mut observations = Vec::with_capacity(records.len());

    for (i, rec) in records.into_iter().enumerate() {
        let mut values = BTreeMap::new();
        for (key, val) in rec.rest {
            match val {
                JsonValue::Null => {}
                JsonValue::Number(n) => {
                    let v = n
                        .as_f64()
                        .filter(|v| v.is_finite())
                        .with_context(|| format!("Row {i}, '{key}': number out of range"))?;
                    values.insert(key, v);
                }
                other => bail!("Row {i}, '{key}': expected number or null, got {other}"),
            }
        }
        observations.push(Observation {
            country: rec.country,
            code: rec.code,
            year: rec.year,
            values,
        });
    }

    Ok(IndicatorDataset::from_observations(observations))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(ext: &str, content: &str) -> tempfile::TempPath {
        let mut file = tempfile::Builder::new()
            .suffix(&format!(".{ext}"))
            .tempfile()
            .unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.into_temp_path()
    }

    #[test]
    fn csv_empty_cells_stay_missing() {
        let path = write_temp(
            "csv",
            "Entity,Code,Year,Gross savings (% of GDP)\n\
             Norway,NOR,2019,35.1\n\
             Chad,TCD,2019,\n",
        );
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.indicators, vec!["Gross savings (% of GDP)"]);
        assert_eq!(
            ds.observations[0].value("Gross savings (% of GDP)"),
            Some(35.1)
        );
        assert_eq!(ds.observations[1].value("Gross savings (% of GDP)"), None);
    }

    #[test]
    fn csv_rejects_non_numeric_indicator_cell() {
        let path = write_temp(
            "csv",
            "Entity,Code,Year,savings\nNorway,NOR,2019,not-a-number\n",
        );
        let err = load_file(&path).unwrap_err();
        assert!(err.to_string().contains("savings"));
    }

    #[test]
    fn csv_rejects_non_finite_cells() {
        // f64::parse accepts these spellings, but a NaN or infinity is not
        // data and must not slip in as a present value.
        for cell in ["NaN", "nan", "inf", "-inf"] {
            let path = write_temp(
                "csv",
                &format!("Entity,Code,Year,savings\nNorway,NOR,2019,{cell}\n"),
            );
            let err = load_file(&path).unwrap_err();
            assert!(err.to_string().contains("non-finite"), "cell: {cell}");
        }
    }

    #[test]
    fn csv_missing_year_column_is_an_error() {
        let path = write_temp("csv", "Entity,Code,savings\nNorway,NOR,35.1\n");
        assert!(load_file(&path).is_err());
    }

    #[test]
    fn json_null_marks_missing() {
        let path = write_temp(
            "json",
            r#"[
                { "country": "Norway", "code": "NOR", "year": 2019, "savings": 35.1 },
                { "country": "Chad", "year": 2019, "savings": null }
            ]"#,
        );
        let ds = load_file(&path).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(ds.observations[0].value("savings"), Some(35.1));
        assert_eq!(ds.observations[1].value("savings"), None);
        assert_eq!(ds.observations[1].code, None);
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let path = write_temp("parquet", "");
        assert!(load_file(&path).is_err());
    }
}
