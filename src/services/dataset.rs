//! Dataset file loading
//!
//! Reads a module's records from a local `.json` or `.csv` file.

use crate::table::{rows_from_json, FieldValue, Row};
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Load rows from a dataset file, choosing the format by extension
pub fn load_rows<P: AsRef<Path>>(path: P) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            rows_from_json_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))
        }
        Some("csv") => {
            let file = fs::File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            rows_from_csv(file).with_context(|| format!("Failed to parse {}", path.display()))
        }
        _ => bail!("Unsupported dataset format: {}", path.display()),
    }
}

/// Parse a JSON document into rows
pub fn rows_from_json_str(contents: &str) -> Result<Vec<Row>> {
    let document: serde_json::Value = serde_json::from_str(contents)?;
    Ok(rows_from_json(&document))
}

/// Parse CSV with a header row into rows
pub fn rows_from_csv<R: Read>(reader: R) -> Result<Vec<Row>> {
    let mut reader = csv::Reader::from_reader(reader);

    let headers: Vec<String> = reader
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.context("Failed to read CSV record")?;
        let mut row = Row::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            row.set(header, FieldValue::from_csv(cell));
        }
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "treasury-tui-{}-{}",
            std::process::id(),
            name
        ));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_rows_from_csv() {
        let csv = "id,payor,amount,collected_on\n\
                   1,Juan Dela Cruz,1500.00,2024-02-01\n\
                   2,Acme Corp,,2024-02-03\n";
        let rows = rows_from_csv(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("payor"), &FieldValue::Text("Juan Dela Cruz".to_string()));
        assert_eq!(rows[0].get("amount"), &FieldValue::Text("1500.00".to_string()));
        assert!(rows[1].get("amount").is_null());
        assert_eq!(
            rows[1].get("collected_on"),
            &FieldValue::Date(NaiveDate::from_ymd_opt(2024, 2, 3).unwrap(), "2024-02-03".to_string())
        );
    }

    #[test]
    fn test_rows_from_json_str_tolerates_non_array() {
        assert!(rows_from_json_str(r#"{"rows": []}"#).unwrap().is_empty());
        assert_eq!(rows_from_json_str(r#"[{"id": 1}]"#).unwrap().len(), 1);
        assert!(rows_from_json_str("not json").is_err());
    }

    #[test]
    fn test_load_rows_by_extension() {
        let json = temp_file("budget.json", r#"[{"id": 1, "status": "Draft"}]"#);
        let rows = load_rows(&json).unwrap();
        assert_eq!(rows.len(), 1);
        fs::remove_file(json).ok();

        let csv = temp_file("collections.csv", "receipt_no,amount\nOR-1,20\n");
        let rows = load_rows(&csv).unwrap();
        assert_eq!(rows[0].get("receipt_no"), &FieldValue::Text("OR-1".to_string()));
        fs::remove_file(csv).ok();
    }

    #[test]
    fn test_load_rows_errors() {
        assert!(load_rows("does-not-exist.json").is_err());

        let txt = temp_file("notes.txt", "hello");
        assert!(load_rows(&txt).is_err());
        fs::remove_file(txt).ok();
    }

    #[test]
    fn test_sample_data_loads() {
        for name in ["data/budget.json", "data/disbursements.json", "data/collections.csv"] {
            if !std::path::Path::new(name).exists() {
                // Skip when run outside the repository root
                continue;
            }
            let rows = load_rows(name).expect("sample data should load");
            assert!(!rows.is_empty(), "{} should contain records", name);
        }
    }
}
