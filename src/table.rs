//! Tabular input/output. Every stage reads and writes CSV; writes are
//! prefixed with a UTF-8 BOM so spreadsheet tools open the Korean text
//! correctly, and reads tolerate one.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// One source restaurant row. `address` is only needed by the enrich stage.
#[derive(Debug, Clone, Deserialize)]
pub struct InputRecord {
    pub restaurant_name: String,
    pub sig_kor_nm: String,
    pub emd_kor_nm: String,
    #[serde(default)]
    pub address: Option<String>,
}

/// Enrich stage output: source row plus the first Local API hit.
#[derive(Debug, Default, Serialize)]
pub struct EnrichedRow {
    pub restaurant_name: String,
    pub sig_kor_nm: String,
    pub emd_kor_nm: String,
    pub address: Option<String>,
    pub cleaned_address: Option<String>,
    pub title: Option<String>,
    pub link: Option<String>,
    pub category_major: Option<String>,
    pub category_minor: Option<String>,
    pub description: Option<String>,
    pub telephone: Option<String>,
    /// Lot-number (지번) address as reported by the API, distinct from the
    /// source `address` column.
    pub lot_address: Option<String>,
    pub road_address: Option<String>,
    pub mapx: Option<String>,
    pub mapy: Option<String>,
}

/// Places stage output: one row per restaurant, absences recorded as empty
/// fields and failures in `note`.
#[derive(Debug, Serialize)]
pub struct PlaceRow {
    pub restaurant_name: String,
    pub sig_kor_nm: String,
    pub emd_kor_nm: String,
    pub place_id: Option<String>,
    pub rating: Option<String>,
    pub menus: Option<String>,
    pub facilities: Option<String>,
    pub reviews: Option<String>,
    pub note: Option<String>,
    pub crawled_at: String,
}

/// Menus stage output: one row per menu item (or one error/classification
/// row per place when nothing could be parsed).
#[derive(Debug, Serialize)]
pub struct MenuRow {
    pub place_id: String,
    pub menu: Option<String>,
    pub price: Option<String>,
    pub price_num: Option<i64>,
    pub currency: &'static str,
    pub note: Option<String>,
}

/// Clean stage input: extra columns in the source file are ignored.
#[derive(Debug, Deserialize)]
pub struct RawMenuRow {
    pub place_id: String,
    #[serde(default)]
    pub menu: Option<String>,
    #[serde(default)]
    pub price: Option<String>,
}

/// Clean stage output, fully normalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedMenuRow {
    pub place_id: String,
    pub menu: String,
    pub price: String,
}

pub fn read_input(path: &Path) -> Result<Vec<InputRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open input table {}", path.display()))?;
    let records: Vec<InputRecord> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .context("input table must have columns restaurant_name, sig_kor_nm, emd_kor_nm")?;
    Ok(records)
}

/// Read the `place_id` column, preserving order and skipping empty cells.
/// A missing column is fatal before any row is processed.
pub fn read_place_ids(path: &Path) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open input table {}", path.display()))?;

    let headers = reader.headers()?.clone();
    let idx = match headers.iter().position(|h| h == "place_id") {
        Some(i) => i,
        None => bail!("input table {} has no place_id column", path.display()),
    };

    let mut ids = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(id) = record.get(idx) {
            let id = id.trim();
            if !id.is_empty() {
                ids.push(id.to_string());
            }
        }
    }
    Ok(ids)
}

pub fn read_raw_menu_rows(path: &Path) -> Result<Vec<RawMenuRow>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open input table {}", path.display()))?;
    let rows: Vec<RawMenuRow> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .context("menu table must have a place_id column")?;
    Ok(rows)
}

/// Write rows as CSV with a leading UTF-8 BOM.
pub fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create output table {}", path.display()))?;
    file.write_all(b"\xef\xbb\xbf")?;

    let mut writer = csv::Writer::from_writer(file);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn write_prefixes_bom_and_read_tolerates_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");

        let rows = vec![NormalizedMenuRow {
            place_id: "123".into(),
            menu: "아메리카노".into(),
            price: "4500".into(),
        }];
        write_rows(&path, &rows).unwrap();

        let mut bytes = Vec::new();
        File::open(&path).unwrap().read_to_end(&mut bytes).unwrap();
        assert_eq!(&bytes[..3], b"\xef\xbb\xbf");

        let back = read_raw_menu_rows(&path).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].place_id, "123");
        assert_eq!(back[0].menu.as_deref(), Some("아메리카노"));
    }

    #[test]
    fn enriched_row_keeps_both_address_forms() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("enriched.csv");

        let row = EnrichedRow {
            restaurant_name: "중국반점".into(),
            sig_kor_nm: "강남구".into(),
            emd_kor_nm: "역삼동".into(),
            lot_address: Some("서울 강남구 역삼동 1-1".into()),
            road_address: Some("서울 강남구 테헤란로 1".into()),
            ..Default::default()
        };
        write_rows(&path, &[row]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let header = text.lines().next().unwrap();
        assert!(header.contains("lot_address"));
        assert!(header.contains("road_address"));
        assert!(text.contains("서울 강남구 역삼동 1-1"));
    }

    #[test]
    fn missing_place_id_column_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "restaurant_name\n한옥집\n").unwrap();
        assert!(read_place_ids(&path).is_err());
    }

    #[test]
    fn place_ids_skip_empty_cells() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ids.csv");
        std::fs::write(&path, "place_id,menu\n123,x\n,y\n456,z\n").unwrap();
        assert_eq!(read_place_ids(&path).unwrap(), vec!["123", "456"]);
    }

    #[test]
    fn input_requires_name_and_area_columns() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        std::fs::write(&path, "restaurant_name\n한옥집\n").unwrap();
        assert!(read_input(&path).is_err());
    }

    #[test]
    fn input_address_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("in.csv");
        std::fs::write(
            &path,
            "restaurant_name,sig_kor_nm,emd_kor_nm\n한옥집,종로구,계동\n",
        )
        .unwrap();
        let records = read_input(&path).unwrap();
        assert_eq!(records[0].restaurant_name, "한옥집");
        assert!(records[0].address.is_none());
    }
}
