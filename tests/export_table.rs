// tests/export_table.rs
//
// Table artifact end to end. Cell-level checks here go through the CSV format,
// which is plain text; tests/export_xlsx.rs reads the workbook back.
//
use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use hosp_scrape::{
    DateStamp, Doctor, ExportOptions, IntoRecord, Outcome, Record, TableFormat, convert_json_file,
    export_batch, export_json, export_table,
};

fn opts_in(dir: &Path, format: TableFormat) -> ExportOptions {
    ExportOptions {
        table_format: format,
        stamp: DateStamp::Fixed(NaiveDate::from_ymd_opt(2025, 7, 18).unwrap()),
        ..ExportOptions::in_dir(dir)
    }
}

fn parse(json: &str) -> Vec<Record> {
    serde_json::from_str(json).unwrap()
}

/// Minimal reader for the CSV this crate writes (BOM, CRLF records, quoted LFs).
fn read_csv(path: &Path) -> Vec<Vec<String>> {
    let text = fs::read_to_string(path).unwrap();
    let text = text.strip_prefix('\u{FEFF}').unwrap();
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => { chars.next(); field.push('"'); }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => row.push(std::mem::take(&mut field)),
            '\r' if !in_quotes && chars.peek() == Some(&'\n') => {
                chars.next();
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            c => field.push(c),
        }
    }
    rows
}

#[test]
fn scenario_kim() {
    let dir = tempfile::tempdir().unwrap();
    let records = parse(r#"[{"name":"Kim","profile":{"education":["Seoul Univ MD"],"career":["Hospital X, 2010-2020"]}}]"#);

    let report = export_table(&records, "scenario", &opts_in(dir.path(), TableFormat::Csv));
    let rows = read_csv(report.path().unwrap());

    assert_eq!(rows, vec![
        vec!["name", "education", "career"],
        vec!["Kim", "Seoul Univ MD", "Hospital X, 2010-2020"],
    ]);
}

#[test]
fn row_count_matches_records() {
    let dir = tempfile::tempdir().unwrap();
    for n in [1usize, 2, 17] {
        let records: Vec<Record> = (0..n)
            .map(|i| Doctor { name: format!("doc{i}"), ..Doctor::default() }.into_record())
            .collect();
        let report = export_table(&records, &format!("n{n}"), &opts_in(dir.path(), TableFormat::Csv));
        let rows = read_csv(report.path().unwrap());
        assert_eq!(rows.len(), n + 1, "header + {n} rows");
    }
}

#[test]
fn column_union_and_list_join() {
    let dir = tempfile::tempdir().unwrap();
    let records = parse(r#"[
        {"name":"A","profile":{"education":["E1","E2"]}},
        {"name":"B","profile":{"career":["A","B","C"]}}
    ]"#);
    let report = export_table(&records, "union", &opts_in(dir.path(), TableFormat::Csv));
    let rows = read_csv(report.path().unwrap());

    assert_eq!(rows[0], ["name", "education", "career"]);
    assert_eq!(rows[1], ["A", "E1\nE2", ""]);
    assert_eq!(rows[2], ["B", "", "A\nB\nC"]);
}

#[test]
fn control_chars_never_reach_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let records = parse(r#"[{"name":"K\u0000im","specialty":"heart\u000b surgery","profile":{"career":["x\u001fy"]}}]"#);
    let report = export_table(&records, "ctl", &opts_in(dir.path(), TableFormat::Csv));
    let rows = read_csv(report.path().unwrap());

    assert_eq!(rows[1], ["Kim", "heart surgery", "xy"]);
}

#[test]
fn tsv_uses_tabs_and_ext() {
    let dir = tempfile::tempdir().unwrap();
    let records = parse(r#"[{"name":"A, B","dept":"X"}]"#);
    let report = export_table(&records, "tabs", &opts_in(dir.path(), TableFormat::Tsv));
    let path = report.path().unwrap();

    assert!(path.ends_with("tabs_crawling_250718.tsv"));
    let text = fs::read_to_string(path).unwrap();
    assert!(text.contains("name\tdept\r\nA, B\tX\r\n"));
}

#[test]
fn xlsx_is_default_and_a_workbook() {
    let dir = tempfile::tempdir().unwrap();
    let records = parse(r#"[{"name":"김","profile":{"학력":["a","b"]}}]"#);
    let report = export_table(&records, "서울아산병원_amc", &ExportOptions {
        stamp: DateStamp::Fixed(NaiveDate::from_ymd_opt(2025, 7, 18).unwrap()),
        ..ExportOptions::in_dir(dir.path())
    });

    let path = report.path().expect("xlsx written");
    assert!(path.ends_with("서울아산병원_amc_crawling_250718.xlsx"));
    assert_eq!(&fs::read(path).unwrap()[..2], b"PK");
    assert!(report.to_string().starts_with("Excel saved: "));
}

#[test]
fn empty_batch_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    for format in [TableFormat::Xlsx, TableFormat::Csv] {
        let report = export_table(&[], "none", &opts_in(dir.path(), format));
        assert!(matches!(report.outcome, Outcome::Empty));
    }
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn batch_exports_are_independent() {
    let dir = tempfile::tempdir().unwrap();
    let records = parse(r#"[{"name":"A"}]"#);
    let opts = opts_in(dir.path(), TableFormat::Csv);

    // Make the JSON target a directory so only that artifact fails.
    let json_target = opts.json_path("both");
    fs::create_dir_all(&json_target).unwrap();

    let [json, table] = export_batch(&records, "both", &opts);
    assert!(json.error().is_some());
    assert!(table.error().is_none());
    assert!(table.path().unwrap().exists());
}

#[test]
fn saved_json_converts_to_table() {
    let dir = tempfile::tempdir().unwrap();
    let opts = opts_in(dir.path(), TableFormat::Csv);
    let records = parse(r#"[{"이름":"A","profNo":"1","학력":["x","y"],"경력":[]}]"#);

    let json = export_json(&records, "ajou", &opts);
    let table = convert_json_file(json.path().unwrap(), "ajou", &opts);
    let rows = read_csv(table.path().unwrap());

    assert_eq!(rows[0], ["이름", "profNo", "학력", "경력"]);
    assert_eq!(rows[1], ["A", "1", "x\ny", ""]);
}

#[test]
fn missing_json_input_is_a_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let report = convert_json_file(&dir.path().join("nope.json"), "x", &opts_in(dir.path(), TableFormat::Csv));
    assert!(matches!(report.error(), Some(hosp_scrape::ExportError::Read { .. })));
    assert!(report.path().is_none());
}
