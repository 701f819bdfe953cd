// src/table.rs
//
// Records -> flat string table (header + rows), ready for any tabular writer.
//
// Column order: top-level keys in first-seen order across the batch, then the
// keys found inside profile maps, also first-seen. A profile key that matches a
// top-level key shares that column and its value wins. Keys are compared after
// control characters are stripped, so `"a\u{0}"` and `"a"` are one column.

use indexmap::{IndexMap, IndexSet};
use log::debug;

use crate::config::consts::LIST_SEPARATOR;
use crate::core::sanitize::strip_control_chars;
use crate::record::{Field, Record};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn width(&self) -> usize { self.headers.len() }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Cell by row index and column name.
    pub fn cell(&self, row: usize, col: &str) -> Option<&str> {
        let c = self.column(col)?;
        self.rows.get(row)?.get(c).map(String::as_str)
    }
}

/// Flatten `records` into a table, promoting the map under `profile_key`.
/// The input is only borrowed.
pub fn flatten(records: &[Record], profile_key: &str) -> Table {
    // One merged view per record; values are borrowed.
    let merged: Vec<IndexMap<String, &Field>> = records
        .iter()
        .map(|r| merge_profile(r, profile_key))
        .collect();

    let headers = column_union(records, profile_key);

    // A column is a list column if any row holds a sequence there.
    let list_cols: Vec<bool> = headers
        .iter()
        .map(|h| merged.iter().any(|m| matches!(m.get(h.as_str()), Some(Field::List(_)))))
        .collect();

    let rows: Vec<Vec<String>> = merged
        .iter()
        .map(|m| {
            headers
                .iter()
                .zip(&list_cols)
                .map(|(h, &is_list)| {
                    let text = match m.get(h.as_str()) {
                        None => String::new(),
                        Some(Field::List(items)) => join_items(items),
                        Some(_) if is_list => String::new(),
                        Some(f) => render(f),
                    };
                    strip_control_chars(&text)
                })
                .collect::<Vec<String>>()
        })
        .collect();

    let table = Table { headers, rows };
    debug!(
        "flatten: records={} columns={} list_columns={}",
        table.len(),
        table.width(),
        list_cols.iter().filter(|b| **b).count()
    );
    table
}

/// Top-level fields (minus the profile) with profile entries laid over them.
/// Later entries under the same cleaned key overwrite earlier ones.
fn merge_profile<'a>(rec: &'a Record, profile_key: &str) -> IndexMap<String, &'a Field> {
    let mut row: IndexMap<String, &Field> = IndexMap::with_capacity(rec.len() + 2);
    let mut profile = None;
    for (k, v) in rec {
        if k == profile_key {
            match v {
                Field::Map(p) => { profile = Some(p); continue; }
                Field::Null => continue,
                // A non-map profile stays a plain column
                _ => {}
            }
        }
        row.insert(strip_control_chars(k), v);
    }
    if let Some(p) = profile {
        for (k, v) in p {
            row.insert(strip_control_chars(k), v);
        }
    }
    row
}

fn column_union(records: &[Record], profile_key: &str) -> Vec<String> {
    let mut top: IndexSet<String> = IndexSet::new();
    let mut nested: IndexSet<String> = IndexSet::new();
    for rec in records {
        for (k, v) in rec {
            if k == profile_key {
                match v {
                    Field::Map(p) => { nested.extend(p.keys().map(|k| strip_control_chars(k))); continue; }
                    Field::Null => continue,
                    _ => {}
                }
            }
            top.insert(strip_control_chars(k));
        }
    }
    top.into_iter().chain(nested).collect::<IndexSet<String>>().into_iter().collect()
}

fn join_items(items: &[Field]) -> String {
    items.iter().map(render).collect::<Vec<_>>().join(LIST_SEPARATOR)
}

/// Scalar text for one value.
fn render(f: &Field) -> String {
    match f {
        Field::Null => String::new(),
        Field::Bool(b) => b.to_string(),
        Field::Number(n) => n.to_string(),
        Field::Text(s) => s.clone(),
        Field::List(items) => join_items(items),
        // Infallible for this type: keys are strings, numbers are finite
        Field::Map(_) => serde_json::to_string(f).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Vec<Record> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn scenario_single_doctor() {
        let recs = parse(r#"[{"name":"Kim","profile":{"education":["Seoul Univ MD"],"career":["Hospital X, 2010-2020"]}}]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.headers, ["name", "education", "career"]);
        assert_eq!(t.rows, vec![vec!["Kim", "Seoul Univ MD", "Hospital X, 2010-2020"]]);
    }

    #[test]
    fn column_union_fills_blanks() {
        let recs = parse(r#"[
            {"name":"A","profile":{"education":["E1"]}},
            {"name":"B","profile":{"career":["C1"]}}
        ]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.headers, ["name", "education", "career"]);
        assert_eq!(t.cell(0, "career"), Some(""));
        assert_eq!(t.cell(1, "education"), Some(""));
        assert_eq!(t.cell(1, "career"), Some("C1"));
    }

    #[test]
    fn profile_columns_follow_all_top_level_columns() {
        let recs = parse(r#"[
            {"name":"A","profile":{"학력":["x"]}},
            {"name":"B","dept":"Surgery","profile":{"경력":["y"]}}
        ]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.headers, ["name", "dept", "학력", "경력"]);
        assert_eq!(t.cell(0, "dept"), Some(""));
    }

    #[test]
    fn list_order_is_kept() {
        let recs = parse(r#"[{"profile":{"career":["A","B","C"]}}]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.cell(0, "career"), Some("A\nB\nC"));
    }

    #[test]
    fn top_level_lists_join_too() {
        let recs = parse(r#"[{"이름":"A","학력":["a","b"]},{"이름":"B"}]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.headers, ["이름", "학력"]);
        assert_eq!(t.cell(0, "학력"), Some("a\nb"));
        assert_eq!(t.cell(1, "학력"), Some(""));
    }

    #[test]
    fn scalar_in_list_column_renders_empty() {
        let recs = parse(r#"[{"career":["A"]},{"career":"n/a"}]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.cell(1, "career"), Some(""));
    }

    #[test]
    fn profile_value_wins_on_collision() {
        let recs = parse(r#"[{"career":"top","name":"K","profile":{"career":["nested"]}}]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.headers, ["career", "name"]);
        assert_eq!(t.cell(0, "career"), Some("nested"));
    }

    #[test]
    fn null_or_missing_profile_is_tolerated() {
        let recs = parse(r#"[{"name":"A","profile":null},{"name":"B"},{"name":"C","profile":{}}]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.headers, ["name"]);
        assert_eq!(t.len(), 3);
    }

    #[test]
    fn non_map_profile_stays_a_column() {
        let recs = parse(r#"[{"name":"A","profile":"error"}]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.headers, ["name", "profile"]);
        assert_eq!(t.cell(0, "profile"), Some("error"));
    }

    #[test]
    fn scalars_render_as_text() {
        let recs = parse(r#"[{"empNo":1234,"ratio":0.5,"open":false,"memo":null,"meta":{"k":"v"}}]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.rows[0], ["1234", "0.5", "false", "", r#"{"k":"v"}"#]);
    }

    #[test]
    fn control_chars_are_stripped() {
        let recs = parse(r#"[{"name":"K\u0000im\u000b","profile":{"career":["a\u0008","b"]}}]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.cell(0, "name"), Some("Kim"));
        assert_eq!(t.cell(0, "career"), Some("a\nb"));
    }

    #[test]
    fn keys_equal_after_cleaning_share_a_column() {
        let recs = parse(r#"[{"a\u0000":"x"},{"a":"y","profile":{"b\u001f":"p"}},{"b":"q"}]"#);
        let t = flatten(&recs, "profile");
        assert_eq!(t.headers, ["a", "b"]);
        assert_eq!(t.rows, vec![vec!["x", ""], vec!["y", "p"], vec!["", "q"]]);
    }

    #[test]
    fn custom_profile_key() {
        let recs = parse(r#"[{"nm":"A","details":{"학력":["x"]}}]"#);
        let t = flatten(&recs, "details");
        assert_eq!(t.headers, ["nm", "학력"]);
    }

    #[test]
    fn input_is_untouched() {
        let recs = parse(r#"[{"name":"A\u0000","profile":{"career":["x"]}}]"#);
        let before = recs.clone();
        let _ = flatten(&recs, "profile");
        assert_eq!(recs, before);
    }
}
