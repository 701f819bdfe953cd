// src/record.rs
//
// Common record shape handed from the per-hospital crawlers to the exporter.
//
// A record is an insertion-ordered map of field name -> `Field`. Crawlers that
// scrape into typed structs convert them with `IntoRecord`; crawlers that pass
// raw API payloads through deserialize straight into `Record`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::config::consts::DEFAULT_PROFILE_KEY;
use crate::core::sanitize::normalize_ws;

pub type Record = IndexMap<String, Field>;

/// One value in a record.
///
/// Variant order matters for deserialization: serde tries them top to bottom.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
    List(Vec<Field>),
    Map(Record),
}

impl Field {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Field::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool { matches!(self, Field::Null) }
}

impl From<&str> for Field {
    fn from(s: &str) -> Self { Field::Text(s.to_string()) }
}

impl From<String> for Field {
    fn from(s: String) -> Self { Field::Text(s) }
}

impl From<Vec<String>> for Field {
    fn from(v: Vec<String>) -> Self { Field::List(v.into_iter().map(Field::Text).collect()) }
}

impl From<Record> for Field {
    fn from(m: Record) -> Self { Field::Map(m) }
}

impl<T: Into<Field>> From<Option<T>> for Field {
    fn from(v: Option<T>) -> Self { v.map_or(Field::Null, Into::into) }
}

/// Conversion seam between a site-specific scrape result and the common record.
pub trait IntoRecord {
    fn into_record(self) -> Record;
}

impl IntoRecord for Record {
    fn into_record(self) -> Record { self }
}

/// Normalized doctor entry as most hospital crawlers produce it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Doctor {
    /// Hospital-side staff id, when the site exposes one.
    pub id: Option<String>,
    pub name: String,
    pub department: Option<String>,
    pub specialty: Option<String>,
    pub education: Vec<String>,
    pub career: Vec<String>,
}

impl IntoRecord for Doctor {
    fn into_record(self) -> Record {
        let clean = |s: String| normalize_ws(&s);
        let clean_list = |v: Vec<String>| -> Vec<String> {
            v.into_iter().map(|s| normalize_ws(&s)).filter(|s| !s.is_empty()).collect()
        };

        let mut profile = Record::new();
        profile.insert("education".into(), clean_list(self.education).into());
        profile.insert("career".into(), clean_list(self.career).into());

        let mut rec = Record::new();
        if let Some(id) = self.id {
            rec.insert("id".into(), clean(id).into());
        }
        rec.insert("name".into(), clean(self.name).into());
        rec.insert("department".into(), self.department.map(clean).into());
        rec.insert("specialty".into(), self.specialty.map(clean).into());
        rec.insert(DEFAULT_PROFILE_KEY.into(), profile.into());
        rec
    }
}

/// Collect typed entries into a batch.
pub fn to_batch<I>(items: I) -> Vec<Record>
where
    I: IntoIterator,
    I::Item: IntoRecord,
{
    items.into_iter().map(IntoRecord::into_record).collect()
}

/// Keep one record per distinct `key` value.
///
/// The same doctor is often listed under several departments. The kept record
/// sits where the id was first seen and holds the last occurrence's data.
/// Ids compare as stored: `"1"`, `" 1"` and `1` are three different doctors.
/// Records without a usable id (missing, null, empty string, zero) are dropped.
pub fn dedup_by_key(records: Vec<Record>, key: &str) -> Vec<Record> {
    let mut by_id: IndexMap<IdKey, Record> = IndexMap::with_capacity(records.len());
    for rec in records {
        let id = match rec.get(key).and_then(IdKey::of) {
            Some(id) => id,
            None => continue,
        };
        // IndexMap::insert keeps the first slot on overwrite
        by_id.insert(id, rec);
    }
    by_id.into_values().collect()
}

/// Dedup key. Text and numbers never collide, so `"1234"` and `1234` stay apart.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum IdKey {
    Text(String),
    Number(String),
}

impl IdKey {
    fn of(f: &Field) -> Option<Self> {
        match f {
            Field::Text(s) if !s.is_empty() => Some(IdKey::Text(s.clone())),
            Field::Number(n) if !is_zero(n) => Some(IdKey::Number(n.to_string())),
            _ => None,
        }
    }
}

fn is_zero(n: &serde_json::Number) -> bool {
    n.as_f64() == Some(0.0)
}
