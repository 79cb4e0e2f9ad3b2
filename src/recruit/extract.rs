//! Flattening of a job opening response into a [`JobRecord`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single job opening, flattened from the recruiting platform's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub requisition_number: String,
    pub job_title: String,
    pub posting_title: String,
    /// Description as returned upstream, markup included
    pub job_description: String,
    pub salary: String,
    pub currency: String,
    pub status: String,
    pub remote_job: bool,
    pub date_opened: String,
    pub target_date: String,
    pub work_experience: String,
    pub number_of_positions: String,
    pub client_name: String,
    pub account_manager: String,
}

/// How a source value is read and what it defaults to when missing
#[derive(Debug, Clone, Copy, PartialEq)]
enum FieldKind {
    /// String or number, `""` when absent
    Text,
    /// Boolean, `false` when absent
    Flag,
    /// Lookup object whose `name` is kept, `""` when absent
    Relation,
}

struct FieldMapping {
    source: &'static str,
    target: &'static str,
    kind: FieldKind,
}

const fn field(source: &'static str, target: &'static str, kind: FieldKind) -> FieldMapping {
    FieldMapping {
        source,
        target,
        kind,
    }
}

/// Upstream key → record field. Adding a field upstream means adding a row here
/// and a member on `JobRecord`.
const JOB_FIELDS: &[FieldMapping] = &[
    field("id", "job_id", FieldKind::Text),
    field("Job_Opening_ID", "requisition_number", FieldKind::Text),
    field("Job_Opening_Name", "job_title", FieldKind::Text),
    field("Posting_Title", "posting_title", FieldKind::Text),
    field("Job_Description", "job_description", FieldKind::Text),
    field("Salary", "salary", FieldKind::Text),
    field("$currency_symbol", "currency", FieldKind::Text),
    field("Job_Opening_Status", "status", FieldKind::Text),
    field("Remote_Job", "remote_job", FieldKind::Flag),
    field("Date_Opened", "date_opened", FieldKind::Text),
    field("Target_Date", "target_date", FieldKind::Text),
    field("Work_Experience", "work_experience", FieldKind::Text),
    field("Number_of_Positions", "number_of_positions", FieldKind::Text),
    field("Client_Name", "client_name", FieldKind::Relation),
    field("Account_Manager", "account_manager", FieldKind::Relation),
];

fn read_field(record: &Map<String, Value>, mapping: &FieldMapping) -> Value {
    let raw = record.get(mapping.source);
    match mapping.kind {
        FieldKind::Text => Value::String(text_of(raw)),
        FieldKind::Flag => Value::Bool(raw.and_then(Value::as_bool).unwrap_or(false)),
        FieldKind::Relation => {
            Value::String(text_of(raw.and_then(|relation| relation.get("name"))))
        }
    }
}

fn text_of(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Extracts the first job opening from a raw API response.
///
/// Returns `None` when the response carries no `data` array or the array is
/// empty. Missing fields fall back to `""` / `false`; a missing client or
/// account manager becomes `""`.
pub fn extract_job_info(response: &Value) -> Option<JobRecord> {
    let record = response.get("data")?.as_array()?.first()?.as_object()?;

    let flattened: Map<String, Value> = JOB_FIELDS
        .iter()
        .map(|mapping| (mapping.target.to_string(), read_field(record, mapping)))
        .collect();

    // Every target is populated with the right JSON type above, so this cannot fail
    // unless the table and the struct drift apart.
    serde_json::from_value(Value::Object(flattened)).ok()
}
