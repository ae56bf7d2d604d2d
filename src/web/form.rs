//! Typed view of the add-columns form.
//!
//! The raw request is deserialized once and split exactly once into either a
//! save-submission or a re-display view. The persistence marker only exists
//! on the raw request, so nothing downstream of the split can trigger a
//! second persistence attempt.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::{ColumnDef, ColumnPlacement, TransformationMeta};

use super::error::AppError;
use super::fields::{self, FieldResolution};

#[derive(Debug, Deserialize)]
pub struct AddFieldRequest {
    #[serde(default)]
    pub db: Option<String>,
    #[serde(default)]
    pub table: Option<String>,

    /// Partial-continuation marker: the user asked for more field groups.
    #[serde(default, deserialize_with = "marker")]
    pub submit_num_fields: bool,
    #[serde(default, deserialize_with = "lenient_count")]
    pub num_fields: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub orig_num_fields: u32,
    #[serde(default, deserialize_with = "lenient_count")]
    pub added_fields: u32,

    #[serde(default)]
    pub field_where: Option<String>,
    #[serde(default)]
    pub after_field: Option<String>,
    #[serde(default)]
    pub orig_field_where: Option<String>,
    #[serde(default)]
    pub orig_after_field: Option<String>,

    /// Persistence marker: execute the schema change instead of re-rendering.
    #[serde(default, deserialize_with = "marker")]
    pub do_save_data: bool,

    #[serde(default)]
    pub columns: Vec<ColumnField>,
}

/// One field group of the form, as a typed record.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnField {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub sql_type: String,
    #[serde(default = "nullable_default")]
    pub nullable: bool,
    #[serde(default)]
    pub default: Option<String>,
    #[serde(default)]
    pub mime: Option<TransformationMeta>,
}

impl ColumnField {
    pub fn to_column_def(&self) -> ColumnDef {
        ColumnDef {
            name: self.name.trim().to_string(),
            sql_type: self.sql_type.clone(),
            nullable: self.nullable,
            default: self.default.clone(),
        }
    }
}

/// The one-pass split of a raw request.
#[derive(Debug)]
pub enum FormAction {
    Save(SaveSubmission),
    Render(RedisplayView),
}

/// A request whose intent is to execute the schema change.
#[derive(Debug)]
pub struct SaveSubmission {
    pub columns: Vec<ColumnField>,
    pub placement: ColumnPlacement,
}

/// The narrower view handed to the rendering path. It cannot carry the
/// persistence marker.
#[derive(Debug)]
pub struct RedisplayView {
    pub resolution: FieldResolution,
    pub placement: ColumnPlacement,
}

impl AddFieldRequest {
    /// Both identifiers are required before any further processing.
    pub fn target(&self) -> Result<(String, String), AppError> {
        let db = required(&self.db).ok_or(AppError::MissingParameter("db"))?;
        let table = required(&self.table).ok_or(AppError::MissingParameter("table"))?;
        Ok((db, table))
    }

    /// Effective insertion anchor. During a partial continuation the
    /// original anchor values override whatever the current form carries.
    pub fn placement(&self) -> ColumnPlacement {
        let (field_where, after_field) = if self.submit_num_fields {
            (
                self.orig_field_where
                    .as_deref()
                    .or(self.field_where.as_deref()),
                self.orig_after_field
                    .as_deref()
                    .or(self.after_field.as_deref()),
            )
        } else {
            (self.field_where.as_deref(), self.after_field.as_deref())
        };
        ColumnPlacement::from_form(field_where, after_field)
    }

    /// Consumes the request. After this call the persistence marker is gone:
    /// a save-submission yields the column payload, anything else yields the
    /// re-display view.
    pub fn into_action(self) -> FormAction {
        let placement = self.placement();
        if self.do_save_data {
            FormAction::Save(SaveSubmission {
                columns: self.columns,
                placement,
            })
        } else {
            FormAction::Render(RedisplayView {
                resolution: fields::resolve(&self),
                placement,
            })
        }
    }
}

fn required(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn nullable_default() -> bool {
    true
}

/// Count fields coerce leniently: numbers and numeric strings parse,
/// everything else (including garbage) becomes 0. Deserialization of a
/// count never fails the request.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_count(&value))
}

fn coerce_count(value: &Value) -> u32 {
    let raw = match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    };
    raw.clamp(0, i64::from(u32::MAX)) as u32
}

/// Markers carry presence semantics: an HTML submit button posts its label,
/// a JSON client posts `true`. Absent, null, `false`, `""` and `"0"` all
/// mean "not present".
fn marker<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => b,
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Some(Value::String(s)) => {
            !s.is_empty() && s != "0" && !s.eq_ignore_ascii_case("false")
        }
        Some(_) => true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: Value) -> AddFieldRequest {
        serde_json::from_value(value).expect("request should deserialize")
    }

    #[test]
    fn counts_coerce_instead_of_failing() {
        let req = request(json!({
            "num_fields": "12",
            "orig_num_fields": "not a number",
            "added_fields": null
        }));
        assert_eq!(req.num_fields, 12);
        assert_eq!(req.orig_num_fields, 0);
        assert_eq!(req.added_fields, 0);

        let negative = request(json!({ "num_fields": -3 }));
        assert_eq!(negative.num_fields, 0);
    }

    #[test]
    fn markers_follow_presence_semantics() {
        assert!(request(json!({ "do_save_data": true })).do_save_data);
        assert!(request(json!({ "do_save_data": "Save" })).do_save_data);
        assert!(request(json!({ "do_save_data": 1 })).do_save_data);
        assert!(!request(json!({ "do_save_data": "" })).do_save_data);
        assert!(!request(json!({ "do_save_data": "0" })).do_save_data);
        assert!(!request(json!({})).do_save_data);
    }

    #[test]
    fn target_requires_both_identifiers() {
        let missing_db = request(json!({ "table": "parts" }));
        assert!(matches!(
            missing_db.target(),
            Err(AppError::MissingParameter("db"))
        ));

        let blank_table = request(json!({ "db": "shop", "table": "   " }));
        assert!(matches!(
            blank_table.target(),
            Err(AppError::MissingParameter("table"))
        ));

        let ok = request(json!({ "db": "shop", "table": "parts" }));
        assert_eq!(ok.target().unwrap(), ("shop".into(), "parts".into()));
    }

    #[test]
    fn continuation_uses_original_anchor_over_current() {
        let req = request(json!({
            "submit_num_fields": true,
            "field_where": "after",
            "after_field": "label",
            "orig_field_where": "after",
            "orig_after_field": "id"
        }));
        assert_eq!(req.placement(), ColumnPlacement::After("id".to_string()));
    }

    #[test]
    fn fresh_request_uses_current_anchor() {
        let req = request(json!({
            "field_where": "after",
            "after_field": "label"
        }));
        assert_eq!(req.placement(), ColumnPlacement::After("label".to_string()));
    }

    #[test]
    fn split_strips_the_persistence_marker() {
        let save = request(json!({
            "do_save_data": true,
            "columns": [{ "name": "sku", "type": "VARCHAR(32)" }]
        }));
        match save.into_action() {
            FormAction::Save(submission) => {
                assert_eq!(submission.columns.len(), 1);
                assert_eq!(submission.columns[0].name, "sku");
            }
            other => panic!("expected save action, got {other:?}"),
        }

        let render = request(json!({ "num_fields": 2 }));
        match render.into_action() {
            FormAction::Render(view) => {
                assert_eq!(view.resolution.count, 2);
                assert!(!view.resolution.regenerate);
            }
            other => panic!("expected render action, got {other:?}"),
        }
    }

    #[test]
    fn column_field_trims_name_for_schema_use() {
        let req = request(json!({
            "columns": [{ "name": "  sku  ", "type": "TEXT", "nullable": false }]
        }));
        let def = req.columns[0].to_column_def();
        assert_eq!(def.name, "sku");
        assert!(!def.nullable);
    }
}
