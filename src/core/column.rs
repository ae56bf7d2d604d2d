use serde::{Deserialize, Serialize};

/// One new column as it will appear in the schema: name, raw SQL type text
/// and the modifiers the statement builder understands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub sql_type: String,
    pub nullable: bool,
    pub default: Option<String>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            nullable: true,
            default: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }
}

/// Where a group of new columns lands inside the table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ColumnPlacement {
    /// Append after the current last column.
    #[default]
    Last,
    First,
    After(String),
}

impl ColumnPlacement {
    /// Builds a placement from the form's `field_where` / `after_field` pair.
    /// Unknown or incomplete input falls back to appending.
    pub fn from_form(field_where: Option<&str>, after_field: Option<&str>) -> Self {
        match field_where.map(str::trim) {
            Some(w) if w.eq_ignore_ascii_case("first") => Self::First,
            Some(w) if w.eq_ignore_ascii_case("after") => match after_field {
                Some(anchor) if !anchor.trim().is_empty() => {
                    Self::After(anchor.trim().to_string())
                }
                _ => Self::Last,
            },
            _ => Self::Last,
        }
    }
}

/// Display-transformation hints attached to a column, stored separately from
/// the schema itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformationMeta {
    pub mime_type: String,
    #[serde(default)]
    pub transformation: String,
    #[serde(default)]
    pub transformation_options: String,
    #[serde(default)]
    pub input_transformation: String,
    #[serde(default)]
    pub input_transformation_options: String,
}
