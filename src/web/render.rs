//! Editable-form rendering for the re-display path.

use crate::core::ColumnPlacement;
use crate::storage::TableSchema;

use super::fields::FieldResolution;

pub const ADD_FIELD_ROUTE: &str = "/table/add-field";

/// Renders the editable add-columns form. Implementations receive the
/// resolved field-group count and the regenerate flag; no statement has
/// been executed when this runs.
pub trait FormRenderer: Send + Sync {
    fn render(
        &self,
        route: &str,
        db: &str,
        schema: &TableSchema,
        resolution: &FieldResolution,
        placement: &ColumnPlacement,
    ) -> String;
}

/// Server-side HTML renderer: one fieldset per field group plus an
/// insertion-anchor selector fed from the current columns.
pub struct HtmlFormRenderer;

impl FormRenderer for HtmlFormRenderer {
    fn render(
        &self,
        route: &str,
        db: &str,
        schema: &TableSchema,
        resolution: &FieldResolution,
        placement: &ColumnPlacement,
    ) -> String {
        let mut html = String::with_capacity(1024);

        html.push_str(&format!(
            "<form method=\"post\" action=\"{}\" data-regenerate=\"{}\">\n",
            escape_html(route),
            resolution.regenerate
        ));
        html.push_str(&hidden("db", db));
        html.push_str(&hidden("table", schema.name()));
        html.push_str(&hidden("orig_num_fields", &resolution.count.to_string()));

        html.push_str("<select name=\"placement\">\n");
        html.push_str(&option(
            "last",
            "at end of table",
            matches!(placement, ColumnPlacement::Last),
        ));
        html.push_str(&option(
            "first",
            "at beginning of table",
            matches!(placement, ColumnPlacement::First),
        ));
        for column in schema.columns() {
            let value = format!("after:{}", column.name);
            let label = format!("after {}", column.name);
            let selected =
                matches!(placement, ColumnPlacement::After(anchor) if anchor == &column.name);
            html.push_str(&option(&value, &label, selected));
        }
        html.push_str("</select>\n");

        for index in 0..resolution.count {
            html.push_str(&format!(
                "<fieldset class=\"field-group\" data-index=\"{index}\">\n\
                 <input type=\"text\" name=\"columns[{index}][name]\" placeholder=\"Name\">\n\
                 <input type=\"text\" name=\"columns[{index}][type]\" placeholder=\"Type\">\n\
                 <input type=\"text\" name=\"columns[{index}][default]\" placeholder=\"Default\">\n\
                 <input type=\"checkbox\" name=\"columns[{index}][nullable]\" checked>\n\
                 <input type=\"text\" name=\"columns[{index}][mime][mime_type]\" placeholder=\"MIME type\">\n\
                 </fieldset>\n"
            ));
        }

        html.push_str(
            "<input type=\"number\" name=\"added_fields\" value=\"1\" min=\"1\">\n\
             <button type=\"submit\" name=\"submit_num_fields\" value=\"1\">Add more columns</button>\n\
             <button type=\"submit\" name=\"do_save_data\" value=\"1\">Save</button>\n\
             </form>\n",
        );

        html
    }
}

fn hidden(name: &str, value: &str) -> String {
    format!(
        "<input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
        escape_html(name),
        escape_html(value)
    )
}

fn option(value: &str, label: &str, selected: bool) -> String {
    format!(
        "<option value=\"{}\"{}>{}</option>\n",
        escape_html(value),
        if selected { " selected" } else { "" },
        escape_html(label)
    )
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnDef;

    fn schema() -> TableSchema {
        TableSchema::new(
            "parts",
            vec![ColumnDef::new("id", "INT"), ColumnDef::new("label", "TEXT")],
        )
    }

    #[test]
    fn renders_one_fieldset_per_group() {
        let html = HtmlFormRenderer.render(
            ADD_FIELD_ROUTE,
            "shop",
            &schema(),
            &FieldResolution {
                count: 3,
                regenerate: false,
            },
            &ColumnPlacement::Last,
        );

        assert_eq!(html.matches("<fieldset").count(), 3);
        assert!(html.contains("action=\"/table/add-field\""));
        assert!(html.contains("name=\"do_save_data\""));
    }

    #[test]
    fn anchor_selector_lists_existing_columns_and_marks_selection() {
        let html = HtmlFormRenderer.render(
            ADD_FIELD_ROUTE,
            "shop",
            &schema(),
            &FieldResolution {
                count: 1,
                regenerate: true,
            },
            &ColumnPlacement::After("id".to_string()),
        );

        assert!(html.contains("data-regenerate=\"true\""));
        assert!(html.contains("<option value=\"after:id\" selected>"));
        assert!(html.contains("<option value=\"after:label\">"));
    }

    #[test]
    fn values_are_html_escaped() {
        let schema = TableSchema::new("pa<rts>", vec![]);
        let html = HtmlFormRenderer.render(
            ADD_FIELD_ROUTE,
            "sh\"op",
            &schema,
            &FieldResolution {
                count: 1,
                regenerate: false,
            },
            &ColumnPlacement::Last,
        );

        assert!(html.contains("pa&lt;rts&gt;"));
        assert!(html.contains("sh&quot;op"));
    }
}
