//! Schema model, single-sample type inference, and DDL rendering.
//!
//! This module owns the [`ColumnSpec`] and [`TableSchema`] types, the
//! value-to-SQL-type inference, header name normalization, and the
//! `CREATE TABLE` statement renderer. The whole pipeline is exposed as
//! [`render_schema`], a pure function from `(table_name, content)` to the
//! rendered statement; all file I/O stays in the caller.
//!
//! Type inference looks at exactly one sampled value per column (the first
//! data row). A column whose first value happens to be numeric is declared
//! `numeric` regardless of later rows.

use anyhow::{Context, Result};
use heck::ToSnakeCase;

use crate::{
    error::SchemaError,
    rows::{self, RawField},
};

const DEFAULT_TYPE: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: String,
    pub sql_type: String,
    pub default_expr: Option<String>,
    pub not_null: bool,
}

#[derive(Debug, Clone)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnSpec>,
}

/// The fixed audit columns prepended to every generated schema, in order:
/// `id` (primary key), `created_at`, `updated_at`.
pub fn audit_columns() -> Vec<ColumnSpec> {
    vec![
        ColumnSpec {
            name: "id".to_string(),
            sql_type: "bigserial".to_string(),
            default_expr: None,
            not_null: true,
        },
        ColumnSpec {
            name: "created_at".to_string(),
            sql_type: "timestamp".to_string(),
            default_expr: Some("NOW()".to_string()),
            not_null: true,
        },
        ColumnSpec {
            name: "updated_at".to_string(),
            sql_type: "timestamp".to_string(),
            default_expr: Some("NOW()".to_string()),
            not_null: true,
        },
    ]
}

/// Maps a sampled value to a SQL type name.
///
/// Precedence: empty after trimming -> `text`, parses as `f64` -> `numeric`,
/// `true`/`false` in any ASCII case -> `bool`, anything else -> `text`.
/// Integer literals such as `1` and `0` hit the float branch first and
/// therefore infer `numeric`, never `bool`.
pub fn sql_type_for(value: &str) -> &'static str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return DEFAULT_TYPE;
    }
    if trimmed.parse::<f64>().is_ok() {
        return "numeric";
    }
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        return "bool";
    }
    DEFAULT_TYPE
}

/// Converts a CSV header into a `lower_snake_case` column name.
pub fn normalize_name(raw: &str, position: usize) -> Result<String> {
    if raw.trim().is_empty() {
        return Err(SchemaError::EmptyName { position }.into());
    }
    Ok(raw.to_snake_case())
}

fn column_from_field(field: &RawField, position: usize) -> Result<ColumnSpec> {
    let name = normalize_name(&field.name, position)?;
    Ok(ColumnSpec {
        name,
        sql_type: sql_type_for(&field.sample_value).to_string(),
        default_expr: None,
        not_null: false,
    })
}

impl TableSchema {
    /// Builds the schema for `table_name`: the fixed audit columns followed
    /// by one inferred column per sampled field, in header order.
    pub fn from_fields(table_name: String, fields: &[RawField]) -> Result<Self> {
        let mut columns = audit_columns();
        for (position, field) in fields.iter().enumerate() {
            columns.push(column_from_field(field, position)?);
        }
        Ok(TableSchema {
            table_name,
            columns,
        })
    }

    /// Renders the `CREATE TABLE IF NOT EXISTS` statement. Lines join with
    /// `\n` and there is no trailing newline. Every column line and the
    /// primary-key constraint line are comma-terminated.
    pub fn render(&self) -> Result<String> {
        let mut lines = Vec::with_capacity(self.columns.len() + 4);
        lines.push(format!("CREATE TABLE IF NOT EXISTS {}", self.table_name));
        lines.push("(".to_string());
        for column in &self.columns {
            lines.push(format!("{},", column_line(column)?));
        }
        lines.push(format!(
            "CONSTRAINT {}_pk PRIMARY KEY (id),",
            self.table_name
        ));
        lines.push(")".to_string());
        Ok(lines.join("\n"))
    }
}

fn column_line(column: &ColumnSpec) -> Result<String> {
    if column.name.is_empty() {
        return Err(SchemaError::InvalidColumn { part: "name" }.into());
    }
    if column.sql_type.is_empty() {
        return Err(SchemaError::InvalidColumn { part: "type" }.into());
    }
    let mut parts = vec![column.name.as_str(), column.sql_type.as_str()];
    if let Some(default_expr) = &column.default_expr {
        parts.push("DEFAULT");
        parts.push(default_expr);
    }
    if column.not_null {
        parts.push("NOT NULL");
    }
    Ok(parts.join(" "))
}

/// The full pipeline as a pure function: split, sample, infer, render.
pub fn render_schema(table_name: &str, content: &str) -> Result<String> {
    let (header, data_rows) =
        rows::split_rows(content).context("Splitting CSV into header and data rows")?;
    let fields = rows::sample_fields(&header, &data_rows)
        .context("Pairing header names with sampled values")?;
    let schema = TableSchema::from_fields(table_name.to_string(), &fields)
        .context("Deriving column specifications")?;
    schema
        .render()
        .with_context(|| format!("Rendering CREATE TABLE statement for '{table_name}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_type_for_detects_numeric_strings() {
        assert_eq!(sql_type_for("42"), "numeric");
        assert_eq!(sql_type_for("3.14"), "numeric");
        assert_eq!(sql_type_for("-0.5"), "numeric");
        assert_eq!(sql_type_for("1e3"), "numeric");
        assert_eq!(sql_type_for("  7 "), "numeric");
    }

    #[test]
    fn sql_type_for_detects_boolean_literals() {
        assert_eq!(sql_type_for("true"), "bool");
        assert_eq!(sql_type_for("FALSE"), "bool");
        assert_eq!(sql_type_for("True"), "bool");
    }

    #[test]
    fn numeric_wins_over_boolean() {
        // "1" and "0" parse as floats before the boolean check runs.
        assert_eq!(sql_type_for("1"), "numeric");
        assert_eq!(sql_type_for("0"), "numeric");
    }

    #[test]
    fn sql_type_for_falls_back_to_text() {
        assert_eq!(sql_type_for(""), "text");
        assert_eq!(sql_type_for("   "), "text");
        assert_eq!(sql_type_for("Ann"), "text");
        assert_eq!(sql_type_for("t"), "text");
        assert_eq!(sql_type_for("2024-05-06"), "text");
    }

    #[test]
    fn normalize_name_produces_snake_case() {
        assert_eq!(normalize_name("First Name", 0).unwrap(), "first_name");
        assert_eq!(normalize_name("userID", 0).unwrap(), "user_id");
        assert_eq!(normalize_name("Active", 0).unwrap(), "active");
    }

    #[test]
    fn normalize_name_is_idempotent_on_snake_case() {
        assert_eq!(normalize_name("first_name", 0).unwrap(), "first_name");
        assert_eq!(normalize_name("age", 0).unwrap(), "age");
    }

    #[test]
    fn normalize_name_rejects_blank_headers() {
        let err = normalize_name("   ", 2).unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::EmptyName { position: 2 })
        );
    }

    #[test]
    fn column_line_includes_default_and_not_null() {
        let column = ColumnSpec {
            name: "created_at".to_string(),
            sql_type: "timestamp".to_string(),
            default_expr: Some("NOW()".to_string()),
            not_null: true,
        };
        assert_eq!(
            column_line(&column).unwrap(),
            "created_at timestamp DEFAULT NOW() NOT NULL"
        );
    }

    #[test]
    fn column_line_omits_optional_parts() {
        let column = ColumnSpec {
            name: "age".to_string(),
            sql_type: "numeric".to_string(),
            default_expr: None,
            not_null: false,
        };
        assert_eq!(column_line(&column).unwrap(), "age numeric");
    }

    #[test]
    fn column_line_rejects_empty_name_or_type() {
        let column = ColumnSpec {
            name: String::new(),
            sql_type: "text".to_string(),
            default_expr: None,
            not_null: false,
        };
        assert!(column_line(&column).is_err());

        let column = ColumnSpec {
            name: "ok".to_string(),
            sql_type: String::new(),
            default_expr: None,
            not_null: false,
        };
        assert!(column_line(&column).is_err());
    }

    #[test]
    fn audit_columns_come_first_in_fixed_order() {
        let fields = vec![RawField {
            name: "Age".to_string(),
            sample_value: "34".to_string(),
        }];
        let schema = TableSchema::from_fields("people".to_string(), &fields).expect("schema");
        let names: Vec<&str> = schema.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "created_at", "updated_at", "age"]);
    }

    #[test]
    fn render_schema_matches_expected_statement() {
        let content = "First Name,Age,Active\nAnn,34,true\n";
        let statement = render_schema("people", content).expect("render");
        let expected = "CREATE TABLE IF NOT EXISTS people\n\
            (\n\
            id bigserial NOT NULL,\n\
            created_at timestamp DEFAULT NOW() NOT NULL,\n\
            updated_at timestamp DEFAULT NOW() NOT NULL,\n\
            first_name text,\n\
            age numeric,\n\
            active bool,\n\
            CONSTRAINT people_pk PRIMARY KEY (id),\n\
            )";
        assert_eq!(statement, expected);
    }

    #[test]
    fn render_schema_keeps_header_order() {
        let content = "b,a,c\nx,1,true\n";
        let statement = render_schema("t", content).expect("render");
        let b = statement.find("b text,").expect("b column");
        let a = statement.find("a numeric,").expect("a column");
        let c = statement.find("c bool,").expect("c column");
        assert!(b < a && a < c);
    }

    #[test]
    fn render_schema_surfaces_shape_mismatch() {
        let err = render_schema("t", "a,b\nonly-one\n").unwrap_err();
        assert_eq!(
            err.downcast_ref::<SchemaError>(),
            Some(&SchemaError::ShapeMismatch { header: 2, row: 1 })
        );
    }
}
