//! Backing-table layout built from an entity type's field definitions.
//!
//! One column per field, except long text which splits into
//! `<field>__value` and `<field>__format`. Nothing here talks to a
//! database; [`TableSchema::to_create_sql`] only renders the DDL.

use entitykit_model::{EntityTypeDescriptor, FieldDefinitions, FieldSpec, FieldType};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length used for short-text columns whose field declares no `max_length`.
const DEFAULT_VARCHAR_LENGTH: u64 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Serial,
    Integer,
    BigInt,
    Boolean,
    Varchar(u64),
    Text,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Serial => f.write_str("SERIAL"),
            Self::Integer => f.write_str("INTEGER"),
            Self::BigInt => f.write_str("BIGINT"),
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Varchar(len) => write!(f, "VARCHAR({len})"),
            Self::Text => f.write_str("TEXT"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub column_type: ColumnType,
    pub not_null: bool,
    pub primary_key: bool,
    pub unique: bool,
}

impl Column {
    fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
            not_null: false,
            primary_key: false,
            unique: false,
        }
    }

    fn not_null(mut self, not_null: bool) -> Self {
        self.not_null = not_null;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<Column>,
}

impl TableSchema {
    /// Lays out the table for `descriptor`: base fields first, then the
    /// type's own fields in declaration order.
    pub fn build(descriptor: &EntityTypeDescriptor, fields: &FieldDefinitions) -> Self {
        let all = descriptor.base_field_definitions().merge(fields.clone());
        let mut columns = Vec::with_capacity(all.len() + 1);

        for (name, spec) in all.iter() {
            if name == descriptor.keys.id {
                let mut id = Column::new(name, ColumnType::Serial).not_null(true);
                id.primary_key = true;
                columns.push(id);
                continue;
            }
            if descriptor.keys.uuid.as_deref() == Some(name) {
                let mut uuid = Column::new(name, ColumnType::Varchar(128)).not_null(true);
                uuid.unique = true;
                columns.push(uuid);
                continue;
            }
            // Bundles are machine names, even when they reference a bundle entity.
            if descriptor.keys.bundle.as_deref() == Some(name) {
                columns.push(Column::new(name, ColumnType::Varchar(32)).not_null(true));
                continue;
            }
            columns.extend(columns_for(name, spec));
        }

        Self {
            table: descriptor.base_table.clone(),
            columns,
        }
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Renders a `CREATE TABLE` statement for this layout.
    pub fn to_create_sql(&self) -> String {
        let mut lines: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                let mut line = format!("  {} {}", c.name, c.column_type);
                if c.not_null {
                    line.push_str(" NOT NULL");
                }
                if c.unique {
                    line.push_str(" UNIQUE");
                }
                line
            })
            .collect();

        let keys: Vec<&str> = self
            .columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
            .collect();
        if !keys.is_empty() {
            lines.push(format!("  PRIMARY KEY ({})", keys.join(", ")));
        }

        format!("CREATE TABLE {} (\n{}\n)", self.table, lines.join(",\n"))
    }
}

fn columns_for(name: &str, spec: &FieldSpec) -> Vec<Column> {
    let required = spec.required;
    match spec.field_type {
        FieldType::String => {
            let len = spec.max_length().unwrap_or(DEFAULT_VARCHAR_LENGTH);
            vec![Column::new(name, ColumnType::Varchar(len)).not_null(required)]
        }
        FieldType::Boolean => vec![Column::new(name, ColumnType::Boolean).not_null(required)],
        FieldType::TextLong => vec![
            Column::new(&format!("{name}__value"), ColumnType::Text).not_null(required),
            Column::new(&format!("{name}__format"), ColumnType::Varchar(255)),
        ],
        FieldType::EntityReference => {
            vec![Column::new(name, ColumnType::Integer).not_null(required)]
        }
        FieldType::Timestamp => vec![Column::new(name, ColumnType::BigInt).not_null(required)],
        FieldType::Integer => vec![Column::new(name, ColumnType::Integer).not_null(required)],
        FieldType::Uuid => vec![Column::new(name, ColumnType::Varchar(128)).not_null(required)],
    }
}
