use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::coerce::{coerce_to_string, to_json_literal};

/// A column defined by a SQL expression rather than a physical column name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdhocColumn {
    pub sql_expression: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_custom_label: Option<bool>,
}

impl AdhocColumn {
    pub fn new(sql_expression: impl Into<String>) -> Self {
        Self {
            sql_expression: sql_expression.into(),
            label: None,
            has_custom_label: None,
        }
    }
}

/// A column referenced by a query: a plain name or a SQL expression.
///
/// On the wire a plain column is a string and an expression column is an
/// object carrying `sqlExpression`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum QueryFormColumn {
    Plain(String),
    Expression(AdhocColumn),
}

impl From<&str> for QueryFormColumn {
    fn from(name: &str) -> Self {
        QueryFormColumn::Plain(name.to_string())
    }
}

impl From<AdhocColumn> for QueryFormColumn {
    fn from(column: AdhocColumn) -> Self {
        QueryFormColumn::Expression(column)
    }
}

/// `{col, op, val}` as found in native filters and query objects.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BinaryFilterClause {
    pub col: QueryFormColumn,
    pub op: String,
    pub val: Value,
}

impl BinaryFilterClause {
    pub fn new(col: impl Into<QueryFormColumn>, op: impl Into<String>, val: Value) -> Self {
        Self {
            col: col.into(),
            op: op.into(),
            val,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Clause {
    #[serde(rename = "WHERE")]
    Where,
    #[serde(rename = "HAVING")]
    Having,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "expressionType")]
pub enum AdhocFilter {
    #[serde(rename = "SQL", rename_all = "camelCase")]
    Sql {
        clause: Clause,
        sql_expression: String,
    },
    #[serde(rename = "SIMPLE")]
    Simple {
        clause: Clause,
        subject: String,
        operator: String,
        comparator: String,
    },
}

/// Converts a filter clause into an adhoc filter.
///
/// Expression columns become a SQL filter with the value embedded as a JSON
/// literal, so strings come out quoted. Plain columns become a simple filter
/// whose comparator is the value coerced to text, unquoted.
pub fn simple_filter_to_adhoc(filter: &BinaryFilterClause) -> AdhocFilter {
    match &filter.col {
        QueryFormColumn::Expression(column) => AdhocFilter::Sql {
            clause: Clause::Where,
            sql_expression: format!(
                "({}) {} {}",
                column.sql_expression,
                filter.op,
                to_json_literal(&filter.val)
            ),
        },
        QueryFormColumn::Plain(name) => AdhocFilter::Simple {
            clause: Clause::Where,
            subject: name.clone(),
            operator: filter.op.clone(),
            comparator: coerce_to_string(&filter.val),
        },
    }
}
