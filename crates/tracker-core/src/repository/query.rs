//! Select queries: equality filters plus one ordering column

use std::cmp::Ordering;

use chrono::DateTime;
use serde_json::Value;

use crate::domain::Record;

#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    pub column: String,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub filters: Vec<Filter>,
    pub order: Option<Order>,
}

impl Query {
    /// Every row, unordered
    pub fn all() -> Self {
        Self::default()
    }

    /// Every row of `T` in its default order
    pub fn for_record<T: Record>() -> Self {
        Self::all().order_by(T::ORDER_BY, T::ASCENDING)
    }

    pub fn eq(mut self, column: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter {
            column: column.to_string(),
            value: value.into(),
        });
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some(Order {
            column: column.to_string(),
            ascending,
        });
        self
    }

    pub fn matches(&self, row: &Value) -> bool {
        self.filters
            .iter()
            .all(|f| values_equal(&row[f.column.as_str()], &f.value))
    }

    /// Sorts rows by the order column; ties break on `id` in the same direction
    pub fn sort(&self, rows: &mut [Value]) {
        let Some(order) = &self.order else { return };
        rows.sort_by(|a, b| {
            let ord = compare_values(&a[order.column.as_str()], &b[order.column.as_str()])
                .then_with(|| compare_values(&a["id"], &b["id"]));
            if order.ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }

    /// PostgREST query parameters: `select=*`, `col=eq.value`, `order=col.dir`
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), "*".to_string())];
        for filter in &self.filters {
            params.push((filter.column.clone(), format!("eq.{}", plain_value(&filter.value))));
        }
        if let Some(order) = &self.order {
            let dir = if order.ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{}.{}", order.column, dir)));
        }
        params
    }
}

/// Renders a filter value the way PostgREST expects it (strings unquoted)
fn plain_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a.as_f64(), b.as_f64()) {
        (Some(x), Some(y)) => x == y,
        _ => a == b,
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::String(x), Value::String(y)) => {
            // Timestamps carry a variable number of fractional digits, so
            // compare them as instants rather than text.
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        _ => Ordering::Equal,
    }
}
