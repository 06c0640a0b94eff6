use serde_json::{Map, Value};

/// A database row: column names mapped to values, in the order the query selected them.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Row {
    columns: Map<String, Value>,
}

impl Row {
    /// Creates an empty row.
    pub fn new() -> Self {
        Row::default()
    }

    /// Sets the value of a column, returning the previous value if the column was present.
    /// New columns are appended at the end.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.columns.insert(column.into(), value.into())
    }

    /// The value of `column`, if the row has it.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    /// Whether the row has a column with this name.
    pub fn contains_column(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    /// `(column, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Converts the row into a JSON object.
    pub fn into_json(self) -> Value {
        Value::Object(self.columns)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Row {
            columns: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl IntoIterator for Row {
    type Item = (String, Value);
    type IntoIter = serde_json::map::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.into_iter()
    }
}

/// Values bound to the named placeholders of a SQL statement, in placeholder order.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct BoundValues {
    values: Vec<(String, Value)>,
}

impl BoundValues {
    /// Creates an empty set of values.
    pub fn new() -> Self {
        BoundValues::default()
    }

    /// Binds `value` to `placeholder` (for instance `:v1`).
    pub fn push(&mut self, placeholder: impl Into<String>, value: impl Into<Value>) {
        self.values.push((placeholder.into(), value.into()));
    }

    /// The value bound to `placeholder`.
    pub fn get(&self, placeholder: &str) -> Option<&Value> {
        self.values.iter().find(|(p, _)| p == placeholder).map(|(_, v)| v)
    }

    /// `(placeholder, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(p, v)| (p.as_str(), v))
    }

    /// The number of bound values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn row_keeps_column_order() {
        let row: Row = [("id", json!(1)), ("email", json!("a@x.com")), ("password", json!("secret")), ("is_admin", json!(0))]
            .into_iter()
            .collect();
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "email", "password", "is_admin"]);
        assert_eq!(row.get("email"), Some(&json!("a@x.com")));
        assert!(row.get("nope").is_none());
    }

    #[test]
    fn row_insert_replaces_in_place() {
        let mut row = Row::new();
        row.insert("a", 1);
        row.insert("b", 2);
        assert_eq!(row.insert("a", 3), Some(json!(1)));
        assert_eq!(row.into_json(), json!({"a": 3, "b": 2}));
    }

    #[test]
    fn bound_values_lookup() {
        let mut values = BoundValues::new();
        values.push(":v1", 1);
        values.push(":v2", "a@x.com");
        assert_eq!(values.len(), 2);
        assert_eq!(values.get(":v2"), Some(&json!("a@x.com")));
        assert_eq!(values.iter().map(|(p, _)| p).collect::<Vec<_>>(), vec![":v1", ":v2"]);
    }
}
