use derive_more::Display;
use serde_json::Value;

/// A comparison operator usable in a [`Filter`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Display)]
pub enum Operator {
    /// `column = value`
    #[display("=")]
    Equals,
    /// `column <> value`
    #[display("<>")]
    NotEquals,
    /// `column > value`
    #[display(">")]
    GreaterThan,
    /// `column >= value`
    #[display(">=")]
    GreaterThanOrEquals,
    /// `column < value`
    #[display("<")]
    LessThan,
    /// `column <= value`
    #[display("<=")]
    LessThanOrEquals,
    /// `column LIKE value`
    #[display("LIKE")]
    Like,
}

/// One condition of a [`Select`]. All conditions of a select must hold.
#[derive(Clone, PartialEq, Debug)]
pub enum Filter {
    /// Compares a column with a value that is bound as a parameter.
    Compare {
        /// The column to compare.
        column: String,
        /// How to compare it.
        operator: Operator,
        /// The value to compare against.
        value: Value,
    },
    /// `column IS NULL`
    IsNull(String),
    /// `column IS NOT NULL`
    IsNotNull(String),
}

/// Describes a SELECT statement on a single table.
///
/// An empty column list selects all columns.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct Select {
    table: String,
    columns: Vec<String>,
    filters: Vec<Filter>,
}

impl Select {
    /// Creates a select of all columns of `table`.
    pub fn new(table: impl Into<String>) -> Self {
        Select {
            table: table.into(),
            ..Default::default()
        }
    }

    /// Sets the table to select from.
    pub fn set_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self
    }

    /// The table to select from. Empty if not set yet.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Restricts the selected columns. Pass an empty list to select all columns again.
    pub fn set_columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// The selected columns, empty meaning all.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// The conditions added so far, in order.
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Starts adding conditions. Call [`Where::end`] to get back to the select.
    pub fn where_(&mut self) -> Where<'_> {
        Where { select: self }
    }
}

/// Adds conditions to a [`Select`].
#[derive(Debug)]
pub struct Where<'a> {
    select: &'a mut Select,
}

impl<'a> Where<'a> {
    fn compare(self, column: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        self.select.filters.push(Filter::Compare {
            column: column.into(),
            operator,
            value: value.into(),
        });
        self
    }

    /// `column = value`
    pub fn equals(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.compare(column, Operator::Equals, value)
    }

    /// `column <> value`
    pub fn not_equals(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.compare(column, Operator::NotEquals, value)
    }

    /// `column > value`
    pub fn greater_than(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.compare(column, Operator::GreaterThan, value)
    }

    /// `column >= value`
    pub fn greater_than_or_equals(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.compare(column, Operator::GreaterThanOrEquals, value)
    }

    /// `column < value`
    pub fn less_than(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.compare(column, Operator::LessThan, value)
    }

    /// `column <= value`
    pub fn less_than_or_equals(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.compare(column, Operator::LessThanOrEquals, value)
    }

    /// `column LIKE pattern`
    pub fn like(self, column: impl Into<String>, pattern: impl Into<String>) -> Self {
        let pattern: String = pattern.into();
        self.compare(column, Operator::Like, pattern)
    }

    /// `column IS NULL`
    pub fn is_null(self, column: impl Into<String>) -> Self {
        self.select.filters.push(Filter::IsNull(column.into()));
        self
    }

    /// `column IS NOT NULL`
    pub fn is_not_null(self, column: impl Into<String>) -> Self {
        self.select.filters.push(Filter::IsNotNull(column.into()));
        self
    }

    /// Returns to the select.
    pub fn end(self) -> &'a mut Select {
        self.select
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn filters_accumulate_in_order() {
        let mut select = Select::new("user");
        select.where_().equals("is_admin", 1).end();
        select.where_().is_not_null("password").like("email", "%@x.com").end();

        assert_eq!(
            select.filters(),
            [
                Filter::Compare {
                    column: "is_admin".into(),
                    operator: Operator::Equals,
                    value: json!(1)
                },
                Filter::IsNotNull("password".into()),
                Filter::Compare {
                    column: "email".into(),
                    operator: Operator::Like,
                    value: json!("%@x.com")
                },
            ]
        );
    }

    #[test]
    fn clones_are_independent() {
        let mut select = Select::new("user");
        let mut copy = select.clone();
        copy.set_table("admin").where_().equals("id", 1).end();

        assert_eq!(select.table(), "user");
        assert!(select.filters().is_empty());
        select.set_columns(["email"]);
        assert!(copy.columns().is_empty());
    }
}
