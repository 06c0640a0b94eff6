use tableauth_core::db::BoundValues;
use tableauth_core::query::{BuildError, Filter, QueryBuilder, Select, Statement};

/// A [`QueryBuilder`] that writes plain SQL with named placeholders (`:v1`, `:v2`, ...).
///
/// Every column is qualified with the table name:
///
/// ```
/// use tableauth::query::{GenericBuilder, QueryBuilder};
///
/// let builder = GenericBuilder::new();
/// let mut select = builder.select("user");
/// select.where_().equals("is_admin", 1).equals("email", "a@x.com").end();
///
/// let statement = builder.write(&select).unwrap();
/// assert_eq!(statement.sql, "SELECT user.* FROM user WHERE (user.is_admin = :v1) AND (user.email = :v2)");
/// assert_eq!(statement.values.len(), 2);
/// ```
///
/// Table and column names must be plain identifiers (ASCII letters, digits and `_`). They are
/// written into the SQL text verbatim, so anything else is refused.
#[derive(Clone, Copy, Debug, Default)]
pub struct GenericBuilder;

impl GenericBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        GenericBuilder
    }
}

fn identifier(name: &str) -> Result<&str, BuildError> {
    if !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(name)
    } else {
        Err(BuildError::InvalidIdentifier(name.to_string()))
    }
}

impl QueryBuilder for GenericBuilder {
    fn write(&self, query: &Select) -> Result<Statement, BuildError> {
        if query.table().is_empty() {
            return Err(BuildError::MissingTable);
        }
        let table = identifier(query.table())?;

        let columns = if query.columns().is_empty() {
            format!("{}.*", table)
        } else {
            query
                .columns()
                .iter()
                .map(|c| identifier(c).map(|c| format!("{}.{}", table, c)))
                .collect::<Result<Vec<_>, _>>()?
                .join(", ")
        };

        let mut values = BoundValues::new();
        let mut conditions = Vec::with_capacity(query.filters().len());
        for filter in query.filters() {
            let condition = match filter {
                Filter::Compare { column, operator, value } => {
                    let placeholder = format!(":v{}", values.len() + 1);
                    let condition = format!("({}.{} {} {})", table, identifier(column)?, operator, placeholder);
                    values.push(placeholder, value.clone());
                    condition
                }
                Filter::IsNull(column) => format!("({}.{} IS NULL)", table, identifier(column)?),
                Filter::IsNotNull(column) => format!("({}.{} IS NOT NULL)", table, identifier(column)?),
            };
            conditions.push(condition);
        }

        let mut sql = format!("SELECT {} FROM {}", columns, table);
        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        tracing::trace!(sql = %sql, "select written");

        Ok(Statement { sql, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn select_all_without_filters() {
        let statement = GenericBuilder.write(&Select::new("user")).unwrap();
        assert_eq!(statement.sql, "SELECT user.* FROM user");
        assert!(statement.values.is_empty());
    }

    #[test]
    fn restricted_columns() {
        let mut select = Select::new("user");
        select.set_columns(["email", "password"]).where_().equals("email", "a@x.com").end();

        let statement = GenericBuilder.write(&select).unwrap();
        assert_eq!(statement.sql, "SELECT user.email, user.password FROM user WHERE (user.email = :v1)");
        assert_eq!(statement.values.get(":v1"), Some(&json!("a@x.com")));
    }

    #[test]
    fn null_checks_bind_nothing() {
        let mut select = Select::new("user");
        select
            .where_()
            .is_not_null("password")
            .greater_than("id", 3)
            .is_null("deleted_at")
            .like("email", "%@x.com")
            .end();

        let statement = GenericBuilder.write(&select).unwrap();
        assert_eq!(
            statement.sql,
            "SELECT user.* FROM user WHERE (user.password IS NOT NULL) AND (user.id > :v1) AND (user.deleted_at IS NULL) AND (user.email LIKE :v2)"
        );
        assert_eq!(statement.values.iter().map(|(p, _)| p).collect::<Vec<_>>(), vec![":v1", ":v2"]);
    }

    #[test]
    fn refuses_missing_table() {
        assert_eq!(GenericBuilder.write(&Select::default()), Err(BuildError::MissingTable));
    }

    #[test]
    fn refuses_odd_identifiers() {
        let mut select = Select::new("user; DROP TABLE user");
        assert_eq!(
            GenericBuilder.write(&select),
            Err(BuildError::InvalidIdentifier("user; DROP TABLE user".to_string()))
        );

        select.set_table("user").where_().equals("e mail", "a@x.com").end();
        assert_eq!(GenericBuilder.write(&select), Err(BuildError::InvalidIdentifier("e mail".to_string())));
    }
}
