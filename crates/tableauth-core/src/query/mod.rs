//! Contains the [`Select`] query description and the [`QueryBuilder`] trait that turns it into
//! SQL.
//!
//! A [`Select`] is a plain description: a table, an optional column list and a list of filters.
//! Callers shape it through [`Select::where_`]:
//!
//! ```
//! use tableauth_core::query::Select;
//!
//! let mut select = Select::new("user");
//! select.set_columns(["email", "password"]).where_().equals("is_admin", 1).end();
//!
//! assert_eq!(select.columns(), ["email", "password"]);
//! assert_eq!(select.filters().len(), 1);
//! ```

mod builder;
pub use builder::{BuildError, QueryBuilder, Statement};

mod select;
pub use select::{Filter, Operator, Select, Where};
