//! Query descriptions and the bundled SQL writer.
//!
//! The [`Select`], [`QueryBuilder`] and friends come from `tableauth-core`; this module adds the
//! [`GenericBuilder`].

pub use tableauth_core::query::*;

mod generic;
pub use generic::GenericBuilder;
