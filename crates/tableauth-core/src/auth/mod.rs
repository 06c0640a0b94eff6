//! Contains the [`Adapter`] capability and the types it produces.
//!
//! An authentication attempt has two disjoint kinds of outcome:
//!
//! - an [`AuthenticationResult`], returned for every expected branch of a login flow (success,
//!   unknown identity, ambiguous identity, bad credential, failing credential check), and
//! - an [`Error`], returned when the attempt could not be answered at all because the adapter is
//!   misconfigured or the database could not run the query.
//!
//! Callers should handle the `Err` branch separately from inspecting [`ResultCode`]:
//!
//! ```no_run
//! use tableauth_core::auth::{Adapter, ResultCode};
//!
//! async fn login<A: Adapter>(adapter: &mut A) -> bool {
//!     adapter.set_identity("kira@example.com").set_credential("hunter2");
//!     match adapter.authenticate().await {
//!         Ok(result) => result.code() == ResultCode::Success,
//!         Err(e) => panic!("authentication adapter is misconfigured: {}", e),
//!     }
//! }
//! ```

mod adapter;
pub use adapter::Adapter;

mod error;
pub use error::{Error, ErrorKind};

mod result;
pub use result::{AuthenticationResult, ResultCode};
