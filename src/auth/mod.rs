//! Contains the [`CallbackCheckAdapter`] and re-exports the [`Adapter`] capability it
//! implements, along with its result and error types.

pub use tableauth_core::auth::{Adapter, AuthenticationResult, Error, ErrorKind, ResultCode};

mod callback_check;
pub use callback_check::CallbackCheckAdapter;
