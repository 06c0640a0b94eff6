//! Ready-made credential validation callbacks.
//!
//! A callback receives the value stored in the credential column and the credential supplied by
//! the user and answers whether they match. Returning an error instead reports the attempt as
//! [`ResultCode::Uncategorized`](crate::auth::ResultCode::Uncategorized).
//!
//! Two callbacks are bundled and can be selected by name with [`by_name`]:
//!
//! - `plain`: strict string equality ([`verify_plain`]).
//! - `pbkdf2`: PBKDF2-HMAC-SHA512 hashes as produced by [`hash_pbkdf2`] ([`verify_pbkdf2`]).

use crate::BoxError;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use ring::{
    digest::SHA512_OUTPUT_LEN,
    pbkdf2::{self, PBKDF2_HMAC_SHA512},
};
use serde_json::Value;
use std::{num::NonZeroU32, sync::Arc};
use tableauth_core::auth::{Error, ErrorKind};

/// A shareable credential validation callback: `(stored, supplied) -> matches?`.
pub type CredentialCallback = Arc<dyn Fn(&Value, &str) -> Result<bool, BoxError> + Send + Sync>;

const PBKDF2_SCHEME: &str = "pbkdf2-sha512";

/// Resolves a bundled callback by its name (`plain` or `pbkdf2`).
///
/// # Errors
///
/// Returns an [`ErrorKind::InvalidCallback`] error for any other name.
pub fn by_name(name: &str) -> Result<CredentialCallback, Error> {
    match name {
        "plain" => Ok(Arc::new(verify_plain)),
        "pbkdf2" => Ok(Arc::new(verify_pbkdf2)),
        other => Err(Error::new(ErrorKind::InvalidCallback, format!("unknown credential check {:?}", other))),
    }
}

/// Matches when the stored value is a string equal to the supplied credential. Stored values of
/// any other type never match.
pub fn verify_plain(stored: &Value, supplied: &str) -> Result<bool, BoxError> {
    Ok(stored.as_str() == Some(supplied))
}

/// Verifies the supplied credential against a stored
/// `pbkdf2-sha512$<iterations>$<base64 salt>$<base64 key>` value.
///
/// # Errors
///
/// Fails when the stored value is not a string in that format.
pub fn verify_pbkdf2(stored: &Value, supplied: &str) -> Result<bool, BoxError> {
    let stored = stored.as_str().ok_or("stored credential is not a string")?;

    let mut parts = stored.split('$');
    let (Some(PBKDF2_SCHEME), Some(iterations), Some(salt), Some(key), None) = (parts.next(), parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err("stored credential is not a pbkdf2-sha512 hash".into());
    };

    let iterations: NonZeroU32 = iterations.parse().map_err(|e| format!("bad pbkdf2 iteration count: {}", e))?;
    let salt = STANDARD.decode(salt).map_err(|e| format!("bad pbkdf2 salt: {}", e))?;
    let key = STANDARD.decode(key).map_err(|e| format!("bad pbkdf2 key: {}", e))?;

    Ok(pbkdf2::verify(PBKDF2_HMAC_SHA512, iterations, &salt, supplied.as_bytes(), &key).is_ok())
}

/// Hashes `password` into the format [`verify_pbkdf2`] understands.
pub fn hash_pbkdf2(password: &str, salt: &[u8], iterations: NonZeroU32) -> String {
    let mut key = [0u8; SHA512_OUTPUT_LEN];
    pbkdf2::derive(PBKDF2_HMAC_SHA512, iterations, salt, password.as_bytes(), &mut key);
    format!("{}${}${}${}", PBKDF2_SCHEME, iterations, STANDARD.encode(salt), STANDARD.encode(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn iterations() -> NonZeroU32 {
        NonZeroU32::new(1000).unwrap()
    }

    #[test]
    fn plain_is_strict() {
        assert!(verify_plain(&json!("secret"), "secret").unwrap());
        assert!(!verify_plain(&json!("secret"), "Secret").unwrap());
        assert!(!verify_plain(&json!(1234), "1234").unwrap());
        assert!(!verify_plain(&Value::Null, "").unwrap());
    }

    #[test]
    fn pbkdf2_round_trip() {
        let stored = json!(hash_pbkdf2("secret", b"a@x.com", iterations()));
        assert!(verify_pbkdf2(&stored, "secret").unwrap());
        assert!(!verify_pbkdf2(&stored, "wrong").unwrap());
    }

    #[test]
    fn pbkdf2_rejects_malformed_values() {
        assert!(verify_pbkdf2(&json!("$2y$10$CwKgjqgHsM8DMQALfZCvIu"), "secret").is_err());
        assert!(verify_pbkdf2(&json!("pbkdf2-sha512$0$c2FsdA==$a2V5"), "secret").is_err());
        assert!(verify_pbkdf2(&json!(42), "secret").is_err());
    }

    #[test]
    fn resolves_bundled_names() {
        assert!(by_name("plain").unwrap()(&json!("x"), "x").unwrap());
        let err = by_name("bcrypt").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidCallback);
        assert_eq!(err.to_string(), "Invalid callback provided");
    }
}
