//! Contains the serializable configuration of a [`CallbackCheckAdapter`].
//!
//! [`CallbackCheckAdapter`]: crate::auth::CallbackCheckAdapter

use serde::Deserialize;
use std::{fs, path::Path};

/// Adapter configuration as it appears in a configuration file.
///
/// Example:
///
/// ```json
/// {
///   "table_name": "user",
///   "identity_column": "email",
///   "credential_column": "password",
///   "credential_check": "pbkdf2",
///   "ambiguity_identity": false
/// }
/// ```
///
/// Every field is optional. Missing table or column names only surface as errors once an
/// authentication is attempted.
#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    /// The table to look identities up in.
    pub table_name: Option<String>,
    /// The column holding the identity.
    pub identity_column: Option<String>,
    /// The column holding the credential.
    pub credential_column: Option<String>,
    /// The name of a bundled credential check, see [`credential::by_name`](crate::credential::by_name).
    pub credential_check: Option<String>,
    /// Whether several rows may share an identity.
    pub ambiguity_identity: bool,
}

impl AdapterConfig {
    /// Reads the configuration from a JSON file.
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, Box<dyn std::error::Error>> {
        let json: String = fs::read_to_string(filename)?;

        Ok(AdapterConfig::from_json(&json)?)
    }

    /// Parses the configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
