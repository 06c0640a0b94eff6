use derive_more::Display;

/// The outcome category of an authentication attempt.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum ResultCode {
    /// The credential matched a record with the supplied identity.
    #[display("success")]
    Success,
    /// No record matches the supplied identity.
    #[display("identity not found")]
    IdentityNotFound,
    /// More than one record matches the supplied identity and ambiguity is not allowed.
    #[display("identity ambiguous")]
    IdentityAmbiguous,
    /// The supplied credential did not match.
    #[display("credential invalid")]
    CredentialInvalid,
    /// The credential check itself failed.
    #[display("uncategorized failure")]
    Uncategorized,
}

impl ResultCode {
    /// The conventional integer value of this code: positive for success, negative for failures.
    pub fn code(self) -> i32 {
        match self {
            ResultCode::Success => 1,
            ResultCode::IdentityNotFound => -1,
            ResultCode::IdentityAmbiguous => -2,
            ResultCode::CredentialInvalid => -3,
            ResultCode::Uncategorized => -4,
        }
    }

    /// True only for [`ResultCode::Success`].
    pub fn is_valid(self) -> bool {
        self == ResultCode::Success
    }
}

/// The immutable result of one authentication attempt.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct AuthenticationResult {
    code: ResultCode,
    identity: String,
    messages: Vec<String>,
}

impl AuthenticationResult {
    /// Creates a new result.
    pub fn new(code: ResultCode, identity: impl Into<String>, messages: Vec<String>) -> Self {
        AuthenticationResult {
            code,
            identity: identity.into(),
            messages,
        }
    }

    /// Whether the attempt succeeded.
    pub fn is_valid(&self) -> bool {
        self.code.is_valid()
    }

    /// The outcome category.
    pub fn code(&self) -> ResultCode {
        self.code
    }

    /// The identity the attempt was made with.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Human readable messages collected during the attempt, oldest first.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn only_success_is_valid() {
        let ok = AuthenticationResult::new(ResultCode::Success, "alice", vec!["Authentication successful.".into()]);
        assert!(ok.is_valid());
        assert_eq!(ok.identity(), "alice");

        for code in [ResultCode::IdentityNotFound, ResultCode::IdentityAmbiguous, ResultCode::CredentialInvalid, ResultCode::Uncategorized] {
            assert!(!AuthenticationResult::new(code, "alice", vec![]).is_valid());
            assert!(code.code() < 0);
        }
    }
}
