//! User Password Value Object
//!
//! Domain wrapper over `platform::password`. Signup input goes through the
//! full complexity policy; sign-in input only through the structural checks,
//! so a policy message never reveals anything about a stored account.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input, zeroized on drop
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Validate a new password against the signup policy
    pub fn new(raw: String) -> AppResult<Self> {
        ClearTextPassword::new(raw)
            .map(Self)
            .map_err(policy_error)
    }

    /// Wrap a sign-in attempt
    pub fn for_verification(raw: String) -> Option<Self> {
        ClearTextPassword::for_verification(raw).ok().map(Self)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

fn policy_error(e: PasswordPolicyError) -> AppError {
    match e {
        PasswordPolicyError::TooShort { min, .. } => {
            AppError::bad_request(format!("Password must be at least {} characters", min))
                .with_action("Please choose a longer password")
        }
        PasswordPolicyError::TooLong { max, .. } => {
            AppError::bad_request(format!("Password must be at most {} characters", max))
                .with_action("Please choose a shorter password")
        }
        PasswordPolicyError::EmptyOrWhitespace => AppError::bad_request("Password is required"),
        PasswordPolicyError::InvalidCharacter => {
            AppError::bad_request("Password contains invalid characters")
                .with_action("Please remove any control characters")
        }
        PasswordPolicyError::MissingCharacterClass => AppError::bad_request(e.to_string()),
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id hash in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        raw.inner()
            .hash(pepper)
            .map(Self)
            .map_err(|e| match e {
                PasswordHashError::HashingFailed(msg) => {
                    AppError::internal(format!("Password hashing failed: {}", msg))
                }
                PasswordHashError::InvalidHashFormat => {
                    AppError::internal("Unexpected error during password hashing")
                }
            })
    }

    /// Create from PHC string (from database)
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| AppError::internal("Invalid password hash in database"))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(raw.inner(), pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_password_validation() {
        assert!(RawPassword::new("Abc12345!".to_string()).is_ok());

        let err = RawPassword::new("abc12345".to_string()).unwrap_err();
        assert_eq!(err.status_code(), 400);
        assert!(err.message().contains("uppercase"));

        assert!(RawPassword::new("Ab1!".to_string()).is_err());
        assert_eq!(
            RawPassword::new("".to_string()).unwrap_err().message(),
            "Password is required"
        );
    }

    #[test]
    fn test_verification_input_skips_complexity() {
        assert!(RawPassword::for_verification("alllowercase".to_string()).is_some());
        assert!(RawPassword::for_verification("".to_string()).is_none());
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("Abc12345!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(hashed.verify(&raw, None));

        let wrong = RawPassword::for_verification("Abc12345?".to_string()).unwrap();
        assert!(!hashed.verify(&wrong, None));
    }

    #[test]
    fn test_phc_string_roundtrip_with_pepper() {
        let raw = RawPassword::new("Abc12345!".to_string()).unwrap();
        let pepper = b"pepper";
        let hashed = UserPassword::from_raw(&raw, Some(pepper)).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, Some(pepper)));
        assert!(!restored.verify(&raw, None));
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("Secret123!".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("Secret"));
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(format!("{:?}", hashed).contains("HASH"));
    }
}
