//! Argon2id password digests
//!
//! The policy applies only when a password is chosen (sign-up, seeding).
//! Sign-in input is normalised and hashed, never rejected, so tightening
//! the policy cannot lock out existing accounts.

use std::fmt;
use std::ops::RangeInclusive;

use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bounds in Unicode scalar values after NFKC
pub const PASSWORD_LENGTH: RangeInclusive<usize> = 8..=128;

/// Shown to the user as the `password` field message
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("password must be at least {} characters", PASSWORD_LENGTH.start())]
    TooShort,

    #[error("password must be at most {} characters", PASSWORD_LENGTH.end())]
    TooLong,

    #[error("password cannot be blank")]
    Blank,

    #[error("password contains invalid control characters")]
    ControlCharacter,

    #[error("password is too common or follows a predictable pattern")]
    Guessable,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    Hashing(argon2::password_hash::Error),

    #[error("Invalid password hash format")]
    Malformed,
}

/// A password as typed; wiped from memory on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalise and check against the sign-up policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw);
        check_policy(&password.0)?;
        Ok(password)
    }

    /// Normalise only
    pub fn for_verification(mut raw: String) -> Self {
        let normalized = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    fn with_pepper(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let pepper = pepper.unwrap_or_default();
        let mut bytes = Vec::with_capacity(self.0.len() + pepper.len());
        bytes.extend_from_slice(self.0.as_bytes());
        bytes.extend_from_slice(pepper);
        bytes
    }

    /// Argon2id with default parameters and a fresh salt
    pub fn hash(&self, pepper: Option<&[u8]>) -> Result<HashedPassword, PasswordHashError> {
        let mut input = self.with_pepper(pepper);
        let salt = SaltString::generate(OsRng);
        let digest = Argon2::default()
            .hash_password(&input, &salt)
            .map(|hash| hash.to_string());
        input.zeroize();

        digest
            .map(HashedPassword)
            .map_err(PasswordHashError::Hashing)
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClearTextPassword([REDACTED])")
    }
}

/// PHC-format digest, as stored in `password_digest`
///
/// ```rust
/// use platform::password::ClearTextPassword;
///
/// let password = ClearTextPassword::new("violet-otter-lamp".to_string()).unwrap();
/// let digest = password.hash(None).unwrap();
/// assert!(digest.verify(&password, None));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    pub fn from_phc_string(phc: impl Into<String>) -> Result<Self, PasswordHashError> {
        let phc = phc.into();
        PasswordHash::new(&phc).map_err(|_| PasswordHashError::Malformed)?;
        Ok(Self(phc))
    }

    pub fn as_phc_string(&self) -> &str {
        &self.0
    }

    /// Constant-time inside argon2; a corrupt digest never matches
    pub fn verify(&self, password: &ClearTextPassword, pepper: Option<&[u8]>) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.0) else {
            return false;
        };

        let mut input = password.with_pepper(pepper);
        let matches = Argon2::default().verify_password(&input, &parsed).is_ok();
        input.zeroize();
        matches
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashedPassword([HASH])")
    }
}

fn check_policy(password: &str) -> Result<(), PasswordPolicyError> {
    if password.trim().is_empty() {
        return Err(PasswordPolicyError::Blank);
    }

    let len = password.chars().count();
    if len < *PASSWORD_LENGTH.start() {
        return Err(PasswordPolicyError::TooShort);
    }
    if len > *PASSWORD_LENGTH.end() {
        return Err(PasswordPolicyError::TooLong);
    }

    // Tab and newline are allowed
    if password
        .chars()
        .any(|c| c.is_control() && !matches!(c, '\t' | '\n'))
    {
        return Err(PasswordPolicyError::ControlCharacter);
    }

    if is_guessable(&password.to_lowercase()) {
        return Err(PasswordPolicyError::Guessable);
    }

    Ok(())
}

const KEYBOARD_RUNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];

const COMMON_PASSWORDS: &[&str] = &[
    "password",
    "password1",
    "password123",
    "abcdefgh",
    "letmein1",
    "welcome1",
    "admin123",
    "iloveyou",
    "sunshine",
    "princess",
    "football",
    "baseball",
    "trustno1",
];

fn is_guessable(lower: &str) -> bool {
    let mut chars = lower.chars();
    let single_repeated = chars
        .next()
        .is_some_and(|first| chars.all(|c| c == first));

    single_repeated
        || is_digit_run(lower)
        || KEYBOARD_RUNS.iter().any(|run| lower.contains(run))
        || COMMON_PASSWORDS.contains(&lower)
}

/// `1234...` or `9876...`, wrapping between 9 and 0
fn is_digit_run(s: &str) -> bool {
    let Some(digits) = s
        .chars()
        .map(|c| c.to_digit(10))
        .collect::<Option<Vec<u32>>>()
    else {
        return false;
    };
    if digits.len() < 4 {
        return false;
    }

    let steps_by = |delta: u32| digits.windows(2).all(|w| (w[0] + delta) % 10 == w[1]);
    steps_by(1) || steps_by(9)
}
