//! Identifier casing for generated code

use convert_case::{Case, Casing};

use crate::generator::{GenerateError, GenerateResult};

/// One name in every casing the templates need
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Names {
    /// `user_profile`: file and module names
    pub snake: String,
    /// `UserProfile`: type names
    pub pascal: String,
    /// `User Profile`: doc comments
    pub title: String,
}

impl Names {
    pub fn parse(raw: &str) -> GenerateResult<Self> {
        let snake = raw.trim().to_case(Case::Snake);

        let valid = snake
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_lowercase())
            && snake
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !valid {
            return Err(GenerateError::InvalidName(raw.to_string()));
        }

        Ok(Self {
            pascal: snake.to_case(Case::Pascal),
            title: snake.to_case(Case::Title),
            snake,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_casings() {
        for raw in ["user_profile", "UserProfile", "user-profile", "user profile"] {
            let names = Names::parse(raw).unwrap();
            assert_eq!(names.snake, "user_profile");
            assert_eq!(names.pascal, "UserProfile");
            assert_eq!(names.title, "User Profile");
        }
    }

    #[test]
    fn test_invalid_names() {
        for raw in ["", "   ", "1st_thing", "héllo", "../escape"] {
            assert!(
                matches!(Names::parse(raw), Err(GenerateError::InvalidName(_))),
                "{raw:?} should be rejected"
            );
        }
    }
}
