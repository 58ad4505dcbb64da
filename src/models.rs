use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    pub website: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: String, website: String, password: String) -> Self {
        Self {
            username,
            website,
            password,
        }
    }

    /// Case-insensitive substring match over username and website. Passwords
    /// are never searched.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.username.to_lowercase().contains(&query)
            || self.website.to_lowercase().contains(&query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Credential {
        Credential::new(
            "alice".to_string(),
            "Example.com".to_string(),
            "Secret123!".to_string(),
        )
    }

    #[test]
    fn matches_username_and_website_ignoring_case() {
        let cred = sample();
        assert!(cred.matches("ALICE"));
        assert!(cred.matches("example"));
        assert!(cred.matches(""));
    }

    #[test]
    fn does_not_match_password_text() {
        let cred = sample();
        assert!(!cred.matches("Secret123"));
        assert!(!cred.matches("bob"));
    }
}
