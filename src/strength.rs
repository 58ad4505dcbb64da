use std::fmt;

use crate::charset;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strength {
    Weak,
    Moderate,
    Strong,
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strength::Weak => write!(f, "Weak"),
            Strength::Moderate => write!(f, "Moderate"),
            Strength::Strong => write!(f, "Strong"),
        }
    }
}

/// Three-tier heuristic, checked in priority order:
/// Strong needs length >= 12 and all four classes; Moderate needs length >= 8
/// and either mixed-case letters or digit-plus-special; everything else is
/// Weak.
pub fn classify(password: &str) -> Strength {
    let length = password.chars().count();
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| charset::SPECIAL.contains(c));

    if length >= 12 && has_upper && has_lower && has_digit && has_special {
        Strength::Strong
    } else if length >= 8 && ((has_upper && has_lower) || (has_digit && has_special)) {
        Strength::Moderate
    } else {
        Strength::Weak
    }
}
