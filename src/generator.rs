use rand::Rng;

use crate::charset::CharClass;
use crate::error::{Error, Result};

/// The user-toggleable character classes. Lowercase is always part of the
/// candidate alphabet and has no flag here.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClassSelection {
    pub uppercase: bool,
    pub numbers: bool,
    pub special: bool,
}

impl ClassSelection {
    pub fn all() -> Self {
        Self {
            uppercase: true,
            numbers: true,
            special: true,
        }
    }

    // Alphabet order is fixed: lowercase, then uppercase, numbers, special.
    fn alphabet(&self) -> Vec<u8> {
        let mut chars = Vec::new();
        chars.extend(CharClass::Lowercase.alphabet().bytes());
        if self.uppercase {
            chars.extend(CharClass::Uppercase.alphabet().bytes());
        }
        if self.numbers {
            chars.extend(CharClass::Numbers.alphabet().bytes());
        }
        if self.special {
            chars.extend(CharClass::Special.alphabet().bytes());
        }
        chars
    }
}

/// Draws `length` characters independently and uniformly (with replacement)
/// from the selected alphabet. There is no guarantee that every enabled class
/// actually appears in the output.
pub fn generate(length: usize, selection: &ClassSelection) -> Result<String> {
    let chars = selection.alphabet();
    if chars.is_empty() {
        return Err(Error::EmptyAlphabet);
    }

    let mut rng = rand::thread_rng();
    let password = (0..length)
        .map(|_| chars[rng.gen_range(0..chars.len())] as char)
        .collect();

    Ok(password)
}
