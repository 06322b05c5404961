//! Account credential generation.
//!
//! Emails follow the platform's `first.last@platform.com` pattern; passwords
//! are short random tokens handed to the user once at sign-up. This is not a
//! security boundary, just the record-keeping the menu shell expects.

use rand::seq::SliceRandom;
use rand::Rng;

/// Character set for generated passwords.
const PASSWORD_CHARS: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";

/// Generated password length.
const PASSWORD_LEN: usize = 6;

/// Credentials handed back to a freshly registered person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Derives the platform email for a name: lowercased, spaces stripped.
pub fn email_for(first_name: &str, last_name: &str) -> String {
    let clean = |s: &str| {
        s.chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase()
    };
    format!("{}.{}@platform.com", clean(first_name), clean(last_name))
}

/// Generates a random password from [`PASSWORD_CHARS`].
pub fn generate_password<R: Rng>(rng: &mut R) -> String {
    (0..PASSWORD_LEN)
        .map(|_| *PASSWORD_CHARS.choose(rng).unwrap() as char)
        .collect()
}
