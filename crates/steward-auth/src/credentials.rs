//! Temporary credentials for newly created member accounts.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::AuthError;

pub const MIN_PASSWORD_LENGTH: usize = 8;

// No 0/O, 1/l or I: they are easy to misread when handed over on paper.
const LOWERCASE: &[u8] = b"abcdefghijkmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";
const DIGITS: &[u8] = b"23456789";
const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";

/// Generate a random password of `length` characters containing at least
/// one lowercase letter, uppercase letter, digit and symbol.
pub fn generate_temporary_password(length: usize) -> Result<String, AuthError> {
    if length < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort {
            min: MIN_PASSWORD_LENGTH,
            requested: length,
        });
    }

    let mut rng = rand::rng();
    let classes = [LOWERCASE, UPPERCASE, DIGITS, SYMBOLS];
    let all: Vec<u8> = classes.concat();

    let mut pick = |set: &[u8]| set[rng.random_range(0..set.len())];
    let mut chars: Vec<u8> = classes.into_iter().map(&mut pick).collect();
    while chars.len() < length {
        chars.push(pick(&all));
    }
    chars.shuffle(&mut rng);

    Ok(chars.into_iter().map(char::from).collect())
}
