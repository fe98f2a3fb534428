//! Short code generation.
//!
//! Codes are drawn from the 62-symbol alphabet `0-9A-Za-z` using the operating
//! system CSPRNG. Each symbol is an unbiased pick: random bytes at or above
//! [`REJECTION_BOUND`] are discarded so that `byte % 62` is uniform.

/// Symbols a generated code is made of.
pub const ALPHABET: &[u8; 62] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of a generated code unless configured otherwise.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Largest multiple of 62 that fits in a byte (62 * 4).
const REJECTION_BOUND: u8 = 248;

/// Generates a random short code of `length` symbols.
///
/// # Errors
///
/// Returns an error if the system random number generator is unavailable.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(7)?;
/// assert_eq!(code.len(), 7);
/// assert!(code.bytes().all(|b| b.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> Result<String, getrandom::Error> {
    let mut code = String::with_capacity(length);
    let mut buffer = [0u8; 32];

    while code.len() < length {
        getrandom::fill(&mut buffer)?;

        for byte in buffer.iter().copied().filter(|b| *b < REJECTION_BOUND) {
            code.push(ALPHABET[usize::from(byte % 62)] as char);
            if code.len() == length {
                break;
            }
        }
    }

    Ok(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::dto::link::is_valid_short_name;
    use std::collections::{HashMap, HashSet};

    #[test]
    fn test_generate_code_has_requested_length() {
        assert_eq!(generate_code(DEFAULT_CODE_LENGTH).unwrap().len(), 7);
        assert_eq!(generate_code(3).unwrap().len(), 3);
        assert_eq!(generate_code(32).unwrap().len(), 32);
        assert_eq!(generate_code(100).unwrap().len(), 100);
    }

    #[test]
    fn test_generate_code_uses_alphabet_only() {
        for _ in 0..100 {
            let code = generate_code(DEFAULT_CODE_LENGTH).unwrap();
            assert!(code.bytes().all(|b| ALPHABET.contains(&b)), "{code}");
        }
    }

    #[test]
    fn test_generated_code_is_a_valid_short_name() {
        for _ in 0..100 {
            let code = generate_code(DEFAULT_CODE_LENGTH).unwrap();
            assert!(is_valid_short_name(&code), "{code}");
        }
    }

    #[test]
    fn test_generate_code_produces_unique_codes() {
        let codes: HashSet<String> = (0..1000)
            .map(|_| generate_code(DEFAULT_CODE_LENGTH).unwrap())
            .collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_generate_code_covers_whole_alphabet() {
        let mut seen: HashMap<char, usize> = HashMap::new();
        for c in generate_code(62 * 200).unwrap().chars() {
            *seen.entry(c).or_default() += 1;
        }

        // ~200 per symbol expected
        assert_eq!(seen.len(), 62);
        assert!(seen.values().all(|n| *n > 100), "{seen:?}");
    }

    #[test]
    fn test_alphabet_is_base62() {
        assert!(ALPHABET.iter().all(u8::is_ascii_alphanumeric));
        assert_eq!(ALPHABET.iter().collect::<HashSet<_>>().len(), 62);
        assert_eq!(usize::from(REJECTION_BOUND), ALPHABET.len() * 4);
    }
}
