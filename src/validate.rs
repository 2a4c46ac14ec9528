//! Pure validation and formatting helpers for personne fields.
//!
//! Every function here is stateless: the service composes them into its
//! pipeline and they are usable on their own. The character classes are
//! the exact ones enforced by the wire contract, including the `À-ÿ`
//! range for accented letters.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Senegalese phone number: 9 digits starting with 7, second digit 0-8
    static ref TELEPHONE_PATTERN: Regex = Regex::new(r"^7[0-8]\d{7}$").unwrap();
    // nom/prenom: letters and spaces only, accents allowed
    static ref NOM_PATTERN: Regex = Regex::new(r"^[a-zA-ZÀ-ÿ\s]+$").unwrap();
    // adresse: letters, digits, spaces, hyphens, commas, periods
    static ref ADRESSE_PATTERN: Regex = Regex::new(r"^[a-zA-Z0-9À-ÿ\s,.-]+$").unwrap();
}

/// Remove every whitespace character. This is the "normalized phone" form
/// used for uniqueness comparisons.
pub fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

/// A nom or prenom is valid when its trimmed form is non-empty and
/// contains letters and spaces only.
pub fn is_valid_nom(nom: &str) -> bool {
    let trimmed = nom.trim();
    if trimmed.is_empty() {
        return false;
    }
    NOM_PATTERN.is_match(trimmed)
}

/// An empty telephone is valid (the field is optional); otherwise the
/// whitespace-stripped form must be a valid Senegalese number.
pub fn is_valid_telephone(telephone: &str) -> bool {
    if telephone.is_empty() {
        return true;
    }
    TELEPHONE_PATTERN.is_match(&strip_whitespace(telephone))
}

/// An empty adresse is valid; otherwise the trimmed form must stay within
/// the allowed character class.
pub fn is_valid_adresse(adresse: &str) -> bool {
    if adresse.is_empty() {
        return true;
    }
    ADRESSE_PATTERN.is_match(adresse.trim())
}

/// Format a telephone for display, e.g. "771234567" -> "77 123 45 67".
/// Anything that does not strip down to exactly 9 digits is returned
/// unchanged.
pub fn format_telephone(telephone: &str) -> String {
    if telephone.is_empty() {
        return telephone.to_string();
    }
    let cleaned = strip_whitespace(telephone);
    // nine ASCII digits, so the byte slices below are boundary-safe
    if cleaned.len() == 9 && cleaned.bytes().all(|b| b.is_ascii_digit()) {
        format!(
            "{} {} {} {}",
            &cleaned[0..2],
            &cleaned[2..5],
            &cleaned[5..7],
            &cleaned[7..9]
        )
    } else {
        telephone.to_string()
    }
}
