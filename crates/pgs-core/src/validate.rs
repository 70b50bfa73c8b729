// ── Input validators and masks ──
//
// Pure functions over user input. The CPF check is the published
// two-digit mod-11 algorithm and must match it digit for digit.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid e-mail regex"));

static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\(\d{2}\)\s\d{4,5}-\d{4}$").expect("valid phone regex"));

static MASK_AREA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{2})(\d)").expect("valid area-code regex"));

static MASK_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d{4,5})(\d{4})$").expect("valid suffix regex"));

/// Syntactic e-mail check: `local@domain.tld` with no whitespace.
pub fn validate_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

/// Brazilian phone in the `(DD) DDDDD-DDDD` or `(DD) DDDD-DDDD` format.
pub fn validate_phone(phone: &str) -> bool {
    PHONE.is_match(phone)
}

/// Validate a CPF, ignoring any non-digit punctuation.
pub fn validate_cpf(cpf: &str) -> bool {
    let digits: Vec<u32> = cpf.chars().filter_map(|c| c.to_digit(10)).collect();
    let Ok(digits) = <[u32; 11]>::try_from(digits) else {
        return false;
    };

    // 00000000000 .. 99999999999 pass the checksum but are not issued.
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    check_digit(&digits[..9]) == digits[9] && check_digit(&digits[..10]) == digits[10]
}

/// Weighted sum with weights `len+1 .. 2`, reduced mod 11, with 10 and
/// 11 mapped to 0.
fn check_digit(prefix: &[u32]) -> u32 {
    let mut weight = u32::try_from(prefix.len()).unwrap_or(0) + 1;
    let mut sum = 0;
    for &digit in prefix {
        sum += digit * weight;
        weight -= 1;
    }
    match 11 - (sum % 11) {
        10 | 11 => 0,
        rev => rev,
    }
}

/// Format raw phone input as the user types: `11912345678` becomes
/// `(11) 91234-5678`. Input longer than 11 digits is returned as digits.
pub fn mask_phone(input: &str) -> String {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.len() > 11 {
        return digits;
    }
    let with_area = MASK_AREA.replace(&digits, "($1) $2");
    MASK_SUFFIX.replace(&with_area, "$1-$2").into_owned()
}
