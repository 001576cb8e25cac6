//! Street and house-number extraction from free-text address input

use crate::models::ParsedAddress;

/// Maximum digits accepted as a house number; longer runs read as part of
/// the street name.
const MAX_HOUSE_NUMBER_DIGITS: usize = 6;

/// Split raw input into street text and an optional house number.
///
/// The number is the first digit run in the text; anything after it
/// (department letters, floor notes) is dropped. Input with no digits is
/// all street. When a number appears with no street before it, the whole
/// input is kept as street text so the empty-street precondition check
/// stays in one place.
#[must_use]
pub fn parse_address(input: &str) -> ParsedAddress {
    let trimmed = trim_commas(input.trim());

    let Some(digit_start) = trimmed.find(|c: char| c.is_ascii_digit()) else {
        return ParsedAddress {
            street: trimmed.to_string(),
            house_number: String::new(),
        };
    };

    let run: String = trimmed[digit_start..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    let street = trim_commas(trimmed[..digit_start].trim_end());

    if street.is_empty() || run.len() > MAX_HOUSE_NUMBER_DIGITS {
        return ParsedAddress {
            street: street.to_string(),
            house_number: String::new(),
        };
    }

    ParsedAddress {
        street: street.to_string(),
        house_number: run,
    }
}

fn trim_commas(s: &str) -> &str {
    s.trim_end_matches(|c: char| c == ',' || c.is_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Av. Patria 1480", "Av. Patria", "1480")]
    #[case("Av. Patria, 1480", "Av. Patria", "1480")]
    #[case("Duarte Quirós 1300 depto B", "Duarte Quirós", "1300")]
    #[case("Obispo Trejo 242,", "Obispo Trejo", "242")]
    #[case("  Caseros 344  ", "Caseros", "344")]
    fn test_street_and_number_recovered(
        #[case] input: &str,
        #[case] street: &str,
        #[case] number: &str,
    ) {
        let parsed = parse_address(input);
        assert_eq!(parsed.street, street);
        assert_eq!(parsed.house_number, number);
    }

    #[rstest]
    #[case("Av. Patria")]
    #[case("Paseo Sobremonte, ")]
    #[case("calle sin número")]
    fn test_no_digits_keeps_full_street(#[case] input: &str) {
        let parsed = parse_address(input);
        assert_eq!(parsed.street, input.trim().trim_end_matches([',', ' ']));
        assert!(parsed.house_number.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let parsed = parse_address("   ");
        assert!(parsed.street.is_empty());
        assert!(parsed.house_number.is_empty());
    }

    #[test]
    fn test_number_without_street_is_not_a_house_number() {
        let parsed = parse_address("1480");
        assert!(parsed.street.is_empty());
        assert!(parsed.house_number.is_empty());
    }

    #[test]
    fn test_overlong_digit_run_reads_as_street() {
        let parsed = parse_address("Ruta 12345678");
        assert_eq!(parsed.street, "Ruta");
        assert!(parsed.house_number.is_empty());
    }

    #[test]
    fn test_number_run_together_with_street() {
        let parsed = parse_address("Patria1480");
        assert_eq!(parsed.street, "Patria");
        assert_eq!(parsed.house_number, "1480");
    }

    #[test]
    fn test_invariant_street_nonempty_when_number_present() {
        for input in ["1480", "Av. Patria 1480", "x 1", ",, 99"] {
            let parsed = parse_address(input);
            if !parsed.house_number.is_empty() {
                assert!(!parsed.street.is_empty(), "input {input:?}");
            }
        }
    }
}
