//! # Unit Normalizer Tests
//!
//! Synonym coverage, idempotence of normalization and dimension-safe conversion.

use ingredient_pricing::errors::ConversionError;
use ingredient_pricing::units::{
    convert, normalize_unit, parse_unit, price_unit_label, synonyms, Unit,
};

#[cfg(test)]
mod tests {
    use super::*;

    const SYNONYMS: [(&str, &str); 16] = [
        ("Kilogramm", "kg"),
        ("kilo", "kg"),
        ("KG", "kg"),
        ("Gramm", "g"),
        ("gr.", "g"),
        ("grams", "g"),
        ("Liter", "l"),
        ("ltr", "l"),
        ("litres", "l"),
        ("Milliliter", "ml"),
        ("ml", "ml"),
        ("Stück", "piece"),
        ("Stk.", "piece"),
        ("stueck", "piece"),
        ("pcs", "piece"),
        ("  pieces ", "piece"),
    ];

    #[test]
    fn test_synonyms_map_to_canonical_codes() {
        for (input, expected) in SYNONYMS {
            assert_eq!(
                normalize_unit(input),
                expected,
                "Failed to normalize '{}'",
                input
            );
        }
    }

    const CANONICAL_CODES: [&str; 5] = ["kg", "g", "l", "ml", "piece"];

    #[test]
    fn test_normalization_is_idempotent() {
        let table = synonyms();
        assert!(table.len() > 30, "Synonym table unexpectedly small");

        for synonym in table {
            for input in [synonym.to_string(), synonym.to_uppercase(), format!(" {} ", synonym)] {
                let once = normalize_unit(&input);
                assert!(
                    CANONICAL_CODES.contains(&once.as_str()),
                    "'{}' normalized to non-canonical '{}'",
                    input,
                    once
                );
                assert_eq!(normalize_unit(&once), once, "Not idempotent for '{}'", input);
            }
        }

        for (input, _) in SYNONYMS {
            let once = normalize_unit(input);
            assert_eq!(normalize_unit(&once), once, "Not idempotent for '{}'", input);
        }

        let unknown = normalize_unit("Bund");
        assert_eq!(unknown, "Bund");
        assert_eq!(normalize_unit(&unknown), unknown);
    }

    #[test]
    fn test_parse_unit_properties() {
        let kg = parse_unit("kilo").unwrap();
        assert_eq!(kg, Unit::Kilograms);
        assert!(kg.is_weight());
        assert!(parse_unit("ml").unwrap().is_volume());
        assert!(parse_unit("stück").unwrap().is_count());
        assert_eq!(parse_unit("Prise"), None);
    }

    #[test]
    fn test_conversions() {
        let cases = [
            (1.0, "kg", "g", 1000.0),
            (250.0, "g", "kg", 0.25),
            (0.5, "Liter", "ml", 500.0),
            (750.0, "ml", "l", 0.75),
            (3.0, "Stück", "pcs", 3.0),
        ];
        for (amount, from, to, expected) in cases {
            let result = convert(amount, from, to).unwrap();
            assert!(
                (result - expected).abs() < 1e-9,
                "{} {} -> {} gave {}, expected {}",
                amount,
                from,
                to,
                result,
                expected
            );
        }
    }

    #[test]
    fn test_conversion_errors() {
        assert_eq!(
            convert(1.0, "kg", "l"),
            Err(ConversionError::DimensionMismatch {
                from: "kg".to_string(),
                to: "l".to_string()
            })
        );
        assert_eq!(
            convert(1.0, "Bund", "g"),
            Err(ConversionError::UnknownUnit("Bund".to_string()))
        );

        let message = convert(1.0, "piece", "g").unwrap_err().to_string();
        assert!(message.contains("different dimensions"));
    }

    #[test]
    fn test_price_unit_label() {
        assert_eq!(price_unit_label("Kilo"), "per kg");
        assert_eq!(price_unit_label("piece"), "per piece");
    }
}
