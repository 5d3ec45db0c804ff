//! Keyword matching ignores case, surrounding space and `Type::` prefixes.

use ommcfg::config::{CompressionType, LoggerLevel, Vocabulary};
use proptest::prelude::*;

/// Re-case `keyword` following `mask`.
fn recase(keyword: &str, mask: &[bool]) -> String {
    keyword
        .chars()
        .zip(mask.iter().cycle())
        .map(|(c, upper)| {
            if *upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            }
        })
        .collect()
}

fn decorated(keyword: &'static str) -> impl Strategy<Value = String> {
    (
        proptest::collection::vec(any::<bool>(), 1..8),
        any::<bool>(),
        " {0,2}",
    )
        .prop_map(move |(mask, prefixed, pad)| {
            let body = recase(keyword, &mask);
            let body = if prefixed { format!("Severity::{}", body) } else { body };
            format!("{pad}{body}{pad}")
        })
}

proptest! {
    #[test]
    fn logger_level_synonyms_agree(
        trace in decorated("Trace"),
        verbose in decorated("Verbose"),
        info in decorated("Info"),
        success in decorated("Success"),
    ) {
        prop_assert_eq!(LoggerLevel::parse("LoggerSeverity", &trace).unwrap(), LoggerLevel::Trace);
        prop_assert_eq!(LoggerLevel::parse("LoggerSeverity", &verbose).unwrap(), LoggerLevel::Trace);
        prop_assert_eq!(LoggerLevel::parse("LoggerSeverity", &info).unwrap(), LoggerLevel::Info);
        prop_assert_eq!(LoggerLevel::parse("LoggerSeverity", &success).unwrap(), LoggerLevel::Info);
    }

    #[test]
    fn compression_keywords_match_any_case(raw in decorated("ZLib")) {
        prop_assert_eq!(
            CompressionType::parse("CompressionType", &raw).unwrap(),
            CompressionType::ZLib
        );
    }

    #[test]
    fn unknown_keywords_are_rejected(raw in "[a-z]{12,16}") {
        prop_assert!(CompressionType::parse("CompressionType", &raw).is_err());
    }
}
