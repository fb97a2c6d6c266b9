//! Property-based tests using proptest

use chapterlog::prelude::*;
use proptest::prelude::*;

const ALL_LEVELS: [Level; 5] = [
    Level::Trace,
    Level::Debug,
    Level::Info,
    Level::Warn,
    Level::Error,
];

fn level_strategy() -> impl Strategy<Value = Level> {
    prop::sample::select(ALL_LEVELS.to_vec())
}

proptest! {
    #[test]
    fn test_level_display_roundtrip(level in level_strategy()) {
        let parsed: Level = level.as_str().parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    #[test]
    fn test_level_parse_is_case_insensitive(level in level_strategy(), upper in any::<bool>()) {
        let name = if upper {
            level.as_str().to_uppercase()
        } else {
            level.as_str().to_lowercase()
        };
        let parsed: Level = name.parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    #[test]
    fn test_level_parse_tolerates_whitespace(level in level_strategy(), pad in 0usize..4) {
        let name = format!("{}{}{}", " ".repeat(pad), level.as_str(), " ".repeat(pad));
        let parsed: Level = name.parse().unwrap();
        prop_assert_eq!(parsed, level);
    }

    #[test]
    fn test_level_gating_matches_rank_ordering(
        level in level_strategy(),
        minimum in level_strategy(),
    ) {
        prop_assert_eq!(level.is_enabled(minimum), level.rank() >= minimum.rank());
    }

    #[test]
    fn test_level_ordering_is_total(a in level_strategy(), b in level_strategy()) {
        prop_assert_eq!(a.is_at_least(b) || b.is_at_least(a), true);
        if a.is_at_least(b) && b.is_at_least(a) {
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn test_interpolate_without_args_is_identity(message in "[a-zA-Z0-9 .,:{}]*") {
        prop_assert_eq!(interpolate(&message, &[]), message);
    }

    #[test]
    fn test_interpolate_without_placeholders_is_identity(
        message in "[a-zA-Z0-9 .,:]*",
        args in prop::collection::vec("[a-z]+", 0..4),
    ) {
        let args: Vec<FieldValue> = args.into_iter().map(FieldValue::from).collect();
        prop_assert_eq!(interpolate(&message, &args), message);
    }

    #[test]
    fn test_interpolate_substitutes_both_positions(
        first in "[a-z]{1,8}",
        second in "[a-z]{1,8}",
    ) {
        let rendered = interpolate(
            "a {0} b {1}",
            &[FieldValue::from(first.as_str()), FieldValue::from(second.as_str())],
        );
        prop_assert_eq!(rendered, format!("a {first} b {second}"));
    }

    #[test]
    fn test_interpolate_leaves_out_of_range_literal(index in 1usize..20) {
        let message = format!("value {{{index}}}");
        let rendered = interpolate(&message, &[FieldValue::from("only")]);
        prop_assert_eq!(rendered, message);
    }

    #[test]
    fn test_integer_field_value_displays_as_decimal(n in any::<i64>()) {
        prop_assert_eq!(FieldValue::from(n).to_string(), n.to_string());
    }

    #[test]
    fn test_garbage_level_names_fail_to_parse(name in "[a-z]{10,16}") {
        prop_assert!(name.parse::<Level>().is_err());
    }
}
