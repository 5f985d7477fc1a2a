// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Property-based tests for the grouping stage.

use proptest::prelude::*;

use super::{flatten, group_tokens, lex};

/// Balanced-by-construction token text.
fn balanced() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("x".to_string()),
        Just("42".to_string()),
        Just(";".to_string()),
        Just("+".to_string()),
        Just("new".to_string()),
    ];
    leaf.prop_recursive(4, 32, 8, |inner| {
        prop::collection::vec(
            prop_oneof![
                inner.clone(),
                inner.clone().prop_map(|s| format!("( {s} )")),
                inner.clone().prop_map(|s| format!("{{ {s} }}")),
                inner.prop_map(|s| format!("[ {s} ]")),
            ],
            0..6,
        )
        .prop_map(|parts| parts.join(" "))
    })
}

/// Arbitrary token soup, brackets included, with no balance guarantee.
fn soup() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("x"),
            Just("1"),
            Just(";"),
            Just(","),
            Just("("),
            Just(")"),
            Just("{"),
            Just("}"),
            Just("["),
            Just("]"),
        ],
        0..40,
    )
    .prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn grouping_never_panics(source in soup()) {
        let _ = group_tokens(lex(&source));
    }

    #[test]
    fn balanced_input_always_groups(source in balanced()) {
        prop_assert!(group_tokens(lex(&source)).is_ok());
    }

    #[test]
    fn flatten_inverts_grouping(source in balanced()) {
        let tokens = lex(&source);
        let forest = group_tokens(tokens.clone()).unwrap();
        prop_assert_eq!(flatten(&forest), tokens);
    }

    #[test]
    fn appended_closer_is_located_exactly(source in balanced()) {
        let broken = format!("{source} )");
        let err = group_tokens(lex(&broken)).unwrap_err();
        prop_assert_eq!(err.span().start() as usize, source.len() + 1);
    }

    #[test]
    fn prepended_opener_is_located_exactly(source in balanced()) {
        let broken = format!("( {source}");
        let err = group_tokens(lex(&broken)).unwrap_err();
        prop_assert_eq!(err.span().start(), 0);
    }
}
