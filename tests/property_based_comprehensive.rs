//! Property-based tests for selector matching, aggregation and expansion
//!
//! Properties covered:
//! 1. Wildcard selectors match every resource
//! 2. A selector built from a resource's own identity matches it
//! 3. A rule applies iff it has no targets or any target matches
//! 4. Later rules win on conflicting variable names
//! 5. Documents no rule applies to are returned unchanged
//! 6. Expansion never panics on arbitrary text
//! 7. Text without `$` is returned unchanged
//! 8. A bound name wins over any balanced default, braces and nested placeholders included

use proptest::prelude::*;
use serde_yaml::Value;
use std::collections::BTreeMap;
use variable_injector::expand::Expander;
use variable_injector::{aggregate, process, Config, Replacement, ResourceDescriptor, Selector};

fn descriptor_strategy() -> impl Strategy<Value = ResourceDescriptor> {
    (
        "[a-z.]{0,12}",
        "v[0-9]",
        "[A-Z][a-z]{0,8}",
        "[a-z-]{0,10}",
        "[a-z]{0,6}",
    )
        .prop_map(|(group, version, kind, name, namespace)| ResourceDescriptor {
            group,
            version,
            kind,
            name,
            namespace,
        })
}

fn selector_strategy() -> impl Strategy<Value = Selector> {
    (
        proptest::option::of("[a-z.]{0,4}"),
        proptest::option::of("v[0-2]"),
        proptest::option::of("[A-C]"),
        proptest::option::of("[a-c]{1,2}"),
        proptest::option::of("[a-b]"),
    )
        .prop_map(|(group, version, kind, name, namespace)| Selector {
            group,
            version,
            kind,
            name,
            namespace,
        })
}

fn default_piece() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z:/.-]{0,8}",
        "[a-z:/.-]{0,8}".prop_map(|inner| format!("{{{}}}", inner)),
        "[A-Z]{1,4}".prop_map(|name| format!("${{{}}}", name)),
        ("[A-Z]{1,4}", "[a-z]{0,4}").prop_map(|(name, inner)| format!("${{{}:-{}}}", name, inner)),
    ]
}

fn balanced_default() -> impl Strategy<Value = String> {
    prop::collection::vec(default_piece(), 0..4).prop_map(|pieces| pieces.concat())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_wildcard_matches_everything(resource in descriptor_strategy()) {
        prop_assert!(Selector::any().matches(&resource));
    }

    #[test]
    fn prop_identity_selector_matches_self(resource in descriptor_strategy()) {
        let selector = Selector::any()
            .with_group(resource.group.clone())
            .with_version(resource.version.clone())
            .with_kind(resource.kind.clone())
            .with_name(resource.name.clone())
            .with_namespace(resource.namespace.clone());
        prop_assert!(selector.matches(&resource));
    }

    #[test]
    fn prop_rule_applies_iff_any_target_matches(
        resource in descriptor_strategy(),
        targets in prop::collection::vec(selector_strategy(), 0..4),
    ) {
        let expected = targets.is_empty() || targets.iter().any(|t| t.matches(&resource));
        let rule = Replacement::new(targets, BTreeMap::new());
        prop_assert_eq!(rule.applies_to(&resource), expected);
    }

    #[test]
    fn prop_last_write_wins(
        resource in descriptor_strategy(),
        first in "[a-z]{1,8}",
        second in "[a-z]{1,8}",
    ) {
        let rules = vec![
            Replacement::new(vec![], BTreeMap::from([("X".to_string(), first)])),
            Replacement::new(vec![Selector::any()], BTreeMap::from([("X".to_string(), second.clone())])),
        ];
        let result = aggregate(&rules, &resource);
        prop_assert!(result.matched_any);
        prop_assert_eq!(result.variables.get("X"), Some(&second));
    }

    #[test]
    fn prop_unmatched_document_unchanged(
        kind in "[A-Z][a-z]{1,8}",
        host in "[a-z${}:.-]{0,20}",
    ) {
        let mut config = Config::default();
        config.replacements.push(Replacement::new(
            vec![Selector::any().with_kind(format!("{}X", kind))],
            BTreeMap::from([("A".to_string(), "b".to_string())]),
        ));

        let mut document: Value =
            serde_yaml::from_str(&format!("kind: {}\nspec: {{}}\n", kind)).unwrap();
        document["spec"] = Value::from(host);

        let output = process(document.clone(), &config).unwrap();
        prop_assert_eq!(output, document);
    }

    #[test]
    fn prop_expansion_never_panics(text in ".{0,64}") {
        let variables = BTreeMap::from([("A".to_string(), "1".to_string())]);
        let _ = Expander::new(&variables, None).expand_str(text.clone());
        let _ = Expander::new(&variables, Some("P_")).expand_str(text);
    }

    #[test]
    fn prop_text_without_placeholders_is_identity(text in "[^$]{0,64}") {
        let variables = BTreeMap::new();
        let out = Expander::new(&variables, None).expand_str(text.clone()).unwrap();
        prop_assert_eq!(out, Value::String(text));
    }

    #[test]
    fn prop_bound_name_beats_balanced_default(default in balanced_default()) {
        let variables = BTreeMap::from([("N".to_string(), "v".to_string())]);
        let text = format!("${{N:-{}}}", default);
        let out = Expander::new(&variables, None).expand_str(text).unwrap();
        prop_assert_eq!(out, Value::String("v".to_string()));
    }
}
