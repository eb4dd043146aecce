use catgen::longest_common_prefix;
use proptest::prelude::*;

/// Character-by-character scan across every input
fn brute_force_prefix(inputs: &[String]) -> String {
    let Some(first) = inputs.first() else {
        return String::new();
    };
    let mut prefix = String::new();
    for (i, c) in first.chars().enumerate() {
        if inputs.iter().all(|s| s.chars().nth(i) == Some(c)) {
            prefix.push(c);
        } else {
            break;
        }
    }
    prefix
}

proptest! {
    #[test]
    fn matches_brute_force(inputs in prop::collection::vec("[a-c:/]{0,8}", 2..12)) {
        prop_assert_eq!(longest_common_prefix(&inputs), brute_force_prefix(&inputs));
    }

    #[test]
    fn shared_family_keeps_its_root(
        root in "urn:[a-z]{1,6}:",
        suffixes in prop::collection::vec("[a-z0-9]{0,5}", 2..8),
    ) {
        let inputs: Vec<String> = suffixes.iter().map(|s| format!("{root}{s}")).collect();
        let prefix = longest_common_prefix(&inputs);
        prop_assert!(prefix.starts_with(&root));
        prop_assert!(inputs.iter().all(|s| s.starts_with(&prefix)));
    }

    #[test]
    fn single_input_is_unchanged(input in "\\PC{0,20}") {
        prop_assert_eq!(longest_common_prefix(&[input.clone()]), input);
    }
}
