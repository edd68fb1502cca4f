use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_are_unbounded_with_500ms_delay() {
    let config = EditorConfig::default();
    assert_eq!(config.max_history_stack, None);
    assert_eq!(config.history_delay_ms, 500);
}

#[test]
fn empty_lookup_yields_defaults() {
    assert_eq!(EditorConfig::from_lookup(lookup(&[])).unwrap(), EditorConfig::default());
}

#[test]
fn lookup_reads_both_values() {
    let config = EditorConfig::from_lookup(lookup(&[
        (MAX_HISTORY_STACK_ENV, "20"),
        (HISTORY_DELAY_ENV, " 250 "),
    ]))
    .unwrap();
    assert_eq!(config.max_history_stack, Some(20));
    assert_eq!(config.history_delay_ms, 250);
}

#[test]
fn zero_capacity_means_unbounded() {
    let config = EditorConfig::from_lookup(lookup(&[(MAX_HISTORY_STACK_ENV, "0")])).unwrap();
    assert_eq!(config.max_history_stack, None);
    assert_eq!(EditorConfig::default().with_max_history_stack(Some(0)).max_history_stack, None);
}

#[test]
fn invalid_values_are_errors() {
    let err = EditorConfig::from_lookup(lookup(&[(HISTORY_DELAY_ENV, "soon")])).unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: HISTORY_DELAY_ENV, value: "soon".to_owned() });
    assert!(EditorConfig::from_lookup(lookup(&[(MAX_HISTORY_STACK_ENV, "-1")])).is_err());
}

#[test]
fn serde_uses_camel_case_and_fills_defaults() {
    let config: EditorConfig = serde_json::from_str(r#"{"maxHistoryStack": 5}"#).unwrap();
    assert_eq!(config.max_history_stack, Some(5));
    assert_eq!(config.history_delay_ms, 500);
}
