use munificent_interaction::{
    meets_threshold, IntersectionEntry, RevealConfig, RevealCoordinator, RevealState,
};

#[test]
fn false_true_false_true_activates_once() {
    let mut c = RevealCoordinator::new(RevealConfig::default()).unwrap();
    c.observe(1u32);
    let mut flags = Vec::new();
    let mut activations = 0;
    for visible in [false, true, false, true] {
        let ratio = if visible { 0.6 } else { 0.0 };
        activations += c
            .handle_entries([IntersectionEntry::new(1u32, visible, ratio)])
            .len();
        flags.push(c.is_activated(&1));
    }
    assert_eq!(flags, vec![false, true, true, true]);
    assert_eq!(activations, 1);
}

#[test]
fn bare_state_follows_the_same_contract() {
    let mut s = RevealState::default();
    let flags: Vec<bool> = [false, true, false, true]
        .into_iter()
        .map(|v| {
            s.observe(v);
            s.has_activated()
        })
        .collect();
    assert_eq!(flags, vec![false, true, true, true]);
}

#[test]
fn repeated_positive_callbacks_are_tolerated() {
    let mut c = RevealCoordinator::new(RevealConfig::default()).unwrap();
    c.observe("cases");
    for _ in 0..5 {
        c.handle_entries([IntersectionEntry::new("cases", true, 1.0)]);
    }
    assert!(c.is_activated(&"cases"));
}

#[test]
fn zero_threshold_counts_any_overlap() {
    let cfg = RevealConfig {
        threshold: 0.0,
        ..RevealConfig::default()
    };
    let mut c = RevealCoordinator::new(cfg).unwrap();
    c.observe("timeline");
    assert_eq!(
        c.handle_entries([IntersectionEntry::new("timeline", true, 0.0)]),
        vec!["timeline"]
    );
}

#[test]
fn ratio_just_under_threshold_does_not_activate() {
    let mut c = RevealCoordinator::new(RevealConfig::default()).unwrap();
    c.observe("x");
    assert!(c
        .handle_entries([IntersectionEntry::new("x", true, 0.1991)])
        .is_empty());
    assert!(!c.is_activated(&"x"));
    assert_eq!(
        c.handle_entries([IntersectionEntry::new("x", true, 0.2)]),
        vec!["x"]
    );
}

#[test]
fn threshold_rule_is_inclusive_and_needs_intersection() {
    assert!(meets_threshold(true, 0.2, 0.2));
    assert!(!meets_threshold(true, 0.1991, 0.2));
    assert!(!meets_threshold(false, 1.0, 0.2));
    assert!(meets_threshold(true, 0.0, 0.0));
}

#[test]
fn invalid_threshold_is_rejected() {
    let cfg = RevealConfig {
        threshold: -0.1,
        ..RevealConfig::default()
    };
    assert!(RevealCoordinator::<u32>::new(cfg).is_err());
}
