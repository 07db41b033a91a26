//! Navigation invariants across every declared page.

use fever_triage_core::testing::RecordingShell;
use fever_triage_core::{ClientConfig, NavOutcome, Navigator, PageId};
use proptest::prelude::*;

fn setup() -> (Navigator, RecordingShell) {
    let navigator = Navigator::from_config(&ClientConfig::default());
    let shell = RecordingShell::new(navigator.sections());
    (navigator, shell)
}

fn assert_only_active(shell: &RecordingShell, page: &PageId) {
    assert_eq!(shell.visible_sections(), vec![page.clone()]);
    assert_eq!(shell.highlighted(), vec![page.clone()]);
    assert_eq!(shell.fragment(), page.fragment());
}

#[test]
fn every_known_page_is_exclusively_active() {
    let (mut navigator, mut shell) = setup();
    for page in navigator.sections().to_vec() {
        let outcome = navigator.navigate(&page, &mut shell);
        assert_eq!(outcome, NavOutcome::Shown(page.clone()));
        assert_only_active(&shell, &page);
    }
}

#[test]
fn external_fragment_change_reproduces_view() {
    let (mut navigator, mut shell) = setup();
    let page = PageId::new("advice");

    navigator.navigate(&page, &mut shell);
    let direct = (shell.visible_sections(), shell.highlighted());

    navigator.on_fragment_change("#advice", &mut shell);
    assert_eq!((shell.visible_sections(), shell.highlighted()), direct);
    assert_only_active(&shell, &page);
}

#[test]
fn initial_load_with_empty_fragment_shows_landing() {
    let (mut navigator, mut shell) = setup();
    let outcome = navigator.on_initial_load("", &mut shell);
    assert_eq!(outcome, NavOutcome::Shown(PageId::new("landing")));
    assert_only_active(&shell, &PageId::new("landing"));
}

#[test]
fn initial_load_honours_existing_fragment() {
    let (mut navigator, mut shell) = setup();
    navigator.on_initial_load("#form", &mut shell);
    assert_only_active(&shell, &PageId::new("form"));
}

#[test]
fn unknown_fragment_is_a_visible_noop() {
    let (mut navigator, mut shell) = setup();
    navigator.on_initial_load("#form", &mut shell);

    let outcome = navigator.on_fragment_change("#nowhere", &mut shell);

    assert!(matches!(outcome, NavOutcome::UnknownPage(_)));
    assert!(shell.visible_sections().is_empty());
    assert!(shell.highlighted().is_empty());
    assert_eq!(shell.fragment(), "#nowhere");
}

proptest! {
    #[test]
    fn prop_any_navigation_sequence_keeps_single_active(steps in proptest::collection::vec(0usize..4, 1..20)) {
        let (mut navigator, mut shell) = setup();
        let pages = navigator.sections().to_vec();
        for idx in steps {
            let page = &pages[idx];
            navigator.navigate(page, &mut shell);
            prop_assert_eq!(shell.visible_sections(), vec![page.clone()]);
            prop_assert_eq!(shell.highlighted(), vec![page.clone()]);
            prop_assert_eq!(navigator.active(), Some(page));
        }
    }

    #[test]
    fn prop_navigation_is_idempotent(idx in 0usize..4, repeats in 1usize..5) {
        let (mut navigator, mut shell) = setup();
        let page = navigator.sections()[idx].clone();
        navigator.navigate(&page, &mut shell);
        let first = shell.visible_sections();
        for _ in 0..repeats {
            navigator.on_fragment_change(&page.fragment(), &mut shell);
        }
        prop_assert_eq!(shell.visible_sections(), first);
    }
}
