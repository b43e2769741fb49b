//! Property-based tests for the navigator
//!
//! Random sequences of show, hide, close and back requests must keep the
//! shown-set, back-stack and depth invariants.

use super::tests::{headless, Screen};
use super::*;
use crate::window::WindowGroup;
use proptest::prelude::*;

const WINDOWS: [Screen; 7] = [
    Screen::MainMenu,
    Screen::Level,
    Screen::LevelDetail,
    Screen::Skill,
    Screen::TopBar,
    Screen::Toast,
    Screen::Loading,
];

#[derive(Debug, Clone)]
enum Op {
    Show(usize),
    ShowChecked(usize),
    Hide(usize),
    Close(usize),
    Pop,
}

fn op() -> impl Strategy<Value = Op> {
    let index = 0..WINDOWS.len();
    prop_oneof![
        3 => index.clone().prop_map(Op::Show),
        1 => index.clone().prop_map(Op::ShowChecked),
        1 => index.clone().prop_map(Op::Hide),
        1 => index.prop_map(Op::Close),
        2 => Just(Op::Pop),
    ]
}

/// Applies `op` and drains the event queue. Returns whether the op
/// explicitly hid or closed the Fixed window.
fn apply(nav: &mut WindowNavigator<Screen>, op: &Op) -> bool {
    let touched_fixed = match *op {
        Op::Show(i) => {
            let _ = nav.show_window(WINDOWS[i]);
            false
        }
        Op::ShowChecked(i) => {
            let _ = nav.show_window_with(WINDOWS[i], ShowOptions::default().check_navigation(true));
            false
        }
        Op::Hide(i) => {
            let _ = nav.hide_window(WINDOWS[i]);
            WINDOWS[i] == Screen::TopBar
        }
        Op::Close(i) => {
            let _ = nav.close_window(WINDOWS[i]);
            WINDOWS[i] == Screen::TopBar
        }
        Op::Pop => {
            nav.pop_navigation_window();
            false
        }
    };
    nav.dispatch_pending();
    touched_fixed
}

fn group(nav: &WindowNavigator<Screen>, id: Screen) -> Option<WindowGroup> {
    nav.catalog().get(id).map(|d| d.group)
}

proptest! {
    /// Every window appears in the shown-set at most once
    #[test]
    fn test_shown_set_has_no_duplicates(ops in prop::collection::vec(op(), 0..40)) {
        let mut nav = headless();
        for op in &ops {
            apply(&mut nav, op);
            let shown = nav.shown_windows();
            for (i, id) in shown.iter().enumerate() {
                prop_assert!(!shown[i + 1..].contains(id), "{:?} listed twice in {:?}", id, shown);
            }
        }
    }

    /// Navigation never hides or records a Fixed window
    #[test]
    fn test_fixed_window_persists(ops in prop::collection::vec(op(), 0..40)) {
        let mut nav = headless();
        nav.show_window(Screen::TopBar).unwrap();
        nav.dispatch_pending();

        let mut expected = true;
        for op in &ops {
            let was_shown = nav.is_window_shown(Screen::TopBar);
            if apply(&mut nav, op) && was_shown {
                expected = false;
            }
            if matches!(*op, Op::Show(4) | Op::ShowChecked(4)) {
                expected = true;
            }

            prop_assert_eq!(nav.is_window_shown(Screen::TopBar), expected);
            prop_assert!(nav
                .back_stack()
                .frames()
                .iter()
                .all(|f| !f.back_show_targets().contains(&Screen::TopBar)));
        }
    }

    /// Re-showing a shown window changes nothing
    #[test]
    fn test_show_of_shown_window_is_idempotent(
        ops in prop::collection::vec(op(), 0..30),
        pick in 0..WINDOWS.len(),
    ) {
        let mut nav = headless();
        for op in &ops {
            apply(&mut nav, op);
        }

        let id = WINDOWS[pick];
        if nav.is_window_shown(id) {
            let before = nav.snapshot();
            let instances = nav.instance_count();
            prop_assert_eq!(nav.show_window(id), Err(NavError::AlreadyShown(id)));
            prop_assert_eq!(nav.snapshot(), before);
            prop_assert_eq!(nav.instance_count(), instances);
        }
    }

    /// Within a group, later shown windows sit strictly higher, and Normal
    /// windows stay below the Fixed base
    #[test]
    fn test_depth_follows_show_order(ops in prop::collection::vec(op(), 0..40)) {
        let mut nav = headless();
        let fixed_base = nav.config().depth.fixed_base;

        for op in &ops {
            apply(&mut nav, op);
            let shown = nav.shown_windows().to_vec();

            for (i, &earlier) in shown.iter().enumerate() {
                for &later in &shown[i + 1..] {
                    if group(&nav, earlier) == group(&nav, later) {
                        prop_assert!(
                            nav.window_depth(earlier) < nav.window_depth(later),
                            "{:?} not below {:?}", earlier, later
                        );
                    }
                }
                if group(&nav, earlier) == Some(WindowGroup::Normal) {
                    let depth = nav.window_depth(earlier).unwrap_or_default();
                    prop_assert!(depth < fixed_base);
                }
            }
        }
    }

    /// Every frame owner is a navigable page, and never records itself
    #[test]
    fn test_frames_are_well_formed(ops in prop::collection::vec(op(), 0..40)) {
        let mut nav = headless();
        for op in &ops {
            apply(&mut nav, op);
            for frame in nav.back_stack().frames() {
                let owner = nav.catalog().get(frame.owner());
                prop_assert!(owner.map_or(false, |d| d.tracks_history()));
                prop_assert!(!frame.back_show_targets().contains(&frame.owner()));
            }
        }
    }
}
