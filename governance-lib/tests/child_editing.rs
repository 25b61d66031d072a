//! Integration tests for the parent/child edit protocol.

use governance_lib::dto::BaseDto;
use governance_lib::dto::EditState;
use governance_lib::dto::ParentDto;
use governance_lib::dto::Uid;
use proptest::prelude::*;

#[derive(Debug, Clone, PartialEq)]
struct ScoreBand {
    uid: Uid,
    label: String,
    upper: u32,
}

impl ScoreBand {
    fn new(label: &str, upper: u32) -> Self {
        Self {
            uid: Uid::new(),
            label: label.to_string(),
            upper,
        }
    }
}

impl BaseDto for ScoreBand {
    fn uid(&self) -> Uid {
        self.uid
    }

    fn display_name(&self) -> Option<&str> {
        Some(&self.label)
    }
}

fn bands() -> (ScoreBand, ScoreBand, ParentDto<ScoreBand>) {
    let a = ScoreBand::new("x", 250);
    let b = ScoreBand::new("y", 500);
    let parent = ParentDto::with_children(vec![a.clone(), b.clone()]);
    (a, b, parent)
}

#[test]
fn test_edit_rename_save() {
    let (a, b, mut parent) = bands();
    parent.set_selected_child_id(Some(b.uid));

    let edit = parent.edit_child_action_mut().unwrap();
    edit.label = "z".to_string();
    assert_eq!(parent.children()[1].label, "y");
    assert_eq!(parent.edit_state(), EditState::Editing);

    parent.save_child_action();
    assert_eq!(parent.children().len(), 2);
    assert_eq!(parent.children()[0], a);
    assert_eq!(parent.children()[1].uid, b.uid);
    assert_eq!(parent.children()[1].label, "z");
    assert!(parent.child_edit().is_none());
    assert_eq!(parent.child_summary(), "x, z");
}

#[test]
fn test_edit_then_cancel() {
    let (a, b, mut parent) = bands();
    parent.set_selected_child_id(Some(b.uid));
    parent.edit_child_action_mut().unwrap().upper = 999;

    parent.cancel_child_action();
    assert_eq!(parent.children(), &[a, b]);
    assert_eq!(parent.edit_state(), EditState::Idle);
}

#[test]
fn test_delete_selected() {
    let (a, b, mut parent) = bands();
    parent.set_selected_child_id(Some(b.uid));

    assert_eq!(parent.delete_child_action(), Some(b));
    assert_eq!(parent.children(), &[a]);
    assert!(parent.selected_child().is_none());
    assert_eq!(parent.delete_child_action(), None);
}

#[test]
fn test_edit_without_selection() {
    let (a, b, mut parent) = bands();
    assert!(parent.edit_child_action().is_none());

    parent.set_selected_child_id(Some(Uid::new()));
    assert!(parent.edit_child_action().is_none());

    parent.save_child_action();
    assert_eq!(parent.children(), &[a, b]);
}

#[test]
fn test_save_after_original_deleted_appends() {
    let (a, b, mut parent) = bands();
    parent.set_selected_child_id(Some(a.uid));
    parent.edit_child_action();
    parent.remove(&a);

    parent.save_child_action();
    assert_eq!(parent.children(), &[b, a]);
}

#[test]
fn test_reselect_replaces_edit_copy() {
    let (a, b, mut parent) = bands();
    parent.set_selected_child_id(Some(a.uid));
    parent.edit_child_action_mut().unwrap().label = "dropped".to_string();

    parent.set_selected_child_id(Some(b.uid));
    assert_eq!(parent.edit_child_action(), Some(&b));

    parent.save_child_action();
    assert_eq!(parent.children(), &[a, b]);
}

proptest! {
    #[test]
    fn prop_save_keeps_order_and_length(count in 1usize..12, pick in 0usize..12, upper in 0u32..1000) {
        let children: Vec<ScoreBand> = (0..count).map(|i| ScoreBand::new(&i.to_string(), i as u32)).collect();
        let mut parent = ParentDto::with_children(children.clone());
        let pick = pick % count;
        parent.set_selected_child_id(Some(children[pick].uid));
        parent.edit_child_action_mut().unwrap().upper = upper;
        parent.save_child_action();

        prop_assert_eq!(parent.child_count(), count);
        for (i, child) in parent.children().iter().enumerate() {
            prop_assert_eq!(child.uid, children[i].uid);
            let expected = if i == pick { upper } else { children[i].upper };
            prop_assert_eq!(child.upper, expected);
        }
    }

    #[test]
    fn prop_cancel_is_a_no_op(count in 1usize..12, pick in 0usize..12) {
        let children: Vec<ScoreBand> = (0..count).map(|i| ScoreBand::new(&i.to_string(), i as u32)).collect();
        let mut parent = ParentDto::with_children(children.clone());
        parent.set_selected_child_id(Some(children[pick % count].uid));
        parent.edit_child_action_mut().unwrap().label.push('!');
        parent.cancel_child_action();

        prop_assert_eq!(parent.children(), children.as_slice());
        prop_assert!(parent.child_edit().is_none());
    }
}
