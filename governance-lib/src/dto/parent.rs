//! Parent/child edit-copy protocol

use log::debug;

use super::BaseDto;
use super::Uid;

/// Separator used by [`ParentDto::child_summary`].
const SUMMARY_SEPARATOR: &str = ", ";

/// Whether a [`ParentDto`] currently holds a detached edit copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// No edit copy exists.
    Idle,
    /// `child_edit` holds a copy of the child selected when editing started.
    Editing,
}

/// An ordered collection of child view objects with a single edit slot.
///
/// The view layer selects a child by uid, asks for an edit copy, mutates the
/// copy freely and then either saves it back over the original or cancels.
/// The canonical `children` list is only touched on save, add, remove or
/// delete.
///
/// # Example
///
/// ```
/// use governance_lib::dto::{BaseDto, ParentDto, Uid};
///
/// #[derive(Debug, Clone)]
/// struct Attr { uid: Uid, name: String }
///
/// impl BaseDto for Attr {
///     fn uid(&self) -> Uid { self.uid }
///     fn display_name(&self) -> Option<&str> { Some(&self.name) }
/// }
///
/// let first = Attr { uid: Uid::new(), name: "department".into() };
/// let mut parent = ParentDto::with_children(vec![first.clone()]);
///
/// parent.set_selected_child_id(Some(first.uid));
/// if let Some(edit) = parent.edit_child_action_mut() {
///     edit.name = "division".into();
/// }
/// parent.save_child_action();
///
/// assert_eq!(parent.child_summary(), "division");
/// ```
#[derive(Debug, Clone)]
pub struct ParentDto<E: BaseDto> {
    children: Vec<E>,
    selected_child_id: Option<Uid>,
    child_edit: Option<E>,
}

impl<E: BaseDto> Default for ParentDto<E> {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            selected_child_id: None,
            child_edit: None,
        }
    }
}

impl<E: BaseDto> ParentDto<E> {
    /// Creates an empty parent.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parent owning the given children.
    pub fn with_children(children: Vec<E>) -> Self {
        Self {
            children,
            ..Default::default()
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn children(&self) -> &[E] {
        &self.children
    }

    /// Replaces the canonical list. Selection and any edit copy are kept; the
    /// selection simply resolves to nothing if its child is gone.
    pub fn set_children(&mut self, children: Vec<E>) {
        self.children = children;
    }

    /// Consumes the parent and returns the canonical list.
    pub fn into_children(self) -> Vec<E> {
        self.children
    }

    pub fn selected_child_id(&self) -> Option<Uid> {
        self.selected_child_id
    }

    pub fn set_selected_child_id(&mut self, uid: Option<Uid>) {
        self.selected_child_id = uid;
    }

    pub fn child_edit(&self) -> Option<&E> {
        self.child_edit.as_ref()
    }

    pub fn child_edit_mut(&mut self) -> Option<&mut E> {
        self.child_edit.as_mut()
    }

    pub fn set_child_edit(&mut self, child: Option<E>) {
        self.child_edit = child;
    }

    pub fn edit_state(&self) -> EditState {
        if self.child_edit.is_some() {
            EditState::Editing
        } else {
            EditState::Idle
        }
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Returns the child the selected uid points at, if it still exists.
    pub fn selected_child(&self) -> Option<&E> {
        self.find(self.selected_child_id?)
    }

    /// Joins the display names of all children, skipping unnamed ones.
    pub fn child_summary(&self) -> String {
        self.children
            .iter()
            .filter_map(BaseDto::display_name)
            .collect::<Vec<_>>()
            .join(SUMMARY_SEPARATOR)
    }

    // -------------------------------------------------------------------------
    // Search and mutation
    // -------------------------------------------------------------------------

    /// Finds the first child with the given uid.
    pub fn find(&self, uid: Uid) -> Option<&E> {
        self.children.iter().find(|child| child.uid() == uid)
    }

    /// Finds the first child whose display name equals `name`.
    pub fn find_by_name(&self, name: &str) -> Option<&E> {
        self.children
            .iter()
            .find(|child| child.display_name() == Some(name))
    }

    /// Appends a child. Duplicate uids are not checked.
    pub fn add(&mut self, child: E) {
        self.children.push(child);
    }

    /// Removes the first child sharing `child`'s uid and returns it.
    pub fn remove(&mut self, child: &E) -> Option<E> {
        let uid = child.uid();
        let index = self.children.iter().position(|c| c.uid() == uid)?;
        Some(self.children.remove(index))
    }

    /// Puts `neu` in place of the child it was cloned from, or appends it
    /// when no such child exists.
    pub fn replace(&mut self, neu: E) {
        match self.children.iter_mut().find(|slot| slot.is_clone(&neu)) {
            Some(slot) => *slot = neu,
            None => self.children.push(neu),
        }
    }

    // -------------------------------------------------------------------------
    // Edit actions
    // -------------------------------------------------------------------------

    /// Starts editing the selected child.
    ///
    /// The edit copy is a clone of the child as it is now; changes to it do
    /// not reach `children` until [`save_child_action`](Self::save_child_action).
    /// Without a resolvable selection the edit slot is cleared.
    pub fn edit_child_action(&mut self) -> Option<&E> {
        self.child_edit = self.selected_child().cloned();
        match &self.child_edit {
            Some(child) => debug!("Editing child {}", child.uid()),
            None => debug!("Edit requested without a selected child"),
        }
        self.child_edit.as_ref()
    }

    /// Same as [`edit_child_action`](Self::edit_child_action) but hands back
    /// the copy mutably.
    pub fn edit_child_action_mut(&mut self) -> Option<&mut E> {
        self.edit_child_action();
        self.child_edit.as_mut()
    }

    /// Discards the edit copy. `children` is untouched.
    pub fn cancel_child_action(&mut self) {
        if let Some(child) = self.child_edit.take() {
            debug!("Cancelled edit of child {}", child.uid());
        }
    }

    /// Commits the edit copy over its original and leaves the edit slot empty.
    pub fn save_child_action(&mut self) {
        if let Some(child) = self.child_edit.take() {
            debug!("Saving edit of child {}", child.uid());
            self.replace(child);
        }
    }

    /// Removes the selected child from `children` directly, without going
    /// through an edit copy.
    pub fn delete_child_action(&mut self) -> Option<E> {
        let selected = self.selected_child()?.clone();
        let removed = self.remove(&selected);
        if removed.is_some() {
            debug!("Deleted child {}", selected.uid());
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Bucket {
        uid: Uid,
        name: Option<String>,
        lower: u32,
    }

    impl Bucket {
        fn named(name: &str, lower: u32) -> Self {
            Self {
                uid: Uid::new(),
                name: Some(name.to_string()),
                lower,
            }
        }
    }

    impl BaseDto for Bucket {
        fn uid(&self) -> Uid {
            self.uid
        }

        fn display_name(&self) -> Option<&str> {
            self.name.as_deref()
        }
    }

    fn parent() -> (ParentDto<Bucket>, Bucket, Bucket) {
        let a = Bucket::named("low", 0);
        let b = Bucket::named("high", 500);
        (ParentDto::with_children(vec![a.clone(), b.clone()]), a, b)
    }

    #[test]
    fn test_empty_parent() {
        let mut parent: ParentDto<Bucket> = ParentDto::new();
        assert_eq!(parent.child_count(), 0);
        assert_eq!(parent.child_summary(), "");
        assert!(parent.selected_child().is_none());
        assert!(parent.edit_child_action().is_none());
        assert!(parent.delete_child_action().is_none());
    }

    #[test]
    fn test_find_and_find_by_name() {
        let (parent, a, b) = parent();
        assert_eq!(parent.find(b.uid), Some(&b));
        assert_eq!(parent.find_by_name("low"), Some(&a));
        assert!(parent.find(Uid::new()).is_none());
        assert!(parent.find_by_name("medium").is_none());
    }

    #[test]
    fn test_find_returns_first_match() {
        let (mut parent, a, _) = parent();
        let mut dup = a.clone();
        dup.lower = 99;
        parent.add(dup);

        assert_eq!(parent.child_count(), 3);
        assert_eq!(parent.find(a.uid).map(|c| c.lower), Some(0));
    }

    #[test]
    fn test_remove_matches_by_uid() {
        let (mut parent, a, b) = parent();
        let mut detached = b.clone();
        detached.lower = 1;

        let removed = parent.remove(&detached).unwrap();
        assert_eq!(removed, b);
        assert_eq!(parent.children(), &[a]);
        assert!(parent.remove(&detached).is_none());
    }

    #[test]
    fn test_replace_in_place_or_append() {
        let (mut parent, a, b) = parent();
        let mut edited = a.clone();
        edited.lower = 10;
        parent.replace(edited.clone());
        assert_eq!(parent.children(), &[edited.clone(), b.clone()]);

        let fresh = Bucket::named("medium", 250);
        parent.replace(fresh.clone());
        assert_eq!(parent.children(), &[edited, b, fresh]);
    }

    #[test]
    fn test_edit_without_selection_clears_slot() {
        let (mut parent, a, _) = parent();
        parent.set_child_edit(Some(a));
        parent.set_selected_child_id(Some(Uid::new()));

        assert!(parent.edit_child_action().is_none());
        assert_eq!(parent.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_edit_copy_is_detached() {
        let (mut parent, a, b) = parent();
        parent.set_selected_child_id(Some(b.uid));

        let edit = parent.edit_child_action_mut().unwrap();
        edit.name = Some("critical".to_string());

        assert_eq!(parent.edit_state(), EditState::Editing);
        assert_eq!(parent.children(), &[a, b]);
    }

    #[test]
    fn test_save_and_cancel_when_idle_are_noops() {
        let (mut parent, a, b) = parent();
        parent.save_child_action();
        parent.cancel_child_action();
        assert_eq!(parent.children(), &[a, b]);
        assert_eq!(parent.edit_state(), EditState::Idle);
    }

    #[test]
    fn test_save_appends_when_original_was_deleted() {
        let (mut parent, a, b) = parent();
        parent.set_selected_child_id(Some(a.uid));
        parent.edit_child_action();
        parent.delete_child_action();
        parent.save_child_action();

        assert_eq!(parent.children(), &[b, a]);
    }

    #[test]
    fn test_summary_skips_unnamed() {
        let (mut parent, _, _) = parent();
        parent.add(Bucket {
            uid: Uid::new(),
            name: None,
            lower: 900,
        });
        parent.add(Bucket::named("max", 1000));
        assert_eq!(parent.child_summary(), "low, high, max");
    }
}
