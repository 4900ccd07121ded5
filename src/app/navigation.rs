//! Page navigation and the transient editing state attached to it.
//!
//! [`Navigation`] is a small state machine over [`Page`]s. It also owns the
//! three kinds of uncommitted input the user can be in the middle of:
//!
//! - the create-form draft,
//! - the edit buffer for the post being viewed,
//! - the pending comment for the post being viewed.
//!
//! Transitions that do not apply to the current page return `false` and leave
//! everything untouched. Transitions that commit input take the store by
//! mutable reference so the store change and the page change happen together.
//!
//! ```text
//!  Home ──request_create──▶ Create ──submit ok / cancel──▶ Home
//!   │                         └──submit fails──▶ Create (draft kept)
//!   └──select(p)──▶ Viewing(p.id) ──back / confirm_delete──▶ Home
//!                      └──enter_edit / save_edit / cancel_edit──▶ Viewing(p.id)
//! ```

use crate::domain::{Post, PostFields, PostId, Result};
use crate::store::PostStore;

/// The logical page being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Create,
    Viewing(PostId),
}

/// One of the three inputs of a post form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Content,
    Image,
}

impl FormField {
    /// All fields in tab order.
    pub const ALL: [Self; 3] = [Self::Title, Self::Content, Self::Image];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Content => "Content",
            Self::Image => "Image URL",
        }
    }

    const fn next(self) -> Self {
        match self {
            Self::Title => Self::Content,
            Self::Content => Self::Image,
            Self::Image => Self::Title,
        }
    }

    const fn prev(self) -> Self {
        match self {
            Self::Title => Self::Image,
            Self::Content => Self::Title,
            Self::Image => Self::Content,
        }
    }
}

/// Text typed into a post form, plus which field has the cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    /// Title as typed, untrimmed.
    pub title: String,
    /// Body text.
    pub content: String,
    /// Image URL as typed.
    pub image: String,
    /// Field receiving keystrokes.
    pub focus: FormField,
}

impl PostDraft {
    /// Seeds a draft from the live values of `post`.
    #[must_use]
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            image: post.image.clone(),
            focus: FormField::Title,
        }
    }

    /// Returns the text of `field`.
    #[must_use]
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.title,
            FormField::Content => &self.content,
            FormField::Image => &self.image,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            FormField::Title => &mut self.title,
            FormField::Content => &mut self.content,
            FormField::Image => &mut self.image,
        }
    }

    /// Appends a character to the focused field.
    pub fn push(&mut self, c: char) {
        self.focused_mut().push(c);
    }

    /// Removes the last character of the focused field.
    pub fn pop(&mut self) {
        self.focused_mut().pop();
    }

    /// Moves the cursor to the next field, wrapping from Image to Title.
    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    /// Moves the cursor to the previous field, wrapping from Title to Image.
    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    /// Snapshot of the draft as store input.
    #[must_use]
    pub fn fields(&self) -> PostFields {
        PostFields::new(self.title.clone(), self.content.clone(), self.image.clone())
    }
}

/// Uncommitted edits of the viewed post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    /// Values that `save_edit` will write.
    pub draft: PostDraft,
    /// Whether the detail page shows the edit form.
    pub edit_mode: bool,
}

/// What the detail page should show for the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection<'a> {
    /// Not on a detail page.
    None,
    Found(&'a Post),
    /// The selected id no longer resolves, typically after a delete.
    NotFound(PostId),
}

/// Page state machine plus the drafts that belong to each page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Navigation {
    page: Page,
    create_draft: PostDraft,
    edit: EditBuffer,
    comment_draft: String,
}

impl Navigation {
    /// Starts on `Home` with empty drafts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn page(&self) -> Page {
        self.page
    }

    #[must_use]
    pub const fn create_draft(&self) -> &PostDraft {
        &self.create_draft
    }

    /// Mutable access to the create form, whatever the current page.
    pub fn create_draft_mut(&mut self) -> &mut PostDraft {
        &mut self.create_draft
    }

    /// The edit buffer of the viewed post, seeded on `select` and `enter_edit`.
    #[must_use]
    pub const fn edit_buffer(&self) -> &EditBuffer {
        &self.edit
    }

    /// Mutable access to the edit draft, only while edit mode is on.
    pub fn edit_draft_mut(&mut self) -> Option<&mut PostDraft> {
        self.edit.edit_mode.then_some(&mut self.edit.draft)
    }

    /// Returns `true` while the detail page shows the edit form.
    #[must_use]
    pub const fn is_editing(&self) -> bool {
        self.edit.edit_mode
    }

    /// Text typed into the comment input of the viewed post.
    #[must_use]
    pub fn comment_draft(&self) -> &str {
        &self.comment_draft
    }

    /// Mutable access to the comment input.
    pub fn comment_draft_mut(&mut self) -> &mut String {
        &mut self.comment_draft
    }

    /// Id of the post on the detail page, if any.
    #[must_use]
    pub const fn viewing(&self) -> Option<PostId> {
        match self.page {
            Page::Viewing(id) => Some(id),
            Page::Home | Page::Create => None,
        }
    }

    /// Resolves the current selection against `store`.
    #[must_use]
    pub fn selected<'a>(&self, store: &'a PostStore) -> Selection<'a> {
        match self.page {
            Page::Viewing(id) => store.get(id).map_or(Selection::NotFound(id), Selection::Found),
            Page::Home | Page::Create => Selection::None,
        }
    }

    /// `Home -> Create`.
    pub fn request_create(&mut self) -> bool {
        if self.page != Page::Home {
            return false;
        }
        self.page = Page::Create;
        true
    }

    /// `Create -> Home`, keeping whatever was typed for next time.
    pub fn cancel_create(&mut self) -> bool {
        if self.page != Page::Create {
            return false;
        }
        self.page = Page::Home;
        true
    }

    /// Submits the create form.
    ///
    /// On success the draft is cleared and the page returns to `Home`. On a
    /// validation failure the page stays on `Create` with the draft intact.
    /// Outside the create page this returns `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Propagates the store's validation error for a blank title.
    pub fn submit_create(&mut self, store: &mut PostStore) -> Result<Option<PostId>> {
        if self.page != Page::Create {
            return Ok(None);
        }

        let id = store.create(self.create_draft.fields())?;
        self.create_draft = PostDraft::default();
        self.page = Page::Home;
        Ok(Some(id))
    }

    /// `Home -> Viewing(post.id)`, seeding the edit buffer from `post`.
    pub fn select(&mut self, post: &Post) -> bool {
        if self.page != Page::Home {
            return false;
        }
        self.page = Page::Viewing(post.id);
        self.edit = EditBuffer {
            draft: PostDraft::from_post(post),
            edit_mode: false,
        };
        self.comment_draft.clear();
        true
    }

    /// `Viewing -> Home`, dropping the comment draft and any pending edit.
    pub fn back(&mut self) -> bool {
        if self.viewing().is_none() {
            return false;
        }
        self.leave_post();
        true
    }

    /// Turns edit mode on, re-seeding the buffer from the live post.
    ///
    /// Refused when the viewed post no longer exists.
    pub fn enter_edit(&mut self, store: &PostStore) -> bool {
        let Selection::Found(post) = self.selected(store) else {
            return false;
        };
        if self.edit.edit_mode {
            return false;
        }
        self.edit = EditBuffer {
            draft: PostDraft::from_post(post),
            edit_mode: true,
        };
        true
    }

    /// Leaves edit mode without touching the store.
    pub fn cancel_edit(&mut self) -> bool {
        if self.viewing().is_none() || !self.edit.edit_mode {
            return false;
        }
        self.edit.edit_mode = false;
        true
    }

    /// Commits the edit buffer and leaves edit mode.
    ///
    /// Both happen or neither does: if the post has disappeared the buffer
    /// stays in edit mode and the store is not modified.
    pub fn save_edit(&mut self, store: &mut PostStore) -> bool {
        let Some(id) = self.viewing() else {
            return false;
        };
        if !self.edit.edit_mode {
            return false;
        }
        if !store.edit(id, self.edit.draft.fields()) {
            return false;
        }
        self.edit.edit_mode = false;
        true
    }

    /// Deletes the viewed post and returns to `Home`.
    ///
    /// The page changes even if the post was already gone. Returns whether a
    /// post was actually removed.
    pub fn confirm_delete(&mut self, store: &mut PostStore) -> bool {
        let Some(id) = self.viewing() else {
            return false;
        };
        let removed = store.delete(id);
        self.leave_post();
        removed
    }

    /// Appends the comment draft to the viewed post.
    ///
    /// The draft is cleared only when the comment was stored.
    pub fn submit_comment(&mut self, store: &mut PostStore) -> bool {
        let Some(id) = self.viewing() else {
            return false;
        };
        if !store.add_comment(id, &self.comment_draft) {
            return false;
        }
        self.comment_draft.clear();
        true
    }

    fn leave_post(&mut self) {
        self.page = Page::Home;
        self.edit.edit_mode = false;
        self.comment_draft.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_post(title: &str) -> (PostStore, PostId) {
        let mut store = PostStore::new();
        let id = store.create(PostFields::new(title, "body", "")).unwrap();
        (store, id)
    }

    fn viewing(store: &PostStore, id: PostId) -> Navigation {
        let mut nav = Navigation::new();
        assert!(nav.select(store.get(id).unwrap()));
        nav
    }

    #[test]
    fn starts_on_home() {
        let nav = Navigation::new();
        assert_eq!(nav.page(), Page::Home);
        assert!(!nav.is_editing());
    }

    #[test]
    fn create_round_trip_clears_draft() {
        let mut store = PostStore::new();
        let mut nav = Navigation::new();

        assert!(nav.request_create());
        "Hello".chars().for_each(|c| nav.create_draft_mut().push(c));
        let id = nav.submit_create(&mut store).unwrap();

        assert_eq!(id.map(PostId::get), Some(1001));
        assert_eq!(nav.page(), Page::Home);
        assert_eq!(nav.create_draft(), &PostDraft::default());
    }

    #[test]
    fn failed_create_stays_with_draft() {
        let mut store = PostStore::new();
        let mut nav = Navigation::new();
        nav.request_create();
        nav.create_draft_mut().focus_next();
        "only content".chars().for_each(|c| nav.create_draft_mut().push(c));

        let err = nav.submit_create(&mut store).unwrap_err();

        assert!(err.is_validation());
        assert_eq!(nav.page(), Page::Create);
        assert_eq!(nav.create_draft().content, "only content");
        assert!(store.is_empty());
    }

    #[test]
    fn cancel_create_keeps_draft() {
        let mut nav = Navigation::new();
        nav.request_create();
        nav.create_draft_mut().push('x');
        assert!(nav.cancel_create());
        assert_eq!(nav.page(), Page::Home);
        assert_eq!(nav.create_draft().title, "x");
    }

    #[test]
    fn select_seeds_edit_buffer() {
        let (store, id) = store_with_post("Seed");
        let nav = viewing(&store, id);
        assert_eq!(nav.page(), Page::Viewing(id));
        assert_eq!(nav.edit_buffer().draft.title, "Seed");
        assert!(!nav.is_editing());
    }

    #[test]
    fn cancel_edit_leaves_store_untouched() {
        let (store, id) = store_with_post("Keep");
        let before = store.get(id).cloned();
        let mut nav = viewing(&store, id);

        assert!(nav.enter_edit(&store));
        nav.edit_draft_mut().unwrap().push('!');
        assert!(nav.cancel_edit());

        assert_eq!(store.get(id).cloned(), before);
        assert_eq!(nav.page(), Page::Viewing(id));
        assert!(nav.edit_draft_mut().is_none());
    }

    #[test]
    fn save_edit_commits_and_exits_edit_mode() {
        let (mut store, id) = store_with_post("Old");
        let mut nav = viewing(&store, id);

        nav.enter_edit(&store);
        let draft = nav.edit_draft_mut().unwrap();
        draft.title = "New".to_string();
        assert!(nav.save_edit(&mut store));

        assert_eq!(store.get(id).unwrap().title, "New");
        assert!(!nav.is_editing());
        assert_eq!(nav.page(), Page::Viewing(id));
    }

    #[test]
    fn save_edit_for_deleted_post_changes_nothing() {
        let (mut store, id) = store_with_post("Gone");
        let mut nav = viewing(&store, id);
        nav.enter_edit(&store);

        store.delete(id);
        assert!(!nav.save_edit(&mut store));
        assert!(nav.is_editing());
        assert_eq!(nav.selected(&store), Selection::NotFound(id));
    }

    #[test]
    fn enter_edit_reseeds_from_live_post() {
        let (mut store, id) = store_with_post("First");
        let mut nav = viewing(&store, id);
        store.edit(id, PostFields::new("Second", "", ""));

        assert!(nav.enter_edit(&store));
        assert_eq!(nav.edit_buffer().draft.title, "Second");
    }

    #[test]
    fn delete_always_goes_home() {
        let (mut store, id) = store_with_post("Doomed");
        let mut nav = viewing(&store, id);
        nav.comment_draft_mut().push_str("draft");

        assert!(nav.confirm_delete(&mut store));
        assert_eq!(nav.page(), Page::Home);
        assert!(nav.comment_draft().is_empty());
        assert!(store.get(id).is_none());
    }

    #[test]
    fn comment_draft_cleared_only_on_success() {
        let (mut store, id) = store_with_post("Talk");
        let mut nav = viewing(&store, id);

        nav.comment_draft_mut().push_str("   ");
        assert!(!nav.submit_comment(&mut store));
        assert_eq!(nav.comment_draft(), "   ");

        nav.comment_draft_mut().clear();
        nav.comment_draft_mut().push_str("nice");
        assert!(nav.submit_comment(&mut store));
        assert!(nav.comment_draft().is_empty());
        assert_eq!(store.get(id).unwrap().comments, vec!["nice"]);
    }

    #[test]
    fn invalid_transitions_are_no_ops() {
        let (mut store, _) = store_with_post("x");
        let mut nav = Navigation::new();

        assert!(!nav.back());
        assert!(!nav.cancel_create());
        assert!(!nav.enter_edit(&store));
        assert!(!nav.save_edit(&mut store));
        assert!(!nav.confirm_delete(&mut store));
        assert_eq!(nav.submit_create(&mut store).unwrap(), None);
        assert_eq!(nav, Navigation::new());
    }

    #[test]
    fn form_focus_cycles_both_ways() {
        let mut draft = PostDraft::default();
        draft.focus_prev();
        assert_eq!(draft.focus, FormField::Image);
        draft.focus_next();
        draft.focus_next();
        assert_eq!(draft.focus, FormField::Content);
        draft.push('a');
        draft.push('b');
        draft.pop();
        assert_eq!(draft.value(FormField::Content), "a");
    }
}
