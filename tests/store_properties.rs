//! Property tests for the post store and the home list projection.

use proptest::prelude::*;
use std::collections::HashSet;

use zforum::store::{project, PostStore, SortMode};
use zforum::{PostFields, PostId};

#[derive(Debug, Clone)]
enum Op {
    Create(String),
    Upvote(usize),
    Comment(usize, String),
    Edit(usize, String),
    Delete(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => "[a-zA-Z ]{0,8}".prop_map(Op::Create),
        3 => (0usize..16).prop_map(Op::Upvote),
        2 => (0usize..16, "[a-z ]{0,6}").prop_map(|(i, t)| Op::Comment(i, t)),
        1 => (0usize..16, "[a-zA-Z]{1,8}").prop_map(|(i, t)| Op::Edit(i, t)),
        1 => (0usize..16).prop_map(Op::Delete),
    ]
}

/// Resolves an index against every id ever issued, so deleted ids are
/// exercised too.
fn pick(issued: &[PostId], index: usize) -> PostId {
    if issued.is_empty() {
        PostId::new(1)
    } else {
        issued[index % issued.len()]
    }
}

fn run(ops: &[Op]) -> (PostStore, Vec<PostId>) {
    let mut store = PostStore::new();
    let mut issued = Vec::new();

    for op in ops {
        match op {
            Op::Create(title) => {
                if let Ok(id) = store.create(PostFields::new(title.clone(), "", "")) {
                    issued.push(id);
                }
            }
            Op::Upvote(i) => {
                store.upvote(pick(&issued, *i));
            }
            Op::Comment(i, text) => {
                store.add_comment(pick(&issued, *i), text);
            }
            Op::Edit(i, title) => {
                store.edit(pick(&issued, *i), PostFields::new(title.clone(), "edited", ""));
            }
            Op::Delete(i) => {
                store.delete(pick(&issued, *i));
            }
        }
    }

    (store, issued)
}

proptest! {
    #[test]
    fn ids_are_never_reused(ops in prop::collection::vec(op(), 0..40)) {
        let (store, issued) = run(&ops);

        let unique: HashSet<_> = issued.iter().copied().collect();
        prop_assert_eq!(unique.len(), issued.len());

        let live: HashSet<_> = store.posts().iter().map(|p| p.id).collect();
        prop_assert_eq!(live.len(), store.len());
    }

    #[test]
    fn blank_titles_leave_the_store_unchanged(
        ops in prop::collection::vec(op(), 0..20),
        blank in "[ \t]{0,4}",
    ) {
        let (mut store, _) = run(&ops);
        let before = store.clone();

        let err = store.create(PostFields::new(blank, "content", "")).unwrap_err();
        prop_assert!(err.is_validation());
        prop_assert_eq!(store, before);
    }

    #[test]
    fn n_upvotes_add_exactly_n(n in 0u32..50) {
        let mut store = PostStore::new();
        let id = store.create(PostFields::new("Counted", "", "")).unwrap();

        for _ in 0..n {
            prop_assert!(store.upvote(id));
        }
        prop_assert_eq!(store.get(id).unwrap().upvotes, n);
    }

    #[test]
    fn operations_on_absent_ids_change_nothing(ops in prop::collection::vec(op(), 0..30)) {
        let (mut store, _) = run(&ops);
        let before = store.clone();
        let absent = PostId::new(7);

        prop_assert!(!store.upvote(absent));
        prop_assert!(!store.add_comment(absent, "hello"));
        prop_assert!(!store.edit(absent, PostFields::new("x", "", "")));
        prop_assert!(!store.delete(absent));
        prop_assert_eq!(store, before);
    }

    #[test]
    fn comments_keep_submission_order(comments in prop::collection::vec("[a-z ]{0,6}", 0..12)) {
        let mut store = PostStore::new();
        let id = store.create(PostFields::new("Thread", "", "")).unwrap();

        for comment in &comments {
            store.add_comment(id, comment);
        }

        let expected: Vec<String> = comments
            .iter()
            .filter(|c| !c.trim().is_empty())
            .cloned()
            .collect();
        prop_assert_eq!(&store.get(id).unwrap().comments, &expected);
    }

    #[test]
    fn deleted_posts_stay_deleted(ops in prop::collection::vec(op(), 1..30)) {
        let (mut store, issued) = run(&ops);
        let Some(&victim) = issued.first() else {
            return Ok(());
        };

        store.delete(victim);
        store.upvote(victim);
        store.add_comment(victim, "late");
        store.edit(victim, PostFields::new("Back", "", ""));

        prop_assert!(store.get(victim).is_none());
        for sort in [SortMode::Recency, SortMode::Upvotes] {
            prop_assert!(project(store.posts(), "", sort).iter().all(|p| p.id != victim));
        }
    }

    #[test]
    fn sort_orders_hold(ops in prop::collection::vec(op(), 0..40)) {
        let (store, _) = run(&ops);

        let recent = project(store.posts(), "", SortMode::Recency);
        prop_assert!(recent.windows(2).all(|w| w[0].id > w[1].id));

        let top = project(store.posts(), "", SortMode::Upvotes);
        prop_assert!(top.windows(2).all(|w| w[0].upvotes >= w[1].upvotes));
        prop_assert_eq!(top.len(), store.len());
    }

    #[test]
    fn projection_is_deterministic_and_case_insensitive(
        ops in prop::collection::vec(op(), 0..40),
        query in "[a-zA-Z]{0,3}",
    ) {
        let (store, _) = run(&ops);

        for sort in [SortMode::Recency, SortMode::Upvotes] {
            let first = project(store.posts(), &query, sort);
            prop_assert_eq!(&first, &project(store.posts(), &query, sort));
            prop_assert_eq!(&first, &project(store.posts(), &query.to_uppercase(), sort));
            prop_assert_eq!(&first, &project(store.posts(), &query.to_lowercase(), sort));
            prop_assert!(first
                .iter()
                .all(|p| p.title.to_lowercase().contains(&query.to_lowercase())));
        }
    }
}
