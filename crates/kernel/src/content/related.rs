//! Related-post selection helpers.

use std::collections::HashSet;

use indexmap::IndexMap;
use postwright_sdk::types::{Post, PostId};

/// Build the id → title options offered when picking related posts.
///
/// The post with `exclude_id` (normally the one being edited) is left out;
/// pass `None` for a post that does not exist yet. Options keep the order of
/// `posts`.
pub fn build_related_post_options<'a>(
    posts: impl IntoIterator<Item = &'a Post>,
    exclude_id: impl Into<Option<PostId>>,
) -> IndexMap<PostId, String> {
    let exclude_id = exclude_id.into();
    posts
        .into_iter()
        .filter(|post| Some(post.id) != exclude_id)
        .map(|post| (post.id, post.title.clone()))
        .collect()
}

/// Clean a submitted related-post selection: drops `post_id` itself and
/// repeated ids, keeping first-seen order.
pub fn normalize_related_post_ids(
    post_id: PostId,
    ids: impl IntoIterator<Item = PostId>,
) -> Vec<PostId> {
    let mut seen = HashSet::new();
    ids.into_iter()
        .filter(|id| *id != post_id && seen.insert(*id))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn posts() -> Vec<Post> {
        vec![
            Post::new(1, "A", "a"),
            Post::new(2, "B", "b"),
            Post::new(3, "C", "c"),
        ]
    }

    #[test]
    fn excludes_current_post() {
        let options = build_related_post_options(&posts(), PostId(2));
        let expected: IndexMap<PostId, String> =
            [(PostId(1), "A".to_string()), (PostId(3), "C".to_string())]
                .into_iter()
                .collect();
        assert_eq!(options, expected);
        assert!(!options.contains_key(&PostId(2)));
    }

    #[test]
    fn keeps_input_order() {
        let mut list = posts();
        list.reverse();
        let options = build_related_post_options(&list, PostId(99));
        let ids: Vec<i64> = options.keys().map(|id| id.0).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn no_exclusion_for_new_post() {
        let options = build_related_post_options(&posts(), None);
        let ids: Vec<i64> = options.keys().map(|id| id.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(options[&PostId(2)], "B");
    }

    #[test]
    fn empty_input() {
        let options = build_related_post_options(&[], PostId(1));
        assert!(options.is_empty());
    }

    #[test]
    fn normalize_drops_self_and_duplicates() {
        let ids = [3, 1, 3, 5, 1, 2].map(PostId);
        assert_eq!(
            normalize_related_post_ids(PostId(5), ids),
            vec![PostId(3), PostId(1), PostId(2)]
        );
    }
}
