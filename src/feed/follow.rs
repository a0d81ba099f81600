use std::collections::{HashMap, HashSet};

/// Per-post "following" flags.
///
/// Only ids from the loaded post set are tracked; toggles for anything else
/// are ignored. Independent of feed ordering and filtering.
#[derive(Debug, Clone, Default)]
pub struct FollowState {
    following: HashMap<String, bool>,
}

impl FollowState {
    /// Build from the known post ids and the subset that starts out followed.
    pub fn new<'a>(post_ids: impl IntoIterator<Item = &'a str>, followed: &HashSet<String>) -> Self {
        let following = post_ids
            .into_iter()
            .map(|id| (id.to_string(), followed.contains(id)))
            .collect();
        Self { following }
    }

    pub fn is_following(&self, post_id: &str) -> bool {
        self.following.get(post_id).copied().unwrap_or(false)
    }

    /// Flip the flag for a post. Returns the new value, or `None` when the id
    /// is unknown.
    pub fn toggle(&mut self, post_id: &str) -> Option<bool> {
        match self.following.get_mut(post_id) {
            Some(flag) => {
                *flag = !*flag;
                tracing::debug!(post_id = %post_id, following = *flag, "Toggled follow");
                Some(*flag)
            }
            None => {
                tracing::debug!(post_id = %post_id, "Ignoring follow toggle for unknown post");
                None
            }
        }
    }

    /// Number of followed posts.
    pub fn count(&self) -> usize {
        self.following.values().filter(|f| **f).count()
    }
}
