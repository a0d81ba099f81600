//! Post file loading.
//!
//! Posts come from a JSON document with a `posts` array and an optional
//! `following` list. The built-in sample set is compiled into the binary so
//! the app runs with no files on disk.
use super::types::Post;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// The sample feed shipped with the binary.
const SAMPLE_POSTS: &str = include_str!("../../data/posts.json");

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum PostLoadError {
    #[error("Failed to read post file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON in post file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Post file too large: {0}")]
    TooLarge(String),

    #[error("Duplicate post id '{0}'")]
    DuplicateId(String),

    #[error("Post at index {0} has an empty id")]
    EmptyId(usize),
}

// ============================================================================
// Post File
// ============================================================================

/// On-disk shape of a post file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostFile {
    pub posts: Vec<Post>,
    /// Ids of posts whose authors start out followed.
    #[serde(default)]
    pub following: Vec<String>,
}

/// A validated post set, ready to seed a session.
#[derive(Debug, Clone)]
pub struct PostSet {
    pub posts: Arc<[Arc<Post>]>,
    pub following: HashSet<String>,
}

impl PostSet {
    /// Maximum post file size (8 MB).
    const MAX_FILE_SIZE: u64 = 8 * 1_048_576;

    /// The built-in sample feed.
    pub fn sample() -> Result<Self, PostLoadError> {
        Self::from_json(SAMPLE_POSTS)
    }

    /// Load and validate a post file from disk.
    pub fn load(path: &Path) -> Result<Self, PostLoadError> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > Self::MAX_FILE_SIZE {
            return Err(PostLoadError::TooLarge(format!(
                "Post file is {} bytes (max {} bytes)",
                meta.len(),
                Self::MAX_FILE_SIZE
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let set = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            posts = set.posts.len(),
            "Loaded post file"
        );
        Ok(set)
    }

    /// Parse and validate a post file document.
    pub fn from_json(content: &str) -> Result<Self, PostLoadError> {
        let file: PostFile = serde_json::from_str(content)?;
        Self::from_file(file)
    }

    /// Validate a parsed post file.
    ///
    /// Ids must be non-empty and unique. `following` entries naming unknown
    /// posts are dropped with a warning.
    pub fn from_file(file: PostFile) -> Result<Self, PostLoadError> {
        let mut seen = HashSet::with_capacity(file.posts.len());
        for (idx, post) in file.posts.iter().enumerate() {
            if post.id.trim().is_empty() {
                return Err(PostLoadError::EmptyId(idx));
            }
            if !seen.insert(post.id.as_str()) {
                return Err(PostLoadError::DuplicateId(post.id.clone()));
            }
        }

        let mut following = HashSet::with_capacity(file.following.len());
        for id in file.following {
            if seen.contains(id.as_str()) {
                following.insert(id);
            } else {
                tracing::warn!(post_id = %id, "Ignoring follow entry for unknown post");
            }
        }

        let posts: Arc<[Arc<Post>]> = file.posts.into_iter().map(Arc::new).collect();
        Ok(Self { posts, following })
    }
}

// ============================================================================
// Tests
// ============================================================================
