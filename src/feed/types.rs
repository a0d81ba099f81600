use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// A filter name that does not correspond to any chip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {kind} '{value}'")]
pub struct UnknownFilter {
    pub kind: &'static str,
    pub value: String,
}

// ============================================================================
// Post
// ============================================================================

/// How a post's media is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Image,
    Video,
}

impl MediaType {
    pub fn name(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// Topic a post is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    News,
    Art,
    Sports,
    Food,
    Travel,
    Tech,
    Lifestyle,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Self::News,
        Self::Art,
        Self::Sports,
        Self::Food,
        Self::Travel,
        Self::Tech,
        Self::Lifestyle,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Art => "art",
            Self::Sports => "sports",
            Self::Food => "food",
            Self::Travel => "travel",
            Self::Tech => "tech",
            Self::Lifestyle => "lifestyle",
        }
    }
}

/// A single feed item. Immutable once loaded.
///
/// `date` is kept as the display string; the query engine parses it on demand
/// for date sorting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub user_name: String,
    pub user_avatar_url: String,
    pub media_type: MediaType,
    pub media_url: String,
    /// Poster frame for video posts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
    /// Video length, used by the simulated player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
    pub date: String,
    pub location: String,
    pub views: u64,
    pub caption: String,
    pub category: Category,
}

impl Post {
    pub fn is_video(&self) -> bool {
        self.media_type == MediaType::Video
    }
}

// ============================================================================
// Filter State
// ============================================================================

/// Category chip selection. `All` is the sentinel that disables the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    /// Chips in display order.
    pub const CHIPS: [CategoryFilter; 8] = [
        Self::All,
        Self::Only(Category::News),
        Self::Only(Category::Art),
        Self::Only(Category::Sports),
        Self::Only(Category::Food),
        Self::Only(Category::Travel),
        Self::Only(Category::Tech),
        Self::Only(Category::Lifestyle),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(c) => c.name(),
        }
    }

    pub fn matches(self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => c == category,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::CHIPS
            .into_iter()
            .find(|chip| chip.name() == lowered)
            .ok_or_else(|| UnknownFilter {
                kind: "category",
                value: s.to_string(),
            })
    }
}

/// Media type chip selection. `All` is the sentinel that disables the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MediaTypeFilter {
    #[default]
    All,
    Only(MediaType),
}

impl MediaTypeFilter {
    pub const CHIPS: [MediaTypeFilter; 3] = [
        Self::All,
        Self::Only(MediaType::Image),
        Self::Only(MediaType::Video),
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(m) => m.name(),
        }
    }

    pub fn matches(self, media_type: MediaType) -> bool {
        match self {
            Self::All => true,
            Self::Only(m) => m == media_type,
        }
    }
}

impl FromStr for MediaTypeFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        Self::CHIPS
            .into_iter()
            .find(|chip| chip.name() == lowered)
            .ok_or_else(|| UnknownFilter {
                kind: "media type",
                value: s.to_string(),
            })
    }
}

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortKey {
    /// Most recent first.
    #[default]
    Date,
    /// Most viewed first.
    Views,
    /// Author name, A to Z.
    Name,
    /// Filtered input order, unsorted. Unknown sort key names resolve here
    /// instead of failing.
    Original,
}

impl SortKey {
    /// Sort options offered in the filter modal.
    pub const CHIPS: [SortKey; 3] = [Self::Date, Self::Views, Self::Name];

    pub fn name(self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Views => "views",
            Self::Name => "name",
            Self::Original => "original",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Date => "Date",
            Self::Views => "Views",
            Self::Name => "Name",
            Self::Original => "Original",
        }
    }

    /// Resolve a sort key by name. Never fails: anything unrecognized maps to
    /// [`SortKey::Original`].
    pub fn from_name(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Self::Date,
            "views" => Self::Views,
            "name" => Self::Name,
            other => {
                if other != "original" {
                    tracing::debug!(sort_key = %other, "Unknown sort key, keeping input order");
                }
                Self::Original
            }
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

macro_rules! display_by_name {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.name())
            }
        })*
    };
}

display_by_name!(MediaType, Category, CategoryFilter, MediaTypeFilter, SortKey);

/// The current search, category, media-type and sort configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_text: String,
    pub category: CategoryFilter,
    pub media_type: MediaTypeFilter,
    pub sort_key: SortKey,
}

impl FilterState {
    /// True when no predicate narrows the post set.
    pub fn is_unfiltered(&self) -> bool {
        self.search_text.trim().is_empty()
            && self.category == CategoryFilter::All
            && self.media_type == MediaTypeFilter::All
    }
}

// ============================================================================
// Tests
// ============================================================================
