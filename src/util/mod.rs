//! Utility functions for common operations.
//!
//! - **URL validation**: media/avatar URLs and browser targets
//! - **Text processing**: Unicode-aware width, truncation and number formatting

mod text;
mod url_validator;

pub use text::{
    capitalize, display_width, format_clock, format_count, strip_control_chars,
    truncate_to_width,
};
pub use url_validator::{
    validate_media_url, validate_url_for_open, UrlValidationError, MAX_URL_LENGTH,
};

/// Maximum allowed search text length.
pub const MAX_SEARCH_LENGTH: usize = 256;
