//! "Update Account" profile form.
//!
//! Session-scoped: edits live in memory only. Defaults come from the
//! `[profile]` config section.

use crate::util::validate_media_url;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum bio length in characters.
pub const MAX_BIO_CHARS: usize = 160;

/// Input cap for the short text fields.
pub const MAX_FIELD_CHARS: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Bio is {len} characters (max {max})")]
    BioTooLong { len: usize, max: usize },

    #[error("Invalid avatar URL: {0}")]
    InvalidAvatarUrl(String),
}

/// The profile itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub name: String,
    pub gender: String,
    pub location: String,
    pub profession: String,
    pub bio: String,
    pub avatar_url: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Prince Kumar".to_string(),
            gender: "Male".to_string(),
            location: "Ludhiana, Punjab".to_string(),
            profession: "Software Developer".to_string(),
            bio: "Passionate software developer with expertise in React Native and modern \
                  JavaScript frameworks. Building innovative mobile solutions that solve \
                  real-world problems. Always learning and growing in the tech ecosystem."
                .to_string(),
            avatar_url: "https://randomuser.me/api/portraits/men/1.jpg".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileField {
    Name,
    Gender,
    Location,
    Profession,
    Bio,
    AvatarUrl,
}

impl ProfileField {
    /// Display order on the form.
    pub const ALL: [ProfileField; 6] = [
        Self::AvatarUrl,
        Self::Name,
        Self::Gender,
        Self::Location,
        Self::Profession,
        Self::Bio,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Gender => "Gender",
            Self::Location => "Location",
            Self::Profession => "Profession",
            Self::Bio => "Bio",
            Self::AvatarUrl => "Photo URL",
        }
    }

    /// Input cap in characters.
    pub fn max_chars(self) -> usize {
        match self {
            Self::Bio => MAX_BIO_CHARS,
            Self::AvatarUrl => crate::util::MAX_URL_LENGTH,
            _ => MAX_FIELD_CHARS,
        }
    }
}

impl Profile {
    pub fn value(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Name => &self.name,
            ProfileField::Gender => &self.gender,
            ProfileField::Location => &self.location,
            ProfileField::Profession => &self.profession,
            ProfileField::Bio => &self.bio,
            ProfileField::AvatarUrl => &self.avatar_url,
        }
    }

    fn slot(&mut self, field: ProfileField) -> &mut String {
        match field {
            ProfileField::Name => &mut self.name,
            ProfileField::Gender => &mut self.gender,
            ProfileField::Location => &mut self.location,
            ProfileField::Profession => &mut self.profession,
            ProfileField::Bio => &mut self.bio,
            ProfileField::AvatarUrl => &mut self.avatar_url,
        }
    }

    /// Validate and store a new field value. On error the profile is unchanged.
    pub fn set(&mut self, field: ProfileField, value: &str) -> Result<(), ProfileError> {
        let value = validate_field(field, value)?;
        *self.slot(field) = value;
        tracing::debug!(field = field.label(), "Profile field updated");
        Ok(())
    }
}

/// Check a value for a field, returning the normalized form to store.
pub fn validate_field(field: ProfileField, value: &str) -> Result<String, ProfileError> {
    match field {
        ProfileField::Name => {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                return Err(ProfileError::EmptyName);
            }
            Ok(trimmed.to_string())
        }
        ProfileField::Bio => {
            let len = value.chars().count();
            if len > MAX_BIO_CHARS {
                return Err(ProfileError::BioTooLong {
                    len,
                    max: MAX_BIO_CHARS,
                });
            }
            Ok(value.to_string())
        }
        ProfileField::AvatarUrl => validate_media_url(value)
            .map(String::from)
            .map_err(|e| ProfileError::InvalidAvatarUrl(e.to_string())),
        ProfileField::Gender | ProfileField::Location | ProfileField::Profession => {
            Ok(value.trim().to_string())
        }
    }
}

// ============================================================================
// Form State
// ============================================================================

#[derive(Debug, Clone)]
struct FieldEdit {
    field: ProfileField,
    buffer: String,
}

/// Field selection plus an optional in-progress edit.
#[derive(Debug, Clone)]
pub struct ProfileForm {
    profile: Profile,
    selected: usize,
    editing: Option<FieldEdit>,
}

impl ProfileForm {
    pub fn new(profile: Profile) -> Self {
        Self {
            profile,
            selected: 0,
            editing: None,
        }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn selected_field(&self) -> ProfileField {
        ProfileField::ALL[self.selected.min(ProfileField::ALL.len() - 1)]
    }

    pub fn select_next(&mut self) {
        if self.editing.is_none() {
            self.selected = (self.selected + 1).min(ProfileField::ALL.len() - 1);
        }
    }

    pub fn select_prev(&mut self) {
        if self.editing.is_none() {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The edit buffer for `field`, when that field is being edited.
    pub fn edit_buffer(&self, field: ProfileField) -> Option<&str> {
        self.editing
            .as_ref()
            .filter(|e| e.field == field)
            .map(|e| e.buffer.as_str())
    }

    /// Start editing the selected field with its current value.
    pub fn begin_edit(&mut self) {
        let field = self.selected_field();
        self.editing = Some(FieldEdit {
            field,
            buffer: self.profile.value(field).to_string(),
        });
    }

    /// Append a character. Returns false at the field's length cap.
    pub fn push_char(&mut self, c: char) -> bool {
        let Some(edit) = self.editing.as_mut() else {
            return false;
        };
        if c.is_control() || edit.buffer.chars().count() >= edit.field.max_chars() {
            return false;
        }
        edit.buffer.push(c);
        true
    }

    pub fn pop_char(&mut self) {
        if let Some(edit) = self.editing.as_mut() {
            edit.buffer.pop();
        }
    }

    pub fn clear_buffer(&mut self) {
        if let Some(edit) = self.editing.as_mut() {
            edit.buffer.clear();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Validate and store the edit. On error the edit stays open.
    pub fn commit_edit(&mut self) -> Result<Option<ProfileField>, ProfileError> {
        let Some(edit) = self.editing.as_ref() else {
            return Ok(None);
        };
        let field = edit.field;
        self.profile.set(field, &edit.buffer)?;
        self.editing = None;
        Ok(Some(field))
    }

    /// Characters used by the bio, counting an open bio edit.
    pub fn bio_chars(&self) -> usize {
        self.edit_buffer(ProfileField::Bio)
            .unwrap_or(&self.profile.bio)
            .chars()
            .count()
    }
}
