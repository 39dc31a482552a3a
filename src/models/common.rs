//! Common types shared across all models.

use serde::{Deserialize, Serialize};

/// Image with URL and optional dimensions.
///
/// Spotify reports `null` dimensions for user-uploaded playlist covers.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Image {
    /// URL to the image.
    pub url: String,

    /// Height in pixels, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Width in pixels, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
}

impl Image {
    /// Create a new image.
    pub fn new<S: Into<String>>(url: S, height: Option<u32>, width: Option<u32>) -> Self {
        Self {
            url: url.into(),
            height,
            width,
        }
    }
}

/// Playlist owner.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Owner {
    /// Spotify user id.
    pub id: String,

    /// Display name of the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
}

impl Owner {
    /// Whether this account is operated by the platform itself.
    pub fn is_platform(&self) -> bool {
        self.id.contains("spotify")
    }
}

/// One page of a paginated API listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,

    /// Total number of items across all pages.
    pub total: u32,

    /// Page size requested.
    pub limit: u32,

    /// Offset of the first item on this page.
    pub offset: u32,

    /// URL of the next page, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            limit: 0,
            offset: 0,
            next: None,
        }
    }
}

impl<T> Page<T> {
    /// A page shorter than the requested limit is the last one.
    pub fn is_last(&self, requested_limit: u32) -> bool {
        (self.items.len() as u32) < requested_limit
    }
}
