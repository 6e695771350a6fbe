/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the API layer and the UI layer.

use serde::Deserialize;
use std::fmt;

/// Number of photos requested per page
pub const PAGE_SIZE: u32 = 20;

/// Label shown for a photo that has no alt description
const UNTITLED: &str = "Untitled photo";

/// Represents a single photo returned by the API
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Photo {
    /// Unsplash photo ID (e.g., "Dwu85P9SOIk")
    pub id: String,
    /// Accessible description; null for many photos
    #[serde(default)]
    pub alt_description: Option<String>,
    /// Rendition URLs
    pub urls: PhotoUrls,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhotoUrls {
    /// ~400px wide rendition used for the grid
    pub small: String,
}

impl Photo {
    pub fn display_url(&self) -> &str {
        &self.urls.small
    }

    pub fn description(&self) -> &str {
        match self.alt_description.as_deref() {
            Some(text) if !text.trim().is_empty() => text,
            _ => UNTITLED,
        }
    }
}

/// A topic record; only the title is used, as a category label
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Topic {
    pub title: String,
}

/// Ordering criterion for the photo list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    #[default]
    Latest,
    Popular,
}

impl SortMode {
    pub const ALL: [SortMode; 2] = [SortMode::Latest, SortMode::Popular];

    /// Value of the `order_by` query parameter
    pub fn as_query(&self) -> &'static str {
        match self {
            SortMode::Latest => "latest",
            SortMode::Popular => "popular",
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortMode::Latest => "Date Added",
            SortMode::Popular => "Popularity",
        })
    }
}

/// One page of results from the list endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoPage {
    pub photos: Vec<Photo>,
    /// Value of the X-Total-Pages header, if the server sent a usable one
    pub total_pages: Option<u32>,
}

/// Parameters of a single photo-list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoQuery {
    pub page: u32,
    pub category: Option<String>,
    pub sort: SortMode,
}

impl PhotoQuery {
    pub fn per_page(&self) -> u32 {
        PAGE_SIZE
    }
}
