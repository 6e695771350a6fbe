/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The favorites set (favorites.rs)
/// - The gallery controller: query, paging and request sequencing (gallery.rs)

pub mod data;
pub mod favorites;
pub mod gallery;
