/// Photo API module
///
/// This module handles:
/// - Building list and topic requests for the Unsplash API
/// - Decoding responses and the total page count header
/// - Downloading thumbnail bytes for the grid

pub mod client;

pub use client::UnsplashClient;
