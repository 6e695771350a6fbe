/// Header pickers, pagination bar and status line
use iced::widget::{button, pick_list, row, text};
use iced::{Alignment, Element, Length};
use std::fmt;

use crate::state::data::SortMode;
use crate::state::favorites::Favorites;
use crate::state::gallery::Gallery;
use crate::Message;

/// An entry in the category picker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryOption {
    All,
    Named(String),
}

impl CategoryOption {
    pub fn into_category(self) -> Option<String> {
        match self {
            CategoryOption::All => None,
            CategoryOption::Named(name) => Some(name),
        }
    }
}

impl fmt::Display for CategoryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryOption::All => f.write_str("All Categories"),
            CategoryOption::Named(name) => f.write_str(name),
        }
    }
}

/// "All Categories" followed by every known category
pub fn category_options(categories: &[String]) -> Vec<CategoryOption> {
    std::iter::once(CategoryOption::All)
        .chain(categories.iter().cloned().map(CategoryOption::Named))
        .collect()
}

pub fn selected_category(gallery: &Gallery) -> CategoryOption {
    match gallery.category() {
        Some(name) => CategoryOption::Named(name.to_string()),
        None => CategoryOption::All,
    }
}

pub fn header(gallery: &Gallery) -> Element<'_, Message> {
    row![
        text("Unsplash Photo Gallery").size(32).width(Length::Fill),
        text(favorites_label(gallery.favorites())),
        text("Select Category:"),
        pick_list(
            category_options(gallery.categories()),
            Some(selected_category(gallery)),
            Message::CategorySelected,
        ),
        text("Sort By:"),
        pick_list(
            SortMode::ALL,
            Some(gallery.sort_mode()),
            Message::SortSelected,
        ),
    ]
    .spacing(12)
    .align_y(Alignment::Center)
    .into()
}

pub fn pagination(gallery: &Gallery) -> Element<'_, Message> {
    row![
        button("Previous Page")
            .on_press_maybe(gallery.can_go_prev().then_some(Message::PrevPage))
            .padding(10),
        text(gallery.page_label()),
        button("Next Page")
            .on_press_maybe(gallery.can_go_next().then_some(Message::NextPage))
            .padding(10),
    ]
    .spacing(16)
    .align_y(Alignment::Center)
    .into()
}

pub fn favorites_label(favorites: &Favorites) -> String {
    if favorites.is_empty() {
        return "No favorites yet".to_string();
    }
    match favorites.len() {
        1 => "1 favorite".to_string(),
        n => format!("{} favorites", n),
    }
}

/// Loading indicator or the last error, if there is anything to say
pub fn status(gallery: &Gallery) -> Option<Element<'_, Message>> {
    if let Some(error) = gallery.last_error() {
        return Some(
            row![
                text(error).style(text::danger).width(Length::Fill),
                button("Dismiss").on_press(Message::DismissError),
            ]
            .spacing(12)
            .align_y(Alignment::Center)
            .into(),
        );
    }

    gallery
        .is_fetching()
        .then(|| text("Loading…").size(14).into())
}
