/// Photo grid
///
/// Renders the current photo list as a wrapping grid. Each tile shows the
/// thumbnail and a favorite toggle; the only state kept here is which toggle
/// the pointer is over, and that never touches the favorites themselves.

use iced::widget::{button, column, container, image, mouse_area, scrollable, text};
use iced::{Alignment, ContentFit, Element, Length, Theme};
use iced_aw::Wrap;
use std::collections::HashMap;

use crate::state::data::Photo;
use crate::Message;

const THUMB_WIDTH: f32 = 240.0;
const THUMB_HEIGHT: f32 = 180.0;

pub const FAVORITE_GLYPH: &str = "❤";
pub const NOT_FAVORITE_GLYPH: &str = "♡";

/// Which favorite toggle the pointer is over, if any
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hover {
    current: Option<String>,
}

impl Hover {
    pub fn enter(&mut self, photo_id: &str) {
        self.current = Some(photo_id.to_string());
    }

    /// Leaving a tile only clears the hover if that tile was the hovered one
    pub fn leave(&mut self, photo_id: &str) {
        if self.is_hovered(photo_id) {
            self.current = None;
        }
    }

    /// Called when the photo list is replaced and every tile unmounts
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn is_hovered(&self, photo_id: &str) -> bool {
        self.current.as_deref() == Some(photo_id)
    }
}

/// Everything a single grid item needs to draw itself
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<'a> {
    pub id: &'a str,
    pub description: &'a str,
    pub favorite: bool,
    pub hovered: bool,
}

impl Tile<'_> {
    pub fn glyph(&self) -> &'static str {
        if self.favorite {
            FAVORITE_GLYPH
        } else {
            NOT_FAVORITE_GLYPH
        }
    }
}

/// One tile per photo, in list order
pub fn tiles<'a>(
    photos: &'a [Photo],
    is_favorite: impl Fn(&str) -> bool,
    hover: &Hover,
) -> Vec<Tile<'a>> {
    photos
        .iter()
        .map(|photo| Tile {
            id: &photo.id,
            description: photo.description(),
            favorite: is_favorite(&photo.id),
            hovered: hover.is_hovered(&photo.id),
        })
        .collect()
}

/// Build the grid. Tiles without a downloaded thumbnail show their
/// description as a placeholder.
pub fn view<'a>(
    tiles: Vec<Tile<'a>>,
    thumbnails: &'a HashMap<String, image::Handle>,
) -> Element<'a, Message> {
    if tiles.is_empty() {
        return container(text("No photos to show").size(18))
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into();
    }

    let items: Vec<Element<'a, Message>> = tiles
        .into_iter()
        .map(|tile| {
            let thumbnail = thumbnails.get(tile.id);
            tile_view(tile, thumbnail)
        })
        .collect();

    scrollable(
        Wrap::with_elements(items)
            .spacing(12.0)
            .line_spacing(12.0),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn tile_view<'a>(tile: Tile<'a>, thumbnail: Option<&image::Handle>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnail {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(THUMB_WIDTH))
            .height(Length::Fixed(THUMB_HEIGHT))
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text(tile.description).size(14))
            .width(Length::Fixed(THUMB_WIDTH))
            .height(Length::Fixed(THUMB_HEIGHT))
            .center_x(Length::Fixed(THUMB_WIDTH))
            .center_y(Length::Fixed(THUMB_HEIGHT))
            .into(),
    };

    let style: fn(&Theme, button::Status) -> button::Style = if tile.hovered {
        button::primary
    } else if tile.favorite {
        button::danger
    } else {
        button::secondary
    };

    let toggle = mouse_area(
        button(text(tile.glyph()).size(20))
            .on_press(Message::ToggleFavorite(tile.id.to_string()))
            .style(style)
            .padding([4, 12]),
    )
    .on_enter(Message::HoverEnter(tile.id.to_string()))
    .on_exit(Message::HoverLeave(tile.id.to_string()));

    container(
        column![picture, toggle]
            .spacing(6)
            .align_x(Alignment::Center),
    )
    .padding(8)
    .style(container::rounded_box)
    .into()
}
