use iced::widget::{column, container, image};
use iced::{Element, Length, Task, Theme};
use std::collections::HashMap;

mod api;
mod config;
mod error;
mod state;
mod ui;

use api::UnsplashClient;
use error::ApiError;
use state::data::{PhotoPage, SortMode, Topic};
use state::gallery::{Applied, Gallery, PhotoRequest, Ticket};
use ui::controls::{self, CategoryOption};
use ui::photo_list::{self, Hover};

/// Main application state
struct GalleryApp {
    /// Query, photos, categories and favorites
    gallery: Gallery,
    /// Shared HTTP client for all background fetches
    client: UnsplashClient,
    /// Pointer-over state of the favorite toggles (presentational only)
    hover: Hover,
    /// Downloaded thumbnails for the photos currently shown
    thumbnails: HashMap<String, image::Handle>,
    /// Ticket of the photo list currently shown
    shown: Ticket,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Category list arrived (or failed)
    TopicsLoaded(Result<Vec<Topic>, ApiError>),
    /// A photo-list request finished
    PhotosLoaded(Ticket, Result<PhotoPage, ApiError>),
    /// A thumbnail download for the given photo finished
    ThumbnailLoaded(Ticket, String, Result<Vec<u8>, ApiError>),
    CategorySelected(CategoryOption),
    SortSelected(SortMode),
    NextPage,
    PrevPage,
    ToggleFavorite(String),
    HoverEnter(String),
    HoverLeave(String),
    DismissError,
}

impl GalleryApp {
    /// Create a new instance of the application and start the initial load
    fn new() -> (Self, Task<Message>) {
        let config = config::load().unwrap_or_else(|err| {
            log::warn!("Using default settings: {}", err);
            config::Config::default()
                .resolve_access_key(std::env::var(config::ACCESS_KEY_ENV).ok())
        });

        // The app cannot do anything without an HTTP client
        let client = UnsplashClient::new(&config)
            .expect("Failed to initialize HTTP client");

        if !client.has_access_key() {
            log::warn!(
                "No access key configured; set {} or add access_key to settings.toml",
                config::ACCESS_KEY_ENV
            );
        }
        log::info!("Unsplash gallery using {}", config.api_url);

        let mut app = GalleryApp {
            gallery: Gallery::new(),
            client,
            hover: Hover::default(),
            thumbnails: HashMap::new(),
            shown: 0,
        };

        let (_topics, first_page) = app.gallery.mount();
        let task = Task::batch([app.fetch_topics(), app.fetch_photos(first_page)]);

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TopicsLoaded(result) => {
                self.gallery.apply_topics(result);
                Task::none()
            }
            Message::PhotosLoaded(ticket, result) => {
                match self.gallery.apply_photos(ticket, result) {
                    Applied::Replaced => {
                        // Every tile unmounts, so hover and thumbnails go with them
                        self.hover.reset();
                        self.thumbnails.clear();
                        self.shown = ticket;
                        self.load_thumbnails()
                    }
                    Applied::Failed | Applied::Stale => Task::none(),
                }
            }
            Message::ThumbnailLoaded(ticket, photo_id, result) => {
                if ticket != self.shown {
                    return Task::none();
                }
                match result {
                    Ok(bytes) => {
                        self.thumbnails
                            .insert(photo_id, image::Handle::from_bytes(bytes));
                    }
                    Err(err) => {
                        log::warn!("Thumbnail for {} failed: {}", photo_id, err);
                    }
                }
                Task::none()
            }
            Message::CategorySelected(option) => {
                let request = self.gallery.set_category(option.into_category());
                self.fetch_photos(request)
            }
            Message::SortSelected(sort) => {
                let request = self.gallery.set_sort_mode(sort);
                self.fetch_photos(request)
            }
            Message::NextPage => match self.gallery.next_page() {
                Some(request) => self.fetch_photos(request),
                None => Task::none(),
            },
            Message::PrevPage => match self.gallery.prev_page() {
                Some(request) => self.fetch_photos(request),
                None => Task::none(),
            },
            Message::ToggleFavorite(photo_id) => {
                let favorite = self.gallery.toggle_favorite(&photo_id);
                log::debug!("Photo {} favorite: {}", photo_id, favorite);
                Task::none()
            }
            Message::HoverEnter(photo_id) => {
                self.hover.enter(&photo_id);
                Task::none()
            }
            Message::HoverLeave(photo_id) => {
                self.hover.leave(&photo_id);
                Task::none()
            }
            Message::DismissError => {
                self.gallery.clear_error();
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let tiles = photo_list::tiles(
            self.gallery.photos(),
            |id| self.gallery.is_favorite(id),
            &self.hover,
        );

        let mut content = column![controls::header(&self.gallery)]
            .spacing(20)
            .padding(20);

        if let Some(status) = controls::status(&self.gallery) {
            content = content.push(status);
        }

        content = content
            .push(photo_list::view(tiles, &self.thumbnails))
            .push(controls::pagination(&self.gallery));

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn fetch_topics(&self) -> Task<Message> {
        let client = self.client.clone();
        Task::perform(
            async move { client.list_topics().await },
            Message::TopicsLoaded,
        )
    }

    fn fetch_photos(&self, request: PhotoRequest) -> Task<Message> {
        let client = self.client.clone();
        let PhotoRequest { ticket, query } = request;
        Task::perform(
            async move { client.list_photos(&query).await },
            move |result| Message::PhotosLoaded(ticket, result),
        )
    }

    /// One download per photo in the list currently shown
    fn load_thumbnails(&self) -> Task<Message> {
        let ticket = self.shown;
        Task::batch(self.gallery.photos().iter().map(|photo| {
            let client = self.client.clone();
            let photo_id = photo.id.clone();
            let url = photo.display_url().to_string();
            Task::perform(
                async move { client.fetch_image(&url).await },
                move |result| Message::ThumbnailLoaded(ticket, photo_id.clone(), result),
            )
        }))
    }
}

fn main() -> iced::Result {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("unsplash_gallery=info"),
    )
    .init();

    iced::application(
        "Unsplash Photo Gallery",
        GalleryApp::update,
        GalleryApp::view,
    )
    .theme(GalleryApp::theme)
    .centered()
    .run_with(GalleryApp::new)
}
