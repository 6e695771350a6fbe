use super::data::{Photo, PhotoPage, PhotoQuery, SortMode, Topic};
use super::favorites::Favorites;
use crate::error::ApiError;

/// Sequence number of an issued photo-list request
pub type Ticket = u64;

/// A photo-list fetch the caller must now run.
/// The ticket must be handed back to [`Gallery::apply_photos`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRequest {
    pub ticket: Ticket,
    pub query: PhotoQuery,
}

/// The one-time category-list fetch issued on mount
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopicsRequest;

/// Outcome of handing a completed request back to the gallery
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// Photo list and page count replaced
    Replaced,
    /// Latest request failed, previous state kept
    Failed,
    /// A newer request was issued since, result discarded
    Stale,
}

/// The gallery state controller.
///
/// Owns the query (page, category, sort), the current photo list, the
/// category list and the favorites. Every operation that changes the query
/// returns the fetch that has to be issued for it; nothing is fetched
/// implicitly.
#[derive(Debug)]
pub struct Gallery {
    page: u32,
    category: Option<String>,
    sort: SortMode,
    total_pages: u32,
    photos: Vec<Photo>,
    categories: Vec<String>,
    favorites: Favorites,
    /// Query and page count of the list currently shown
    shown: (PhotoQuery, u32),
    /// Ticket of the most recently issued photo request (0 = none yet)
    latest: Ticket,
    fetching: bool,
    photo_error: Option<String>,
    topics_error: Option<String>,
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new()
    }
}

impl Gallery {
    pub fn new() -> Self {
        Self {
            page: 1,
            category: None,
            sort: SortMode::default(),
            total_pages: 1,
            photos: Vec::new(),
            categories: Vec::new(),
            favorites: Favorites::new(),
            shown: (
                PhotoQuery { page: 1, category: None, sort: SortMode::default() },
                1,
            ),
            latest: 0,
            fetching: false,
            photo_error: None,
            topics_error: None,
        }
    }

    /// Initial load: the category list plus the first page
    pub fn mount(&mut self) -> (TopicsRequest, PhotoRequest) {
        (TopicsRequest, self.issue())
    }

    pub fn set_category(&mut self, category: Option<String>) -> PhotoRequest {
        self.category = category.filter(|c| !c.is_empty());
        self.reset_paging();
        self.issue()
    }

    pub fn set_sort_mode(&mut self, sort: SortMode) -> PhotoRequest {
        self.sort = sort;
        self.reset_paging();
        self.issue()
    }

    /// A new query starts on page 1 and its page count is unknown until
    /// its first response lands.
    fn reset_paging(&mut self) {
        self.page = 1;
        self.total_pages = 1;
    }

    /// Advance one page. `None` when already on the last known page.
    pub fn next_page(&mut self) -> Option<PhotoRequest> {
        if !self.can_go_next() {
            return None;
        }
        self.page += 1;
        Some(self.issue())
    }

    /// Go back one page. `None` when already on page 1.
    pub fn prev_page(&mut self) -> Option<PhotoRequest> {
        if !self.can_go_prev() {
            return None;
        }
        self.page -= 1;
        Some(self.issue())
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn can_go_prev(&self) -> bool {
        self.page > 1
    }

    pub fn toggle_favorite(&mut self, photo_id: &str) -> bool {
        self.favorites.toggle(photo_id)
    }

    pub fn is_favorite(&self, photo_id: &str) -> bool {
        self.favorites.contains(photo_id)
    }

    /// Apply a completed photo-list request.
    ///
    /// Only the most recently issued request may change state; anything older
    /// is dropped so a slow response can't overwrite a newer one. A failure
    /// rolls the query back to the one whose photos are still shown.
    pub fn apply_photos(&mut self, ticket: Ticket, result: Result<PhotoPage, ApiError>) -> Applied {
        if !self.is_current(ticket) {
            log::debug!("Discarding stale photo response #{} (latest #{})", ticket, self.latest);
            return Applied::Stale;
        }
        self.fetching = false;

        match result {
            Ok(page) => {
                if let Some(total) = page.total_pages {
                    self.total_pages = total.max(1);
                } else {
                    log::warn!("Response #{} had no usable X-Total-Pages header", ticket);
                    self.total_pages = self.total_pages.max(self.page);
                }
                if self.page > self.total_pages {
                    log::warn!(
                        "Page {} is past the last page ({}), clamping",
                        self.page,
                        self.total_pages
                    );
                    self.page = self.total_pages;
                }
                log::info!(
                    "Loaded {} photos ({})",
                    page.photos.len(),
                    self.page_label()
                );
                self.photos = page.photos;
                self.shown = (self.query(), self.total_pages);
                self.photo_error = None;
                Applied::Replaced
            }
            Err(err) => {
                log::error!("Error fetching photos: {}", err);
                let (query, total_pages) = self.shown.clone();
                self.page = query.page;
                self.category = query.category;
                self.sort = query.sort;
                self.total_pages = total_pages;
                self.photo_error = Some(format!("Could not load photos: {}", err));
                Applied::Failed
            }
        }
    }

    /// Apply the category-list response. Duplicate titles are dropped.
    pub fn apply_topics(&mut self, result: Result<Vec<Topic>, ApiError>) {
        match result {
            Ok(topics) => {
                let mut categories: Vec<String> = Vec::with_capacity(topics.len());
                for topic in topics {
                    if !categories.contains(&topic.title) {
                        categories.push(topic.title);
                    }
                }
                log::info!("Loaded {} categories", categories.len());
                self.categories = categories;
            }
            Err(err) => {
                log::error!("Error fetching categories: {}", err);
                self.topics_error = Some(format!("Could not load categories: {}", err));
            }
        }
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        ticket == self.latest
    }

    pub fn clear_error(&mut self) {
        self.photo_error = None;
        self.topics_error = None;
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    pub fn photos(&self) -> &[Photo] {
        &self.photos
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    pub fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// The photo error if there is one, otherwise the category error.
    /// A successful photo load only clears the former.
    pub fn last_error(&self) -> Option<&str> {
        self.photo_error
            .as_deref()
            .or(self.topics_error.as_deref())
    }

    pub fn page_label(&self) -> String {
        format!("Page {} of {}", self.page(), self.total_pages())
    }

    fn query(&self) -> PhotoQuery {
        PhotoQuery {
            page: self.page,
            category: self.category.clone(),
            sort: self.sort,
        }
    }

    fn issue(&mut self) -> PhotoRequest {
        self.latest += 1;
        self.fetching = true;
        let request = PhotoRequest {
            ticket: self.latest,
            query: self.query(),
        };
        log::debug!("Issuing photo request #{}: {:?}", request.ticket, request.query);
        request
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::PhotoUrls;

    fn photo(id: &str) -> Photo {
        Photo {
            id: id.to_string(),
            alt_description: None,
            urls: PhotoUrls {
                small: format!("https://images.example/{}", id),
            },
        }
    }

    fn page_of(prefix: &str, count: usize, total: u32) -> PhotoPage {
        PhotoPage {
            photos: (0..count).map(|i| photo(&format!("{}{}", prefix, i))).collect(),
            total_pages: Some(total),
        }
    }

    /// Mounted gallery whose first page reported `total` pages
    fn loaded(total: u32) -> Gallery {
        let mut gallery = Gallery::new();
        let (_, first) = gallery.mount();
        gallery.apply_photos(first.ticket, Ok(page_of("p", 20, total)));
        gallery
    }

    #[test]
    fn test_initial_load() {
        let mut gallery = Gallery::new();
        let (topics, photos) = gallery.mount();

        assert_eq!(topics, TopicsRequest);
        assert_eq!(
            photos.query,
            PhotoQuery { page: 1, category: None, sort: SortMode::Latest }
        );
        assert!(gallery.is_fetching());

        let applied = gallery.apply_photos(photos.ticket, Ok(page_of("p", 20, 5)));

        assert_eq!(applied, Applied::Replaced);
        assert_eq!(gallery.photos().len(), 20);
        assert_eq!(gallery.page_label(), "Page 1 of 5");
        assert!(gallery.can_go_next());
        assert!(!gallery.can_go_prev());
        assert!(!gallery.is_fetching());
    }

    #[test]
    fn test_select_category_resets_page() {
        let mut gallery = loaded(5);
        gallery.next_page();
        gallery.next_page();
        assert_eq!(gallery.page(), 3);

        let request = gallery.set_category(Some("Nature".to_string()));

        assert_eq!(gallery.page(), 1);
        assert_eq!(request.query.page, 1);
        assert_eq!(request.query.category.as_deref(), Some("Nature"));
    }

    #[test]
    fn test_sort_change_resets_page() {
        let mut gallery = loaded(5);
        gallery.next_page();

        let request = gallery.set_sort_mode(SortMode::Popular);

        assert_eq!(request.query.page, 1);
        assert_eq!(request.query.sort, SortMode::Popular);
    }

    #[test]
    fn test_every_filter_change_issues_page_one() {
        let mut gallery = loaded(9);
        let changes: Vec<Box<dyn Fn(&mut Gallery) -> PhotoRequest>> = vec![
            Box::new(|g: &mut Gallery| g.set_category(Some("Travel".to_string()))),
            Box::new(|g: &mut Gallery| g.set_sort_mode(SortMode::Popular)),
            Box::new(|g: &mut Gallery| g.set_category(None)),
            Box::new(|g: &mut Gallery| g.set_sort_mode(SortMode::Latest)),
            Box::new(|g: &mut Gallery| g.set_category(Some("Travel".to_string()))),
        ];

        for change in changes {
            let next = gallery.next_page().unwrap();
            gallery.apply_photos(next.ticket, Ok(page_of("x", 20, 9)));
            assert!(gallery.page() > 1);

            let request = change(&mut gallery);
            assert_eq!(request.query.page, 1);
            gallery.apply_photos(request.ticket, Ok(page_of("y", 20, 9)));
        }
    }

    #[test]
    fn test_empty_category_means_all() {
        let mut gallery = loaded(5);
        let request = gallery.set_category(Some(String::new()));
        assert_eq!(request.query.category, None);
        assert_eq!(gallery.category(), None);
    }

    #[test]
    fn test_prev_page_stops_at_one() {
        let mut gallery = loaded(5);
        assert_eq!(gallery.prev_page(), None);
        assert_eq!(gallery.page(), 1);
    }

    #[test]
    fn test_next_page_stops_at_total() {
        let mut gallery = loaded(2);

        let request = gallery.next_page().unwrap();
        assert_eq!(request.query.page, 2);
        gallery.apply_photos(request.ticket, Ok(page_of("q", 20, 2)));

        assert!(!gallery.can_go_next());
        assert_eq!(gallery.next_page(), None);
        assert_eq!(gallery.page(), 2);
        assert_eq!(gallery.page_label(), "Page 2 of 2");
    }

    #[test]
    fn test_page_never_leaves_bounds() {
        let mut gallery = loaded(3);
        for step in 0..20 {
            let request = if step % 3 == 0 {
                gallery.prev_page()
            } else {
                gallery.next_page()
            };
            if let Some(request) = request {
                gallery.apply_photos(request.ticket, Ok(page_of("s", 20, 3)));
            }
            assert!(gallery.page() >= 1);
            assert!(gallery.page() <= gallery.total_pages());
        }
    }

    #[test]
    fn test_last_issued_request_wins() {
        let mut gallery = loaded(5);
        let a = gallery.next_page().unwrap();
        let b = gallery.set_category(Some("Nature".to_string()));

        // B resolves first, then A
        let b_result = page_of("b", 20, 3);
        assert_eq!(gallery.apply_photos(b.ticket, Ok(b_result.clone())), Applied::Replaced);
        assert_eq!(gallery.apply_photos(a.ticket, Ok(page_of("a", 20, 8))), Applied::Stale);

        assert_eq!(gallery.photos(), b_result.photos.as_slice());
        assert_eq!(gallery.total_pages(), 3);
        assert!(!gallery.is_fetching());
    }

    #[test]
    fn test_stale_response_does_not_end_fetching() {
        let mut gallery = loaded(5);
        let a = gallery.next_page().unwrap();
        let _b = gallery.next_page().unwrap();

        assert_eq!(gallery.apply_photos(a.ticket, Ok(page_of("a", 20, 5))), Applied::Stale);
        assert!(gallery.is_fetching());
        assert!(!gallery.is_current(a.ticket));
    }

    #[test]
    fn test_stale_failure_is_ignored() {
        let mut gallery = loaded(5);
        let a = gallery.next_page().unwrap();
        let b = gallery.next_page().unwrap();
        gallery.apply_photos(b.ticket, Ok(page_of("b", 20, 5)));

        let applied = gallery.apply_photos(a.ticket, Err(ApiError::Transport("reset".to_string())));

        assert_eq!(applied, Applied::Stale);
        assert_eq!(gallery.last_error(), None);
    }

    #[test]
    fn test_failure_keeps_previous_state() {
        let mut gallery = loaded(5);
        let before = gallery.photos().to_vec();

        let request = gallery.set_sort_mode(SortMode::Popular);
        let applied = gallery.apply_photos(
            request.ticket,
            Err(ApiError::Status { status: 500, body: String::new() }),
        );

        assert_eq!(applied, Applied::Failed);
        assert_eq!(gallery.photos(), before.as_slice());
        assert_eq!(gallery.total_pages(), 5);
        assert_eq!(gallery.sort_mode(), SortMode::Latest);
        assert!(gallery.last_error().unwrap().contains("500"));
        assert!(!gallery.is_fetching());

        // A later success clears the error
        let retry = gallery.next_page().unwrap();
        gallery.apply_photos(retry.ticket, Ok(page_of("r", 20, 5)));
        assert_eq!(gallery.last_error(), None);
    }

    #[test]
    fn test_failed_page_change_rolls_back() {
        let mut gallery = loaded(5);
        let request = gallery.next_page().unwrap();
        assert_eq!(gallery.page(), 2);

        gallery.apply_photos(request.ticket, Err(ApiError::Transport("timeout".to_string())));

        assert_eq!(gallery.page_label(), "Page 1 of 5");
        assert!(!gallery.can_go_prev());

        // Rolled back query is what the next request builds on
        let again = gallery.next_page().unwrap();
        assert_eq!(again.query.page, 2);
    }

    #[test]
    fn test_failed_category_change_rolls_back() {
        let mut gallery = loaded(5);
        let request = gallery.set_category(Some("Nature".to_string()));
        gallery.apply_photos(request.ticket, Err(ApiError::Transport("reset".to_string())));

        assert_eq!(gallery.category(), None);
        assert_eq!(gallery.total_pages(), 5);
    }

    #[test]
    fn test_failed_first_load_leaves_empty_list() {
        let mut gallery = Gallery::new();
        let (_, request) = gallery.mount();
        gallery.apply_photos(request.ticket, Err(ApiError::MissingAccessKey));

        assert!(gallery.photos().is_empty());
        assert_eq!(gallery.page_label(), "Page 1 of 1");
        assert!(!gallery.can_go_next());
    }

    #[test]
    fn test_missing_total_keeps_previous() {
        let mut gallery = loaded(4);
        let request = gallery.next_page().unwrap();
        gallery.apply_photos(
            request.ticket,
            Ok(PhotoPage { photos: vec![photo("z")], total_pages: None }),
        );
        assert_eq!(gallery.total_pages(), 4);
    }

    #[test]
    fn test_filter_change_forgets_old_total() {
        let mut gallery = loaded(5);
        let request = gallery.set_category(Some("Nature".to_string()));

        // Old query had 5 pages; the new one's count is not known yet
        assert!(!gallery.can_go_next());
        assert_eq!(gallery.next_page(), None);

        gallery.apply_photos(request.ticket, Ok(page_of("n", 20, 1)));
        assert_eq!(gallery.page_label(), "Page 1 of 1");
        assert!(!gallery.can_go_prev());
    }

    #[test]
    fn test_page_past_new_total_is_clamped() {
        let mut gallery = loaded(5);
        let a = gallery.set_category(Some("Nature".to_string()));
        gallery.apply_photos(a.ticket, Ok(page_of("n", 20, 3)));
        let b = gallery.next_page().unwrap();
        let c = gallery.next_page().unwrap();
        assert_eq!(c.query.page, 3);
        assert_eq!(gallery.apply_photos(b.ticket, Ok(page_of("b", 20, 3))), Applied::Stale);

        // The result set shrank between requests
        gallery.apply_photos(c.ticket, Ok(page_of("c", 0, 1)));

        assert_eq!(gallery.page(), 1);
        assert_eq!(gallery.total_pages(), 1);
        assert!(!gallery.can_go_prev());
        assert!(!gallery.can_go_next());
    }

    #[test]
    fn test_zero_total_is_clamped() {
        let gallery = loaded(0);
        assert_eq!(gallery.total_pages(), 1);
        assert_eq!(gallery.page_label(), "Page 1 of 1");
    }

    #[test]
    fn test_toggle_favorite_twice() {
        let mut gallery = loaded(5);
        let before = gallery.favorites().clone();

        assert!(gallery.toggle_favorite("p1"));
        assert!(gallery.is_favorite("p1"));
        assert!(!gallery.toggle_favorite("p1"));
        assert!(!gallery.is_favorite("p1"));

        assert_eq!(gallery.favorites(), &before);
    }

    #[test]
    fn test_favorites_survive_refetch() {
        let mut gallery = loaded(5);
        gallery.toggle_favorite("p3");

        let request = gallery.set_category(Some("Nature".to_string()));
        gallery.apply_photos(request.ticket, Ok(page_of("n", 20, 2)));

        assert!(gallery.is_favorite("p3"));
    }

    #[test]
    fn test_topics() {
        let mut gallery = Gallery::new();
        gallery.apply_topics(Ok(vec![
            Topic { title: "Nature".to_string() },
            Topic { title: "Travel".to_string() },
            Topic { title: "Nature".to_string() },
        ]));
        assert_eq!(gallery.categories(), ["Nature", "Travel"]);

        gallery.apply_topics(Err(ApiError::Decode("eof".to_string())));
        assert_eq!(gallery.categories().len(), 2);
        assert!(gallery.last_error().is_some());

        gallery.clear_error();
        assert_eq!(gallery.last_error(), None);
    }

    #[test]
    fn test_category_error_survives_photo_load() {
        let mut gallery = Gallery::new();
        let (_, first) = gallery.mount();

        gallery.apply_topics(Err(ApiError::Transport("refused".to_string())));
        gallery.apply_photos(first.ticket, Ok(page_of("p", 20, 5)));

        assert!(gallery.categories().is_empty());
        assert!(gallery
            .last_error()
            .unwrap()
            .starts_with("Could not load categories"));
    }

    #[test]
    fn test_photo_error_shown_before_category_error() {
        let mut gallery = Gallery::new();
        let (_, first) = gallery.mount();
        gallery.apply_topics(Err(ApiError::Transport("refused".to_string())));
        gallery.apply_photos(first.ticket, Err(ApiError::MissingAccessKey));

        assert!(gallery.last_error().unwrap().starts_with("Could not load photos"));

        let retry = gallery.set_sort_mode(SortMode::Popular);
        gallery.apply_photos(retry.ticket, Ok(page_of("p", 20, 2)));
        assert!(gallery.last_error().unwrap().starts_with("Could not load categories"));
    }
}
