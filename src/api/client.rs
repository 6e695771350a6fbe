use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION};
use reqwest::{RequestBuilder, Response, Url};
use std::time::Duration;

use crate::config::Config;
use crate::error::ApiError;
use crate::state::data::{Photo, PhotoPage, PhotoQuery, Topic};

/// Response header carrying the number of result pages
const TOTAL_PAGES_HEADER: &str = "x-total-pages";

/// Longest slice of an error body kept in the error message
const MAX_ERROR_BODY: usize = 200;

/// Client for the Unsplash JSON API.
///
/// Cheap to clone; every background task gets its own copy.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    http: reqwest::Client,
    base_url: String,
    access_key: Option<String>,
}

impl UnsplashClient {
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs.max(1)))
            .user_agent(concat!("unsplash-gallery/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            access_key: config.access_key.clone(),
        })
    }

    pub fn has_access_key(&self) -> bool {
        self.access_key.is_some()
    }

    /// `GET /photos?per_page=..&page=..&order_by=..[&category=..]`
    pub fn photos_url(&self, query: &PhotoQuery) -> Result<Url, ApiError> {
        let mut params = vec![
            ("per_page", query.per_page().to_string()),
            ("page", query.page.to_string()),
            ("order_by", query.sort.as_query().to_string()),
        ];
        if let Some(category) = &query.category {
            params.push(("category", category.clone()));
        }

        Url::parse_with_params(&format!("{}/photos", self.base_url), &params)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    pub fn topics_url(&self) -> Result<Url, ApiError> {
        Url::parse(&format!("{}/topics", self.base_url))
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))
    }

    /// Fetch one page of photos along with the total page count
    pub async fn list_photos(&self, query: &PhotoQuery) -> Result<PhotoPage, ApiError> {
        let url = self.photos_url(query)?;
        let response = check_status(self.authorized(url)?.send().await?).await?;

        let total_pages = parse_total_pages(response.headers());
        let photos: Vec<Photo> = response.json().await?;

        Ok(PhotoPage { photos, total_pages })
    }

    /// Fetch the topic list used to populate the category picker
    pub async fn list_topics(&self) -> Result<Vec<Topic>, ApiError> {
        let url = self.topics_url()?;
        let response = check_status(self.authorized(url)?.send().await?).await?;
        Ok(response.json().await?)
    }

    /// Download the bytes of a photo rendition.
    /// Image CDN URLs are public, so no credential is attached.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let url = Url::parse(url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        let response = check_status(self.http.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    fn authorized(&self, url: Url) -> Result<RequestBuilder, ApiError> {
        let key = self.access_key.as_deref().ok_or(ApiError::MissingAccessKey)?;
        Ok(self
            .http
            .get(url)
            .header(AUTHORIZATION, format!("Client-ID {}", key))
            .header(ACCEPT, "application/json")
            .header("Accept-Version", "v1"))
    }
}

/// Turn a non-success response into [`ApiError::Status`]
async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(ApiError::Status {
        status: status.as_u16(),
        body: body.trim().chars().take(MAX_ERROR_BODY).collect(),
    })
}

/// Read the total page count from the response headers.
/// Missing or non-numeric values yield `None`.
pub fn parse_total_pages(headers: &HeaderMap) -> Option<u32> {
    headers
        .get(TOTAL_PAGES_HEADER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}
