//! Remote book-metadata lookup against a Google Books style volumes search.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::error::LookupError;

/// Metadata attached to the first matching volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub image_links: Option<ImageLinks>,
    pub published_date: Option<String>,
}

impl VolumeInfo {
    pub fn thumbnail(&self) -> Option<&str> {
        self.image_links
            .as_ref()
            .and_then(|links| links.thumbnail.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct VolumesResponse {
    items: Option<Vec<Volume>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Volume {
    #[serde(default)]
    volume_info: VolumeInfo,
}

/// Parse a volumes search body and keep only the first result.
pub fn first_volume(body: &str) -> serde_json::Result<Option<VolumeInfo>> {
    let response: VolumesResponse = serde_json::from_str(body)?;
    Ok(first_of(response))
}

fn first_of(response: VolumesResponse) -> Option<VolumeInfo> {
    response
        .items
        .and_then(|items| items.into_iter().next())
        .map(|volume| volume.volume_info)
}

/// Request/response capability used by the enrichment coordinator.
/// `Ok(None)` means the service answered but found nothing.
#[async_trait]
pub trait MetadataLookup: Send + Sync {
    async fn lookup(&self, title: &str, author: &str) -> Result<Option<VolumeInfo>, LookupError>;
}

/// HTTP implementation backed by a shared `reqwest` client. No timeout is set:
/// lookups finish whenever the service answers.
pub struct GoogleBooksLookup {
    client: reqwest::Client,
    endpoint: Url,
}

impl GoogleBooksLookup {
    pub fn new(endpoint: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint).map_err(|err| LookupError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        })?;
        let client = reqwest::Client::builder()
            .user_agent(concat!("bookshelf/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to create HTTP client")?;
        Ok(Self { client, endpoint })
    }

    /// Search URL for one title/author pair; both end up percent-encoded in the
    /// `q` parameter.
    pub fn search_url(&self, title: &str, author: &str) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &format!("intitle:{title} inauthor:{author}"));
        url
    }
}

#[async_trait]
impl MetadataLookup for GoogleBooksLookup {
    async fn lookup(&self, title: &str, author: &str) -> Result<Option<VolumeInfo>, LookupError> {
        let url = self.search_url(title, author);
        debug!(%url, "looking up book metadata");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status));
        }

        let body: VolumesResponse = response.json().await?;
        Ok(first_of(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn search_url_encodes_title_and_author() {
        let lookup = GoogleBooksLookup::new("https://www.googleapis.com/books/v1/volumes").unwrap();
        let url = lookup.search_url("JavaScript: The Good Parts", "Douglas Crockford");
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/books/v1/volumes?q=intitle%3AJavaScript%3A+The+Good+Parts+inauthor%3ADouglas+Crockford"
        );

        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "q");
        assert_eq!(value, "intitle:JavaScript: The Good Parts inauthor:Douglas Crockford");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        assert!(GoogleBooksLookup::new("not a url").is_err());
    }

    #[test]
    fn first_volume_reads_thumbnail_and_date() {
        let body = r#"{
            "kind": "books#volumes",
            "items": [
                {"volumeInfo": {"title": "Clean Code",
                                "publishedDate": "2008-08-01",
                                "imageLinks": {"thumbnail": "http://covers/1.jpg"}}},
                {"volumeInfo": {"publishedDate": "1999"}}
            ]
        }"#;
        let info = first_volume(body).unwrap().unwrap();
        assert_eq!(info.thumbnail(), Some("http://covers/1.jpg"));
        assert_eq!(info.published_date.as_deref(), Some("2008-08-01"));
    }

    #[test]
    fn missing_optional_fields_are_tolerated() {
        let info = first_volume(r#"{"items": [{"volumeInfo": {}}]}"#)
            .unwrap()
            .unwrap();
        assert_eq!(info, VolumeInfo::default());

        let info = first_volume(r#"{"items": [{}]}"#).unwrap().unwrap();
        assert_eq!(info.thumbnail(), None);
    }

    #[test]
    fn no_items_means_no_match() {
        assert_eq!(first_volume(r#"{"totalItems": 0}"#).unwrap(), None);
        assert_eq!(first_volume(r#"{"items": []}"#).unwrap(), None);
        assert!(first_volume("<html>").is_err());
    }
}
