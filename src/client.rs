use anyhow::Context;
use bytes::Bytes;
use futures::stream::{self, StreamExt, TryStreamExt};
use log::debug;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_ENCODING, USER_AGENT},
    Client, Response, StatusCode, Url,
};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    error::{BlinkistError, Result},
    models::{Book, Chapter, ChapterStub, ChaptersResponse, FreeDaily},
    retry::{with_retry, RetryConfig},
};

const CONCURRENT_REQUESTS: usize = 10;

/// Thin wrapper around a single `reqwest::Client` shared by every call of a
/// run, so connections and cookies are reused.
pub struct BlinkistClient {
    client: Client,
    base_url: Url,
    retry: RetryConfig,
}

impl BlinkistClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json,text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,image/apng,*/*;q=0.8"));
        headers.insert(ACCEPT_ENCODING, HeaderValue::from_static("gzip, deflate"));
        headers.insert(USER_AGENT, HeaderValue::from_static("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/90.0.4430.212 Safari/537.36"));
        headers.insert(
            HeaderName::from_static("x-requested-with"),
            HeaderValue::from_static("XMLHttpRequest"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            retry: config.retry(),
        })
    }

    fn make_url(&self, endpoint: &str) -> Result<Url> {
        Ok(self
            .base_url
            .join("api/")
            .and_then(|api| api.join(endpoint))
            .with_context(|| format!("invalid endpoint: {}", endpoint))?)
    }

    /// GET with challenge retries. Any other non-success status fails
    /// immediately.
    async fn request(&self, url: &Url, query: &[(&str, &str)]) -> Result<Response> {
        let client = &self.client;
        with_retry(&self.retry, move || async move {
            debug!("GET {}", url);
            let response = client.get(url.clone()).query(query).send().await?;

            if is_challenge(&response) {
                return Err(BlinkistError::Challenge {
                    url: url.to_string(),
                });
            }

            Ok(response.error_for_status()?)
        })
        .await
    }

    async fn api_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = self.make_url(endpoint)?;
        let response = self.request(&url, query).await?;
        Ok(response.json::<T>().await?)
    }

    pub async fn fetch_free_daily(&self, locale: &str) -> Result<Book> {
        let daily: FreeDaily = self
            .api_request("free_daily", &[("locale", locale)])
            .await?;
        Ok(daily.book)
    }

    pub async fn fetch_chapter_list(&self, book_slug: &str) -> Result<Vec<ChapterStub>> {
        let response: ChaptersResponse = self
            .api_request(&format!("books/{}/chapters", book_slug), &[])
            .await?;
        Ok(response.chapters)
    }

    pub async fn fetch_chapter(&self, book_id: &str, chapter_id: &str) -> Result<Chapter> {
        self.api_request(&format!("books/{}/chapters/{}", book_id, chapter_id), &[])
            .await
    }

    /// Fetches the content of every chapter, one request per chapter. Results
    /// keep the order of `stubs`.
    pub async fn fetch_chapters(&self, book: &Book, stubs: &[ChapterStub]) -> Result<Vec<Chapter>> {
        stream::iter(stubs)
            .map(|stub| self.fetch_chapter(&book.id, &stub.id))
            .buffered(CONCURRENT_REQUESTS)
            .try_collect()
            .await
    }

    /// Downloads a binary asset, insisting on a plain `200 OK`.
    pub async fn download_bytes(&self, url: &str) -> Result<Bytes> {
        let url = Url::parse(url)?;
        let response = self.request(&url, &[]).await?;

        if response.status() != StatusCode::OK {
            return Err(BlinkistError::UnexpectedResponse(format!(
                "expected status 200 for {}, got {}",
                url,
                response.status()
            )));
        }

        Ok(response.bytes().await?)
    }
}

// TODO: recognise Cloudflare's 403 challenge page without buffering large
// binary bodies, and reset the cookie store before the next attempt.
fn is_challenge(_response: &Response) -> bool {
    false
}
