use async_trait::async_trait;
pub use get_chapter::GetChapter;
pub use get_detail::GetDetail;
pub use latest::Latest;
use reqwest::Url;
pub use search::Search;
use serde::{de::DeserializeOwned, Deserialize};
use tracing::{debug, error};

use crate::{ChapterContent, ComicDetail, ComicSummary, Error, Result};

pub mod get_chapter;
pub mod get_detail;
pub mod latest;
pub mod search;

pub static DEFAULT_BASE_URL: &str = "https://www.sankavollerei.com/comic/bacakomik/";

/// Http client bound to one api root.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
}

impl Client {
    /// # Errors
    ///
    /// Fails if `base_url` is not a valid absolute url that can carry path segments.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url: Url = base_url.parse()?;
        if base_url.cannot_be_a_base() {
            return Err(Error::BaseUrl(base_url.to_string()));
        }
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    #[must_use]
    pub fn set_http(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the api root, each one percent-encoded on its own.
    pub(crate) fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::BaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a get request to `url` and decode the enveloped json response as `T`
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        context: &'static str,
    ) -> Result<T> {
        debug!("GET {url}");
        let response = self.http.get(url).send().await.map_err(|err| {
            error!("{context} request failed: {err}");
            Error::from(err)
        })?;
        let status = response.status();
        if !status.is_success() {
            error!("{context} returned {status}");
            return Err(Error::Status { context, status });
        }
        let bytes = response.bytes().await?;
        decode_envelope(&bytes, context)
    }
}

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
}

/// Checks the `success` flag first, then decodes the endpoint payload from the same body.
pub(crate) fn decode_envelope<T: DeserializeOwned>(bytes: &[u8], context: &'static str) -> Result<T> {
    let envelope: Envelope = serde_json::from_slice(bytes).map_err(|source| {
        error!("error decoding {context} envelope: {source}");
        Error::Decode { context, source }
    })?;
    if !envelope.success {
        error!("{context}: api returned unsuccessful");
        return Err(Error::Unsuccessful(context));
    }
    serde_json::from_slice(bytes).map_err(|source| {
        error!("error decoding {context}: {source}");
        Error::Decode { context, source }
    })
}

#[async_trait]
pub trait Request {
    type Response;

    async fn request(self, client: &Client) -> Result<Self::Response>;
}

/// The four read-only endpoints, as consumed by the navigation core.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn latest(&self) -> Result<Vec<ComicSummary>>;

    async fn search(&self, query: &str) -> Result<Vec<ComicSummary>>;

    async fn detail(&self, slug: &str) -> Result<ComicDetail>;

    async fn chapter(&self, slug: &str) -> Result<ChapterContent>;
}

#[async_trait]
impl Catalog for Client {
    async fn latest(&self) -> Result<Vec<ComicSummary>> {
        Ok(Latest.request(self).await?.komik_list)
    }

    async fn search(&self, query: &str) -> Result<Vec<ComicSummary>> {
        Ok(Search::new(query).request(self).await?.komik_list)
    }

    async fn detail(&self, slug: &str) -> Result<ComicDetail> {
        GetDetail::new(slug).request(self).await
    }

    async fn chapter(&self, slug: &str) -> Result<ChapterContent> {
        GetChapter::new(slug).request(self).await
    }
}

#[cfg(test)]
mod tests {
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpListener,
    };

    use super::*;

    /// Serves exactly one canned http response on a random local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> Client {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await.unwrap();
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        Client::new(&format!("http://{addr}/api/")).unwrap()
    }

    #[test]
    fn envelope_without_success_is_unsuccessful() {
        let err = decode_envelope::<latest::Response>(br#"{"komikList":[]}"#, "latest").unwrap_err();
        assert!(matches!(err, Error::Unsuccessful("latest")));
        let err = decode_envelope::<latest::Response>(br#"{"success":false,"komikList":[]}"#, "latest")
            .unwrap_err();
        assert!(matches!(err, Error::Unsuccessful("latest")));
    }

    #[test]
    fn envelope_payload_is_validated_structurally() {
        let err = decode_envelope::<latest::Response>(br#"{"success":true,"detail":{}}"#, "latest")
            .unwrap_err();
        assert!(matches!(err, Error::Decode { context: "latest", .. }));
        let err = decode_envelope::<latest::Response>(b"<html>", "latest").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));
    }

    #[test]
    fn endpoint_escapes_each_segment() {
        let client = Client::new("https://example.org/comic/bacakomik/").unwrap();
        let url = client.endpoint(["search", "one piece/red"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/comic/bacakomik/search/one%20piece%2Fred"
        );
        let client = Client::new("https://example.org/comic/bacakomik").unwrap();
        let url = client.endpoint(["latest"]).unwrap();
        assert_eq!(url.as_str(), "https://example.org/comic/bacakomik/latest");
    }

    #[test]
    fn rejects_base_without_path() {
        assert!(matches!(Client::new("mailto:me@example.org"), Err(Error::BaseUrl(_))));
        assert!(matches!(Client::new("not a url"), Err(Error::UrlParse(_))));
    }

    #[tokio::test]
    async fn non_success_status_is_transport_error() {
        let client = serve_once("500 Internal Server Error", "").await;
        let err = client.latest().await.unwrap_err();
        assert!(err.is_transport());
        assert!(matches!(err, Error::Status { context: "latest", .. }));
    }

    #[tokio::test]
    async fn unsuccessful_body_is_reported() {
        let client = serve_once("200 OK", r#"{"success":false}"#).await;
        let err = client.detail("solo-leveling").await.unwrap_err();
        assert!(matches!(err, Error::Unsuccessful("get_detail")));
        assert!(!err.is_transport());
    }

    #[tokio::test]
    async fn latest_listing_is_decoded() {
        let client = serve_once(
            "200 OK",
            r#"{"success":true,"komikList":[{"slug":"a","title":"A","cover":"a.jpg","type":"Manga","rating":"9.1","chapter":"Chapter 10","date":"1 hari"}]}"#,
        )
        .await;
        let comics = client.latest().await.unwrap();
        assert_eq!(comics.len(), 1);
        assert_eq!(comics[0].slug, "a");
        assert_eq!(comics[0].chapter.as_deref(), Some("Chapter 10"));
    }

    #[tokio::test]
    async fn unreachable_host_is_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = Client::new(&format!("http://{addr}/")).unwrap();
        let err = client.chapter("ch-1").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }
}
