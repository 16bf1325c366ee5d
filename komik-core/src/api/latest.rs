use async_trait::async_trait;
use serde::Deserialize;

use crate::{Client, ComicSummary, Request, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    #[serde(rename = "komikList")]
    pub komik_list: Vec<ComicSummary>,
}

/// Get the latest updated comics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Latest;

#[async_trait]
impl Request for Latest {
    type Response = Response;

    async fn request(self, client: &Client) -> Result<Self::Response> {
        let url = client.endpoint(["latest"])?;
        client.get_json(url, "latest").await
    }
}
