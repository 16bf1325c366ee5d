use async_trait::async_trait;
use serde::Deserialize;

use crate::{Client, ComicSummary, Request, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Response {
    #[serde(rename = "komikList")]
    pub komik_list: Vec<ComicSummary>,
}

/// Search for a comic by its title
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Search {
    query: String,
}

impl Search {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}

#[async_trait]
impl Request for Search {
    type Response = Response;

    async fn request(self, client: &Client) -> Result<Self::Response> {
        let url = client.endpoint(["search", self.query.as_str()])?;
        client.get_json(url, "search").await
    }
}
