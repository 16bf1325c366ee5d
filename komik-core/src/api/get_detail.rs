use async_trait::async_trait;
use serde::Deserialize;

use crate::{Client, ComicDetail, Error, Request, Result};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct Response {
    detail: Option<ComicDetail>,
}

/// Get comic information and its chapter list for the given comic slug.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GetDetail {
    slug: String,
}

impl GetDetail {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

#[async_trait]
impl Request for GetDetail {
    type Response = ComicDetail;

    async fn request(self, client: &Client) -> Result<Self::Response> {
        let url = client.endpoint(["detail", self.slug.as_str()])?;
        let response: Response = client.get_json(url, "get_detail").await?;
        let mut detail = response
            .detail
            .ok_or_else(|| Error::NotFound(format!("comic {}", self.slug)))?;
        if detail.slug.is_empty() {
            detail.slug = self.slug;
        }
        Ok(detail)
    }
}
