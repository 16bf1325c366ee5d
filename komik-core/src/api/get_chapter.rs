use async_trait::async_trait;

use crate::{ChapterContent, Client, Error, Request, Result};

/// Get the page images and neighbour links of one chapter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GetChapter {
    slug: String,
}

impl GetChapter {
    pub fn new(slug: impl Into<String>) -> Self {
        Self { slug: slug.into() }
    }
}

#[async_trait]
impl Request for GetChapter {
    type Response = ChapterContent;

    async fn request(self, client: &Client) -> Result<Self::Response> {
        let url = client.endpoint(["chapter", self.slug.as_str()])?;
        let mut chapter: ChapterContent = client.get_json(url, "get_chapter").await?;
        if chapter.images.is_empty() {
            return Err(Error::NotFound(format!("chapter {}", self.slug)));
        }
        chapter.slug = self.slug;
        Ok(chapter)
    }
}
