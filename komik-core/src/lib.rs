pub use api::{Catalog, Client, GetChapter, GetDetail, Latest, Request, Search, DEFAULT_BASE_URL};
pub use errors::{Error, Result};
pub use model::{
    ChapterContent, ChapterNavigation, ChapterRef, ComicDetail, ComicSummary, ComicType, GenreRef,
};

pub mod api;
mod errors;
pub mod model;
