pub use catalog_page::CatalogPage;
pub use detail_page::DetailPage;
pub use error_page::ErrorPage;
pub use loader::Loader;
pub use reader_page::ReaderPage;
pub use search_bar::SearchBar;

pub mod catalog_page;
pub mod detail_page;
pub mod error_page;
pub mod loader;
pub mod reader_page;
pub mod search_bar;
