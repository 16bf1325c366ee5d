//! Navigation locations and their persisted `page[/slug]` encoding.

use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::warn;

/// Characters escaped in the slug part so that it never contains a separator.
const SLUG: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`');

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PageKind {
    Home,
    Latest,
    Popular,
    Search,
    Detail,
    Reader,
}

impl PageKind {
    pub const ALL: [PageKind; 6] = [
        Self::Home,
        Self::Latest,
        Self::Popular,
        Self::Search,
        Self::Detail,
        Self::Reader,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Latest => "latest",
            Self::Popular => "popular",
            Self::Search => "search",
            Self::Detail => "detail",
            Self::Reader => "reader",
        }
    }

    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
    }

    /// Whether the page is a comic listing.
    #[must_use]
    pub fn is_catalog(self) -> bool {
        matches!(
            self,
            Self::Home | Self::Latest | Self::Popular | Self::Search
        )
    }
}

impl fmt::Display for PageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the user is. `Search` is the filtered catalog and carries its query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Location {
    #[default]
    Home,
    Latest,
    Popular,
    Search(String),
    Detail(String),
    Reader(String),
}

impl Location {
    /// Builds a location from its `{ page, slug }` parts.
    ///
    /// Kinds that need a slug fall back to `Home` when it is missing or empty,
    /// catalog kinds ignore it.
    #[must_use]
    pub fn new(kind: PageKind, slug: Option<String>) -> Self {
        let slug = slug.filter(|slug| !slug.is_empty());
        match (kind, slug) {
            (PageKind::Home, _) => Self::Home,
            (PageKind::Latest, _) => Self::Latest,
            (PageKind::Popular, _) => Self::Popular,
            (PageKind::Search, Some(query)) => Self::Search(query),
            (PageKind::Detail, Some(slug)) => Self::Detail(slug),
            (PageKind::Reader, Some(slug)) => Self::Reader(slug),
            (kind, None) => {
                warn!("{kind} page without slug, falling back to home");
                Self::Home
            }
        }
    }

    #[must_use]
    pub fn kind(&self) -> PageKind {
        match self {
            Self::Home => PageKind::Home,
            Self::Latest => PageKind::Latest,
            Self::Popular => PageKind::Popular,
            Self::Search(_) => PageKind::Search,
            Self::Detail(_) => PageKind::Detail,
            Self::Reader(_) => PageKind::Reader,
        }
    }

    /// The header link this location belongs to, if any.
    #[must_use]
    pub fn section(&self) -> Option<PageKind> {
        match self {
            Self::Home | Self::Latest | Self::Popular => Some(self.kind()),
            Self::Search(_) | Self::Detail(_) | Self::Reader(_) => None,
        }
    }

    #[must_use]
    pub fn slug(&self) -> Option<&str> {
        match self {
            Self::Home | Self::Latest | Self::Popular => None,
            Self::Search(slug) | Self::Detail(slug) | Self::Reader(slug) => Some(slug),
        }
    }

    /// `page` or `page/slug`, the slug percent-encoded.
    #[must_use]
    pub fn encode(&self) -> String {
        match self.slug() {
            Some(slug) => format!("{}/{}", self.kind(), utf8_percent_encode(slug, SLUG)),
            None => self.kind().to_string(),
        }
    }

    /// Inverse of [`Location::encode`]. Accepts a leading `#`, unknown pages decode to `Home`.
    #[must_use]
    pub fn decode(encoded: &str) -> Self {
        let encoded = encoded.trim_start_matches('#');
        let (page, slug) = match encoded.split_once('/') {
            Some((page, slug)) => (page, Some(slug)),
            None => (encoded, None),
        };
        let Some(kind) = PageKind::parse(page) else {
            if !page.is_empty() {
                warn!("unknown page {page:?}, falling back to home");
            }
            return Self::Home;
        };
        let slug = slug.map(|slug| percent_decode_str(slug).decode_utf8_lossy().into_owned());
        Self::new(kind, slug)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn encodes_page_and_slug() {
        assert_eq!(Location::Home.encode(), "home");
        assert_eq!(Location::Popular.encode(), "popular");
        assert_eq!(
            Location::Reader("solo-leveling-chapter-1".to_string()).encode(),
            "reader/solo-leveling-chapter-1"
        );
        assert_eq!(
            Location::Search("one piece/red".to_string()).encode(),
            "search/one%20piece%2Fred"
        );
    }

    #[test]
    fn decode_is_lenient() {
        assert_eq!(Location::decode(""), Location::Home);
        assert_eq!(Location::decode("#latest"), Location::Latest);
        assert_eq!(Location::decode("nowhere/x"), Location::Home);
        assert_eq!(Location::decode("detail"), Location::Home);
        assert_eq!(Location::decode("detail/"), Location::Home);
        assert_eq!(Location::decode("popular/ignored"), Location::Popular);
        assert_eq!(
            Location::decode("#DETAIL/one-piece"),
            Location::Detail("one-piece".to_string())
        );
    }

    #[test]
    fn slug_view_matches_kind() {
        assert_eq!(Location::Latest.slug(), None);
        assert_eq!(Location::Detail("x".to_string()).slug(), Some("x"));
        assert!(Location::Search("x".to_string()).kind().is_catalog());
        assert!(!PageKind::Reader.is_catalog());
    }

    #[test]
    fn only_header_pages_have_a_section() {
        assert_eq!(Location::Home.section(), Some(PageKind::Home));
        assert_eq!(Location::Popular.section(), Some(PageKind::Popular));
        assert_eq!(Location::Search("x".to_string()).section(), None);
        assert_eq!(Location::Reader("x".to_string()).section(), None);
    }

    fn reachable() -> impl Strategy<Value = Location> {
        let kind = prop::sample::select(PageKind::ALL.to_vec());
        (kind, prop::option::of(".{1,40}"))
            .prop_map(|(kind, slug)| Location::new(kind, slug))
    }

    proptest! {
        #[test]
        fn persisted_location_round_trips(location in reachable()) {
            prop_assert_eq!(Location::decode(&location.encode()), location.clone());
            prop_assert_eq!(
                Location::new(location.kind(), location.slug().map(ToString::to_string)),
                location
            );
        }
    }
}
