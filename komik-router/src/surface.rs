//! The presentation surface the navigation core renders into, and the view
//! blocks it hands over.

use komik_core::{ComicDetail, ComicSummary, ComicType, GenreRef};
use tracing::trace;

use crate::{Location, ScopeId};

/// Pages rendered eagerly at the top of a chapter, the rest wait for the viewport.
pub static EAGER_IMAGES: usize = 5;
/// Approach margin of the viewport observer for deferred images.
pub static LAZY_ROOT_MARGIN_PX: u32 = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ComicType),
}

impl TypeFilter {
    pub const CHOICES: [TypeFilter; 4] = [
        Self::All,
        Self::Only(ComicType::Manga),
        Self::Only(ComicType::Manhwa),
        Self::Only(ComicType::Manhua),
    ];

    #[must_use]
    pub fn matches(self, comic_type: ComicType) -> bool {
        match self {
            Self::All => true,
            Self::Only(only) => only == comic_type,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Only(ComicType::Manga) => "Manga",
            Self::Only(ComicType::Manhwa) => "Manhwa",
            Self::Only(ComicType::Manhua) => "Manhua",
            Self::Only(ComicType::Unknown) => "Other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageLoading {
    Eager,
    /// Loaded once the image nears the viewport.
    Lazy,
}

impl ImageLoading {
    #[must_use]
    pub fn for_page(index: usize) -> Self {
        if index < EAGER_IMAGES {
            Self::Eager
        } else {
            Self::Lazy
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogView {
    pub title: String,
    pub comics: Vec<ComicSummary>,
    pub filter: TypeFilter,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChapterRow {
    pub number: usize,
    pub slug: String,
    pub title: String,
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub detail: ComicDetail,
    pub chapters: Vec<ChapterRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageImage {
    pub index: usize,
    pub url: String,
    pub loading: ImageLoading,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReaderView {
    pub title: String,
    pub images: Vec<PageImage>,
    pub has_prev: bool,
    pub has_next: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ErrorView {
    pub title: String,
    pub message: String,
    pub actions: Vec<Control>,
}

/// One content block, mounted as a whole into the surface's root container.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Catalog(CatalogView),
    Detail(DetailView),
    Reader(ReaderView),
    Error(ErrorView),
}

/// Activatable elements inside a mounted block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Control {
    ComicCard(String),
    TypeFilter(TypeFilter),
    GenreTag(GenreRef),
    ChapterRow(String),
    BackToCatalog,
    Back,
    PrevChapter,
    NextChapter,
    ToggleFullscreen,
    ToggleReadingMode,
    ScrollTop,
    ScrollBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    PageUp,
    PageDown,
    Escape,
    Home,
    End,
    Other,
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            " " | "Spacebar" => Self::Space,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            "Escape" => Self::Escape,
            "Home" => Self::Home,
            "End" => Self::End,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Activate(Control),
    Key(Key),
    /// Pointer tap on a chapter image, `x` measured from the image's left edge.
    Tap { x: f64, width: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    Top,
    Bottom,
}

/// Visual state changes scoped to the mounted block.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Patch {
    CardVisible { slug: String, visible: bool },
    ActiveFilter(TypeFilter),
    ReadingMode(bool),
    Fullscreen(bool),
    ScrollTo(ScrollTarget),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dropdown {
    Results(Vec<ComicSummary>),
    Empty,
    Failed,
}

pub trait Surface {
    /// Drops all mounted content at once.
    fn clear(&mut self);

    fn mount(&mut self, scope: ScopeId, block: Block);

    fn apply(&mut self, scope: ScopeId, patch: Patch);

    fn set_location(&mut self, location: &Location);

    fn set_loading(&mut self, loading: bool);

    fn show_dropdown(&mut self, dropdown: Dropdown);

    fn hide_dropdown(&mut self);

    fn clear_search_input(&mut self);

    fn is_fullscreen(&self) -> bool;
}

/// Surface without a display, keeping the resulting state and a log of patches.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeadlessSurface {
    pub location: Option<Location>,
    pub loading: bool,
    pub mounted: Option<(ScopeId, Block)>,
    pub mounts: usize,
    pub clears: usize,
    pub patches: Vec<(ScopeId, Patch)>,
    pub dropdown: Option<Dropdown>,
    pub search_input_clears: usize,
    pub fullscreen: bool,
}

impl HeadlessSurface {
    #[must_use]
    pub fn block(&self) -> Option<&Block> {
        self.mounted.as_ref().map(|(_, block)| block)
    }

    #[must_use]
    pub fn scope(&self) -> Option<ScopeId> {
        self.mounted.as_ref().map(|(scope, _)| *scope)
    }
}

impl Surface for HeadlessSurface {
    fn clear(&mut self) {
        self.mounted = None;
        self.clears += 1;
    }

    fn mount(&mut self, scope: ScopeId, block: Block) {
        trace!("mounting block into {scope}");
        self.mounted = Some((scope, block));
        self.mounts += 1;
    }

    fn apply(&mut self, scope: ScopeId, patch: Patch) {
        if let Patch::Fullscreen(fullscreen) = patch {
            self.fullscreen = fullscreen;
        }
        self.patches.push((scope, patch));
    }

    fn set_location(&mut self, location: &Location) {
        self.location = Some(location.clone());
    }

    fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    fn show_dropdown(&mut self, dropdown: Dropdown) {
        self.dropdown = Some(dropdown);
    }

    fn hide_dropdown(&mut self) {
        self.dropdown = None;
    }

    fn clear_search_input(&mut self) {
        self.search_input_clears += 1;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }
}
