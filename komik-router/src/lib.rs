#![deny(clippy::all)]
#![deny(clippy::pedantic)]

pub use app::{App, AppEvent, AppSender, SearchEvent};
pub use errors::{LoadError, Result};
pub use history::{History, HistoryMode, MemoryHistory};
pub use location::{Location, PageKind};
pub use reader::{ReaderAction, ReaderState, TapZone};
pub use router::{Completion, Intent, PendingLoad, Router, RouterState, TransitionToken};
pub use scope::{Effect, ListenerKind, RenderScope, ScopeId};
pub use search::{SearchCoordinator, DEBOUNCE_DELAY, PREVIEW_MIN_QUERY_LEN};
pub use surface::{
    Block, CatalogView, ChapterRow, Control, DetailView, Dropdown, ErrorView, HeadlessSurface,
    ImageLoading, Interaction, Key, PageImage, Patch, ReaderView, ScrollTarget, Surface,
    TypeFilter, EAGER_IMAGES, LAZY_ROOT_MARGIN_PX,
};

pub mod app;
mod errors;
pub mod history;
pub mod loaders;
pub mod location;
pub mod reader;
pub mod router;
pub mod scope;
pub mod search;
pub mod surface;
