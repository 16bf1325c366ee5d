//! Per-page content loaders.
//!
//! Each loader is split in two: an async `fetch` that only talks to the api,
//! and a synchronous `render` that builds the block, its listeners and, for
//! the reader, the chapter state. The router runs its transition-token check
//! between the two.

use komik_core::{Catalog, ChapterContent, ComicDetail};

use crate::{
    Block, Control, Effect, ErrorView, Interaction, ListenerKind, LoadError, Location, Patch,
    ReaderState, RenderScope, ScopeId,
};

pub use catalog::Listing;

pub mod catalog;
pub mod detail;
pub mod reader;

#[derive(Debug, Clone, PartialEq)]
pub enum PageContent {
    Catalog(Listing),
    Detail(ComicDetail),
    Reader(ChapterContent),
}

/// Output of a render: what to mount, the listeners that go with it, and what follows the mount.
#[derive(Debug)]
pub struct Rendered {
    pub block: Block,
    pub scope: RenderScope,
    pub reader: Option<ReaderState>,
    pub after_mount: Vec<Patch>,
}

impl Rendered {
    fn new(block: Block, scope: RenderScope) -> Self {
        Self {
            block,
            scope,
            reader: None,
            after_mount: Vec::new(),
        }
    }
}

/// Fetches the data of the page at `location`.
///
/// # Errors
///
/// Any api failure of the underlying endpoint.
pub async fn fetch(api: &dyn Catalog, location: &Location) -> komik_core::Result<PageContent> {
    match location {
        Location::Home | Location::Latest | Location::Popular | Location::Search(_) => {
            catalog::fetch(api, location).await.map(PageContent::Catalog)
        }
        Location::Detail(slug) => detail::fetch(api, slug).await.map(PageContent::Detail),
        Location::Reader(slug) => reader::fetch(api, slug).await.map(PageContent::Reader),
    }
}

#[must_use]
pub fn render(
    scope: ScopeId,
    location: &Location,
    outcome: Result<PageContent, LoadError>,
) -> Rendered {
    match outcome {
        Ok(PageContent::Catalog(listing)) => catalog::render(scope, listing),
        Ok(PageContent::Detail(detail)) => detail::render(scope, detail),
        Ok(PageContent::Reader(chapter)) => reader::render(scope, chapter),
        Err(LoadError::Api(err)) => match location {
            Location::Home | Location::Latest | Location::Popular | Location::Search(_) => {
                catalog::render_error(scope, &err)
            }
            Location::Detail(_) => detail::render_error(scope, &err),
            Location::Reader(_) => reader::render_error(scope, &err),
        },
        Err(err @ LoadError::Aborted(_)) => render_generic_error(scope, &err),
    }
}

/// Last-resort error view for failures no loader handled.
#[must_use]
pub fn render_generic_error(scope: ScopeId, err: &LoadError) -> Rendered {
    error_block(
        scope,
        ErrorView {
            title: "Something went wrong".to_string(),
            message: format!("The page could not be loaded, please try again ({err})."),
            actions: vec![Control::BackToCatalog],
        },
    )
}

/// Mounts `view` with a listener for each of its recovery actions.
fn error_block(scope: ScopeId, view: ErrorView) -> Rendered {
    let mut render_scope = RenderScope::new(scope);
    render_scope.on(ListenerKind::Activate, |interaction| match interaction {
        Interaction::Activate(Control::BackToCatalog) => Some(Effect::Navigate(Location::Home)),
        Interaction::Activate(Control::Back) => Some(Effect::Back),
        _ => None,
    });
    Rendered::new(Block::Error(view), render_scope)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aborted_loads_get_the_generic_view() {
        let rendered = render(
            ScopeId(3),
            &Location::Detail("x".to_string()),
            Err(LoadError::Aborted("boom".to_string())),
        );
        let Block::Error(view) = &rendered.block else {
            panic!("expected error block, got {:?}", rendered.block);
        };
        assert_eq!(view.actions, vec![Control::BackToCatalog]);
        assert_eq!(
            rendered
                .scope
                .dispatch(&Interaction::Activate(Control::BackToCatalog)),
            Some(Effect::Navigate(Location::Home))
        );
    }
}
