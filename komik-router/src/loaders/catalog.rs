use std::sync::Arc;

use komik_core::{Catalog, ComicSummary, ComicType};
use tracing::{error, info};

use crate::{
    Block, CatalogView, Control, Effect, ErrorView, Interaction, ListenerKind, Location, Patch,
    RenderScope, ScopeId, TypeFilter,
};

use super::{error_block, Rendered};

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub title: String,
    pub comics: Vec<ComicSummary>,
}

/// Title of the listing shown at `location`.
#[must_use]
pub fn title(location: &Location) -> String {
    match location {
        Location::Popular => "Popular comics".to_string(),
        Location::Search(query) => format!("Search results for \"{query}\""),
        _ => "Latest comics".to_string(),
    }
}

pub(super) async fn fetch(api: &dyn Catalog, location: &Location) -> komik_core::Result<Listing> {
    let comics = match location {
        Location::Search(query) => api.search(query).await?,
        // There is no popularity feed, popular is served by the latest one.
        _ => api.latest().await?,
    };
    info!("{location}: {} comics", comics.len());
    Ok(Listing {
        title: title(location),
        comics,
    })
}

pub(super) fn render(scope: ScopeId, listing: Listing) -> Rendered {
    let cards: Arc<[(String, ComicType)]> = listing
        .comics
        .iter()
        .map(|comic| (comic.slug.clone(), comic.comic_type))
        .collect();

    let mut render_scope = RenderScope::new(scope);
    render_scope
        .on(ListenerKind::Activate, |interaction| match interaction {
            Interaction::Activate(Control::ComicCard(slug)) => {
                Some(Effect::Navigate(Location::Detail(slug.clone())))
            }
            _ => None,
        })
        .on(ListenerKind::Activate, move |interaction| match interaction {
            Interaction::Activate(Control::TypeFilter(filter)) => {
                Some(Effect::Patch(filter_patches(*filter, &cards)))
            }
            _ => None,
        });

    Rendered::new(
        Block::Catalog(CatalogView {
            title: listing.title,
            comics: listing.comics,
            filter: TypeFilter::All,
        }),
        render_scope,
    )
}

/// Client-side filtering: marks the active filter and shows only the matching cards.
#[must_use]
pub fn filter_patches(filter: TypeFilter, cards: &[(String, ComicType)]) -> Vec<Patch> {
    std::iter::once(Patch::ActiveFilter(filter))
        .chain(cards.iter().map(|(slug, comic_type)| Patch::CardVisible {
            slug: slug.clone(),
            visible: filter.matches(*comic_type),
        }))
        .collect()
}

pub(super) fn render_error(scope: ScopeId, err: &komik_core::Error) -> Rendered {
    error!("catalog load error: {err}");
    error_block(
        scope,
        ErrorView {
            title: "Could not load comics".to_string(),
            message: "Please try again later.".to_string(),
            actions: vec![Control::BackToCatalog],
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comic(slug: &str, comic_type: ComicType) -> ComicSummary {
        ComicSummary {
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            cover: format!("{slug}.jpg"),
            comic_type,
            rating: None,
            chapter: None,
            date: None,
        }
    }

    #[test]
    fn titles_follow_the_section() {
        assert_eq!(title(&Location::Home), "Latest comics");
        assert_eq!(title(&Location::Latest), "Latest comics");
        assert_eq!(title(&Location::Popular), "Popular comics");
        assert_eq!(
            title(&Location::Search("naruto".to_string())),
            "Search results for \"naruto\""
        );
    }

    #[test]
    fn filter_hides_other_types_without_a_request() {
        let rendered = render(
            ScopeId(1),
            Listing {
                title: "Latest comics".to_string(),
                comics: vec![
                    comic("a", ComicType::Manga),
                    comic("b", ComicType::Manhwa),
                    comic("c", ComicType::Unknown),
                ],
            },
        );
        let effect = rendered.scope.dispatch(&Interaction::Activate(Control::TypeFilter(
            TypeFilter::Only(ComicType::Manhwa),
        )));
        assert_eq!(
            effect,
            Some(Effect::Patch(vec![
                Patch::ActiveFilter(TypeFilter::Only(ComicType::Manhwa)),
                Patch::CardVisible {
                    slug: "a".to_string(),
                    visible: false
                },
                Patch::CardVisible {
                    slug: "b".to_string(),
                    visible: true
                },
                Patch::CardVisible {
                    slug: "c".to_string(),
                    visible: false
                },
            ]))
        );
        let all = filter_patches(TypeFilter::All, &[("c".to_string(), ComicType::Unknown)]);
        assert_eq!(
            all[1],
            Patch::CardVisible {
                slug: "c".to_string(),
                visible: true
            }
        );
    }

    #[test]
    fn cards_open_the_detail_page() {
        let rendered = render(
            ScopeId(1),
            Listing {
                title: String::new(),
                comics: vec![comic("a", ComicType::Manga)],
            },
        );
        assert_eq!(
            rendered
                .scope
                .dispatch(&Interaction::Activate(Control::ComicCard("a".to_string()))),
            Some(Effect::Navigate(Location::Detail("a".to_string())))
        );
        assert!(rendered.reader.is_none());
    }
}
