use komik_core::{Catalog, ComicDetail};
use tracing::{error, info};

use crate::{
    Block, ChapterRow, Control, DetailView, Effect, ErrorView, Interaction, ListenerKind,
    Location, RenderScope, ScopeId,
};

use super::{error_block, Rendered};

pub(super) async fn fetch(api: &dyn Catalog, slug: &str) -> komik_core::Result<ComicDetail> {
    let detail = api.detail(slug).await?;
    info!("{slug}: {} chapters", detail.chapters.len());
    Ok(detail)
}

/// Chapter rows in api order (newest first), numbered from the oldest one.
#[must_use]
pub fn chapter_rows(detail: &ComicDetail) -> Vec<ChapterRow> {
    detail
        .chapters
        .iter()
        .enumerate()
        .filter_map(|(index, chapter)| {
            let number = detail.chapter_number(index)?;
            Some(ChapterRow {
                number,
                slug: chapter.slug.clone(),
                title: chapter
                    .title
                    .clone()
                    .unwrap_or_else(|| format!("Chapter {number}")),
                date: chapter.date.clone(),
            })
        })
        .collect()
}

pub(super) fn render(scope: ScopeId, detail: ComicDetail) -> Rendered {
    let mut render_scope = RenderScope::new(scope);
    render_scope.on(ListenerKind::Activate, |interaction| {
        let Interaction::Activate(control) = interaction else {
            return None;
        };
        match control {
            Control::ChapterRow(slug) => Some(Effect::Navigate(Location::Reader(slug.clone()))),
            Control::GenreTag(genre) => {
                Some(Effect::Navigate(Location::Search(genre.title.clone())))
            }
            Control::BackToCatalog => Some(Effect::Navigate(Location::Home)),
            _ => None,
        }
    });

    let chapters = chapter_rows(&detail);
    Rendered::new(Block::Detail(DetailView { detail, chapters }), render_scope)
}

pub(super) fn render_error(scope: ScopeId, err: &komik_core::Error) -> Rendered {
    error!("detail load error: {err}");
    error_block(
        scope,
        ErrorView {
            title: "Comic not found".to_string(),
            message: "The comic you are looking for is unavailable or has been removed."
                .to_string(),
            actions: vec![Control::BackToCatalog],
        },
    )
}
