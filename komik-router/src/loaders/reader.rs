use komik_core::{Catalog, ChapterContent};
use tracing::{error, info};

use crate::{
    Block, Control, Effect, ErrorView, ImageLoading, Interaction, ListenerKind, Location,
    PageImage, Patch, ReaderAction, ReaderState, ReaderView, RenderScope, ScopeId, ScrollTarget,
};

use super::{error_block, Rendered};

pub(super) async fn fetch(api: &dyn Catalog, slug: &str) -> komik_core::Result<ChapterContent> {
    let chapter = api.chapter(slug).await?;
    info!("{slug}: {} pages", chapter.images.len());
    Ok(chapter)
}

#[must_use]
pub fn reader_view(chapter: &ChapterContent) -> ReaderView {
    ReaderView {
        title: chapter.title.clone(),
        images: chapter
            .images
            .iter()
            .enumerate()
            .map(|(index, url)| PageImage {
                index,
                url: url.clone(),
                loading: ImageLoading::for_page(index),
            })
            .collect(),
        has_prev: chapter.navigation.prev.is_some(),
        has_next: chapter.navigation.next.is_some(),
    }
}

pub(super) fn render(scope: ScopeId, chapter: ChapterContent) -> Rendered {
    let mut render_scope = RenderScope::new(scope);
    render_scope
        .on(ListenerKind::Activate, |interaction| {
            let Interaction::Activate(control) = interaction else {
                return None;
            };
            match control {
                Control::Back => Some(Effect::Back),
                Control::BackToCatalog => Some(Effect::Navigate(Location::Home)),
                control => ReaderAction::from_control(control).map(Effect::Reader),
            }
        })
        .on(ListenerKind::Key, |interaction| match interaction {
            Interaction::Key(key) => ReaderAction::from_key(*key).map(Effect::Reader),
            _ => None,
        })
        .on(ListenerKind::Tap, |interaction| match interaction {
            Interaction::Tap { x, width } => Some(Effect::Reader(ReaderAction::Tap {
                x: *x,
                width: *width,
            })),
            _ => None,
        });

    let block = Block::Reader(reader_view(&chapter));
    Rendered {
        block,
        scope: render_scope,
        reader: Some(ReaderState::new(chapter)),
        after_mount: vec![Patch::ScrollTo(ScrollTarget::Top)],
    }
}

pub(super) fn render_error(scope: ScopeId, err: &komik_core::Error) -> Rendered {
    error!("chapter load error: {err}");
    error_block(
        scope,
        ErrorView {
            title: "Chapter unavailable".to_string(),
            message: "The chapter you are looking for could not be loaded.".to_string(),
            actions: vec![Control::Back, Control::BackToCatalog],
        },
    )
}

#[cfg(test)]
mod tests {
    use komik_core::ChapterNavigation;

    use super::*;
    use crate::Key;

    fn chapter(pages: usize) -> ChapterContent {
        ChapterContent {
            slug: "solo-2".to_string(),
            title: "Solo Chapter 2".to_string(),
            images: (0..pages).map(|i| format!("{i}.jpg")).collect(),
            navigation: ChapterNavigation {
                prev: Some("solo-1".to_string()),
                next: None,
            },
        }
    }

    #[test]
    fn first_pages_load_eagerly() {
        let view = reader_view(&chapter(7));
        let loading: Vec<_> = view.images.iter().map(|image| image.loading).collect();
        assert_eq!(&loading[..5], &[ImageLoading::Eager; 5]);
        assert_eq!(&loading[5..], &[ImageLoading::Lazy; 2]);
        assert!(view.has_prev);
        assert!(!view.has_next);
    }

    #[test]
    fn render_hands_the_chapter_to_the_reader() {
        let rendered = render(ScopeId(9), chapter(2));
        assert_eq!(rendered.after_mount, vec![Patch::ScrollTo(ScrollTarget::Top)]);
        assert_eq!(
            rendered.reader.as_ref().map(|reader| reader.chapter().slug.as_str()),
            Some("solo-2")
        );
        assert_eq!(
            rendered.scope.dispatch(&Interaction::Key(Key::ArrowLeft)),
            Some(Effect::Reader(ReaderAction::Prev))
        );
        assert_eq!(
            rendered
                .scope
                .dispatch(&Interaction::Activate(Control::ToggleFullscreen)),
            Some(Effect::Reader(ReaderAction::ToggleFullscreen))
        );
        assert_eq!(
            rendered.scope.dispatch(&Interaction::Activate(Control::Back)),
            Some(Effect::Back)
        );
        assert_eq!(rendered.scope.dispatch(&Interaction::Key(Key::Other)), None);
    }
}
