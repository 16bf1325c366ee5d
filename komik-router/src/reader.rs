//! Chapter-local state of the reader page.

use komik_core::ChapterContent;
use tracing::debug;

use crate::{Control, Key, Location, Patch, ScrollTarget};

/// Horizontal thirds of a chapter image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TapZone {
    Prev,
    /// Left alone for zoom gestures.
    Middle,
    Next,
}

impl TapZone {
    #[must_use]
    pub fn from_fraction(fraction: f64) -> Self {
        if fraction < 1.0 / 3.0 {
            Self::Prev
        } else if fraction > 2.0 / 3.0 {
            Self::Next
        } else {
            Self::Middle
        }
    }

    #[must_use]
    pub fn resolve(x: f64, width: f64) -> Self {
        if !(width.is_finite() && width > 0.0 && x.is_finite()) {
            return Self::Middle;
        }
        Self::from_fraction(x / width)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReaderAction {
    Prev,
    Next,
    Tap { x: f64, width: f64 },
    ToggleFullscreen,
    ExitFullscreen,
    ToggleReadingMode,
    ScrollTo(ScrollTarget),
}

impl ReaderAction {
    #[must_use]
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowLeft | Key::PageUp => Some(Self::Prev),
            Key::ArrowRight | Key::PageDown | Key::Space => Some(Self::Next),
            Key::Escape => Some(Self::ExitFullscreen),
            Key::Home => Some(Self::ScrollTo(ScrollTarget::Top)),
            Key::End => Some(Self::ScrollTo(ScrollTarget::Bottom)),
            Key::Other => None,
        }
    }

    #[must_use]
    pub fn from_control(control: &Control) -> Option<Self> {
        match control {
            Control::PrevChapter => Some(Self::Prev),
            Control::NextChapter => Some(Self::Next),
            Control::ToggleFullscreen => Some(Self::ToggleFullscreen),
            Control::ToggleReadingMode => Some(Self::ToggleReadingMode),
            Control::ScrollTop => Some(Self::ScrollTo(ScrollTarget::Top)),
            Control::ScrollBottom => Some(Self::ScrollTo(ScrollTarget::Bottom)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReaderOutcome {
    pub navigate: Option<Location>,
    pub patches: Vec<Patch>,
}

impl ReaderOutcome {
    fn navigate(location: Option<Location>) -> Self {
        Self {
            navigate: location,
            patches: Vec::new(),
        }
    }

    fn patch(patch: Patch) -> Self {
        Self {
            navigate: None,
            patches: vec![patch],
        }
    }
}

/// Owns the loaded chapter until the next transition replaces or drops it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReaderState {
    chapter: ChapterContent,
    reading_mode: bool,
}

impl ReaderState {
    #[must_use]
    pub fn new(chapter: ChapterContent) -> Self {
        Self {
            chapter,
            reading_mode: false,
        }
    }

    #[must_use]
    pub fn chapter(&self) -> &ChapterContent {
        &self.chapter
    }

    #[must_use]
    pub fn reading_mode(&self) -> bool {
        self.reading_mode
    }

    /// `None` when the chapter has no predecessor.
    #[must_use]
    pub fn go_prev(&self) -> Option<Location> {
        self.chapter.navigation.prev.clone().map(Location::Reader)
    }

    /// `None` when the chapter has no successor.
    #[must_use]
    pub fn go_next(&self) -> Option<Location> {
        self.chapter.navigation.next.clone().map(Location::Reader)
    }

    pub fn handle(&mut self, action: ReaderAction, fullscreen: bool) -> ReaderOutcome {
        debug!("reader {}: {action:?}", self.chapter.slug);
        match action {
            ReaderAction::Prev => ReaderOutcome::navigate(self.go_prev()),
            ReaderAction::Next => ReaderOutcome::navigate(self.go_next()),
            ReaderAction::Tap { x, width } => match TapZone::resolve(x, width) {
                TapZone::Prev => ReaderOutcome::navigate(self.go_prev()),
                TapZone::Next => ReaderOutcome::navigate(self.go_next()),
                TapZone::Middle => ReaderOutcome::default(),
            },
            ReaderAction::ToggleFullscreen => ReaderOutcome::patch(Patch::Fullscreen(!fullscreen)),
            ReaderAction::ExitFullscreen if fullscreen => {
                ReaderOutcome::patch(Patch::Fullscreen(false))
            }
            ReaderAction::ExitFullscreen => ReaderOutcome::default(),
            ReaderAction::ToggleReadingMode => {
                self.reading_mode = !self.reading_mode;
                ReaderOutcome::patch(Patch::ReadingMode(self.reading_mode))
            }
            ReaderAction::ScrollTo(target) => ReaderOutcome::patch(Patch::ScrollTo(target)),
        }
    }
}

#[cfg(test)]
mod tests {
    use komik_core::ChapterNavigation;

    use super::*;

    fn chapter(prev: Option<&str>, next: Option<&str>) -> ReaderState {
        ReaderState::new(ChapterContent {
            slug: "ch-2".to_string(),
            title: "Chapter 2".to_string(),
            images: vec!["1.jpg".to_string()],
            navigation: ChapterNavigation {
                prev: prev.map(ToString::to_string),
                next: next.map(ToString::to_string),
            },
        })
    }

    #[test]
    fn tap_zones_split_in_thirds() {
        assert_eq!(TapZone::from_fraction(0.1), TapZone::Prev);
        assert_eq!(TapZone::from_fraction(0.5), TapZone::Middle);
        assert_eq!(TapZone::from_fraction(0.9), TapZone::Next);
        assert_eq!(TapZone::resolve(30.0, 300.0), TapZone::Prev);
        assert_eq!(TapZone::resolve(270.0, 300.0), TapZone::Next);
        assert_eq!(TapZone::resolve(10.0, 0.0), TapZone::Middle);
    }

    #[test]
    fn taps_page_through_linked_chapters() {
        let mut reader = chapter(Some("ch-1"), Some("ch-3"));
        let tap = |x| ReaderAction::Tap { x, width: 1.0 };
        assert_eq!(
            reader.handle(tap(0.1), false).navigate,
            Some(Location::Reader("ch-1".to_string()))
        );
        assert_eq!(
            reader.handle(tap(0.9), false).navigate,
            Some(Location::Reader("ch-3".to_string()))
        );
        assert_eq!(reader.handle(tap(0.5), false), ReaderOutcome::default());
    }

    #[test]
    fn paging_is_a_no_op_without_links() {
        let mut reader = chapter(None, None);
        assert_eq!(reader.go_prev(), None);
        assert_eq!(reader.go_next(), None);
        for action in [
            ReaderAction::Prev,
            ReaderAction::Next,
            ReaderAction::Tap { x: 0.1, width: 1.0 },
            ReaderAction::Tap { x: 0.9, width: 1.0 },
        ] {
            assert_eq!(reader.handle(action, false), ReaderOutcome::default());
        }
    }

    #[test]
    fn keys_map_to_paging_and_scrolling() {
        assert_eq!(ReaderAction::from_key(Key::ArrowLeft), Some(ReaderAction::Prev));
        assert_eq!(ReaderAction::from_key(Key::PageUp), Some(ReaderAction::Prev));
        assert_eq!(ReaderAction::from_key(Key::Space), Some(ReaderAction::Next));
        assert_eq!(ReaderAction::from_key(Key::PageDown), Some(ReaderAction::Next));
        assert_eq!(
            ReaderAction::from_key(Key::End),
            Some(ReaderAction::ScrollTo(ScrollTarget::Bottom))
        );
        assert_eq!(ReaderAction::from_key(Key::Other), None);
    }

    #[test]
    fn toggles_follow_current_state() {
        let mut reader = chapter(None, None);
        assert_eq!(
            reader.handle(ReaderAction::ToggleFullscreen, false).patches,
            vec![Patch::Fullscreen(true)]
        );
        assert_eq!(
            reader.handle(ReaderAction::ToggleFullscreen, true).patches,
            vec![Patch::Fullscreen(false)]
        );
        assert!(reader
            .handle(ReaderAction::ExitFullscreen, false)
            .patches
            .is_empty());
        assert_eq!(
            reader.handle(ReaderAction::ToggleReadingMode, false).patches,
            vec![Patch::ReadingMode(true)]
        );
        assert!(reader.reading_mode());
        assert_eq!(
            reader.handle(ReaderAction::ToggleReadingMode, false).patches,
            vec![Patch::ReadingMode(false)]
        );
    }
}
