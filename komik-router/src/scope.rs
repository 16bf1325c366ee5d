//! Render scopes: the listeners attached while rendering one transition,
//! released together when the transition ends.

use std::fmt;

use tracing::trace;

use crate::{Interaction, Location, Patch, ReaderAction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ScopeId(pub(crate) u64);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "scope#{}", self.0)
    }
}

/// What a listener asks the core to do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Navigate(Location),
    Back,
    Patch(Vec<Patch>),
    Reader(ReaderAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    Activate,
    Key,
    Tap,
}

impl ListenerKind {
    fn of(interaction: &Interaction) -> Self {
        match interaction {
            Interaction::Activate(_) => Self::Activate,
            Interaction::Key(_) => Self::Key,
            Interaction::Tap { .. } => Self::Tap,
        }
    }
}

type Handler = Box<dyn Fn(&Interaction) -> Option<Effect> + Send>;

pub struct RenderScope {
    id: ScopeId,
    listeners: Vec<(ListenerKind, Handler)>,
}

impl RenderScope {
    #[must_use]
    pub fn new(id: ScopeId) -> Self {
        Self {
            id,
            listeners: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ScopeId {
        self.id
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn on(
        &mut self,
        kind: ListenerKind,
        handler: impl Fn(&Interaction) -> Option<Effect> + Send + 'static,
    ) -> &mut Self {
        self.listeners.push((kind, Box::new(handler)));
        self
    }

    /// Runs the listeners registered for this kind of interaction, first answer wins.
    #[must_use]
    pub fn dispatch(&self, interaction: &Interaction) -> Option<Effect> {
        let kind = ListenerKind::of(interaction);
        self.listeners
            .iter()
            .filter(|(listener_kind, _)| *listener_kind == kind)
            .find_map(|(_, handler)| handler(interaction))
    }
}

impl fmt::Debug for RenderScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderScope")
            .field("id", &self.id)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Drop for RenderScope {
    fn drop(&mut self) {
        trace!("{} released {} listeners", self.id, self.listeners.len());
    }
}
