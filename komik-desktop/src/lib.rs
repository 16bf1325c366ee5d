#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(non_snake_case)]
#![allow(clippy::ignored_unit_patterns)]

use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_desktop::{use_window, Config, WindowBuilder};
use komik_core::Catalog;
use komik_router::{
    AppEvent, AppSender, Block, Interaction, Location, MemoryHistory, PageKind, SearchEvent,
    LAZY_ROOT_MARGIN_PX,
};
use tracing::{error, info};

use crate::{
    components::{CatalogPage, DetailPage, ErrorPage, Loader, ReaderPage, SearchBar},
    surface::{DesktopSurface, Screen},
};

pub use crate::errors::{Error, Result};

pub mod components;
mod errors;
mod surface;

pub struct AppProps {
    api: Arc<dyn Catalog>,
    location: Option<String>,
}

/// Starts a new window with Komik inside, opened at `location` when given.
pub fn run(api: Arc<dyn Catalog>, location: Option<String>) {
    dioxus_desktop::launch_with_props(
        App,
        AppProps { api, location },
        Config::default()
            .with_custom_index(include_str!("index.html").to_string())
            .with_window(WindowBuilder::default().with_title("Komik")),
    );
}

fn send(sender: &AppSender, event: AppEvent) {
    if let Err(err) = sender.send(event) {
        error!("event loop stopped, dropping {:?}", err.0);
    }
}

fn App(cx: Scope<AppProps>) -> Element {
    let screen = use_ref(cx, Screen::default);
    let window = use_window(cx);
    let eval = use_eval(cx);

    let sender = &*cx.use_hook(|| {
        let surface = DesktopSurface::new(screen.clone(), window.clone(), eval.clone());
        let history = MemoryHistory::new(cx.props.location.clone());
        let mut app = komik_router::App::new(Arc::clone(&cx.props.api), surface, history);
        let sender = app.sender();
        cx.spawn(async move {
            app.run().await;
            info!("komik closed");
        });
        sender
    });

    use_effect(cx, (), |()| {
        to_owned![eval];
        async move {
            let script =
                include_str!("lazy.js").replace("__ROOT_MARGIN__", &LAZY_ROOT_MARGIN_PX.to_string());
            if let Err(err) = eval(&script) {
                error!("lazy image loader error: {err:?}");
            }
        }
    });

    let current = screen.read().clone();
    let section = current.location.as_ref().and_then(Location::section);
    let interact = move |scope, interaction: Interaction| {
        send(sender, AppEvent::Interaction { scope, interaction });
    };

    let on_keydown = move |evt: KeyboardEvent| {
        if let Some((scope, _)) = &screen.read().mounted {
            let key = komik_router::Key::from_name(&evt.key().to_string());
            interact(*scope, Interaction::Key(key));
        }
    };

    let has_mounted = current.mounted.is_some();
    let page = match &current.mounted {
        None => rsx! {
            div { class: "flex flex-col h-full items-center justify-center", Loader {} }
        },
        Some((scope, Block::Catalog(view))) => {
            let scope = *scope;
            rsx! {
                CatalogPage {
                    view: view.clone(),
                    hidden: current.hidden_cards.clone(),
                    filter: current.filter,
                    on_interact: move |interaction| interact(scope, interaction),
                }
            }
        }
        Some((scope, Block::Detail(view))) => {
            let scope = *scope;
            rsx! {
                DetailPage {
                    view: view.clone(),
                    on_interact: move |interaction| interact(scope, interaction),
                }
            }
        }
        Some((scope, Block::Reader(view))) => {
            let scope = *scope;
            rsx! {
                ReaderPage {
                    view: view.clone(),
                    reading_mode: current.reading_mode,
                    fullscreen: window.fullscreen().is_some(),
                    on_interact: move |interaction| interact(scope, interaction),
                }
            }
        }
        Some((scope, Block::Error(view))) => {
            let scope = *scope;
            rsx! {
                ErrorPage {
                    view: view.clone(),
                    on_interact: move |interaction| interact(scope, interaction),
                }
            }
        }
    };

    cx.render(rsx! {
        div {
            class: "min-h-screen flex flex-col text-slate-400 bg-slate-800 outline-none",
            tabindex: "0",
            autofocus: "true",
            onkeydown: on_keydown,
            onclick: move |_evt| send(sender, AppEvent::Search(SearchEvent::Dismiss)),
            if !current.reading_mode {
                rsx! {
                    div { class: "flex flex-row flex-shrink-0 items-center justify-between h-16 px-2 border-b border-slate-900",
                        div { class: "flex flex-row items-center gap-4",
                            div {
                                class: "text-xl cursor-pointer",
                                onclick: move |_evt| send(sender, AppEvent::Navigate(Location::Home)),
                                "Komik"
                            }
                            for (kind, label) in [(PageKind::Home, "Home"), (PageKind::Latest, "Latest"), (PageKind::Popular, "Popular")] {
                                div {
                                    key: "{label}",
                                    class: if section == Some(kind) { "cursor-pointer text-slate-200 border-b-2 border-slate-200" } else { "cursor-pointer hover:text-slate-200" },
                                    onclick: move |_evt| send(sender, AppEvent::Navigate(Location::new(kind, None))),
                                    "{label}"
                                }
                            }
                            i { class: "bi bi-arrow-left cursor-pointer", title: "Back", onclick: move |_evt| send(sender, AppEvent::Back) }
                            i { class: "bi bi-arrow-right cursor-pointer", title: "Forward", onclick: move |_evt| send(sender, AppEvent::Forward) }
                        }
                        SearchBar {
                            dropdown: current.dropdown.clone(),
                            clears: current.search_input_clears,
                            on_search: move |event| send(sender, AppEvent::Search(event)),
                        }
                    }
                }
            }
            if current.loading && has_mounted {
                rsx! { div { class: "absolute top-1 right-1 z-50", Loader {} } }
            }
            page
        }
    })
}
