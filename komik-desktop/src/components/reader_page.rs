use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_desktop::use_window;
use komik_router::{Control, ImageLoading, Interaction, ReaderView};
use tracing::debug;

#[must_use]
#[inline_props]
fn ChapterNav<'a>(
    cx: Scope,
    has_prev: bool,
    has_next: bool,
    on_activate: EventHandler<'a, Control>,
) -> Element {
    let button = "flex justify-center items-center cursor-pointer px-2 border border-slate-900 bg-slate-700 rounded hover:bg-slate-500 w-24";

    cx.render(rsx! {
        div { class: "flex flex-row items-center justify-center gap-2 h-16",
            div { class: button, onclick: move |_evt| on_activate.call(Control::Back), "Back" }
            if *has_prev {
                rsx! { div { class: button, onclick: move |_evt| on_activate.call(Control::PrevChapter), "Previous" } }
            }
            if *has_next {
                rsx! { div { class: button, onclick: move |_evt| on_activate.call(Control::NextChapter), "Next" } }
            }
        }
    })
}

#[must_use]
#[inline_props]
pub fn ReaderPage<'a>(
    cx: Scope,
    view: ReaderView,
    reading_mode: bool,
    fullscreen: bool,
    on_interact: EventHandler<'a, Interaction>,
) -> Element {
    let window = use_window(cx);
    let column = use_ref(cx, || None::<Rc<MountedData>>);
    let column_width = use_state(cx, || None::<f64>);
    let activate = move |control: Control| on_interact.call(Interaction::Activate(control));

    let measure = move || {
        let Some(mounted) = column.read().clone() else {
            return;
        };
        to_owned![column_width];
        cx.spawn(async move {
            match mounted.get_client_rect().await {
                Ok(rect) => column_width.set(Some(rect.size.width)),
                Err(err) => debug!("cannot measure the reader column: {err:?}"),
            }
        });
    };

    let tap = move |evt: MouseEvent| {
        let width = column_width.get().unwrap_or_else(|| {
            window
                .inner_size()
                .to_logical::<f64>(window.scale_factor())
                .width
        });
        on_interact.call(Interaction::Tap {
            x: evt.element_coordinates().x,
            width,
        });
        // the window may have been resized since the last tap
        measure();
    };

    cx.render(rsx! {
        div { class: "flex flex-col items-center",
            if !*reading_mode {
                rsx! {
                    div { class: "flex flex-row w-full items-center justify-between h-12 px-2",
                        div { class: "text-xl text-slate-200 truncate", "{view.title}" }
                        div { class: "flex flex-row gap-3",
                            i { class: "bi bi-chevron-bar-up cursor-pointer", title: "Top", onclick: move |_evt| activate(Control::ScrollTop) }
                            i { class: "bi bi-chevron-bar-down cursor-pointer", title: "Bottom", onclick: move |_evt| activate(Control::ScrollBottom) }
                            i { class: "bi bi-book cursor-pointer", title: "Reading mode", onclick: move |_evt| activate(Control::ToggleReadingMode) }
                            i {
                                class: if *fullscreen { "bi bi-fullscreen-exit cursor-pointer" } else { "bi bi-fullscreen cursor-pointer" },
                                title: if *fullscreen { "Exit fullscreen" } else { "Fullscreen" },
                                onclick: move |_evt| activate(Control::ToggleFullscreen),
                            }
                        }
                    }
                    ChapterNav { has_prev: view.has_prev, has_next: view.has_next, on_activate: move |control| activate(control) }
                }
            }
            if *reading_mode {
                rsx! {
                    i {
                        class: "bi bi-book-fill fixed top-1 right-1 cursor-pointer opacity-50",
                        title: "Leave reading mode",
                        onclick: move |_evt| activate(Control::ToggleReadingMode),
                    }
                }
            }
            div {
                class: "flex flex-col w-full",
                onmounted: move |evt: MountedEvent| {
                    column.set(Some(evt.inner().clone()));
                    measure();
                },
                onclick: tap,
                for image in view.images.iter() {
                    match image.loading {
                        ImageLoading::Eager => rsx! {
                            img { key: "{image.index}", class: "w-full", src: "{image.url}" }
                        },
                        ImageLoading::Lazy => rsx! {
                            img { key: "{image.index}", class: "w-full min-h-[50vh]", "data-src": "{image.url}" }
                        },
                    }
                }
            }
            if !*reading_mode {
                rsx! {
                    ChapterNav { has_prev: view.has_prev, has_next: view.has_next, on_activate: move |control| activate(control) }
                }
            }
        }
    })
}
