use std::collections::HashSet;

use dioxus::prelude::*;
use komik_router::{CatalogView, Control, Interaction, TypeFilter};

#[must_use]
#[inline_props]
pub fn CatalogPage<'a>(
    cx: Scope,
    view: CatalogView,
    hidden: HashSet<String>,
    filter: TypeFilter,
    on_interact: EventHandler<'a, Interaction>,
) -> Element {
    cx.render(rsx! {
        div { class: "flex flex-col gap-2 p-2",
            div { class: "flex flex-row items-center justify-between",
                div { class: "text-xl", "{view.title}" }
                div { class: "flex flex-row gap-1",
                    for choice in TypeFilter::CHOICES {
                        div {
                            key: "{choice.label()}",
                            class: if choice == *filter {
                                "px-2 border border-slate-900 rounded cursor-pointer bg-slate-500 text-slate-900"
                            } else {
                                "px-2 border border-slate-900 rounded cursor-pointer bg-slate-700 hover:bg-slate-500"
                            },
                            onclick: move |_evt| on_interact.call(Interaction::Activate(Control::TypeFilter(choice))),
                            choice.label()
                        }
                    }
                }
            }
            if view.comics.is_empty() {
                rsx! { div { class: "flex h-32 items-center justify-center", "No comics found" } }
            }
            div { class: "grid grid-cols-6 gap-2",
                for comic in view.comics.iter().filter(|comic| !hidden.contains(&comic.slug)) {
                    div {
                        key: "{comic.slug}",
                        class: "flex flex-col cursor-pointer hover:bg-slate-600 rounded overflow-hidden",
                        onclick: {
                            let slug = comic.slug.clone();
                            move |_evt| on_interact.call(Interaction::Activate(Control::ComicCard(slug.clone())))
                        },
                        img { class: "w-full aspect-[2/3] object-cover", src: "{comic.cover}", "loading": "lazy" }
                        div { class: "px-1 truncate text-slate-200", title: "{comic.title}", "{comic.title}" }
                        div { class: "flex flex-row justify-between px-1 text-xs",
                            span { "{comic.comic_type}" }
                            if let Some(rating) = comic.rating {
                                rsx! { span { i { class: "bi bi-star-fill" } " {rating:.1}" } }
                            }
                        }
                        if let Some(chapter) = &comic.chapter {
                            rsx! { div { class: "px-1 text-xs truncate", "{chapter}" } }
                        }
                        if let Some(date) = &comic.date {
                            rsx! { div { class: "px-1 pb-1 text-xs truncate text-slate-500", i { class: "bi bi-clock" } " {date}" } }
                        }
                    }
                }
            }
        }
    })
}
