use dioxus::prelude::*;
use komik_router::{Control, DetailView, Interaction};

#[must_use]
#[inline_props]
pub fn DetailPage<'a>(
    cx: Scope,
    view: DetailView,
    on_interact: EventHandler<'a, Interaction>,
) -> Element {
    let detail = &view.detail;
    let facts = [
        ("Other title", detail.other_title.as_deref()),
        ("Status", Some(detail.status.as_str()).filter(|status| !status.is_empty())),
        ("Author", detail.author.as_deref()),
        ("Artist", detail.artist.as_deref()),
        ("Release", detail.release.as_deref()),
        ("Readers", detail.reader.as_deref()),
    ];

    cx.render(rsx! {
        div { class: "flex flex-col gap-2 p-2",
            div {
                class: "cursor-pointer hover:text-slate-200",
                onclick: move |_evt| on_interact.call(Interaction::Activate(Control::BackToCatalog)),
                i { class: "bi bi-arrow-left" }
                " Back to catalog"
            }
            div { class: "flex flex-row gap-4",
                img { class: "w-48 flex-shrink-0 object-cover", src: "{detail.cover}" }
                div { class: "flex flex-col gap-1",
                    div { class: "text-2xl text-slate-200", "{detail.title}" }
                    div { class: "flex flex-row gap-2",
                        span { "{detail.comic_type}" }
                        if let Some(rating) = detail.rating {
                            rsx! { span { i { class: "bi bi-star-fill" } " {rating:.1}" } }
                        }
                    }
                    for (label, value) in facts.into_iter().filter_map(|(label, value)| Some((label, value?))) {
                        div { key: "{label}", span { class: "text-slate-200", "{label}: " } "{value}" }
                    }
                    div { class: "flex flex-row flex-wrap gap-1",
                        for genre in detail.genres.iter() {
                            div {
                                key: "{genre.slug}",
                                class: "px-2 border border-slate-900 rounded cursor-pointer bg-slate-700 hover:bg-slate-500 text-sm",
                                onclick: {
                                    let genre = genre.clone();
                                    move |_evt| on_interact.call(Interaction::Activate(Control::GenreTag(genre.clone())))
                                },
                                "{genre.title}"
                            }
                        }
                    }
                    if let Some(first) = view.chapters.last() {
                        rsx! {
                            div {
                                class: "flex justify-center items-center cursor-pointer px-2 border border-slate-900 bg-slate-700 rounded hover:bg-slate-500 w-48",
                                onclick: {
                                    let slug = first.slug.clone();
                                    move |_evt| on_interact.call(Interaction::Activate(Control::ChapterRow(slug.clone())))
                                },
                                "Read chapter {first.number}"
                            }
                        }
                    }
                    if let Some(synopsis) = &detail.synopsis {
                        rsx! { p { class: "mt-2", "{synopsis}" } }
                    }
                }
            }
            div { class: "text-xl border-b border-slate-900", "Chapters" }
            if view.chapters.is_empty() {
                rsx! { div { "No chapters yet" } }
            }
            div { class: "flex flex-col",
                for row in view.chapters.iter() {
                    div {
                        key: "{row.slug}",
                        class: "flex flex-row gap-2 px-2 h-8 items-center cursor-pointer hover:bg-slate-600",
                        onclick: {
                            let slug = row.slug.clone();
                            move |_evt| on_interact.call(Interaction::Activate(Control::ChapterRow(slug.clone())))
                        },
                        div { class: "w-12", "#{row.number}" }
                        div { class: "flex-1 truncate", "{row.title}" }
                        div { class: "text-xs", row.date.as_deref().unwrap_or_default() }
                    }
                }
            }
        }
    })
}
