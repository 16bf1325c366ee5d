use dioxus::prelude::*;
use komik_router::{Dropdown, SearchEvent};

#[must_use]
#[inline_props]
pub fn SearchBar<'a>(
    cx: Scope,
    #[props(!optional)]
    dropdown: Option<Dropdown>,
    /// Bumped every time the input has to be emptied.
    clears: u64,
    on_search: EventHandler<'a, SearchEvent>,
) -> Element {
    let text = use_state(cx, String::new);

    use_effect(cx, (clears,), |_| {
        to_owned![text];
        async move { text.set(String::new()) }
    });

    let oninput = move |evt: FormEvent| {
        text.set(evt.value.clone());
        on_search.call(SearchEvent::Input(evt.value.clone()));
    };

    cx.render(rsx! {
        div {
            class: "relative",
            onclick: move |evt| evt.stop_propagation(),
            // typing must not reach the reader's paging keys
            onkeydown: move |evt| evt.stop_propagation(),
            form {
                onsubmit: move |_evt| on_search.call(SearchEvent::Submit),
                prevent_default: "onsubmit",
                class: "flex flex-row gap-1 h-10 m-0",
                input {
                    class: "h-full px-2 text-slate-900 outline-none",
                    r#type: "text",
                    autocapitalize: "off",
                    autocomplete: "off",
                    placeholder: "Search comics",
                    name: "query",
                    value: "{text}",
                    oninput: oninput,
                }
                button {
                    class: "h-full px-2 bg-slate-900 hover:bg-slate-600",
                    r#type: "submit",
                    "Search"
                }
            }
            match dropdown {
                None => None,
                Some(Dropdown::Empty) => cx.render(rsx! {
                    div { class: "absolute top-11 w-full bg-slate-700 px-2 py-1 z-40", "No comics found" }
                }),
                Some(Dropdown::Failed) => cx.render(rsx! {
                    div { class: "absolute top-11 w-full bg-slate-700 px-2 py-1 z-40", "Search failed" }
                }),
                Some(Dropdown::Results(comics)) => cx.render(rsx! {
                    div { class: "absolute top-11 w-full max-h-96 overflow-y-auto bg-slate-700 z-40",
                        for comic in comics.iter() {
                            div {
                                key: "{comic.slug}",
                                class: "flex flex-row flex-shrink-0 items-center gap-2 cursor-pointer h-12 w-full hover:bg-slate-600 px-2",
                                onclick: {
                                    let slug = comic.slug.clone();
                                    move |_evt| on_search.call(SearchEvent::Select(slug.clone()))
                                },
                                img { class: "h-10 w-8 object-cover", src: "{comic.cover}" }
                                div { class: "truncate", "{comic.title}" }
                            }
                        }
                    }
                }),
            }
        }
    })
}
