use dioxus::prelude::*;

/// Spinning ring, styled by the `.loader` rule of `index.html`.
#[must_use]
pub fn Loader(cx: Scope) -> Element {
    cx.render(rsx!(span { class: "loader", role: "status", title: "Loading" }))
}
