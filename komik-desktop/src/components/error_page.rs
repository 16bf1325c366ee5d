use dioxus::prelude::*;
use komik_router::{Control, ErrorView, Interaction};

fn action_label(control: &Control) -> &'static str {
    match control {
        Control::Back => "Go back",
        _ => "Back to catalog",
    }
}

#[must_use]
#[inline_props]
pub fn ErrorPage<'a>(
    cx: Scope,
    view: ErrorView,
    on_interact: EventHandler<'a, Interaction>,
) -> Element {
    cx.render(rsx! {
        div { class: "flex flex-col h-96 items-center justify-center gap-2",
            i { class: "bi bi-exclamation-triangle text-4xl" }
            div { class: "text-xl text-slate-200", "{view.title}" }
            div { "{view.message}" }
            div { class: "flex flex-row gap-2",
                for control in view.actions.iter() {
                    div {
                        key: "{action_label(control)}",
                        class: "flex justify-center items-center cursor-pointer px-2 border border-slate-900 bg-slate-700 rounded hover:bg-slate-500",
                        onclick: {
                            let control = control.clone();
                            move |_evt| on_interact.call(Interaction::Activate(control.clone()))
                        },
                        action_label(control)
                    }
                }
            }
        }
    })
}
