use dioxus::prelude::*;
use dioxus_router::Router;

use crate::routes::Route;

const STYLE: Asset = asset!("/assets/style.css");

#[component]
pub fn App() -> Element {
    rsx! {
        document::Stylesheet { href: STYLE }
        document::Title { "Career Quest" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! { FatalScreen { message: format!("{errors:?}") } },
                Router::<Route> {}
            }
        }
    }
}

/// Last-resort screen when a view panics its render.
#[component]
fn FatalScreen(message: String) -> Element {
    rsx! {
        div { class: "fatal", role: "alert",
            h1 { "Career Quest hit a problem" }
            p { "Restart the app to continue. Your points are stored by the career service." }
            details {
                summary { "Details" }
                pre { "{message}" }
            }
        }
    }
}
