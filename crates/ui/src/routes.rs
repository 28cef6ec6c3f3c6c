use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable, use_route};

use crate::views::{
    DashboardView, HomeView, QuizView, ResultsView, RoadmapDetailView, RoadmapsView,
};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
        #[route("/results", ResultsView)] Results {},
        #[route("/dashboard", DashboardView)] Dashboard {},
        #[route("/roadmaps", RoadmapsView)] Roadmaps {},
        #[route("/roadmaps/:career", RoadmapDetailView)] RoadmapDetail { career: String },
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

fn nav_items() -> [(Route, &'static str); 4] {
    [
        (Route::Home {}, "Home"),
        (Route::Quiz {}, "Take the Quiz"),
        (Route::Dashboard {}, "My Progress"),
        (Route::Roadmaps {}, "Roadmaps"),
    ]
}

#[component]
fn Sidebar() -> Element {
    let current = use_route::<Route>();

    rsx! {
        nav { class: "sidebar",
            h1 { class: "sidebar__brand", "Career Quest" }
            p { class: "sidebar__tagline", "Find the path that fits you." }
            ul {
                for (route, label) in nav_items() {
                    li { key: "{label}",
                        Link {
                            class: if is_section(&current, &route) { "active" } else { "" },
                            to: route.clone(),
                            "{label}"
                        }
                    }
                }
            }
        }
    }
}

/// Results belong to the quiz section and detail pages to the roadmap list.
fn is_section(current: &Route, item: &Route) -> bool {
    match (current, item) {
        (Route::Results {}, Route::Quiz {}) => true,
        (Route::RoadmapDetail { .. }, Route::Roadmaps {}) => true,
        _ => current == item,
    }
}
