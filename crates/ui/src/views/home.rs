use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};

#[derive(Clone, Debug, PartialEq, Eq)]
struct HomeData {
    name: String,
    level_label: String,
    title: String,
    color: String,
    total_points: i64,
}

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let progress = ctx.progress();
    let user_id = ctx.user_id();

    let resource = use_resource(move || {
        let progress = progress.clone();
        let user_id = user_id.clone();
        async move {
            let dashboard = progress.dashboard(&user_id).await?;
            Ok::<_, ViewError>(HomeData {
                name: dashboard.user.name.clone(),
                level_label: format!("Level {}", dashboard.status.tier.level),
                title: dashboard.status.tier.title.clone(),
                color: dashboard.status.tier.color.clone(),
                total_points: dashboard.status.total_points,
            })
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page home-page",
            header { class: "home-hero",
                h2 { "Find the career that fits you" }
                p { class: "home-hero__lead",
                    "Answer a short aptitude quiz, get a career recommendation and a roadmap to follow."
                }
            }
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { class: "home-status", "Loading your progress..." }
                },
                ViewState::Ready(data) => rsx! {
                    div { class: "home-status",
                        p { "Welcome back, {data.name}!" }
                        span {
                            class: "level-pill",
                            style: "background-color: {data.color}",
                            "{data.level_label} · {data.title}"
                        }
                        span { class: "home-status__points", "{data.total_points} pts" }
                    }
                },
                ViewState::Error(err) => rsx! {
                    div { class: "notice",
                        p { "{err.message()}" }
                        button {
                            class: "btn btn-secondary",
                            r#type: "button",
                            onclick: move |_| {
                                let mut resource = resource;
                                resource.restart();
                            },
                            "Retry"
                        }
                    }
                },
            }
            div { class: "home-actions",
                button {
                    class: "btn btn-primary",
                    id: "home-start-quiz",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Quiz {});
                    },
                    "Start Career Quiz"
                }
                Link { class: "btn btn-secondary", to: Route::Dashboard {}, "View Progress" }
                Link { class: "btn btn-secondary", to: Route::Roadmaps {}, "Browse Roadmaps" }
            }
        }
    }
}
