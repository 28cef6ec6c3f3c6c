use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{DashboardVm, TierRowVm, map_dashboard};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let progress = ctx.progress();
    let user_id = ctx.user_id();

    let resource = use_resource(move || {
        let progress = progress.clone();
        let user_id = user_id.clone();
        async move {
            let dashboard = progress.dashboard(&user_id).await?;
            Ok::<_, ViewError>(map_dashboard(&dashboard, progress.levels()))
        }
    });
    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page dashboard-page",
            h2 { "My Progress" }
            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(vm) => rsx! {
                    DashboardPanel { vm }
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
        }
    }
}

#[component]
fn DashboardPanel(vm: DashboardVm) -> Element {
    rsx! {
        section { class: "profile",
            h3 { class: "profile__name", "{vm.name}" }
            p { class: "profile__since", "Member since {vm.member_since}" }
        }
        section { class: "level-card", style: "border-color: {vm.color}",
            div { class: "level-card__header",
                span {
                    class: "level-pill",
                    style: "background-color: {vm.color}",
                    "{vm.level_label}"
                }
                h4 { class: "level-card__title", "{vm.title}" }
            }
            p { class: "level-card__points", "{vm.total_points} points" }
            div { class: "progress",
                div {
                    class: "progress__fill",
                    style: "width: {vm.percent}%; background-color: {vm.color}",
                }
            }
            p { class: "level-card__next", "{vm.next_label}" }
        }
        section { class: "badges",
            h4 { "Badges" }
            if vm.badges.is_empty() {
                p { class: "badges__empty", "No badges yet. Finish a quiz to earn your first one." }
            } else {
                ul {
                    for badge in vm.badges.iter() {
                        li { key: "{badge}", class: "badge", "{badge}" }
                    }
                }
            }
        }
        section { class: "ladder",
            h4 { "Levels" }
            ol {
                for row in vm.ladder.iter().cloned() {
                    TierRow { key: "{row.level}", row: row.clone() }
                }
            }
        }
        div { class: "dashboard-actions",
            Link { class: "btn btn-primary", to: Route::Quiz {}, "Take the Quiz" }
            Link { class: "btn btn-secondary", to: Route::Roadmaps {}, "Explore Roadmaps" }
        }
    }
}

#[component]
fn TierRow(row: TierRowVm) -> Element {
    let class = match (row.current, row.reached) {
        (true, _) => "ladder-row ladder-row--current",
        (false, true) => "ladder-row ladder-row--reached",
        (false, false) => "ladder-row",
    };
    rsx! {
        li { class,
            span { class: "ladder-row__dot", style: "background-color: {row.color}" }
            span { class: "ladder-row__title", "Level {row.level} · {row.title}" }
            span { class: "ladder-row__range", "{row.range}" }
        }
    }
}
