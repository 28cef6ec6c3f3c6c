use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{ResultsVm, map_results};

#[component]
pub fn ResultsView() -> Element {
    let ctx = use_context::<AppContext>();
    let levels = ctx.progress();
    let results = ctx
        .last_result()
        .map(|result| map_results(&result, levels.levels()));

    rsx! {
        div { class: "page results-page",
            h2 { "Your Results" }
            match results {
                Some(vm) => rsx! { ResultsPanel { vm } },
                None => rsx! {
                    p { "No results yet. Take the quiz to get a recommendation." }
                    Link { class: "btn btn-primary", to: Route::Quiz {}, "Start Career Quiz" }
                },
            }
        }
    }
}

#[component]
fn ResultsPanel(vm: ResultsVm) -> Element {
    let navigator = use_navigator();
    let career = vm.career.clone();

    rsx! {
        section { class: "results-hero",
            p { class: "results-hero__eyebrow", "Recommended career" }
            h3 { class: "results-hero__career", "{vm.career}" }
            if let Some(confidence) = vm.confidence_label.as_deref() {
                span { class: "results-hero__confidence", "{confidence}" }
            }
        }
        dl { class: "results-points",
            dt { "Points earned" }
            dd { "+{vm.points_earned}" }

            dt { "Total points" }
            dd { "{vm.total_points}" }

            dt { "Level" }
            dd {
                span {
                    class: "level-pill",
                    style: "background-color: {vm.level_color}",
                    "{vm.level_label} · {vm.level_title}"
                }
            }
        }
        if !vm.badges.is_empty() {
            div { class: "badges",
                h4 { "Badges" }
                ul {
                    for badge in vm.badges.iter() {
                        li { key: "{badge}", class: "badge", "{badge}" }
                    }
                }
            }
        }
        if !vm.categories.is_empty() {
            div { class: "category-scores",
                h4 { "Your strengths" }
                for row in vm.categories.iter() {
                    div {
                        key: "{row.label}",
                        class: if row.strongest { "category-row category-row--top" } else { "category-row" },
                        span { class: "category-row__label", "{row.label}" }
                        div { class: "progress",
                            div { class: "progress__fill", style: "width: {row.width}%" }
                        }
                        span { class: "category-row__score", "{row.score}" }
                    }
                }
            }
        }
        div { class: "results-actions",
            button {
                class: "btn btn-primary",
                id: "results-roadmap",
                r#type: "button",
                onclick: move |_| {
                    let _ = navigator.push(Route::RoadmapDetail { career: career.clone() });
                },
                "View Learning Roadmap"
            }
            Link { class: "btn btn-secondary", to: Route::Dashboard {}, "View Progress" }
            Link { class: "btn btn-ghost", to: Route::Quiz {}, "Retake Quiz" }
        }
    }
}
