use dioxus::prelude::*;
use dioxus_router::Link;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{RoadmapCardVm, RoadmapPane, map_roadmap_cards, result_roadmap_for};

/// Credits exploration points in the background; failures are only logged.
fn award_exploration(ctx: &AppContext) {
    let progress = ctx.progress();
    let user_id = ctx.user_id();
    spawn(async move {
        let _ = progress.award_exploration(&user_id).await;
    });
}

fn use_open_in_browser() -> Callback<String> {
    let ctx = use_context::<AppContext>();
    use_callback(move |url: String| ctx.link_opener().open_url(&url))
}

/// Pane state and actions of the roadmap browser.
#[derive(Clone, Copy)]
pub(crate) struct RoadmapBrowser {
    pub(crate) pane: Signal<RoadmapPane>,
    pub(crate) open: Callback<RoadmapCardVm>,
    pub(crate) close: Callback<()>,
    pub(crate) browse: Callback<String>,
    resource: Resource<Result<Vec<RoadmapCardVm>, ViewError>>,
}

pub(crate) fn use_roadmap_browser() -> RoadmapBrowser {
    let ctx = use_context::<AppContext>();
    let roadmaps = ctx.roadmaps();
    let pane = use_signal(RoadmapPane::default);

    let resource = use_resource(move || {
        let roadmaps = roadmaps.clone();
        async move {
            let list = roadmaps.list_roadmaps().await?;
            Ok::<_, ViewError>(map_roadmap_cards(&list))
        }
    });

    let open = use_callback(move |card: RoadmapCardVm| {
        let mut pane = pane;
        award_exploration(&ctx);
        pane.set(RoadmapPane::Embedded(card));
    });
    let close = use_callback(move |()| {
        let mut pane = pane;
        pane.set(RoadmapPane::Browse);
    });
    let browse = use_open_in_browser();

    RoadmapBrowser {
        pane,
        open,
        close,
        browse,
        resource,
    }
}

#[component]
pub fn RoadmapsView() -> Element {
    roadmaps_screen(use_roadmap_browser())
}

pub(crate) fn roadmaps_screen(browser: RoadmapBrowser) -> Element {
    let RoadmapBrowser {
        pane,
        open,
        close,
        browse,
        resource,
    } = browser;
    let state = view_state_from_resource(&resource);
    let current = pane.read().clone();

    rsx! {
        div { class: "page roadmaps-page",
            match current {
                RoadmapPane::Embedded(card) => rsx! {
                    EmbeddedRoadmap { card, on_browse: browse, on_close: close }
                },
                RoadmapPane::Browse => rsx! {
                    h2 { "Career Roadmaps" }
                    p { class: "roadmaps-lead", "Step-by-step guides for each career path." }
                    match state {
                        ViewState::Idle => rsx! {
                            p { "Idle" }
                        },
                        ViewState::Loading => rsx! {
                            p { "Loading..." }
                        },
                        ViewState::Ready(cards) => rsx! {
                            if cards.is_empty() {
                                p { "No roadmaps available yet." }
                            }
                            div { class: "roadmap-grid",
                                for card in cards {
                                    RoadmapCard {
                                        key: "{card.career}",
                                        card: card.clone(),
                                        on_open: open,
                                        on_browse: browse,
                                    }
                                }
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
                },
            }
        }
    }
}

/// Embeds the roadmap for `career`. Careers missing from the roadmap list
/// fall back to the link returned with the last quiz result.
#[component]
pub fn RoadmapDetailView(career: String) -> Element {
    let ctx = use_context::<AppContext>();
    let roadmaps = ctx.roadmaps();
    let results = ctx.clone();
    let browse = use_open_in_browser();
    let mut awarded = use_signal(|| false);

    let resource = use_resource(use_reactive!(|career| {
        let roadmaps = roadmaps.clone();
        let last_result = results.last_result();
        async move {
            let found = roadmaps.roadmap_for_career(&career).await?;
            let card = match found {
                Some(roadmap) => Some(RoadmapCardVm::from(&roadmap)),
                None => result_roadmap_for(&career, last_result.as_ref()),
            };
            Ok::<_, ViewError>(card)
        }
    }));
    let state = view_state_from_resource(&resource);

    use_effect(move || {
        let found = matches!(resource.value().read().as_ref(), Some(Ok(Some(_))));
        if found && !*awarded.peek() {
            awarded.set(true);
            award_exploration(&ctx);
        }
    });

    rsx! {
        div { class: "page roadmaps-page",
            match state {
                ViewState::Idle | ViewState::Loading => rsx! {
                    p { "Loading roadmap..." }
                },
                ViewState::Ready(Some(card)) => rsx! {
                    EmbeddedRoadmap { card, on_browse: browse }
                },
                ViewState::Ready(None) => rsx! {
                    h2 { "{career}" }
                    p { "There is no roadmap for this career yet." }
                    Link { class: "btn btn-secondary", to: Route::Roadmaps {}, "Browse all roadmaps" }
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
fn RoadmapCard(
    card: RoadmapCardVm,
    on_open: EventHandler<RoadmapCardVm>,
    on_browse: EventHandler<String>,
) -> Element {
    let url = card.url.clone();
    let for_open = card.clone();

    rsx! {
        article { class: "roadmap-card",
            h3 { class: "roadmap-card__title", "{card.career}" }
            if !card.description.is_empty() {
                p { class: "roadmap-card__description", "{card.description}" }
            }
            span { class: "roadmap-card__host", "{card.host}" }
            div { class: "roadmap-card__actions",
                button {
                    class: "btn btn-primary",
                    r#type: "button",
                    onclick: move |_| on_open.call(for_open.clone()),
                    "View Roadmap"
                }
                button {
                    class: "btn btn-ghost",
                    r#type: "button",
                    onclick: move |_| on_browse.call(url.clone()),
                    "Open in Browser"
                }
            }
        }
    }
}

#[component]
fn EmbeddedRoadmap(
    card: RoadmapCardVm,
    on_browse: EventHandler<String>,
    on_close: Option<EventHandler<()>>,
) -> Element {
    let url = card.url.clone();

    rsx! {
        div { class: "roadmap-embed",
            header { class: "roadmap-embed__header",
                if let Some(on_close) = on_close {
                    button {
                        class: "btn btn-ghost",
                        id: "roadmap-back",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Back"
                    }
                } else {
                    Link { class: "btn btn-ghost", to: Route::Roadmaps {}, "All roadmaps" }
                }
                h2 { class: "roadmap-embed__title", "{card.career} Roadmap" }
                button {
                    class: "btn btn-secondary",
                    id: "roadmap-open-browser",
                    r#type: "button",
                    onclick: move |_| on_browse.call(url.clone()),
                    "Open in Browser"
                }
            }
            iframe {
                class: "roadmap-embed__frame",
                src: "{card.url}",
                title: "{card.career} roadmap",
            }
        }
    }
}
