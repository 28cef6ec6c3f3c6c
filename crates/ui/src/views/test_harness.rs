use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

use backend::{Backend, InMemoryBackend};
use career_core::model::UserId;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{ProgressService, QuizService, RoadmapService};

use crate::context::{AppContext, UiApp, build_app_context};
use crate::platform::{LinkOpenerRef, UiLinkOpener};
use crate::views::quiz::{QuizController, quiz_screen, use_quiz_controller};
use crate::views::roadmaps::{RoadmapBrowser, roadmaps_screen, use_roadmap_browser};
use crate::views::{DashboardView, HomeView, ResultsView, RoadmapDetailView};

#[derive(Default)]
pub struct RecordingLinkOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingLinkOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UiLinkOpener for RecordingLinkOpener {
    fn open_url(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_string());
    }
}

struct TestApp {
    user_id: UserId,
    quiz: Arc<QuizService>,
    progress: Arc<ProgressService>,
    roadmaps: Arc<RoadmapService>,
    opener: Arc<RecordingLinkOpener>,
}

impl UiApp for TestApp {
    fn user_id(&self) -> UserId {
        self.user_id.clone()
    }

    fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    fn roadmaps(&self) -> Arc<RoadmapService> {
        Arc::clone(&self.roadmaps)
    }

    fn link_opener(&self) -> LinkOpenerRef {
        self.opener.clone()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
    Results,
    Dashboard,
    Roadmaps,
    RoadmapDetail(String),
}

/// Screen controllers captured while the harness renders.
#[derive(Clone, Default)]
pub struct HarnessHandles {
    quiz: Rc<RefCell<Option<QuizController>>>,
    roadmaps: Rc<RefCell<Option<RoadmapBrowser>>>,
}

impl HarnessHandles {
    pub(crate) fn quiz(&self) -> QuizController {
        (*self.quiz.borrow()).expect("quiz controller registered")
    }

    pub(crate) fn roadmaps(&self) -> RoadmapBrowser {
        (*self.roadmaps.borrow()).expect("roadmap browser registered")
    }
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    context: AppContext,
    view: ViewKind,
    handles: HarnessHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    use_context_provider(|| props.context.clone());
    use_context_provider(|| props.view.clone());
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
    #[route("/:..segments")]
    Elsewhere { segments: Vec<String> },
}

/// Stands in for every app route so navigation can be asserted.
#[component]
fn Elsewhere(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        p { id: "navigated", "navigated to /{path}" }
    }
}

#[component]
fn QuizHarness() -> Element {
    let handles = use_context::<HarnessHandles>();
    let controller = use_quiz_controller();
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        *handles.quiz.borrow_mut() = Some(controller);
    }
    quiz_screen(controller)
}

#[component]
fn RoadmapsHarness() -> Element {
    let handles = use_context::<HarnessHandles>();
    let browser = use_roadmap_browser();
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        *handles.roadmaps.borrow_mut() = Some(browser);
    }
    roadmaps_screen(browser)
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizHarness {} },
        ViewKind::Results => rsx! { ResultsView {} },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Roadmaps => rsx! { RoadmapsHarness {} },
        ViewKind::RoadmapDetail(career) => rsx! { RoadmapDetailView { career } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub backend: Backend,
    pub user_id: UserId,
    pub context: AppContext,
    pub opener: Arc<RecordingLinkOpener>,
    pub handles: HarnessHandles,
}

impl ViewHarness {
    /// Run `f` inside the dom's runtime, then let the resulting work settle.
    pub async fn act(&mut self, f: impl FnOnce()) {
        self.dom.in_runtime(f);
        drive_dom(&mut self.dom);
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Build once and let pending resources resolve.
    pub async fn settle(&mut self) {
        self.rebuild();
        self.drive_async().await;
        self.drive_async().await;
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_backend(view, Backend::from_in_memory(InMemoryBackend::seeded())).await
}

pub async fn setup_view_harness_with_backend(view: ViewKind, backend: Backend) -> ViewHarness {
    let user_id = match backend
        .progress
        .create_user("Sarah Johnson", "sarah.johnson@example.com")
        .await
    {
        Ok(user) => user.id,
        Err(_) => UserId::new("offline-user"),
    };
    let opener = Arc::new(RecordingLinkOpener::default());

    let app: Arc<dyn UiApp> = Arc::new(TestApp {
        user_id: user_id.clone(),
        quiz: Arc::new(QuizService::new(Arc::clone(&backend.quiz))),
        progress: Arc::new(ProgressService::new(Arc::clone(&backend.progress))),
        roadmaps: Arc::new(RoadmapService::new(Arc::clone(&backend.roadmaps))),
        opener: Arc::clone(&opener),
    });
    let context = build_app_context(&app);
    let handles = HarnessHandles::default();

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            context: context.clone(),
            view,
            handles: handles.clone(),
        },
    );

    ViewHarness {
        dom,
        backend,
        user_id,
        context,
        opener,
        handles,
    }
}
