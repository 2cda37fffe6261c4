//! StudySwap App
//!
//! Root component: provides the app context and catalog store, then renders
//! the navigation bar, toasts and the page for the current route.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::components::{NavBar, ToastHost};
use crate::config::AppConfig;
use crate::context::{AppContext, Route};
use crate::pages::admin::{
    CoursesPage, MaterialTypesPage, MaterialsPage, RequestsPage, StudentsPage, SubjectsPage,
};
use crate::pages::public::{HomePage, LoginPage, RegisterPage};
use crate::pages::student::{
    BrowsePage, CheckoutPage, FlashcardsPage, LibraryPage, MyRequestsPage, PlaylistsPage,
};
use crate::store::{refresh_catalog, CatalogState, CatalogStore};

fn page_for(route: Route) -> AnyView {
    match route {
        Route::Home => view! { <HomePage /> }.into_any(),
        Route::Login => view! { <LoginPage /> }.into_any(),
        Route::Register => view! { <RegisterPage /> }.into_any(),
        Route::AdminCourses => view! { <CoursesPage /> }.into_any(),
        Route::AdminSubjects => view! { <SubjectsPage /> }.into_any(),
        Route::AdminMaterialTypes => view! { <MaterialTypesPage /> }.into_any(),
        Route::AdminMaterials => view! { <MaterialsPage /> }.into_any(),
        Route::AdminStudents => view! { <StudentsPage /> }.into_any(),
        Route::AdminRequests => view! { <RequestsPage /> }.into_any(),
        Route::StudentBrowse => view! { <BrowsePage /> }.into_any(),
        Route::StudentLibrary => view! { <LibraryPage /> }.into_any(),
        Route::StudentFlashcards => view! { <FlashcardsPage /> }.into_any(),
        Route::StudentPlaylists => view! { <PlaylistsPage /> }.into_any(),
        Route::StudentRequests => view! { <MyRequestsPage /> }.into_any(),
        Route::Checkout => view! { <CheckoutPage /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();
    log::info!("[app] api at {}", config.api_base_url);

    let ctx = AppContext::new(config);
    provide_context(ctx);

    let catalog: CatalogStore = Store::new(CatalogState::default());
    provide_context(catalog);

    // Lookup lists load once per sign-in change; admin pages refresh them after edits
    Effect::new(move |_| {
        let _ = ctx.role();
        let api = ctx.api();
        spawn_local(async move {
            if let Err(err) = refresh_catalog(catalog, api).await {
                log::warn!("[app] catalog unavailable: {}", err);
            }
        });
    });

    // Page title follows the route
    Effect::new(move |_| {
        let title = ctx.route().title();
        if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
            doc.set_title(&format!("{} · StudySwap", title));
        }
    });

    // Re-rendered only when the guarded route actually changes
    let route = Memo::new(move |_| ctx.route());

    view! {
        <div class="app-layout">
            <NavBar />
            <main class="main-content">{move || page_for(route.get())}</main>
            <ToastHost />
        </div>
    }
}
