//! Application Context
//!
//! Session identity, current route, API client and configuration, provided
//! once by `App` through the Leptos Context API.

use leptos::prelude::*;

use crate::api::ApiClient;
use crate::components::Toaster;
use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{AuthSession, Role};
use crate::session::browser_session;

/// Screens of the three portals
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Register,
    AdminCourses,
    AdminSubjects,
    AdminMaterialTypes,
    AdminMaterials,
    AdminStudents,
    AdminRequests,
    StudentBrowse,
    StudentLibrary,
    StudentFlashcards,
    StudentPlaylists,
    StudentRequests,
    Checkout,
}

impl Route {
    pub const ADMIN_NAV: [Route; 6] = [
        Route::AdminCourses,
        Route::AdminSubjects,
        Route::AdminMaterialTypes,
        Route::AdminMaterials,
        Route::AdminStudents,
        Route::AdminRequests,
    ];

    pub const STUDENT_NAV: [Route; 5] = [
        Route::StudentBrowse,
        Route::StudentLibrary,
        Route::StudentFlashcards,
        Route::StudentPlaylists,
        Route::StudentRequests,
    ];

    /// Role a session must hold to see this route
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Route::Home | Route::Login | Route::Register => None,
            Route::AdminCourses
            | Route::AdminSubjects
            | Route::AdminMaterialTypes
            | Route::AdminMaterials
            | Route::AdminStudents
            | Route::AdminRequests => Some(Role::Admin),
            Route::StudentBrowse
            | Route::StudentLibrary
            | Route::StudentFlashcards
            | Route::StudentPlaylists
            | Route::StudentRequests
            | Route::Checkout => Some(Role::Student),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Sign in",
            Route::Register => "Create account",
            Route::AdminCourses => "Courses",
            Route::AdminSubjects => "Subjects",
            Route::AdminMaterialTypes => "Material types",
            Route::AdminMaterials => "Materials",
            Route::AdminStudents => "Students",
            Route::AdminRequests => "Requests",
            Route::StudentBrowse => "Browse",
            Route::StudentLibrary => "My library",
            Route::StudentFlashcards => "Flashcards",
            Route::StudentPlaylists => "Playlists",
            Route::StudentRequests => "My requests",
            Route::Checkout => "Checkout",
        }
    }

    /// Landing screen after sign-in
    pub fn home_for(role: Role) -> Route {
        match role {
            Role::Admin => Route::AdminCourses,
            Role::Student => Route::StudentBrowse,
        }
    }
}

/// Portal routes for a role the session does not hold fall back to login
pub fn guard(route: Route, role: Option<Role>) -> Route {
    match route.required_role() {
        Some(required) if role != Some(required) => Route::Login,
        _ => route,
    }
}

#[derive(Clone, Copy)]
pub struct AppContext {
    config: StoredValue<AppConfig>,
    api: StoredValue<ApiClient, LocalStorage>,
    pub session: RwSignal<Option<AuthSession>>,
    route: RwSignal<Route>,
    pub toaster: Toaster,
}

impl AppContext {
    /// Restore the stored session and start on the public home page
    pub fn new(config: AppConfig) -> Self {
        let session = browser_session().load_session().unwrap_or_else(|err| {
            log::warn!("[session] could not restore session: {}", err);
            None
        });
        if let Some(s) = &session {
            log::info!("[session] restored {} ({:?})", s.user.email, s.user.role);
        }
        let initial = session
            .as_ref()
            .map(|s| Route::home_for(s.user.role))
            .unwrap_or(Route::Home);

        Self {
            api: StoredValue::new_local(ApiClient::new(&config.api_base_url)),
            toaster: Toaster::new(config.toast_lifetime),
            config: StoredValue::new(config),
            session: RwSignal::new(session),
            route: RwSignal::new(initial),
        }
    }

    pub fn config(&self) -> AppConfig {
        self.config.get_value()
    }

    /// API client acting for the current session
    pub fn api(&self) -> ApiClient {
        let token = self
            .session
            .with_untracked(|s| s.as_ref().map(|s| s.token.clone()));
        self.api.with_value(|api| api.with_token(token.as_deref()))
    }

    pub fn role(&self) -> Option<Role> {
        self.session.with(|s| s.as_ref().map(|s| s.user.role))
    }

    /// Route to render, after the role guard
    pub fn route(&self) -> Route {
        guard(self.route.get(), self.role())
    }

    pub fn navigate(&self, route: Route) {
        let allowed = guard(route, self.session.with_untracked(|s| s.as_ref().map(|s| s.user.role)));
        if allowed != route {
            log::info!("[router] {:?} needs sign-in, showing {:?}", route, allowed);
        }
        self.route.set(allowed);
    }

    pub fn sign_in(&self, session: AuthSession) {
        if let Err(err) = browser_session().save_session(&session) {
            log::warn!("[session] could not persist session: {}", err);
        }
        let home = Route::home_for(session.user.role);
        log::info!("[session] signed in {}", session.user.email);
        self.session.set(Some(session));
        self.navigate(home);
    }

    pub fn sign_out(&self) {
        if let Err(err) = browser_session().clear_session() {
            log::warn!("[session] could not clear session: {}", err);
        }
        self.session.set(None);
        self.route.set(Route::Login);
    }

    /// Show an error; an expired session also signs out
    pub fn report(&self, err: &AppError) {
        if err.is_unauthorized() && self.session.with_untracked(|s| s.is_some()) {
            self.toaster.error("Your session has expired. Please sign in again.");
            self.sign_out();
        } else {
            self.toaster.error(err.user_message());
        }
    }
}

pub fn use_app() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_redirects_wrong_role() {
        assert_eq!(guard(Route::AdminCourses, None), Route::Login);
        assert_eq!(guard(Route::AdminCourses, Some(Role::Student)), Route::Login);
        assert_eq!(guard(Route::Checkout, Some(Role::Admin)), Route::Login);
        assert_eq!(guard(Route::AdminCourses, Some(Role::Admin)), Route::AdminCourses);
    }

    #[test]
    fn test_public_routes_always_allowed() {
        for route in [Route::Home, Route::Login, Route::Register] {
            assert_eq!(guard(route, None), route);
            assert_eq!(guard(route, Some(Role::Student)), route);
        }
    }

    #[test]
    fn test_nav_routes_belong_to_their_portal() {
        assert!(Route::ADMIN_NAV.iter().all(|r| r.required_role() == Some(Role::Admin)));
        assert!(Route::STUDENT_NAV.iter().all(|r| r.required_role() == Some(Role::Student)));
        assert_eq!(Route::home_for(Role::Student), Route::StudentBrowse);
    }
}
