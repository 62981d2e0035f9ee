//! Path routing for front ends that have URLs.

/// A parsed application path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Login,
    Signup,
    Dashboard,
    /// `/share/<token>`
    Share(String),
    NotFound(String),
}

impl Route {
    /// Parse a path. Query strings, fragments and a trailing slash are ignored.
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');

        match trimmed {
            "" => Route::Root,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/dashboard" => Route::Dashboard,
            other => match other.strip_prefix("/share/") {
                Some(token) if !token.is_empty() && !token.contains('/') => {
                    Route::Share(token.to_string())
                }
                _ => Route::NotFound(path.to_string()),
            },
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::Signup => "/signup".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Share(token) => format!("/share/{}", token),
            Route::NotFound(path) => path.clone(),
        }
    }
}

/// What to show for a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Login,
    Signup,
    Dashboard,
    /// Shared-link landing page; not implemented beyond a notice.
    SharedRecords(String),
    NotFound,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Page::Login => "Sign In",
            Page::Signup => "Create Account",
            Page::Dashboard => "My Files",
            Page::SharedRecords(_) => "Shared Medical Records",
            Page::NotFound => "Not Found",
        }
    }
}

/// Result of routing: the page, and the route to replace the current one
/// with when it differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub page: Page,
    pub redirect: Option<Route>,
}

impl Resolved {
    fn show(page: Page) -> Self {
        Self {
            page,
            redirect: None,
        }
    }

    fn redirect(page: Page, to: Route) -> Self {
        Self {
            page,
            redirect: Some(to),
        }
    }
}

/// Decide the page for `route` given whether a user is signed in.
pub fn resolve(route: &Route, signed_in: bool) -> Resolved {
    match (route, signed_in) {
        (Route::Root, true) => Resolved::redirect(Page::Dashboard, Route::Dashboard),
        (Route::Root, false) => Resolved::redirect(Page::Login, Route::Login),
        (Route::Login | Route::Signup, true) => {
            Resolved::redirect(Page::Dashboard, Route::Dashboard)
        }
        (Route::Login, false) => Resolved::show(Page::Login),
        (Route::Signup, false) => Resolved::show(Page::Signup),
        (Route::Dashboard, true) => Resolved::show(Page::Dashboard),
        (Route::Dashboard, false) => Resolved::redirect(Page::Login, Route::Login),
        (Route::Share(token), _) => Resolved::show(Page::SharedRecords(token.clone())),
        (Route::NotFound(_), _) => Resolved::show(Page::NotFound),
    }
}
