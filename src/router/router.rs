use std::{collections::HashMap, fmt};

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::consts::consts::{PersonId, MAX_ROUTE_REDIRECTS};

/// Page level views a route can mount
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Page {
    PersonList,
    PersonForm,
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::PersonList => f.write_str("PersonList"),
            Page::PersonForm => f.write_str("PersonForm"),
        }
    }
}

/// The person form is shared between creating and editing, the mode is derived from the route
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PersonId),
}

/// What a mounted page shows, derived from the page and its parameters
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageView {
    PersonList,
    CreateForm,
    EditForm(PersonId),
}

/// Where the view scrolls to once a navigation settles
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollPosition {
    Top,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RoutePattern {
    Segments(Vec<Segment>),
    /// Matches every path
    CatchAll,
}

impl RoutePattern {
    /// Parses `/persons/:id/edit` style patterns, `:name` segments bind path parameters
    pub fn parse(pattern: &str) -> Self {
        let segments = split_segments(pattern)
            .into_iter()
            .map(|segment| match segment.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Static(segment.to_string()),
            })
            .collect();

        RoutePattern::Segments(segments)
    }

    fn matches(&self, path_segments: &[&str]) -> Option<HashMap<String, String>> {
        let segments = match self {
            RoutePattern::CatchAll => return Some(HashMap::new()),
            RoutePattern::Segments(segments) => segments,
        };

        if segments.len() != path_segments.len() {
            return None;
        }

        let mut params = HashMap::new();

        for (segment, value) in segments.iter().zip(path_segments) {
            match segment {
                Segment::Static(expected) => {
                    if !expected.eq_ignore_ascii_case(value) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if value.is_empty() {
                        return None;
                    }
                    params.insert(name.clone(), decode_param(value));
                }
            }
        }

        Some(params)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RouteTarget {
    Page(Page),
    Redirect(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    pub pattern: RoutePattern,
    pub target: RouteTarget,
}

impl Route {
    pub fn page(pattern: &str, page: Page) -> Self {
        Route {
            pattern: RoutePattern::parse(pattern),
            target: RouteTarget::Page(page),
        }
    }

    pub fn redirect(pattern: &str, to: &str) -> Self {
        Route {
            pattern: RoutePattern::parse(pattern),
            target: RouteTarget::Redirect(to.to_string()),
        }
    }

    pub fn catch_all(to: &str) -> Self {
        Route {
            pattern: RoutePattern::CatchAll,
            target: RouteTarget::Redirect(to.to_string()),
        }
    }
}

/// Outcome of a navigation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resolution {
    /// Path that finally matched a page, after following redirects
    pub path: String,
    /// Path originally navigated to, when at least one redirect was followed
    pub redirected_from: Option<String>,
    pub page: Page,
    pub params: HashMap<String, String>,
    pub scroll: ScrollPosition,
}

impl Resolution {
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn form_mode(&self) -> FormMode {
        match self.param("id") {
            Some(id) => FormMode::Edit(PersonId::from(id)),
            None => FormMode::Create,
        }
    }

    pub fn view(&self) -> PageView {
        match (self.page, self.form_mode()) {
            (Page::PersonList, _) => PageView::PersonList,
            (Page::PersonForm, FormMode::Create) => PageView::CreateForm,
            (Page::PersonForm, FormMode::Edit(id)) => PageView::EditForm(id),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum RouterError {
    #[error("Too many redirects while navigating to {0}")]
    TooManyRedirects(String),
    #[error("No route matches {0}")]
    NoMatch(String),
}

/// Ordered route table, the first matching route wins
#[derive(Clone, Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// Route table of the persons admin
    pub fn persons() -> Self {
        Router::new(vec![
            Route::redirect("/", "/persons"),
            Route::page("/persons", Page::PersonList),
            Route::page("/persons/new", Page::PersonForm),
            Route::page("/persons/:id/edit", Page::PersonForm),
            Route::catch_all("/persons"),
        ])
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Resolves `path` to the page to mount, following redirects. Every successful navigation
    /// resets the scroll position to the top.
    pub fn resolve(&self, path: &str) -> Result<Resolution, RouterError> {
        let mut current = path.to_string();
        let mut redirects = 0;

        loop {
            let (route_path, suffix) = split_query_and_fragment(&current);
            let segments = split_segments(route_path);

            let (route, params) = self
                .routes
                .iter()
                .find_map(|route| route.pattern.matches(&segments).map(|params| (route, params)))
                .ok_or_else(|| RouterError::NoMatch(current.clone()))?;

            match &route.target {
                RouteTarget::Page(page) => {
                    log::debug!("Resolved {} to {}", path, page);

                    return Ok(Resolution {
                        redirected_from: (redirects > 0).then(|| path.to_string()),
                        path: current,
                        page: *page,
                        params,
                        scroll: ScrollPosition::Top,
                    });
                }
                RouteTarget::Redirect(to) => {
                    if redirects == MAX_ROUTE_REDIRECTS {
                        return Err(RouterError::TooManyRedirects(path.to_string()));
                    }

                    log::debug!("Redirecting {} to {}", current, to);

                    redirects += 1;

                    // A target without its own query or fragment keeps the navigated ones
                    current = if split_query_and_fragment(to).1.is_empty() {
                        format!("{}{}", to, suffix)
                    } else {
                        to.clone()
                    };
                }
            }
        }
    }
}

impl Default for Router {
    fn default() -> Self {
        Router::persons()
    }
}

/// `/persons?page=2#top` -> ("/persons", "?page=2#top")
fn split_query_and_fragment(path: &str) -> (&str, &str) {
    match path.find(|c: char| c == '?' || c == '#') {
        Some(index) => path.split_at(index),
        None => (path, ""),
    }
}

/// Parameters are bound percent-decoded, a segment that does not decode to UTF-8 is kept as is
fn decode_param(value: &str) -> String {
    match percent_decode_str(value).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

/// `/` -> [], `/persons/` -> ["persons"], `/persons/abc/edit` -> ["persons", "abc", "edit"]
fn split_segments(path: &str) -> Vec<&str> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);

    if path.is_empty() {
        return Vec::new();
    }

    path.split('/').collect()
}
