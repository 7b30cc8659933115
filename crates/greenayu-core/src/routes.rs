//! Route table and route guard.

use crate::feature::FeatureKind;
use crate::session::Session;
use serde::Serialize;
use std::fmt;

/// Path of the sign-in page.
pub const LOGIN_PATH: &str = "/login";
/// Path unknown routes resolve to.
pub const NOT_FOUND_PATH: &str = "/404";
/// Where a successful sign-in lands when no destination was preserved.
pub const DEFAULT_AFTER_LOGIN: &str = "/features/identify-health";

/// Every page the application knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Route {
    /// Landing page.
    Home,
    /// About page.
    About,
    /// Pricing packages.
    Packages,
    /// Contact page.
    Contact,
    /// Terms of service.
    Terms,
    /// Sign-in page.
    Login,
    /// Account creation page.
    Register,
    /// One of the five protected feature pages.
    Feature(FeatureKind),
    /// Fallback for anything else.
    NotFound,
}

impl Route {
    /// All routes in navigation order.
    pub const ALL: [Route; 13] = [
        Route::Home,
        Route::About,
        Route::Packages,
        Route::Contact,
        Route::Terms,
        Route::Login,
        Route::Register,
        Route::Feature(FeatureKind::IdentifyHealth),
        Route::Feature(FeatureKind::Fertilizer),
        Route::Feature(FeatureKind::Yield),
        Route::Feature(FeatureKind::ShelfLife),
        Route::Feature(FeatureKind::PartsQuality),
        Route::NotFound,
    ];

    /// Canonical path of the route.
    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::About => "/about",
            Route::Packages => "/packages",
            Route::Contact => "/contact",
            Route::Terms => "/terms",
            Route::Login => LOGIN_PATH,
            Route::Register => "/register",
            Route::Feature(kind) => kind.route_path(),
            Route::NotFound => NOT_FOUND_PATH,
        }
    }

    /// Navigation label.
    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::About => "About",
            Route::Packages => "Packages",
            Route::Contact => "Contact",
            Route::Terms => "Terms",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Feature(kind) => kind.label(),
            Route::NotFound => "Not Found",
        }
    }

    /// Resolves a browser path (query, fragment and trailing slash ignored).
    pub fn resolve(path: &str) -> Route {
        let path = normalize(path);
        Route::ALL
            .iter()
            .copied()
            .find(|route| route.path() == path)
            .unwrap_or(Route::NotFound)
    }

    /// Whether the default guard protects this route.
    pub fn is_protected(&self) -> bool {
        matches!(self, Route::Feature(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of [`RouteGuard::authorize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Access {
    /// Render the requested route.
    Allow,
    /// Navigate to `to` instead.
    Redirect {
        /// Target path, usually the login page.
        to: String,
    },
}

impl Access {
    /// Whether navigation may proceed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Access::Allow)
    }
}

/// Gates protected path prefixes behind "session present".
///
/// There is no expiry: any session lets every protected route through.
#[derive(Debug, Clone)]
pub struct RouteGuard {
    protected_prefixes: Vec<String>,
    login_path: String,
    preserve_destination: bool,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self {
            protected_prefixes: FeatureKind::ALL
                .iter()
                .map(|kind| kind.route_path().to_string())
                .collect(),
            login_path: LOGIN_PATH.to_string(),
            preserve_destination: false,
        }
    }
}

impl RouteGuard {
    /// Guard over the five feature routes, redirecting to [`LOGIN_PATH`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard over a custom prefix list.
    pub fn with_prefixes<I, P>(prefixes: I, login_path: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            protected_prefixes: prefixes
                .into_iter()
                .map(|p| normalize(&p.into()).to_string())
                .collect(),
            login_path: login_path.into(),
            preserve_destination: false,
        }
    }

    /// Appends `?next=<path>` to redirects so sign-in can return there.
    pub fn preserve_destination(mut self, enabled: bool) -> Self {
        self.preserve_destination = enabled;
        self
    }

    /// Protected prefixes in declaration order.
    pub fn protected_prefixes(&self) -> &[String] {
        &self.protected_prefixes
    }

    /// Whether `path` falls under a protected prefix.
    pub fn is_protected(&self, path: &str) -> bool {
        let path = normalize(path);
        self.protected_prefixes.iter().any(|prefix| {
            path == prefix
                || (path.starts_with(prefix.as_str())
                    && path.as_bytes().get(prefix.len()) == Some(&b'/'))
        })
    }

    /// Decides whether `path` may render for `session`.
    pub fn authorize(&self, path: &str, session: Option<&Session>) -> Access {
        if session.is_some() || !self.is_protected(path) {
            return Access::Allow;
        }

        let to = if self.preserve_destination {
            format!("{}?next={}", self.login_path, normalize(path))
        } else {
            self.login_path.clone()
        };
        tracing::debug!(path, redirect = %to, "Protected route without session");
        Access::Redirect { to }
    }

    /// Post-login destination taken from a login page query string.
    ///
    /// Only same-origin absolute paths are honoured; everything else, and a
    /// guard that does not preserve destinations, yields [`DEFAULT_AFTER_LOGIN`].
    pub fn return_target(&self, query: &str) -> String {
        if !self.preserve_destination {
            return DEFAULT_AFTER_LOGIN.to_string();
        }

        query
            .trim_start_matches('?')
            .split('&')
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == "next")
            .map(|(_, value)| value)
            .filter(|value| value.starts_with('/') && !value.starts_with("//"))
            .filter(|value| !value.contains("://") && !value.contains('\\'))
            .map(|value| value.to_string())
            .unwrap_or_else(|| DEFAULT_AFTER_LOGIN.to_string())
    }
}

fn normalize(path: &str) -> &str {
    let path = path
        .split(['?', '#'])
        .next()
        .unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
