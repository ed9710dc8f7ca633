//! Page view models and HTML rendering.
//!
//! DESIGN
//! ======
//! Each page is a plain two-branch function from the optional principal to a
//! view model, then a template fill. Branch selection is deterministic, so
//! repeated renders with an unchanged session always pick the same branch.
//! All principal-derived text is escaped before it reaches markup.

use crate::identity::Principal;

const LANDING_TEMPLATE: &str = include_str!("../../templates/landing.html");
const DASHBOARD_TEMPLATE: &str = include_str!("../../templates/dashboard.html");

pub const SIGN_IN_PATH: &str = "/sign-in";
pub const SIGN_UP_PATH: &str = "/sign-up";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const SIGN_OUT_PATH: &str = "/sign-out";
pub const ROOT_PATH: &str = "/";

// =============================================================================
// VIEW MODELS
// =============================================================================

/// Landing page branches. Exactly one renders per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LandingView {
    /// No session: sign-in and sign-up affordances, hero call-to-action.
    Visitor,
    /// Live session: dashboard link and account menu.
    Member { principal: Principal },
}

/// Dashboard page outcome: the guard redirect or the welcome content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardView {
    Redirect { to: &'static str },
    Welcome { first_name: String },
}

/// Select the landing branch for the given session state.
#[must_use]
pub fn landing_view(principal: Option<Principal>) -> LandingView {
    match principal {
        Some(principal) => LandingView::Member { principal },
        None => LandingView::Visitor,
    }
}

/// Apply the dashboard guard: no principal redirects to sign-in, a principal
/// yields the welcome view. A principal without a first name greets with an
/// empty name, matching the upstream interpolation of an absent value.
#[must_use]
pub fn dashboard_view(principal: Option<Principal>) -> DashboardView {
    match principal {
        Some(principal) => DashboardView::Welcome {
            first_name: principal.first_name.unwrap_or_default(),
        },
        None => DashboardView::Redirect { to: SIGN_IN_PATH },
    }
}

// =============================================================================
// HTML RENDERING
// =============================================================================

/// Escape text for interpolation into HTML body or attribute positions.
#[must_use]
pub fn html_escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn visitor_nav() -> String {
    format!(
        r#"<a class="nav-action" href="{SIGN_IN_PATH}">Sign In</a>
      <a class="nav-action nav-action-primary" href="{SIGN_UP_PATH}">Get Started</a>"#
    )
}

fn member_nav(principal: &Principal) -> String {
    let avatar = principal
        .avatar_url
        .as_deref()
        .map(|url| format!(r#"<img class="avatar" src="{}" alt="">"#, html_escape(url)))
        .unwrap_or_default();
    format!(
        r#"<a class="nav-action nav-action-primary" href="{DASHBOARD_PATH}">Dashboard</a>
      <form class="account-menu" method="post" action="{SIGN_OUT_PATH}">{avatar}<button type="submit">Sign Out</button></form>"#
    )
}

fn visitor_hero_cta() -> String {
    format!(r#"<a class="hero-cta" href="{SIGN_UP_PATH}">Enter the Time Portal</a>"#)
}

/// Render the landing page for the selected branch.
#[must_use]
pub fn render_landing(view: &LandingView) -> String {
    let (nav_actions, hero_cta) = match view {
        LandingView::Visitor => (visitor_nav(), visitor_hero_cta()),
        LandingView::Member { principal } => (member_nav(principal), String::new()),
    };

    LANDING_TEMPLATE
        .replace("{{NAV_ACTIONS}}", &nav_actions)
        .replace("{{HERO_CTA}}", &hero_cta)
}

/// Render the dashboard welcome page for the given first name.
#[must_use]
pub fn render_dashboard_welcome(first_name: &str) -> String {
    DASHBOARD_TEMPLATE.replace("{{FIRST_NAME}}", &html_escape(first_name))
}

#[cfg(test)]
#[path = "view_test.rs"]
mod tests;
