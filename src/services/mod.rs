//! Request-side services supporting the page and auth routes.

pub mod session;
