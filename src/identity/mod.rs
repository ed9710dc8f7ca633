//! Identity - hosted provider boundary for sign-in, sessions, and principals.
//!
//! DESIGN
//! ======
//! The application consumes exactly one question from the identity provider
//! per page render: "which principal, if any, does this request's session
//! token name". Everything else (credential screens, session lifecycle,
//! account data) lives on the provider's side. The `IdentityProvider` trait
//! keeps the concrete vendor swappable and mockable; `HostedIdentity` is the
//! HTTP implementation against the provider's REST surface.

pub mod config;
pub mod hosted;
pub mod types;

pub use hosted::HostedIdentity;
pub use types::{AuthIntent, IdentityError, IdentityProvider, Principal};
