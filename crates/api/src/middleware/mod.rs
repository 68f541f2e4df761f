//! Request-guard extractors.
//!
//! - [`csrf::CsrfProtected`] -- requires a valid anti-forgery token on
//!   mutating admin routes.

pub mod csrf;
