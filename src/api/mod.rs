//! Public entry points: the rendered form and the HTTP router serving it.

pub mod form;
pub mod http;

pub use http::{router, serve};
