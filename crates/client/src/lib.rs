//! Client core for the Spesa expense tracker.
//!
//! A thin presentation-less client over a remote CRUD collection
//! store: the [`client::Client`] wraps the HTTP surface and maps every
//! failure into a closed taxonomy, the [`session::Session`] state
//! machine gates navigation, the [`view::ExpenseView`] derives what
//! the user sees from the fetched collection, and the
//! [`cache::ExpenseCache`] keeps the working copies with explicit
//! invalidation rules. [`app::App`] wires them together.

pub mod amount;
pub mod app;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod session;
pub mod stats;
pub mod validate;
pub mod view;

pub use app::{App, Route};
pub use error::{ApiError, AppError, Result};
