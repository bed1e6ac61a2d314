//! skysite: dynamic page composition for multi-tenant portfolio sites.
//!
//! ARCHITECTURE
//! ============
//! A page is an ordered list of component instances stored per organization.
//! [`composer::compose_page`] loads the page through a [`store::PageStore`],
//! filters instances by visibility and subscription tier, resolves the
//! organization's design theme into CSS variables, and renders each survivor
//! through the process-wide [`registry::registry`]. Unknown component keys
//! render as a diagnostic block instead of failing the page.

pub mod composer;
pub mod config;
pub mod editing;
pub mod error;
pub mod models;
pub mod registry;
pub mod render;
pub mod routes;
pub mod seed;
pub mod state;
pub mod store;
pub mod theme;
pub mod validator;
pub mod visibility;

#[cfg(test)]
pub mod test_helpers;

pub use composer::{ComposeError, ComposedPage, ViewerContext, compose_page};
pub use editing::{EditContext, EditError};
pub use store::{MemoryStore, PageStore, StoreError};
