//! Router module - path matching, route resolution and navigation state
//!
//! This module contains the client-side routing core:
//!
//! - `matcher`: pure path-segment matching with `:param` wildcards
//! - `resolver`: the route table types and nested-route resolution
//! - `navigator`: current path, derived params and the history stack

pub mod matcher;
mod navigator;
mod resolver;

pub use navigator::Navigator;
pub use resolver::{resolve, LayoutKind, PageKind, ResolvedRoute, Route};
