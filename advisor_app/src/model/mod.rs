//! Presentation-side data model.
//!
//! This module groups the pieces the shell keeps between inputs and the value
//! it renders:
//! - `selection` — the two ticker choices currently made by the user.
//! - `command` — lines accepted by the interactive prompt.
//! - `render` — the pure request handler and its `RenderModel`.
pub mod command;
pub mod render;
pub mod selection;
