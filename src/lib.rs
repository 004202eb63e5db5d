//! flower-capture library crate.
//!
//! Camera capture, square cropping, upload previews and submission to the
//! flower recognition backend. The binary in `main.rs` is a thin console
//! front-end over [`app::App`].

pub mod app;
pub mod camera;
pub mod cli;
pub mod config;
pub mod imaging;
pub mod submit;
pub mod ui;
pub mod view;
