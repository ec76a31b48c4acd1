/// State management module
///
/// This module handles all application state, including:
/// - Filter parameter values (params.rs)
/// - The editing-screen state: source, filter, processed image (session.rs)
/// - Session settings persisted between runs (settings.rs)

pub mod params;
pub mod session;
pub mod settings;
