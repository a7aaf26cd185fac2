//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render navigation, auth forms, route guards, and the recorder
//! while reading shared session and theme state from Leptos context providers.

pub mod audio_recorder;
pub mod auth_fields;
pub mod auth_modal;
pub mod navbar;
pub mod protected_route;
