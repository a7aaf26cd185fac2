//! Client-side state models.
//!
//! Plain data plus transition methods; views wrap them in signals.

pub mod auth;
pub mod auth_flow;
pub mod auth_form;
pub mod recorder;
pub mod theme;
