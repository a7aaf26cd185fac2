//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns route-scoped orchestration and delegates rendering details
//! to `components`.

pub mod about;
pub mod auth_callback;
pub mod dashboard;
pub mod landing;
pub mod login;
pub mod new_lecture;
pub mod signup;
