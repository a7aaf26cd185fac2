//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser storage and routing concerns from page and
//! component logic so the rules stay testable without a DOM.

pub mod auth;
pub mod storage;
pub mod theme;
