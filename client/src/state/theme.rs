//! Theme context shared by every page.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

/// Current color scheme. Provided as `RwSignal<ThemeState>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ThemeState {
    pub dark: bool,
}

impl ThemeState {
    /// Root class for page wrappers.
    pub fn class(self) -> &'static str {
        if self.dark { "theme-dark" } else { "theme-light" }
    }

    pub fn toggle_label(self) -> &'static str {
        if self.dark { "Switch to light mode" } else { "Switch to dark mode" }
    }
}
