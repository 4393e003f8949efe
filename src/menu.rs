//! Mobile navigation menu state machine and nav-link helpers.
//!
//! The machine is pure so the component layer only has to translate DOM
//! events into [`MenuEvent`]s and derive side effects (toggle glyph, body
//! scroll lock) from the resulting state.

/// Widths above this are treated as desktop; a settled resize past it
/// force-closes the menu.
pub const DESKTOP_BREAKPOINT: f64 = 768.0;

/// Quiescence window before a resize counts as settled.
pub const RESIZE_DEBOUNCE_MS: u32 = 250;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum MenuEvent {
    /// The hamburger button was activated.
    ToggleActivated,
    /// A link inside the menu was activated.
    LinkActivated,
    /// A pointer interaction landed outside both the menu and the toggle.
    OutsidePointer,
    /// The viewport stopped resizing; `width` is the settled inner width.
    ResizeSettled { width: f64 },
}

impl MenuState {
    pub fn apply(self, event: MenuEvent) -> Self {
        match event {
            MenuEvent::ToggleActivated => match self {
                Self::Closed => Self::Open,
                Self::Open => Self::Closed,
            },
            MenuEvent::LinkActivated | MenuEvent::OutsidePointer => Self::Closed,
            MenuEvent::ResizeSettled { width } => {
                if width > DESKTOP_BREAKPOINT {
                    Self::Closed
                } else {
                    self
                }
            }
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Glyph shown on the toggle button.
    pub fn toggle_glyph(self) -> &'static str {
        match self {
            Self::Closed => "☰",
            Self::Open => "✕",
        }
    }

    /// Page scroll is suppressed while the menu is open.
    pub fn locks_scroll(self) -> bool {
        self.is_open()
    }
}

/// Final segment of a location path, with the original's empty-path default.
pub fn current_page(path: &str) -> &str {
    match path.rsplit('/').next() {
        Some("") | None => "index.html",
        Some(segment) => segment,
    }
}

/// Whether a page-style nav link target matches the current location.
pub fn link_is_active(path: &str, link_target: &str) -> bool {
    current_page(path) == link_target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state() {
        let state = MenuState::Closed.apply(MenuEvent::ToggleActivated);
        assert_eq!(state, MenuState::Open);
        assert_eq!(state.apply(MenuEvent::ToggleActivated), MenuState::Closed);
    }

    #[test]
    fn link_activation_closes_and_restores_glyph() {
        let state = MenuState::Open.apply(MenuEvent::LinkActivated);
        assert_eq!(state, MenuState::Closed);
        assert_eq!(state.toggle_glyph(), "☰");
        assert!(!state.locks_scroll());
    }

    #[test]
    fn outside_pointer_closes_but_is_noop_when_closed() {
        assert_eq!(
            MenuState::Open.apply(MenuEvent::OutsidePointer),
            MenuState::Closed
        );
        assert_eq!(
            MenuState::Closed.apply(MenuEvent::OutsidePointer),
            MenuState::Closed
        );
    }

    #[test]
    fn resize_to_desktop_closes_open_menu() {
        assert_eq!(
            MenuState::Open.apply(MenuEvent::ResizeSettled { width: 1024.0 }),
            MenuState::Closed
        );
    }

    #[test]
    fn resize_within_mobile_keeps_menu_open() {
        assert_eq!(
            MenuState::Open.apply(MenuEvent::ResizeSettled { width: 768.0 }),
            MenuState::Open
        );
        assert_eq!(
            MenuState::Open.apply(MenuEvent::ResizeSettled { width: 480.0 }),
            MenuState::Open
        );
    }

    #[test]
    fn open_menu_locks_scroll_and_shows_close_glyph() {
        assert!(MenuState::Open.locks_scroll());
        assert_eq!(MenuState::Open.toggle_glyph(), "✕");
    }

    #[test]
    fn current_page_takes_final_segment() {
        assert_eq!(current_page("/about.html"), "about.html");
        assert_eq!(current_page("/sites/demo/team.html"), "team.html");
    }

    #[test]
    fn current_page_defaults_to_index() {
        assert_eq!(current_page("/"), "index.html");
        assert_eq!(current_page(""), "index.html");
    }

    #[test]
    fn active_link_matches_by_segment() {
        assert!(link_is_active("/", "index.html"));
        assert!(link_is_active("/about.html", "about.html"));
        assert!(!link_is_active("/about.html", "index.html"));
    }
}
