//! Mobile menu model: the markup contract and the visibility state machine.
//!
//! The wasm binder in `wayfare_web` stays thin; every decision it makes is
//! expressed here so it can be tested on the host.

/// Id of the button that opens the mobile menu.
pub const OPEN_TRIGGER_ID: &str = "mobile-menu-btn";
/// Id of the menu container whose visibility is toggled.
pub const MENU_CONTAINER_ID: &str = "mobile-menu";
/// Id of the button inside the menu that closes it.
pub const CLOSE_TRIGGER_ID: &str = "mobile-menu-close";

/// Class that hides the container while present on it.
pub const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuVisibility {
    /// Initial state, inherited from the markup.
    #[default]
    Hidden,
    Visible,
}

/// Activations the controller reacts to. Anything else on the page is not
/// this controller's business.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEvent {
    OpenActivated,
    CloseActivated,
    LinkActivated,
}

impl MenuVisibility {
    /// Target state after an activation.
    ///
    /// Total over both operands: redundant activations are self-loop no-ops,
    /// and the target depends only on the event, so an out-of-band class
    /// edit is simply overwritten on the next activation (last writer wins).
    pub fn apply(self, event: MenuEvent) -> MenuVisibility {
        match event {
            MenuEvent::OpenActivated => MenuVisibility::Visible,
            MenuEvent::CloseActivated | MenuEvent::LinkActivated => MenuVisibility::Hidden,
        }
    }

    pub fn is_hidden(self) -> bool {
        self == MenuVisibility::Hidden
    }
}

/// The three elements the controller needs before it installs anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuBinding<T> {
    pub open_trigger: T,
    pub container: T,
    pub close_trigger: T,
}

/// All-or-nothing presence check for the bind step.
///
/// A page variant without the mobile menu resolves to `None` and the caller
/// installs nothing; there is no partial binding and no error.
pub fn resolve_binding<T>(
    open_trigger: Option<T>,
    container: Option<T>,
    close_trigger: Option<T>,
) -> Option<MenuBinding<T>> {
    Some(MenuBinding {
        open_trigger: open_trigger?,
        container: container?,
        close_trigger: close_trigger?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(start: MenuVisibility, events: &[MenuEvent]) -> MenuVisibility {
        events.iter().fold(start, |state, &ev| state.apply(ev))
    }

    #[test]
    fn open_then_close_round_trip() {
        let state = MenuVisibility::default();
        assert!(state.is_hidden());

        let state = state.apply(MenuEvent::OpenActivated);
        assert_eq!(state, MenuVisibility::Visible);

        let state = state.apply(MenuEvent::CloseActivated);
        assert_eq!(state, MenuVisibility::Hidden);
    }

    #[test]
    fn open_is_idempotent() {
        let state = run(
            MenuVisibility::Hidden,
            &[MenuEvent::OpenActivated, MenuEvent::OpenActivated],
        );
        assert_eq!(state, MenuVisibility::Visible);
    }

    #[test]
    fn any_link_closes_from_visible() {
        // One link or five, the event is the same; a link's position in the
        // tree never enters the model.
        for link_count in [1usize, 5] {
            for _clicked in 0..link_count {
                let open = MenuVisibility::Hidden.apply(MenuEvent::OpenActivated);
                assert_eq!(open.apply(MenuEvent::LinkActivated), MenuVisibility::Hidden);
            }
        }
    }

    #[test]
    fn link_while_hidden_stays_hidden() {
        let state = MenuVisibility::Hidden.apply(MenuEvent::LinkActivated);
        assert_eq!(state, MenuVisibility::Hidden);
    }

    #[test]
    fn last_activation_wins() {
        let state = run(
            MenuVisibility::Hidden,
            &[
                MenuEvent::OpenActivated,
                MenuEvent::CloseActivated,
                MenuEvent::OpenActivated,
                MenuEvent::CloseActivated,
            ],
        );
        assert_eq!(state, MenuVisibility::Hidden);
    }

    #[test]
    fn binding_requires_all_three_elements() {
        assert!(resolve_binding(Some("open"), Some("menu"), Some("close")).is_some());

        // Missing open trigger: nothing binds even though the container and
        // close trigger are present.
        assert!(resolve_binding(None::<&str>, Some("menu"), Some("close")).is_none());
        assert!(resolve_binding(Some("open"), None, Some("close")).is_none());
        assert!(resolve_binding(Some("open"), Some("menu"), None).is_none());
    }

    #[test]
    fn markup_contract_is_stable() {
        // The ids and class are the public contract with the site markup.
        assert_eq!(OPEN_TRIGGER_ID, "mobile-menu-btn");
        assert_eq!(MENU_CONTAINER_ID, "mobile-menu");
        assert_eq!(CLOSE_TRIGGER_ID, "mobile-menu-close");
        assert_eq!(HIDDEN_CLASS, "hidden");
    }
}
