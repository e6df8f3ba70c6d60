//! View navigation
//!
//! The application has three screens. A successful computation moves from
//! the input form to the results; the history is reached from the form;
//! both return to the form with "back".

use crate::presenter::DisplayPayload;

/// Screen currently shown
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Input,
    History,
    Results(DisplayPayload),
}

/// User action or outcome that may change the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    Computed(DisplayPayload),
    ShowHistory,
    Back,
}

impl View {
    /// Apply an event. Events with no transition from the current view
    /// leave it unchanged.
    pub fn handle(self, event: NavEvent) -> View {
        match (self, event) {
            (View::Input, NavEvent::Computed(payload)) => View::Results(payload),
            (View::Input, NavEvent::ShowHistory) => View::History,
            (View::History, NavEvent::Back) | (View::Results(_), NavEvent::Back) => View::Input,
            (view, _) => view,
        }
    }

    /// Route name, for logging
    pub fn route(&self) -> &'static str {
        match self {
            View::Input => "/",
            View::History => "/history",
            View::Results(_) => "/results",
        }
    }
}
