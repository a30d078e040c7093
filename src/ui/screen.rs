/// The three mutually exclusive screens of the application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    /// Carries the display-only name of the logged-in user.
    Home { username: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    OpenRegister,
    BackToLogin,
    LoggedIn(String),
    Logout,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavError {
    #[error("cannot apply {transition:?} on {screen:?} screen")]
    InvalidTransition {
        screen: Screen,
        transition: Transition,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    current: Screen,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            current: Screen::Login,
        }
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Screen {
        &self.current
    }

    /// Moves to the next screen. On error the current screen is kept.
    pub fn apply(&mut self, transition: Transition) -> Result<&Screen, NavError> {
        let next = match (&self.current, transition) {
            (Screen::Login, Transition::OpenRegister) => Screen::Register,
            (Screen::Register, Transition::BackToLogin) => Screen::Login,
            (Screen::Login, Transition::LoggedIn(username)) => Screen::Home { username },
            (Screen::Home { .. }, Transition::Logout) => Screen::Login,
            (screen, transition) => {
                return Err(NavError::InvalidTransition {
                    screen: screen.clone(),
                    transition,
                })
            }
        };
        tracing::debug!(from = ?self.current, to = ?next, "screen change");
        self.current = next;
        Ok(&self.current)
    }
}
