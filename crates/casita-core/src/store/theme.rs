use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Dashboard color scheme.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Holds the current theme and notifies subscribers on change.
pub struct ThemeStore {
    theme: watch::Sender<Theme>,
}

impl ThemeStore {
    pub(crate) fn new() -> Self {
        let (theme, _) = watch::channel(Theme::default());
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        *self.theme.borrow()
    }

    pub fn set(&self, theme: Theme) {
        self.theme.send_modify(|t| *t = theme);
    }

    /// Flip between light and dark; returns the new theme.
    pub fn toggle(&self) -> Theme {
        let mut next = Theme::Light;
        self.theme.send_modify(|t| {
            *t = t.toggled();
            next = *t;
        });
        next
    }

    pub fn subscribe(&self) -> watch::Receiver<Theme> {
        self.theme.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        let store = ThemeStore::new();
        assert_eq!(store.theme(), Theme::Light);
        assert_eq!(store.toggle(), Theme::Dark);
        assert_eq!(store.toggle(), Theme::Light);
    }
}
