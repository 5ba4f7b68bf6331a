use super::BrowserError;
use crate::dom;
use upsell_core::{NavigationConfig, Navigator};

/// Leaves the landing page for the confirmation view with a full page load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationNavigator {
    path: String,
}

impl LocationNavigator {
    #[must_use]
    pub fn new(config: &NavigationConfig) -> Self {
        Self {
            path: config.confirmation_path.clone(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl Navigator for LocationNavigator {
    type Error = BrowserError;

    fn advance(&self) -> Result<(), Self::Error> {
        let win = dom::window().ok_or(BrowserError::Unavailable("window"))?;
        win.location().set_href(&self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_path_from_config() {
        let nav = LocationNavigator::new(&NavigationConfig {
            confirmation_path: "thanks.html".to_string(),
        });
        assert_eq!(nav.path(), "thanks.html");
    }
}
