//! Transient user notifications.
//!
//! A notification is a `div.notification` holding an `h4` title and a `p`
//! message, appended to `<body>`. After a few seconds it gains the
//! `fade-out` class and is removed once the fade has played.

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use gloo_timers::callback::Timeout;

use crate::consts::{NOTIFICATION_FADE_MS, NOTIFICATION_VISIBLE_MS};
use crate::dom::{self, DomError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub message: String,
}

impl Notification {
    #[must_use]
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self { title: title.into(), message: message.into() }
    }

    /// Shown after a form was accepted.
    #[must_use]
    pub fn success() -> Self {
        Self::new("Success", "Your request was processed successfully")
    }

    /// Shown after a form submission failed.
    #[must_use]
    pub fn error() -> Self {
        Self::new("Error", "There was a problem processing your request")
    }

    /// Shown when the page's initial data could not be loaded.
    #[must_use]
    pub fn load_error() -> Self {
        Self::new("Error", "There was a problem loading data")
    }

    /// Append the notification to `<body>` and schedule its removal.
    ///
    /// Title and message are inserted as text, never parsed as HTML.
    ///
    /// # Errors
    ///
    /// Returns [`DomError`] if the document has no body or an element cannot
    /// be created.
    pub fn show(&self) -> Result<(), DomError> {
        let document = dom::document()?;
        let body = document.body().ok_or_else(|| DomError::ElementNotFound("body".to_owned()))?;

        let root = document.create_element("div").map_err(|e| DomError::js(&e))?;
        root.set_class_name("notification");
        let title = document.create_element("h4").map_err(|e| DomError::js(&e))?;
        title.set_text_content(Some(&self.title));
        let message = document.create_element("p").map_err(|e| DomError::js(&e))?;
        message.set_text_content(Some(&self.message));
        root.append_child(&title).map_err(|e| DomError::js(&e))?;
        root.append_child(&message).map_err(|e| DomError::js(&e))?;
        body.append_child(&root).map_err(|e| DomError::js(&e))?;

        Timeout::new(NOTIFICATION_VISIBLE_MS, move || {
            if let Err(e) = root.class_list().add_1("fade-out") {
                log::warn!("failed to fade notification: {e:?}");
            }
            Timeout::new(NOTIFICATION_FADE_MS, move || root.remove()).forget();
        })
        .forget();
        Ok(())
    }
}
