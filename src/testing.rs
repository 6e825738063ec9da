//! Recording fakes shared by unit tests.

use std::cell::{Cell, RefCell};

use crate::style::{StyleError, StyleTarget};

/// A style target that records every write and reports fixed heights.
#[derive(Debug, Default)]
pub struct RecordingTarget {
    pub writes: RefCell<Vec<(String, String)>>,
    pub scroll_height: Cell<f64>,
    pub offset_height: Cell<f64>,
    pub fail_on: Option<String>,
}

impl RecordingTarget {
    pub fn with_heights(scroll_height: f64, offset_height: f64) -> Self {
        let target = Self::default();
        target.scroll_height.set(scroll_height);
        target.offset_height.set(offset_height);
        target
    }

    /// The most recent value written to `property`.
    pub fn last(&self, property: &str) -> Option<String> {
        self.writes
            .borrow()
            .iter()
            .rev()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
    }

    /// Every value written to `property`, oldest first.
    pub fn history(&self, property: &str) -> Vec<String> {
        self.writes
            .borrow()
            .iter()
            .filter(|(p, _)| p == property)
            .map(|(_, v)| v.clone())
            .collect()
    }
}

impl StyleTarget for RecordingTarget {
    fn set_style(&self, property: &str, value: &str) -> Result<(), StyleError> {
        if self.fail_on.as_deref() == Some(property) {
            return Err(StyleError { property: property.to_owned(), message: "rejected".to_owned() });
        }
        self.writes.borrow_mut().push((property.to_owned(), value.to_owned()));
        Ok(())
    }

    fn scroll_height(&self) -> f64 {
        self.scroll_height.get()
    }

    fn offset_height(&self) -> f64 {
        self.offset_height.get()
    }
}
