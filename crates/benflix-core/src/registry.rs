//! Active status widgets
//!
//! Append-only: widgets are registered when a display comes up and stay for
//! the life of the firmware.

use crate::error::StatusError;
use crate::widgets::StatusWidget;

/// Handle returned by [`WidgetRegistry::register`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

impl WidgetId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Fixed-capacity list of the widgets that receive status updates.
pub struct WidgetRegistry<const N: usize> {
    widgets: heapless::Vec<StatusWidget, N>,
}

impl<const N: usize> Default for WidgetRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> WidgetRegistry<N> {
    pub const fn new() -> Self {
        Self {
            widgets: heapless::Vec::new(),
        }
    }

    pub fn register(&mut self, widget: StatusWidget) -> Result<WidgetId, StatusError> {
        let id = WidgetId(self.widgets.len());
        self.widgets
            .push(widget)
            .map_err(|_| StatusError::RegistryFull { capacity: N })?;
        Ok(id)
    }

    pub fn get(&self, id: WidgetId) -> Option<&StatusWidget> {
        self.widgets.get(id.0)
    }

    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut StatusWidget> {
        self.widgets.get_mut(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusWidget> {
        self.widgets.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut StatusWidget> {
        self.widgets.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}
