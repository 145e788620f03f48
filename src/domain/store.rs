use crate::domain::callgraph::CallGraphNode;
use crate::domain::notification::Notification;
use crate::error::{Result, YukonError};

/// Notifications from one run of the analysis tool, indexable by position.
///
/// The collection is replaced wholesale on each run; indices are stable
/// until the next [`NotificationStore::replace_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationStore {
    notifications: Vec<Notification>,
}

impl NotificationStore {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    pub fn replace_all(&mut self, notifications: impl IntoIterator<Item = Notification>) {
        self.notifications = notifications.into_iter().collect();
    }

    /// Look up by position. A negative index (such as a UI's "nothing
    /// selected") is out of range rather than wrapped.
    pub fn get(&self, index: isize) -> Result<&Notification> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.notifications.get(i))
            .ok_or(YukonError::IndexOutOfRange {
                index,
                len: self.notifications.len(),
            })
    }

    /// Tree for the notification at `index`.
    pub fn call_tree(&self, index: isize) -> Result<Option<CallGraphNode>> {
        Ok(self.get(index)?.call_tree())
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.notifications.iter()
    }
}
