//! Column configuration and change notifications.
//!
//! Two pieces live here: the [`Settings`] store mapping column names to their
//! configured [`ColumnType`], and the [`ConfigEvents`] hub that delivers
//! change notifications to subscribed filters. Setting a column type emits a
//! `columns/<name>/type` key on the hub, the only key shape the filter engine
//! reacts to.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Declared type of a column, selecting the matcher that governs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Free-text column (substring / wildcard matching).
    Text,
    /// Byte-count column (comparisons with size suffixes).
    Size,
    /// Date column (comparisons over `YYYY-MM-DD`).
    Date,
}

/// Errors that can occur while loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error reading the settings file.
    #[error("failed to read settings file '{path}': {source}")]
    Read {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The settings document is not valid TOML.
    #[error("invalid settings document: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Serialized form of the settings document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SettingsDoc {
    #[serde(default)]
    columns: BTreeMap<String, ColumnType>,
}

/// Mutable column configuration with change notifications.
pub struct Settings {
    columns: RefCell<BTreeMap<String, ColumnType>>,
    events: ConfigEvents,
}

impl Default for Settings {
    fn default() -> Self {
        Self::new()
    }
}

impl Settings {
    /// Creates settings with the default column layout.
    pub fn new() -> Self {
        let mut columns = BTreeMap::new();
        columns.insert("name".to_string(), ColumnType::Text);
        columns.insert("ext".to_string(), ColumnType::Text);
        columns.insert("owner".to_string(), ColumnType::Text);
        columns.insert("size".to_string(), ColumnType::Size);
        columns.insert("modified".to_string(), ColumnType::Date);
        Self {
            columns: RefCell::new(columns),
            events: ConfigEvents::new(),
        }
    }

    /// Parses settings from a TOML document.
    ///
    /// An empty document means no columns are configured.
    pub fn from_toml(document: &str) -> Result<Self, SettingsError> {
        let doc: SettingsDoc = toml::from_str(document)?;
        Ok(Self {
            columns: RefCell::new(doc.columns),
            events: ConfigEvents::new(),
        })
    }

    /// Loads settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&document)
    }

    /// The configured type of a column, if any.
    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns.borrow().get(name).copied()
    }

    /// Names of all configured columns.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.borrow().keys().cloned().collect()
    }

    /// Sets (or adds) a column's type and emits `columns/<name>/type`.
    pub fn set_column_type(&self, name: &str, column_type: ColumnType) {
        self.columns
            .borrow_mut()
            .insert(name.to_string(), column_type);
        self.events.notify(&format!("columns/{name}/type"));
    }

    /// The change-notification hub filters subscribe to.
    pub fn events(&self) -> &ConfigEvents {
        &self.events
    }
}

type Listener = Box<dyn Fn(&str)>;

/// Synchronous configuration-change notification hub.
///
/// Listeners run on the notifying thread, in subscription order. Callbacks
/// must not subscribe or unsubscribe from within a notification.
pub struct ConfigEvents {
    inner: Rc<EventsInner>,
}

struct EventsInner {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<(u64, Listener)>>,
}

impl Default for ConfigEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigEvents {
    /// Creates an empty hub.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(EventsInner {
                next_id: Cell::new(0),
                listeners: RefCell::new(Vec::new()),
            }),
        }
    }

    /// Registers a listener for changed configuration keys.
    ///
    /// The listener is removed when the returned [`Subscription`] is dropped.
    pub fn subscribe(&self, listener: impl Fn(&str) + 'static) -> Subscription {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Box::new(listener)));
        Subscription {
            id,
            events: Rc::downgrade(&self.inner),
        }
    }

    /// Delivers a changed key to all listeners.
    pub fn notify(&self, key: &str) {
        for (_, listener) in self.inner.listeners.borrow().iter() {
            listener(key);
        }
    }
}

/// RAII guard for a [`ConfigEvents`] subscription.
///
/// Dropping the guard unsubscribes the listener; dropping it after the hub
/// itself is gone is a no-op.
pub struct Subscription {
    id: u64,
    events: Weak<EventsInner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(events) = self.events.upgrade() {
            events
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
