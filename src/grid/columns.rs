//! Column visibility and display order
//!
//! Each list view declares its columns once; which of them are shown and in
//! what order is user state, persisted per view through a [`PrefsStore`].
//! Visibility and order are orthogonal: reordering never shows or hides a
//! column, and hiding never loses its place in the order.

use crate::grid::prefs::{PrefsStore, StoreError};

/// Static definition of one column
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Field key passed to `Row::field`
    pub key: String,
    /// Header text
    pub title: String,
    /// Shown when no stored preference exists
    pub default_visible: bool,
    /// Cannot be hidden by the user
    pub always_visible: bool,
    /// Optional tooltip/help text
    pub description: Option<String>,
}

impl ColumnDef {
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            default_visible: true,
            always_visible: false,
            description: None,
        }
    }

    /// Hidden until the user opts in
    pub fn hidden(mut self) -> Self {
        self.default_visible = false;
        self
    }

    /// Pinned: always shown, toggling is a no-op
    pub fn pinned(mut self) -> Self {
        self.always_visible = true;
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// Aggregate visibility over the togglable (non-pinned) columns
///
/// Drives a select-all checkbox: `Mixed` renders as indeterminate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAll {
    All,
    None,
    Mixed,
}

/// User-adjustable column state for one list view
pub struct ColumnLayout {
    columns: Vec<ColumnDef>,
    /// Display order over ALL configured keys
    order: Vec<String>,
    /// Currently visible keys
    visible: Vec<String>,
    storage_key: String,
    store: Box<dyn PrefsStore>,
}

impl ColumnLayout {
    /// Build a layout, restoring any persisted state for `storage_key`
    ///
    /// Stored keys that no longer exist in the configuration are dropped;
    /// configured keys missing from a stored order are appended in configured
    /// order; pinned columns are forced visible no matter what was stored.
    pub fn new(
        columns: Vec<ColumnDef>,
        storage_key: impl Into<String>,
        store: Box<dyn PrefsStore>,
    ) -> Self {
        let storage_key = storage_key.into();

        let mut layout = Self {
            visible: Vec::new(),
            order: Vec::new(),
            columns,
            storage_key,
            store,
        };

        layout.visible = match layout.store.load(&layout.visible_key()) {
            Some(stored) => layout.sanitize_visible(stored),
            None => layout.default_visible(),
        };
        layout.order = match layout.store.load(&layout.order_key()) {
            Some(stored) => layout.sanitize_order(stored),
            None => layout.configured_order(),
        };

        layout
    }

    fn visible_key(&self) -> String {
        format!("{}-visible-columns", self.storage_key)
    }

    fn order_key(&self) -> String {
        format!("{}-column-order", self.storage_key)
    }

    fn configured_order(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.key.clone()).collect()
    }

    fn default_visible(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.default_visible || c.always_visible)
            .map(|c| c.key.clone())
            .collect()
    }

    fn is_known(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.key == key)
    }

    fn is_pinned(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.key == key && c.always_visible)
    }

    /// Drop unknown keys, dedupe, and force pinned columns in
    fn sanitize_visible(&self, keys: Vec<String>) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for key in keys {
            if self.is_known(&key) && !out.contains(&key) {
                out.push(key);
            }
        }
        for col in self.columns.iter().filter(|c| c.always_visible) {
            if !out.contains(&col.key) {
                out.push(col.key.clone());
            }
        }
        out
    }

    /// Drop unknown keys, dedupe, and append missing ones in configured order
    fn sanitize_order(&self, keys: Vec<String>) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for key in keys {
            if self.is_known(&key) && !out.contains(&key) {
                out.push(key);
            }
        }
        for col in &self.columns {
            if !out.contains(&col.key) {
                out.push(col.key.clone());
            }
        }
        out
    }

    fn persist_visible(&mut self) -> Result<(), StoreError> {
        let key = self.visible_key();
        let values = self.visible.clone();
        self.store.save(&key, &values)
    }

    fn persist_order(&mut self) -> Result<(), StoreError> {
        let key = self.order_key();
        let values = self.order.clone();
        self.store.save(&key, &values)
    }

    /// All configured columns, in configured order
    pub fn defs(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Current display order over all configured keys
    pub fn order(&self) -> &[String] {
        &self.order
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.iter().any(|k| k == key)
    }

    /// Visible column definitions, in display order
    pub fn displayed(&self) -> Vec<&ColumnDef> {
        self.order
            .iter()
            .filter(|key| self.is_visible(key))
            .filter_map(|key| self.columns.iter().find(|c| &c.key == key))
            .collect()
    }

    /// Visible keys, in display order
    pub fn visible_keys(&self) -> Vec<String> {
        self.displayed().iter().map(|c| c.key.clone()).collect()
    }

    /// Flip one column; no-op for pinned or unknown keys
    pub fn toggle(&mut self, key: &str) -> Result<(), StoreError> {
        if !self.is_known(key) || self.is_pinned(key) {
            return Ok(());
        }
        if let Some(pos) = self.visible.iter().position(|k| k == key) {
            self.visible.remove(pos);
        } else {
            self.visible.push(key.to_string());
        }
        self.persist_visible()
    }

    /// Replace the visible set wholesale (pinned columns are forced back in)
    pub fn set_visible(&mut self, keys: Vec<String>) -> Result<(), StoreError> {
        self.visible = self.sanitize_visible(keys);
        self.persist_visible()
    }

    /// Show every configured column
    pub fn show_all(&mut self) -> Result<(), StoreError> {
        self.visible = self.configured_order();
        self.persist_visible()
    }

    /// Hide everything except pinned columns
    pub fn hide_all(&mut self) -> Result<(), StoreError> {
        self.visible = self
            .columns
            .iter()
            .filter(|c| c.always_visible)
            .map(|c| c.key.clone())
            .collect();
        self.persist_visible()
    }

    /// Change the display order; missing keys keep their configured position
    pub fn reorder(&mut self, new_order: Vec<String>) -> Result<(), StoreError> {
        self.order = self.sanitize_order(new_order);
        self.persist_order()
    }

    /// Back to the configured defaults, clearing stored state
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.visible = self.default_visible();
        self.order = self.configured_order();
        self.persist_visible()?;
        self.persist_order()
    }

    /// Aggregate state of the togglable columns, for a select-all control
    pub fn toggle_all_state(&self) -> ToggleAll {
        let togglable: Vec<_> = self.columns.iter().filter(|c| !c.always_visible).collect();
        let shown = togglable.iter().filter(|c| self.is_visible(&c.key)).count();

        if shown == togglable.len() {
            ToggleAll::All
        } else if shown == 0 {
            ToggleAll::None
        } else {
            ToggleAll::Mixed
        }
    }
}

impl std::fmt::Debug for ColumnLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnLayout")
            .field("storage_key", &self.storage_key)
            .field("visible", &self.visible)
            .field("order", &self.order)
            .finish()
    }
}
