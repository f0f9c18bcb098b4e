//! Interned string handles
//!
//! Event sender and event names are carried as [`StringId`] handles instead
//! of strings. The handle is resolved through a [`StringResolver`] that the
//! caller passes in; there is no process-wide table.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an interned string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StringId(u32);

impl StringId {
    /// Handle that resolves to nothing
    pub const INVALID: StringId = StringId(u32::MAX);

    /// Wrap a raw handle value
    pub const fn from_raw(raw: u32) -> Self {
        StringId(raw)
    }

    /// Raw handle value
    pub const fn as_raw(&self) -> u32 {
        self.0
    }

    /// Whether this is not [`StringId::INVALID`]
    pub const fn is_valid(&self) -> bool {
        self.0 != u32::MAX
    }
}

impl Default for StringId {
    fn default() -> Self {
        StringId::INVALID
    }
}

impl fmt::Display for StringId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "#{}", self.0)
        } else {
            f.write_str("#invalid")
        }
    }
}

/// Two-way mapping between strings and handles
pub trait StringResolver {
    /// Handle for `name`, registering it if unknown
    fn intern(&mut self, name: &str) -> StringId;

    /// Handle for `name` if already registered
    fn lookup(&self, name: &str) -> Option<StringId>;

    /// String behind `id`
    fn resolve(&self, id: StringId) -> Option<&str>;
}

/// In-memory string table
#[derive(Debug, Default, Clone)]
pub struct StringTable {
    names: Vec<String>,
    ids: FxHashMap<String, StringId>,
}

impl StringTable {
    /// Empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered strings
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no string is registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl StringResolver for StringTable {
    fn intern(&mut self, name: &str) -> StringId {
        if let Some(id) = self.ids.get(name) {
            return *id;
        }
        let id = StringId(self.names.len() as u32);
        self.names.push(name.to_string());
        self.ids.insert(name.to_string(), id);
        id
    }

    fn lookup(&self, name: &str) -> Option<StringId> {
        self.ids.get(name).copied()
    }

    fn resolve(&self, id: StringId) -> Option<&str> {
        if !id.is_valid() {
            return None;
        }
        self.names.get(id.0 as usize).map(String::as_str)
    }
}
