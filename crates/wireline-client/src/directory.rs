//! # Directory Entries and Permissions
//!
//! The account/directory identity values the service locator deals in, and
//! the bit-packed permission sets one entry holds over another.
//!
//! ## Identity Semantics
//!
//! A directory entry is identified by its id and kind; the name rides along
//! for display but takes no part in equality or hashing. Two entries with
//! the same id and kind are the same entry even if one side has not loaded
//! the name yet.

use std::fmt;

use serde_json::{json, Value};
use wireline_core::{BitIndex, EnumSet, FromJson, HashCode, HashKey, ToJson, WireError};

/// The kind of entry a directory holds.
///
/// Wire integers: `None` is `-1`, `Account` is `0`, `Directory` is `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntryType {
    /// No kind; the empty entry.
    #[default]
    None,
    /// A login-capable account.
    Account,
    /// A directory of other entries.
    Directory,
}

impl EntryType {
    /// The wire integer for this kind.
    pub fn to_wire(self) -> i32 {
        match self {
            EntryType::None => -1,
            EntryType::Account => 0,
            EntryType::Directory => 1,
        }
    }

    /// Decodes a wire integer; anything unrecognized is `None`.
    pub fn from_wire(value: i32) -> Self {
        match value {
            0 => EntryType::Account,
            1 => EntryType::Directory,
            _ => EntryType::None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryType::None => f.write_str("NONE"),
            EntryType::Account => f.write_str("ACCOUNT"),
            EntryType::Directory => f.write_str("DIRECTORY"),
        }
    }
}

/// An entry stored within a directory: an account or a directory.
///
/// The wire form is the object `{"type", "id", "name"}` with the kind as its
/// wire integer. `Default` is the empty entry (kind `None`, id `-1`).
#[derive(Debug, Clone)]
pub struct DirectoryEntry {
    /// The entry's kind.
    pub kind: EntryType,
    /// The unique id.
    pub id: i32,
    /// The display name. Not part of the entry's identity.
    pub name: String,
}

impl DirectoryEntry {
    /// Makes an account entry.
    pub fn make_account(id: i32, name: impl Into<String>) -> Self {
        DirectoryEntry {
            kind: EntryType::Account,
            id,
            name: name.into(),
        }
    }

    /// Makes a directory entry.
    pub fn make_directory(id: i32, name: impl Into<String>) -> Self {
        DirectoryEntry {
            kind: EntryType::Directory,
            id,
            name: name.into(),
        }
    }

    /// The root account, id 1. Equality is structural, so a freshly loaded
    /// root account compares equal to this value.
    pub fn root_account() -> Self {
        DirectoryEntry::make_account(1, "root")
    }

    /// The star directory, id 0, matching every directory.
    pub fn star_directory() -> Self {
        DirectoryEntry::make_directory(0, "*")
    }

    /// Hash of this entry: its id, matching peer implementations.
    pub fn hash_value(&self) -> i32 {
        self.id
    }
}

impl Default for DirectoryEntry {
    fn default() -> Self {
        DirectoryEntry {
            kind: EntryType::None,
            id: -1,
            name: String::new(),
        }
    }
}

impl PartialEq for DirectoryEntry {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.kind == other.kind
    }
}

impl Eq for DirectoryEntry {}

impl fmt::Display for DirectoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind == EntryType::None || self.id == -1 {
            return f.write_str("NONE");
        }
        write!(f, "({} {}", self.kind, self.id)?;
        if !self.name.is_empty() {
            write!(f, " {}", self.name)?;
        }
        f.write_str(")")
    }
}

impl ToJson for DirectoryEntry {
    fn to_json(&self) -> Value {
        json!({
            "type": self.kind.to_wire(),
            "id": self.id,
            "name": self.name,
        })
    }
}

impl FromJson for DirectoryEntry {
    fn from_json(value: &Value) -> Result<Self, WireError> {
        let object = value
            .as_object()
            .ok_or_else(|| WireError::mismatch("a directory entry object", value))?;
        let field = |name: &'static str| object.get(name).ok_or(WireError::MissingField(name));
        Ok(DirectoryEntry {
            kind: EntryType::from_wire(i32::from_json(field("type")?)?),
            id: i32::from_json(field("id")?)?,
            name: String::from_json(field("name")?)?,
        })
    }
}

impl HashKey for DirectoryEntry {
    fn hash_code(&self) -> HashCode {
        HashCode::Int(self.hash_value())
    }
}

/// A single right one directory entry may hold over another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// May read the target entry and its children.
    Read,
    /// May move the target entry between directories.
    Move,
    /// May administrate the target entry, including its permissions.
    Administrate,
}

impl BitIndex for Permission {
    fn bit_index(self) -> u32 {
        self as u32
    }
}

/// The rights one directory entry holds over another.
pub type Permissions = EnumSet<Permission>;
