//! Method keys.
//!
//! A [`MethodKey`] names one observed operation, conventionally
//! `"<declaring type>#<member>"`. Keys are compared by exact string equality
//! and ordered lexicographically, which is the tie-break used by the report.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Immutable, cheaply clonable identifier of an observed operation.
///
/// Clones share the same allocation, so every [`CallRecord`](crate::record::CallRecord)
/// can carry its key without copying the string.
///
/// # Examples
///
/// ```rust
/// use chiamate::key::MethodKey;
///
/// let key = MethodKey::method("billing::Invoice", "total");
/// assert_eq!(key.as_str(), "billing::Invoice#total");
/// assert_eq!(key, MethodKey::from("billing::Invoice#total"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MethodKey(Arc<str>);

impl MethodKey {
    /// Separator placed between the declaring type and the member name.
    pub const SEPARATOR: char = '#';

    /// Creates a key from an arbitrary identifier.
    pub fn new(key: impl Into<Arc<str>>) -> Self {
        MethodKey(key.into())
    }

    /// Creates a `"<type>#<member>"` key.
    pub fn method(type_name: &str, member: &str) -> Self {
        let mut key = String::with_capacity(type_name.len() + member.len() + 1);
        key.push_str(type_name);
        key.push(Self::SEPARATOR);
        key.push_str(member);
        MethodKey(key.into())
    }

    /// Returns the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Splits the key into declaring type and member, if it has the
    /// `"<type>#<member>"` shape.
    pub fn split(&self) -> Option<(&str, &str)> {
        self.0.rsplit_once(Self::SEPARATOR)
    }
}

impl fmt::Display for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for MethodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl Borrow<str> for MethodKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MethodKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MethodKey {
    fn from(key: &str) -> Self {
        MethodKey(key.into())
    }
}

impl From<String> for MethodKey {
    fn from(key: String) -> Self {
        MethodKey(key.into())
    }
}

impl From<&MethodKey> for MethodKey {
    fn from(key: &MethodKey) -> Self {
        key.clone()
    }
}
