use std::fmt;

/// Key addressing an entry inside a [`Node`](super::Node).
///
/// Strings holding the canonical decimal form of a non-negative integer are
/// normalized to [`Key::Index`], so `"3"` and `3` name the same entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Index(u64),
    Name(String),
}

impl Key {
    /// Returns true for the empty name, which `set` treats as an append.
    pub fn is_empty(&self) -> bool {
        matches!(self, Key::Name(name) if name.is_empty())
    }
}

/// Parses `s` as a canonical non-negative integer: no sign, no leading zeros.
fn canonical_index(s: &str) -> Option<u64> {
    let canonical = !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && (s == "0" || !s.starts_with('0'));
    if canonical {
        s.parse().ok()
    } else {
        None
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        match canonical_index(s) {
            Some(i) => Key::Index(i),
            None => Key::Name(s.to_string()),
        }
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        match canonical_index(&s) {
            Some(i) => Key::Index(i),
            None => Key::Name(s),
        }
    }
}

impl From<u64> for Key {
    fn from(i: u64) -> Self {
        Key::Index(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        match u64::try_from(i) {
            Ok(i) => Key::Index(i),
            Err(_) => Key::Name(i.to_string()),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{i}"),
            Key::Name(name) => f.write_str(name),
        }
    }
}
