use indexmap::IndexSet;
use serde::{Deserialize, Deserializer, Serialize};

/// Characters that separate codes in free-text input.
const DELIMITERS: [char; 3] = ['\n', '\r', ','];

/// Ordered, duplicate-free set of tag codes.
///
/// Iteration order is insertion order, which is also display order. Every
/// entry is trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct CodeSet {
    inner: IndexSet<String>,
}

impl CodeSet {
    pub fn new() -> Self {
        CodeSet {
            inner: IndexSet::new(),
        }
    }

    /// Normalize free text into a code set.
    ///
    /// Splits on newlines, carriage returns and commas in any mixture, trims
    /// each token, drops empty tokens and keeps the first occurrence of
    /// duplicates.
    pub fn parse(raw: &str) -> Self {
        Self::from_codes(raw.split(DELIMITERS))
    }

    /// Build from already-split tokens, applying the same trimming and dedupe.
    pub fn from_codes<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = CodeSet::new();
        for code in codes {
            set.insert(code.as_ref());
        }
        set
    }

    /// Insert a code. Returns false if it was blank or already present.
    pub fn insert(&mut self, code: &str) -> bool {
        let code = code.trim();
        if code.is_empty() || self.inner.contains(code) {
            return false;
        }
        self.inner.insert(code.to_string())
    }

    /// Remove a code, keeping the relative order of the rest.
    pub fn remove(&mut self, code: &str) -> bool {
        self.inner.shift_remove(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.inner.contains(code)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.iter().map(String::as_str)
    }

    /// True if at least one code is shared with `other`.
    pub fn intersects(&self, other: &CodeSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small.iter().any(|code| large.contains(code))
    }

    /// Codes of `self` missing from `other`, in `self` order.
    pub fn difference(&self, other: &CodeSet) -> Vec<String> {
        self.iter()
            .filter(|code| !other.contains(code))
            .map(str::to_string)
            .collect()
    }

    /// Codes joined with newlines, the form used for storage and relaying.
    pub fn join_lines(&self) -> String {
        self.iter().collect::<Vec<_>>().join("\n")
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.inner.iter().cloned().collect()
    }
}

// Deserialization goes through `from_codes` so persisted or client-supplied
// lists can never smuggle in blanks or duplicates.
impl<'de> Deserialize<'de> for CodeSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let codes = Vec::<String>::deserialize(deserializer)?;
        Ok(CodeSet::from_codes(codes))
    }
}

impl<'a> FromIterator<&'a str> for CodeSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        CodeSet::from_codes(iter)
    }
}
