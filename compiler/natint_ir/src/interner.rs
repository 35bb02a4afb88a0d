//! String interner for type, namespace and member names.
//!
//! Interning is thread-safe: lookups take a read lock, inserts take the
//! write lock and re-check before inserting.

use std::ops::Deref;
use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::Name;

struct InternState {
    map: FxHashMap<&'static str, Name>,
    strings: Vec<&'static str>,
}

/// String interner with O(1) equality on the returned [`Name`]s.
pub struct StringInterner {
    state: RwLock<InternState>,
}

impl StringInterner {
    /// Create a new interner with the well-known names pre-interned.
    pub fn new() -> Self {
        let mut map = FxHashMap::default();
        map.insert("", Name::EMPTY);
        let interner = Self {
            state: RwLock::new(InternState {
                map,
                strings: vec![""],
            }),
        };
        for name in WELL_KNOWN {
            interner.intern(name);
        }
        interner
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if the interner exceeds `u32::MAX` strings.
    pub fn intern(&self, s: &str) -> Name {
        if let Some(&name) = self.state.read().map.get(s) {
            return name;
        }

        let mut guard = self.state.write();
        if let Some(&name) = guard.map.get(s) {
            return name;
        }

        let count = guard.strings.len();
        let raw = u32::try_from(count).unwrap_or_else(|_| {
            panic!("string interner exceeded capacity: {count} strings, max is {}", u32::MAX)
        });
        // Interned strings live as long as the process; names are handed
        // out as `'static` references.
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let name = Name::from_raw(raw);
        guard.strings.push(leaked);
        guard.map.insert(leaked, name);
        name
    }

    /// Look up the string for a Name.
    ///
    /// Names from another interner resolve to `"<unknown>"`.
    pub fn lookup(&self, name: Name) -> &'static str {
        self.state
            .read()
            .strings
            .get(name.index())
            .copied()
            .unwrap_or("<unknown>")
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.state.read().strings.len()
    }

    /// Check if only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

/// Names every type context needs; interned up front so the first lookup
/// of `System.IntPtr` never takes the write lock.
const WELL_KNOWN: &[&str] = &[
    "System",
    "IntPtr",
    "UIntPtr",
    "IEquatable",
    "Object",
    "String",
    "nint",
    "nuint",
    "Equals",
    "GetHashCode",
    "ToString",
    "value",
    "left",
    "right",
    "other",
];

/// Reference-counted interner shared between type contexts.
///
/// Retargeting maps names between contexts, which only works when both
/// contexts intern through the same `SharedInterner`.
#[derive(Clone, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a new shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &StringInterner {
        &self.0
    }
}
