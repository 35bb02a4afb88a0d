//! Checker configuration.

use std::fmt;

/// Language version the checked program targets.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum LanguageVersion {
    V7_3,
    V8,
    V9,
    V10,
    V11,
}

impl LanguageVersion {
    /// First version with the `nint`/`nuint` keywords.
    pub const NATIVE_INTEGERS: Self = LanguageVersion::V9;

    pub const LATEST: Self = LanguageVersion::V11;

    #[inline]
    pub fn supports_native_integers(self) -> bool {
        self >= Self::NATIVE_INTEGERS
    }
}

impl Default for LanguageVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LanguageVersion::V7_3 => "7.3",
            LanguageVersion::V8 => "8.0",
            LanguageVersion::V9 => "9.0",
            LanguageVersion::V10 => "10.0",
            LanguageVersion::V11 => "11.0",
        };
        f.write_str(s)
    }
}

/// Whether integral arithmetic and conversions detect overflow.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum OverflowContext {
    #[default]
    Unchecked,
    Checked,
}

impl OverflowContext {
    #[inline]
    pub const fn is_checked(self) -> bool {
        matches!(self, OverflowContext::Checked)
    }
}

/// Options for one checking request.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct CheckOptions {
    pub language_version: LanguageVersion,
    pub overflow: OverflowContext,
    /// Pointer operations and `sizeof(nint)` are permitted.
    pub allow_unsafe: bool,
}

impl CheckOptions {
    /// Default options in a `checked` context.
    pub fn checked() -> Self {
        CheckOptions {
            overflow: OverflowContext::Checked,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_overflow(mut self, overflow: OverflowContext) -> Self {
        self.overflow = overflow;
        self
    }

    #[must_use]
    pub fn with_unsafe(mut self) -> Self {
        self.allow_unsafe = true;
        self
    }

    #[must_use]
    pub fn with_language_version(mut self, version: LanguageVersion) -> Self {
        self.language_version = version;
        self
    }
}
