// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Namespace kinds and API version markers.
//!
//! A namespace URI may end in a single code point from the Unicode private
//! use area. That trailing marker encodes the API version the namespace was
//! declared for: the version is the code point minus [`MIN_API_MARK`].

use core::fmt;

/// Lowest code point used as an API version marker.
pub const MIN_API_MARK: u32 = 0xE000;

/// Highest code point used as an API version marker.
pub const MAX_API_MARK: u32 = 0xF8FF;

/// Access kind of a namespace.
///
/// Namespaces with the same text but different kinds are distinct
/// identities. The discriminants are stable and used for ordering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum NamespaceKind {
    /// Public namespace; also the namespace of unqualified names.
    Public = 0,
    /// Package-internal namespace.
    Internal = 1,
    /// Class-private namespace.
    Private = 2,
    /// Instance-protected namespace.
    Protected = 3,
    /// User-declared namespace (`namespace foo = "..."`).
    Explicit = 4,
    /// Static-protected namespace.
    StaticProtected = 5,
}

impl NamespaceKind {
    /// All kinds in discriminant order.
    pub const ALL: [Self; 6] = [
        Self::Public,
        Self::Internal,
        Self::Private,
        Self::Protected,
        Self::Explicit,
        Self::StaticProtected,
    ];

    /// Converts a raw discriminant back to a kind.
    ///
    /// Returns `None` if `value` is not a valid discriminant.
    #[must_use]
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Self::Public),
            1 => Some(Self::Internal),
            2 => Some(Self::Private),
            3 => Some(Self::Protected),
            4 => Some(Self::Explicit),
            5 => Some(Self::StaticProtected),
            _ => None,
        }
    }

    /// Suffix appended to the namespace text in debug names.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Public | Self::Explicit => "",
            Self::Internal => "$internal",
            Self::Private => "$private",
            Self::Protected => "$protected",
            Self::StaticProtected => "$staticprotected",
        }
    }

    /// Returns true for the instance and static protected kinds.
    #[inline]
    #[must_use]
    pub const fn is_protected(self) -> bool {
        matches!(self, Self::Protected | Self::StaticProtected)
    }

    /// Lowercase name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Internal => "internal",
            Self::Private => "private",
            Self::Protected => "protected",
            Self::Explicit => "explicit",
            Self::StaticProtected => "static protected",
        }
    }
}

impl fmt::Display for NamespaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true if `c` is an API version marker.
#[inline]
#[must_use]
pub const fn is_api_mark(c: char) -> bool {
    let c = c as u32;
    c >= MIN_API_MARK && c <= MAX_API_MARK
}

/// Returns the API version encoded in the trailing marker of `uri`.
///
/// Returns `None` if `uri` is empty or does not end in a marker.
#[must_use]
pub fn api_version(uri: &str) -> Option<u32> {
    let last = uri.chars().next_back()?;
    is_api_mark(last).then(|| last as u32 - MIN_API_MARK)
}

/// Returns `uri` without its trailing version marker, if any.
#[must_use]
pub fn strip_version(uri: &str) -> &str {
    match uri.chars().next_back() {
        Some(last) if is_api_mark(last) => &uri[..uri.len() - last.len_utf8()],
        _ => uri,
    }
}

/// Returns `uri` with the marker for `version` appended.
///
/// Returns `None` if the version lies outside the marker range.
#[must_use]
pub fn with_version(uri: &str, version: u32) -> Option<String> {
    let mark = char::from_u32(MIN_API_MARK.checked_add(version)?).filter(|&c| is_api_mark(c))?;
    let mut out = String::with_capacity(uri.len() + mark.len_utf8());
    out.push_str(strip_version(uri));
    out.push(mark);
    Some(out)
}
