// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Per-compilation configuration.
//!
//! A [`CompilerConfig`] is fixed when a [`crate::Context`] is created. It
//! replaces the process-wide switches older compilers keep in shared
//! statics, so two contexts in one process can run with different settings.

use core::fmt;

use crate::error::SemanticsError;

/// ES3 dialect number.
pub const DIALECT_ES3: u32 = 9;

/// ActionScript 3 dialect number.
pub const DIALECT_AS3: u32 = 10;

/// Language used for localized diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Language {
    /// English.
    #[default]
    En,
    /// Simplified Chinese.
    Cn,
    /// Czech.
    Cs,
    /// Danish.
    Dk,
    /// German.
    De,
    /// Spanish.
    Es,
    /// Finnish.
    Fi,
    /// French.
    Fr,
    /// Italian.
    It,
    /// Japanese.
    Jp,
    /// Korean.
    Kr,
    /// Norwegian.
    No,
    /// Dutch.
    Nl,
    /// Polish.
    Pl,
    /// Brazilian Portuguese.
    Br,
    /// Russian.
    Ru,
    /// Swedish.
    Se,
    /// Turkish.
    Tr,
    /// Traditional Chinese.
    Tw,
}

impl Language {
    /// All supported languages.
    pub const ALL: [Self; 19] = [
        Self::En,
        Self::Cn,
        Self::Cs,
        Self::Dk,
        Self::De,
        Self::Es,
        Self::Fi,
        Self::Fr,
        Self::It,
        Self::Jp,
        Self::Kr,
        Self::No,
        Self::Nl,
        Self::Pl,
        Self::Br,
        Self::Ru,
        Self::Se,
        Self::Tr,
        Self::Tw,
    ];

    /// Parses a two-letter language code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`SemanticsError::UnknownLanguage`] for any other code.
    pub fn from_code(code: &str) -> Result<Self, SemanticsError> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| SemanticsError::UnknownLanguage(code.to_string()))
    }

    /// Returns the two-letter code of this language.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "EN",
            Self::Cn => "CN",
            Self::Cs => "CS",
            Self::Dk => "DK",
            Self::De => "DE",
            Self::Es => "ES",
            Self::Fi => "FI",
            Self::Fr => "FR",
            Self::It => "IT",
            Self::Jp => "JP",
            Self::Kr => "KR",
            Self::No => "NO",
            Self::Nl => "NL",
            Self::Pl => "PL",
            Self::Br => "BR",
            Self::Ru => "RU",
            Self::Se => "SE",
            Self::Tr => "TR",
            Self::Tw => "TW",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Switches controlling one compilation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct CompilerConfig {
    /// Static-semantics mode: enables coercion diagnostics.
    pub strict: bool,
    /// ES4 numerics: distinct `double`, `decimal`, decimal is numeric.
    pub numerics: bool,
    /// API version checking on bound slots.
    pub check_version: bool,
    /// Source dialect ([`DIALECT_ES3`] or [`DIALECT_AS3`]).
    pub dialect: u32,
    /// Target ABC version.
    pub abc_version: u32,
    /// Diagnostic language.
    pub language: Language,
    /// Report `code=N; arg1=..` instead of the message text.
    pub sanity_errors: bool,
    /// Prefix messages with `[Compiler] Error #N: `.
    pub verbose_errors: bool,
}

impl CompilerConfig {
    /// Creates the default configuration: AS3, non-strict, English.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            strict: false,
            numerics: false,
            check_version: false,
            dialect: DIALECT_AS3,
            abc_version: 0,
            language: Language::En,
            sanity_errors: false,
            verbose_errors: false,
        }
    }

    /// Sets static-semantics mode.
    #[must_use]
    pub const fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Sets ES4 numerics mode.
    #[must_use]
    pub const fn with_numerics(mut self, numerics: bool) -> Self {
        self.numerics = numerics;
        self
    }

    /// Sets API version checking.
    #[must_use]
    pub const fn with_check_version(mut self, check: bool) -> Self {
        self.check_version = check;
        self
    }

    /// Sets the source dialect.
    #[must_use]
    pub const fn with_dialect(mut self, dialect: u32) -> Self {
        self.dialect = dialect;
        self
    }

    /// Sets the target ABC version.
    #[must_use]
    pub const fn with_abc_version(mut self, version: u32) -> Self {
        self.abc_version = version;
        self
    }

    /// Sets the diagnostic language.
    #[must_use]
    pub const fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Sets sanity-style diagnostics.
    #[must_use]
    pub const fn with_sanity_errors(mut self, sanity: bool) -> Self {
        self.sanity_errors = sanity;
        self
    }

    /// Sets verbose diagnostics.
    #[must_use]
    pub const fn with_verbose_errors(mut self, verbose: bool) -> Self {
        self.verbose_errors = verbose;
        self
    }

    /// Returns true if compiling the given dialect.
    #[must_use]
    pub const fn dialect(&self, n: u32) -> bool {
        self.dialect == n
    }

    /// Returns true if the target ABC version is at least `n`.
    #[must_use]
    pub const fn abc_version_at_least(&self, n: u32) -> bool {
        self.abc_version >= n
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self::new()
    }
}
