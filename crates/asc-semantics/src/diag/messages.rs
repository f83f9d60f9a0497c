// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright 2026 Tobias Sarnowski

//! Diagnostic codes and message templates.

use core::fmt;

use crate::config::Language;

/// Codes of the diagnostics this engine reports.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(u32)]
pub enum ErrorCode {
    /// Engine bug or unexpected state; message is passed verbatim.
    InternalError = 1,
    /// A name resolves to several namespaces.
    AmbiguousReference = 1000,
    /// A deferred namespace never resolved to a namespace value.
    UnknownNamespace = 1065,
    /// Implicit coercion between unrelated types.
    UnrelatedTypeCoercion = 1067,
    /// Implicit coercion to a possibly unrelated subtype.
    ImplicitCoercionToSubtype = 1118,
    /// A definition used from an API version that does not provide it.
    WrongVersion = 1197,
}

impl ErrorCode {
    /// Numeric code.
    #[inline]
    #[must_use]
    pub const fn as_u32(self) -> u32 {
        self as u32
    }

    /// Message template with `%s` placeholders.
    ///
    /// Only English ships; every language falls back to it.
    #[must_use]
    pub const fn template(self, language: Language) -> &'static str {
        let _ = language;
        match self {
            Self::InternalError => "%s",
            Self::AmbiguousReference => "Ambiguous reference to %s.",
            Self::UnknownNamespace => "Namespace was not found or is not a compile-time constant.",
            Self::UnrelatedTypeCoercion => {
                "Implicit coercion of a value of type %s to an unrelated type %s."
            }
            Self::ImplicitCoercionToSubtype => {
                "Implicit coercion of a value with static type %s to a possibly unrelated type %s."
            }
            Self::WrongVersion => "%s is not available in this version of the API.",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u32())
    }
}

/// Replaces each `%s` in `template` with the next argument.
///
/// Placeholders beyond the supplied arguments are replaced with nothing,
/// surplus arguments are ignored.
#[must_use]
pub fn substitute(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len() + args.iter().map(|a| a.len()).sum::<usize>());
    let mut args = args.iter();
    let mut rest = template;
    while let Some(at) = rest.find("%s") {
        out.push_str(&rest[..at]);
        if let Some(arg) = args.next() {
            out.push_str(arg);
        }
        rest = &rest[at + 2..];
    }
    out.push_str(rest);
    out
}

/// Formats a diagnostic message.
///
/// `sanity` yields the stable `code=N; arg1=..; arg2=..; arg3=..` form used
/// by test baselines. Otherwise the template is filled in, prefixed with
/// `[Compiler] Error #N: ` when `verbose` is set.
#[must_use]
pub fn format_message(
    code: ErrorCode,
    args: &[&str],
    language: Language,
    sanity: bool,
    verbose: bool,
) -> String {
    if sanity {
        let arg = |i: usize| args.get(i).copied().unwrap_or("");
        return format!(
            "code={}; arg1={}; arg2={}; arg3={}",
            code.as_u32(),
            arg(0),
            arg(1),
            arg(2)
        );
    }
    let body = substitute(code.template(language), args);
    if verbose {
        format!("[Compiler] Error #{}: {body}", code.as_u32())
    } else {
        body
    }
}
