//! Error adapter for converting IsographError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error type
//! and miette's rich diagnostic formatting used in the CLI. Scene parse errors
//! carry their source text, so they are rendered with a labeled snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use isograph::IsographError;

/// Adapter implementing [`MietteDiagnostic`] for [`IsographError`].
pub struct ErrorAdapter<'a>(pub &'a IsographError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            IsographError::Io(_) => "isograph::io",
            IsographError::Parse { .. } => "isograph::parse",
            IsographError::UnknownElement(_) => "isograph::unknown_element",
            IsographError::DuplicateElement(_) => "isograph::duplicate_element",
            IsographError::InvalidElement(_) => "isograph::invalid_element",
            IsographError::InvalidStyle(_) => "isograph::invalid_style",
            IsographError::Config(_) => "isograph::config",
            IsographError::Export(_) => "isograph::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            IsographError::UnknownElement(_) => {
                "connections may only reference elements declared with [[element]]"
            }
            IsographError::DuplicateElement(_) => "every element needs a unique name",
            IsographError::InvalidElement(_) => {
                "platforms and components need `size`, databases need `radius` and `height`"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            IsographError::Parse { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let IsographError::Parse {
            message,
            span: Some(span),
            ..
        } = &self.0
        else {
            return None;
        };

        let label = LabeledSpan::new_primary_with_span(
            Some(message.clone()),
            SourceSpan::from(span.clone()),
        );
        Some(Box::new(std::iter::once(label)))
    }
}
