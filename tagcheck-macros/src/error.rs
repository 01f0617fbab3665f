//! Errors raised while reading `#[tag(...)]` attributes.

use proc_macro2::Span;

/// Error raised while reading field tags.
#[derive(Debug, Clone, thiserror::Error)]
pub enum TagError {
    /// The same tag name appears more than once on a field.
    #[error("duplicate tag `{name}`")]
    Duplicate {
        name: String,
        /// Span of the repeated tag's text.
        span: Span,
    },

    /// The attribute is not a list of `name = "text"` pairs.
    #[error(transparent)]
    Malformed(#[from] syn::Error),
}

impl TagError {
    pub fn duplicate(name: impl Into<String>, span: Span) -> Self {
        Self::Duplicate {
            name: name.into(),
            span,
        }
    }

    /// How to fix the error, when there is a single obvious fix.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Duplicate { .. } => Some("merge both check lists into one string"),
            Self::Malformed(_) => None,
        }
    }

    /// Convert to a syn::Error pointing at the offending tokens.
    pub fn into_syn_error(self) -> syn::Error {
        match self {
            Self::Duplicate { span, .. } => {
                let hint = self.hint().unwrap_or_default();
                syn::Error::new(span, format!("{self}: {hint}"))
            }
            Self::Malformed(error) => error,
        }
    }
}
