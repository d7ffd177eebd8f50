use std::error::Error as StdError;

use thiserror::Error;

use crate::shape::ShapeError;

pub const SHAPE_MISMATCH_ID: &str = "Isoplot:contour:ShapeMismatch";
pub const INVALID_OPTION_ID: &str = "Isoplot:contour:InvalidOption";
pub const ENGINE_REJECTED_ID: &str = "Isoplot:contour:EngineRejected";

#[derive(Debug, Error, miette::Diagnostic)]
#[error("{message}")]
#[diagnostic(code(isoplot::runtime::error))]
pub struct PlotError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
    pub identifier: Option<String>,
    pub builtin: Option<String>,
}

pub type PlotResult<T> = Result<T, PlotError>;

impl PlotError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
            identifier: None,
            builtin: None,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub fn builtin(&self) -> Option<&str> {
        self.builtin.as_deref()
    }

    /// The shape violation behind this error, if validation produced it.
    pub fn shape_error(&self) -> Option<&ShapeError> {
        self.source.as_ref()?.downcast_ref::<ShapeError>()
    }

    pub fn format_diagnostic(&self) -> String {
        let mut lines = vec![format!("error: {}", self.message)];
        if let Some(identifier) = self.identifier.as_deref() {
            lines.push(format!("id: {identifier}"));
        }
        if let Some(builtin) = self.builtin.as_deref() {
            lines.push(format!("builtin: {builtin}"));
        }
        lines.join("\n")
    }
}

impl From<ShapeError> for PlotError {
    fn from(err: ShapeError) -> Self {
        // Keep the bare message: callers match on the literal text.
        plot_error(err.to_string())
            .with_identifier(SHAPE_MISMATCH_ID)
            .with_source(err)
            .build()
    }
}

pub struct PlotErrorBuilder {
    error: PlotError,
}

impl PlotErrorBuilder {
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.error.identifier = Some(identifier.into());
        self
    }

    pub fn with_builtin(mut self, builtin: impl Into<String>) -> Self {
        self.error.builtin = Some(builtin.into());
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.error.source = Some(Box::new(source));
        self
    }

    pub fn build(self) -> PlotError {
        self.error
    }
}

pub fn plot_error(message: impl Into<String>) -> PlotErrorBuilder {
    PlotErrorBuilder {
        error: PlotError::new(message),
    }
}

/// Option or argument error raised by a builtin; `message` already carries the prefix.
pub fn plotting_error(builtin: &str, message: impl Into<String>) -> PlotError {
    plot_error(message)
        .with_builtin(builtin)
        .with_identifier(INVALID_OPTION_ID)
        .build()
}

/// Shape violation raised while `builtin` validated its inputs.
pub fn shape_error(builtin: &str, err: ShapeError) -> PlotError {
    let mut error = PlotError::from(err);
    error.builtin = Some(builtin.to_string());
    error
}

/// Failure reported by the plot engine while recording a validated request.
pub fn engine_error(builtin: &str, message: String) -> PlotError {
    plot_error(format!("{builtin}: {message}"))
        .with_builtin(builtin)
        .with_identifier(ENGINE_REJECTED_ID)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_errors_keep_bare_message() {
        let err = shape_error(
            "contour",
            ShapeError::XLength {
                found: 9,
                expected: 10,
            },
        );
        assert_eq!(err.message(), "Length of x must be number of columns in z.");
        assert_eq!(err.to_string(), err.message());
        assert_eq!(err.identifier(), Some(SHAPE_MISMATCH_ID));
        assert_eq!(err.builtin(), Some("contour"));
        assert!(matches!(
            err.shape_error(),
            Some(ShapeError::XLength { found: 9, .. })
        ));
    }

    #[test]
    fn option_errors_have_no_shape_source() {
        let err = plotting_error("contourf", "contourf: level count must be positive");
        assert!(err.shape_error().is_none());
        assert_eq!(
            err.format_diagnostic(),
            "error: contourf: level count must be positive\nid: Isoplot:contour:InvalidOption\nbuiltin: contourf"
        );
    }
}
