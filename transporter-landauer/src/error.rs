//! # Error
//! The error type shared by the matrix kernel and the transport pipeline

use miette::Diagnostic;

#[derive(thiserror::Error, Debug, Diagnostic, Clone, PartialEq)]
/// Failures raised while building or evaluating a transport problem
pub enum TransportError {
    /// A matrix or chain was requested with an unusable size
    #[error("invalid dimension {dimension}: {reason}")]
    #[diagnostic(code(transporter::invalid_dimension))]
    InvalidDimension {
        /// The offending dimension
        dimension: usize,
        /// Why it was rejected
        reason: &'static str,
    },
    /// Two operands of a matrix operation differ in size
    #[error("dimension mismatch in {operation}: {left}x{left} and {right}x{right}")]
    #[diagnostic(code(transporter::dimension_mismatch))]
    DimensionMismatch {
        /// The operation which was attempted
        operation: &'static str,
        /// Dimension of the left operand
        left: usize,
        /// Dimension of the right operand
        right: usize,
    },
    /// A scalar input lies outside its physical domain
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    #[diagnostic(
        code(transporter::invalid_parameter),
        help("check the value passed for the named parameter")
    )]
    InvalidParameter {
        /// Name of the parameter
        name: String,
        /// The rejected value, formatted for display
        value: String,
        /// Why it was rejected
        reason: String,
    },
    /// The parameters are individually valid but do not form a usable device
    #[error("invalid configuration: {0}")]
    #[diagnostic(code(transporter::invalid_configuration))]
    InvalidConfiguration(String),
    /// Gauss-Jordan elimination could not find a usable pivot
    #[error("singular matrix: no pivot above {tolerance:e} in column {column} of a {dimension}x{dimension} system")]
    #[diagnostic(
        code(transporter::singular_matrix),
        help("a strictly positive broadening moves the poles of the Green's function off the real axis")
    )]
    SingularMatrix {
        /// The elimination column where the search failed
        column: usize,
        /// Dimension of the system
        dimension: usize,
        /// The pivot tolerance in use
        tolerance: f64,
    },
    /// A sweep was stopped through its cancellation flag
    #[error("sweep over `{parameter}` cancelled before value {value}")]
    #[diagnostic(code(transporter::cancelled))]
    Cancelled {
        /// The swept parameter
        parameter: String,
        /// The first value which was not computed
        value: f64,
    },
    /// A sweep ran past its deadline
    #[error("sweep over `{parameter}` exceeded its deadline before value {value}")]
    #[diagnostic(code(transporter::deadline_exceeded))]
    DeadlineExceeded {
        /// The swept parameter
        parameter: String,
        /// The first value which was not computed
        value: f64,
    },
    /// One point of a spectrum or a sweep failed, the cause is kept as the source
    #[error("calculation at `{parameter}` = {value} failed")]
    #[diagnostic(code(transporter::point_failed))]
    PointFailed {
        /// The quantity varied over the points
        parameter: String,
        /// Its value at the failing point
        value: f64,
        /// The error raised while evaluating the point
        #[source]
        source: Box<TransportError>,
    },
}

impl TransportError {
    pub(crate) fn at_point(self, parameter: impl Into<String>, value: f64) -> Self {
        Self::PointFailed {
            parameter: parameter.into(),
            value,
            source: Box::new(self),
        }
    }

    /// The underlying error, looking through any `PointFailed` wrapper
    pub fn root_cause(&self) -> &TransportError {
        match self {
            Self::PointFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub(crate) fn invalid_parameter(
        name: impl Into<String>,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Rejects NaN and infinite inputs
pub(crate) fn ensure_finite(name: &str, value: f64) -> Result<(), TransportError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(TransportError::invalid_parameter(
            name,
            value,
            "must be a finite number",
        ))
    }
}

/// Rejects negative, NaN and infinite inputs
pub(crate) fn ensure_non_negative(name: &str, value: f64) -> Result<(), TransportError> {
    ensure_finite(name, value)?;
    if value < 0. {
        return Err(TransportError::invalid_parameter(
            name,
            value,
            "must be non-negative",
        ));
    }
    Ok(())
}

/// Rejects zero, negative, NaN and infinite inputs
pub(crate) fn ensure_positive(name: &str, value: f64) -> Result<(), TransportError> {
    ensure_finite(name, value)?;
    if value <= 0. {
        return Err(TransportError::invalid_parameter(
            name,
            value,
            "must be strictly positive",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::TransportError;
    use std::error::Error;

    #[test]
    fn failed_points_name_their_value_and_keep_the_cause() {
        let cause = TransportError::SingularMatrix {
            column: 1,
            dimension: 2,
            tolerance: 0.,
        };
        let error = cause.clone().at_point("EF", -0.25);
        assert_eq!(error.to_string(), "calculation at `EF` = -0.25 failed");
        assert_eq!(error.root_cause(), &cause);
        assert_eq!(error.source().unwrap().to_string(), cause.to_string());
    }
}
