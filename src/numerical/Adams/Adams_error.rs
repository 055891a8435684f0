use std::fmt;

/// Error types for the Adams predictor-corrector methods
///
/// Failure of the corrector to converge is not an error: it is reported through
/// `ConvergenceOutcome::converged` and the integration may go on with the last iterate.
#[derive(Debug, Clone, PartialEq)]
pub enum AdamsError {
    /// precondition violated: too few bootstrap samples, h == 0, zero iteration budget, bad table...
    InvalidArgument(String),
    /// f(x, y) returned NaN or infinity
    NumericDivergence { x: f64, y: f64, value: f64 },
}

impl fmt::Display for AdamsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AdamsError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            AdamsError::NumericDivergence { x, y, value } => write!(
                f,
                "Numeric divergence: f({}, {}) returned non-finite value {}",
                x, y, value
            ),
        }
    }
}

impl std::error::Error for AdamsError {}

/// evaluate the right hand side and refuse NaN/inf results
pub fn eval_rhs<F>(f: &F, x: f64, y: f64) -> Result<f64, AdamsError>
where
    F: Fn(f64, f64) -> f64 + ?Sized,
{
    let value = f(x, y);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AdamsError::NumericDivergence { x, y, value })
    }
}

/// step size must be a finite non-zero number
pub fn check_step_size(h: f64) -> Result<(), AdamsError> {
    if h == 0.0 || !h.is_finite() {
        return Err(AdamsError::InvalidArgument(format!(
            "step size h must be finite and non-zero (got {})",
            h
        )));
    }
    Ok(())
}

/// integration point must be finite
pub fn check_point(x: f64, y: f64) -> Result<(), AdamsError> {
    if !x.is_finite() || !y.is_finite() {
        return Err(AdamsError::InvalidArgument(format!(
            "integration point must be finite (got x = {}, y = {})",
            x, y
        )));
    }
    Ok(())
}
