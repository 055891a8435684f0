use crate::numerical::Adams::Adams_coefficients::StepOrder;
use crate::numerical::Adams::Adams_error::{AdamsError, check_step_size, eval_rhs};
use crate::numerical::Adams::Adams_history::HistoryWindow;
use crate::numerical::Adams::Adams_predictor::check_window;
use log::{debug, trace};

/// Termination parameters of the Adams-Moulton fixed-point iteration.
/// `epsilon` is a tolerance on successive iterates, not an error bound of the solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrectorSettings {
    pub epsilon: f64,
    pub max_iterations: usize,
}

impl CorrectorSettings {
    pub fn new(epsilon: f64, max_iterations: usize) -> Result<CorrectorSettings, AdamsError> {
        let settings = CorrectorSettings {
            epsilon,
            max_iterations,
        };
        settings.check()?;
        Ok(settings)
    }

    pub fn check(&self) -> Result<(), AdamsError> {
        if self.max_iterations == 0 {
            return Err(AdamsError::InvalidArgument(
                "max_iterations must be at least 1".to_string(),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(AdamsError::InvalidArgument(format!(
                "epsilon must be finite and non-negative (got {})",
                self.epsilon
            )));
        }
        Ok(())
    }
}

/// Result of one corrector run
///
/// on success `iterations_used` is in 1..=max_iterations; when the budget is exhausted
/// `converged` is false, `iterations_used == max_iterations + 1` and `value` is the last iterate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvergenceOutcome {
    pub iterations_used: usize,
    pub value: f64,
    pub converged: bool,
}

/// Mixed convergence test: relative to |y1| when both |y0| > 1 and |y1| > 1, absolute otherwise.
/// Magnitude exactly 1.0 takes the absolute branch.
pub fn has_converged(y0: f64, y1: f64, epsilon: f64) -> bool {
    let tolerance = if y0.abs() > 1.0 && y1.abs() > 1.0 {
        epsilon * y1.abs()
    } else {
        epsilon
    };
    (y0 - y1).abs() < tolerance
}

/// Adams-Moulton corrector iterating
///
/// y_next = y_prev + h * divisor * (moulton[0] * f(x_next, y_current) + delta)
///
/// starting from `y_guess`. `history` holds f at x_next - (k-1)h .. x_next - h, the unknown
/// new point is not part of it; delta is the history-only part of the sum.
#[allow(clippy::too_many_arguments)]
pub fn correct<F>(
    order: &StepOrder,
    f: &F,
    y_prev: f64,
    x_next: f64,
    h: f64,
    history: &HistoryWindow,
    y_guess: f64,
    settings: &CorrectorSettings,
) -> Result<ConvergenceOutcome, AdamsError>
where
    F: Fn(f64, f64) -> f64 + ?Sized,
{
    check_step_size(h)?;
    check_window(order, history)?;
    settings.check()?;
    let moulton = order.moulton();
    let scale = h * order.divisor();
    // moulton[1] weights the newest history value
    let delta = moulton[1..]
        .iter()
        .zip(history.iter().rev())
        .fold(0.0, |acc, (m, f_past)| acc + m * f_past);

    let mut y_current = y_guess;
    for i in 0..settings.max_iterations {
        let y_next = y_prev + scale * (moulton[0] * eval_rhs(f, x_next, y_current)? + delta);
        trace!(
            "corrector iteration {}: {} -> {}",
            i + 1,
            y_current,
            y_next
        );
        if has_converged(y_current, y_next, settings.epsilon) {
            debug!("corrector converged in {} iterations at x = {}", i + 1, x_next);
            return Ok(ConvergenceOutcome {
                iterations_used: i + 1,
                value: y_next,
                converged: true,
            });
        }
        y_current = y_next;
    }
    debug!(
        "corrector exhausted {} iterations at x = {}",
        settings.max_iterations, x_next
    );
    Ok(ConvergenceOutcome {
        iterations_used: settings.max_iterations + 1,
        value: y_current,
        converged: false,
    })
}
