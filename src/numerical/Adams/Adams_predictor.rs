use crate::numerical::Adams::Adams_coefficients::StepOrder;
use crate::numerical::Adams::Adams_error::{AdamsError, check_step_size};
use crate::numerical::Adams::Adams_history::HistoryWindow;

/// history must be the k-1 window of this order
pub(crate) fn check_window(order: &StepOrder, history: &HistoryWindow) -> Result<(), AdamsError> {
    if history.len() != order.history_len() {
        return Err(AdamsError::InvalidArgument(format!(
            "{}-step method needs a history of {} values (got {})",
            order.k(),
            order.history_len(),
            history.len()
        )));
    }
    Ok(())
}

/// Adams-Bashforth estimate of y(x_i + h)
///
/// y_predicted = y_i + h * divisor * sum_j bashforth[j] * sample[k-1-j]
///
/// where the samples are the persisted window (oldest first) followed by `f_current` = f(x_i, y_i),
/// so bashforth[0] weights f(x_i, y_i) and bashforth[k-1] the oldest history entry.
pub fn predict(
    order: &StepOrder,
    y: f64,
    h: f64,
    history: &HistoryWindow,
    f_current: f64,
) -> Result<f64, AdamsError> {
    check_step_size(h)?;
    check_window(order, history)?;
    let bashforth = order.bashforth();
    let mut delta = bashforth[0] * f_current;
    // newest history entry first
    for (b, f_past) in bashforth[1..].iter().zip(history.iter().rev()) {
        delta += b * f_past;
    }
    Ok(y + h * order.divisor() * delta)
}
