use crate::numerical::Adams::Adams_coefficients::StepOrder;
use crate::numerical::Adams::Adams_error::{AdamsError, check_step_size, eval_rhs};
use log::debug;
use std::collections::VecDeque;

/// Sliding window of the k-1 most recent derivative evaluations.
/// index 0 is the oldest retained f(x, y), index k-2 the most recent one.
/// One window belongs to one trajectory.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryWindow {
    values: VecDeque<f64>,
}

impl HistoryWindow {
    /// window from already known derivative values, oldest first
    pub fn from_values(order: &StepOrder, values: Vec<f64>) -> Result<HistoryWindow, AdamsError> {
        if values.len() != order.history_len() {
            return Err(AdamsError::InvalidArgument(format!(
                "history of a {}-step method holds {} values (got {})",
                order.k(),
                order.history_len(),
                values.len()
            )));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(AdamsError::InvalidArgument(
                "history contains non-finite derivative values".to_string(),
            ));
        }
        Ok(HistoryWindow {
            values: VecDeque::from(values),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<f64> {
        self.values.get(i).copied()
    }

    pub fn oldest(&self) -> Option<f64> {
        self.values.front().copied()
    }

    pub fn newest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// oldest to newest
    pub fn iter(&self) -> std::collections::vec_deque::Iter<'_, f64> {
        self.values.iter()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    /// append a new most recent value and evict the oldest one; the length stays k-1
    pub fn push_newest(&mut self, value: f64) {
        self.values.pop_front();
        self.values.push_back(value);
    }

    /// consuming form of `push_newest`
    pub fn shift(mut self, value: f64) -> HistoryWindow {
        self.push_newest(value);
        self
    }
}

/// Seeds the history from known solution samples y_samples[j] = y(x0 + j*h):
/// history[j] = f(x0 + j*h, y_samples[j]) for j = 0..k-2, oldest first.
/// Only the first k-1 samples are used.
pub fn bootstrap_history<F>(
    order: &StepOrder,
    f: &F,
    y_samples: &[f64],
    x0: f64,
    h: f64,
) -> Result<HistoryWindow, AdamsError>
where
    F: Fn(f64, f64) -> f64 + ?Sized,
{
    check_step_size(h)?;
    let n = order.history_len();
    if y_samples.len() < n {
        return Err(AdamsError::InvalidArgument(format!(
            "{}-step method needs {} bootstrap samples (got {})",
            order.k(),
            n,
            y_samples.len()
        )));
    }
    if y_samples.len() > n {
        debug!(
            "bootstrap_history: {} samples supplied, using the first {}",
            y_samples.len(),
            n
        );
    }
    let mut values = VecDeque::with_capacity(n);
    for (j, &y) in y_samples.iter().take(n).enumerate() {
        let x = x0 + j as f64 * h;
        values.push_back(eval_rhs(f, x, y)?);
    }
    Ok(HistoryWindow { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::Adams::Adams_coefficients::AdamsOrder;

    #[test]
    fn test_shift_evicts_oldest() {
        let order = AdamsOrder::Order4.step_order();
        let window = HistoryWindow::from_values(&order, vec![1.0, 2.0, 3.0]).unwrap();
        let window = window.shift(4.0);
        assert_eq!(window.to_vec(), vec![2.0, 3.0, 4.0]);
        assert_eq!(window.len(), 3);
        assert_eq!(window.oldest(), Some(2.0));
        assert_eq!(window.newest(), Some(4.0));
    }

    #[test]
    fn test_from_values_checks_length() {
        let order = AdamsOrder::Order12.step_order();
        assert!(HistoryWindow::from_values(&order, vec![0.0; 11]).is_ok());
        assert!(matches!(
            HistoryWindow::from_values(&order, vec![0.0; 12]),
            Err(AdamsError::InvalidArgument(_))
        ));
        assert!(HistoryWindow::from_values(&order, vec![f64::NAN; 11]).is_err());
    }

    #[test]
    fn test_bootstrap_order_and_values() {
        let order = AdamsOrder::Order4.step_order();
        let f = |x: f64, y: f64| 10.0 * x + y;
        let window = bootstrap_history(&order, &f, &[1.0, 2.0, 3.0], 0.0, 0.5).unwrap();
        assert_eq!(window.to_vec(), vec![1.0, 7.0, 13.0]);
    }
}
