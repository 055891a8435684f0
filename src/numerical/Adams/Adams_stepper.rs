//! One step of the Adams predictor-corrector pair.
//!
//! A step runs through the phases
//! Idle -> EvaluatingCurrent -> Predicting -> ShiftingHistory -> Correcting -> Done:
//! f(x_i, y_i) is evaluated once, used by the Adams-Bashforth predictor and then pushed into the
//! history window that the Adams-Moulton corrector works with.
//! The caller owns the `HistoryWindow` and `IntegrationState` of a trajectory; both are replaced
//! only when the whole step succeeded.
use crate::numerical::Adams::Adams_coefficients::StepOrder;
use crate::numerical::Adams::Adams_corrector::{CorrectorSettings, correct};
use crate::numerical::Adams::Adams_error::{AdamsError, check_point, check_step_size, eval_rhs};
use crate::numerical::Adams::Adams_history::{HistoryWindow, bootstrap_history};
use crate::numerical::Adams::Adams_predictor::predict;
use log::{trace, warn};
use strum_macros::Display;

/// The two most recent solution samples and the abscissa of the latter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationState {
    pub x: f64,
    pub y_prev: f64,
    pub y_curr: f64,
}

impl IntegrationState {
    /// state at the first point; there is no earlier sample so y_prev = y
    pub fn new(x: f64, y: f64) -> IntegrationState {
        IntegrationState {
            x,
            y_prev: y,
            y_curr: y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum StepPhase {
    Idle,
    EvaluatingCurrent,
    Predicting,
    ShiftingHistory,
    Correcting,
    Done,
}

/// What one step produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub y_next: f64,
    /// Adams-Bashforth estimate the corrector started from
    pub y_predicted: f64,
    /// max_iterations + 1 when the corrector did not converge
    pub iterations_used: usize,
    pub converged: bool,
}

/// Result of the free function `step`: the outcome plus the updated window
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    pub y_next: f64,
    /// Adams-Bashforth estimate the corrector started from
    pub y_predicted: f64,
    pub iterations_used: usize,
    pub converged: bool,
    pub history: HistoryWindow,
}

fn enter(phase: StepPhase, x: f64) {
    trace!("step at x = {}: {}", x, phase);
}

/// evaluate -> predict -> shift -> correct; returns the outcome and the shifted window,
/// `history` itself is left untouched
fn advance<F>(
    order: &StepOrder,
    f: &F,
    x: f64,
    y: f64,
    h: f64,
    history: &HistoryWindow,
    settings: &CorrectorSettings,
) -> Result<(StepOutcome, HistoryWindow), AdamsError>
where
    F: Fn(f64, f64) -> f64 + ?Sized,
{
    enter(StepPhase::Idle, x);
    check_point(x, y)?;
    enter(StepPhase::EvaluatingCurrent, x);
    let f_current = eval_rhs(f, x, y)?;

    enter(StepPhase::Predicting, x);
    let y_predicted = predict(order, y, h, history, f_current)?;

    enter(StepPhase::ShiftingHistory, x);
    let shifted = history.clone().shift(f_current);

    enter(StepPhase::Correcting, x);
    let outcome = correct(order, f, y, x + h, h, &shifted, y_predicted, settings)?;
    if !outcome.converged {
        warn!(
            "Adams-Moulton corrector did not converge in {} iterations at x = {}, keeping last iterate {}",
            settings.max_iterations,
            x + h,
            outcome.value
        );
    }

    enter(StepPhase::Done, x);
    Ok((
        StepOutcome {
            y_next: outcome.value,
            y_predicted,
            iterations_used: outcome.iterations_used,
            converged: outcome.converged,
        },
        shifted,
    ))
}

/// Single predictor-corrector step from (x, y) with the given window.
/// Consumes the window and hands back the updated one.
#[allow(clippy::too_many_arguments)]
pub fn step<F>(
    order: &StepOrder,
    f: &F,
    x: f64,
    y: f64,
    h: f64,
    history: HistoryWindow,
    epsilon: f64,
    max_iterations: usize,
) -> Result<StepResult, AdamsError>
where
    F: Fn(f64, f64) -> f64 + ?Sized,
{
    check_step_size(h)?;
    let settings = CorrectorSettings::new(epsilon, max_iterations)?;
    let (outcome, history) = advance(order, f, x, y, h, &history, &settings)?;
    Ok(StepResult {
        y_next: outcome.y_next,
        y_predicted: outcome.y_predicted,
        iterations_used: outcome.iterations_used,
        converged: outcome.converged,
        history,
    })
}

/// Fixed-order stepper: one coefficient table, step size and corrector settings,
/// usable for any number of trajectories (also from several threads).
#[derive(Debug, Clone, Copy)]
pub struct AdamsStepper<'a> {
    order: &'a StepOrder,
    h: f64,
    settings: CorrectorSettings,
}

impl<'a> AdamsStepper<'a> {
    pub fn new(
        order: &'a StepOrder,
        h: f64,
        epsilon: f64,
        max_iterations: usize,
    ) -> Result<AdamsStepper<'a>, AdamsError> {
        check_step_size(h)?;
        let settings = CorrectorSettings::new(epsilon, max_iterations)?;
        Ok(AdamsStepper { order, h, settings })
    }

    pub fn order(&self) -> &'a StepOrder {
        self.order
    }

    pub fn h(&self) -> f64 {
        self.h
    }

    pub fn settings(&self) -> &CorrectorSettings {
        &self.settings
    }

    /// history from k-1 samples y(x0 + j*h)
    pub fn bootstrap<F>(&self, f: &F, y_samples: &[f64], x0: f64) -> Result<HistoryWindow, AdamsError>
    where
        F: Fn(f64, f64) -> f64 + ?Sized,
    {
        bootstrap_history(self.order, f, y_samples, x0, self.h)
    }

    /// From k samples y(x0 + j*h), j = 0..k-1: history from the first k-1, state at the last one
    pub fn start<F>(
        &self,
        f: &F,
        samples: &[f64],
        x0: f64,
    ) -> Result<(HistoryWindow, IntegrationState), AdamsError>
    where
        F: Fn(f64, f64) -> f64 + ?Sized,
    {
        let k = self.order.k();
        if samples.len() < k {
            return Err(AdamsError::InvalidArgument(format!(
                "starting a {}-step method needs {} samples (got {})",
                k,
                k,
                samples.len()
            )));
        }
        let history = self.bootstrap(f, &samples[..k - 1], x0)?;
        let state = IntegrationState {
            x: x0 + (k - 1) as f64 * self.h,
            y_prev: samples[k - 2],
            y_curr: samples[k - 1],
        };
        Ok((history, state))
    }

    /// Advances `state` by h. On error neither `state` nor `history` is modified.
    pub fn step<F>(
        &self,
        f: &F,
        state: &mut IntegrationState,
        history: &mut HistoryWindow,
    ) -> Result<StepOutcome, AdamsError>
    where
        F: Fn(f64, f64) -> f64 + ?Sized,
    {
        let (outcome, shifted) = advance(
            self.order,
            f,
            state.x,
            state.y_curr,
            self.h,
            history,
            &self.settings,
        )?;
        *history = shifted;
        *state = IntegrationState {
            x: state.x + self.h,
            y_prev: state.y_curr,
            y_curr: outcome.y_next,
        };
        Ok(outcome)
    }
}
