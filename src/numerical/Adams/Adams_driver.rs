use crate::numerical::Adams::Adams_error::AdamsError;
use crate::numerical::Adams::Adams_stepper::AdamsStepper;
use log::{info, warn};
use rayon::prelude::*;

/// Grid values of one integrated trajectory, starting samples included
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// corrector iterations of every multistep step
    pub iterations: Vec<usize>,
    /// number of steps whose corrector ran out of iterations
    pub not_converged: usize,
}

/// Initial data of an independent trajectory: k samples y(x0 + j*h) and the number of steps to take
#[derive(Debug, Clone, PartialEq)]
pub struct TrajectoryProblem {
    pub x0: f64,
    pub samples: Vec<f64>,
    pub n_steps: usize,
}

/// Starts from k samples y(x0 + j*h) and performs `n_steps` predictor-corrector steps.
/// Steps that did not converge are counted and the last corrector iterate is kept.
pub fn integrate<F>(
    stepper: &AdamsStepper,
    f: &F,
    samples: &[f64],
    x0: f64,
    n_steps: usize,
) -> Result<Trajectory, AdamsError>
where
    F: Fn(f64, f64) -> f64 + ?Sized,
{
    let k = stepper.order().k();
    let (mut history, mut state) = stepper.start(f, samples, x0)?;
    let h = stepper.h();
    let mut x: Vec<f64> = (0..k).map(|j| x0 + j as f64 * h).collect();
    let mut y: Vec<f64> = samples[..k].to_vec();
    let mut iterations = Vec::with_capacity(n_steps);
    let mut not_converged = 0;
    x.reserve(n_steps);
    y.reserve(n_steps);

    for _ in 0..n_steps {
        let outcome = stepper.step(f, &mut state, &mut history)?;
        if !outcome.converged {
            not_converged += 1;
        }
        iterations.push(outcome.iterations_used);
        x.push(state.x);
        y.push(state.y_curr);
    }
    if not_converged > 0 {
        warn!(
            "{} of {} steps finished without corrector convergence",
            not_converged, n_steps
        );
    }
    Ok(Trajectory {
        x,
        y,
        iterations,
        not_converged,
    })
}

/// Independent trajectories in parallel. The coefficient table is shared read-only,
/// every trajectory owns its window and state. Results keep the order of `problems`.
pub fn integrate_many<F>(
    stepper: &AdamsStepper,
    f: &F,
    problems: &[TrajectoryProblem],
) -> Vec<Result<Trajectory, AdamsError>>
where
    F: Fn(f64, f64) -> f64 + Sync + ?Sized,
{
    info!(
        "integrating {} trajectories with the {}-step Adams method",
        problems.len(),
        stepper.order().k()
    );
    problems
        .par_iter()
        .map(|problem| integrate(stepper, f, &problem.samples, problem.x0, problem.n_steps))
        .collect()
}
