use crate::numerical::Adams::Adams_error::{AdamsError, check_step_size, eval_rhs};
use log::debug;

/// classical 4th order Runge-Kutta step
pub fn rk4_step<F>(f: &F, x: f64, y: f64, h: f64) -> Result<f64, AdamsError>
where
    F: Fn(f64, f64) -> f64 + ?Sized,
{
    let k1 = h * eval_rhs(f, x, y)?;
    let k2 = h * eval_rhs(f, x + h / 2.0, y + k1 / 2.0)?;
    let k3 = h * eval_rhs(f, x + h / 2.0, y + k2 / 2.0)?;
    let k4 = h * eval_rhs(f, x + h, y + k3)?;
    Ok(y + (k1 + 2.0 * k2 + 2.0 * k3 + k4) / 6.0)
}

/// Starting values for a multistep method: `count` samples y(x0 + j*h), j = 0..count-1,
/// the first being y0. Every interval h is covered by `substeps` RK4 steps, high orders need
/// several substeps or the starter error dominates the multistep error.
pub fn rk4_starter<F>(
    f: &F,
    x0: f64,
    y0: f64,
    h: f64,
    count: usize,
    substeps: usize,
) -> Result<Vec<f64>, AdamsError>
where
    F: Fn(f64, f64) -> f64 + ?Sized,
{
    check_step_size(h)?;
    if count == 0 {
        return Err(AdamsError::InvalidArgument(
            "starter must produce at least one sample".to_string(),
        ));
    }
    if substeps == 0 {
        return Err(AdamsError::InvalidArgument(
            "starter needs at least one RK4 substep per step".to_string(),
        ));
    }
    if !y0.is_finite() {
        return Err(AdamsError::InvalidArgument(format!(
            "initial value must be finite (got {})",
            y0
        )));
    }
    let hs = h / substeps as f64;
    let mut samples = Vec::with_capacity(count);
    samples.push(y0);
    let mut y = y0;
    for j in 1..count {
        let x_start = x0 + (j - 1) as f64 * h;
        for s in 0..substeps {
            y = rk4_step(f, x_start + s as f64 * hs, y, hs)?;
        }
        samples.push(y);
    }
    debug!(
        "RK4 starter: {} samples from x = {} with h = {} ({} substeps)",
        count, x0, h, substeps
    );
    Ok(samples)
}
