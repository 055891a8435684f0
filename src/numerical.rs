/// Adams-Bashforth / Adams-Moulton predictor-corrector methods of fixed order
/// Example
/// ```
/// use RustedAdams::numerical::Adams::{AdamsOrder, AdamsStepper};
/// use RustedAdams::numerical::Adams::Adams_driver::integrate;
/// // y' = y, y(0) = 1, starting samples taken from the exact solution
/// let order = AdamsOrder::Order12.step_order();
/// let h = 0.1;
/// let stepper = AdamsStepper::new(&order, h, 1e-12, 50).unwrap();
/// let samples: Vec<f64> = (0..12).map(|j| (j as f64 * h).exp()).collect();
/// let f = |_x: f64, y: f64| y;
/// let trajectory = integrate(&stepper, &f, &samples, 0.0, 8).unwrap();
/// let x_end = *trajectory.x.last().unwrap();
/// let y_end = *trajectory.y.last().unwrap();
/// assert!((y_end - x_end.exp()).abs() < 1e-9);
/// ```
pub mod Adams;
