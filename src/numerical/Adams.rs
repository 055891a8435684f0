/// errors of the Adams methods and the checked evaluation of f(x, y)
pub mod Adams_error;
/// Adams-Bashforth / Adams-Moulton coefficient tables (4, 12, 16 and 20 steps)
pub mod Adams_coefficients;
/// sliding window of past derivative values and its bootstrap from known samples
pub mod Adams_history;
/// explicit Adams-Bashforth predictor
pub mod Adams_predictor;
/// implicit Adams-Moulton corrector (fixed-point iteration) and its convergence test
pub mod Adams_corrector;
/// one predictor-corrector step
pub mod Adams_stepper;
/// RK4 starter producing the first k samples
pub mod Adams_starter;
/// loops over steps for one or many trajectories
pub mod Adams_driver;
/// solver settings and TOML loading
pub mod Adams_config;
/// solver object in the style of the other IVP solvers of the crate
pub mod Adams_api;


pub use Adams_coefficients::{AdamsOrder, StepOrder};
pub use Adams_corrector::{ConvergenceOutcome, CorrectorSettings, correct, has_converged};
pub use Adams_error::AdamsError;
pub use Adams_history::{HistoryWindow, bootstrap_history};
pub use Adams_predictor::predict;
pub use Adams_stepper::{AdamsStepper, IntegrationState, StepOutcome, StepResult, step};
