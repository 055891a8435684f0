//! Adams-Bashforth / Adams-Moulton predictor-corrector solver for a scalar ODE y' = f(t, y)
//! with a constant step. The first k samples come from an RK4 starter, after that every
//! step is one predictor-corrector step of the chosen order.
use core::fmt::Display;
use crate::numerical::Adams::Adams_coefficients::{AdamsOrder, StepOrder};
use crate::numerical::Adams::Adams_config::AdamsConfig;
use crate::numerical::Adams::Adams_corrector::CorrectorSettings;
use crate::numerical::Adams::Adams_error::{AdamsError, check_step_size};
use crate::numerical::Adams::Adams_history::HistoryWindow;
use crate::numerical::Adams::Adams_starter::rk4_starter;
use crate::numerical::Adams::Adams_stepper::{AdamsStepper, IntegrationState, StepOutcome};
use log::{info, warn};
use nalgebra::DVector;
use simplelog::*;
use std::collections::HashMap;
use std::time::Instant;

pub struct AdamsPC {
    f: Box<dyn Fn(f64, f64) -> f64>,
    pub order: AdamsOrder,
    coefficients: StepOrder,
    pub t0: f64,
    pub y0: f64,
    pub t_bound: f64,
    pub t: f64,
    pub y: f64,
    h: f64,
    settings: CorrectorSettings,
    starter_substeps: usize,
    // multistep data, present once the starter has run
    history: Option<HistoryWindow>,
    state: Option<IntegrationState>,
    n_steps: usize,
    steps_done: usize,
    t_list: Vec<f64>,
    y_list: Vec<f64>,
    t_result: DVector<f64>,
    y_result: DVector<f64>,
    pub status: String,
    pub message: Option<String>,
    error: Option<AdamsError>,
    pub statistics: HashMap<String, usize>,
    pub log_level: Option<LevelFilter>,
    pub log_to_console: bool,
}

impl Display for AdamsPC {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "AdamsPC {{ order: {}, t0: {}, t_bound: {}, h: {}, t: {}, y: {} }}",
            self.order, self.t0, self.t_bound, self.h, self.t, self.y
        )
    }
}

impl AdamsPC {
    pub fn new(order: AdamsOrder) -> AdamsPC {
        let config = AdamsConfig::default();
        AdamsPC {
            f: Box::new(|_t, y| -y),
            order,
            coefficients: order.step_order(),
            t0: config.t0,
            y0: config.y0,
            t_bound: config.t_bound,
            t: config.t0,
            y: config.y0,
            h: config.h,
            settings: CorrectorSettings {
                epsilon: config.epsilon,
                max_iterations: config.max_iterations,
            },
            starter_substeps: config.starter_substeps,
            history: None,
            state: None,
            n_steps: 0,
            steps_done: 0,
            t_list: Vec::new(),
            y_list: Vec::new(),
            t_result: DVector::zeros(0),
            y_result: DVector::zeros(0),
            status: "running".to_string(),
            message: None,
            error: None,
            statistics: HashMap::new(),
            log_level: None,
            log_to_console: true,
        }
    }

    pub fn from_config(
        config: &AdamsConfig,
        f: Box<dyn Fn(f64, f64) -> f64>,
    ) -> Result<AdamsPC, AdamsError> {
        config.validate()?;
        let mut solver = AdamsPC::new(config.order);
        solver.set_initial(f, config.y0, config.t0, config.t_bound, config.h);
        solver.set_tolerance(config.epsilon, config.max_iterations);
        solver.set_starter_substeps(config.starter_substeps);
        if config.loglevel.is_some() {
            solver.log_level = Some(config.level_filter()?);
        }
        Ok(solver)
    }

    pub fn set_initial(
        &mut self,
        f: Box<dyn Fn(f64, f64) -> f64>,
        y0: f64,
        t0: f64,
        t_bound: f64,
        h: f64,
    ) {
        self.f = f;
        self.y0 = y0;
        self.t0 = t0;
        self.t_bound = t_bound;
        self.h = h;
        self.y = y0;
        self.t = t0;
        self.history = None;
        self.state = None;
        self.steps_done = 0;
        self.n_steps = 0;
        self.t_list.clear();
        self.y_list.clear();
        self.t_result = DVector::zeros(0);
        self.y_result = DVector::zeros(0);
        self.statistics.clear();
        self.status = "running".to_string();
        self.message = None;
        self.error = None;
    }

    /// corrector tolerance and iteration budget
    pub fn set_tolerance(&mut self, epsilon: f64, max_iterations: usize) {
        self.settings = CorrectorSettings {
            epsilon,
            max_iterations,
        };
    }

    pub fn set_starter_substeps(&mut self, substeps: usize) {
        self.starter_substeps = substeps;
    }

    /// validate the problem; returns the number of steps of size h to t_bound
    pub fn check(&self) -> Result<usize, AdamsError> {
        check_step_size(self.h)?;
        self.settings.check()?;
        let config = AdamsConfig {
            order: self.order,
            h: self.h,
            epsilon: self.settings.epsilon,
            max_iterations: self.settings.max_iterations,
            t0: self.t0,
            y0: self.y0,
            t_bound: self.t_bound,
            starter_substeps: self.starter_substeps,
            loglevel: None,
        };
        config.validate()?;
        config.n_steps()
    }

    fn stepper(&self) -> Result<AdamsStepper<'_>, AdamsError> {
        AdamsStepper::new(
            &self.coefficients,
            self.h,
            self.settings.epsilon,
            self.settings.max_iterations,
        )
    }

    /// RK4 samples up to the k-th grid point (or t_bound if it comes first)
    fn start(&mut self) -> Result<(), AdamsError> {
        self.n_steps = self.check()?;
        let k = self.coefficients.k();
        let count = k.min(self.n_steps + 1);
        let samples = rk4_starter(
            self.f.as_ref(),
            self.t0,
            self.y0,
            self.h,
            count,
            self.starter_substeps,
        )?;
        self.t_list = (0..count).map(|j| self.t0 + j as f64 * self.h).collect();
        self.y_list = samples.clone();
        self.steps_done = count - 1;
        self.statistics
            .insert("starter steps".to_string(), count - 1);
        if count == k {
            let (history, state) = self.stepper()?.start(self.f.as_ref(), &samples, self.t0)?;
            self.t = state.x;
            self.y = state.y_curr;
            self.history = Some(history);
            self.state = Some(state);
        } else {
            self.t = self.t_list[count - 1];
            self.y = samples[count - 1];
        }
        info!(
            "{} started: {} RK4 samples, {} steps to t_bound = {}",
            self.order, count, self.n_steps, self.t_bound
        );
        Ok(())
    }

    pub fn _step_impl(&mut self) -> Result<StepOutcome, AdamsError> {
        let (mut state, mut history) = match (self.state, self.history.clone()) {
            (Some(state), Some(history)) => (state, history),
            _ => {
                return Err(AdamsError::InvalidArgument(
                    "solver was not started".to_string(),
                ));
            }
        };
        let outcome = self
            .stepper()?
            .step(self.f.as_ref(), &mut state, &mut history)?;
        self.history = Some(history);
        self.state = Some(state);
        self.t = state.x;
        self.y = state.y_curr;
        self.steps_done += 1;
        *self
            .statistics
            .entry("corrector iterations".to_string())
            .or_insert(0) += outcome.iterations_used.min(self.settings.max_iterations);
        *self.statistics.entry("steps".to_string()).or_insert(0) += 1;
        if !outcome.converged {
            *self
                .statistics
                .entry("not converged steps".to_string())
                .or_insert(0) += 1;
        }
        Ok(outcome)
    }

    pub fn step(&mut self) {
        if self.steps_done >= self.n_steps {
            self.status = "finished".to_string();
            return;
        }
        match self._step_impl() {
            Ok(outcome) => {
                self.t_list.push(self.t);
                self.y_list.push(self.y);
                self.message = if outcome.converged {
                    None
                } else {
                    Some(format!("corrector did not converge at t = {}", self.t))
                };
                if self.steps_done >= self.n_steps {
                    self.status = "finished".to_string();
                }
            }
            Err(e) => {
                self.status = "failed".to_string();
                self.message = Some(e.to_string());
                self.error = Some(e);
            }
        }
    }

    pub fn main_loop(&mut self) -> Result<(), AdamsError> {
        let start = Instant::now();
        self.status = "running".to_string();
        self.error = None;
        if let Err(e) = self.start() {
            self.status = "failed".to_string();
            self.message = Some(e.to_string());
            self.error = Some(e.clone());
            return Err(e);
        }
        if self.steps_done >= self.n_steps {
            self.status = "finished".to_string();
        }
        while self.status == "running" {
            self.step();
        }
        self.t_result = DVector::from_vec(self.t_list.clone());
        self.y_result = DVector::from_vec(self.y_list.clone());

        let duration = start.elapsed();
        info!("{} integration completed:", self.order);
        info!("  - Time span: [{:.6}, {:.6}]", self.t0, self.t_bound);
        info!("  - Solution points: {}", self.t_result.len());
        info!("  - Final point: t = {:.6}, y = {}", self.t, self.y);
        for (key, value) in self.statistics.iter() {
            info!("  - {}: {}", key, value);
        }
        info!(
            "  - Integration time: {:.3} seconds",
            duration.as_secs_f64()
        );

        if let Some(e) = self.error.clone() {
            warn!("{} integration failed: {}", self.order, e);
            return Err(e);
        }
        Ok(())
    }

    pub fn solve(&mut self) -> Result<(), AdamsError> {
        if let Some(level) = self.log_level {
            if level != LevelFilter::Off {
                self.init_logger();
            }
        }
        info!("Initializing {} solver", self.order);
        self.main_loop()
    }

    pub fn get_result(&self) -> (DVector<f64>, DVector<f64>) {
        (self.t_result.clone(), self.y_result.clone())
    }

    pub fn get_status(&self) -> &String {
        &self.status
    }

    ////////////////////////////////logging functions
    /// Set logging level (Off, Error, Warn, Info, Debug, Trace)
    pub fn set_log_level(&mut self, level: LevelFilter) {
        self.log_level = Some(level);
    }

    pub fn set_console_logging(&mut self, enabled: bool) {
        self.log_to_console = enabled;
    }

    pub fn disable_logging(&mut self) {
        self.set_log_level(LevelFilter::Off);
    }

    fn init_logger(&self) {
        let level = self.log_level.unwrap_or(LevelFilter::Info);
        let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
        if self.log_to_console {
            loggers.push(TermLogger::new(
                level,
                Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            ));
        }
        // a logger may already be installed, keep it
        if !loggers.is_empty() {
            let _ = CombinedLogger::init(loggers);
        }
    }
}
