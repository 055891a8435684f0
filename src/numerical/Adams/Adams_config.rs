//! settings of an Adams predictor-corrector run, with TOML loading
use crate::numerical::Adams::Adams_coefficients::AdamsOrder;
use crate::numerical::Adams::Adams_corrector::CorrectorSettings;
use crate::numerical::Adams::Adams_error::{AdamsError, check_step_size};
use simplelog::LevelFilter;
use toml::{Table, Value};

/// upper bound on the number of fixed steps of one run
pub const MAX_STEPS: usize = u32::MAX as usize;

#[derive(Debug, Clone, PartialEq)]
pub struct AdamsConfig {
    pub order: AdamsOrder,
    pub h: f64,
    pub epsilon: f64,
    pub max_iterations: usize,
    pub t0: f64,
    pub y0: f64,
    pub t_bound: f64,
    /// RK4 substeps per step while producing the starting samples
    pub starter_substeps: usize,
    /// off|none|error|warn|info|debug|trace, None keeps the default (info)
    pub loglevel: Option<String>,
}

impl Default for AdamsConfig {
    fn default() -> Self {
        AdamsConfig {
            order: AdamsOrder::Order12,
            h: 1e-2,
            epsilon: 1e-10,
            max_iterations: 50,
            t0: 0.0,
            y0: 1.0,
            t_bound: 1.0,
            starter_substeps: 8,
            loglevel: None,
        }
    }
}

impl AdamsConfig {
    pub fn validate(&self) -> Result<(), AdamsError> {
        check_step_size(self.h)?;
        CorrectorSettings::new(self.epsilon, self.max_iterations)?;
        if !self.t0.is_finite() || !self.t_bound.is_finite() || !self.y0.is_finite() {
            return Err(AdamsError::InvalidArgument(
                "t0, t_bound and y0 must be finite".to_string(),
            ));
        }
        if self.starter_substeps == 0 {
            return Err(AdamsError::InvalidArgument(
                "starter_substeps must be at least 1".to_string(),
            ));
        }
        self.n_steps()?;
        if let Some(level) = &self.loglevel {
            parse_loglevel(level)?;
        }
        Ok(())
    }

    /// number of h-steps between t0 and t_bound, rounded to the nearest integer;
    /// at most MAX_STEPS
    pub fn n_steps(&self) -> Result<usize, AdamsError> {
        let n = ((self.t_bound - self.t0) / self.h).round();
        if n.is_nan() || n < 1.0 {
            return Err(AdamsError::InvalidArgument(format!(
                "no step of size {} fits between t0 = {} and t_bound = {}",
                self.h, self.t0, self.t_bound
            )));
        }
        if n > MAX_STEPS as f64 {
            return Err(AdamsError::InvalidArgument(format!(
                "step size {} needs {:e} steps between t0 = {} and t_bound = {} (limit {})",
                self.h, n, self.t0, self.t_bound, MAX_STEPS
            )));
        }
        Ok(n as usize)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, AdamsError> {
        match &self.loglevel {
            Some(level) => parse_loglevel(level),
            None => Ok(LevelFilter::Info),
        }
    }

    /// Reads keys `order`, `h`, `epsilon`, `max_iterations`, `t0`, `y0`, `t_bound`,
    /// `starter_substeps`, `loglevel`; missing keys keep their defaults
    /// ```
    /// use RustedAdams::numerical::Adams::Adams_config::AdamsConfig;
    /// let config = AdamsConfig::from_toml_str("order = 16\nh = 0.05\nt_bound = 2.0").unwrap();
    /// assert_eq!(config.order.steps(), 16);
    /// ```
    pub fn from_toml_str(s: &str) -> Result<AdamsConfig, AdamsError> {
        let table: Table = s
            .parse()
            .map_err(|e| AdamsError::InvalidArgument(format!("cannot parse TOML: {}", e)))?;
        let mut config = AdamsConfig::default();
        for (key, value) in table.iter() {
            match key.as_str() {
                "order" => config.order = AdamsOrder::from_steps(as_usize(key, value)?)?,
                "h" => config.h = as_f64(key, value)?,
                "epsilon" => config.epsilon = as_f64(key, value)?,
                "max_iterations" => config.max_iterations = as_usize(key, value)?,
                "t0" => config.t0 = as_f64(key, value)?,
                "y0" => config.y0 = as_f64(key, value)?,
                "t_bound" => config.t_bound = as_f64(key, value)?,
                "starter_substeps" => config.starter_substeps = as_usize(key, value)?,
                "loglevel" => {
                    let level = value.as_str().ok_or_else(|| wrong_type(key, "a string"))?;
                    config.loglevel = Some(level.to_string());
                }
                _ => {
                    return Err(AdamsError::InvalidArgument(format!(
                        "unknown configuration key '{}'",
                        key
                    )));
                }
            }
        }
        config.validate()?;
        Ok(config)
    }
}

pub fn parse_loglevel(level: &str) -> Result<LevelFilter, AdamsError> {
    match level {
        "off" | "none" => Ok(LevelFilter::Off),
        "error" => Ok(LevelFilter::Error),
        "warn" => Ok(LevelFilter::Warn),
        "info" => Ok(LevelFilter::Info),
        "debug" => Ok(LevelFilter::Debug),
        "trace" => Ok(LevelFilter::Trace),
        _ => Err(AdamsError::InvalidArgument(format!(
            "loglevel must be off, none, error, warn, info, debug or trace (got '{}')",
            level
        ))),
    }
}

fn wrong_type(key: &str, expected: &str) -> AdamsError {
    AdamsError::InvalidArgument(format!("'{}' must be {}", key, expected))
}

fn as_f64(key: &str, value: &Value) -> Result<f64, AdamsError> {
    match value {
        Value::Float(v) => Ok(*v),
        Value::Integer(v) => Ok(*v as f64),
        _ => Err(wrong_type(key, "a number")),
    }
}

fn as_usize(key: &str, value: &Value) -> Result<usize, AdamsError> {
    match value {
        Value::Integer(v) if *v >= 0 => Ok(*v as usize),
        _ => Err(wrong_type(key, "a non-negative integer")),
    }
}
