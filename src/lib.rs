// Copyright (c)  by Gleb E. Zaslavkiy
//MIT License
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// fixed-order Adams predictor-corrector pairs for y' = f(x, y)
/// Example: solver object
/// ```
/// use RustedAdams::numerical::Adams::AdamsOrder;
/// use RustedAdams::numerical::Adams::Adams_api::AdamsPC;
/// // y' = -y, y(0) = 1 on [0, 1]
/// let mut solver = AdamsPC::new(AdamsOrder::Order12);
/// solver.set_initial(Box::new(|_t, y| -y), 1.0, 0.0, 1.0, 0.05);
/// solver.set_tolerance(1e-12, 50);
/// solver.solve().unwrap();
/// let (t, y) = solver.get_result();
/// assert_eq!(solver.get_status(), "finished");
/// assert!((y[y.len() - 1] - (-t[t.len() - 1]).exp()).abs() < 1e-9);
/// ```
pub mod numerical;
