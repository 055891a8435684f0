//! Coefficient tables of the Adams-Bashforth (explicit) and Adams-Moulton (implicit) formulas.
//!
//! Every table is pure data: an order is added by adding a pair of arrays and a normalizing factor,
//! nothing in the predictor, corrector or stepper depends on a concrete order.
use crate::numerical::Adams::Adams_error::AdamsError;
use strum_macros::{Display, EnumIter};

// 4-step Adams-Bashforth / 3-step Adams-Moulton
const BASHFORTH_4: [f64; 4] = [55.0, -59.0, 37.0, -9.0];
const MOULTON_4: [f64; 4] = [9.0, 19.0, -5.0, 1.0];
const DIVISOR_4: f64 = 1.0 / 24.0;

// 12-step Adams-Bashforth / 11-step Adams-Moulton
const BASHFORTH_12: [f64; 12] = [
    4527766399.0,
    -19433810163.0,
    61633227185.0,
    -135579356757.0,
    214139355366.0,
    -247741639374.0,
    211103573298.0,
    -131365867290.0,
    58189107627.0,
    -17410248271.0,
    3158642445.0,
    -262747265.0,
];
const MOULTON_12: [f64; 12] = [
    262747265.0,
    1374799219.0,
    -2092490673.0,
    3828828885.0,
    -5519460582.0,
    6043521486.0,
    -4963166514.0,
    3007739418.0,
    -1305971115.0,
    384709327.0,
    -68928781.0,
    5675265.0,
];
const DIVISOR_12: f64 = 1.0 / 958003200.0;

// 16-step Adams-Bashforth / 15-step Adams-Moulton
const BASHFORTH_16: [f64; 16] = [
    362555126427073.0,
    -2161567671248849.0,
    9622096909515337.0,
    -30607373860520569.0,
    72558117072259733.0,
    -131963191940828581.0,
    187463140112902893.0,
    -210020588912321949.0,
    186087544263596643.0,
    -129930094104237331.0,
    70724351582843483.0,
    -29417910911251819.0,
    9038571752734087.0,
    -1934443196892599.0,
    257650275915823.0,
    -16088129229375.0,
];
const MOULTON_16: [f64; 16] = [
    16088129229375.0,
    105145058757073.0,
    -230992163723849.0,
    612744541065337.0,
    -1326978663058069.0,
    2285168598349733.0,
    -3129453071993581.0,
    3414941728852893.0,
    -2966365730265699.0,
    2039345879546643.0,
    -1096355235402331.0,
    451403108933483.0,
    -137515713789319.0,
    29219384284087.0,
    -3867689367599.0,
    240208245823.0,
];
const DIVISOR_16: f64 = 1.0 / 62768369664000.0;

// 20-step Adams-Bashforth / 19-step Adams-Moulton
// the integer numerators exceed 2^53, in f64 they are rounded (relative error ~1e-16 per entry)
const BASHFORTH_20: [f64; 20] = [
    691668239157222107697.0,
    -5292843584961252933125.0,
    30349492858024727686755.0,
    -126346544855927856134295.0,
    399537307669842150996468.0,
    -991168450545135070835076.0,
    1971629028083798845750380.0,
    -3191065388846318679544380.0,
    4241614331208149947151790.0,
    -4654326468801478894406214.0,
    4222756879776354065593786.0,
    -3161821089800186539248210.0,
    1943018818982002395655620.0,
    -970350191086531368649620.0,
    387739787034699092364924.0,
    -121059601023985433003532.0,
    28462032496476316665705.0,
    -4740335757093710713245.0,
    498669220956647866875.0,
    -24919383499187492303.0,
];
const MOULTON_20: [f64; 20] = [
    24919383499187492303.0,
    193280569173472261637.0,
    -558160720115629395555.0,
    1941395668950986461335.0,
    -5612131802364455926260.0,
    13187185898439270330756.0,
    -25293146116627869170796.0,
    39878419226784442421820.0,
    -51970649453670274135470.0,
    56154678684618739939910.0,
    -50320851025594566473146.0,
    37297227252822858381906.0,
    -22726350407538133839300.0,
    11268210124987992327060.0,
    -4474886658024166985340.0,
    1389665263296211699212.0,
    -325187970422032795497.0,
    53935307402575440285.0,
    -5652892248087175675.0,
    281550972898020815.0,
];
const DIVISOR_20: f64 = 1.0 / 102181884343418880000.0;

/// Built-in Adams predictor-corrector orders, named by the number of history samples k
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum AdamsOrder {
    #[strum(serialize = "Adams4")]
    Order4, // AB4 / AM3
    #[strum(serialize = "Adams12")]
    Order12, // AB12 / AM11
    #[strum(serialize = "Adams16")]
    Order16, // AB16 / AM15
    #[strum(serialize = "Adams20")]
    Order20, // AB20 / AM19
}

impl AdamsOrder {
    /// number of derivative samples used by the predictor
    pub fn steps(&self) -> usize {
        match self {
            AdamsOrder::Order4 => 4,
            AdamsOrder::Order12 => 12,
            AdamsOrder::Order16 => 16,
            AdamsOrder::Order20 => 20,
        }
    }

    pub fn from_steps(k: usize) -> Result<AdamsOrder, AdamsError> {
        match k {
            4 => Ok(AdamsOrder::Order4),
            12 => Ok(AdamsOrder::Order12),
            16 => Ok(AdamsOrder::Order16),
            20 => Ok(AdamsOrder::Order20),
            _ => Err(AdamsError::InvalidArgument(format!(
                "no built-in Adams table with {} steps (available: 4, 12, 16, 20)",
                k
            ))),
        }
    }

    /// build the immutable coefficient set for this order
    pub fn step_order(&self) -> StepOrder {
        let (bashforth, moulton, divisor): (&[f64], &[f64], f64) = match self {
            AdamsOrder::Order4 => (&BASHFORTH_4, &MOULTON_4, DIVISOR_4),
            AdamsOrder::Order12 => (&BASHFORTH_12, &MOULTON_12, DIVISOR_12),
            AdamsOrder::Order16 => (&BASHFORTH_16, &MOULTON_16, DIVISOR_16),
            AdamsOrder::Order20 => (&BASHFORTH_20, &MOULTON_20, DIVISOR_20),
        };
        StepOrder {
            k: bashforth.len(),
            bashforth: bashforth.to_vec(),
            moulton: moulton.to_vec(),
            divisor,
        }
    }
}

/// Coefficients of one fixed-order Adams method.
///
/// `bashforth[0]` weights the most recent derivative sample f(x_i, y_i), `bashforth[k-1]` the oldest one.
/// `moulton[0]` weights the unknown derivative at the new point x_{i+1}, `moulton[1]` f(x_i, y_i) and so on.
/// `divisor` is the normalizing factor multiplying both weighted sums (e.g. 1/958003200 for k = 12).
/// Built once, never mutated, shared by reference between steps and trajectories.
#[derive(Debug, Clone, PartialEq)]
pub struct StepOrder {
    k: usize,
    bashforth: Vec<f64>,
    moulton: Vec<f64>,
    divisor: f64,
}

impl StepOrder {
    /// custom table; checks k >= 2, equal lengths, finite entries and a finite non-zero divisor
    pub fn new(bashforth: Vec<f64>, moulton: Vec<f64>, divisor: f64) -> Result<StepOrder, AdamsError> {
        let k = bashforth.len();
        if k < 2 {
            return Err(AdamsError::InvalidArgument(format!(
                "Adams table needs at least 2 coefficients (got {})",
                k
            )));
        }
        if moulton.len() != k {
            return Err(AdamsError::InvalidArgument(format!(
                "Bashforth and Moulton tables differ in length ({} vs {})",
                k,
                moulton.len()
            )));
        }
        if bashforth.iter().chain(moulton.iter()).any(|c| !c.is_finite()) {
            return Err(AdamsError::InvalidArgument(
                "coefficient table contains non-finite entries".to_string(),
            ));
        }
        if divisor == 0.0 || !divisor.is_finite() {
            return Err(AdamsError::InvalidArgument(format!(
                "divisor must be finite and non-zero (got {})",
                divisor
            )));
        }
        Ok(StepOrder {
            k,
            bashforth,
            moulton,
            divisor,
        })
    }

    pub fn k(&self) -> usize {
        self.k
    }
    /// length of the derivative history the method keeps between steps
    pub fn history_len(&self) -> usize {
        self.k - 1
    }
    pub fn bashforth(&self) -> &[f64] {
        &self.bashforth
    }
    pub fn moulton(&self) -> &[f64] {
        &self.moulton
    }
    pub fn divisor(&self) -> f64 {
        self.divisor
    }
}

impl From<AdamsOrder> for StepOrder {
    fn from(order: AdamsOrder) -> Self {
        order.step_order()
    }
}
