//! Empirical ef curves.
//!
//! Each tuning level maps the per-segment share of topK (`s`) onto a candidate
//! list breadth through three pieces: a steep one for small `s`, a flatter one
//! for mid-range `s`, and `ef = s` once widening no longer pays off.
//!
//! | level | s < 10          | 10 <= s < T              | s >= T |
//! |-------|-----------------|--------------------------|--------|
//! | 1     | 1.2 s + 31      | 0.58 s + 39 (T = 90)     | s      |
//! | 2     | 2 s + 54        | 8 s^0.56 + 40 (T = 200)  | s      |
//! | other | 10 s^0.5 + 70   | 10 s^0.56 + 64 (T = 300) | s      |

use serde::{Deserialize, Serialize};

const SMALL_TOPK_BOUND: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EfEstimate {
    pub ef: i64,
    /// topK to send to the engine. Never larger than the requested topK.
    pub topk: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Curve {
    Level1,
    Level2,
    Default,
}

impl Curve {
    pub fn for_level(level: i64) -> Self {
        match level {
            1 => Self::Level1,
            2 => Self::Level2,
            _ => Self::Default,
        }
    }

    /// Where the curve switches to `ef = s`.
    pub fn linear_threshold(self) -> f64 {
        match self {
            Self::Level1 => 90.0,
            Self::Level2 => 200.0,
            Self::Default => 300.0,
        }
    }

    pub fn raw_ef(self, s: f64) -> i64 {
        let ef = if s < SMALL_TOPK_BOUND {
            match self {
                Self::Level1 => s * 1.2 + 31.0,
                Self::Level2 => s * 2.0 + 54.0,
                Self::Default => 10.0 * s.powf(0.5) + 70.0,
            }
        } else if s < self.linear_threshold() {
            match self {
                Self::Level1 => s * 0.58 + 39.0,
                Self::Level2 => 8.0 * s.powf(0.56) + 40.0,
                Self::Default => 10.0 * s.powf(0.56) + 64.0,
            }
        } else {
            s
        };
        // `as` truncates toward zero, saturates, and maps NaN to 0
        ef as i64
    }
}

/// topK spread over the estimated number of segments. Segment counts below one
/// are treated as one.
pub fn scaled_topk(topk: i64, est_segment_num: usize) -> f64 {
    topk as f64 / est_segment_num.max(1) as f64
}

pub fn estimate_ef(topk: i64, est_segment_num: usize, level: i64, has_filter: bool) -> EfEstimate {
    let s = scaled_topk(topk, est_segment_num);
    let mut ef = Curve::for_level(level).raw_ef(s);

    // a filtered search must keep at least topK candidates or recall collapses
    if has_filter && ef < topk {
        ef = topk;
    }
    let topk = if ef < topk { ef } else { topk };

    EfEstimate { ef, topk }
}
