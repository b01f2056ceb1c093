//! Geometry for the category pie chart.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::f64::consts::TAU;

use crate::aggregate::CategoryTotals;

/// One wedge, as a fraction of a full turn measured clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Slice {
    /// Position of the category in the totals, used for its color.
    pub(crate) index: usize,
    pub(crate) label: String,
    pub(crate) amount: Decimal,
    pub(crate) start: f64,
    pub(crate) end: f64,
}

impl Slice {
    pub(crate) fn fraction(&self) -> f64 {
        self.end - self.start
    }
}

/// Wedges for every category with a positive sum. Empty when nothing is positive.
pub(crate) fn pie_slices(totals: &CategoryTotals) -> Vec<Slice> {
    let positive: Vec<(usize, &str, Decimal)> = totals
        .iter()
        .enumerate()
        .filter(|(_, (_, amt))| *amt > Decimal::ZERO)
        .map(|(i, (name, amt))| (i, name, amt))
        .collect();

    let sum: f64 = positive.iter().filter_map(|(_, _, amt)| amt.to_f64()).sum();
    if sum <= 0.0 {
        return Vec::new();
    }

    let mut slices = Vec::with_capacity(positive.len());
    let mut start = 0.0;
    for (index, label, amount) in positive {
        let share = amount.to_f64().unwrap_or(0.0) / sum;
        slices.push(Slice {
            index,
            label: label.to_string(),
            amount,
            start,
            end: start + share,
        });
        start += share;
    }
    if let Some(last) = slices.last_mut() {
        last.end = 1.0;
    }
    slices
}

/// Bar height in cents. Negative sums draw empty, sums past `u64` cents draw
/// full height.
pub(crate) fn bar_height(amount: Decimal) -> u64 {
    amount
        .max(Decimal::ZERO)
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.to_u64())
        .unwrap_or(u64::MAX)
}

/// Clockwise turn from 12 o'clock for a point relative to the pie center.
pub(crate) fn turn_of(x: f64, y: f64) -> f64 {
    (x.atan2(y) / TAU).rem_euclid(1.0)
}

/// Position in `slices` of the wedge covering `turn`, if any.
pub(crate) fn slice_position(slices: &[Slice], turn: f64) -> Option<usize> {
    slices.iter().position(|s| turn >= s.start && turn < s.end)
}

/// Points of a `steps` x `steps` grid over the unit disc, grouped by slice.
pub(crate) fn rasterize(slices: &[Slice], steps: usize) -> Vec<Vec<(f64, f64)>> {
    let mut layers = vec![Vec::new(); slices.len()];
    if slices.is_empty() || steps < 2 {
        return layers;
    }
    let step = 2.0 / (steps - 1) as f64;
    for yi in 0..steps {
        let y = -1.0 + yi as f64 * step;
        for xi in 0..steps {
            let x = -1.0 + xi as f64 * step;
            if x * x + y * y > 1.0 {
                continue;
            }
            if let Some(pos) = slice_position(slices, turn_of(x, y)) {
                layers[pos].push((x, y));
            }
        }
    }
    layers
}
