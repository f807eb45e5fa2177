use chrono::{Datelike, NaiveDate};
use itertools::{Itertools, MinMaxResult};

use crate::{
    chart::ChartLayout,
    data::point::DataPoint,
    utils::{datetime::date_to_day_number, text::format_grouped},
};

/// Padding added below the lowest and above the highest price
pub const VALUE_PADDING: f64 = 10.0;

const E10: f64 = 7.0710678118654755; // sqrt(50)
const E5: f64 = 3.1622776601683795; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    domain: (NaiveDate, NaiveDate),
    linear: LinearScale,
}

/// Date → x and price → y mappings for one filtered series.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub x: TimeScale,
    pub y: LinearScale,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// A collapsed domain maps everything to the middle of the range.
    pub fn map(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;

        let t = if d1 == d0 {
            0.5
        } else {
            (value - d0) / (d1 - d0)
        };

        r0 + t * (r1 - r0)
    }

    /// Round-number ticks (1, 2 or 5 × 10^k apart) covering the domain, roughly `count` of them.
    pub fn ticks(&self, count: usize) -> Vec<f64> {
        let (mut start, mut stop) = self.domain;
        let count = count as f64;

        if count <= 0.0 || !start.is_finite() || !stop.is_finite() {
            return vec![];
        }
        if start == stop {
            return vec![start];
        }

        let reverse = stop < start;
        if reverse {
            std::mem::swap(&mut start, &mut stop);
        }

        let (i1, i2, inc) = tick_spec(start, stop, count);
        if i2 < i1 {
            return vec![];
        }

        let n = (i2 - i1 + 1.0) as usize;
        let mut ticks: Vec<f64> = (0..n)
            .map(|i| {
                if inc < 0.0 {
                    (i1 + i as f64) / -inc
                } else {
                    (i1 + i as f64) * inc
                }
            })
            .collect();

        if reverse {
            ticks.reverse();
        }

        ticks
    }

    pub fn tick_step(&self, count: usize) -> f64 {
        let inc = self.tick_increment(count);
        if inc < 0.0 { 1.0 / -inc } else { inc }
    }

    /// Tick label with just enough decimals to tell neighbouring ticks apart.
    pub fn format_tick(&self, value: f64, count: usize) -> String {
        let inc = self.tick_increment(count);

        // A negative increment is the reciprocal of a sub-unit step
        let decimals = if inc < 0.0 && inc.is_finite() {
            ((-inc).log10() - 1e-9).ceil().max(0.0) as usize
        } else {
            0
        };

        format_grouped(value, decimals)
    }

    fn tick_increment(&self, count: usize) -> f64 {
        let (start, stop) = self.domain;
        let (lo, hi) = if stop < start {
            (stop, start)
        } else {
            (start, stop)
        };

        let (_, _, inc) = tick_spec(lo, hi, count as f64);
        inc
    }
}

impl TimeScale {
    pub fn new(domain: (NaiveDate, NaiveDate), range: (f64, f64)) -> Self {
        Self {
            domain,
            linear: LinearScale::new(
                (
                    date_to_day_number(&domain.0),
                    date_to_day_number(&domain.1),
                ),
                range,
            ),
        }
    }

    pub fn domain(&self) -> (NaiveDate, NaiveDate) {
        self.domain
    }

    pub fn range(&self) -> (f64, f64) {
        self.linear.range()
    }

    pub fn map(&self, date: &NaiveDate) -> f64 {
        self.linear.map(date_to_day_number(date))
    }

    /// Days within the domain (inclusive) that fall on every `step`-th day of their month,
    /// counted from the 1st.
    pub fn ticks_every_days(&self, step: u32) -> Vec<NaiveDate> {
        let (start, end) = self.domain;
        let step = step.max(1);

        start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| d.day0() % step == 0)
            .collect()
    }
}

impl Scales {
    /// `None` for an empty series, no scale exists without data.
    pub fn from_series(series: &[DataPoint], layout: &ChartLayout) -> Option<Self> {
        let (first, last) = match series.iter().map(|p| p.date()).minmax() {
            MinMaxResult::NoElements => return None,
            MinMaxResult::OneElement(d) => (d, d),
            MinMaxResult::MinMax(min, max) => (min, max),
        };

        let low = series.iter().map(|p| p.low()).fold(f64::INFINITY, f64::min);
        let high = series
            .iter()
            .map(|p| p.high())
            .fold(f64::NEG_INFINITY, f64::max);

        Some(Self {
            x: TimeScale::new((first, last), layout.x_range()),
            y: LinearScale::new(
                (low - VALUE_PADDING, high + VALUE_PADDING),
                layout.y_range(),
            ),
        })
    }
}

fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

fn tick_spec(start: f64, stop: f64, count: f64) -> (f64, f64, f64) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let positive_inc = 10f64.powf(-power) / factor;
        i1 = js_round(start * positive_inc);
        i2 = js_round(stop * positive_inc);
        if i1 / positive_inc < start {
            i1 += 1.0;
        }
        if i2 / positive_inc > stop {
            i2 -= 1.0;
        }
        inc = -positive_inc;
    } else {
        inc = 10f64.powf(power) * factor;
        i1 = js_round(start / inc);
        i2 = js_round(stop / inc);
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}
