use chrono::{Datelike, Duration, NaiveDate};

use super::LinearScale;

/// Scale over calendar dates, linear in days.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeScale {
    domain: [NaiveDate; 2],
    linear: LinearScale,
}

/// Calendar aligned spacing between time ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickInterval {
    Days(u32),
    Months(u32),
    Years(u32),
}

const INTERVALS: [TickInterval; 12] = [
    TickInterval::Days(1),
    TickInterval::Days(2),
    TickInterval::Days(7),
    TickInterval::Days(14),
    TickInterval::Months(1),
    TickInterval::Months(3),
    TickInterval::Months(6),
    TickInterval::Years(1),
    TickInterval::Years(2),
    TickInterval::Years(5),
    TickInterval::Years(10),
    TickInterval::Years(20),
];

impl TickInterval {
    fn approx_days(&self) -> f64 {
        match *self {
            TickInterval::Days(n) => n as f64,
            TickInterval::Months(n) => n as f64 * 30.44,
            TickInterval::Years(n) => n as f64 * 365.25,
        }
    }

    /// First aligned date on or after `date`.
    fn ceil(&self, date: NaiveDate) -> Option<NaiveDate> {
        match *self {
            TickInterval::Days(_) => Some(date),
            TickInterval::Months(n) => {
                let mut year = date.year();
                let mut month0 = date.month0();
                if date.day() > 1 {
                    month0 += 1;
                }
                month0 = month0.div_ceil(n) * n;
                if month0 >= 12 {
                    year += 1;
                    month0 = 0;
                }
                NaiveDate::from_ymd_opt(year, month0 + 1, 1)
            }
            TickInterval::Years(n) => {
                let mut year = date.year();
                if date.ordinal() > 1 {
                    year += 1;
                }
                let n = n as i32;
                let year = (year + n - 1).div_euclid(n) * n;
                NaiveDate::from_ymd_opt(year, 1, 1)
            }
        }
    }

    fn offset(&self, date: NaiveDate) -> Option<NaiveDate> {
        match *self {
            TickInterval::Days(n) => date.checked_add_signed(Duration::days(n as i64)),
            TickInterval::Months(n) => date.checked_add_months(chrono::Months::new(n)),
            TickInterval::Years(n) => date.checked_add_months(chrono::Months::new(12 * n)),
        }
    }
}

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

impl TimeScale {
    pub fn new(domain: [NaiveDate; 2], range: [f64; 2]) -> Self {
        let [d0, d1] = domain;
        Self {
            domain,
            linear: LinearScale::new([day_number(d0), day_number(d1)], range),
        }
    }

    pub fn domain(&self) -> [NaiveDate; 2] {
        self.domain
    }

    pub fn range(&self) -> [f64; 2] {
        self.linear.range()
    }

    pub fn scale(&self, date: NaiveDate) -> f64 {
        self.linear.scale(day_number(date))
    }

    /// Date at pixel `px`, rounded to the nearest day.
    pub fn invert(&self, px: f64) -> NaiveDate {
        let days = self.linear.invert(px).round() as i32;
        NaiveDate::from_num_days_from_ce_opt(days).unwrap_or(self.domain[0])
    }

    /// The interval that yields closest to `count` ticks over the domain.
    pub fn tick_interval(&self, count: usize) -> TickInterval {
        let [d0, d1] = self.domain;
        let span = (day_number(d1) - day_number(d0)).abs().max(1.0);
        let target = span / count.max(1) as f64;
        INTERVALS
            .iter()
            .copied()
            .min_by(|a, b| {
                let da = (a.approx_days() / target).ln().abs();
                let db = (b.approx_days() / target).ln().abs();
                da.total_cmp(&db)
            })
            .unwrap_or(TickInterval::Years(1))
    }

    pub fn ticks(&self, count: usize) -> Vec<NaiveDate> {
        if count == 0 {
            return Vec::new();
        }
        let [d0, d1] = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        let interval = self.tick_interval(count);
        let mut ticks = Vec::new();
        let mut next = interval.ceil(lo);
        while let Some(date) = next.filter(|date| *date <= hi) {
            ticks.push(date);
            next = interval.offset(date);
        }
        ticks
    }
}

/// Label for a time tick: the year on January 1st, the month name on the
/// first of a month, else month and day.
pub fn format_tick(date: NaiveDate) -> String {
    if date.day() == 1 && date.month() == 1 {
        date.format("%Y").to_string()
    } else if date.day() == 1 {
        date.format("%B").to_string()
    } else {
        date.format("%b %d").to_string()
    }
}

impl TimeScale {
    pub fn tick_labels(&self, count: usize) -> Vec<(NaiveDate, String)> {
        self.ticks(count)
            .into_iter()
            .map(|date| (date, format_tick(date)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_scale_is_linear_in_days() {
        let scale = TimeScale::new([date(2017, 1, 1), date(2017, 1, 11)], [0.0, 100.0]);
        assert_eq!(scale.scale(date(2017, 1, 6)), 50.0);
        assert_eq!(scale.invert(51.0), date(2017, 1, 6));
        assert_eq!(scale.invert(100.0), date(2017, 1, 11));
    }

    #[test]
    fn test_four_ticks_over_multiple_years_are_years() {
        let scale = TimeScale::new([date(2013, 5, 12), date(2017, 10, 31)], [0.0, 620.0]);
        assert_eq!(scale.tick_interval(4), TickInterval::Years(1));
        assert_eq!(
            scale.ticks(4),
            vec![date(2014, 1, 1), date(2015, 1, 1), date(2016, 1, 1), date(2017, 1, 1)]
        );
        assert_eq!(scale.tick_labels(4)[0].1, "2014");
    }

    #[test]
    fn test_month_ticks_are_aligned() {
        let scale = TimeScale::new([date(2017, 2, 10), date(2017, 10, 31)], [0.0, 620.0]);
        assert_eq!(scale.tick_interval(4), TickInterval::Months(3));
        assert_eq!(
            scale.ticks(4),
            vec![date(2017, 4, 1), date(2017, 7, 1), date(2017, 10, 1)]
        );
        assert_eq!(format_tick(date(2017, 4, 1)), "April");
        assert_eq!(format_tick(date(2017, 4, 15)), "Apr 15");
    }
}
