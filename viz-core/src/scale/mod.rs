//! Scales map a data domain to a pixel range.

mod band;
mod linear;
mod logarithmic;
mod ordinal;
mod time;

pub use band::BandScale;
pub use linear::{tick_values, LinearScale};
pub use logarithmic::LogScale;
pub use ordinal::OrdinalScale;
pub use time::{format_tick, TickInterval, TimeScale};

/// `[min, max]` of the finite values, `None` if there are none.
pub fn extent<I>(values: I) -> Option<[f64; 2]>
where
    I: IntoIterator<Item = f64>,
{
    values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some([v, v]),
            Some([lo, hi]) => Some([lo.min(v), hi.max(v)]),
        })
}

/// `[min, max]` of any ordered values, `None` for an empty iterator.
pub fn extent_by<T, I>(values: I) -> Option<[T; 2]>
where
    T: PartialOrd + Copy,
    I: IntoIterator<Item = T>,
{
    values.into_iter().fold(None, |acc, v| match acc {
        None => Some([v, v]),
        Some([lo, hi]) => Some([
            if v < lo { v } else { lo },
            if v > hi { v } else { hi },
        ]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_skips_non_finite() {
        assert_eq!(extent([3.0, f64::NAN, -1.0, 7.5]), Some([-1.0, 7.5]));
        assert_eq!(extent(Vec::<f64>::new()), None);
    }

    #[test]
    fn test_extent_by_integers() {
        assert_eq!(extent_by([1952, 1800, 2014]), Some([1800, 2014]));
    }
}
