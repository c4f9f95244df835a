//! Number formatting for tick labels and tooltips.

const SI_PREFIXES: [&str; 17] = [
    "y", "z", "a", "f", "p", "n", "µ", "m", "", "k", "M", "G", "T", "P", "E", "Z", "Y",
];

/// SI-prefixed number with `digits` significant digits, trailing zeros kept
/// (`1.0M`, `150k`, `500m`).
pub fn si(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return format!("{value}");
    }
    let digits = digits.max(1);
    let sign = if value < 0.0 { "-" } else { "" };
    let scientific = format!("{:.*e}", digits - 1, value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return format!("{value}");
    };
    let coefficient: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exponent: i32 = exponent.parse().unwrap_or(0);

    let prefix_index = (exponent.div_euclid(3)).clamp(-8, 8);
    let prefix_exponent = prefix_index * 3;
    let i = exponent - prefix_exponent + 1;
    let n = coefficient.len() as i32;

    let number = if i == n {
        coefficient
    } else if i > n {
        format!("{coefficient}{}", "0".repeat((i - n) as usize))
    } else if i > 0 {
        let (int, frac) = coefficient.split_at(i as usize);
        format!("{int}.{frac}")
    } else {
        format!("0.{}{coefficient}", "0".repeat((-i) as usize))
    };
    let prefix = SI_PREFIXES[(prefix_index + 8) as usize];
    format!("{sign}{number}{prefix}")
}

/// Two significant digits with finance style suffixes: billions are `B`,
/// thousands `K`.
pub fn abbreviation(value: f64) -> String {
    let s = si(value, 2);
    if let Some(stripped) = s.strip_suffix('G') {
        format!("{stripped}B")
    } else if let Some(stripped) = s.strip_suffix('k') {
        format!("{stripped}K")
    } else {
        s
    }
}

/// Dollar sign in front of the plain number (`$300`, `$100000`).
pub fn dollars(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}", plain(value.abs()))
}

/// Dollars rounded to whole units with thousands separators (`$12,345`).
pub fn dollars_grouped(value: f64) -> String {
    let sign = if value < 0.0 && value.round() != 0.0 {
        "-"
    } else {
        ""
    };
    format!("{sign}${}", group_thousands(&format!("{:.0}", value.abs())))
}

/// Currency with cents, where a zero cent part is dropped
/// (`$1,200`, `$1,234.50`).
pub fn usd(value: f64) -> String {
    let sign = if value < 0.0 && (value * 100.0).round() != 0.0 {
        "-"
    } else {
        ""
    };
    let raw = format!("{:.2}", value.abs());
    let (int, cents) = raw.split_once('.').unwrap_or((&raw, "00"));
    let int = group_thousands(int);
    if cents == "00" {
        format!("{sign}${int}")
    } else {
        format!("{sign}${int}.{cents}")
    }
}

/// Whole number with thousands separators (`1,234,567`).
pub fn grouped_integer(value: f64) -> String {
    let sign = if value < 0.0 && value.round() != 0.0 {
        "-"
    } else {
        ""
    };
    format!("{sign}{}", group_thousands(&format!("{:.0}", value.abs())))
}

/// Integer part of the value, like a truncating parse (`72.9` → `72`).
pub fn truncated_integer(value: f64) -> String {
    format!("{}", value.trunc() as i64)
}

/// Shortest plain representation: integers without decimals, everything
/// else as Rust prints it.
pub fn plain(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e21 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, chr) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(chr);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_si_prefixes() {
        assert_eq!(si(1_234_567.0, 2), "1.2M");
        assert_eq!(si(150_000.0, 2), "150k");
        assert_eq!(si(1_000_000.0, 2), "1.0M");
        assert_eq!(si(950.0, 2), "950");
        assert_eq!(si(0.5, 2), "500m");
        assert_eq!(si(0.0, 2), "0.0");
        assert_eq!(si(-2_500.0, 2), "-2.5k");
    }

    #[test]
    fn test_abbreviation_uses_finance_suffixes() {
        assert_eq!(abbreviation(12e9), "12B");
        assert_eq!(abbreviation(4_500.0), "4.5K");
        assert_eq!(abbreviation(3.2e6), "3.2M");
        // Rounding up to the next prefix.
        assert_eq!(abbreviation(999_600.0), "1.0M");
    }

    #[test]
    fn test_dollar_formats() {
        assert_eq!(dollars(300.0), "$300");
        assert_eq!(dollars(100_000.0), "$100000");
        assert_eq!(dollars_grouped(1_234_567.4), "$1,234,567");
        assert_eq!(dollars_grouped(999.0), "$999");
    }

    #[test]
    fn test_usd_drops_zero_cents() {
        assert_eq!(usd(50_000.0), "$50,000");
        assert_eq!(usd(1_234.5), "$1,234.50");
        assert_eq!(usd(0.0), "$0");
        assert_eq!(usd(-12.0), "-$12");
    }

    #[test]
    fn test_integer_formats() {
        assert_eq!(grouped_integer(1_330_141_295.0), "1,330,141,295");
        assert_eq!(truncated_integer(72.9), "72");
        assert_eq!(truncated_integer(90.0), "90");
    }
}
