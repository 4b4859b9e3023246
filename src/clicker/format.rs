//! Number and duration formatting for names and notifications.

const SUFFIXES: &[&str] = &[
    "", "K", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc", "No", "Dc", "UDc", "DDc", "TDc",
    "QaDc", "QiDc", "SxDc", "SpDc", "OcDc", "NoDc", "Vg",
];

/// Switch to scientific notation at or above this when enabled.
pub const SCI_THRESHOLD: f64 = 1e66;

/// Format with short-scale suffixes (e.g. 1234567 → "1.23 M").
///
/// Values under 10 keep one decimal, under 1000 are floored integers.
pub fn format_number(n: f64, sci: bool) -> String {
    if n.is_nan() {
        return "0".into();
    }
    if n == f64::INFINITY {
        return "∞".into();
    }
    if n < 0.0 {
        return format!("-{}", format_number(-n, sci));
    }
    if n < 1000.0 {
        return if n < 10.0 {
            format!("{:.1}", n)
        } else {
            format!("{}", n.floor() as u64)
        };
    }
    if sci && n >= SCI_THRESHOLD {
        let s = format!("{:.3e}", n);
        return s.replacen('e', "e+", 1);
    }
    let mut v = n;
    let mut i = 0;
    while v >= 1000.0 && i < SUFFIXES.len() - 1 {
        v /= 1000.0;
        i += 1;
    }
    let mantissa = if v < 10.0 {
        format!("{:.2}", v)
    } else if v < 100.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v.floor() as u64)
    };
    format!("{} {}", mantissa, SUFFIXES[i])
}

/// "45s", "12m 5s" or "3h 20m".
pub fn format_duration(secs: f64) -> String {
    let s = secs.max(0.0);
    if s < 60.0 {
        format!("{}s", s.floor() as u64)
    } else if s < 3600.0 {
        format!("{}m {}s", (s / 60.0).floor() as u64, (s % 60.0).floor() as u64)
    } else {
        let h = (s / 3600.0).floor() as u64;
        let m = ((s % 3600.0) / 60.0).floor() as u64;
        format!("{}h {}m", h, m)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_format_number_no_panic(n in -1e80f64..1e80, sci in any::<bool>()) {
            let _ = format_number(n, sci);
        }

        #[test]
        fn prop_nonneg_has_no_minus(n in 0.0f64..1e30) {
            prop_assert!(!format_number(n, false).starts_with('-'));
        }

        #[test]
        fn prop_suffixed_mantissa_below_thousand(n in 1000.0f64..1e60) {
            let s = format_number(n, false);
            let mantissa: f64 = s.split(' ').next().unwrap().parse().unwrap();
            prop_assert!(mantissa >= 1.0 && mantissa < 1000.0, "{}", s);
        }
    }
}
