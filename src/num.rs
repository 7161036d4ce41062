//! Display formatting for derivation traces and reports.
//!
//! Every value shown in a derivation step is rounded to about six
//! significant digits (the `%g` convention): trailing zeros are trimmed,
//! integers print bare, and extreme magnitudes switch to exponent form.

/// Format `v` with six significant digits.
pub fn sig6(v: f64) -> String {
    sig(v, 6)
}

/// Format `v` with `digits` significant digits.
pub fn sig(v: f64, digits: usize) -> String {
    if v == 0.0 {
        return "0".to_string();
    }
    if !v.is_finite() {
        return v.to_string();
    }

    let digits = digits.max(1) as i32;
    let exp = v.abs().log10().floor() as i32;

    if exp < -4 || exp >= digits {
        let s = format!("{:.*e}", (digits - 1) as usize, v);
        let Some((mantissa, exponent)) = s.split_once('e') else {
            return s;
        };
        let mantissa = mantissa.trim_end_matches('0').trim_end_matches('.');
        format!("{mantissa}e{exponent}")
    } else {
        let decimals = (digits - 1 - exp).max(0) as usize;
        let s = format!("{v:.decimals$}");
        if s.contains('.') {
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        } else {
            s
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_print_bare() {
        assert_eq!(sig6(2.0), "2");
        assert_eq!(sig6(-3.0), "-3");
        assert_eq!(sig6(0.0), "0");
        assert_eq!(sig6(42.0), "42");
    }

    #[test]
    fn fractions_trim_trailing_zeros() {
        assert_eq!(sig6(0.5), "0.5");
        assert_eq!(sig6(-0.25), "-0.25");
        assert_eq!(sig6(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn six_significant_digits() {
        assert_eq!(sig6(123456.7), "123457");
        assert_eq!(sig6(2.718281828), "2.71828");
    }

    #[test]
    fn extreme_magnitudes_use_exponent_form() {
        assert_eq!(sig6(1234567.0), "1.23457e6");
        assert_eq!(sig6(0.000012345678), "1.23457e-5");
    }

    #[test]
    fn non_finite_values_pass_through() {
        assert_eq!(sig6(f64::NAN), "NaN");
        assert_eq!(sig6(f64::INFINITY), "inf");
    }
}
