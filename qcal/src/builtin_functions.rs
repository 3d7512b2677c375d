use qcal_value::BuiltinVars;

/// Returns the default [`BuiltinVars`] that should be used.
///
/// Identifiers cannot contain digits, so `log10`, `log2` and `pow10` cannot be called from source
/// (`log10(x)` is read as `log`, `10`, `(x)`). They are still registered for hosts that call them
/// through [`BuiltinVars::native_fn`].
pub fn default_builtin_vars() -> BuiltinVars {
    let mut builtin_vars = BuiltinVars::new();

    builtin_vars.add_constant("pi", std::f64::consts::PI);
    builtin_vars.add_constant("e", std::f64::consts::E);

    builtin_vars.add_native_fn("abs", |args| args[0].abs(), 1);
    builtin_vars.add_native_fn("ceil", |args| args[0].ceil(), 1);
    builtin_vars.add_native_fn("floor", |args| args[0].floor(), 1);
    builtin_vars.add_native_fn("round", |args| args[0].round(), 1);
    builtin_vars.add_native_fn("sqrt", |args| args[0].sqrt(), 1);
    builtin_vars.add_native_fn("cbrt", |args| args[0].cbrt(), 1);
    builtin_vars.add_native_fn("ln", |args| args[0].ln(), 1);
    builtin_vars.add_native_fn("log10", |args| args[0].log10(), 1);
    builtin_vars.add_native_fn("log2", |args| args[0].log2(), 1);
    builtin_vars.add_native_fn("pow10", |args| 10f64.powf(args[0]), 1);

    builtin_vars.add_native_fn("sin", |args| args[0].sin(), 1);
    builtin_vars.add_native_fn("cos", |args| args[0].cos(), 1);
    builtin_vars.add_native_fn("tan", |args| args[0].tan(), 1);
    builtin_vars.add_native_fn("sinh", |args| args[0].sinh(), 1);
    builtin_vars.add_native_fn("cosh", |args| args[0].cosh(), 1);
    builtin_vars.add_native_fn("tanh", |args| args[0].tanh(), 1);
    builtin_vars.add_native_fn("arcsin", |args| args[0].asin(), 1);
    builtin_vars.add_native_fn("arccos", |args| args[0].acos(), 1);
    builtin_vars.add_native_fn("arctan", |args| args[0].atan(), 1);
    builtin_vars.add_native_fn("arcsinh", |args| args[0].asinh(), 1);
    builtin_vars.add_native_fn("arccosh", |args| args[0].acosh(), 1);
    builtin_vars.add_native_fn("arctanh", |args| args[0].atanh(), 1);
    builtin_vars.add_native_fn("gamma", |args| gamma(args[0]), 1);

    builtin_vars.add_native_fn("min", |args| args[0].min(args[1]), 2);
    builtin_vars.add_native_fn("max", |args| args[0].max(args[1]), 2);
    // log base `args[1]` of `args[0]`
    builtin_vars.add_native_fn("log", |args| args[0].ln() / args[1].ln(), 2);
    builtin_vars.add_native_fn("pow", |args| args[0].powf(args[1]), 2);
    builtin_vars.add_native_fn("hypot", |args| args[0].hypot(args[1]), 2);

    builtin_vars
}

const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// The gamma function, using the Lanczos approximation. Poles (zero and the negative integers)
/// give NaN.
pub fn gamma(x: f64) -> f64 {
    if x.is_nan() || (x <= 0.0 && x.fract() == 0.0) {
        return f64::NAN;
    }
    if x < 0.5 {
        // reflection formula
        return std::f64::consts::PI / ((std::f64::consts::PI * x).sin() * gamma(1.0 - x));
    }

    let x = x - 1.0;
    let t = x + LANCZOS_G + 0.5;
    let sum = LANCZOS_COEFFICIENTS[1..]
        .iter()
        .enumerate()
        .fold(LANCZOS_COEFFICIENTS[0], |acc, (i, c)| acc + c / (x + i as f64 + 1.0));

    (2.0 * std::f64::consts::PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * sum
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn test_gamma() {
        assert!(approx_eq(gamma(1.0), 1.0));
        assert!(approx_eq(gamma(5.0), 24.0));
        assert!(approx_eq(gamma(0.5), std::f64::consts::PI.sqrt()));
        assert!(approx_eq(gamma(-0.5), -2.0 * std::f64::consts::PI.sqrt()));
        assert!(gamma(0.0).is_nan());
        assert!(gamma(-2.0).is_nan());
    }

    #[test]
    fn test_default_builtin_vars() {
        let builtin_vars = default_builtin_vars();
        assert!(builtin_vars.is_constant("pi"));
        assert!(builtin_vars.is_constant("e"));
        assert!(!builtin_vars.is_constant("sqrt"));
        for ident in &["abs", "gamma", "arctanh", "pow10", "log", "hypot"] {
            assert!(builtin_vars.native_fn(ident).is_some(), "missing {}", ident);
        }
    }
}
