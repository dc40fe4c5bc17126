// Copyright 2025 the Vela Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `f64` math that `core` lacks, routed to `libm` when `std` is off.

/// Float math helpers for `f64` in `no_std` mode.
pub(crate) trait FloatExt {
    fn floor(self) -> Self;
    fn ceil(self) -> Self;
    fn round(self) -> Self;
    fn log10(self) -> Self;
    fn ln(self) -> Self;
    fn powf(self, n: Self) -> Self;
    fn powi(self, n: i32) -> Self;
    fn sin(self) -> Self;
    fn cos(self) -> Self;
}

macro_rules! forward_to_libm {
    ($($name:ident => $libm:ident),* $(,)?) => {
        $(
            fn $name(self) -> Self {
                libm::$libm(self)
            }
        )*
    };
}

#[cfg(all(not(feature = "std"), feature = "libm"))]
impl FloatExt for f64 {
    forward_to_libm!(
        floor => floor,
        ceil => ceil,
        round => round,
        log10 => log10,
        ln => log,
        sin => sin,
        cos => cos,
    );

    fn powf(self, n: Self) -> Self {
        libm::pow(self, n)
    }

    fn powi(self, n: i32) -> Self {
        libm::pow(self, f64::from(n))
    }
}

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("vela_charts requires either the `std` or `libm` feature");
