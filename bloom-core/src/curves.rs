//! Closed-form maturation curves.
//!
//! Both curves are evaluated from scratch each tick from a relative age, so
//! the result depends only on `(structural_age, spawn_age)` and never drifts.

/// Asymptotic growth: `target * (1 - e^(-relative_age * rate))`.
///
/// Zero at `relative_age = 0`, ~95% of `target` at `relative_age = 3 / rate`.
#[inline]
pub fn asymptotic_growth(target: f32, relative_age: f32, rate: f32) -> f32 {
    let age = relative_age.max(0.0);
    target * (1.0 - (-age * rate).exp())
}

/// Linear ramp from 0 to `target` over `duration`, flat afterwards.
#[inline]
pub fn linear_ramp(target: f32, relative_age: f32, duration: f32) -> f32 {
    target * (relative_age.max(0.0) / duration).min(1.0)
}
