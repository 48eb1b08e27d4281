//! Shared utilities for integration tests

#![allow(dead_code)]

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Regularly sampled light curve with a slow sinusoidal trend, a box transit
/// and white noise, all reproducible from `seed`
pub struct SyntheticLightCurve {
    pub time: Vec<f64>,
    pub flux: Vec<f64>,
    pub trend: Vec<f64>,
    pub in_transit: Vec<bool>,
}

pub fn synthetic_light_curve(seed: u64, n: usize, cadence: f64, noise: f64) -> SyntheticLightCurve {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, noise).unwrap();

    let time: Vec<f64> = (0..n).map(|i| i as f64 * cadence).collect();
    let span = time.last().copied().unwrap_or(0.0);
    let transit_center = span * 0.5;
    let transit_half_width = 0.05;

    let trend: Vec<f64> = time
        .iter()
        .map(|t| 1.0 + 0.02 * (2.0 * std::f64::consts::PI * t / 10.0).sin())
        .collect();
    let in_transit: Vec<bool> = time
        .iter()
        .map(|t| (t - transit_center).abs() < transit_half_width)
        .collect();
    let flux = trend
        .iter()
        .zip(&in_transit)
        .map(|(base, &dip)| {
            let depth = if dip { 0.99 } else { 1.0 };
            base * depth + normal.sample(&mut rng)
        })
        .collect();

    SyntheticLightCurve {
        time,
        flux,
        trend,
        in_transit,
    }
}

/// Cut out `[from, to)` from a regularly sampled series to make a data gap
pub fn with_gap(time: &[f64], flux: &[f64], from: usize, to: usize) -> (Vec<f64>, Vec<f64>) {
    let keep = |i: &usize| *i < from || *i >= to;
    (
        (0..time.len()).filter(keep).map(|i| time[i]).collect(),
        (0..flux.len()).filter(keep).map(|i| flux[i]).collect(),
    )
}
