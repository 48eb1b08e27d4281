//! End-to-end behaviour of the detrending pipeline

mod common;

use approx::assert_abs_diff_eq;
use common::{synthetic_light_curve, with_gap};
use robust_detrend::{
    flatten, CollaboratorParams, CollaboratorRegistry, Error, ExecutionStrategy, FlattenConfig,
    Flattener, GapSegmenter, Method, Result, Segment,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn median(values: &mut [f64]) -> f64 {
    values.sort_by(f64::total_cmp);
    values[values.len() / 2]
}

#[test]
fn test_gap_example() {
    let time = [0.0, 1.0, 2.0, 10.0, 11.0, 12.0];
    let segments = GapSegmenter::new(2.0).segment(&time);
    assert_eq!(segments, vec![Segment::new(0, 3), Segment::new(3, 6)]);
}

#[test]
fn test_edge_cutoff_example() {
    let time: Vec<f64> = (0..=40).map(|i| i as f64 * 0.25).collect();
    let flux = vec![1.0; time.len()];
    let config = FlattenConfig::default()
        .with_window_length(4.0)
        .with_edge_cutoff(1.0)
        .with_return_trend(true);
    let output = flatten(&time, &flux, &config).unwrap();
    let trend = output.trend.unwrap();

    for (t, value) in time.iter().zip(&trend) {
        if *t <= 1.0 || *t >= 9.0 {
            assert!(value.is_nan(), "trend at t={t} should be missing");
        } else {
            assert_eq!(*value, 1.0, "trend at t={t}");
        }
    }
    for (value, flat) in trend.iter().zip(&output.flux) {
        assert_eq!(value.is_nan(), flat.is_nan());
    }
}

#[test]
fn test_edge_cutoff_boundary_sample_is_blanked() {
    let time: Vec<f64> = (0..=10).map(f64::from).collect();
    let flux = vec![1.0; time.len()];
    let config = FlattenConfig::new(Method::Median)
        .with_window_length(4.0)
        .with_edge_cutoff(1.0)
        .with_return_trend(true);
    let trend = flatten(&time, &flux, &config).unwrap().trend.unwrap();
    assert!(trend[1].is_nan(), "trend at t=1 is {}", trend[1]);
    assert!(trend[9].is_nan(), "trend at t=9 is {}", trend[9]);
    assert_eq!(trend[2], 1.0);
    assert_eq!(trend[8], 1.0);
}

#[test]
fn test_proportiontocut_out_of_range() {
    let time = [0.0, 1.0, 2.0];
    let flux = [1.0, 1.0, 1.0];
    let config = FlattenConfig::new(Method::TrimMean).with_proportiontocut(0.6);
    let err = flatten(&time, &flux, &config).unwrap_err();
    assert!(matches!(err, Error::InvalidParameter(_)), "{err}");
    assert!(err.to_string().contains("proportiontocut"));
}

#[test]
fn test_unknown_method_name() {
    let err = "not_a_method".parse::<Method>().unwrap_err();
    assert!(matches!(err, Error::InvalidMethod(_)));
    assert_eq!(err.to_string(), "Invalid method: not_a_method");
}

#[test]
fn test_constant_series_for_every_windowed_method() {
    let time: Vec<f64> = (0..120).map(|i| i as f64 * 0.05).collect();
    let flux = vec![0.9875; time.len()];
    for method in Method::ALL.into_iter().filter(Method::is_time_windowed) {
        let config = FlattenConfig::new(method)
            .with_window_length(0.6)
            .with_return_trend(true);
        let (flat, trend) = flatten(&time, &flux, &config).unwrap().into_parts();
        assert!(flat.iter().all(|&f| f == 1.0), "{method} did not flatten to 1");
        assert!(trend.unwrap().iter().all(|&t| t == 0.9875), "{method} trend");
    }
}

#[test]
fn test_constant_series_for_cadence_filters() {
    let time: Vec<f64> = (0..60).map(|i| i as f64 * 0.02).collect();
    let flux = vec![1.3; time.len()];
    for method in [Method::Medfilt, Method::Savgol] {
        let config = FlattenConfig::new(method).with_window_length(9.0);
        let output = flatten(&time, &flux, &config).unwrap();
        for f in &output.flux {
            assert_abs_diff_eq!(*f, 1.0, epsilon = 1e-9);
        }
    }
}

#[test]
fn test_non_finite_samples_are_masked() {
    let time: Vec<f64> = (0..200).map(|i| i as f64 * 0.01).collect();
    let mut flux: Vec<f64> = time.iter().map(|t| 1.0 + 0.001 * t).collect();
    let mut time_with_holes = time.clone();
    flux[10] = f64::NAN;
    flux[77] = f64::INFINITY;
    time_with_holes[120] = f64::NAN;

    let config = FlattenConfig::new(Method::Median)
        .with_window_length(0.3)
        .with_return_trend(true);
    let output = flatten(&time_with_holes, &flux, &config).unwrap();
    let trend = output.trend.as_ref().unwrap();

    for i in 0..time.len() {
        let masked = matches!(i, 10 | 77 | 120);
        assert_eq!(output.flux[i].is_finite(), !masked, "flux at {i}");
        assert_eq!(trend[i].is_finite(), !masked, "trend at {i}");
    }
}

#[test]
fn test_all_missing_input() {
    let time = [f64::NAN; 5];
    let flux = [1.0; 5];
    let output = flatten(&time, &flux, &FlattenConfig::default().with_return_trend(true)).unwrap();
    assert_eq!(output.len(), 5);
    assert!(output.flux.iter().all(|f| f.is_nan()));
    assert!(output.trend.unwrap().iter().all(|t| t.is_nan()));
}

#[test]
fn test_transit_survives_flattening() {
    let lc = synthetic_light_curve(1234, 2000, 0.01, 1e-4);
    let config = FlattenConfig::new(Method::Biweight).with_window_length(0.5);
    let output = flatten(&lc.time, &lc.flux, &config).unwrap();

    let mut in_transit: Vec<f64> = output
        .flux
        .iter()
        .zip(&lc.in_transit)
        .filter_map(|(&f, &dip)| dip.then_some(f))
        .collect();
    let depth = 1.0 - median(&mut in_transit);
    assert!(depth > 0.007 && depth < 0.013, "transit depth {depth}");

    let mut residuals: Vec<f64> = output
        .flux
        .iter()
        .zip(&lc.time)
        .filter(|&(_, &t)| (t - 10.0).abs() > 0.5)
        .map(|(&f, _)| (f - 1.0).abs())
        .collect();
    assert!(median(&mut residuals) < 5e-4);
}

#[test]
fn test_trend_tracks_slow_variation() {
    let lc = synthetic_light_curve(99, 1500, 0.01, 5e-5);
    let config = FlattenConfig::new(Method::Welsch)
        .with_window_length(0.4)
        .with_edge_cutoff(0.2)
        .with_return_trend(true);
    let trend = flatten(&lc.time, &lc.flux, &config).unwrap().trend.unwrap();
    for ((t, got), want) in lc.time.iter().zip(&trend).zip(&lc.trend) {
        if got.is_finite() && (t - 7.5).abs() > 0.5 {
            assert_abs_diff_eq!(*got, *want, epsilon = 1e-3);
        }
    }
}

#[test]
fn test_gap_edges_are_cut_per_segment() {
    let lc = synthetic_light_curve(5, 600, 0.01, 1e-4);
    let (time, flux) = with_gap(&lc.time, &lc.flux, 250, 350);
    let config = FlattenConfig::new(Method::Huber)
        .with_window_length(0.5)
        .with_edge_cutoff(0.1);
    let output = flatten(&time, &flux, &config).unwrap();

    // Last sample before the gap and first after it border a segment edge
    assert!(output.flux[249].is_nan());
    assert!(output.flux[250].is_nan());
    assert!(output.flux[0].is_nan());
    assert!(output.flux[time.len() - 1].is_nan());
    assert!(output.flux[125].is_finite());
    assert!(output.flux[400].is_finite());
}

#[test]
fn test_zero_break_tolerance_keeps_one_segment() {
    let lc = synthetic_light_curve(6, 600, 0.01, 1e-4);
    let (time, flux) = with_gap(&lc.time, &lc.flux, 250, 350);
    let config = FlattenConfig::new(Method::Median)
        .with_window_length(0.5)
        .with_edge_cutoff(0.1)
        .with_break_tolerance(0.0);
    let output = flatten(&time, &flux, &config).unwrap();
    assert!(output.flux[249].is_finite());
    assert!(output.flux[250].is_finite());
    assert!(output.flux[0].is_nan());
}

#[test]
fn test_single_point_segments() {
    let time = [0.0, 10.0, 20.0];
    let flux = [0.5, 2.0, 1.5];
    for method in Method::ALL.into_iter().filter(Method::is_time_windowed) {
        let config = FlattenConfig::new(method)
            .with_window_length(1.0)
            .with_edge_cutoff(0.4)
            .with_return_trend(true);
        let output = flatten(&time, &flux, &config).unwrap();
        assert_eq!(output.trend.unwrap(), flux.to_vec(), "{method}");
        assert_eq!(output.flux, vec![1.0; 3], "{method}");
    }
}

#[test]
fn test_single_point_segments_skip_backend() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let registry = CollaboratorRegistry::empty()
        .with(
            Method::Gp,
            Arc::new(move |_: &[f64], flux: &[f64], _: &CollaboratorParams| -> Result<Vec<f64>> {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(vec![0.0; flux.len()])
            }),
        )
        .unwrap();
    let flattener = Flattener::with_registry(
        FlattenConfig::new(Method::Gp).with_return_trend(true),
        registry,
    );
    let output = flattener.flatten(&[0.0, 10.0], &[3.0, 4.0]).unwrap();
    assert_eq!(output.trend.unwrap(), vec![3.0, 4.0]);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_missing_collaborator_names_dependency() {
    let time: Vec<f64> = (0..10).map(f64::from).collect();
    let flux = vec![1.0; 10];
    for method in [
        Method::Lowess,
        Method::HSpline,
        Method::SuperSmoother,
        Method::Cofiam,
        Method::Gp,
        Method::Untrendy,
        Method::PSpline,
    ] {
        let err = flatten(&time, &flux, &FlattenConfig::new(method)).unwrap_err();
        match &err {
            Error::MissingCollaborator { method: name, dependency } => {
                assert_eq!(name, method.name());
                assert!(err.to_string().contains(dependency.as_str()));
            }
            other => panic!("{method}: unexpected {other:?}"),
        }
    }
}

#[test]
fn test_custom_collaborator_receives_segments() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = seen.clone();
    let segment_mean = move |_: &[f64], flux: &[f64], params: &CollaboratorParams| -> Result<Vec<f64>> {
        counter.fetch_add(1, Ordering::SeqCst);
        assert_eq!(params.method, Method::Lowess);
        assert_eq!(params.window_length, 0.8);
        assert_eq!(params.cval, Some(3.0));
        let mean = flux.iter().sum::<f64>() / flux.len() as f64;
        Ok(vec![mean; flux.len()])
    };

    let mut flattener = Flattener::new(
        FlattenConfig::new(Method::Lowess)
            .with_window_length(0.8)
            .with_cval(3.0)
            .with_return_trend(true),
    );
    flattener
        .registry_mut()
        .register(Method::Lowess, Arc::new(segment_mean))
        .unwrap();

    let time = [0.0, 0.1, 0.2, 5.0, 5.1, 5.2];
    let flux = [1.0, 2.0, 3.0, 4.0, 4.0, 4.0];
    let output = flattener.flatten(&time, &flux).unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 2);
    assert_eq!(output.trend.unwrap(), vec![2.0, 2.0, 2.0, 4.0, 4.0, 4.0]);
    assert_eq!(output.flux[0], 0.5);
    assert_eq!(output.flux[5], 1.0);
}

#[test]
fn test_collaborator_errors_propagate() {
    let failing = |_: &[f64], _: &[f64], _: &CollaboratorParams| -> Result<Vec<f64>> {
        Err(anyhow::anyhow!("spline did not converge").into())
    };
    let registry = CollaboratorRegistry::empty()
        .with(Method::PSpline, Arc::new(failing))
        .unwrap();
    let flattener = Flattener::with_registry(FlattenConfig::new(Method::PSpline), registry);
    let err = flattener.flatten(&[0.0, 0.5, 1.0], &[1.0; 3]).unwrap_err();
    assert!(matches!(err, Error::Other(_)));
    assert!(err.to_string().contains("spline did not converge"));
}

#[test]
fn test_parallel_matches_sequential() {
    let lc = synthetic_light_curve(77, 3000, 0.005, 2e-4);
    let (time, flux) = with_gap(&lc.time, &lc.flux, 1000, 1400);
    for method in [Method::Biweight, Method::Hodges, Method::Winsorize, Method::Savgol] {
        let base = FlattenConfig::new(method)
            .with_window_length(if method.is_cadence_based() { 31.0 } else { 0.5 })
            .with_edge_cutoff(0.1)
            .with_return_trend(true);
        let seq = flatten(&time, &flux, &base.clone().with_strategy(ExecutionStrategy::Sequential)).unwrap();
        let par = flatten(&time, &flux, &base.with_strategy(ExecutionStrategy::Parallel)).unwrap();
        let bits = |v: &[f64]| v.iter().map(|x| x.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(seq.flux.as_slice()), bits(par.flux.as_slice()), "{method}");
        assert_eq!(bits(seq.trend.as_deref().unwrap()), bits(par.trend.as_deref().unwrap()));
    }
}

#[test]
fn test_config_from_json() {
    let config: FlattenConfig = serde_json::from_str(
        r#"{
            "method": "trim_mean",
            "window_length": 0.7,
            "edge_cutoff": 0.1,
            "proportiontocut": 0.2,
            "return_trend": true,
            "strategy": "parallel"
        }"#,
    )
    .unwrap();
    let params = config.resolve().unwrap();
    assert_eq!(params.method, Method::TrimMean);
    assert_eq!(params.cval, 0.2);
    assert_eq!(params.break_tolerance, 0.35);
    assert_eq!(params.strategy, ExecutionStrategy::Parallel);
}
