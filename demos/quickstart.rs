//! Quickstart example demonstrating basic usage of epidenoise.
//!
//! Run with: cargo run --example quickstart

use epidenoise::denoise::SvdDenoiser;
use epidenoise::smoothing::{post_process, smooth, FieldKind, DEFAULT_RESAMPLE_FACTOR};
use epidenoise::threshold::{optimal_svht_coef, NoiseLevel};

fn main() {
    println!("=== epidenoise Quickstart ===\n");

    // 1. Two years of weekly case counts with a yearly season and jitter
    let cases: Vec<f64> = (0..104)
        .map(|i| {
            let season = (2.0 * std::f64::consts::PI * i as f64 / 52.0).sin();
            (120.0 + 90.0 * season + ((i * 7919) % 23) as f64 - 11.0).max(0.0)
        })
        .collect();
    println!("Created series with {} weekly observations", cases.len());

    // 2. Denoise with a one-year Hankel window
    println!("\n--- SVD denoising (window 52) ---");
    let result = SvdDenoiser::new(52).denoise(&cases).unwrap();
    println!("Aspect ratio: {:.4}", result.aspect_ratio);
    println!(
        "Threshold coefficient: {:.4}",
        optimal_svht_coef(result.aspect_ratio, NoiseLevel::Unknown).unwrap()
    );
    if let Some(threshold) = result.threshold {
        println!("Hard threshold: {:.4}", threshold);
    }
    println!("Selected rank: {}", result.rank);
    println!("Retained energy: {:.2}%", 100.0 * result.retained_energy());
    println!(
        "Leading singular values: {:?}",
        &result.singular_values[..5.min(result.singular_values.len())]
    );

    // 3. Smooth and finalise as counts
    println!("\n--- Savitzky-Golay + spline smoothing ---");
    let smoothed = smooth(&result.denoised, 11, 3, DEFAULT_RESAMPLE_FACTOR).unwrap();
    let finished = post_process(&smoothed, FieldKind::Count);

    println!("{:>6} {:>10} {:>10} {:>10}", "week", "raw", "denoised", "final");
    for i in (0..cases.len()).step_by(13) {
        println!(
            "{:>6} {:>10.1} {:>10.2} {:>10.0}",
            i + 1,
            cases[i],
            result.denoised[i],
            finished[i]
        );
    }

    println!("\n=== Quickstart Complete ===");
}
