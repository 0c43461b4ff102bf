//! Round-trip tests: synthesize a key, detect it back
//!
//! Covers the clean-signal contract end to end: every key in the 16-key
//! alphabet must be recovered exactly, with and without the pre-filter and
//! validity gates, down to a 20 ms block.

use rustydtmf::config::KEYS;
use rustydtmf::tracing_init::init_test_tracing;
use rustydtmf::{generate_dtmf, AdaptiveDetector, Detector, DetectorConfig, ToneEnergies};

const SAMPLE_RATE: f32 = 8000.0;

#[test]
fn recovers_every_key_from_20ms_clean_block() {
    init_test_tracing();
    let detector = Detector::new(DetectorConfig::default()).unwrap();

    for &key in &KEYS {
        let signal = generate_dtmf(key, None, 0.02, SAMPLE_RATE).unwrap();
        assert_eq!(
            detector.identify_key(&signal, false, false),
            Some(key),
            "20 ms clean block for '{}' must round-trip exactly",
            key
        );
    }
}

#[test]
fn recovers_every_key_with_filter_and_gates() {
    init_test_tracing();
    let detector = Detector::new(DetectorConfig::default()).unwrap();

    for &key in &KEYS {
        let signal = generate_dtmf(key, None, 0.1, SAMPLE_RATE).unwrap();
        assert_eq!(
            detector.identify_key(&signal, true, true),
            Some(key),
            "100 ms clean block for '{}' must pass the full pipeline",
            key
        );
    }
}

#[test]
fn clean_key_has_dominant_peaks_in_both_groups() {
    init_test_tracing();
    let detector = Detector::new(DetectorConfig::default()).unwrap();

    let signal = generate_dtmf('5', None, 0.04, SAMPLE_RATE).unwrap();
    let energies = detector.energies(&signal);

    let (top_low, second_low) = ToneEnergies::top_two(&energies.low);
    let (top_high, second_high) = ToneEnergies::top_two(&energies.high);
    let threshold = detector.config().peak_ratio_threshold;

    assert!(
        top_low / (second_low + 1e-10) > threshold,
        "low-group dominance too weak: {} vs {}",
        top_low,
        second_low
    );
    assert!(
        top_high / (second_high + 1e-10) > threshold,
        "high-group dominance too weak: {} vs {}",
        top_high,
        second_high
    );
}

#[test]
fn detects_key_5_at_30db_with_validity() {
    init_test_tracing();
    let detector = Detector::new(DetectorConfig::default()).unwrap();

    // 200 ms at 30 dB: essentially clean, must survive both gates
    let signal = generate_dtmf('5', Some(30.0), 0.2, SAMPLE_RATE).unwrap();
    assert_eq!(detector.identify_key(&signal, true, true), Some('5'));

    let energies = detector.energies(&signal);
    let (top_low, second_low) = ToneEnergies::top_two(&energies.low);
    let (top_high, second_high) = ToneEnergies::top_two(&energies.high);
    assert!(top_low / (second_low + 1e-10) > 1.5);
    assert!(top_high / (second_high + 1e-10) > 1.5);
}

#[test]
fn adaptive_detects_moderately_noisy_key() {
    init_test_tracing();
    let adaptive = AdaptiveDetector::with_defaults().unwrap();

    // -8 dB over a 1 s buffer: the probe still sees the tones clearly
    // enough to commit a short window and decide correctly.
    let signal = generate_dtmf('5', Some(-8.0), 1.0, SAMPLE_RATE).unwrap();
    let (key, mode) = adaptive.detect(&signal);
    assert_eq!(key, Some('5'));
    assert_ne!(mode, rustydtmf::DetectionMode::Insufficient);
}
