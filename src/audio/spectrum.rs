//! Sample tap and FFT spectrum snapshots for the visualizer

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use rodio::source::SeekError;
use rodio::Source;
use rustfft::{num_complex::Complex, Fft, FftPlanner};

/// Magnitude buckets per spectrum snapshot.
pub const SPECTRUM_BUCKETS: usize = 32;

const FFT_WINDOW: usize = 1024;
const RING_CAPACITY: usize = 4096;

/// Shared view of the samples flowing through the current source. The tap is
/// re-armed on every load; while nothing is armed, spectrum sampling reports
/// no data.
#[derive(Clone, Default)]
pub struct TapHandle {
    ring: Arc<Mutex<VecDeque<f32>>>,
    consumed: Arc<AtomicU64>,
    sample_rate: Arc<AtomicU32>,
    channels: Arc<AtomicU32>,
}

impl TapHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the tap for a new source.
    pub fn arm(&self, sample_rate: u32, channels: u16) {
        self.ring.lock().clear();
        self.consumed.store(0, Ordering::SeqCst);
        self.sample_rate.store(sample_rate, Ordering::SeqCst);
        self.channels.store(u32::from(channels.max(1)), Ordering::SeqCst);
    }

    /// Disarm, e.g. on session reset.
    pub fn disarm(&self) {
        self.ring.lock().clear();
        self.sample_rate.store(0, Ordering::SeqCst);
    }

    pub fn is_armed(&self) -> bool {
        self.sample_rate.load(Ordering::SeqCst) > 0
    }

    /// Playback position derived from the samples actually consumed by the
    /// output, so no separate clock is needed.
    pub fn position(&self) -> Duration {
        let rate = self.sample_rate.load(Ordering::SeqCst);
        let channels = self.channels.load(Ordering::SeqCst).max(1);
        if rate == 0 {
            return Duration::ZERO;
        }
        let frames = self.consumed.load(Ordering::SeqCst) / u64::from(channels);
        Duration::from_secs_f64(frames as f64 / f64::from(rate))
    }

    fn record(&self, sample: f32) {
        self.consumed.fetch_add(1, Ordering::Relaxed);
        let mut ring = self.ring.lock();
        if ring.len() == RING_CAPACITY {
            ring.pop_front();
        }
        ring.push_back(sample);
    }

    fn rewind_to(&self, position: Duration) {
        let rate = self.sample_rate.load(Ordering::SeqCst);
        let channels = self.channels.load(Ordering::SeqCst).max(1);
        let frames = (position.as_secs_f64() * f64::from(rate)) as u64;
        self.consumed.store(frames * u64::from(channels), Ordering::SeqCst);
        self.ring.lock().clear();
    }
}

/// A pass-through source that copies every sample into the tap ring on its
/// way to the output.
pub struct TapSource<S> {
    inner: S,
    tap: TapHandle,
}

impl<S> TapSource<S>
where
    S: Source<Item = f32>,
{
    pub fn new(inner: S, tap: TapHandle) -> Self {
        tap.arm(inner.sample_rate(), inner.channels());
        Self { inner, tap }
    }
}

impl<S> Iterator for TapSource<S>
where
    S: Source<Item = f32>,
{
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        let sample = self.inner.next()?;
        self.tap.record(sample);
        Some(sample)
    }
}

impl<S> Source for TapSource<S>
where
    S: Source<Item = f32>,
{
    fn current_frame_len(&self) -> Option<usize> {
        self.inner.current_frame_len()
    }

    fn channels(&self) -> u16 {
        self.inner.channels()
    }

    fn sample_rate(&self) -> u32 {
        self.inner.sample_rate()
    }

    fn total_duration(&self) -> Option<Duration> {
        self.inner.total_duration()
    }

    fn try_seek(&mut self, pos: Duration) -> Result<(), SeekError> {
        self.inner.try_seek(pos)?;
        self.tap.rewind_to(pos);
        Ok(())
    }
}

/// Forward FFT over a Hann-windowed slice of the tap ring, folded into
/// [`SPECTRUM_BUCKETS`] normalized magnitudes.
pub struct SpectrumAnalyzer {
    fft: Arc<dyn Fft<f32>>,
    window: Vec<f32>,
}

impl SpectrumAnalyzer {
    pub fn new() -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(FFT_WINDOW);
        let window = (0..FFT_WINDOW)
            .map(|i| {
                let phase = (i as f32) / (FFT_WINDOW as f32 - 1.0);
                0.5 - 0.5 * (2.0 * std::f32::consts::PI * phase).cos()
            })
            .collect();
        Self { fft, window }
    }

    /// One snapshot per call, nothing buffered across calls. `None` while
    /// the tap is disarmed or has not yet seen a full window.
    pub fn sample(&self, tap: &TapHandle) -> Option<Vec<f32>> {
        if !tap.is_armed() {
            return None;
        }

        let mut buffer: Vec<Complex<f32>> = {
            let ring = tap.ring.lock();
            if ring.len() < FFT_WINDOW {
                return None;
            }
            ring.iter()
                .skip(ring.len() - FFT_WINDOW)
                .zip(self.window.iter())
                .map(|(sample, w)| Complex::new(sample * w, 0.0))
                .collect()
        };

        self.fft.process(&mut buffer);

        let bins_per_bucket = (FFT_WINDOW / 2) / SPECTRUM_BUCKETS;
        let scale = 2.0 / FFT_WINDOW as f32;
        let mut buckets = Vec::with_capacity(SPECTRUM_BUCKETS);
        for bucket in 0..SPECTRUM_BUCKETS {
            let start = 1 + bucket * bins_per_bucket;
            let sum: f32 = buffer[start..start + bins_per_bucket]
                .iter()
                .map(|c| c.norm() * scale)
                .sum();
            let level = (sum / bins_per_bucket as f32).sqrt();
            buckets.push(level.clamp(0.0, 1.0));
        }
        Some(buckets)
    }
}

impl Default for SpectrumAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disarmed_tap_yields_no_snapshot() {
        let analyzer = SpectrumAnalyzer::new();
        let tap = TapHandle::new();
        assert!(analyzer.sample(&tap).is_none());
    }

    #[test]
    fn partial_window_yields_no_snapshot() {
        let analyzer = SpectrumAnalyzer::new();
        let tap = TapHandle::new();
        tap.arm(44_100, 2);
        for _ in 0..100 {
            tap.record(0.5);
        }
        assert!(analyzer.sample(&tap).is_none());
    }

    #[test]
    fn full_window_yields_bucketed_magnitudes() {
        let analyzer = SpectrumAnalyzer::new();
        let tap = TapHandle::new();
        tap.arm(44_100, 1);
        // A 1 kHz-ish sine so at least one bucket carries energy.
        for i in 0..FFT_WINDOW {
            let t = i as f32 / 44_100.0;
            tap.record((2.0 * std::f32::consts::PI * 1000.0 * t).sin());
        }
        let snapshot = analyzer.sample(&tap).unwrap();
        assert_eq!(snapshot.len(), SPECTRUM_BUCKETS);
        assert!(snapshot.iter().any(|&m| m > 0.01));
        assert!(snapshot.iter().all(|&m| (0.0..=1.0).contains(&m)));
    }

    #[test]
    fn position_tracks_consumed_frames() {
        let tap = TapHandle::new();
        tap.arm(1_000, 2);
        for _ in 0..4_000 {
            tap.record(0.0);
        }
        // 4000 samples over 2 channels at 1 kHz is two seconds.
        assert_eq!(tap.position(), Duration::from_secs(2));
    }
}
