use std::time::{Duration, Instant};

const FPS_SAMPLE_COUNT: usize = 60;

/// Display refresh interval at 60 Hz.
pub const FRAME_INTERVAL: Duration = Duration::from_micros(16_667);
/// Interval used by hosts that cannot observe the display refresh.
pub const FALLBACK_FRAME_INTERVAL: Duration = Duration::from_millis(17);

/// Paces frames for hosts that have to wait for the next frame themselves.
pub struct FramePacer {
    pub interval: Duration,
    last_instant: Option<Instant>,
    pub frame_count: u64,
    pub real_dt: f64,

    fps_samples: [f64; FPS_SAMPLE_COUNT],
    fps_sample_index: usize,
    pub smoothed_fps: f64,
}

impl FramePacer {
    pub fn new(interval: Duration) -> Self {
        let nominal = interval.as_secs_f64();
        Self {
            interval,
            last_instant: None,
            frame_count: 0,
            real_dt: 0.0,
            fps_samples: [nominal; FPS_SAMPLE_COUNT],
            fps_sample_index: 0,
            smoothed_fps: if nominal > 0.0 { 1.0 / nominal } else { 0.0 },
        }
    }

    pub fn fallback() -> Self {
        Self::new(FALLBACK_FRAME_INTERVAL)
    }

    /// How long to wait at `now` before the next frame is due. The first
    /// frame is due immediately.
    pub fn time_until_next(&self, now: Instant) -> Duration {
        match self.last_instant {
            Some(last) => (last + self.interval).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }

    pub fn mark_frame(&mut self, now: Instant) {
        self.real_dt = match self.last_instant {
            Some(last) => now.saturating_duration_since(last).as_secs_f64(),
            None => self.interval.as_secs_f64(),
        };
        self.last_instant = Some(now);
        self.frame_count += 1;

        if self.real_dt > 0.25 {
            log::warn!("Frame took {:.1}ms", self.real_dt * 1000.0);
        }

        // FPS smoothing
        self.fps_samples[self.fps_sample_index] = self.real_dt;
        self.fps_sample_index = (self.fps_sample_index + 1) % FPS_SAMPLE_COUNT;
        let avg_dt: f64 = self.fps_samples.iter().sum::<f64>() / FPS_SAMPLE_COUNT as f64;
        self.smoothed_fps = if avg_dt > 0.0 { 1.0 / avg_dt } else { 0.0 };
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new(FRAME_INTERVAL)
    }
}
