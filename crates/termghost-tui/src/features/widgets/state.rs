//! Sidebar widget models.
//!
//! Each widget owns an interval and only moves while the session runs.

use std::collections::VecDeque;
use std::time::Duration;

use rand::Rng;

pub const CPU_SAMPLES: usize = 30;
pub const TOTAL_MEMORY_GB: f64 = 16.0;

/// Fixed-period accumulator.
#[derive(Debug, Clone)]
struct Every {
    period: Duration,
    acc: Duration,
}

impl Every {
    const fn millis(ms: u64) -> Self {
        Self {
            period: Duration::from_millis(ms),
            acc: Duration::ZERO,
        }
    }

    /// Number of whole periods that completed during `elapsed`.
    fn ticks(&mut self, elapsed: Duration) -> u32 {
        self.acc += elapsed;
        let mut n = 0;
        while self.acc >= self.period {
            self.acc -= self.period;
            n += 1;
        }
        n
    }

    fn reset(&mut self) {
        self.acc = Duration::ZERO;
    }
}

#[derive(Debug, Clone)]
pub struct CpuGraph {
    samples: VecDeque<f64>,
    every: Every,
}

impl Default for CpuGraph {
    fn default() -> Self {
        Self {
            samples: std::iter::repeat_n(50.0, CPU_SAMPLES).collect(),
            every: Every::millis(500),
        }
    }
}

impl CpuGraph {
    pub fn samples(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }

    pub fn current(&self) -> f64 {
        self.samples.back().copied().unwrap_or(0.0)
    }

    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let last = self.current();
        let mut next = last + (rng.r#gen::<f64>() - 0.5) * 30.0;
        if rng.r#gen::<f64>() > 0.95 {
            next = rng.r#gen::<f64>() * 40.0 + 60.0;
        }
        if self.samples.len() == CPU_SAMPLES {
            self.samples.pop_front();
        }
        self.samples.push_back(next.clamp(5.0, 95.0));
    }
}

#[derive(Debug, Clone)]
pub struct MemoryBar {
    usage: f64,
    every: Every,
}

impl Default for MemoryBar {
    fn default() -> Self {
        Self {
            usage: 45.0,
            every: Every::millis(800),
        }
    }
}

impl MemoryBar {
    /// Percent in use.
    pub fn usage(&self) -> f64 {
        self.usage
    }

    pub fn used_gb(&self) -> f64 {
        self.usage / 100.0 * TOTAL_MEMORY_GB
    }

    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut next = self.usage + (rng.r#gen::<f64>() - 0.5) * 5.0;
        if rng.r#gen::<f64>() > 0.97 {
            next += rng.r#gen::<f64>() * 10.0;
        }
        if rng.r#gen::<f64>() > 0.98 {
            next -= rng.r#gen::<f64>() * 15.0;
        }
        self.usage = next.clamp(20.0, 85.0);
    }
}

#[derive(Debug, Clone)]
pub struct NetworkActivity {
    download: f64,
    upload: f64,
    every: Every,
}

impl Default for NetworkActivity {
    fn default() -> Self {
        Self {
            download: 0.0,
            upload: 0.0,
            every: Every::millis(300),
        }
    }
}

impl NetworkActivity {
    /// MB/s.
    pub fn download(&self) -> f64 {
        self.download
    }

    /// MB/s.
    pub fn upload(&self) -> f64 {
        self.upload
    }

    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R, downloading: bool) {
        if downloading {
            self.download = rng.r#gen::<f64>() * 80.0 + 40.0;
            self.upload = rng.r#gen::<f64>() * 5.0 + 0.5;
        } else {
            self.download = rng.r#gen::<f64>() * 3.0 + 0.1;
            self.upload = rng.r#gen::<f64>() + 0.05;
        }
    }

    fn zero(&mut self) {
        self.download = 0.0;
        self.upload = 0.0;
    }
}

/// The "Installation" ring.
#[derive(Debug, Clone)]
pub struct ProgressRing {
    progress: f64,
    every: Every,
}

impl Default for ProgressRing {
    fn default() -> Self {
        Self {
            progress: 0.0,
            every: Every::millis(2000),
        }
    }
}

impl ProgressRing {
    pub fn progress(&self) -> f64 {
        self.progress
    }

    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if rng.r#gen::<f64>() > 0.98 {
            self.progress = rng.r#gen::<f64>() * 30.0;
            return;
        }
        let next = self.progress + rng.r#gen::<f64>() * 3.0;
        self.progress = if next >= 100.0 { 0.0 } else { next };
    }
}

#[derive(Debug, Clone)]
pub struct Stats {
    packages: u32,
    errors: u32,
    every: Every,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            packages: 0,
            errors: 0,
            every: Every::millis(2000),
        }
    }
}

impl Stats {
    pub fn packages(&self) -> u32 {
        self.packages
    }

    pub fn errors(&self) -> u32 {
        self.errors
    }

    fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if rng.r#gen::<f64>() > 0.7 {
            self.packages += rng.gen_range(1..=3u32);
        }
        if rng.r#gen::<f64>() > 0.95 {
            self.errors += 1;
        }
    }
}

/// All sidebar widgets.
#[derive(Debug, Clone, Default)]
pub struct WidgetsState {
    pub cpu: CpuGraph,
    pub memory: MemoryBar,
    pub network: NetworkActivity,
    pub ring: ProgressRing,
    pub stats: Stats,
}

impl WidgetsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves every widget forward by `elapsed`.
    ///
    /// While stopped nothing moves, pending interval time is dropped and the
    /// network readings fall to zero.
    pub fn advance<R: Rng + ?Sized>(
        &mut self,
        elapsed: Duration,
        running: bool,
        downloading: bool,
        rng: &mut R,
    ) {
        if !running {
            self.cpu.every.reset();
            self.memory.every.reset();
            self.network.every.reset();
            self.ring.every.reset();
            self.stats.every.reset();
            self.network.zero();
            return;
        }

        for _ in 0..self.cpu.every.ticks(elapsed) {
            self.cpu.step(rng);
        }
        for _ in 0..self.memory.every.ticks(elapsed) {
            self.memory.step(rng);
        }
        for _ in 0..self.network.every.ticks(elapsed) {
            self.network.step(rng, downloading);
        }
        for _ in 0..self.ring.every.ticks(elapsed) {
            self.ring.step(rng);
        }
        for _ in 0..self.stats.every.ticks(elapsed) {
            self.stats.step(rng);
        }
    }
}

/// `12.3 MB/s`, or GB/s from 1000 MB/s up.
pub fn format_speed(mb_per_sec: f64) -> String {
    if mb_per_sec >= 1000.0 {
        format!("{:.1} GB/s", mb_per_sec / 1000.0)
    } else {
        format!("{mb_per_sec:.1} MB/s")
    }
}

/// `M:SS` without zero-padding the minutes.
pub fn format_elapsed(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    use super::*;

    #[test]
    fn test_every_counts_whole_periods() {
        let mut every = Every::millis(300);
        assert_eq!(every.ticks(Duration::from_millis(200)), 0);
        assert_eq!(every.ticks(Duration::from_millis(200)), 1);
        assert_eq!(every.ticks(Duration::from_millis(700)), 2);
        every.reset();
        assert_eq!(every.ticks(Duration::from_millis(299)), 0);
    }

    #[test]
    fn test_low_rng_walks_cpu_down_to_floor() {
        let mut widgets = WidgetsState::new();
        let mut rng = StepRng::new(0, 0);

        widgets.advance(Duration::from_millis(500), true, false, &mut rng);
        assert!((widgets.cpu.current() - 35.0).abs() < f64::EPSILON);

        widgets.advance(Duration::from_secs(5), true, false, &mut rng);
        assert!((widgets.cpu.current() - 5.0).abs() < f64::EPSILON);
        assert_eq!(widgets.cpu.samples().len(), CPU_SAMPLES);
    }

    #[test]
    fn test_network_follows_download_flag() {
        let mut widgets = WidgetsState::new();
        let mut rng = StepRng::new(0, 0);

        widgets.advance(Duration::from_millis(300), true, true, &mut rng);
        assert!((widgets.network.download() - 40.0).abs() < f64::EPSILON);
        assert!((widgets.network.upload() - 0.5).abs() < f64::EPSILON);

        widgets.advance(Duration::from_millis(300), true, false, &mut rng);
        assert!((widgets.network.download() - 0.1).abs() < f64::EPSILON);

        widgets.advance(Duration::from_millis(300), false, false, &mut rng);
        assert!(widgets.network.download().abs() < f64::EPSILON);
        assert!(widgets.network.upload().abs() < f64::EPSILON);
    }

    #[test]
    fn test_stopped_widgets_freeze() {
        let mut widgets = WidgetsState::new();
        let mut rng = StdRng::seed_from_u64(3);

        widgets.advance(Duration::from_secs(60), false, false, &mut rng);
        assert!((widgets.memory.usage() - 45.0).abs() < f64::EPSILON);
        assert!(widgets.ring.progress().abs() < f64::EPSILON);
        assert_eq!(widgets.stats.packages(), 0);
    }

    #[test]
    fn test_random_walks_stay_in_bounds() {
        let mut widgets = WidgetsState::new();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..2_000 {
            widgets.advance(Duration::from_millis(100), true, true, &mut rng);
            assert!((5.0..=95.0).contains(&widgets.cpu.current()));
            assert!((20.0..=85.0).contains(&widgets.memory.usage()));
            assert!((0.0..100.0).contains(&widgets.ring.progress()));
            assert!((40.0..=120.0).contains(&widgets.network.download()));
        }
        assert!(widgets.stats.packages() > 0);
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_speed(42.04), "42.0 MB/s");
        assert_eq!(format_speed(1250.0), "1.2 GB/s");
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(605), "10:05");
    }
}
