//! Inter-batch delay policy and the fixed engine delays.
//!
//! All delays are expressed in milliseconds before being turned into a
//! [`Duration`]. `print_speed` is a percent-of-normal dial (100 = normal,
//! 200 = twice as fast), `scroll_speed` runs 1-10 with 5 as the baseline.

use std::time::Duration;

use rand::Rng;

/// Base jitter bands: (cumulative probability, min ms, max ms).
const JITTER_BANDS: [(f64, f64, f64); 3] = [
    // quick output
    (0.6, 50.0, 300.0),
    // medium pause
    (0.9, 300.0, 1000.0),
    // longer pause
    (1.0, 1000.0, 3000.0),
];

/// Cursor reveal delay before a batch is fetched (not speed adjusted).
pub const REVEAL_DELAY_MS: (f64, f64) = (50.0, 150.0);

/// Progress animation tick delay, before speed adjustment.
pub const TICK_DELAY_MS: (f64, f64) = (150.0, 350.0);

/// Pause after a cohort completes, before speed adjustment.
pub const SETTLE_DELAY_MS: f64 = 200.0;

/// Multiplier applied for the print speed dial.
pub fn speed_multiplier(print_speed: u16) -> f64 {
    100.0 / f64::from(print_speed.max(1))
}

/// Draws one base sample from the jitter distribution.
pub fn base_sample<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let roll: f64 = rng.r#gen();
    let (_, min, max) = JITTER_BANDS
        .iter()
        .copied()
        .find(|(cumulative, _, _)| roll < *cumulative)
        .unwrap_or(JITTER_BANDS[JITTER_BANDS.len() - 1]);
    min + rng.r#gen::<f64>() * (max - min)
}

/// Applies both dials to a base sample: `base / (scroll / 5) * (100 / print)`.
pub fn scaled_delay_ms(base_ms: f64, scroll_speed: u8, print_speed: u16) -> f64 {
    let scroll_factor = f64::from(scroll_speed.max(1)) / 5.0;
    base_ms / scroll_factor * speed_multiplier(print_speed)
}

/// Delay before the next playback cycle.
pub fn next_delay<R: Rng + ?Sized>(rng: &mut R, scroll_speed: u8, print_speed: u16) -> Duration {
    millis(scaled_delay_ms(base_sample(rng), scroll_speed, print_speed))
}

pub fn reveal_delay<R: Rng + ?Sized>(rng: &mut R) -> Duration {
    let (min, max) = REVEAL_DELAY_MS;
    millis(min + rng.r#gen::<f64>() * (max - min))
}

pub fn tick_delay<R: Rng + ?Sized>(rng: &mut R, print_speed: u16) -> Duration {
    let (min, max) = TICK_DELAY_MS;
    millis((min + rng.r#gen::<f64>() * (max - min)) * speed_multiplier(print_speed))
}

pub fn settle_delay(print_speed: u16) -> Duration {
    millis(SETTLE_DELAY_MS * speed_multiplier(print_speed))
}

fn millis(ms: f64) -> Duration {
    Duration::from_nanos((ms.max(0.0) * 1_000_000.0).round() as u64)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_next_delay_bounds_at_normal_speed() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10_000 {
            let delay = next_delay(&mut rng, 5, 100);
            assert!(delay >= Duration::from_millis(50), "{delay:?}");
            assert!(delay <= Duration::from_millis(3000), "{delay:?}");
        }
    }

    #[test]
    fn test_print_speed_200_halves_delay() {
        let mut a = StdRng::seed_from_u64(11);
        let mut b = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let base_a = base_sample(&mut a);
            let base_b = base_sample(&mut b);
            assert!((base_a - base_b).abs() < f64::EPSILON);

            let normal = scaled_delay_ms(base_a, 5, 100);
            let fast = scaled_delay_ms(base_b, 5, 200);
            assert!((normal / 2.0 - fast).abs() < 1e-9);
        }
    }

    #[test]
    fn test_scroll_speed_10_doubles_rate() {
        let normal = scaled_delay_ms(400.0, 5, 100);
        let fast = scaled_delay_ms(400.0, 10, 100);
        let slow = scaled_delay_ms(400.0, 1, 100);
        assert!((normal - 400.0).abs() < 1e-9);
        assert!((fast - 200.0).abs() < 1e-9);
        assert!((slow - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_jitter_distribution_roughly_matches_bands() {
        let mut rng = StdRng::seed_from_u64(3);
        let samples: Vec<f64> = (0..20_000).map(|_| base_sample(&mut rng)).collect();
        let quick = samples.iter().filter(|s| **s < 300.0).count() as f64 / 20_000.0;
        let long = samples.iter().filter(|s| **s >= 1000.0).count() as f64 / 20_000.0;
        assert!((quick - 0.6).abs() < 0.03, "quick share {quick}");
        assert!((long - 0.1).abs() < 0.02, "long share {long}");
    }

    #[test]
    fn test_fixed_delays_scale_with_print_speed() {
        assert_eq!(settle_delay(100), Duration::from_millis(200));
        assert_eq!(settle_delay(200), Duration::from_millis(100));
        assert_eq!(settle_delay(50), Duration::from_millis(400));

        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..1000 {
            let tick = tick_delay(&mut rng, 100);
            assert!(tick >= Duration::from_millis(150) && tick <= Duration::from_millis(350));
            let reveal = reveal_delay(&mut rng);
            assert!(reveal >= Duration::from_millis(50) && reveal <= Duration::from_millis(150));
        }
    }
}
