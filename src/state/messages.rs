//! Overtime message pool and random selection

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Messages shown once the countdown runs out
pub const OVERTIME_MESSAGES: [&str; 10] = [
    "Time to wrap it up! ⏰",
    "Your minute is showing... 👀",
    "Houston, we have overtime! 🚀",
    "The clock is judging you now ⏱️",
    "Brevity is the soul of wit! 🎭",
    "TL;DR time! 📝",
    "Red means stop talking! 🛑",
    "Even your coffee is getting cold ☕️",
    "Short and sweet, please! 🍬",
    "The timer is giving you the look 👁️",
];

/// Used when the pool yields nothing
pub const FALLBACK_MESSAGE: &str = "Time to wrap it up!";

/// Source of randomness for picking an overtime message
pub trait RandomSource: Send {
    /// Pick an index in `0..len`, or `None` when `len` is zero
    fn pick(&mut self, len: usize) -> Option<usize>;
}

/// Thread-local RNG, the default for the running application
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| rand::thread_rng().gen_range(0..len))
    }
}

/// Seeded RNG for reproducible runs
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.gen_range(0..len))
    }
}

/// Draw a message from `pool`, falling back to [`FALLBACK_MESSAGE`]
pub fn pick_message(pool: &[&str], random: &mut dyn RandomSource) -> String {
    random
        .pick(pool.len())
        .and_then(|index| pool.get(index))
        .map(|message| message.to_string())
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Option<usize>);

    impl RandomSource for Fixed {
        fn pick(&mut self, _len: usize) -> Option<usize> {
            self.0
        }
    }

    #[test]
    fn test_pick_message_uses_index() {
        let message = pick_message(&OVERTIME_MESSAGES, &mut Fixed(Some(2)));
        assert_eq!(message, "Houston, we have overtime! 🚀");
    }

    #[test]
    fn test_empty_pool_falls_back() {
        assert_eq!(pick_message(&[], &mut ThreadRandom), FALLBACK_MESSAGE);
        assert_eq!(pick_message(&[], &mut SeededRandom::new(7)), FALLBACK_MESSAGE);
    }

    #[test]
    fn test_out_of_range_pick_falls_back() {
        let message = pick_message(&OVERTIME_MESSAGES, &mut Fixed(Some(42)));
        assert_eq!(message, FALLBACK_MESSAGE);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut a = SeededRandom::new(1234);
        let mut b = SeededRandom::new(1234);
        for _ in 0..20 {
            assert_eq!(a.pick(10), b.pick(10));
        }
    }

    #[test]
    fn test_thread_random_stays_in_range() {
        let mut random = ThreadRandom;
        for _ in 0..100 {
            let index = random.pick(OVERTIME_MESSAGES.len()).unwrap();
            assert!(index < OVERTIME_MESSAGES.len());
        }
    }
}
