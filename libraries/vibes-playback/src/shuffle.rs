//! Shuffle selection
//!
//! Picks the next track uniformly among every track except the current one.

use rand::Rng;

/// Pick a random track index in `[0, len)` other than `current`
///
/// Uses index exclusion rather than resampling: draw from the `len - 1`
/// remaining slots and shift past `current`. With a single track (or when
/// nothing is loaded) any index is allowed.
///
/// `len` must be non-zero.
pub fn pick_other_index<R: Rng + ?Sized>(rng: &mut R, len: usize, current: Option<usize>) -> usize {
    debug_assert!(len > 0, "cannot shuffle an empty album");

    match current {
        Some(current) if len > 1 && current < len => {
            let candidate = rng.gen_range(0..len - 1);
            if candidate >= current {
                candidate + 1
            } else {
                candidate
            }
        }
        _ => rng.gen_range(0..len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn never_repeats_current_track() {
        let mut rng = StdRng::seed_from_u64(7);
        for current in 0..5 {
            for _ in 0..200 {
                assert_ne!(pick_other_index(&mut rng, 5, Some(current)), current);
            }
        }
    }

    #[test]
    fn single_track_returns_itself() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(pick_other_index(&mut rng, 1, Some(0)), 0);
    }

    #[test]
    fn two_tracks_alternate() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(pick_other_index(&mut rng, 2, Some(0)), 1);
        assert_eq!(pick_other_index(&mut rng, 2, Some(1)), 0);
    }

    #[test]
    fn nothing_loaded_allows_any_index() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; 3];
        for _ in 0..300 {
            seen[pick_other_index(&mut rng, 3, None)] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn distribution_is_roughly_uniform_over_others() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = [0usize; 4];
        for _ in 0..8000 {
            counts[pick_other_index(&mut rng, 4, Some(2))] += 1;
        }
        assert_eq!(counts[2], 0);
        for (i, count) in counts.iter().enumerate() {
            if i != 2 {
                // Expected ~2667 each
                assert!(
                    (2300..3050).contains(count),
                    "index {} drawn {} times",
                    i,
                    count
                );
            }
        }
    }
}
