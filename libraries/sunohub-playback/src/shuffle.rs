//! Shuffle picking

use rand::Rng;

/// Pick a random queue index to play next
///
/// Uniform over the queue. When there is more than one song and the pick
/// lands on `current`, the following index is used instead so the same
/// song never plays twice in a row. This is collision avoidance only, not
/// a no-repeat-until-exhausted shuffle.
pub fn pick_next_index<R: Rng + ?Sized>(
    rng: &mut R,
    len: usize,
    current: Option<usize>,
) -> Option<usize> {
    if len == 0 {
        return None;
    }

    let pick = rng.gen_range(0..len);
    if len > 1 && Some(pick) == current {
        Some((pick + 1) % len)
    } else {
        Some(pick)
    }
}
