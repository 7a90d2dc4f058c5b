use crate::types::Tick;

/// Whether `a` comes after `b`, treating ticks as a wrapping sequence.
/// A tick that is more than half the range ahead is considered behind.
pub fn tick_is_newer(a: Tick, b: Tick) -> bool {
    tick_diff(b, a) > 0
}

/// Whether `a` comes before `b` in wrapping order
pub fn tick_is_older(a: Tick, b: Tick) -> bool {
    tick_is_newer(b, a)
}

/// Signed distance from `from` to `to`, taking the shorter way around
pub fn tick_diff(from: Tick, to: Tick) -> i16 {
    to.wrapping_sub(from) as i16
}
