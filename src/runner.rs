use crate::clock::Clock;
use std::hint::black_box;
use std::time::Duration;

/// Invokes `op` back to back until `duration` has elapsed on `clock`,
/// returning how many invocations completed.
///
/// The deadline is checked between invocations, so the loop can overrun
/// `duration` by up to one call of `op`. Panics in `op` are not caught.
pub fn run_for<C, F, R>(clock: &C, duration: Duration, mut op: F) -> u64
where
    C: Clock + ?Sized,
    F: FnMut() -> R,
{
    let start = clock.now();
    let mut count = 0u64;

    while clock.now().duration_since(start) < duration {
        black_box(op());
        count += 1;
    }

    count
}
