use chrono::{DateTime, TimeDelta, Utc};

/// The `last_modified` value to stamp on a row that was last modified at
/// `previous`, given the current clock reading `now`.
///
/// Always strictly later than `previous`, even if the clock has not advanced
/// (or has stepped backwards) since the last write.
pub fn next_modified(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
  if now > previous {
    now
  } else {
    previous + TimeDelta::microseconds(1)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn uses_clock_when_it_moved_forward() {
    let previous = Utc::now();
    let now = previous + TimeDelta::seconds(5);
    assert_eq!(next_modified(previous, now), now);
  }

  #[test]
  fn still_advances_when_clock_is_stale() {
    let previous = Utc::now();
    assert!(next_modified(previous, previous) > previous);
    assert!(next_modified(previous, previous - TimeDelta::seconds(1)) > previous);
  }
}
