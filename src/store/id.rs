//! Post identifier generation.
//!
//! Identifiers are wall-clock milliseconds, bumped past the last issued value
//! so that two posts created within the same millisecond never share an id.

#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an id that already exists so later ids sort after it.
    pub fn observe(&mut self, id: i64) {
        if self.last.map_or(true, |last| id > last) {
            self.last = Some(id);
        }
    }

    /// Next id given the clock reading `now_ms`.
    pub fn next_id_at(&mut self, now_ms: i64) -> i64 {
        let id = match self.last {
            Some(last) if now_ms <= last => last.saturating_add(1),
            _ => now_ms,
        };
        self.last = Some(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_uses_clock_when_ahead() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id_at(1000), 1000);
        assert_eq!(ids.next_id_at(2000), 2000);
    }

    #[test]
    fn test_same_tick_does_not_collide() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next_id_at(1000), 1000);
        assert_eq!(ids.next_id_at(1000), 1001);
        assert_eq!(ids.next_id_at(1000), 1002);
    }

    #[test]
    fn test_clock_going_backwards() {
        let mut ids = IdGenerator::new();
        ids.next_id_at(5000);
        assert_eq!(ids.next_id_at(10), 5001);
    }

    #[test]
    fn test_observe_existing_ids() {
        let mut ids = IdGenerator::new();
        ids.observe(300);
        ids.observe(100);
        assert_eq!(ids.next_id_at(200), 301);
    }

    #[test]
    fn test_wall_clock_ids_strictly_increase() {
        let mut ids = IdGenerator::new();
        let mut prev = ids.next_id_at(Utc::now().timestamp_millis());
        for _ in 0..1000 {
            let id = ids.next_id_at(Utc::now().timestamp_millis());
            assert!(id > prev);
            prev = id;
        }
    }
}
