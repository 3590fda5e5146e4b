use std::collections::VecDeque;

/// Detects when a grid revisits one of its recent states.
///
/// Keeps the last `capacity` state hashes. A still life reports period 1,
/// a blinker period 2. Periods longer than the capacity go unnoticed.
#[derive(Debug, Clone)]
pub struct CycleDetector {
    history: VecDeque<u64>,
    capacity: usize,
}

impl CycleDetector {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a state hash; returns the period if it was seen recently.
    pub fn observe(&mut self, hash: u64) -> Option<usize> {
        let period = self
            .history
            .iter()
            .rev()
            .position(|&h| h == hash)
            .map(|pos| pos + 1);

        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back(hash);

        if let Some(period) = period {
            tracing::trace!(period, "state repeated");
        }
        period
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Hashes currently remembered.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl Default for CycleDetector {
    fn default() -> Self {
        Self::new(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifegrid_kernel::Grid;

    #[test]
    fn first_sighting_is_not_a_cycle() {
        let mut d = CycleDetector::default();
        assert_eq!(d.observe(1), None);
        assert_eq!(d.observe(2), None);
        assert_eq!(d.len(), 2);
    }

    #[test]
    fn reports_distance_to_last_match() {
        let mut d = CycleDetector::new(8);
        for h in [5, 6, 7] {
            d.observe(h);
        }
        assert_eq!(d.observe(6), Some(2));
        assert_eq!(d.observe(6), Some(1));
    }

    #[test]
    fn forgets_beyond_capacity() {
        let mut d = CycleDetector::new(2);
        d.observe(1);
        d.observe(2);
        d.observe(3);
        assert_eq!(d.len(), 2);
        assert_eq!(d.observe(1), None);
    }

    #[test]
    fn clear_resets_history() {
        let mut d = CycleDetector::new(4);
        d.observe(9);
        d.clear();
        assert!(d.is_empty());
        assert_eq!(d.observe(9), None);
    }

    #[test]
    fn still_life_and_blinker_periods() {
        let mut block = Grid::from_live_cells(6, 6, [(1, 1), (1, 2), (2, 1), (2, 2)]).unwrap();
        let mut d = CycleDetector::default();
        d.observe(block.state_hash());
        block.advance();
        assert_eq!(d.observe(block.state_hash()), Some(1));

        let mut blinker = Grid::from_live_cells(5, 5, [(2, 1), (2, 2), (2, 3)]).unwrap();
        let mut d = CycleDetector::default();
        d.observe(blinker.state_hash());
        blinker.advance();
        assert_eq!(d.observe(blinker.state_hash()), None);
        blinker.advance();
        assert_eq!(d.observe(blinker.state_hash()), Some(2));
    }
}
