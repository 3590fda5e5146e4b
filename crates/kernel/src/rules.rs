//! Fixed B3/S23 transition rule.

/// Next state of a cell given its current state and live neighbor count.
///
/// | alive | neighbors | next |
/// |-------|-----------|------|
/// | true  | < 2       | dead (underpopulation) |
/// | true  | 2 or 3    | alive |
/// | true  | > 3       | dead (overpopulation) |
/// | false | 3         | alive (reproduction) |
/// | false | otherwise | dead |
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2 | 3) | (false, 3))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_rule_table() {
        for n in 0..=8u8 {
            assert_eq!(next_state(true, n), n == 2 || n == 3, "alive with {n}");
            assert_eq!(next_state(false, n), n == 3, "dead with {n}");
        }
    }
}
