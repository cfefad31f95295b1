use crate::LonLat;

/// Cumulative distance in meters from the first point to every point along a path. The first
/// entry is always 0, and entries never decrease. Duplicate adjacent points just repeat a value.
#[derive(Clone, Debug, PartialEq)]
pub struct DistanceTable {
    cumulative: Vec<f64>,
}

impl DistanceTable {
    pub fn new(pts: &[LonLat]) -> Self {
        let mut cumulative = Vec::with_capacity(pts.len());
        if !pts.is_empty() {
            cumulative.push(0.0);
        }
        let mut total = 0.0;
        for pair in pts.windows(2) {
            total += pair[0].gps_dist(pair[1]);
            cumulative.push(total);
        }
        Self { cumulative }
    }

    pub fn cumulative(&self) -> &[f64] {
        &self.cumulative
    }

    /// Length of the whole path in meters
    pub fn total(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn monotonic_with_duplicates() {
        let pts = vec![
            LonLat::new(0.0, 0.0),
            LonLat::new(0.0, 1.0),
            LonLat::new(0.0, 1.0),
            LonLat::new(1.0, 1.0),
            LonLat::new(0.5, 0.2),
        ];
        let table = DistanceTable::new(&pts);
        assert_eq!(table.len(), pts.len());
        assert_eq!(table.cumulative()[0], 0.0);
        for pair in table.cumulative().windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(table.cumulative()[1], table.cumulative()[2]);
        assert_eq!(table.total(), *table.cumulative().last().unwrap());
    }

    #[test]
    fn degenerate_paths() {
        let single = DistanceTable::new(&[LonLat::new(3.0, 4.0)]);
        assert_eq!(single.cumulative(), &[0.0]);
        assert_eq!(single.total(), 0.0);

        let empty = DistanceTable::new(&[]);
        assert!(empty.is_empty());
        assert_eq!(empty.total(), 0.0);
    }
}
