use tsp_exact::DistanceMatrix;

use crate::csv_import::{read_matrix, ImportError};

/// A named distance matrix shipped with the binary.
#[derive(Debug, Clone, Copy)]
pub struct Fixture {
    pub name: &'static str,
    pub n: usize,
    csv: &'static str,
}

pub const FIXTURES: &[Fixture] = &[
    Fixture {
        name: "asym4",
        n: 4,
        csv: include_str!("../data/fixture_4.csv"),
    },
    Fixture {
        name: "asym20",
        n: 20,
        csv: include_str!("../data/fixture_20.csv"),
    },
    Fixture {
        name: "asym21",
        n: 21,
        csv: include_str!("../data/fixture_21.csv"),
    },
];

impl Fixture {
    pub fn with_nodes(n: usize) -> Option<&'static Fixture> {
        FIXTURES.iter().find(|f| f.n == n)
    }

    pub fn by_name(name: &str) -> Option<&'static Fixture> {
        FIXTURES.iter().find(|f| f.name == name)
    }

    pub fn matrix(&self) -> Result<DistanceMatrix, ImportError> {
        read_matrix(self.csv.as_bytes())
    }
}

#[cfg(test)]
mod test_fixtures {
    use super::*;
    use tsp_exact::{held_karp, Cost, Tour};

    #[test]
    fn test_fixtures_parse() {
        for fixture in FIXTURES {
            let dists = fixture.matrix().unwrap();
            assert_eq!(dists.n(), fixture.n, "{}", fixture.name);
            assert!(!dists.is_symmetric(), "{}", fixture.name);
        }
    }

    #[test]
    fn test_asym4() {
        let dists = Fixture::by_name("asym4").unwrap().matrix().unwrap();
        assert_eq!(
            held_karp(&dists).unwrap(),
            Tour::from((vec![0, 2, 3, 1], Cost::new(21)))
        );
    }

    // Slow without optimizations.
    #[test]
    #[ignore]
    fn test_asym20() {
        let dists = Fixture::by_name("asym20").unwrap().matrix().unwrap();
        let tour = held_karp(&dists).unwrap();
        assert_eq!(
            tour,
            (
                vec![0, 18, 3, 13, 10, 1, 11, 17, 5, 19, 2, 7, 8, 12, 4, 16, 14, 6, 15, 9],
                193.into()
            )
                .into()
        );
        assert!(tour.is_consistent_with(&dists));
    }
}
