use rand::{rngs::StdRng, Rng, SeedableRng};
use tsp_exact::{Cost, DistanceMatrix, InvalidInputError};

use crate::{csv_import::ImportError, fixtures::Fixture};

pub struct CostConfig {
    min: Cost,
    max: Cost,
}

/// Endless supply of random symmetric distance matrices with a zero diagonal.
pub struct RandomMatrixGenerator {
    n: usize,
    cost_config: CostConfig,
    rng: StdRng,
}

impl RandomMatrixGenerator {
    /// Costs are drawn uniformly from `[1, 99]`.
    pub fn default_costs(n: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        RandomMatrixGenerator {
            n,
            cost_config: CostConfig {
                min: 1.into(),
                max: 99.into(),
            },
            rng,
        }
    }

    fn random_cost(&mut self) -> Cost {
        self.rng
            .gen_range(self.cost_config.min..=self.cost_config.max)
    }
}

impl Iterator for RandomMatrixGenerator {
    type Item = DistanceMatrix;

    fn next(&mut self) -> Option<Self::Item> {
        let mut rows = vec![vec![Cost::zero(); self.n]; self.n];
        for i in 0..self.n {
            for j in i + 1..self.n {
                let cost = self.random_cost();
                rows[i][j] = cost;
                rows[j][i] = cost;
            }
        }
        DistanceMatrix::from_rows(&rows).ok()
    }
}

/// The distance matrix for a generated instance on `n` nodes.
///
/// Sizes with a named fixture use that fixture, all others a random symmetric matrix.
pub fn generate_distances(n: usize, seed: Option<u64>) -> Result<DistanceMatrix, ImportError> {
    if let Some(fixture) = Fixture::with_nodes(n) {
        log::info!("Using fixture {} for {} nodes.", fixture.name, n);
        return fixture.matrix();
    }
    log::info!("Generating random symmetric distances for {} nodes.", n);
    let dists = RandomMatrixGenerator::default_costs(n, seed)
        .next()
        .ok_or(InvalidInputError::Empty)?;
    Ok(dists)
}
