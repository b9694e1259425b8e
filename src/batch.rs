use std::{error::Error, path::Path, time::Instant};

use csv::WriterBuilder;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tsp_exact::{
    brute_force, brute_force::MAX_BRUTE_FORCE_NODES, held_karp, held_karp::MAX_NODES, Cost,
    DistanceMatrix, InvalidInputError,
};

use crate::gen_matrix::RandomMatrixGenerator;

#[derive(Serialize, Clone, Debug)]
pub struct Row {
    instance: usize,
    n: usize,
    cost: Cost,
    tour: String,
    micros: u64,
    brute_force: Option<Cost>,
}

impl Row {
    fn matches_oracle(&self) -> bool {
        self.brute_force.map_or(true, |cost| cost == self.cost)
    }
}

fn solve_instance(
    instance: usize,
    dists: &DistanceMatrix,
    verify: bool,
) -> Result<Row, InvalidInputError> {
    let start = Instant::now();
    let tour = held_karp(dists)?;
    let micros = start.elapsed().as_micros() as u64;

    let oracle = if verify {
        Some(brute_force(dists)?.cost())
    } else {
        None
    };

    Ok(Row {
        instance,
        n: dists.n(),
        cost: tour.cost(),
        tour: tour
            .nodes()
            .iter()
            .map(|n| n.id().to_string())
            .collect::<Vec<String>>()
            .join(" "),
        micros,
        brute_force: oracle,
    })
}

/// Solves `num` random instances on `n` nodes in parallel and writes one csv row per instance.
pub fn execute_batch(
    n: usize,
    num: usize,
    seed: Option<u64>,
    verify: bool,
    output: &Path,
) -> Result<Vec<Row>, Box<dyn Error>> {
    let max = if verify { MAX_BRUTE_FORCE_NODES } else { MAX_NODES };
    if n > max {
        return Err(InvalidInputError::TooManyNodes { n, max }.into());
    }

    log::info!("Starting batch of {} instances with {} nodes.", num, n);

    let instances: Vec<(usize, DistanceMatrix)> = RandomMatrixGenerator::default_costs(n, seed)
        .take(num)
        .enumerate()
        .collect();

    let pb = ProgressBar::new(instances.len() as u64);
    pb.set_style(ProgressStyle::default_bar().template(
        "{msg} {spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ({pos}/{len})",
    ));
    pb.set_message("Held-Karp");

    let rows = instances
        .par_iter()
        .progress_with(pb)
        .map(|(i, dists)| solve_instance(*i, dists, verify))
        .collect::<Result<Vec<Row>, InvalidInputError>>()?;

    let mismatches: Vec<&Row> = rows.iter().filter(|row| !row.matches_oracle()).collect();
    for row in &mismatches {
        log::error!(
            "Instance {}: Held-Karp found {}, brute force {:?}.",
            row.instance,
            row.cost,
            row.brute_force
        );
    }

    export(&rows, output)?;
    log::info!("Exported {} rows to {:?}.", rows.len(), output);

    if !mismatches.is_empty() {
        return Err(format!("{} instances disagree with brute force", mismatches.len()).into());
    }
    Ok(rows)
}

pub fn export(rows: &[Row], output: &Path) -> Result<(), Box<dyn Error>> {
    let mut writer = WriterBuilder::new().from_path(output)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod test_batch {
    use super::*;

    #[test]
    fn test_batch_with_verification() {
        let output = std::env::temp_dir().join(format!("batch_{}.csv", std::process::id()));
        let rows = execute_batch(6, 8, Some(5), true, &output).unwrap();
        let written = std::fs::read_to_string(&output).unwrap();
        std::fs::remove_file(&output).unwrap();

        assert_eq!(rows.len(), 8);
        assert!(rows.iter().all(|row| row.matches_oracle() && row.brute_force.is_some()));
        assert!(written.starts_with("instance,n,cost,tour,micros,brute_force\n"));
        assert_eq!(written.lines().count(), 9);
    }

    #[test]
    fn test_rows_in_instance_order() {
        let output = std::env::temp_dir().join(format!("batch_order_{}.csv", std::process::id()));
        let rows = execute_batch(5, 4, Some(9), false, &output).unwrap();
        std::fs::remove_file(&output).unwrap();

        let instances: Vec<usize> = rows.iter().map(|row| row.instance).collect();
        assert_eq!(instances, vec![0, 1, 2, 3]);
        assert!(rows.iter().all(|row| row.brute_force.is_none()));
    }

    #[test]
    fn test_oversized_batch_is_rejected_before_generation() {
        let output = std::env::temp_dir().join(format!("batch_large_{}.csv", std::process::id()));
        let err = execute_batch(100_000, 1, Some(1), false, &output).unwrap_err();
        assert_eq!(
            err.to_string(),
            InvalidInputError::TooManyNodes { n: 100_000, max: MAX_NODES }.to_string()
        );

        let err = execute_batch(MAX_BRUTE_FORCE_NODES + 1, 1, Some(1), true, &output).unwrap_err();
        assert!(err.to_string().contains(&MAX_BRUTE_FORCE_NODES.to_string()));
        assert!(!output.exists());
    }
}
