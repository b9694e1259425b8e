use std::{
    error::Error,
    fs::File,
    io::BufReader,
    io::{BufRead, BufWriter, Write},
    path::Path,
};

use tsp_exact::{DistanceMatrix, Node, Tour};

/// Reads a tour with one node id per line and prices it with `dists`.
pub fn import_tour(filename: &Path, dists: &DistanceMatrix) -> Result<Tour, Box<dyn Error>> {
    let file = File::open(filename)?;
    let reader = BufReader::new(file);

    let mut ids: Vec<Node> = vec![];
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let id = line.parse::<usize>()?;
        if id >= dists.n() {
            return Err(format!("tour visits node {}, but the matrix has {} nodes", id, dists.n()).into());
        }
        ids.push(Node::new(id));
    }
    Ok(Tour::with_cost_from(ids, dists))
}

pub fn check_tour(dists: &DistanceMatrix, tour: &Tour) -> bool {
    tour.is_hamiltonian(dists.n())
}

pub fn export_tour(filename: &Path, tour: &Tour) -> Result<(), Box<dyn Error>> {
    let file = File::create(filename)?;
    let mut writer = BufWriter::new(file);

    for node in tour {
        writeln!(writer, "{}", node.id())?;
    }
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod test_tour_io {
    use super::*;
    use tsp_exact::held_karp;

    fn get_matrix() -> DistanceMatrix {
        DistanceMatrix::from_rows(&[
            vec![0usize, 2, 9, 10],
            vec![1, 0, 6, 4],
            vec![15, 7, 0, 8],
            vec![6, 3, 12, 0],
        ])
        .unwrap()
    }

    #[test]
    fn test_export_import() {
        let dists = get_matrix();
        let tour = held_karp(&dists).unwrap();
        let path = std::env::temp_dir().join(format!("tour_io_{}.txt", std::process::id()));

        export_tour(&path, &tour).unwrap();
        let imported = import_tour(&path, &dists).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(imported, tour);
        assert!(check_tour(&dists, &imported));
    }

    #[test]
    fn test_import_out_of_range() {
        let dists = get_matrix();
        let path = std::env::temp_dir().join(format!("tour_io_range_{}.txt", std::process::id()));
        std::fs::write(&path, "0\n1\n7\n").unwrap();
        let res = import_tour(&path, &dists);
        std::fs::remove_file(&path).unwrap();

        assert!(res.is_err());
    }

    #[test]
    fn test_check_incomplete_tour() {
        let dists = get_matrix();
        let tour = Tour::with_cost_from(vec![Node::new(0), Node::new(2)], &dists);
        assert!(!check_tour(&dists, &tour));
    }
}
