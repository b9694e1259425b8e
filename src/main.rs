mod batch;
mod csv_import;
mod fixtures;
mod gen_matrix;
mod tour_io;

use std::{
    error::Error,
    path::{Path, PathBuf},
    time::Instant,
};

use clap::{Args, CommandFactory, ErrorKind, Parser, Subcommand};
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;
use tsp_exact::{brute_force, held_karp, DistanceMatrix};

use batch::execute_batch;
use csv_import::csv_import;
use fixtures::Fixture;
use gen_matrix::generate_distances;
use tour_io::{check_tour, export_tour, import_tour};

/// Computes optimal traveling salesman tours with the Held-Karp algorithm.
#[derive(Parser)]
#[clap(name = "held-karp", version)]
struct Cli {
    #[clap(subcommand)]
    command: Option<Command>,

    #[clap(flatten)]
    solve: Solve,

    #[clap(long, global = true, default_value = "info")]
    log_level: LevelFilter,

    #[clap(long, global = true, default_value = "logs", parse(from_os_str))]
    log_dir: PathBuf,
}

#[derive(Subcommand)]
enum Command {
    /// Solve random instances in parallel and export the results
    Batch(Batch),
}

#[derive(Args)]
struct Solve {
    /// A `.csv` distance matrix, a fixture name or the number of nodes of a generated instance
    input: Option<String>,

    /// Refuse instances with more nodes
    #[clap(long, default_value = "21")]
    max_nodes: usize,

    /// Seed for randomly generated instances
    #[clap(long)]
    seed: Option<u64>,

    /// Compare the optimal cost with brute force
    #[clap(long)]
    verify: bool,

    /// Export the optimal tour, one node id per line
    #[clap(short, long, parse(from_os_str))]
    write_tour: Option<PathBuf>,

    /// Compare a tour read from a file with the optimal tour
    #[clap(short, long, parse(from_os_str))]
    check_tour: Option<PathBuf>,
}

#[derive(Args)]
struct Batch {
    #[clap(short, long, default_value = "10")]
    num_nodes: usize,

    #[clap()]
    num: usize,

    #[clap(long)]
    seed: Option<u64>,

    /// Compare every optimal cost with brute force
    #[clap(long)]
    verify: bool,

    #[clap(short, long, default_value = "results.csv", parse(from_os_str))]
    output: PathBuf,
}

fn load_matrix(solve: &Solve) -> Result<DistanceMatrix, Box<dyn Error>> {
    let input = match &solve.input {
        Some(input) => input,
        None => Cli::command()
            .error(
                ErrorKind::MissingRequiredArgument,
                "expected a .csv file, a fixture name or a number of nodes",
            )
            .exit(),
    };

    if Path::new(input).extension().map_or(false, |ext| ext == "csv") {
        let dists = csv_import(Path::new(input))?;
        check_size(dists.n(), solve.max_nodes)?;
        Ok(dists)
    } else if let Ok(n) = input.parse::<usize>() {
        check_size(n, solve.max_nodes)?;
        Ok(generate_distances(n, solve.seed)?)
    } else if let Some(fixture) = Fixture::by_name(input) {
        check_size(fixture.n, solve.max_nodes)?;
        Ok(fixture.matrix()?)
    } else {
        Cli::command()
            .error(
                ErrorKind::InvalidValue,
                format!(
                    "{:?} is neither a .csv file, a fixture name nor a number of nodes",
                    input
                ),
            )
            .exit()
    }
}

fn check_size(n: usize, max_nodes: usize) -> Result<(), Box<dyn Error>> {
    if n > max_nodes {
        return Err(format!(
            "the instance has {} nodes, at most {} are allowed (see --max-nodes)",
            n, max_nodes
        )
        .into());
    }
    Ok(())
}

fn solve(solve: Solve) -> Result<(), Box<dyn Error>> {
    let start = Instant::now();

    let dists = load_matrix(&solve)?;

    println!("{}", dists);

    let tour = held_karp(&dists)?;
    println!("{}", tour);

    if solve.verify {
        let oracle = brute_force(&dists)?;
        if oracle.cost() != tour.cost() {
            log::error!("Brute force found {}, Held-Karp {}.", oracle, tour);
            return Err(format!(
                "brute force found a tour of cost {}, Held-Karp {}",
                oracle.cost(),
                tour.cost()
            )
            .into());
        }
        println!("Verified by brute force.");
    }

    if let Some(path) = &solve.write_tour {
        export_tour(path, &tour)?;
        log::info!("Exported tour to {:?}.", path);
    }

    if let Some(path) = &solve.check_tour {
        let other = import_tour(path, &dists)?;
        if !check_tour(&dists, &other) {
            return Err(format!(
                "{:?} is not a tour from node 0 through all {} nodes",
                path,
                dists.n()
            )
            .into());
        }
        println!(
            "Tour from {:?}: {} (gap to optimum: {})",
            path,
            other,
            other.cost().value().saturating_sub(tour.cost().value())
        );
    }

    let elapsed = start.elapsed().as_secs_f64();
    log::info!("Finished in {:.3}s.", elapsed);
    println!("\n{:.3}s", elapsed);

    Ok(())
}

fn set_up_logging(log_dir: &Path, level: LevelFilter) -> Result<(), fern::InitError> {
    std::fs::create_dir_all(log_dir)?;
    let colors = ColoredLevelConfig::new()
        .warn(Color::Yellow)
        .error(Color::Red);

    let file = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{date}][{level}] {message}",
                date = chrono::Local::now().format("%H:%M:%S"),
                level = record.level(),
                message = message
            ));
        })
        .level(level)
        .chain(fern::log_file(log_dir.join(format!(
            "{}.log",
            chrono::Local::now().format("%d%m%Y-%H%M")
        )))?);

    let stderr = fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{level}] {message}",
                level = colors.color(record.level()),
                message = message
            ));
        })
        .level(LevelFilter::Warn)
        .chain(std::io::stderr());

    fern::Dispatch::new().chain(file).chain(stderr).apply()?;

    log::info!("Logger set up!");

    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    set_up_logging(&cli.log_dir, cli.log_level)?;

    match cli.command {
        Some(Command::Batch(batch)) => {
            let rows = execute_batch(
                batch.num_nodes,
                batch.num,
                batch.seed,
                batch.verify,
                &batch.output,
            )?;
            println!(
                "Solved {} instances with {} nodes, results written to {:?}.",
                rows.len(),
                batch.num_nodes,
                batch.output
            );
        }
        None => solve(cli.solve)?,
    }

    Ok(())
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        log::error!("{}", err);
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}
