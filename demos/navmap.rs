//! Terminal demo: parse an ASCII map, search it with every heuristic, then
//! close the doors and add mud to see the route change.
//!
//! Usage: `navmap [-v] [--seed N] [--mud N] [MAP_FILE]`

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use rand::SeedableRng;
use tracing_subscriber::filter::LevelFilter;
use wayline_demos::{DEFAULT_MAP, NavMap};
use wayline_paths::Heuristic;

#[derive(Parser)]
#[command(name = "navmap")]
#[command(about = "Search an ASCII map with every heuristic, with doors closed and extra mud")]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Seed for the mud scatter
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of floor tiles to turn into mud
    #[arg(long, default_value_t = 12)]
    mud: usize,

    /// Map file; the built-in map is used when omitted
    map: Option<PathBuf>,
}

fn search_all(map: &mut NavMap, label: &str) {
    println!("== {label}");
    let terrain = map.terrain();
    for h in Heuristic::ALL {
        match map.graph.find_path_with(map.start, map.goal, h, &terrain) {
            Some(path) => {
                println!("{h:?}: {} steps, cost {:.2}", path.len(), path.cost());
                if h == Heuristic::Euclidean {
                    print!("{}", map.render(path.ids()));
                }
            }
            None => println!("{h:?}: no path"),
        }
    }
    println!();
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let text = match &cli.map {
        Some(path) => std::fs::read_to_string(path)?,
        None => DEFAULT_MAP.to_string(),
    };
    let mut map = NavMap::parse(&text)?;
    log::info!(
        "{}x{} map, {} vertices, {} edges",
        map.width,
        map.height,
        map.graph.len(),
        map.graph.edge_count()
    );

    search_all(&mut map, "open doors");

    let doors = map.set_doors_open(false);
    search_all(&mut map, &format!("{doors} doors closed"));
    map.set_doors_open(true);

    let mut rng = rand::rngs::StdRng::seed_from_u64(cli.seed);
    let placed = map.scatter_mud(&mut rng, cli.mud);
    // Tile changes do not move vertices, so cached heuristics stay valid.
    search_all(&mut map, &format!("{placed} extra mud tiles"));

    Ok(())
}
