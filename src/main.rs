use std::{fs::File, path::PathBuf};

use clap::Parser;
use rail_services::{
    parse::{load_csv_network, parse_config, parse_network},
    report, Network, Optimizer, PlannerConfig, PlannerError,
};

/// Generates train services over a rail network and reports the best one
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Network description in TOML format
    #[arg(long, required_unless_present = "stations", conflicts_with = "stations")]
    network: Option<PathBuf>,
    /// Header-less station CSV (name, latitude, longitude, kind)
    #[arg(long, requires = "connections")]
    stations: Option<PathBuf>,
    /// Header-less connection CSV (from, to, time)
    #[arg(long, requires = "stations")]
    connections: Option<PathBuf>,
    /// Run configuration in TOML format; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    max_tracks: Option<usize>,
    /// Maximum time per track, in minutes
    #[arg(long)]
    max_time: Option<f64>,
    /// Number of services to generate
    #[arg(long)]
    services: Option<usize>,
    #[arg(long)]
    critical_preference: Option<f64>,
    #[arg(long)]
    seed: Option<u64>,
    /// Generate services on all cores
    #[arg(long, overrides_with = "no_parallel")]
    parallel: bool,
    /// Generate services on one thread, whatever the configuration says
    #[arg(long, overrides_with = "parallel")]
    no_parallel: bool,
    /// Drop tracks without critical connections
    #[arg(long, overrides_with = "no_prune")]
    prune: bool,
    #[arg(long, overrides_with = "prune")]
    no_prune: bool,
    /// Join tracks that meet end to end
    #[arg(long, overrides_with = "no_merge")]
    merge: bool,
    #[arg(long, overrides_with = "merge")]
    no_merge: bool,
    /// Where to write one CSV row per generated service
    #[arg(long)]
    scores_csv: Option<PathBuf>,
}

fn load_network(args: &Args) -> Result<Network, PlannerError> {
    match (&args.network, &args.stations, &args.connections) {
        (Some(path), _, _) => parse_network(path),
        (None, Some(stations), Some(connections)) => load_csv_network(stations, connections),
        _ => Err(PlannerError::MissingNetwork),
    }
}

fn load_config(args: &Args) -> Result<PlannerConfig, PlannerError> {
    let mut config = match &args.config {
        Some(path) => parse_config(path)?,
        None => PlannerConfig::default(),
    };
    if let Some(n) = args.max_tracks {
        config.max_tracks = n;
    }
    if let Some(t) = args.max_time {
        config.max_track_time = t;
    }
    if let Some(n) = args.services {
        config.services = n;
    }
    if let Some(p) = args.critical_preference {
        config.critical_preference = p;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.parallel = switch(args.parallel, args.no_parallel, config.parallel);
    config.refine.prune_non_critical =
        switch(args.prune, args.no_prune, config.refine.prune_non_critical);
    config.refine.merge_tracks = switch(args.merge, args.no_merge, config.refine.merge_tracks);
    Ok(config)
}

/// Resolves a `--flag`/`--no-flag` pair against the configured value.
/// At most one of the pair is set, since each overrides the other.
fn switch(on: bool, off: bool, configured: bool) -> bool {
    if on {
        true
    } else if off {
        false
    } else {
        configured
    }
}

fn run(args: Args) -> Result<(), PlannerError> {
    let network = load_network(&args)?;
    log::info!("loaded {} stations, {} connections ({} critical), {} leaf stations",
        network.stations().len(), network.connections().len(),
        network.critical_connection_count(), network.leaf_stations().len());

    let config = load_config(&args)?;
    let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
    log::info!("using seed {seed}");
    let optimizer = Optimizer::new(&network, config)?;
    let outcome = optimizer.run(&mut fastrand::Rng::with_seed(seed));

    let best = outcome.best();
    println!("Best service: #{} with score {:.3}", best.index, best.score);
    println!("{} tracks, {} min, {:.1}% critical connections",
        best.service.track_count(),
        best.service.total_time(),
        best.service.critical_percentage());
    for (i, track) in best.service.tracks().iter().enumerate() {
        println!("  track {i}: {}", report::describe_track(&network, track));
    }

    if let Some(path) = &args.scores_csv {
        let file = File::create(path)
            .map_err(|source| PlannerError::Io { path: path.clone(), source })?;
        report::write_scores_csv(file, &network, &outcome)?;
        println!("Scores of all services saved to {}", path.display());
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Args::parse()) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    fn load(name: &str, config: &str, flags: &[&str]) -> PlannerConfig {
        let path = std::env::temp_dir().join(format!("__rail_services_{name}.toml"));
        fs::write(&path, config).unwrap();
        let mut argv = vec!["rail-services", "--network", "net.toml", "--config"];
        argv.push(path.to_str().unwrap());
        argv.extend_from_slice(flags);
        let args = Args::try_parse_from(argv).unwrap();
        let config = load_config(&args).unwrap();
        fs::remove_file(&path).unwrap();
        config
    }

    const CONFIG: &str = "max_tracks = 3\nmax_track_time = 60.0\nservices = 5\nparallel = true\n\n\
        [refine]\nprune_non_critical = true\n";

    #[test]
    fn test_flags_override_config_both_ways() {
        let config = load("cli_plain", CONFIG, &[]);
        assert!(config.parallel && config.refine.prune_non_critical && !config.refine.merge_tracks,
            "Ensure configured switches are kept without flags");

        let config = load("cli_off", CONFIG, &["--no-parallel", "--no-prune", "--merge"]);
        assert!(!config.parallel, "Ensure --no-parallel turns a configured setting off");
        assert!(!config.refine.prune_non_critical);
        assert!(config.refine.merge_tracks, "Ensure --merge turns a setting on");

        let config = load("cli_last", CONFIG, &["--no-parallel", "--parallel"]);
        assert!(config.parallel, "Ensure the last of a flag pair wins");
    }

    #[test]
    fn test_network_source_is_required() {
        assert!(Args::try_parse_from(["rail-services"]).is_err());
        assert!(Args::try_parse_from(["rail-services", "--stations", "s.csv"]).is_err(),
            "Ensure CSV stations need a connection file too");
        let args = Args::try_parse_from(
            ["rail-services", "--stations", "s.csv", "--connections", "c.csv"]).unwrap();
        assert!(args.network.is_none());

        let mut args = Args::try_parse_from(["rail-services", "--network", "net.toml"]).unwrap();
        args.network = None;
        let error = load_network(&args).unwrap_err();
        assert!(matches!(error, PlannerError::MissingNetwork));
        assert!(error.to_string().contains("--stations"), "Ensure the error names the flags");
    }
}
