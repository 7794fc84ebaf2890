//! Citation Graph demo
//!
//! Builds a citation graph from the configured seed (or a built-in example),
//! removes the requested publications and prints what is left.

use citation_graph::core::config::{Config, SeedConfig};
use citation_graph::{CitationGraph, Error, PublicationRecord, Result};
use clap::{Arg, ArgAction, Command};
use tracing::{info, warn};

type Graph = CitationGraph<PublicationRecord<String>>;

fn main() -> Result<()> {
    // Parse command line arguments
    let matches = Command::new("citation-graph")
        .version(citation_graph::VERSION)
        .about("In-memory citation graph with cascading removal.")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log level (trace, debug, info, warn, error)")
        )
        .arg(
            Arg::new("remove")
                .short('r')
                .long("remove")
                .value_name("ID")
                .action(ArgAction::Append)
                .help("Publication to remove after seeding (repeatable)")
        )
        .get_matches();

    // Load configuration
    let mut config = if let Some(config_path) = matches.get_one::<String>("config") {
        Config::from_file(config_path)?
    } else {
        Config::load()?
    };

    // Apply CLI overrides
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.logging.level = level.clone();
    }
    config.validate()?;

    citation_graph::init(&config)?;

    let seed = config.seed.clone().unwrap_or_else(SeedConfig::example);
    let mut graph = build_graph(&seed, &config)?;
    info!("Seeded {} publications", graph.publication_count());

    let removals = matches
        .get_many::<String>("remove")
        .map(|ids| ids.cloned().collect::<Vec<_>>())
        .unwrap_or_default();
    for id in removals {
        let before = graph.publication_count();
        match graph.remove(&id) {
            Ok(()) => info!("Removed {} ({} publications released)", id, before - graph.publication_count()),
            Err(e) => warn!("Could not remove {}: {}", id, e),
        }
    }

    print_graph(&graph)
}

/// Build the graph described by `seed`
fn build_graph(seed: &SeedConfig, config: &Config) -> Result<Graph> {
    let mut graph = Graph::with_config(&seed.root, &config.graph)?;
    for publication in &seed.publications {
        graph.create(&publication.id, &publication.cites)?;
        if let Some(title) = &publication.title {
            graph.get_mut(&publication.id)?.title = Some(title.clone());
        }
    }
    Ok(graph)
}

/// Print every publication with its sorted parents and children
fn print_graph(graph: &Graph) -> Result<()> {
    let root = graph.root_id()?;
    println!("root: {}", root);
    for id in graph.ids()? {
        let mut parents = graph.parents_of(&id)?;
        let mut children = graph.children_of(&id)?;
        parents.sort();
        children.sort();
        let publication = graph
            .get(&id)
            .map_err(|e| Error::graph(format!("{}: {}", id, e)))?;
        println!(
            "{}  cites [{}]  cited by [{}]",
            publication,
            parents.join(", "),
            children.join(", ")
        );
    }
    Ok(())
}
