use anyhow::{bail, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use depscope_graph::{EdgeMatcher, GraphModel, NodeSet, RelationRegistry};
use depscope_layout::{
    fit_to_viewport, run_to_completion, Hierarchy, LayoutConfig, LayoutKind, LayoutRunner,
};
use depscope_paths::{PathConfig, PathMatcher};
use serde::Serialize;
use std::io;
use std::path::PathBuf;

mod document;

pub use document::{EdgeDoc, GraphDocument, NodeDoc, RelationDoc};

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.write_all(b"\n"))
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    print_stdout(&text)
}

#[derive(Parser)]
#[command(name = "depscope")]
#[command(about = "Query and lay out software dependency graphs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a path expression from a set of start nodes
    Query(QueryArgs),

    /// Compute node positions for a hierarchy
    Layout(LayoutArgs),

    /// List the roots of the hierarchy induced by an edge rule
    Roots(RootsArgs),

    /// List the builtin relations and relation sets
    Relations,
}

#[derive(Args)]
struct GraphArgs {
    /// Graph document (JSON)
    #[arg(short, long)]
    graph: PathBuf,
}

#[derive(Args)]
struct HierarchyArgs {
    /// Relation defining parent -> child (repeatable)
    #[arg(short, long = "relation")]
    relations: Vec<String>,

    /// Named relation set defining parent -> child (repeatable)
    #[arg(short, long = "set")]
    sets: Vec<String>,

    /// Treat edges as child -> parent instead
    #[arg(long)]
    reverse: bool,
}

impl HierarchyArgs {
    fn matcher(&self, registry: &RelationRegistry) -> Result<EdgeMatcher> {
        if self.relations.is_empty() && self.sets.is_empty() {
            bail!("Hierarchy needs at least one --relation or --set");
        }

        let mut relations = registry.relation_set(&self.relations)?;
        for name in &self.sets {
            relations = relations.union(&registry.require_set(name)?);
        }

        Ok(if self.reverse {
            EdgeMatcher::backward(relations)
        } else {
            EdgeMatcher::forward(relations)
        })
    }
}

#[derive(Args)]
struct QueryArgs {
    #[command(flatten)]
    graph: GraphArgs,

    /// Path expression file (.json or .toml)
    #[arg(short, long)]
    path: PathBuf,

    /// Start node ids
    #[arg(long = "from", required = true, num_args = 1..)]
    from: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutChoice {
    Linear,
    Radial,
}

impl From<LayoutChoice> for LayoutKind {
    fn from(choice: LayoutChoice) -> Self {
        match choice {
            LayoutChoice::Linear => LayoutKind::Linear,
            LayoutChoice::Radial => LayoutKind::Radial,
        }
    }
}

#[derive(Args)]
struct LayoutArgs {
    #[command(flatten)]
    graph: GraphArgs,

    #[command(flatten)]
    hierarchy: HierarchyArgs,

    /// Layout settings file (.json or .toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Layout family (overrides the config file)
    #[arg(short, long, value_enum)]
    kind: Option<LayoutChoice>,

    /// Scale the result into a WIDTHxHEIGHT viewport
    #[arg(long, value_parser = parse_viewport)]
    fit: Option<(f64, f64)>,

    /// Margin kept around the content when fitting
    #[arg(long, default_value_t = 20.0)]
    margin: f64,
}

#[derive(Args)]
struct RootsArgs {
    #[command(flatten)]
    graph: GraphArgs,

    #[command(flatten)]
    hierarchy: HierarchyArgs,
}

fn parse_viewport(value: &str) -> std::result::Result<(f64, f64), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{value}'"))?;
    let parse = |s: &str| {
        s.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
            .ok_or_else(|| format!("invalid viewport dimension '{s}'"))
    };
    Ok((parse(w)?, parse(h)?))
}

fn load_graph(args: &GraphArgs, registry: &mut RelationRegistry) -> Result<GraphModel> {
    GraphDocument::load(&args.graph)?.into_graph(registry)
}

fn ids(nodes: &NodeSet) -> Vec<&str> {
    nodes.iter().map(|n| n.id().as_str()).collect()
}

fn run_query(args: &QueryArgs, pretty: bool) -> Result<()> {
    let mut registry = RelationRegistry::with_builtins();
    let graph = load_graph(&args.graph, &mut registry)?;

    let expression = PathConfig::load(&args.path)
        .with_context(|| format!("Failed to load path expression {}", args.path.display()))?
        .build(&registry)?;

    let mut input = NodeSet::new();
    for id in &args.from {
        let node = graph
            .node(id)
            .with_context(|| format!("Start node '{id}' is not in the graph"))?;
        input.insert(node.clone());
    }

    let matched = expression.next_match(&graph, &input);
    log::info!(
        "'{}' matched {} of {} node(s)",
        expression.display_name(),
        matched.len(),
        graph.node_count()
    );
    print_json(&ids(&matched), pretty)
}

fn run_layout(args: &LayoutArgs, pretty: bool) -> Result<()> {
    let mut registry = RelationRegistry::with_builtins();
    let graph = load_graph(&args.graph, &mut registry)?;
    let matcher = args.hierarchy.matcher(&registry)?;

    let mut config = match &args.config {
        Some(path) => LayoutConfig::load(path)
            .with_context(|| format!("Failed to load layout config {}", path.display()))?,
        None => LayoutConfig::default(),
    };
    if let Some(kind) = args.kind {
        config.kind = kind.into();
    }

    let mut runner = config.runner(&graph, &matcher)?;
    let steps = run_to_completion(&mut runner);
    log::debug!("{} layout finished in {} step(s)", config.kind, steps);

    let unplaced = graph.node_count() - runner.positions().len();
    if unplaced > 0 {
        log::warn!("{unplaced} node(s) are not reachable from any hierarchy root");
    }

    match args.fit {
        Some((width, height)) => print_json(
            &fit_to_viewport(runner.positions(), width, height, args.margin),
            pretty,
        ),
        None => print_json(runner.positions(), pretty),
    }
}

fn run_roots(args: &RootsArgs, pretty: bool) -> Result<()> {
    let mut registry = RelationRegistry::with_builtins();
    let graph = load_graph(&args.graph, &mut registry)?;
    let hierarchy = Hierarchy::build(&graph, &args.hierarchy.matcher(&registry)?);
    print_json(&ids(hierarchy.roots()), pretty)
}

#[derive(Serialize)]
struct RelationEntry<'a> {
    name: &'a str,
    reverse: &'a str,
}

#[derive(Serialize)]
struct VocabularyOutput<'a> {
    relations: Vec<RelationEntry<'a>>,
    sets: Vec<&'a str>,
}

fn run_relations(pretty: bool) -> Result<()> {
    let registry = RelationRegistry::with_builtins();
    let output = VocabularyOutput {
        relations: registry
            .relations()
            .map(|r| RelationEntry {
                name: r.forward_name(),
                reverse: r.reverse_name(),
            })
            .collect(),
        sets: registry.set_names().collect(),
    };
    print_json(&output, pretty)
}

pub fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match &cli.command {
        Commands::Query(args) => run_query(args, cli.pretty),
        Commands::Layout(args) => run_layout(args, cli.pretty),
        Commands::Roots(args) => run_roots(args, cli.pretty),
        Commands::Relations => run_relations(cli.pretty),
    }
}
