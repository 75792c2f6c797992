//! A command line tool for relating genome annotations to the blocks
//! ("pancontigs") of a pangenome graph.
//!
//! ```shell
//! cargo run --release --bin=pancontig --features=binaries -- \
//!     annotate --graph pangraph.json --gff genome.gff --output annotated.gff
//! ```
//!
//! The following subcommands are available:
//!
//! * `annotate` adds block metadata to each feature, splitting features that
//!   straddle a block boundary.
//! * `project` moves each feature onto the block(s) it falls on.
//! * `link` lists the blocks each feature overlaps without splitting it.
//! * `stats` prints how each block is distributed across the genomes.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use clap_verbosity_flag::Verbosity;
use flate2::read::GzDecoder;
use pancontig::gff;
use pancontig::graph::Graph;
use pancontig::projection::Mode;
use pancontig::projection::Projection;
use pancontig::projection::Projector;
use pancontig::projection::TypeNaming;
use pancontig::projection::locator;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Columns;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

/// The header directive that names the region a sequence spans. These no
/// longer apply once coordinates are block-local.
const SEQUENCE_REGION_DIRECTIVE: &str = "##sequence-region";

////////////////////////////////////////////////////////////////////////////////////////
// Inputs and outputs
////////////////////////////////////////////////////////////////////////////////////////

/// Opens a file for buffered reading, decompressing it if it ends in `.gz`.
fn open(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("gz") => Ok(Box::new(BufReader::new(GzDecoder::new(file)))),
        _ => Ok(Box::new(BufReader::new(file))),
    }
}

/// Opens the output file, or standard output if none is given.
fn create(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(std::io::stdout().lock()))),
    }
}

/// Reads and indexes the graph.
fn read_graph(path: &Path) -> Result<Graph> {
    let graph = Graph::from_reader(open(path)?)
        .with_context(|| format!("reading graph from {}", path.display()))?;

    info!(
        "graph: {} blocks across {} genomes",
        graph.blocks().len(),
        graph.paths().len()
    );

    Ok(graph)
}

////////////////////////////////////////////////////////////////////////////////////////
// Projection
////////////////////////////////////////////////////////////////////////////////////////

/// The naming of fragment types.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Naming {
    /// Append `-fragment-edge` or `-fragment-middle` to the type.
    Tagged,

    /// Keep the original type.
    Preserve,
}

impl From<Naming> for TypeNaming {
    fn from(naming: Naming) -> Self {
        match naming {
            Naming::Tagged => TypeNaming::Tagged,
            Naming::Preserve => TypeNaming::Preserve,
        }
    }
}

/// Arguments shared by every projecting subcommand.
#[derive(Args, Debug)]
struct ProjectionArgs {
    /// The pangenome graph in JSON format (optionally gzipped).
    #[arg(short, long)]
    graph: PathBuf,

    /// The annotation to project (optionally gzipped).
    #[arg(long)]
    gff: PathBuf,

    /// Where to write the output annotation. Defaults to standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How fragment types are named. Defaults to `tagged` for `annotate` and
    /// `preserve` for `project`.
    #[arg(short, long, value_enum)]
    type_naming: Option<Naming>,

    /// Rename identifiers of the form `<prefix>_<n>` to `<seqid>_<n>` before
    /// projecting.
    #[arg(short, long, default_value_t = false)]
    rename_ids: bool,

    /// Skip features on genomes that are not in the graph instead of failing.
    #[arg(short, long, default_value_t = false)]
    skip_unknown: bool,
}

/// Projects the annotation and writes it out.
fn project(args: &ProjectionArgs, mode: Mode) -> Result<()> {
    let graph = read_graph(&args.graph)?;
    let locator = locator::Builder
        .try_build_from(&graph)
        .context("indexing the graph")?;

    let annotation = gff::Reader::new(open(&args.gff)?)
        .read_annotation()
        .with_context(|| format!("reading annotation from {}", args.gff.display()))?;
    let (header, mut records) = annotation.into_parts();

    if args.rename_ids {
        let renamed = records
            .iter_mut()
            .map(|record| record.rename_id())
            .filter(|renamed| *renamed)
            .count();
        info!("renamed {renamed} identifiers");
    }

    let mut projector = Projector::new(&locator, mode);

    if let Some(naming) = args.type_naming {
        projector = projector.with_type_naming(naming.into());
    }

    let projection = match args.skip_unknown {
        true => project_skipping_unknown(&projector, &records)?,
        false => projector.project(&records).context("projecting features")?,
    };

    info!(
        "projected {} features ({} fragmented) into {} records",
        projection.features(),
        projection.fragmented(),
        projection.records().len()
    );

    let header = header
        .into_iter()
        .filter(|line| mode != Mode::Project || !line.starts_with(SEQUENCE_REGION_DIRECTIVE))
        .chain(std::iter::once(format!(
            "#!pancontig information relative to {} added by pancontig {}",
            args.graph.display(),
            env!("CARGO_PKG_VERSION")
        )));

    let mut writer = gff::Writer::new(create(args.output.as_deref())?);
    writer.write_header(header).context("writing header")?;
    writer
        .write_records(projection.records())
        .context("writing records")?;
    writer.into_inner().flush().context("flushing output")?;

    Ok(())
}

/// Projects every feature, dropping those on genomes missing from the graph.
fn project_skipping_unknown(
    projector: &Projector<'_>,
    records: &[gff::Record],
) -> Result<Projection> {
    let mut projected = Vec::with_capacity(records.len());

    for result in projector.projections(records) {
        match result {
            Ok(records) => projected.push(records),
            Err(err) if matches!(err.reason(), locator::Error::UnknownGenome(_)) => {
                warn!("skipping {err}")
            }
            Err(err) => bail!(err),
        }
    }

    Ok(projected.into_iter().collect())
}

////////////////////////////////////////////////////////////////////////////////////////
// Statistics
////////////////////////////////////////////////////////////////////////////////////////

/// Arguments for the `stats` subcommand.
#[derive(Args, Debug)]
struct StatsArgs {
    /// The pangenome graph in JSON format (optionally gzipped).
    #[arg(short, long)]
    graph: PathBuf,
}

/// Prints a table of per-block statistics.
fn stats(args: &StatsArgs) -> Result<()> {
    let graph = read_graph(&args.graph)?;
    let stats = graph.block_stats();

    let mut builder = Builder::default();
    builder.push_record(["Block", "Length", "Depth", "Frequency", "Duplicated", "Core"]);

    for block in &stats {
        builder.push_record([
            block.id().to_string(),
            block.length().to_string(),
            block.depth().to_string(),
            block.frequency().to_string(),
            block.is_duplicated().to_string(),
            block.is_core().to_string(),
        ]);
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .modify(Columns::new(1..4), Alignment::right())
        .to_string();

    println!("{}", table);

    let core = stats.iter().filter(|block| block.is_core()).count();
    info!("{core} of {} blocks are core", stats.len());

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// The subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Adds block metadata to each feature, keeping genomic coordinates.
    Annotate(ProjectionArgs),

    /// Moves each feature onto the blocks it falls on.
    Project(ProjectionArgs),

    /// Lists the blocks each feature overlaps without splitting it.
    Link(ProjectionArgs),

    /// Prints how each block is distributed across the genomes.
    Stats(StatsArgs),
}

/// Relates genome annotations to the blocks of a pangenome graph.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    command: Command,

    /// The verbosity.
    #[command(flatten)]
    verbose: Verbosity,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(cli.verbose.log_level_filter().as_trace())
            .with_writer(std::io::stderr)
            .init(),
    };

    match &cli.command {
        Command::Annotate(args) => project(args, Mode::Annotate),
        Command::Project(args) => project(args, Mode::Project),
        Command::Link(args) => project(args, Mode::Link),
        Command::Stats(args) => stats(args),
    }
}
