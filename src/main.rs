use std::path::PathBuf;

use avance_tools::Result;
use avance_tools::config::{
    DEFAULT_EXTENSION, DEFAULT_PREFIX, DEFAULT_SHEET, IngestConfig, OUTPUT_FILE,
};
use avance_tools::io::chart::ChartKind;
use avance_tools::logging::init_logging;
use avance_tools::request::RunRequest;
use avance_tools::session::Session;
use clap::{Parser, Subcommand, ValueEnum};

fn main() {
    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    init_logging("warn")?;

    match cli.command {
        Command::Process(args) => {
            let mut session = args.session();
            consolidate(&mut session, &args)?;
            Ok(())
        }
        Command::Columns(args) => {
            let mut session = args.session();
            consolidate(&mut session, &args)?;
            for (idx, column) in session.chartable_columns()?.iter().enumerate() {
                println!("{idx}: {column}");
            }
            Ok(())
        }
        Command::Summarize(args) => {
            let mut session = args.run.session();
            consolidate(&mut session, &args.run)?;
            let summary = session.summarize(&args.column)?;
            if args.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                for entry in &summary.entries {
                    println!("{}\t{}", entry.value, entry.count);
                }
            }
            Ok(())
        }
        Command::Chart(args) => {
            let mut session = args.run.session();
            consolidate(&mut session, &args.run)?;
            let output = args.output.unwrap_or_else(|| PathBuf::from(&args.run.folder));
            let path = session.chart(&args.column, args.kind.into(), &output)?;
            println!("Gráfica guardada en {}", path.display());
            Ok(())
        }
    }
}

fn consolidate(session: &mut Session, args: &RunArgs) -> Result<()> {
    let request = RunRequest::new(
        args.folder.clone(),
        args.columns.clone(),
        args.start_row.clone(),
        args.limit.clone().unwrap_or_default(),
    );
    let report = session.process(&request, |progress| {
        println!(
            "Procesado {} de {} archivos.",
            progress.completed, progress.total
        );
    })?;
    println!(
        "Proceso completado. Archivo guardado en {}",
        report.output_path.display()
    );
    Ok(())
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Consolidate dated sales workbooks and chart their columns."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Consolidate the workbooks of a folder into Out.xlsx.
    Process(RunArgs),
    /// Consolidate (rewriting Out.xlsx), then list the columns that can be charted.
    Columns(RunArgs),
    /// Consolidate (rewriting Out.xlsx), then print the value counts of one column.
    Summarize(SummarizeArgs),
    /// Consolidate (rewriting Out.xlsx), then render a pie or bar chart of one column.
    Chart(ChartArgs),
}

#[derive(clap::Args)]
struct RunArgs {
    /// Folder holding the source workbooks.
    #[arg(long)]
    folder: String,

    /// Column range to read, e.g. A:D.
    #[arg(long)]
    columns: String,

    /// One-based worksheet row holding the headers.
    #[arg(long, default_value = "1")]
    start_row: String,

    /// Maximum number of rows read per workbook.
    #[arg(long)]
    limit: Option<String>,

    /// Worksheet read from every workbook.
    #[arg(long, default_value = DEFAULT_SHEET)]
    sheet: String,

    /// Required file name prefix.
    #[arg(long, default_value = DEFAULT_PREFIX)]
    prefix: String,

    /// Required file name extension.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    extension: String,
}

impl RunArgs {
    fn session(&self) -> Session {
        Session::new(IngestConfig {
            sheet_name: self.sheet.clone(),
            file_prefix: self.prefix.clone(),
            file_extension: self.extension.clone(),
            output_file: OUTPUT_FILE.to_string(),
        })
    }
}

#[derive(clap::Args)]
struct SummarizeArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Column to summarize.
    #[arg(long)]
    column: String,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

#[derive(clap::Args)]
struct ChartArgs {
    #[command(flatten)]
    run: RunArgs,

    /// Column to plot.
    #[arg(long)]
    column: String,

    /// Chart flavour.
    #[arg(long, value_enum, default_value_t = ChartKindArg::Pie)]
    kind: ChartKindArg,

    /// Folder receiving the image; defaults to the source folder.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ChartKindArg {
    Pie,
    Bar,
}

impl From<ChartKindArg> for ChartKind {
    fn from(kind: ChartKindArg) -> Self {
        match kind {
            ChartKindArg::Pie => ChartKind::Pie,
            ChartKindArg::Bar => ChartKind::Bar,
        }
    }
}
