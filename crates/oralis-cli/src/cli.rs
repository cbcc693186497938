use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "oralis",
    version,
    about = "Turn a dental intake questionnaire into a quality-gated advisory report"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one intake through the pipeline and print the result as JSON.
    Run(RunArgs),
    /// Validate a rule catalog, or print the built-in one.
    Catalog(CatalogArgs),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Intake JSON file (session_id, language, answers, metadata).
    #[arg(long)]
    pub intake: PathBuf,

    /// Content library JSON file.
    #[arg(long)]
    pub content: PathBuf,

    /// Pipeline config JSON file. Defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rule catalog JSON file. The built-in catalog is used when omitted.
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Attach the readability evaluation to the QA result.
    #[arg(long, default_value_t = false)]
    pub advisory: bool,

    /// Log every stage transition.
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Print only the report instead of the whole result.
    #[arg(long, default_value_t = false)]
    pub report_only: bool,

    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Catalog JSON file to validate. Prints the built-in catalog when omitted.
    #[arg(long)]
    pub path: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}
