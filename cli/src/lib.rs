//! fontslim CLI (made by FontLab https://www.fontlab.com/)

use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fontslim_core::asset::{Flavor, FontAsset};
use fontslim_core::band::TargetBand;
use fontslim_core::chargen::{generate, write_chars_file};
use fontslim_core::charset::CharSet;
use fontslim_core::output::{write_json_pretty, Style};
use fontslim_core::run::{run as run_plan, SubsetPlan};
use fontslim_core::subset::FontToolsSubsetter;

/// CLI entrypoint for fontslim.
#[derive(Debug, Parser)]
#[command(
    name = "fontslim",
    version,
    about = "Subset Noto Sans JP for PDF rendering (made by FontLab https://www.fontlab.com/)"
)]
pub struct Cli {
    /// Project root that default paths are resolved against
    #[arg(long = "root", global = true, default_value = ".", value_hint = ValueHint::DirPath)]
    root: PathBuf,

    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Subset the source fonts and check output sizes
    Subset(SubsetArgs),
    /// Count distinct characters in a character list
    Chars(CharsArgs),
    /// Regenerate the character list from kana, JIS level-1 kanji and vocabulary
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
struct SubsetArgs {
    /// Character list [default: <root>/scripts/chars.txt]
    #[arg(long = "chars", value_hint = ValueHint::FilePath)]
    chars: Option<PathBuf>,

    /// Output directory [default: <root>/packages/assets/fonts]
    #[arg(long = "fonts-dir", value_hint = ValueHint::DirPath)]
    fonts_dir: Option<PathBuf>,

    /// Source font directory [default: <fonts-dir>/originals]
    #[arg(long = "originals-dir", value_hint = ValueHint::DirPath)]
    originals_dir: Option<PathBuf>,

    /// Font pair INPUT=OUTPUT; replaces the Noto Sans JP Regular/Bold defaults
    #[arg(long = "font", value_name = "INPUT=OUTPUT")]
    fonts: Vec<String>,

    /// Output container format
    #[arg(long = "flavor", default_value_t = FlavorChoice::Woff, value_enum)]
    flavor: FlavorChoice,

    /// Smallest acceptable output size in KB
    #[arg(long = "min-kb", default_value_t = 500)]
    min_kb: u64,

    /// Largest acceptable output size in KB
    #[arg(long = "max-kb", default_value_t = 700)]
    max_kb: u64,

    /// Python interpreter with fontTools installed
    #[arg(long = "python", default_value = "python3", value_hint = ValueHint::CommandName)]
    python: PathBuf,

    /// Emit the run report as JSON instead of progress text
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct CharsArgs {
    /// Character list [default: <root>/scripts/chars.txt]
    #[arg(long = "chars", value_hint = ValueHint::FilePath)]
    chars: Option<PathBuf>,

    /// Emit JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Where to write the list [default: <root>/scripts/chars.txt]
    #[arg(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum FlavorChoice {
    Woff,
    Woff2,
    Ttf,
}

impl From<FlavorChoice> for Flavor {
    fn from(choice: FlavorChoice) -> Self {
        match choice {
            FlavorChoice::Woff => Flavor::Woff,
            FlavorChoice::Woff2 => Flavor::Woff2,
            FlavorChoice::Ttf => Flavor::Ttf,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Serialize)]
struct CharsSummary<'a> {
    path: &'a Path,
    char_count: usize,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Subset(args) => run_subset(&cli.root, args),
        Command::Chars(args) => run_chars(&cli.root, args),
        Command::Generate(args) => run_generate(&cli.root, args),
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
    if let Err(err) = installed {
        debug!(error = %err, "keeping the existing tracing subscriber");
    }
}

fn run_subset(root: &Path, args: SubsetArgs) -> Result<()> {
    let plan = build_plan(root, &args)?;
    debug!(?plan, python = %args.python.display(), "resolved subset plan");
    let subsetter = FontToolsSubsetter::new(&args.python);

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.json {
        let report = run_plan(&plan, &subsetter, io::sink(), Style::plain())?;
        write_json_pretty(&report, &mut handle)?;
    } else {
        let style = Style {
            color: use_color(args.color, handle.is_terminal()),
        };
        run_plan(&plan, &subsetter, &mut handle, style)?;
    }

    Ok(())
}

fn build_plan(root: &Path, args: &SubsetArgs) -> Result<SubsetPlan> {
    let flavor = Flavor::from(args.flavor);
    let band = TargetBand::new(args.min_kb, args.max_kb)?;

    let mut plan = SubsetPlan::for_project(root)
        .with_flavor(flavor)
        .with_band(band);

    if !args.fonts.is_empty() {
        let fonts = args
            .fonts
            .iter()
            .map(|raw| FontAsset::parse_pair(raw))
            .collect::<Result<Vec<_>>>()?;
        plan = plan.with_fonts(fonts);
    }

    if let Some(chars) = &args.chars {
        plan.chars_file = chars.clone();
    }
    if let Some(dir) = &args.fonts_dir {
        plan.fonts_dir = dir.clone();
        plan.originals_dir = dir.join("originals");
    }
    if let Some(dir) = &args.originals_dir {
        plan.originals_dir = dir.clone();
    }

    Ok(plan)
}

fn use_color(choice: ColorChoice, is_terminal: bool) -> bool {
    match choice {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => is_terminal,
    }
}

fn default_chars_path(root: &Path) -> PathBuf {
    root.join("scripts").join("chars.txt")
}

fn run_chars(root: &Path, args: CharsArgs) -> Result<()> {
    let path = args.chars.unwrap_or_else(|| default_chars_path(root));
    let set = CharSet::load(&path)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    write_chars_summary(&path, &set, args.json, &mut handle)
}

fn write_chars_summary(path: &Path, set: &CharSet, json: bool, mut w: impl Write) -> Result<()> {
    if json {
        let summary = CharsSummary {
            path,
            char_count: set.len(),
        };
        serde_json::to_writer_pretty(&mut w, &summary)?;
        writeln!(w)?;
    } else {
        writeln!(w, "{}: {} characters", path.display(), set.len())?;
    }
    Ok(())
}

fn run_generate(root: &Path, args: GenerateArgs) -> Result<()> {
    let path = args.output.unwrap_or_else(|| default_chars_path(root));
    let set = generate();
    write_chars_file(&path, &set)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "Generated {} unique characters.", set.len())?;
    writeln!(handle, "Written to: {}", path.display())?;
    Ok(())
}
