use boardmap_core::Dataset;
use boardmap_render::config::LayoutConfig;
use boardmap_render::model::{HierarchyLayout, TimelineLayout};
use boardmap_render::{
    LayoutOptions, hierarchy_xml, layout_hierarchy, layout_timeline, timeline_xml,
};
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Dataset(boardmap_core::Error),
    Render(boardmap_render::Error),
    Json(serde_json::Error),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => 2,
            CliError::Render(
                boardmap_render::Error::EmptyHierarchy | boardmap_render::Error::NoScheduledItems,
            ) => 3,
            _ => 1,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Dataset(err) => write!(f, "{err}"),
            CliError::Render(boardmap_render::Error::NoScheduledItems) => {
                write!(f, "No scheduled work found.")
            }
            CliError::Render(boardmap_render::Error::EmptyHierarchy) => {
                write!(f, "No epics with features or orphan PBIs found.")
            }
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<boardmap_core::Error> for CliError {
    fn from(value: boardmap_core::Error) -> Self {
        Self::Dataset(value)
    }
}

impl From<boardmap_render::Error> for CliError {
    fn from(value: boardmap_render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Command {
    #[default]
    Hierarchy,
    Timeline,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    output: Option<String>,
    stdout: bool,
    config: Option<String>,
    layout_json: bool,
}

fn usage() -> &'static str {
    "boardmap\n\
\n\
USAGE:\n\
  boardmap [hierarchy] [--output <path>] [--stdout] [--config <path>] [--layout-json] <input.json|->\n\
  boardmap timeline [--output <path>] [--stdout] [--config <path>] [--layout-json] <input.json|->\n\
\n\
NOTES:\n\
  - hierarchy writes <input>.drawio next to the input by default.\n\
  - timeline writes <input>-timeline.drawio next to the input by default.\n\
  - --config reads layout overrides: {\"hierarchy\": {...}, \"timeline\": {...}}.\n\
  - --layout-json prints the computed geometry as JSON instead of draw.io XML.\n\
  - Set RUST_LOG=debug for layout tracing on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "hierarchy" if args.input.is_none() => args.command = Command::Hierarchy,
            "timeline" if args.input.is_none() => args.command = Command::Timeline,
            "--stdout" => args.stdout = true,
            "--layout-json" => args.layout_json = true,
            "--output" | "-o" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.output = Some(out.clone());
            }
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "-" => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some("-".to_string());
            }
            other if other.starts_with('-') => return Err(CliError::Usage(usage())),
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    if args.input.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: &str) -> Result<String, CliError> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(input)?)
}

fn load_options(config: Option<&str>) -> Result<LayoutOptions, CliError> {
    let Some(path) = config else {
        return Ok(LayoutOptions::default());
    };
    let text = std::fs::read_to_string(path)?;
    Ok(LayoutOptions::with_config(LayoutConfig::from_json_str(&text)?))
}

/// `plan.json` -> `plan.drawio` (hierarchy) or `plan-timeline.drawio` (timeline).
fn default_out_path(input: &str, command: Command) -> PathBuf {
    let path = if input == "-" {
        Path::new("out.json")
    } else {
        Path::new(input)
    };
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "out".to_string());
    let name = match command {
        Command::Hierarchy => format!("{stem}.drawio"),
        Command::Timeline => format!("{stem}-timeline.drawio"),
    };
    path.with_file_name(name)
}

fn print_hierarchy_summary(layout: &HierarchyLayout) {
    let stats = &layout.stats;
    eprintln!("Single page '{}':", layout.project);
    eprintln!("  Size: {}x{}", stats.page_width, stats.page_height);
    eprintln!("  Groups: {}, Initiatives: {}", stats.regions, stats.initiatives);
    eprintln!("  Epics: {}, Areas: {}", stats.epics, stats.areas);
    eprintln!("  Features: {}, PBIs: {}", stats.features, stats.items);
    for (i, region) in layout.regions.iter().enumerate() {
        eprintln!(
            "  Section {}: [{}] - {} epics, {} areas, {}px wide",
            i + 1,
            region.initiative_titles.join(", "),
            region.plan.columns.len(),
            region.plan.row_keys.len(),
            region.plan.grid_width
        );
    }
}

fn print_timeline_summary(layout: &TimelineLayout) {
    let stats = &layout.stats;
    eprintln!("Timeline:");
    eprintln!("  Size: {}x{}", stats.page_width, stats.page_height);
    eprintln!("  Iterations: {}, Areas: {}", stats.iterations, stats.areas);
    eprintln!("  PBIs: {}", stats.items);
}

fn write_json(value: &impl Serialize, output: Option<&str>) -> Result<(), CliError> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    match output {
        Some(path) => std::fs::write(path, text)?,
        None => print!("{text}"),
    }
    Ok(())
}

fn run(args: Args) -> Result<(), CliError> {
    let Some(input) = args.input.as_deref() else {
        return Err(CliError::Usage(usage()));
    };
    let text = read_input(input)?;
    let dataset: Dataset = boardmap_core::load_dataset(&text)?;
    let options = load_options(args.config.as_deref())?;
    // `--stdout` wins over `--output`.
    let output = if args.stdout {
        None
    } else {
        args.output.as_deref()
    };

    let xml = match args.command {
        Command::Hierarchy => {
            let layout = layout_hierarchy(&dataset, &options)?;
            if args.layout_json {
                return write_json(&layout, output);
            }
            print_hierarchy_summary(&layout);
            hierarchy_xml(&layout, &options)
        }
        Command::Timeline => {
            let layout = layout_timeline(&dataset, &options)?;
            if args.layout_json {
                return write_json(&layout, output);
            }
            print_timeline_summary(&layout);
            timeline_xml(&layout, &options)
        }
    };

    if args.stdout {
        print!("{xml}");
        return Ok(());
    }

    let out = match output {
        Some(path) => PathBuf::from(path),
        None => default_out_path(input, args.command),
    };
    std::fs::write(&out, xml)?;
    tracing::info!(path = %out.display(), "wrote diagram");
    eprintln!("\nGenerated {}", out.display());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(err.exit_code());
        }
    };

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(err.exit_code());
    }
}
