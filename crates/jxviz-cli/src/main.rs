use futures::executor::block_on;
use jxviz::render::{
    DetailsBlock, DeterministicTextMeasurer, DiagramSurface, SessionContext, SurfaceCommand,
    format_path, rotate_orientation, search, session, style_diagram, toggle_collapse,
};
use jxviz::{
    ConversionDirection, DefaultConverter, DocumentMode, ImageFormat, ImportError, NodeKind,
    ViewerConfig, files, load_document,
};
use serde::Serialize;
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JXVIZ_LOG";

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Document(jxviz::Error),
    Render(jxviz::render::Error),
    Import(ImportError),
    Json(serde_json::Error),
    Conversion(String),
    UnknownNode(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Document(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
            CliError::Import(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Conversion(msg) => write!(f, "{msg}"),
            CliError::UnknownNode(id) => write!(f, "No node with id `{id}`"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<jxviz::Error> for CliError {
    fn from(value: jxviz::Error) -> Self {
        Self::Document(value)
    }
}

impl From<jxviz::render::Error> for CliError {
    fn from(value: jxviz::render::Error) -> Self {
        Self::Render(value)
    }
}

impl From<ImportError> for CliError {
    fn from(value: ImportError) -> Self {
        Self::Import(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Style,
    Graph,
    Convert,
    Details,
    ExportImage,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    mode: Option<DocumentMode>,
    pretty: bool,
    config: Option<String>,
    overrides: Vec<(&'static str, Value)>,
    collapse: bool,
    rotate: usize,
    search: Option<String>,
    advance: usize,
    to: Option<DocumentMode>,
    export_dir: Option<String>,
    node: Option<String>,
    image_name: Option<String>,
    image_format: Option<ImageFormat>,
}

fn usage() -> &'static str {
    "jxviz-cli\n\
\n\
USAGE:\n\
  jxviz-cli [style] [--mode json|xml] [--config <file>] [--theme light|dark] [--orientation <o>] [--no-count] [--no-expand-collapse] [--no-grid] [--rotate <n>] [--collapse] [--search <query>] [--advance <n>] [--pretty] [<path>|-]\n\
  jxviz-cli graph [--mode json|xml] [--pretty] [<path>|-]\n\
  jxviz-cli convert [--mode json|xml] [--to json|xml] [--export <dir>] [<path>|-]\n\
  jxviz-cli details [--mode json|xml] [--node <id>] [--pretty] [<path>|-]\n\
  jxviz-cli export-image [--name <file-name>] [--format png|jpg|svg] [--pretty]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - Without --mode the document type follows the file extension (JSON for stdin).\n\
  - With --mode, a file whose extension does not match is rejected.\n\
  - style prints the styled diagram as JSON; surface commands are logged at info level.\n\
  - Set JXVIZ_LOG (e.g. JXVIZ_LOG=debug) to control logging on stderr.\n\
"
}

fn next_value<'a>(it: &mut impl Iterator<Item = &'a String>) -> Result<&'a String, CliError> {
    it.next().ok_or(CliError::Usage(usage()))
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1);
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "style" => args.command = Command::Style,
            "graph" => args.command = Command::Graph,
            "convert" => args.command = Command::Convert,
            "details" => args.command = Command::Details,
            "export-image" => args.command = Command::ExportImage,
            "--pretty" => args.pretty = true,
            "--collapse" => args.collapse = true,
            "--mode" => {
                let mode = next_value(&mut it)?;
                args.mode = Some(mode.parse().map_err(|_| CliError::Usage(usage()))?);
            }
            "--to" => {
                let mode = next_value(&mut it)?;
                args.to = Some(mode.parse().map_err(|_| CliError::Usage(usage()))?);
            }
            "--config" => args.config = Some(next_value(&mut it)?.clone()),
            "--theme" => {
                let theme = next_value(&mut it)?;
                args.overrides.push(("theme", Value::String(theme.clone())));
            }
            "--orientation" => {
                let orientation = next_value(&mut it)?;
                args.overrides.push(("layout.orientation", Value::String(orientation.clone())));
            }
            "--no-count" => args.overrides.push(("view.showChildCount", Value::Bool(false))),
            "--no-expand-collapse" => args
                .overrides
                .push(("view.showExpandCollapse", Value::Bool(false))),
            "--no-grid" => args.overrides.push(("view.showGrid", Value::Bool(false))),
            "--rotate" => {
                let n = next_value(&mut it)?;
                args.rotate = n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--search" => args.search = Some(next_value(&mut it)?.clone()),
            "--advance" => {
                let n = next_value(&mut it)?;
                args.advance = n.parse::<usize>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--export" => args.export_dir = Some(next_value(&mut it)?.clone()),
            "--node" => args.node = Some(next_value(&mut it)?.clone()),
            "--name" => args.image_name = Some(next_value(&mut it)?.clone()),
            "--format" => {
                let fmt = next_value(&mut it)?;
                args.image_format = Some(
                    fmt.parse::<ImageFormat>()
                        .map_err(|_| CliError::Usage(usage()))?,
                );
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.next().is_some() {
                    return Err(CliError::Usage(usage()));
                }
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(CliError::Usage(usage()));
            }
            path => {
                if args.input.is_some() {
                    return Err(CliError::Usage(usage()));
                }
                args.input = Some(path.to_string());
            }
        }
    }

    Ok(args)
}

/// Reads the document and settles its mode: an explicit `--mode` must match the file
/// extension, otherwise the extension decides.
fn read_document(
    input: Option<&str>,
    mode: Option<DocumentMode>,
) -> Result<(String, DocumentMode), CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok((buf, mode.unwrap_or_default()))
        }
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            let mode = mode.unwrap_or_else(|| {
                if files::file_extension(path) == DocumentMode::Xml.extension() {
                    DocumentMode::Xml
                } else {
                    DocumentMode::Json
                }
            });
            let text = files::import_document(path, text, mode)?;
            Ok((text, mode))
        }
    }
}

fn write_json(value: &impl Serialize, pretty: bool) -> Result<(), CliError> {
    if pretty {
        serde_json::to_writer_pretty(std::io::stdout().lock(), value)?;
    } else {
        serde_json::to_writer(std::io::stdout().lock(), value)?;
    }
    println!();
    Ok(())
}

fn load_config(args: &Args, mode: DocumentMode) -> Result<ViewerConfig, CliError> {
    let mut config = ViewerConfig::default();
    if let Some(path) = args.config.as_deref() {
        let overrides: Value = serde_json::from_str(&std::fs::read_to_string(path)?)?;
        config.deep_merge(&overrides);
    }
    for (path, value) in &args.overrides {
        config.set_value(path, value.clone());
    }
    config.set_value("editor.mode", Value::String(mode.as_str().to_string()));
    Ok(config)
}

/// Host surface of the CLI: there is no widget to drive, so commands are only logged.
struct LogSurface;

impl DiagramSurface for LogSurface {
    fn apply(&mut self, command: &SurfaceCommand) {
        tracing::info!(?command, "surface command");
    }
}

fn run_style(args: &Args) -> Result<(), CliError> {
    let (text, mode) = read_document(args.input.as_deref(), args.mode)?;
    let config = load_config(args, mode)?;
    let mut ctx = SessionContext::from_config(&config)?;
    let mut surface = LogSurface;
    surface.apply_all(&ctx.initial_commands());

    let mut graph = load_document(&text, ctx.mode())?;
    for _ in 0..args.rotate {
        ctx = rotate_orientation(&ctx, &graph).apply(&mut surface);
    }
    if args.collapse {
        ctx = toggle_collapse(&ctx, &mut graph).apply(&mut surface);
    }
    if let Some(query) = args.search.as_deref() {
        ctx = search::search(&ctx, &graph, query).apply(&mut surface);
        for _ in 0..args.advance {
            ctx = search::advance(&ctx).apply(&mut surface);
        }
    }

    let diagram = style_diagram(&graph, &ctx, &DeterministicTextMeasurer::default());
    write_json(&diagram, args.pretty)
}

fn run_convert(args: &Args) -> Result<(), CliError> {
    let (text, mode) = read_document(args.input.as_deref(), args.mode)?;
    let target = args.to.unwrap_or(match mode {
        DocumentMode::Json => DocumentMode::Xml,
        DocumentMode::Xml => DocumentMode::Json,
    });
    let Some(direction) = ConversionDirection::between(mode, target) else {
        print!("{text}");
        return Ok(());
    };

    let converter = DefaultConverter::new();
    let result = block_on(converter.convert_async(&text, direction));
    let converted = match (result.success, result.content) {
        (true, Some(content)) => content,
        _ => {
            return Err(CliError::Conversion(
                result
                    .message
                    .unwrap_or_else(|| "Conversion failed".to_string()),
            ));
        }
    };

    match args.export_dir.as_deref() {
        Some(dir) => {
            let out = Path::new(dir).join(files::export_file_name(direction.target_mode()));
            std::fs::write(&out, converted)?;
            tracing::info!(path = %out.display(), "exported");
        }
        None => println!("{converted}"),
    }
    Ok(())
}

#[derive(Serialize)]
struct DetailsOut<'a> {
    node: &'a str,
    path: String,
    content: String,
}

fn run_details(args: &Args) -> Result<(), CliError> {
    let (text, mode) = read_document(args.input.as_deref(), args.mode)?;
    let graph = load_document(&text, mode)?;
    let node = match args.node.as_deref() {
        Some(id) => graph
            .node(id)
            .ok_or_else(|| CliError::UnknownNode(id.to_string()))?,
        None => graph
            .nodes()
            .find(|n| n.kind == NodeKind::Leaf)
            .ok_or_else(|| CliError::UnknownNode("<first leaf>".to_string()))?,
    };

    let out = DetailsOut {
        node: node.id.as_str(),
        path: format_path(&node.path),
        content: DetailsBlock::parse(&node.data).to_plain_text(),
    };
    if args.pretty {
        write_json(&out, true)
    } else {
        println!("{}", out.path);
        println!("{}", out.content);
        Ok(())
    }
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Style => run_style(&args),
        Command::Graph => {
            let (text, mode) = read_document(args.input.as_deref(), args.mode)?;
            let graph = load_document(&text, mode)?;
            write_json(&graph, args.pretty)
        }
        Command::Convert => run_convert(&args),
        Command::Details => run_details(&args),
        Command::ExportImage => {
            let transition = session::export_image(
                &SessionContext::new(),
                args.image_name.as_deref(),
                args.image_format,
            );
            write_json(&transition.commands, args.pretty)
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err @ (CliError::Import(_) | CliError::Conversion(_))) => {
            eprintln!("{err}");
            std::process::exit(3);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
