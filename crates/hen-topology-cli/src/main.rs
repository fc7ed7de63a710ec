use hen_topology::geom::{Segment, point};
use hen_topology::{
    Cidr, EditorConfig, ExperimentMeta, HardwareProfile, InterfaceSlot, NetbootInfo, Topology,
};
use serde::{Deserialize, Serialize};
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Topology(hen_topology::Error),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Topology(err) => write!(f, "{err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<hen_topology::Error> for CliError {
    fn from(value: hen_topology::Error) -> Self {
        Self::Topology(value)
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
    Inspect,
    Normalize,
    Subnet,
    Build,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    input: Option<String>,
    pretty: bool,
    config: Option<String>,
    out: Option<String>,
}

fn usage() -> &'static str {
    "hen-topology\n\
\n\
USAGE:\n\
  hen-topology [--config <path>] [inspect] [--pretty] [<path>|-]\n\
  hen-topology [--config <path>] normalize [--out <path>] [<path>|-]\n\
  hen-topology subnet <cidr>\n\
  hen-topology [--config <path>] build [--out <path>] [<script.json>|-]\n\
\n\
NOTES:\n\
  - If <path> is omitted or '-', input is read from stdin.\n\
  - inspect prints a JSON summary of a saved topology document.\n\
  - normalize and build print XML to stdout by default; use --out to write a file.\n\
  - --config points at a JSON editor configuration (radii, node center, candidates).\n\
  - Set RUST_LOG (e.g. RUST_LOG=debug) to see model events on stderr.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args::default();

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "inspect" => args.command = Command::Inspect,
            "normalize" => args.command = Command::Normalize,
            "subnet" => args.command = Command::Subnet,
            "build" => args.command = Command::Build,
            "--pretty" => args.pretty = true,
            "--config" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.config = Some(path.clone());
            }
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            "--" => {
                if let Some(rest) = it.next() {
                    if args.input.is_some() {
                        return Err(CliError::Usage(usage()));
                    }
                    args.input = Some(rest.clone());
                }
                if it.peek().is_some() {
                    return Err(CliError::Usage(usage()));
                }
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

    if args.command == Command::Subnet && args.input.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(input: Option<&str>) -> Result<String, CliError> {
    match input {
        None | Some("-") => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
        Some(path) => Ok(std::fs::read_to_string(path)?),
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

fn write_text(text: &str, out: Option<&str>) -> Result<(), CliError> {
    match out {
        None => {
            println!("{text}");
            Ok(())
        }
        Some(path) => {
            std::fs::write(path, text)?;
            Ok(())
        }
    }
}

fn load_config(path: Option<&str>) -> Result<EditorConfig, CliError> {
    match path {
        None => Ok(EditorConfig::default()),
        Some(path) => {
            let text = std::fs::read_to_string(path)?;
            Ok(EditorConfig::from_json_str(&text)?)
        }
    }
}

#[derive(Serialize)]
struct XyOut {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct InterfaceOut<'a> {
    id: &'a str,
    mac: &'a str,
    model: &'a str,
    port: &'a str,
    switch: &'a str,
    ip: &'a str,
    subnet: &'a str,
    vlan: &'a str,
    position: XyOut,
    edges: &'a [String],
}

#[derive(Serialize)]
struct NodeOut<'a> {
    id: &'a str,
    position: XyOut,
    hardware: &'a HardwareProfile,
    netboot: &'a NetbootInfo,
    interfaces: Vec<InterfaceOut<'a>>,
}

#[derive(Serialize)]
struct SegmentOut {
    from: XyOut,
    to: XyOut,
}

impl From<Segment> for SegmentOut {
    fn from(value: Segment) -> Self {
        Self {
            from: XyOut {
                x: value.from.x,
                y: value.from.y,
            },
            to: XyOut {
                x: value.to.x,
                y: value.to.y,
            },
        }
    }
}

#[derive(Serialize)]
struct EdgeOut<'a> {
    id: &'a str,
    vlan: &'a str,
    start: &'a str,
    end: &'a str,
    /// `None` when an endpoint is missing from the document.
    segment: Option<SegmentOut>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InspectOut<'a> {
    meta: &'a ExperimentMeta,
    nodes: Vec<NodeOut<'a>>,
    edges: Vec<EdgeOut<'a>>,
    available_nodes: Vec<&'a str>,
}

fn inspect_summary<'a>(topo: &'a Topology, meta: &'a ExperimentMeta) -> InspectOut<'a> {
    let nodes = topo
        .nodes()
        .map(|node| NodeOut {
            id: &node.id,
            position: XyOut {
                x: node.position.x,
                y: node.position.y,
            },
            hardware: &node.hardware,
            netboot: &node.netboot,
            interfaces: node
                .interfaces
                .iter()
                .map(|iface| InterfaceOut {
                    id: &iface.id,
                    mac: &iface.mac,
                    model: &iface.model,
                    port: &iface.port,
                    switch: &iface.switch,
                    ip: &iface.ip,
                    subnet: &iface.subnet,
                    vlan: &iface.vlan,
                    position: XyOut {
                        x: iface.position.x,
                        y: iface.position.y,
                    },
                    edges: &iface.edges,
                })
                .collect(),
        })
        .collect();
    let edges = topo
        .edges()
        .map(|edge| EdgeOut {
            id: &edge.id,
            vlan: &edge.vlan,
            start: &edge.start,
            end: &edge.end,
            segment: topo.edge_segment(&edge.id).map(SegmentOut::from),
        })
        .collect();

    InspectOut {
        meta,
        nodes,
        edges,
        available_nodes: topo.pool().available().collect(),
    }
}

#[derive(Serialize)]
struct SubnetOut {
    ip: String,
    subnet: String,
    prefix: u8,
}

/// Input of `build`: what a user would do by hand in the editor, in order.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BuildScript {
    meta: ExperimentMeta,
    /// Added to the configured candidates before any node is placed.
    candidates: Vec<String>,
    nodes: Vec<BuildNode>,
    edges: Vec<BuildEdge>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct BuildNode {
    id: String,
    profile: HardwareProfile,
    netboot: NetbootInfo,
    interfaces: Vec<InterfaceSlot>,
    position: Option<BuildPosition>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct BuildPosition {
    x: f64,
    y: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct BuildEdge {
    vlan: String,
    start: String,
    start_interface: usize,
    end: String,
    end_interface: usize,
}

fn build_topology(config: EditorConfig, script: BuildScript) -> Result<String, CliError> {
    script.meta.validate()?;

    let mut topo = Topology::new(config);
    if !script.candidates.is_empty() {
        let mut candidates: Vec<String> = topo.pool().candidates().map(str::to_string).collect();
        candidates.extend(script.candidates);
        topo.set_candidates(candidates);
    }

    for node in &script.nodes {
        topo.create_node(&node.id, &node.profile, node.netboot.clone(), &node.interfaces)?;
        if let Some(at) = node.position {
            topo.move_node(&node.id, point(at.x, at.y))?;
        }
    }
    for edge in &script.edges {
        topo.create_edge(
            &edge.vlan,
            &edge.start,
            edge.start_interface,
            &edge.end,
            edge.end_interface,
        )?;
    }

    tracing::debug!(
        nodes = topo.node_count(),
        edges = topo.edge_count(),
        "built topology from script"
    );
    Ok(topo.to_xml(&script.meta))
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Subnet => {
            let text = args.input.as_deref().unwrap_or_default();
            let cidr = Cidr::parse(text)?;
            let (ip, subnet) = cidr.to_interface_address();
            write_json(
                &SubnetOut {
                    ip,
                    subnet,
                    prefix: cidr.prefix,
                },
                args.pretty,
            )
        }
        Command::Inspect => {
            let config = load_config(args.config.as_deref())?;
            let text = read_input(args.input.as_deref())?;
            let mut topo = Topology::new(config);
            let meta = topo.load_xml(&text)?;
            write_json(&inspect_summary(&topo, &meta), args.pretty)
        }
        Command::Normalize => {
            let config = load_config(args.config.as_deref())?;
            let text = read_input(args.input.as_deref())?;
            let mut topo = Topology::new(config);
            let meta = topo.load_xml(&text)?;
            write_text(&topo.to_xml(&meta), args.out.as_deref())
        }
        Command::Build => {
            let config = load_config(args.config.as_deref())?;
            let text = read_input(args.input.as_deref())?;
            let script: BuildScript = serde_json::from_str(&text)?;
            let xml = build_topology(config, script)?;
            write_text(&xml, args.out.as_deref())
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

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

    if let Err(err) = run(args) {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
