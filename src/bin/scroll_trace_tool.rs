use indexmap::IndexMap;
use scrolly_rs::api::{ResizeFanout, ScrollytellingConfig, ScrollytellingEngine, SettleReport};
use scrolly_rs::core::{Record, StepDirection};
use scrolly_rs::host::{HeadlessDocument, HostCapabilities};
use scrolly_rs::observer::ObserverStrategy;
use scrolly_rs::visualization::{Visualization, VisualizationKind};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

const USAGE: &str = "usage: scroll_trace_tool --input <script.json> --output <log.json>";

#[derive(Debug)]
struct CliArgs {
    input: PathBuf,
    output: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ScrollScript {
    viewport: ScriptViewport,
    #[serde(default)]
    capabilities: HostCapabilities,
    #[serde(default)]
    config: Option<ScrollytellingConfig>,
    section_heights: Vec<f64>,
    #[serde(default)]
    containers: IndexMap<String, f64>,
    #[serde(default)]
    charts: Vec<VisualizationKind>,
    actions: Vec<ScriptAction>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct ScriptViewport {
    width: f64,
    height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ScriptAction {
    ScrollTo { y: f64 },
    ScrollBy { delta: f64 },
    /// Puts the top of section `step` at `fraction` of the viewport height.
    ScrollToStep { step: usize, fraction: f64 },
    AdvanceMs { ms: u64 },
    WindowResize { width: f64, height: f64 },
    SetContainerWidth { container_id: String, width: f64 },
    SetSectionHeight { index: usize, height: f64 },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum LogEntry {
    Setup {
        strategy: ObserverStrategy,
        sections: usize,
    },
    Step {
        action: Option<usize>,
        step_index: usize,
        direction: StepDirection,
    },
    Settle {
        action: usize,
        report: SettleReport,
    },
    WindowResize {
        action: usize,
        fanout: ResizeFanout,
    },
}

#[derive(Debug, Serialize)]
struct TraceLog {
    entries: Vec<LogEntry>,
    final_step: usize,
    active_sections: Vec<usize>,
}

/// Stand-in chart: records nothing, draws nothing.
struct TraceChart;

impl Visualization for TraceChart {
    fn init(&mut self, _data: &[Record]) {}

    fn resize(&mut self) {}
}

fn main() {
    let _ = scrolly_rs::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args(std::env::args().skip(1))?;
    let raw = fs::read_to_string(&args.input)
        .map_err(|err| format!("failed to read `{}`: {err}", args.input.display()))?;
    let script: ScrollScript =
        serde_json::from_str(&raw).map_err(|err| format!("invalid json: {err}"))?;
    let log = replay(script)?;
    write_json(&args.output, &log)
}

fn replay(script: ScrollScript) -> Result<TraceLog, String> {
    let mut document = HeadlessDocument::new(script.viewport.width, script.viewport.height)
        .with_capabilities(script.capabilities);
    let sections: Vec<_> = script
        .section_heights
        .iter()
        .map(|height| document.push_element("scroll-section", *height))
        .collect();
    for (container_id, width) in &script.containers {
        document.set_container_width(container_id.clone(), *width);
    }

    let config = script.config.unwrap_or_default();
    let mut engine =
        ScrollytellingEngine::new(document, config).map_err(|err| format!("{err}"))?;
    for kind in &script.charts {
        engine
            .attach_chart(*kind, Box::new(TraceChart), &[])
            .map_err(|err| format!("{err}"))?;
    }

    let current_action = Rc::new(RefCell::new(None::<usize>));
    let entries = Rc::new(RefCell::new(Vec::<LogEntry>::new()));
    for step_index in 0..sections.len() {
        let current_action = current_action.clone();
        let entries = entries.clone();
        engine.on_step(step_index, move |direction, _element| {
            entries.borrow_mut().push(LogEntry::Step {
                action: *current_action.borrow(),
                step_index,
                direction,
            });
        });
    }

    let strategy = engine.setup_observer();
    entries.borrow_mut().insert(
        0,
        LogEntry::Setup {
            strategy,
            sections: engine.sections().map_or(0, |registry| registry.len()),
        },
    );

    for (index, action) in script.actions.into_iter().enumerate() {
        *current_action.borrow_mut() = Some(index);
        match action {
            ScriptAction::ScrollTo { y } => {
                engine.host_mut().scroll_to(y);
                engine.handle_scroll();
            }
            ScriptAction::ScrollBy { delta } => {
                engine.host_mut().scroll_by(delta);
                engine.handle_scroll();
            }
            ScriptAction::ScrollToStep { step, fraction } => {
                let element = engine
                    .section_element(step)
                    .map_err(|err| format!("{err}"))?;
                engine.host_mut().scroll_element_to(element, fraction);
                engine.handle_scroll();
            }
            ScriptAction::AdvanceMs { ms } => {
                for report in engine.advance_time(Duration::from_millis(ms)) {
                    entries
                        .borrow_mut()
                        .push(LogEntry::Settle { action: index, report });
                }
            }
            ScriptAction::WindowResize { width, height } => {
                engine.host_mut().resize_viewport(width, height);
                let fanout = engine.handle_window_resize();
                entries
                    .borrow_mut()
                    .push(LogEntry::WindowResize { action: index, fanout });
            }
            ScriptAction::SetContainerWidth {
                container_id,
                width,
            } => engine.host_mut().set_container_width(container_id, width),
            ScriptAction::SetSectionHeight {
                index: section,
                height,
            } => {
                let element = sections
                    .get(section)
                    .copied()
                    .ok_or_else(|| format!("unknown section index {section}"))?;
                engine.host_mut().set_element_height(element, height);
            }
        }
    }

    let active_sections = engine
        .sections()
        .map(|registry| registry.active_indices())
        .unwrap_or_default();
    let final_step = engine.current_step();
    drop(engine);
    let entries = Rc::try_unwrap(entries)
        .map_err(|_| "trace entries still shared".to_owned())?
        .into_inner();
    Ok(TraceLog {
        entries,
        final_step,
        active_sections,
    })
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<CliArgs, String> {
    let mut args = args.into_iter();
    let mut input = None::<PathBuf>;
    let mut output = None::<PathBuf>;

    while let Some(flag) = args.next() {
        match flag.as_str() {
            "--input" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --input".to_owned())?;
                input = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output = Some(PathBuf::from(value));
            }
            "--help" | "-h" => return Err(USAGE.to_owned()),
            other => return Err(format!("unknown argument `{other}`\n{USAGE}")),
        }
    }

    Ok(CliArgs {
        input: input.ok_or_else(|| format!("missing --input\n{USAGE}"))?,
        output: output.ok_or_else(|| format!("missing --output\n{USAGE}"))?,
    })
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    let payload =
        serde_json::to_string_pretty(value).map_err(|err| format!("serialize failed: {err}"))?;
    fs::write(path, payload).map_err(|err| format!("failed to write `{}`: {err}", path.display()))
}
