use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use scrolly_rs::api::{
    LifecycleAdapter, ScrollytellingConfig, ScrollytellingEngine, SettleOutcome, SettleReport,
};
use scrolly_rs::core::{Record, StepDirection};
use scrolly_rs::host::HeadlessDocument;
use scrolly_rs::visualization::{Visualization, VisualizationKind};

#[derive(Debug, Default)]
struct ChartState {
    inits: u32,
    resizes: u32,
    records: usize,
    selected_decade: Option<String>,
}

type SharedState = Rc<RefCell<ChartState>>;
type ResizeLog = Rc<RefCell<Vec<VisualizationKind>>>;

struct RecordingChart {
    kind: VisualizationKind,
    state: SharedState,
    log: ResizeLog,
}

impl Visualization for RecordingChart {
    fn init(&mut self, data: &[Record]) {
        let mut state = self.state.borrow_mut();
        state.inits += 1;
        state.records = data.len();
    }

    fn resize(&mut self) {
        self.state.borrow_mut().resizes += 1;
        self.log.borrow_mut().push(self.kind);
    }
}

const SETTLE: Duration = Duration::from_millis(100);

/// Viewport 800px tall over six 1000px sections; every chart container is laid out.
fn build_engine(config: ScrollytellingConfig) -> ScrollytellingEngine<HeadlessDocument> {
    let mut document = HeadlessDocument::new(1200.0, 800.0);
    document.push_sections(6, 1000.0);
    for kind in VisualizationKind::ALL {
        document.set_container_width(kind.default_container_id(), 900.0);
    }
    let mut engine = ScrollytellingEngine::new(document, config).expect("engine init");
    engine.setup_observer();
    engine
}

fn attach(
    engine: &mut ScrollytellingEngine<HeadlessDocument>,
    kind: VisualizationKind,
    log: &ResizeLog,
) -> SharedState {
    let state = SharedState::default();
    engine
        .attach_chart(
            kind,
            Box::new(RecordingChart {
                kind,
                state: state.clone(),
                log: log.clone(),
            }),
            &[Record::new("1960s").with_metric("popularity", 42.0)],
        )
        .expect("attach chart");
    state
}

/// Parks the midpoint trigger line 100px inside section `step`.
fn visit(engine: &mut ScrollytellingEngine<HeadlessDocument>, step: usize) {
    engine.host_mut().scroll_to(step as f64 * 1000.0 - 300.0);
    engine.handle_scroll();
    assert_eq!(engine.current_step(), step);
}

#[test]
fn settle_resize_runs_after_the_delay() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    let log = ResizeLog::default();
    let state = attach(&mut engine, VisualizationKind::Line, &log);

    visit(&mut engine, 1);
    assert_eq!(engine.pending_settles(), 1);
    assert!(engine.advance_time(Duration::from_millis(99)).is_empty());
    assert_eq!(state.borrow().resizes, 0);

    let reports = engine.advance_time(Duration::from_millis(1));
    assert_eq!(
        reports,
        vec![SettleReport {
            step_index: 1,
            kind: VisualizationKind::Line,
            outcome: SettleOutcome::Resized,
        }]
    );
    assert_eq!(state.borrow().resizes, 1);
    assert_eq!(engine.pending_settles(), 0);
}

#[test]
fn hidden_container_skips_the_resize() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    let log = ResizeLog::default();
    let state = attach(&mut engine, VisualizationKind::Line, &log);
    engine
        .host_mut()
        .set_container_width("line-chart-container", 0.0);

    visit(&mut engine, 1);
    let reports = engine.advance_time(SETTLE);

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].outcome, SettleOutcome::SkippedHidden);
    assert_eq!(state.borrow().resizes, 0);
}

#[test]
fn missing_container_skips_the_resize() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    let log = ResizeLog::default();
    let state = attach(&mut engine, VisualizationKind::StackedBar, &log);
    engine.host_mut().remove_container("stacked-bar-container");

    visit(&mut engine, 2);
    let reports = engine.advance_time(SETTLE);

    assert_eq!(reports[0].kind, VisualizationKind::StackedBar);
    assert_eq!(reports[0].outcome, SettleOutcome::SkippedHidden);
    assert_eq!(state.borrow().resizes, 0);
}

#[test]
fn width_is_checked_when_the_delay_expires() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    let log = ResizeLog::default();
    let state = attach(&mut engine, VisualizationKind::Scatter, &log);
    engine
        .host_mut()
        .set_container_width("scatterplot-container", 0.0);

    visit(&mut engine, 3);
    // container finishes its transition before the settle fires
    engine.advance_time(Duration::from_millis(40));
    engine
        .host_mut()
        .set_container_width("scatterplot-container", 640.0);
    let reports = engine.advance_time(Duration::from_millis(60));

    assert_eq!(reports[0].outcome, SettleOutcome::Resized);
    assert_eq!(state.borrow().resizes, 1);
}

#[test]
fn unset_chart_reports_not_initialized() {
    let mut engine = build_engine(ScrollytellingConfig::default());

    visit(&mut engine, 4);
    let reports = engine.advance_time(SETTLE);

    assert_eq!(
        reports,
        vec![SettleReport {
            step_index: 4,
            kind: VisualizationKind::Bubble,
            outcome: SettleOutcome::NotInitialized,
        }]
    );
}

#[test]
fn intro_step_has_no_visualization() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    assert_eq!(engine.current_step(), 0);
    assert_eq!(engine.pending_settles(), 0);
    assert!(engine.advance_time(Duration::from_secs(1)).is_empty());
}

#[test]
fn exits_schedule_nothing() {
    let config = ScrollytellingConfig::default();
    let mut adapter = LifecycleAdapter::new(&config.slots, config.settle_delay());

    assert!(!adapter.on_step_change(1, StepDirection::Exit));
    assert!(!adapter.on_step_change(0, StepDirection::Enter));
    assert!(!adapter.on_step_change(42, StepDirection::Enter));
    assert!(adapter.on_step_change(5, StepDirection::Enter));
    assert_eq!(adapter.pending_len(), 1);
}

#[test]
fn repeated_enters_coalesce_to_the_latest_deadline() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    let log = ResizeLog::default();
    let line = attach(&mut engine, VisualizationKind::Line, &log);
    attach(&mut engine, VisualizationKind::StackedBar, &log);

    visit(&mut engine, 1);
    engine.advance_time(Duration::from_millis(60));
    visit(&mut engine, 2);
    visit(&mut engine, 1);
    assert_eq!(engine.pending_settles(), 2);

    // the first line settle would have fired at 100ms
    assert!(engine.advance_time(Duration::from_millis(50)).is_empty());
    let reports = engine.advance_time(Duration::from_millis(50));

    let kinds: Vec<_> = reports.iter().map(|report| report.kind).collect();
    assert_eq!(
        kinds,
        vec![VisualizationKind::StackedBar, VisualizationKind::Line]
    );
    assert_eq!(line.borrow().resizes, 1);
    assert_eq!(engine.settle_clock(), Duration::from_millis(160));
}

#[test]
fn busy_chart_drops_the_settle_resize() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    let log = ResizeLog::default();
    let state = attach(&mut engine, VisualizationKind::Radial, &log);
    let handle = engine
        .chart(VisualizationKind::Radial)
        .expect("radial chart attached");

    let ticket = handle.hold_busy().expect("chart idle");
    visit(&mut engine, 5);
    let reports = engine.advance_time(SETTLE);
    drop(ticket);

    assert_eq!(reports[0].outcome, SettleOutcome::Busy);
    assert_eq!(state.borrow().resizes, 0);
    assert!(!handle.is_busy());
}

#[test]
fn resize_preserves_chart_ui_state() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    let log = ResizeLog::default();
    let state = attach(&mut engine, VisualizationKind::Line, &log);
    state.borrow_mut().selected_decade = Some("1980s".to_owned());

    for _ in 0..3 {
        visit(&mut engine, 2);
        visit(&mut engine, 1);
        engine.advance_time(SETTLE);
    }

    let state = state.borrow();
    assert_eq!(state.inits, 1);
    assert_eq!(state.records, 1);
    assert_eq!(state.resizes, 3);
    assert_eq!(state.selected_decade.as_deref(), Some("1980s"));
}

#[test]
fn settles_resolve_in_step_order() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    let log = ResizeLog::default();
    for kind in VisualizationKind::ALL {
        attach(&mut engine, kind, &log);
    }

    for step in 1..=5 {
        visit(&mut engine, step);
        engine.advance_time(SETTLE);
    }

    assert_eq!(*log.borrow(), VisualizationKind::ALL.to_vec());
}

#[test]
fn custom_settle_delay_is_honored() {
    let config = ScrollytellingConfig::default().with_settle_delay(Duration::from_millis(250));
    let mut engine = build_engine(config);
    let log = ResizeLog::default();
    attach(&mut engine, VisualizationKind::Line, &log);

    visit(&mut engine, 1);
    assert!(engine.advance_time(SETTLE).is_empty());
    assert_eq!(engine.advance_time(Duration::from_millis(150)).len(), 1);
}

#[test]
fn teardown_drops_pending_settles() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    let log = ResizeLog::default();
    attach(&mut engine, VisualizationKind::Line, &log);

    visit(&mut engine, 1);
    engine.teardown();

    assert_eq!(engine.pending_settles(), 0);
    assert!(engine.advance_time(SETTLE).is_empty());
    assert!(log.borrow().is_empty());
    assert!(engine.chart(VisualizationKind::Line).is_some());
}

#[test]
fn settle_clock_saturates_instead_of_overflowing() {
    let mut engine = build_engine(ScrollytellingConfig::default());
    let log = ResizeLog::default();
    let state = attach(&mut engine, VisualizationKind::Line, &log);

    visit(&mut engine, 1);
    assert_eq!(engine.advance_time(Duration::MAX).len(), 1);
    assert_eq!(engine.settle_clock(), Duration::MAX);

    engine.host_mut().scroll_to(0.0);
    engine.handle_scroll();
    visit(&mut engine, 1);
    assert_eq!(engine.pending_settles(), 1);
    assert_eq!(engine.advance_time(SETTLE).len(), 1);
    assert_eq!(engine.settle_clock(), Duration::MAX);
    assert_eq!(state.borrow().resizes, 2);
}
