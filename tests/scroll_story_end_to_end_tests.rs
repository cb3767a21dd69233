use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use scrolly_rs::api::{ScrollytellingConfig, ScrollytellingEngine, SettleOutcome};
use scrolly_rs::core::{Record, StepDirection, StoryData};
use scrolly_rs::host::HeadlessDocument;
use scrolly_rs::observer::ObserverStrategy;
use scrolly_rs::visualization::{ChartMount, Visualization, VisualizationKind};

const STORY_JSON: &str = r#"{
    "popularity": [
        {"decade": "1960s", "popularity": 41.5},
        {"decade": "1970s", "popularity": 47.0}
    ],
    "genres": [
        {"decade": "1960s", "genre": "rock", "share": 0.4}
    ],
    "energyDanceability": [
        {"decade": "1980s", "energy": 0.71, "danceability": 0.64},
        {"decade": "1990s", "energy": 0.68, "danceability": 0.66},
        {"decade": "2000s", "energy": 0.74, "danceability": 0.62}
    ],
    "topArtists": [],
    "radialData": [
        {"decade": "2010s", "valence": 0.48}
    ]
}"#;

#[derive(Debug, Clone, PartialEq)]
enum ChartCall {
    Init {
        kind: VisualizationKind,
        container_id: String,
        records: usize,
    },
    Resize(VisualizationKind),
}

type CallLog = Rc<RefCell<Vec<ChartCall>>>;

struct StoryChart {
    mount: ChartMount,
    calls: CallLog,
}

impl Visualization for StoryChart {
    fn init(&mut self, data: &[Record]) {
        self.calls.borrow_mut().push(ChartCall::Init {
            kind: self.mount.kind,
            container_id: self.mount.container_id.clone(),
            records: data.len(),
        });
    }

    fn resize(&mut self) {
        self.calls
            .borrow_mut()
            .push(ChartCall::Resize(self.mount.kind));
    }
}

/// Intro plus five chart sections, 1000px each, viewport 800px.
fn story_engine() -> ScrollytellingEngine<HeadlessDocument> {
    let mut document = HeadlessDocument::new(1280.0, 800.0);
    document.push_sections(6, 1000.0);
    for kind in VisualizationKind::ALL {
        document.set_container_width(kind.default_container_id(), 960.0);
    }
    ScrollytellingEngine::new(document, ScrollytellingConfig::default()).expect("engine init")
}

#[test]
fn reader_scrolls_through_the_whole_story() {
    let mut engine = story_engine();
    let calls = CallLog::default();
    let story = StoryData::from_json_str(STORY_JSON).expect("story data");

    let sink = calls.clone();
    let handles = engine
        .init_visualizations(&story, |mount| {
            assert_eq!(mount.tooltip_id, "tooltip");
            Box::new(StoryChart {
                mount: mount.clone(),
                calls: sink.clone(),
            })
        })
        .expect("init visualizations");
    assert_eq!(handles.len(), 5);
    assert!(handles.iter().all(|handle| handle.is_initialized()));

    let steps = Rc::new(RefCell::new(Vec::new()));
    let step_sink = steps.clone();
    engine.on_step_change(move |step_index, direction, _| {
        assert_eq!(direction, StepDirection::Enter);
        step_sink.borrow_mut().push(step_index);
    });

    assert_eq!(engine.setup_observer(), ObserverStrategy::StepLibrary);

    let mut settle_reports = Vec::new();
    for step in 1..=5usize {
        engine.host_mut().scroll_to(step as f64 * 1000.0 - 300.0);
        engine.handle_scroll();
        settle_reports.extend(engine.advance_time(Duration::from_millis(100)));
    }

    assert_eq!(*steps.borrow(), vec![0, 1, 2, 3, 4, 5]);
    assert_eq!(engine.current_step(), 5);
    assert_eq!(settle_reports.len(), 5);
    assert!(
        settle_reports
            .iter()
            .all(|report| report.outcome == SettleOutcome::Resized)
    );

    let calls = calls.borrow();
    let inits: Vec<(VisualizationKind, usize)> = calls
        .iter()
        .filter_map(|call| match call {
            ChartCall::Init { kind, records, .. } => Some((*kind, *records)),
            ChartCall::Resize(_) => None,
        })
        .collect();
    assert_eq!(
        inits,
        vec![
            (VisualizationKind::Line, 2),
            (VisualizationKind::StackedBar, 1),
            (VisualizationKind::Scatter, 3),
            (VisualizationKind::Bubble, 0),
            (VisualizationKind::Radial, 1),
        ]
    );
    let resizes: Vec<VisualizationKind> = calls
        .iter()
        .filter_map(|call| match call {
            ChartCall::Resize(kind) => Some(*kind),
            ChartCall::Init { .. } => None,
        })
        .collect();
    assert_eq!(resizes, VisualizationKind::ALL.to_vec());
    assert!(calls.iter().any(|call| matches!(
        call,
        ChartCall::Init { container_id, .. } if container_id == "radial-spectrum-container"
    )));
}

#[test]
fn charts_created_after_setup_still_settle() {
    let mut engine = story_engine();
    engine.setup_observer();

    // data still loading while the reader reaches the first chart
    engine.host_mut().scroll_to(700.0);
    engine.handle_scroll();
    let reports = engine.advance_time(Duration::from_millis(100));
    assert_eq!(reports[0].outcome, SettleOutcome::NotInitialized);

    let calls = CallLog::default();
    let sink = calls.clone();
    engine
        .init_visualizations(&StoryData::default(), |mount| {
            Box::new(StoryChart {
                mount: mount.clone(),
                calls: sink.clone(),
            })
        })
        .expect("init visualizations");

    engine.host_mut().scroll_to(1_700.0);
    engine.handle_scroll();
    let reports = engine.advance_time(Duration::from_millis(100));
    assert_eq!(reports[0].kind, VisualizationKind::StackedBar);
    assert_eq!(reports[0].outcome, SettleOutcome::Resized);
}

#[test]
fn teardown_stops_step_delivery_but_keeps_charts() {
    let mut engine = story_engine();
    let calls = CallLog::default();
    let sink = calls.clone();
    engine
        .init_visualizations(&StoryData::default(), |mount| {
            Box::new(StoryChart {
                mount: mount.clone(),
                calls: sink.clone(),
            })
        })
        .expect("init visualizations");
    engine.setup_observer();
    engine.host_mut().scroll_to(700.0);
    engine.handle_scroll();

    engine.teardown();

    assert_eq!(engine.observer_strategy(), ObserverStrategy::Disabled);
    assert!(engine.host().active_elements().is_empty());
    engine.host_mut().scroll_to(2_700.0);
    assert_eq!(engine.handle_scroll(), 0);
    assert!(engine.advance_time(Duration::from_millis(100)).is_empty());

    let fanout = engine.handle_window_resize();
    assert_eq!(fanout.resized, 5);
    assert!(!fanout.observer_resized);

    // observer can be installed again on the same page
    assert_eq!(engine.setup_observer(), ObserverStrategy::StepLibrary);
    assert_eq!(engine.current_step(), 3);
}

#[test]
fn repeated_setup_keeps_the_running_observer() {
    let mut engine = story_engine();
    let entered = Rc::new(RefCell::new(Vec::new()));
    let sink = entered.clone();
    engine.on_step_change(move |step_index, direction, _| {
        sink.borrow_mut().push((step_index, direction));
    });
    engine.setup_observer();
    engine.host_mut().scroll_to(700.0);
    engine.handle_scroll();
    let pending = engine.pending_settles();

    assert_eq!(engine.setup_observer(), ObserverStrategy::StepLibrary);

    assert_eq!(
        *entered.borrow(),
        vec![(0, StepDirection::Enter), (1, StepDirection::Enter)]
    );
    assert_eq!(engine.pending_settles(), pending);
    assert_eq!(engine.host().active_elements().len(), 1);
    assert_eq!(engine.dispatch_stats().enters, 2);

    // a fresh setup after teardown rescans and reports the current section
    engine.teardown();
    assert_eq!(engine.setup_observer(), ObserverStrategy::StepLibrary);
    assert_eq!(entered.borrow().last(), Some(&(1, StepDirection::Enter)));
    assert_eq!(engine.current_step(), 1);
}

#[test]
fn init_visualizations_requires_bound_slots() {
    let document = HeadlessDocument::new(1280.0, 800.0);
    let config = ScrollytellingConfig::default().with_slots(Vec::new());
    let mut engine = ScrollytellingEngine::new(document, config).expect("engine init");

    let result = engine.init_visualizations(&StoryData::default(), |mount| {
        Box::new(StoryChart {
            mount: mount.clone(),
            calls: CallLog::default(),
        })
    });
    assert!(result.is_err());
}
