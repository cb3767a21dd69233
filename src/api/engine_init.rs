use tracing::{error, info, warn};

use crate::error::ScrollyResult;
use crate::host::DocumentHost;
use crate::observer::{ObserverStrategy, StepObserver, StepTracker};

use super::{
    LifecycleAdapter, ResizeCoordinator, ScrollytellingConfig, ScrollytellingEngine,
    StepController,
};

impl<H: DocumentHost> ScrollytellingEngine<H> {
    /// Creates an engine with validated configuration and empty slots.
    ///
    /// Observation does not start until `setup_observer`, so callbacks can be
    /// registered and charts attached first.
    pub fn new(host: H, config: ScrollytellingConfig) -> ScrollyResult<Self> {
        config.validate()?;
        let adapter = LifecycleAdapter::new(&config.slots, config.settle_delay());

        Ok(Self {
            host,
            config,
            observer: None,
            controller: StepController::new(),
            adapter,
            resize: ResizeCoordinator::new(),
        })
    }

    /// Scans sections, picks a strategy and runs the initial observation pass.
    ///
    /// Never fails: without any tracking capability the error is logged and
    /// the engine keeps running with scrollytelling disabled. A running
    /// observer is kept as is; call `teardown` first to rescan.
    pub fn setup_observer(&mut self) -> ObserverStrategy {
        if let Some(strategy) = self.running_strategy() {
            return strategy;
        }
        match StepObserver::setup(&self.host, &self.config.observer) {
            Ok(observer) => self.install_observer(observer),
            Err(err) => {
                error!(error = %err, "scrollytelling disabled");
                self.observer = None;
                ObserverStrategy::Disabled
            }
        }
    }

    /// Like `setup_observer`, with a caller-supplied tracking strategy.
    pub fn setup_observer_with(&mut self, tracker: Box<dyn StepTracker>) -> ObserverStrategy {
        if let Some(strategy) = self.running_strategy() {
            return strategy;
        }
        let observer = StepObserver::with_tracker(&self.host, &self.config.observer, tracker);
        self.install_observer(observer)
    }

    fn running_strategy(&self) -> Option<ObserverStrategy> {
        let strategy = self.observer.as_ref()?.strategy();
        warn!(strategy = ?strategy, "step observer already running, teardown first to rescan");
        Some(strategy)
    }

    fn install_observer(&mut self, observer: StepObserver) -> ObserverStrategy {
        let strategy = observer.strategy();
        self.observer = Some(observer);
        let dispatched = self.handle_scroll();
        info!(strategy = ?strategy, initial_signals = dispatched, "scrollytelling active");
        strategy
    }
}
