//! Drives an [`AddressWidget`] on tokio.
//!
//! Fetches and attribute writes run as spawned tasks so event handling never
//! waits on the network. Fetch results come back through
//! [`WidgetRuntime::next_fetch`]; writes are fire-and-forget and only
//! logged on failure.

use std::sync::Arc;

use addrfield_core::{Behavior, InterceptDecision, LocationRecord, PersistRequest, WidgetView};
use addrfield_loader::LoaderError;
use tokio::task::JoinSet;

use crate::host::{AttributeWriter, DatasetSource, HostSnapshot};
use crate::widget::{AddressWidget, Effect, FetchRequest, WidgetEvent};

type FetchOutcome = (u64, Result<Vec<LocationRecord>, LoaderError>);

pub struct WidgetRuntime<S, W> {
    widget: AddressWidget,
    source: Arc<S>,
    writer: Arc<W>,
    fetches: JoinSet<FetchOutcome>,
    writes: JoinSet<()>,
}

impl<S, W> WidgetRuntime<S, W>
where
    S: DatasetSource,
    W: AttributeWriter,
{
    /// Mounts the widget and starts any initial fetch. Must be called from
    /// within a tokio runtime.
    pub fn mount(snapshot: HostSnapshot, source: Arc<S>, writer: Arc<W>) -> Self {
        let (widget, effects) = AddressWidget::mount(snapshot);
        let mut runtime = Self {
            widget,
            source,
            writer,
            fetches: JoinSet::new(),
            writes: JoinSet::new(),
        };
        runtime.run(effects);
        runtime
    }

    pub fn dispatch(&mut self, event: WidgetEvent) {
        let effects = self.widget.handle(event);
        self.run(effects);
    }

    /// Waits for one fetch to finish and applies it. Returns `false` when no
    /// fetch is outstanding.
    pub async fn next_fetch(&mut self) -> bool {
        let Some(joined) = self.fetches.join_next().await else {
            return false;
        };
        match joined {
            Ok((generation, result)) => {
                let effects = self.widget.complete_fetch(generation, result);
                self.run(effects);
            }
            Err(e) => tracing::error!(error = %e, "dataset fetch task failed"),
        }
        true
    }

    /// Applies every outstanding fetch and waits for queued writes.
    pub async fn settle(&mut self) {
        while self.next_fetch().await {}
        while let Some(joined) = self.writes.join_next().await {
            if let Err(e) = joined {
                tracing::warn!(error = %e, "attribute write task failed");
            }
        }
    }

    #[must_use]
    pub fn intercept(&self, can_block_progress: bool) -> InterceptDecision {
        self.widget.intercept(can_block_progress)
    }

    pub fn complete_intercept(&mut self, decision: &InterceptDecision, result: Behavior) {
        self.widget.complete_intercept(decision, result);
    }

    #[must_use]
    pub fn view(&self) -> WidgetView {
        self.widget.view()
    }

    #[must_use]
    pub fn widget(&self) -> &AddressWidget {
        &self.widget
    }

    fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch(request) => self.spawn_fetch(request),
                Effect::Persist(request) => self.spawn_write(request),
            }
        }
    }

    fn spawn_fetch(&mut self, request: FetchRequest) {
        let source = Arc::clone(&self.source);
        tracing::debug!(
            url = %request.url,
            country = %request.country_code,
            generation = request.generation,
            "fetching address dataset"
        );
        self.fetches.spawn(async move {
            let result = source.fetch_records(&request.url).await;
            (request.generation, result)
        });
    }

    fn spawn_write(&mut self, request: PersistRequest) {
        let writer = Arc::clone(&self.writer);
        self.writes.spawn(async move {
            let PersistRequest {
                field,
                change,
                ticket,
            } = request;
            if !ticket.is_current() {
                tracing::debug!(
                    %field,
                    generation = ticket.generation(),
                    "skipping superseded attribute write"
                );
                return;
            }
            let key = change.key.clone();
            if let Err(e) = writer.write_attribute(change).await {
                tracing::warn!(
                    %field,
                    key = %key,
                    error = %e,
                    "failed to persist order attribute"
                );
            }
        });
    }
}
