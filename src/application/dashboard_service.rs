// Dashboard service - One independent dashboard: selections, store and UI event handlers
use crate::application::events::{DashboardEvent, EventBus};
use crate::application::ingestion_service::{
    Applied, Ingestion, IngestionError, IngestionPipeline, IngestionRequest, StoreSlot,
};
use crate::application::sensor_transport::SensorTransport;
use crate::application::visualization_service::{ChartFrame, Visualizer};
use crate::domain::schema::schema_for;
use crate::domain::store::TimeSeriesStore;
use crate::domain::time_frame::{TimeFrame, TimeFrameError};
use crate::domain::view::ViewState;
use crate::infrastructure::config::DashboardConfig;
use std::sync::Arc;
use tokio::sync::broadcast;

pub struct Dashboard {
    pipeline: IngestionPipeline,
    slot: StoreSlot,
    visualizer: Visualizer,
    events: EventBus,
    status: String,
}

impl Dashboard {
    pub fn new(pipeline: IngestionPipeline, visualizer: Visualizer) -> Self {
        Self {
            pipeline,
            slot: StoreSlot::new(),
            visualizer,
            events: EventBus::new(),
            status: "Ready to fetch data...".to_string(),
        }
    }

    pub fn from_config(
        config: &DashboardConfig,
        transport: Arc<dyn SensorTransport>,
    ) -> anyhow::Result<Self> {
        let pipeline = IngestionPipeline::new(
            transport,
            config.api.base_url.clone(),
            config.api.api_key.clone(),
        );

        let mut view = ViewState::new(
            config.defaults.sensor_kind.clone(),
            config.defaults.time_frame()?,
        );
        view.multi_series = config.defaults.multi_series;

        Ok(Self::new(pipeline, Visualizer::new(view, config.chart)))
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn view(&self) -> &ViewState {
        self.visualizer.view()
    }

    pub fn store(&self) -> Arc<TimeSeriesStore> {
        self.slot.current()
    }

    pub fn pipeline(&self) -> &IngestionPipeline {
        &self.pipeline
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DashboardEvent> {
        self.events.subscribe()
    }

    /// Parameters of the loaded store, for the parameter picker
    pub fn parameters(&self) -> Vec<String> {
        self.visualizer.parameters(&self.slot.current())
    }

    pub fn frame(&self) -> ChartFrame {
        self.visualizer.render(&self.slot.current())
    }

    pub async fn on_sensor_kind_changed(&mut self, kind: &str) -> ChartFrame {
        if let Err(e) = schema_for(kind) {
            self.report_failure(kind, &IngestionError::from(e));
            return self.frame();
        }
        self.visualizer.set_kind(kind);
        self.refresh().await
    }

    pub async fn on_time_frame_changed(
        &mut self,
        year: i32,
        month: u32,
    ) -> Result<ChartFrame, TimeFrameError> {
        let time_frame = match TimeFrame::new(year, month) {
            Ok(time_frame) => time_frame,
            Err(e) => {
                self.set_status(format!("Error: {}", e));
                return Err(e);
            }
        };
        self.visualizer.set_time_frame(time_frame);
        Ok(self.refresh().await)
    }

    pub fn on_parameter_changed(&mut self, parameter: &str) -> ChartFrame {
        let store = self.slot.current();
        if self.visualizer.select_parameter(&store, parameter) {
            self.events.publish(DashboardEvent::ChartInvalidated);
        }
        self.visualizer.render(&store)
    }

    pub fn on_multi_series_toggled(&mut self, on: bool) -> ChartFrame {
        self.visualizer.set_multi_series(on);
        self.events.publish(DashboardEvent::ChartInvalidated);
        self.frame()
    }

    pub async fn on_refresh_requested(&mut self) -> ChartFrame {
        self.refresh().await
    }

    /// Show newer samples
    pub fn on_page_forward(&mut self) -> ChartFrame {
        if self.visualizer.page_forward() {
            self.events.publish(DashboardEvent::ChartInvalidated);
        }
        self.frame()
    }

    /// Show older samples
    pub fn on_page_backward(&mut self) -> ChartFrame {
        let store = self.slot.current();
        if self.visualizer.page_backward(&store) {
            self.events.publish(DashboardEvent::ChartInvalidated);
        }
        self.visualizer.render(&store)
    }

    async fn refresh(&mut self) -> ChartFrame {
        let request = self.issue_refresh();
        let ingestion = self.pipeline.run(request).await;
        self.complete(ingestion);
        self.frame()
    }

    /// Start a fetch for the current selection. Hosts that keep several fetches
    /// in flight run the request on [`Dashboard::pipeline`] and hand the result
    /// to [`Dashboard::complete`].
    pub fn issue_refresh(&mut self) -> IngestionRequest {
        let view = self.visualizer.view();
        let request = self
            .pipeline
            .issue(&view.selected_kind, view.selected_time_frame);
        self.set_status(format!("Fetching {} data...", request.kind));
        request
    }

    pub fn complete(&mut self, ingestion: Ingestion) -> Applied {
        let applied = self.slot.apply(ingestion);

        match &applied {
            Applied::Replaced {
                kind,
                time_frame,
                points,
            } => {
                self.visualizer.on_data_loaded(&self.slot.current());
                self.set_status(format!(
                    "Loaded {} {} data points from {}",
                    points, kind, time_frame
                ));
                self.events.publish(DashboardEvent::DataLoaded {
                    kind: kind.clone(),
                    time_frame: time_frame.to_string(),
                    points: *points,
                });
                self.events.publish(DashboardEvent::ChartInvalidated);
            }
            Applied::Failed { kind, error } => self.report_failure(kind, error),
            Applied::Stale { .. } => {}
        }

        applied
    }

    fn report_failure(&mut self, kind: &str, error: &IngestionError) {
        let status = match error {
            IngestionError::TransportFailure { .. } => format!("Error: Failed to fetch {} data", kind),
            IngestionError::UnknownSensorKind(e) => format!("Error: {}", e),
            IngestionError::DecodeFailure { .. } | IngestionError::MalformedValue { .. } => {
                format!("Error processing {} data", kind)
            }
        };
        tracing::warn!("{} ({})", status, error);
        self.set_status(status);
        self.events.publish(DashboardEvent::IngestionFailed {
            kind: kind.to_string(),
            error: error.to_string(),
        });
    }

    fn set_status(&mut self, status: String) {
        self.events.publish(DashboardEvent::Status(status.clone()));
        self.status = status;
    }
}
