// Sensor ingestion and windowed chart engine for embedding in dashboard UIs
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::dashboard_service::Dashboard;
pub use application::events::{DashboardEvent, EventBus};
pub use application::ingestion_service::{IngestionError, IngestionPipeline};
pub use application::sensor_transport::SensorTransport;
pub use application::visualization_service::{ChartFrame, SeriesLine, Visualizer};
pub use domain::store::TimeSeriesStore;
pub use domain::time_frame::TimeFrame;
pub use infrastructure::config::{DashboardConfig, load_dashboard_config};
pub use infrastructure::http_transport::HttpTransport;
