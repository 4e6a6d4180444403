// Domain layer - Sensor data model and the pure charting pipeline
pub mod labels;
pub mod mapping;
pub mod palette;
pub mod scaling;
pub mod schema;
pub mod store;
pub mod time_frame;
pub mod view;
pub mod window;
