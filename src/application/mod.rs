// Application layer - Use cases wiring the domain to its collaborators
pub mod dashboard_service;
pub mod events;
pub mod ingestion_service;
pub mod sensor_transport;
pub mod visualization_service;
