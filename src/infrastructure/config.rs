use crate::domain::mapping::ChartLayout;
use crate::domain::schema::schema_for;
use crate::domain::time_frame::TimeFrame;
use anyhow::{Context, ensure};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub chart: ChartSettings,
    pub defaults: DefaultSelection,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ChartSettings {
    pub width: f64,
    pub height: f64,
    pub x_padding: f64,
    pub y_padding: f64,
    /// Samples visible at once
    pub page_size: usize,
}

impl ChartSettings {
    pub fn layout(&self) -> ChartLayout {
        ChartLayout {
            width: self.width,
            height: self.height,
            x_padding: self.x_padding,
            y_padding: self.y_padding,
        }
    }
}

impl Default for ChartSettings {
    fn default() -> Self {
        let layout = ChartLayout::default();
        Self {
            width: layout.width,
            height: layout.height,
            x_padding: layout.x_padding,
            y_padding: layout.y_padding,
            page_size: 50,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DefaultSelection {
    pub sensor_kind: String,
    /// "YYYY-MM"; the current month when absent
    pub time_frame: Option<String>,
    pub multi_series: bool,
}

impl DefaultSelection {
    pub fn time_frame(&self) -> anyhow::Result<TimeFrame> {
        match &self.time_frame {
            Some(s) => s
                .parse()
                .with_context(|| format!("invalid defaults.time_frame {:?}", s)),
            None => Ok(TimeFrame::current()),
        }
    }
}

const ENV_PREFIX: &str = "SENSOR_DASHBOARD";

fn builder() -> anyhow::Result<config::ConfigBuilder<config::builder::DefaultState>> {
    Ok(config::Config::builder()
        .set_default("api.timeout_secs", 30)?
        .set_default("chart.width", 800.0)?
        .set_default("chart.height", 400.0)?
        .set_default("chart.x_padding", 50.0)?
        .set_default("chart.y_padding", 50.0)?
        .set_default("chart.page_size", 50)?
        .set_default("defaults.sensor_kind", "dht21")?
        .set_default("defaults.multi_series", false)?)
}

/// Load `config/dashboard.*` with `SENSOR_DASHBOARD__SECTION__KEY` overrides
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = builder()?
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__"),
        )
        .build()
        .context("failed to read dashboard configuration")?;

    parse(settings)
}

/// Parse configuration from an in-memory TOML document, defaults applied
pub fn dashboard_config_from_toml(toml: &str) -> anyhow::Result<DashboardConfig> {
    let settings = builder()?
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()
        .context("failed to parse dashboard configuration")?;

    parse(settings)
}

fn parse(settings: config::Config) -> anyhow::Result<DashboardConfig> {
    let config: DashboardConfig = settings
        .try_deserialize()
        .context("invalid dashboard configuration")?;
    config.validate()?;
    Ok(config)
}

impl DashboardConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.api.base_url.trim().is_empty(), "api.base_url must not be empty");
        ensure!(!self.api.api_key.trim().is_empty(), "api.api_key must not be empty");
        ensure!(self.api.timeout_secs > 0, "api.timeout_secs must be positive");

        let chart = &self.chart;
        ensure!(chart.page_size > 0, "chart.page_size must be positive");
        ensure!(
            chart.x_padding >= 0.0 && chart.x_padding * 2.0 < chart.width,
            "chart.x_padding must leave room inside chart.width"
        );
        ensure!(
            chart.y_padding >= 0.0 && chart.y_padding * 2.0 < chart.height,
            "chart.y_padding must leave room inside chart.height"
        );

        schema_for(&self.defaults.sensor_kind).context("invalid defaults.sensor_kind")?;
        self.defaults.time_frame()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = dashboard_config_from_toml(
            r#"
            [api]
            base_url = "https://sensors.example/api/"
            api_key = "abc"
            "#,
        )
        .unwrap();

        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.chart, ChartSettings::default());
        assert_eq!(config.defaults.sensor_kind, "dht21");
        assert!(!config.defaults.multi_series);
        assert!(config.defaults.time_frame.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = dashboard_config_from_toml(
            r#"
            [api]
            base_url = "https://sensors.example/api/"
            api_key = "abc"
            timeout_secs = 5

            [chart]
            width = 1024.0
            page_size = 120

            [defaults]
            sensor_kind = "pzem017"
            time_frame = "2024-10"
            multi_series = true
            "#,
        )
        .unwrap();

        assert_eq!(config.chart.width, 1024.0);
        assert_eq!(config.chart.layout().height, 400.0);
        assert_eq!(config.chart.page_size, 120);
        assert_eq!(config.defaults.time_frame().unwrap(), TimeFrame::new(2024, 10).unwrap());
        assert!(config.defaults.multi_series);
    }

    #[test]
    fn test_validation_failures() {
        let base = r#"
            [api]
            base_url = "https://sensors.example/api/"
            api_key = "abc"
        "#;

        assert!(dashboard_config_from_toml("[chart]\npage_size = 10").is_err());
        assert!(dashboard_config_from_toml(&format!("{base}\n[chart]\npage_size = 0")).is_err());
        assert!(dashboard_config_from_toml(&format!("{base}\n[chart]\nx_padding = 400.0")).is_err());
        assert!(dashboard_config_from_toml(&format!("{base}\n[defaults]\nsensor_kind = \"bme280\"")).is_err());
        assert!(dashboard_config_from_toml(&format!("{base}\n[defaults]\ntime_frame = \"2024-13\"")).is_err());
    }
}
