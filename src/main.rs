use dioxus::logger::tracing::{error, info, warn, Level};
use hedsheet::state::config::AppConfig;
use hedsheet::ui::actions::Services;
use hedsheet::ui::app::App;

fn main() {
    let (config, config_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    let level = config.log_level.parse::<Level>().unwrap_or(Level::INFO);
    if let Err(err) = dioxus::logger::init(level) {
        eprintln!("failed to initialize logging: {err}");
    }
    if let Some(err) = config_error {
        warn!(%err, "using default configuration");
    }

    let services = match Services::from_config(&config) {
        Ok(services) => services,
        Err(err) => {
            error!(%err, "could not create validation service client");
            std::process::exit(1);
        }
    };
    info!(service_url = %config.service_url, "starting hedsheet");

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new().with_window(
                dioxus::desktop::WindowBuilder::new()
                    .with_title("HED Spreadsheet Validation")
                    .with_inner_size(dioxus::desktop::LogicalSize::new(820.0, 760.0)),
            ),
        )
        .with_context(services)
        .launch(App);
}
