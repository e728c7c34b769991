mod app;
mod config;

use app::App;
use backend::system::{AppStatus, System};
use config::AppConfig;
use std::process::ExitCode;

fn start() -> anyhow::Result<App> {
    let base = System::base_path()?;
    let config = AppConfig::load(&base)?;
    App::new(&base, &config)
}

/// 0 once the window was closed after a clean start, 1 if startup failed.
fn exit_status(outcome: &anyhow::Result<AppStatus>) -> u8 {
    match outcome {
        Ok(_) => 0,
        Err(_) => 1,
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let outcome = start().map(|mut app| {
        let status = app.run();
        drop(app);
        status
    });
    if let Err(e) = &outcome {
        log::error!("Error {e:#}");
    }

    log::info!("Application quit successfully!");
    ExitCode::from(exit_status(&outcome))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_window_exits_cleanly() {
        assert_eq!(exit_status(&Ok(AppStatus::Success)), 0);
    }

    #[test]
    fn failed_startup_exits_with_failure() {
        let outcome: anyhow::Result<AppStatus> = Err(anyhow::anyhow!("no video device"));
        assert_eq!(exit_status(&outcome), 1);
    }
}
