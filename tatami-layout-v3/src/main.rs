mod protocol;
mod wayland;

use anyhow::{bail, Context, Result};
use argh::FromArgs;
use tatami::{Config, Session, DEFAULT_NAMESPACE};
use tracing_subscriber::EnvFilter;
use wayland_client::backend::WaylandError;
use wayland_client::{Connection, DispatchError};

use crate::wayland::{App, RiverBackend};

#[derive(FromArgs)]
/// Master-stack layout generator for river (river-layout-v3).
struct Args {
    /// layout namespace to register with the compositor
    #[argh(option, short = 'n', default = "DEFAULT_NAMESPACE.to_string()")]
    namespace: String,
}

fn main() -> Result<()> {
    let args: Args = argh::from_env();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("tatami-layout-v3 starting");

    run(args)
}

fn run(args: Args) -> Result<()> {
    // libwayland falls back to "wayland-0" without it, which is never what we want.
    if std::env::var_os("WAYLAND_DISPLAY").is_none() {
        bail!("WAYLAND_DISPLAY is not set");
    }
    let conn = Connection::connect_to_env().context("Failed to connect to Wayland server")?;

    let mut event_queue = conn.new_event_queue();
    let qh = event_queue.handle();
    let display = conn.display();
    let registry = display.get_registry(&qh, ());
    display.sync(&qh, ());

    let config = Config {
        namespace: args.namespace,
    };
    let mut app = App {
        session: Session::new(RiverBackend::new(qh, registry), config),
    };

    while app.session.is_running() {
        match event_queue.blocking_dispatch(&mut app) {
            Ok(_) => {}
            Err(DispatchError::Backend(WaylandError::Io(err))) => {
                tracing::debug!("Wayland connection closed: {}", err);
                app.session.disconnected();
            }
            Err(err) => app.session.protocol_error(err.to_string()),
        }
    }

    let result = app.session.finish();
    if let Err(err) = conn.flush() {
        tracing::debug!("Failed to flush teardown requests: {}", err);
    }
    result?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_namespace() {
        let args = Args::from_args(&["tatami-layout-v3"], &[]).unwrap();
        assert_eq!(args.namespace, "tile");
    }

    #[test]
    fn test_namespace_option() {
        let args = Args::from_args(&["tatami-layout-v3"], &["--namespace", "tatami"]).unwrap();
        assert_eq!(args.namespace, "tatami");
    }

    #[test]
    fn test_short_namespace_option() {
        let args = Args::from_args(&["tatami-layout-v3"], &["-n", "rivertile"]).unwrap();
        assert_eq!(args.namespace, "rivertile");
    }

    #[test]
    fn test_unknown_option() {
        assert!(Args::from_args(&["tatami-layout-v3"], &["--main-count", "2"]).is_err());
    }
}
