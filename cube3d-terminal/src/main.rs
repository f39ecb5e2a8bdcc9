/// Cube3D Terminal Demo - Rotating Cube
///
/// Usage: cube3d-terminal [settings.toml]
///
/// Controls:
///   - M: Toggle filled / wireframe
///   - Space: Pause rotation
///   - Q/ESC: Quit
use anyhow::Context;
use cube3d_terminal::{Settings, TerminalApp};
use std::env;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let settings = match env::args().nth(1) {
        Some(path) => {
            Settings::load(&path).with_context(|| format!("failed to load settings from {}", path))?
        }
        None => Settings::default(),
    };
    log::debug!("settings: {:?}", settings);

    let mut app = TerminalApp::new(settings).context("failed to query terminal size")?;
    app.run().context("terminal renderer failed")?;

    println!("Thank you for using the Cube3D Terminal Renderer!");
    Ok(())
}
