//! Crystal Forge - regenerates procedural crystals on demand.

mod config;
mod session;

use anyhow::Result;
use std::io::BufRead;

use config::ForgeConfig;
use session::{Command, Session};

fn print_help() {
    println!("  r - Regenerate crystal   i - Crystal info   s - Save config   q - Quit   h - Help");
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    println!("╔══════════════════════════════════════════╗");
    println!("║              Crystal Forge               ║");
    println!("╚══════════════════════════════════════════╝");
    print_help();

    let forge_config = ForgeConfig::load();
    let mut session = Session::new(&forge_config)?;
    session.regenerate()?;

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        match Command::parse(&line) {
            Some(Command::Regenerate) => {
                if let Err(e) = session.regenerate() {
                    log::error!("Crystal generation failed: {}", e);
                }
            }
            Some(Command::Save) => match forge_config.save() {
                Ok(()) => log::info!("Saved config to {:?}", config::config_path()),
                Err(e) => log::warn!("Could not save config: {:#}", e),
            },
            Some(Command::Info) => match (session.current_state(), session.current()) {
                (Some(state), Some(mesh)) => {
                    log::info!("{:#?}", state);
                    log::info!("centroid {:?}, {} indices", mesh.centroid().to_array(), mesh.indices.len());
                }
                _ => log::info!("No crystal generated yet"),
            },
            Some(Command::Quit) => break,
            Some(Command::Help) => print_help(),
            None => {
                if !line.trim().is_empty() {
                    log::warn!("Unknown command {:?}", line.trim());
                    print_help();
                }
            }
        }
    }

    log::info!("Forged {} crystals", session.generation());
    Ok(())
}
