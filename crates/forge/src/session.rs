//! Regeneration session: owns the generator, the random source and the
//! current crystal.

use anyhow::Result;
use crystal::{CrystalGenerator, CrystalMesh, DerivedState, RngSource, Winding};

use crate::config::ForgeConfig;

/// One line of input from the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Regenerate,
    Save,
    Info,
    Quit,
    Help,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "r" | "regen" | "regenerate" => Some(Self::Regenerate),
            "s" | "save" => Some(Self::Save),
            "i" | "info" => Some(Self::Info),
            "q" | "quit" | "exit" => Some(Self::Quit),
            "h" | "help" | "?" => Some(Self::Help),
            _ => None,
        }
    }
}

/// Holds the one live crystal. Regeneration drops the previous mesh before the
/// replacement is stored.
pub struct Session {
    generator: CrystalGenerator,
    rng: RngSource,
    winding: Winding,
    current: Option<(DerivedState, CrystalMesh)>,
    generation: u64,
}

impl Session {
    pub fn new(config: &ForgeConfig) -> Result<Self> {
        let generator = CrystalGenerator::new(config.crystal_params())?;
        let rng = match config.seed {
            Some(seed) => {
                log::info!("Seeding crystal forge with {}", seed);
                RngSource::seeded(seed)
            }
            None => RngSource::from_entropy(),
        };
        Ok(Self {
            generator,
            rng,
            winding: config.winding,
            current: None,
            generation: 0,
        })
    }

    /// Discard the current crystal and build a new one.
    pub fn regenerate(&mut self) -> Result<&CrystalMesh> {
        self.current = None;
        let (state, mesh) = self.generator.generate_with_state(&mut self.rng)?;
        let mesh = mesh.with_winding(self.winding);
        self.generation += 1;
        log_summary(self.generation, &state, &mesh);
        Ok(&self.current.insert((state, mesh)).1)
    }

    pub fn current(&self) -> Option<&CrystalMesh> {
        self.current.as_ref().map(|(_, mesh)| mesh)
    }

    pub fn current_state(&self) -> Option<&DerivedState> {
        self.current.as_ref().map(|(state, _)| state)
    }

    /// Number of crystals generated so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

fn log_summary(generation: u64, state: &DerivedState, mesh: &CrystalMesh) {
    let size = mesh.bounds.size();
    log::info!(
        "Crystal #{}: {} points, {} vertices, {} triangles, height {:.2}, volume {:.3}",
        generation,
        state.point_count,
        mesh.vertex_count(),
        mesh.triangle_count(),
        state.height,
        mesh.signed_volume()
    );
    log::info!(
        "  bounds {:?} .. {:?} (size {:.2} x {:.2} x {:.2})",
        mesh.bounds.min.to_array(),
        mesh.bounds.max.to_array(),
        size.x,
        size.y,
        size.z
    );
}
