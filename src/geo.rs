use crate::types::Coordinates;
use anyhow::{Result, anyhow};

/// Source of the user's current position.
pub trait Geolocation {
    fn locate(&self) -> Result<Coordinates>;
}

/// A position known up front, e.g. passed on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPosition(pub Option<Coordinates>);

impl Geolocation for FixedPosition {
    fn locate(&self) -> Result<Coordinates> {
        self.0.ok_or_else(|| anyhow!("no position configured"))
    }
}
