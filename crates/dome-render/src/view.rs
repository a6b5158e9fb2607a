//! The dome currently on screen.
//!
//! Every parameter change is stamped with a new generation. A build result
//! is installed only if it answers the most recent request; anything older
//! is dropped, so a slow build can never overwrite a newer one.

use dome_kernel::{build_dome, DomeConfig, DomeError, DomeModel};
use tracing::debug;

/// A pending build: the configuration to build and its generation.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    config: DomeConfig,
}

impl Ticket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn config(&self) -> &DomeConfig {
        &self.config
    }
}

/// What happened to a finished build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Installed,
    /// A newer request was made; the result was dropped.
    Stale { generation: u64, latest: u64 },
}

#[derive(Debug, Default)]
pub struct DomeView {
    latest: u64,
    current: Option<DomeModel>,
}

impl DomeView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a parameter change. Any ticket issued before this one is now
    /// stale.
    pub fn request(&mut self, config: DomeConfig) -> Ticket {
        self.latest += 1;
        Ticket {
            generation: self.latest,
            config,
        }
    }

    /// Hand back the result for `ticket`. A stale result is dropped whether
    /// it succeeded or not. A failed current build leaves the previous model
    /// in place and returns the error.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<DomeModel, DomeError>,
    ) -> Result<Completion, DomeError> {
        if ticket.generation != self.latest {
            debug!(generation = ticket.generation, latest = self.latest, "dropping stale dome");
            return Ok(Completion::Stale {
                generation: ticket.generation,
                latest: self.latest,
            });
        }
        self.current = Some(result?);
        Ok(Completion::Installed)
    }

    /// Request, build and install in one step. The new ticket is the latest
    /// one, so a successful build is always installed.
    pub fn update(&mut self, config: DomeConfig) -> Result<&DomeModel, DomeError> {
        let ticket = self.request(config);
        let model = build_dome(ticket.config())?;
        Ok(self.current.insert(model))
    }

    pub fn current(&self) -> Option<&DomeModel> {
        self.current.as_ref()
    }

    pub fn latest_generation(&self) -> u64 {
        self.latest
    }
}
