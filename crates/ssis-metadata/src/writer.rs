//! Drives entities through an emitter

use crate::config::{EmitterConfig, SinkConfig};
use crate::emitter::{ConsoleEmitter, Emitter, FileEmitter, NullEmitter};
use crate::entity::SsisEntity;
use crate::error::Result;

/// Writes the proposals of whole entities to one emitter
pub struct CatalogWriter {
    emitter: Box<dyn Emitter>,
    materialize_iolets: bool,
}

impl CatalogWriter {
    pub fn new(emitter: Box<dyn Emitter>, materialize_iolets: bool) -> Self {
        Self {
            emitter,
            materialize_iolets,
        }
    }

    /// Open the sink named in the config
    pub fn from_config(config: &EmitterConfig) -> Result<Self> {
        let emitter: Box<dyn Emitter> = match &config.sink {
            SinkConfig::Null => Box::new(NullEmitter),
            SinkConfig::Console => Box::new(ConsoleEmitter::stdout()),
            SinkConfig::File { path } => Box::new(FileEmitter::create(path)?),
        };
        Ok(Self::new(emitter, config.materialize_iolets))
    }

    pub fn materialize_iolets(&self) -> bool {
        self.materialize_iolets
    }

    /// Emit every proposal of `entity` and return how many were delivered
    ///
    /// Stops at the first emitter failure. Proposals already delivered are
    /// not rolled back.
    pub fn write(&self, entity: &dyn SsisEntity) -> Result<usize> {
        let mut delivered = 0;
        for proposal in entity.generate_mcp(self.materialize_iolets) {
            let aspect = proposal.aspect_name();
            if let Err(e) = self.emitter.emit(proposal, None) {
                log::warn!(
                    "Emission of {} stopped at '{}' after {} proposals: {}",
                    entity.urn(),
                    aspect,
                    delivered,
                    e
                );
                return Err(e.into());
            }
            delivered += 1;
        }

        log::debug!("Wrote {} proposals for {}", delivered, entity.urn());
        Ok(delivered)
    }

    /// Write a batch of entities in order, returning the total delivered
    pub fn write_all<'a, I>(&self, entities: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a dyn SsisEntity>,
    {
        let mut total = 0;
        for entity in entities {
            total += self.write(entity)?;
        }
        Ok(total)
    }

    pub fn flush(&self) -> Result<()> {
        self.emitter.flush()?;
        Ok(())
    }
}
