//! Startup gate
//!
//! The application does not begin normal operation until [`bootstrap`]
//! returns: configuration is loaded first, then every registered
//! [`InitializerRegistry`] callback runs with the loaded configuration.

pub mod error;
pub mod gate;
pub mod registry;

pub use error::{StartupError, StartupResult};
pub use gate::bootstrap;
pub use registry::{InitializerKind, InitializerRegistry, StartupInitializer};
