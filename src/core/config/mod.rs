pub mod defaults;
pub mod model;
pub mod store;

pub use defaults::builtin_configuration;
pub use model::{Configuration, ModPreset, PresetTable};
pub use store::{ConfigSource, ConfigStore};
