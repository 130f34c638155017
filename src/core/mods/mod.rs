pub mod resolver;

pub use resolver::{ModResolver, ModStatus, ResolvedMod, Resolution};
