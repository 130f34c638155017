// ─── Launch artifacts ───
// server.properties, the start script and the EULA marker.

pub mod properties;
pub mod script;
pub mod writer;

pub use properties::{render_properties, ServerOption, DEFAULT_PORT};
pub use script::ScriptPlatform;
pub use writer::{LaunchFiles, WrittenFiles};
