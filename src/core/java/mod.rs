pub mod runtime;

pub use runtime::required_java_for_minecraft_version;
pub use runtime::resolve_runtime_path;
