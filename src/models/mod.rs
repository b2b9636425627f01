pub mod identifier;
pub mod loaders;
pub mod manifest;
pub mod path_set;

pub use identifier::{validate_identifiers, Identifier, DEFAULT_IDENTIFIERS};
pub use loaders::load_manifest;
pub use manifest::BatchManifest;
pub use path_set::PathSet;
