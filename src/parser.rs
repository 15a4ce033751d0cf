pub mod builder;
pub mod config;
pub mod reader;
pub mod scope;

pub use builder::TreeBuilder;
pub use config::ParserConfig;
pub use reader::{tokenize, SaxReader};
pub use scope::NamespaceScope;
