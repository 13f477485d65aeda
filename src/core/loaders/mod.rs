pub mod fabric;
pub mod source;

pub use fabric::{FabricMeta, FABRIC_META_BASE};
pub use source::{LoaderEntry, LoaderInfo, MappingsInfo, MetadataSource};
