//! Configuration management for frump.
//!
//! Parser quirks, serializer layout and validation limits are all tunable
//! from a YAML file; the defaults give lossless round-trips.

mod settings;

pub use settings::{
    BodySeparator, Config, HeadingPolicy, LineEnding, ParserConfig, TitleMarkers,
    ValidationConfig, WriterConfig,
};
