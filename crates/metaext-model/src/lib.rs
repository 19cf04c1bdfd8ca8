pub mod columns;
pub mod error;
pub mod field;
pub mod host;
pub mod literal;
pub mod sample_type;
pub mod settings;
pub mod table;
pub mod transformers;
pub mod violation;

pub use error::SampleTypeError;
pub use field::{ANNOTATION_KEYS, FieldMap, FieldRule, PrimitiveType};
pub use host::{HostMap, HostTypeNode};
pub use literal::{Literal, format_numeric};
pub use sample_type::{DefinitionKind, SampleTypeDef, SampleTypeMap};
pub use settings::Settings;
pub use table::{CellValue, Row, Table};
pub use transformers::{MetadataTransformers, TransformerSpec};
pub use violation::{ErrorItem, FailureRecord, ValidationRecord, Violation};
