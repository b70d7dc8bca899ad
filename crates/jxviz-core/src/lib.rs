#![forbid(unsafe_code)]

//! JSON/XML diagram model (headless).
//!
//! This crate owns everything that does not depend on measured text or palettes:
//! - the node/connector graph and its orientation,
//! - loading a JSON/XML document into that graph,
//! - the JSON ↔ XML conversion service,
//! - import/export naming rules and the viewer configuration.

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
pub mod files;
pub mod model;

pub use config::ViewerConfig;
pub use convert::{ConversionDirection, ConversionResult, ConversionService, DefaultConverter};
pub use document::{build_graph, load_document};
pub use error::{Error, Result};
pub use files::{DocumentMode, ExportRegion, ImageExportRequest, ImageFormat, ImportError};
pub use model::{
    Annotation, AnnotationRole, Connector, DiagramGraph, MAIN_ROOT_ID, Node, NodeId, NodeKind,
    Orientation,
};

#[cfg(test)]
mod tests;
