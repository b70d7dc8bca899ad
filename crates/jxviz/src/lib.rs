#![forbid(unsafe_code)]

//! `jxviz` turns JSON and XML documents into node-link diagrams, headlessly.
//!
//! The document model, loading and JSON/XML conversion are always available; the presentation
//! engine (node sizing, annotation placement, search, collapse, themes) sits behind a feature.
//!
//! # Features
//!
//! - `render`: enable the presentation engine (`jxviz::render`)

pub use jxviz_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use jxviz_render::*;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Load(#[from] jxviz_core::Error),
        #[error(transparent)]
        Render(#[from] jxviz_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Loads editor text and styles the whole diagram in one go.
    pub fn style_document(
        text: &str,
        mode: jxviz_core::DocumentMode,
        context: &SessionContext,
        measurer: &dyn TextMeasurer,
    ) -> Result<StyledDiagram> {
        let graph = jxviz_core::load_document(text, mode)?;
        Ok(style_diagram(&graph, context, measurer))
    }

    /// Same as [`style_document`], with the session derived from a viewer config.
    pub fn style_document_with_config(
        text: &str,
        config: &jxviz_core::ViewerConfig,
    ) -> Result<StyledDiagram> {
        let context = SessionContext::from_config(config)?;
        style_document(
            text,
            context.mode(),
            &context,
            &DeterministicTextMeasurer::default(),
        )
    }

}
