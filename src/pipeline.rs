//! Render pipeline
//!
//! Drives one character through the whole chain: decode → build record →
//! derive values → place fields → SVG overlay → page merge. The input is read
//! completely before derivation starts, and the output file is written only
//! after a finished pass, so a failed render leaves no partial file behind.

use crate::config::RenderConfig;
use crate::errors::{SheetError, SheetResult};
use crate::record::{decode_input, GenericRecord, OptionalField, TreeRecordBuilder};
use crate::renderers::{DisplayList, FieldTable, LayoutEngine, SvgOverlay};
use crate::stats::collect_requests;
use std::fs;
use std::path::{Path, PathBuf};

/// External page-merge capability: combines the overlay with the template
pub trait PageMerge {
    fn merge(&self, overlay: &[u8]) -> SheetResult<Vec<u8>>;

    /// File extension of the merged result
    fn output_extension(&self) -> &'static str {
        "pdf"
    }
}

/// Passes the overlay through unchanged; used when no template merger is set
#[derive(Debug, Clone, Copy, Default)]
pub struct OverlayOnly;

impl PageMerge for OverlayOnly {
    fn merge(&self, overlay: &[u8]) -> SheetResult<Vec<u8>> {
        Ok(overlay.to_vec())
    }

    fn output_extension(&self) -> &'static str {
        "svg"
    }
}

/// The record inside an export's root element.
///
/// A `character` field wins; otherwise a root with a single structured child
/// is unwrapped, and any other struct is taken as the record itself.
pub fn character_record(root: &GenericRecord) -> SheetResult<&GenericRecord> {
    if root.is_leaf() {
        return Err(SheetError::MalformedInput(
            "document root has no fields".to_string(),
        ));
    }
    if let Some(character) = root.get("character").optional()? {
        return Ok(character);
    }
    match root.members().as_slice() {
        [only] if !only.is_leaf() => Ok(*only),
        _ => Ok(root),
    }
}

/// Renders character exports onto the sheet layout
pub struct SheetRenderer<'t> {
    config: RenderConfig,
    table: &'t FieldTable,
    merger: Box<dyn PageMerge>,
}

impl SheetRenderer<'static> {
    /// Bundled sheet layout, overlay-only output
    pub fn new(config: RenderConfig) -> Self {
        Self::with_table(config, FieldTable::character_sheet())
    }
}

impl<'t> SheetRenderer<'t> {
    pub fn with_table(config: RenderConfig, table: &'t FieldTable) -> Self {
        Self {
            config,
            table,
            merger: Box::new(OverlayOnly),
        }
    }

    pub fn with_merger(mut self, merger: Box<dyn PageMerge>) -> Self {
        self.merger = merger;
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Derive and place every field of an already-built character record.
    ///
    /// # Panics
    /// When the field table lacks a field the resolver produces.
    pub fn render_record(&self, character: &GenericRecord) -> SheetResult<DisplayList> {
        let requests = collect_requests(character, &self.config)?;

        let engine = LayoutEngine::new(self.table).with_min_font_size(self.config.min_font_size);
        let mut list = DisplayList::new(
            self.config.page_width,
            self.config.page_height,
            self.config.font_family.as_str(),
        );
        engine.place_all(&mut list, &requests);

        log::info!("Placed {} fields", list.len());
        Ok(list)
    }

    pub fn render_str(&self, xml: &str) -> SheetResult<DisplayList> {
        let builder = TreeRecordBuilder::with_options(self.config.builder_options());
        let root = builder.build_from_str(xml)?;
        self.render_record(character_record(&root)?)
    }

    pub fn render_bytes(&self, bytes: &[u8]) -> SheetResult<DisplayList> {
        self.render_str(&decode_input(bytes))
    }

    /// Render and merge into the final document bytes
    pub fn render_document(&self, bytes: &[u8]) -> SheetResult<Vec<u8>> {
        let list = self.render_bytes(bytes)?;
        let overlay = SvgOverlay::from_display_list(&list);
        self.merger.merge(overlay.as_bytes())
    }

    pub fn render_file(&self, input: &Path, output: &Path) -> SheetResult<()> {
        log::info!("Rendering {} -> {}", input.display(), output.display());

        let bytes = fs::read(input).map_err(|source| SheetError::Io {
            path: input.to_path_buf(),
            source,
        })?;
        let document = self.render_document(&bytes)?;

        fs::write(output, document).map_err(|source| SheetError::Io {
            path: output.to_path_buf(),
            source,
        })
    }

    /// Render `<input_dir>/<id>.xml` into `<output_dir>/<id>.<ext>`
    pub fn render_by_id(&self, id: &str, input_dir: &Path, output_dir: &Path) -> SheetResult<PathBuf> {
        let valid = !id.is_empty() && !id.contains(['/', '\\']) && id != "." && id != "..";
        if !valid {
            return Err(SheetError::MalformedInput(format!("invalid record id '{}'", id)));
        }

        let input = input_dir.join(format!("{}.xml", id));
        let output = output_dir.join(format!("{}.{}", id, self.merger.output_extension()));
        self.render_file(&input, &output)?;
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_character_record_selection() {
        let builder = TreeRecordBuilder::new();

        let root = builder
            .build_from_str("<root><character><name>A</name></character><extra>1</extra></root>")
            .unwrap();
        assert_eq!(character_record(&root).unwrap().text_at("name"), Ok("A"));

        let root = builder
            .build_from_str("<root><hero><name>B</name></hero></root>")
            .unwrap();
        assert_eq!(character_record(&root).unwrap().text_at("name"), Ok("B"));

        let root = builder.build_from_str("<hero><name>C</name><race>Elf</race></hero>").unwrap();
        assert_eq!(character_record(&root).unwrap().text_at("name"), Ok("C"));

        let root = builder.build_from_str("<root>text</root>").unwrap();
        assert!(matches!(character_record(&root), Err(SheetError::MalformedInput(_))));
    }

    #[test]
    fn test_malformed_input_is_reported_before_derivation() {
        let renderer = SheetRenderer::new(RenderConfig::default());
        assert!(matches!(renderer.render_str(""), Err(SheetError::MalformedInput(_))));
        assert!(matches!(renderer.render_str("<root>"), Err(SheetError::MalformedInput(_))));
    }

    #[test]
    fn test_invalid_record_ids() {
        let renderer = SheetRenderer::new(RenderConfig::default());
        let dir = Path::new(".");
        for id in ["", "..", "a/b", "a\\b"] {
            assert!(matches!(
                renderer.render_by_id(id, dir, dir),
                Err(SheetError::MalformedInput(_))
            ));
        }
    }
}
