//! SVG overlay output
//!
//! Writes the placed text of one render pass as a single-page SVG, the flat
//! overlay handed to the page-merge step. Layout coordinates have their origin
//! at the bottom-left corner; SVG's is top-left, so Y is flipped here.

use super::display_list::{DisplayList, DrawSurface, DrawText};
use quick_xml::escape::escape;

/// Single-page SVG built from text draws
pub struct SvgOverlay {
    width: f32,
    height: f32,
    font_family: String,
    body: String,
}

impl SvgOverlay {
    pub fn new(width: f32, height: f32, font_family: impl Into<String>) -> Self {
        Self {
            width,
            height,
            font_family: font_family.into(),
            body: String::new(),
        }
    }

    /// Replay a recorded display list into a finished SVG document
    pub fn from_display_list(list: &DisplayList) -> String {
        let mut overlay = SvgOverlay::new(list.page_width, list.page_height, list.font_family.as_str());
        list.replay(&mut overlay);
        overlay.finish()
    }

    /// Close the document and return its text
    pub fn finish(self) -> String {
        let mut svg = String::with_capacity(self.body.len() + 256);
        svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" font-family=\"{font}\">\n",
            w = self.width,
            h = self.height,
            font = escape(self.font_family.as_str()),
        ));
        svg.push_str(&self.body);
        svg.push_str("</svg>\n");
        svg
    }
}

impl DrawSurface for SvgOverlay {
    fn draw_text(&mut self, op: &DrawText) {
        self.body.push_str(&format!(
            "  <text data-field=\"{}\" x=\"{:.2}\" y=\"{:.2}\" font-size=\"{:.2}\">{}</text>\n",
            escape(op.field.as_str()),
            op.x,
            self.height - op.y,
            op.font_size,
            escape(op.text.as_str()),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flips_y_and_escapes_text() {
        let mut overlay = SvgOverlay::new(612.0, 792.0, "FreeSans");
        overlay.draw_text(&DrawText {
            field: "character_name".into(),
            text: "Ada & <Bob>".into(),
            x: 100.0,
            y: 700.0,
            font_size: 12.0,
        });
        let svg = overlay.finish();

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains("viewBox=\"0 0 612 792\""));
        assert!(svg.contains(
            "<text data-field=\"character_name\" x=\"100.00\" y=\"92.00\" font-size=\"12.00\">Ada &amp; &lt;Bob&gt;</text>"
        ));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_from_display_list_is_parseable() {
        let mut list = DisplayList::new(612.0, 792.0, "FreeSans");
        list.draw_text(&DrawText {
            field: "race".into(),
            text: "Эльф".into(),
            x: 10.0,
            y: 20.0,
            font_size: 9.0,
        });
        let svg = SvgOverlay::from_display_list(&list);
        let doc = roxmltree::Document::parse(&svg).unwrap();
        let texts: Vec<&str> = doc
            .descendants()
            .filter(|n| n.is_element() && n.tag_name().name() == "text")
            .filter_map(|n| n.text())
            .collect();
        assert_eq!(texts, vec!["Эльф"]);
    }
}
