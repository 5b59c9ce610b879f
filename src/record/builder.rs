//! Labeled tree → GenericRecord conversion
//!
//! Converts a parsed XML export into a [`GenericRecord`] using roxmltree.
//! Only tag names, text and children are consulted; attributes are ignored.
//!
//! Per node:
//! 1. The field key is the tag, except `id-*` tags that carry a nested `name`
//!    leaf, which are keyed by a slug of that name (`Sleight of Hand` →
//!    `sleight_of_hand`).
//! 2. Hyphens become underscores and reserved words get a `_` suffix.
//! 3. A node without element children is a repaired text leaf.
//! 4. An aggregate-text node (`<text>` by default) is joined into one leaf.
//! 5. Otherwise children are grouped by key in first-appearance order. If
//!    every child shares one key and there is more than one, the node is a
//!    sequence. Otherwise it is a struct, and keys that repeat become
//!    sequence-valued fields. The struct remembers which field each source
//!    child went to, so iteration still follows export order.

use super::generic::GenericRecord;
use crate::errors::{SheetError, SheetResult};
use crate::text::repair;
use roxmltree::{Document as XmlDocument, Node};

/// Tag prefix of list members named by an opaque identifier
const SYNTHETIC_ID_PREFIX: &str = "id-";

/// Tag of the nested leaf holding a synthetic member's human name
const NAME_TAG: &str = "name";

/// Keys that would collide with identifiers reserved in accessor code
const RESERVED_KEYS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "class", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Builder settings
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Tags whose children are runs of formatted text, joined into one leaf
    pub aggregate_text_tags: Vec<String>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            aggregate_text_tags: vec!["text".to_string()],
        }
    }
}

/// Lower-case slug of a human-readable name.
///
/// Whitespace and separators become single underscores, other punctuation is
/// dropped, letters of any alphabet are kept.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('_');
            }
            pending_separator = false;
            slug.extend(ch.to_lowercase());
        } else if ch.is_whitespace() || matches!(ch, '-' | '_' | '/' | '.') {
            pending_separator = true;
        }
    }

    slug
}

/// Normalize a raw key: hyphens to underscores, reserved words suffixed
fn normalize_key(raw: &str) -> String {
    let key = raw.replace('-', "_");
    if RESERVED_KEYS.contains(&key.as_str()) {
        format!("{}_", key)
    } else {
        key
    }
}

/// Concatenated text of a node's direct text children
fn own_text(node: Node) -> String {
    node.children()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}

/// Concatenated text of every text node below `node`
fn descendant_text(node: Node) -> String {
    node.descendants()
        .filter(|child| child.is_text())
        .filter_map(|child| child.text())
        .collect()
}

fn element_children<'a, 'input>(node: Node<'a, 'input>) -> Vec<Node<'a, 'input>> {
    node.children().filter(|child| child.is_element()).collect()
}

/// Decode export bytes.
///
/// UTF-8 is used when valid; anything else is treated as Latin-1, which keeps
/// legacy single-byte glyphs intact for [`repair`].
pub fn decode_input(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            log::info!("Input is not UTF-8, decoding as Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

/// Converts labeled trees into generic records
#[derive(Debug, Clone, Default)]
pub struct TreeRecordBuilder {
    options: BuilderOptions,
}

impl TreeRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: BuilderOptions) -> Self {
        Self { options }
    }

    /// Parse an XML document and build the record for its root element
    pub fn build_from_str(&self, xml: &str) -> SheetResult<GenericRecord> {
        if xml.trim().is_empty() {
            return Err(SheetError::MalformedInput("empty document".to_string()));
        }

        let doc = XmlDocument::parse(xml)
            .map_err(|e| SheetError::MalformedInput(e.to_string()))?;

        let root = doc.root_element();
        log::debug!("Building record from <{}>", root.tag_name().name());
        Ok(self.build(root))
    }

    /// Build the record for one node and everything below it
    pub fn build(&self, node: Node) -> GenericRecord {
        let children = element_children(node);
        if children.is_empty() {
            return GenericRecord::Leaf(repair(own_text(node).trim()));
        }

        if self.is_aggregate(node.tag_name().name()) {
            return self.aggregate_text(&children);
        }

        let mut groups: Vec<(String, Vec<Node>)> = Vec::new();
        let mut order = Vec::with_capacity(children.len());
        for child in children {
            let key = self.field_key(child);
            match groups.iter().position(|(existing, _)| *existing == key) {
                Some(index) => {
                    groups[index].1.push(child);
                    order.push(index);
                }
                None => {
                    order.push(groups.len());
                    groups.push((key, vec![child]));
                }
            }
        }

        if groups.len() == 1 && groups[0].1.len() > 1 {
            let (_, nodes) = groups.remove(0);
            return GenericRecord::Sequence(nodes.into_iter().map(|n| self.build(n)).collect());
        }

        let fields = groups
            .into_iter()
            .map(|(key, nodes)| {
                let value = if nodes.len() == 1 {
                    self.build(nodes[0])
                } else {
                    GenericRecord::Sequence(nodes.into_iter().map(|n| self.build(n)).collect())
                };
                (key, value)
            })
            .collect();

        GenericRecord::Struct { fields, order }
    }

    fn is_aggregate(&self, tag: &str) -> bool {
        self.options.aggregate_text_tags.iter().any(|t| t == tag)
    }

    fn aggregate_text(&self, children: &[Node]) -> GenericRecord {
        let runs: Vec<String> = children
            .iter()
            .map(|child| repair(descendant_text(*child).trim()))
            .filter(|run| !run.is_empty())
            .collect();
        GenericRecord::Leaf(runs.join(" "))
    }

    /// Field key for a child node
    fn field_key(&self, node: Node) -> String {
        let tag = node.tag_name().name();

        if tag.starts_with(SYNTHETIC_ID_PREFIX) {
            if let Some(name) = self.synthetic_name(node) {
                let slug = slugify(&repair(&name));
                if !slug.is_empty() {
                    return normalize_key(&slug);
                }
            }
            log::debug!("<{}> has no usable name, keeping tag as key", tag);
        }

        normalize_key(tag)
    }

    /// Text of the nested `name` leaf of a synthetic-id node
    fn synthetic_name(&self, node: Node) -> Option<String> {
        node.children()
            .find(|child| child.is_element() && child.tag_name().name() == NAME_TAG)
            .filter(|name| element_children(*name).is_empty())
            .map(own_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RecordError;

    fn build(xml: &str) -> GenericRecord {
        TreeRecordBuilder::new().build_from_str(xml).unwrap()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Sleight of Hand"), "sleight_of_hand");
        assert_eq!(slugify("  Thieves' Tools "), "thieves_tools");
        assert_eq!(slugify("Longsword (+1)"), "longsword_1");
        assert_eq!(slugify("Ловкость рук"), "ловкость_рук");
        assert_eq!(slugify("--"), "");
    }

    #[test]
    fn test_leaf_text_is_trimmed_and_repaired() {
        let record = build("<root><name> &#207;&#229;&#242;&#255; </name></root>");
        assert_eq!(record.text_at("name"), Ok("Петя"));
    }

    #[test]
    fn test_hyphens_and_reserved_words() {
        let record = build("<root><save-prof>1</save-prof><class>Wizard</class><type>1</type></root>");
        assert_eq!(record.keys(), vec!["save_prof", "class_", "type_"]);
    }

    #[test]
    fn test_mixed_children_make_struct_with_sequence_field() {
        let record = build("<root><lang>Common</lang><speed>30</speed><lang>Elvish</lang></root>");
        assert_eq!(record.keys(), vec!["lang", "speed"]);
        match record.get("lang").unwrap() {
            GenericRecord::Sequence(items) => {
                assert_eq!(items, &vec![GenericRecord::leaf("Common"), GenericRecord::leaf("Elvish")]);
            }
            other => panic!("Expected sequence, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_names_keep_export_order() {
        let record = build(
            r#"<weaponlist>
                <id-00001><name>Dagger</name></id-00001>
                <id-00002><name>Longbow</name></id-00002>
                <id-00003><name>Mace</name></id-00003>
                <id-00004><name>Dagger</name></id-00004>
            </weaponlist>"#,
        );
        assert_eq!(record.keys(), vec!["dagger", "longbow", "mace"]);
        assert_eq!(record.text_at("dagger.1.name"), Ok("Dagger"));

        let names: Vec<&str> = record
            .members()
            .iter()
            .map(|weapon| weapon.text_at("name").unwrap())
            .collect();
        assert_eq!(names, vec!["Dagger", "Longbow", "Mace", "Dagger"]);
    }

    #[test]
    fn test_single_child_is_struct() {
        let record = build("<root><list><item>a</item></list></root>");
        assert_eq!(record.text_at("list.item"), Ok("a"));
    }

    #[test]
    fn test_synthetic_id_without_name_keeps_tag() {
        let record = build("<root><id-00001><bonus>2</bonus></id-00001><id-00002><name></name></id-00002></root>");
        assert_eq!(record.keys(), vec!["id_00001", "id_00002"]);
    }

    #[test]
    fn test_aggregate_text_joins_runs() {
        let record = build(
            "<root><text><p>Wisdom is your</p><p> spellcasting <b>ability</b>.</p><p/></text></root>",
        );
        assert_eq!(record.text_at("text"), Ok("Wisdom is your spellcasting ability."));
    }

    #[test]
    fn test_attributes_are_ignored() {
        let record = build(r#"<root><score type="number">12</score></root>"#);
        assert_eq!(record.int_at("score"), Ok(12));
        assert!(matches!(record.get("type"), Err(RecordError::FieldNotFound { .. })));
    }

    #[test]
    fn test_malformed_input() {
        let builder = TreeRecordBuilder::new();
        assert!(matches!(builder.build_from_str(""), Err(SheetError::MalformedInput(_))));
        assert!(matches!(builder.build_from_str("   \n"), Err(SheetError::MalformedInput(_))));
        assert!(matches!(builder.build_from_str("<root><a></root>"), Err(SheetError::MalformedInput(_))));
    }

    #[test]
    fn test_decode_input_falls_back_to_latin1() {
        assert_eq!(decode_input("Сила".as_bytes()), "Сила");
        let decoded = decode_input(&[b'<', b'a', b'>', 0xD1, 0xE8, 0xEB, 0xE0, b'<', b'/', b'a', b'>']);
        assert_eq!(repair(&decoded), "<a>Сила</a>");
    }
}
