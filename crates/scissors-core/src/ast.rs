//! Document tree types for loaded XML documents.

use smallvec::SmallVec;

/// A complete loaded document.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Document {
    /// Comments and processing instructions that precede the root element
    pub prolog: Vec<Node>,
    /// The document element
    pub root: ElementNode,
}

impl Document {
    pub fn new(root: ElementNode) -> Self {
        Self {
            prolog: Vec::new(),
            root,
        }
    }

    /// Count every node in the tree below and including the root.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }
}

/// A node in the document tree.
///
/// Parents own their children exclusively; there are no back references.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    Element(ElementNode),
    Attribute(Attribute),
    Text(CharacterData),
    CData(CharacterData),
    Comment(CharacterData),
    ProcessingInstruction(ProcessingInstruction),
}

impl Node {
    pub fn element(element: ElementNode) -> Self {
        Node::Element(element)
    }

    pub fn text(data: impl Into<String>) -> Self {
        Node::Text(CharacterData::new(data))
    }

    pub fn cdata(data: impl Into<String>) -> Self {
        Node::CData(CharacterData::new(data))
    }

    pub fn comment(data: impl Into<String>) -> Self {
        Node::Comment(CharacterData::new(data))
    }

    /// Short name of the node kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Element(_) => "element",
            Node::Attribute(_) => "attribute",
            Node::Text(_) => "text",
            Node::CData(_) => "cdata",
            Node::Comment(_) => "comment",
            Node::ProcessingInstruction(_) => "processing-instruction",
        }
    }

    fn node_count(&self) -> usize {
        match self {
            Node::Element(element) => element.node_count(),
            Node::Attribute(_)
            | Node::Text(_)
            | Node::CData(_)
            | Node::Comment(_)
            | Node::ProcessingInstruction(_) => 1,
        }
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Self {
        Node::Element(element)
    }
}

impl From<Attribute> for Node {
    fn from(attribute: Attribute) -> Self {
        Node::Attribute(attribute)
    }
}

/// An element with its attributes and child nodes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ElementNode {
    pub name: String,
    pub attributes: SmallVec<[Attribute; 4]>,
    pub children: Vec<Node>,
}

impl ElementNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: SmallVec::new(),
            children: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute::new(name, value));
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Look up an attribute value by name.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    fn node_count(&self) -> usize {
        1 + self.attributes.len() + self.children.iter().map(Node::node_count).sum::<usize>()
    }
}

/// A `name="value"` pair on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

impl Attribute {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Raw character data of a text, CDATA or comment node.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CharacterData {
    pub data: String,
}

impl CharacterData {
    pub fn new(data: impl Into<String>) -> Self {
        Self { data: data.into() }
    }

    /// True when there is nothing visible to draw.
    pub fn is_blank(&self) -> bool {
        self.data.chars().all(char::is_whitespace)
    }
}

/// A `<?target data?>` processing instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProcessingInstruction {
    pub target: String,
    pub data: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_keeps_document_order() {
        let element = ElementNode::new("a")
            .with_attribute("x", "1")
            .with_attribute("y", "2")
            .with_child(ElementNode::new("b"))
            .with_child(Node::text("hello"));

        assert_eq!(element.attribute("y"), Some("2"));
        assert_eq!(element.attribute("z"), None);
        assert_eq!(element.children.len(), 2);
        assert_eq!(element.children[0].kind(), "element");
        assert_eq!(element.children[1].kind(), "text");
    }

    #[test]
    fn test_node_count() {
        let doc = Document::new(
            ElementNode::new("a")
                .with_attribute("x", "1")
                .with_child(ElementNode::new("b").with_child(Node::comment("c")))
                .with_child(Node::text("hello")),
        );
        // a, x, b, comment, text
        assert_eq!(doc.node_count(), 5);
    }

    #[test]
    fn test_blank_character_data() {
        assert!(CharacterData::new("").is_blank());
        assert!(CharacterData::new(" \n\t ").is_blank());
        assert!(!CharacterData::new("  x ").is_blank());
    }
}
