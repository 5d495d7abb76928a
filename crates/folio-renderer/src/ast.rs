//! Block and inline node types produced by the parser.

/// Callout flavor of an admonition block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdmonitionKind {
    /// `> [!NOTE]`
    Note,
    /// `> [!WARNING]`
    Warning,
    /// `> [!TIP]`
    Tip,
}

impl AdmonitionKind {
    /// Match a tag name such as `NOTE` (case-insensitive).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_uppercase().as_str() {
            "NOTE" => Some(Self::Note),
            "WARNING" => Some(Self::Warning),
            "TIP" => Some(Self::Tip),
            _ => None,
        }
    }

    /// CSS class of the rendered container.
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Note => "note-info",
            Self::Warning => "note-warning",
            Self::Tip => "note-tip",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Note => "Note",
            Self::Warning => "Warning",
            Self::Tip => "Tip",
        }
    }
}

/// Block-level node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Block {
    Heading {
        level: u8,
        /// Raw heading text, used for the anchor id.
        text: String,
        content: Vec<Inline>,
    },
    Paragraph(Vec<Inline>),
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    List {
        /// First number of an ordered list, `None` for bullet lists.
        start: Option<u64>,
        items: Vec<Vec<Inline>>,
    },
    Admonition {
        kind: AdmonitionKind,
        children: Vec<Block>,
    },
    BlockQuote(Vec<Block>),
    /// Line that already starts with a block-level HTML tag.
    Html(String),
    Rule,
}

/// Inline node inside a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Code(String),
    Strong(Vec<Inline>),
    Emphasis(Vec<Inline>),
    Link { href: String, children: Vec<Inline> },
    Image { src: String, alt: String },
}

impl Inline {
    /// Plain text of this node with all markup dropped.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        self.push_plain_text(&mut out);
        out
    }

    fn push_plain_text(&self, out: &mut String) {
        match self {
            Self::Text(text) | Self::Code(text) => out.push_str(text),
            Self::Image { alt, .. } => out.push_str(alt),
            Self::Strong(children) | Self::Emphasis(children) | Self::Link { children, .. } => {
                for child in children {
                    child.push_plain_text(out);
                }
            }
        }
    }
}
