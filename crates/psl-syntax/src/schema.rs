//! Documents and multi-document schemas.

use text_size::TextSize;

use crate::ast::{Block, BlockKind};
use crate::error::SchemaError;
use crate::line_index::{LineIndex, Position};
use crate::parser::parse_blocks;

/// One parsed schema file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    uri: String,
    text: String,
    line_index: LineIndex,
    blocks: Vec<Block>,
}

impl Document {
    /// Parses `text` as the document identified by `uri`.
    #[must_use]
    pub fn parse(uri: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let line_index = LineIndex::new(&text);
        let blocks = parse_blocks(&text);
        Self {
            uri: uri.into(),
            text,
            line_index,
            blocks,
        }
    }

    /// Identifier of the document.
    #[must_use]
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Full source text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Line index of the source text.
    #[must_use]
    pub fn line_index(&self) -> &LineIndex {
        &self.line_index
    }

    /// Blocks in declaration order.
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Byte offset of `position`, `None` when it lies outside the document.
    #[must_use]
    pub fn offset(&self, position: Position) -> Option<TextSize> {
        self.line_index.offset(position, &self.text)
    }

    /// Position of a byte offset.
    #[must_use]
    pub fn position(&self, offset: TextSize) -> Position {
        self.line_index.position(offset, &self.text)
    }

    /// Text of a line without its line break.
    #[must_use]
    pub fn line(&self, line: u32) -> Option<&str> {
        let start = self.line_index.line_start(line)?;
        let end = self.line_index.line_end(line, &self.text)?;
        Some(&self.text[usize::from(start)..usize::from(end)])
    }

    /// Block whose range contains `offset`.
    #[must_use]
    pub fn block_at(&self, offset: TextSize) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|block| block.range.contains_inclusive(offset))
    }
}

/// The set of documents that make up one schema.
///
/// Blocks declared in any document are visible from every other one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    documents: Vec<Document>,
}

impl Schema {
    /// A schema made of a single document.
    #[must_use]
    pub fn single_file(uri: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            documents: vec![Document::parse(uri, text)],
        }
    }

    /// Parses several `(uri, text)` pairs into one schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateDocument`] if two documents share a URI.
    pub fn from_documents<I, U, T>(documents: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = (U, T)>,
        U: Into<String>,
        T: Into<String>,
    {
        let mut schema = Self::default();
        for (uri, text) in documents {
            schema.add_document(Document::parse(uri, text))?;
        }
        Ok(schema)
    }

    /// Adds an already parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateDocument`] if the URI is already present.
    pub fn add_document(&mut self, document: Document) -> Result<(), SchemaError> {
        if self.document(document.uri()).is_some() {
            return Err(SchemaError::DuplicateDocument {
                uri: document.uri().to_string(),
            });
        }
        self.documents.push(document);
        Ok(())
    }

    /// All documents in insertion order.
    #[must_use]
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Looks up a document by URI.
    #[must_use]
    pub fn document(&self, uri: &str) -> Option<&Document> {
        self.documents.iter().find(|document| document.uri() == uri)
    }

    /// All blocks of all documents, in document then declaration order.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.documents.iter().flat_map(|document| document.blocks())
    }

    /// First block of `kind` with the given name.
    #[must_use]
    pub fn block(&self, kind: BlockKind, name: &str) -> Option<&Block> {
        self.blocks()
            .find(|block| block.kind == kind && block.name == name)
    }

    /// First model, view, enum or composite type with the given name.
    #[must_use]
    pub fn type_block(&self, name: &str) -> Option<&Block> {
        self.blocks()
            .find(|block| block.kind.declares_type() && block.name == name)
    }

    /// The first datasource of the schema.
    #[must_use]
    pub fn datasource(&self) -> Option<&Block> {
        self.blocks()
            .find(|block| block.kind == BlockKind::Datasource)
    }

    /// All generator blocks.
    pub fn generators(&self) -> impl Iterator<Item = &Block> {
        self.blocks()
            .filter(|block| block.kind == BlockKind::Generator)
    }
}
