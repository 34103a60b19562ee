/// Token classification for a line of C-like source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unclassified. Never emitted by the scanner.
    None,
    Keyword,
    Type,
    Preprocessor,
    String,
    Comment,
    Word,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::None => "none",
            TokenKind::Keyword => "keyword",
            TokenKind::Type => "type",
            TokenKind::Preprocessor => "preprocessor",
            TokenKind::String => "string",
            TokenKind::Comment => "comment",
            TokenKind::Word => "word",
        }
    }
}

/// A classified span of one line, in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub offset: usize,
    pub length: usize,
}

impl Token {
    pub fn new(kind: TokenKind, offset: usize, length: usize) -> Self {
        Self {
            kind,
            offset,
            length,
        }
    }

    /// One past the last byte covered by this token.
    pub fn end(&self) -> usize {
        self.offset + self.length
    }

    /// The bytes of `line` this token covers, clamped to the line.
    pub fn text<'a>(&self, line: &'a [u8]) -> &'a [u8] {
        let start = self.offset.min(line.len());
        let end = self.end().min(line.len());
        &line[start..end]
    }
}

/// Reserved type names.
pub const TYPES: &[&str] = &[
    "char", "double", "float", "int", "long", "short", "void", "size_t",
];

/// Reserved words.
pub const KEYWORDS: &[&str] = &[
    "auto", "break", "case", "const", "continue", "default", "do", "else", "enum", "extern",
    "for", "goto", "if", "register", "return", "signed", "sizeof", "static", "struct", "switch",
    "typedef", "union", "unsigned", "volatile", "while",
];

/// Check if `word` is a reserved word.
pub fn is_keyword(word: &[u8]) -> bool {
    table_contains(KEYWORDS, word)
}

/// Check if `word` is a reserved type name.
pub fn is_type(word: &[u8]) -> bool {
    table_contains(TYPES, word)
}

// An entry longer than the candidate is skipped before comparing. The guard
// only ever rejects entries that could not compare equal anyway; it never
// skips an entry shorter than the candidate.
fn table_contains(table: &[&str], word: &[u8]) -> bool {
    table
        .iter()
        .filter(|entry| word.len() >= entry.len())
        .any(|entry| entry.as_bytes() == word)
}
