//! Fold region calculation
//!
//! Every `{` and `[` whose matching close lies on a later line yields one
//! collapsible region. Matching uses a per-delimiter depth counter over the
//! tokens that follow the opener inside its statement; an opener without a
//! match produces nothing.
//!
//! Braces pick their placeholder from the keyword that introduces them,
//! found by walking backwards over the statement. Brackets fold to a map
//! marker when their first significant token is `&`, and to a list marker
//! otherwise.

use crate::line_index::LineLookup;
use crate::structure::segment;
use crate::syntax::{BlockKeyword, ContractError, Token, TokenKind};
use serde::{Deserialize, Serialize};

pub const BRACE_PLACEHOLDER: &str = "{...}";
pub const LIST_PLACEHOLDER: &str = "[...]";
pub const MAP_PLACEHOLDER: &str = "[&...]";

/// Inferred syntactic role of a brace pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BraceContext {
    Function,
    Lambda,
    IfBlock,
    ElifBlock,
    ElseBlock,
    ForBlock,
    WhileBlock,
    TryBlock,
    CatchBlock,
    FinallyBlock,
    Generic,
}

impl BraceContext {
    fn from_keyword(keyword: BlockKeyword) -> Self {
        match keyword {
            BlockKeyword::Fn => BraceContext::Function,
            BlockKeyword::If => BraceContext::IfBlock,
            BlockKeyword::Elif => BraceContext::ElifBlock,
            BlockKeyword::Else => BraceContext::ElseBlock,
            BlockKeyword::For => BraceContext::ForBlock,
            BlockKeyword::While => BraceContext::WhileBlock,
            BlockKeyword::Try => BraceContext::TryBlock,
            BlockKeyword::Catch => BraceContext::CatchBlock,
            BlockKeyword::Finally => BraceContext::FinallyBlock,
        }
    }

    /// Placeholder shown when the region is collapsed
    pub fn placeholder(&self, style: PlaceholderStyle) -> &'static str {
        match style {
            PlaceholderStyle::Uniform => BRACE_PLACEHOLDER,
            PlaceholderStyle::Contextual => match self {
                BraceContext::Function => "{fn ...}",
                BraceContext::IfBlock => "{if ...}",
                BraceContext::ElifBlock => "{elif ...}",
                BraceContext::ElseBlock => "{else ...}",
                BraceContext::ForBlock => "{for ...}",
                BraceContext::WhileBlock => "{while ...}",
                BraceContext::TryBlock => "{try ...}",
                BraceContext::CatchBlock => "{catch ...}",
                BraceContext::FinallyBlock => "{finally ...}",
                BraceContext::Lambda | BraceContext::Generic => BRACE_PLACEHOLDER,
            },
        }
    }
}

/// How brace placeholders are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderStyle {
    /// Every brace folds to `{...}`
    #[default]
    Uniform,
    /// The introducing keyword shows in the placeholder
    Contextual,
}

/// Options for an analysis pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Skip brace context inference; every brace gets [`BraceContext::Generic`]
    pub fast: bool,
    pub placeholder_style: PlaceholderStyle,
}

/// Delimiter that opens a fold region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    Brace,
    Bracket,
}

impl Delimiter {
    fn from_open(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::LBrace => Some(Delimiter::Brace),
            TokenKind::LBracket => Some(Delimiter::Bracket),
            _ => None,
        }
    }

    fn open(&self) -> TokenKind {
        match self {
            Delimiter::Brace => TokenKind::LBrace,
            Delimiter::Bracket => TokenKind::LBracket,
        }
    }

    fn close(&self) -> TokenKind {
        match self {
            Delimiter::Brace => TokenKind::RBrace,
            Delimiter::Bracket => TokenKind::RBracket,
        }
    }

    fn group_prefix(&self) -> &'static str {
        match self {
            Delimiter::Brace => "elvish-brace",
            Delimiter::Bracket => "elvish-bracket",
        }
    }
}

/// A collapsible source range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoldRegion {
    /// Byte offset of the opening delimiter
    pub start_offset: usize,
    /// Byte offset one past the closing delimiter
    pub end_offset: usize,
    /// Zero-based line of `start_offset`
    pub start_line: usize,
    /// Zero-based line of `end_offset`
    pub end_line: usize,
    /// Groups mutually exclusive overlapping folds; unique per opener
    pub group_id: String,
    pub placeholder: String,
    pub delimiter: Delimiter,
    /// Inferred brace context, `None` for brackets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<BraceContext>,
    #[serde(default)]
    pub collapsed_by_default: bool,
}

impl FoldRegion {
    /// Lines that disappear when the region is collapsed
    pub fn hidden_lines(&self) -> usize {
        self.end_line - self.start_line
    }

    pub fn contains(&self, other: &FoldRegion) -> bool {
        self.start_offset <= other.start_offset && self.end_offset >= other.end_offset
    }
}

/// Compute every fold region of a token stream
pub fn fold_regions<L: LineLookup>(
    tokens: &[Token],
    lines: &L,
    options: AnalysisOptions,
) -> Result<Vec<FoldRegion>, ContractError> {
    let mut regions = Vec::new();

    for statement in segment(tokens) {
        let range = statement.range.clone();

        for index in range.clone() {
            let Some(delimiter) = Delimiter::from_open(tokens[index].kind) else {
                continue;
            };

            let Some(close) = find_match(tokens, index, range.end, delimiter) else {
                tracing::debug!(
                    offset = tokens[index].start,
                    ?delimiter,
                    "unmatched opener, no fold region"
                );
                continue;
            };

            let start_offset = tokens[index].start;
            let end_offset = tokens[close].end();
            let start_line = lines.line_of(start_offset)?;
            let end_line = lines.line_of(end_offset)?;
            if end_line <= start_line {
                continue;
            }

            let (context, placeholder) = match delimiter {
                Delimiter::Brace => {
                    let context = if options.fast {
                        BraceContext::Generic
                    } else {
                        brace_context(tokens, range.start, index)
                    };
                    (
                        Some(context),
                        context.placeholder(options.placeholder_style),
                    )
                }
                Delimiter::Bracket => {
                    let placeholder = if is_map_literal(tokens, index, range.end) {
                        MAP_PLACEHOLDER
                    } else {
                        LIST_PLACEHOLDER
                    };
                    (None, placeholder)
                }
            };

            regions.push(FoldRegion {
                start_offset,
                end_offset,
                start_line,
                end_line,
                group_id: format!("{}-{}", delimiter.group_prefix(), start_offset),
                placeholder: placeholder.to_string(),
                delimiter,
                context,
                collapsed_by_default: false,
            });
        }
    }

    Ok(regions)
}

/// Index of the token closing the opener at `open`, searching up to `end`
fn find_match(tokens: &[Token], open: usize, end: usize, delimiter: Delimiter) -> Option<usize> {
    let mut depth = 1usize;

    for (index, token) in tokens.iter().enumerate().take(end).skip(open + 1) {
        if token.kind == delimiter.open() {
            depth += 1;
        } else if token.kind == delimiter.close() {
            depth -= 1;
            if depth == 0 {
                return Some(index);
            }
        }
    }

    None
}

/// Walk back from a `{` to the keyword introducing it.
///
/// Trivia, identifiers, `)` and variables are skipped: they may be a function
/// name, an output capture or a loop variable sitting between the keyword
/// and the brace. Any other token, or the start of the statement, means the
/// brace is a lambda.
fn brace_context(tokens: &[Token], statement_start: usize, open: usize) -> BraceContext {
    for token in tokens[statement_start..open].iter().rev() {
        if let Some(keyword) = token.kind.block_keyword() {
            return BraceContext::from_keyword(keyword);
        }

        let transparent = token.kind.is_trivia()
            || matches!(
                token.kind,
                TokenKind::Identifier | TokenKind::RParen | TokenKind::Variable
            );
        if !transparent {
            return BraceContext::Lambda;
        }
    }

    BraceContext::Lambda
}

/// A bracket whose first significant token is `&` opens a map
fn is_map_literal(tokens: &[Token], open: usize, end: usize) -> bool {
    tokens[open + 1..end]
        .iter()
        .find(|t| !t.kind.is_trivia())
        .is_some_and(|t| t.kind == TokenKind::Ampersand)
}
