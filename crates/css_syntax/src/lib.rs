//! CSS Syntax Module Level 3 — Rule parsing for rule collections.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Only what a `<style>` rule collection needs: parse exactly one rule the way
//! `CSSStyleSheet.insertRule` does, a lenient whole-sheet parse, and the
//! compound selectors used for element lookup.
use core::fmt::{self, Display, Formatter};
use core::error::Error;
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;

mod selector;

pub use selector::{AttributeSelector, CompoundSelector, parse_compound_selector};

/// A single CSS declaration (property: value [!important]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub name: String,
    /// Raw value text (without trailing !important).
    pub value: String,
    /// Whether the declaration was marked as `!important`.
    pub important: bool,
}

/// A single style rule with a raw prelude and parsed declarations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Raw prelude text (typically the selector list).
    pub prelude: String,
    /// Declarations within the rule block.
    pub declarations: Vec<Declaration>,
}

/// An at-rule such as `@keyframes` or `@media`, kept as raw text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AtRule {
    /// Lowercased at-keyword without the `@`.
    pub name: String,
    /// Raw prelude text between the keyword and the block.
    pub prelude: String,
    /// Raw block contents, `None` for statement at-rules like `@import`.
    pub block: Option<String>,
}

/// One entry of a rule collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CssRule {
    /// A qualified (selector) rule.
    Style(StyleRule),
    /// An at-rule.
    At(AtRule),
}

impl CssRule {
    /// Whether this is an at-rule with the given (case-insensitive) name.
    pub fn is_at_rule(&self, name: &str) -> bool {
        matches!(self, Self::At(rule) if rule.name.eq_ignore_ascii_case(name))
    }
}

impl Display for CssRule {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Style(rule) => {
                write!(formatter, "{} {{", rule.prelude)?;
                for decl in &rule.declarations {
                    write!(formatter, " {}: {}", decl.name, decl.value)?;
                    if decl.important {
                        formatter.write_str(" !important")?;
                    }
                    formatter.write_str(";")?;
                }
                formatter.write_str(" }")
            }
            Self::At(rule) => {
                write!(formatter, "@{}", rule.name)?;
                if !rule.prelude.is_empty() {
                    write!(formatter, " {}", rule.prelude)?;
                }
                match &rule.block {
                    Some(block) if block.is_empty() => formatter.write_str(" { }"),
                    Some(block) => write!(formatter, " {{ {block} }}"),
                    None => formatter.write_str(";"),
                }
            }
        }
    }
}

/// Errors produced while parsing rule or selector text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SyntaxError {
    /// The input contained no rule at all.
    Empty,
    /// The input could not be parsed; carries the offending slice.
    Invalid(String),
    /// The input contained more than one rule.
    MultipleRules(usize),
    /// The selector uses features outside compound type/attribute selectors.
    UnsupportedSelector(String),
}

impl Display for SyntaxError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => formatter.write_str("SyntaxError: no rule found"),
            Self::Invalid(text) => write!(formatter, "SyntaxError: failed to parse '{text}'"),
            Self::MultipleRules(count) => {
                write!(formatter, "SyntaxError: expected a single rule, found {count}")
            }
            Self::UnsupportedSelector(text) => {
                write!(formatter, "SyntaxError: unsupported selector '{text}'")
            }
        }
    }
}

impl Error for SyntaxError {}

/// Parse `!important` at the end of a value, returning (`value_without_important`, `important_flag`).
fn split_important_tail(value: &str) -> (String, bool) {
    const IMPORTANT: &str = "!important";
    let trimmed = value.trim();
    if let Some(split) = trimmed.len().checked_sub(IMPORTANT.len())
        && let Some((prefix, tail)) = trimmed.split_at_checked(split)
        && tail.eq_ignore_ascii_case(IMPORTANT)
    {
        return (prefix.trim_end().to_owned(), true);
    }
    (trimmed.to_owned(), false)
}

/// Consume the rest of `input` and return its trimmed source text.
fn consume_raw<'input>(input: &mut Parser<'input, '_>) -> String {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start).trim().to_owned()
}

/// Collects the declarations of a style rule body. Nested rules fall through
/// to the trait defaults, which reject them.
struct DeclarationListParser;

impl<'input> CssDeclarationParser<'input> for DeclarationListParser {
    type Declaration = Declaration;
    type Error = ();

    fn parse_value<'tokens>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'tokens>,
        _decl_start: &ParserState,
    ) -> Result<Declaration, ParseError<'input, ()>> {
        let (value, important) = split_important_tail(&consume_raw(input));
        Ok(Declaration {
            name: name.to_ascii_lowercase(),
            value,
            important,
        })
    }
}

impl<'input> CssAtRuleParser<'input> for DeclarationListParser {
    type Prelude = ();
    type AtRule = Declaration;
    type Error = ();
}

impl<'input> CssQualifiedRuleParser<'input> for DeclarationListParser {
    type Prelude = ();
    type QualifiedRule = Declaration;
    type Error = ();
}

impl<'input> CssRuleBodyItemParser<'input, Declaration, ()> for DeclarationListParser {
    fn parse_declarations(&self) -> bool {
        true
    }

    fn parse_qualified(&self) -> bool {
        false
    }
}

/// Parse declarations from a rule block using `cssparser` body parser.
fn parse_declarations_from_block(block: &mut Parser) -> Vec<Declaration> {
    let mut out: Vec<Declaration> = Vec::new();
    let mut body = DeclarationListParser;
    for decl in CssRuleBodyParser::new(block, &mut body).flatten() {
        out.push(decl);
    }
    out
}

/// Parse exactly one rule, mirroring `CSSStyleSheet.insertRule`.
///
/// # Errors
/// Returns [`SyntaxError::Empty`] when no rule is present, [`SyntaxError::Invalid`]
/// when any part of the input fails to parse and [`SyntaxError::MultipleRules`]
/// when more than one rule is present.
pub fn parse_rule(css: &str) -> Result<CssRule, SyntaxError> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut top = TopLevelParser;
    let mut rules: Vec<CssRule> = Vec::new();
    for item in StyleSheetParser::new(&mut parser, &mut top) {
        match item {
            Ok(rule) => rules.push(rule),
            Err((_, slice)) => return Err(SyntaxError::Invalid(slice.trim().to_owned())),
        }
    }
    match rules.len() {
        0 => Err(SyntaxError::Empty),
        1 => rules.pop().ok_or(SyntaxError::Empty),
        count => Err(SyntaxError::MultipleRules(count)),
    }
}

/// Parse a full stylesheet, dropping rules that fail to parse.
pub fn parse_stylesheet(css: &str) -> Vec<CssRule> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut top = TopLevelParser;
    StyleSheetParser::new(&mut parser, &mut top)
        .flatten()
        .collect()
}
