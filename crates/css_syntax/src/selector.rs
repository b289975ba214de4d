//! Compound selectors limited to type and attribute selectors.
//! Spec: <https://www.w3.org/TR/selectors-4/#attribute-selectors>

use crate::SyntaxError;
use cssparser::{ParseError, Parser, ParserInput, Token};

/// `[name]` or `[name="value"]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttributeSelector {
    /// Lowercased attribute name.
    pub name: String,
    /// Exact value to match; `None` only checks presence.
    pub value: Option<String>,
}

/// A type selector (or `*`) followed by attribute selectors, e.g. `style[data-x="h"]`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    /// Lowercased tag name; `None` matches any element.
    pub tag: Option<String>,
    /// All attribute conditions, every one must hold.
    pub attributes: Vec<AttributeSelector>,
}

impl CompoundSelector {
    /// Test an element given its tag name and an attribute lookup.
    pub fn matches<'attr, F>(&self, tag: &str, attr: F) -> bool
    where
        F: Fn(&str) -> Option<&'attr str>,
    {
        if let Some(expected) = &self.tag
            && !expected.eq_ignore_ascii_case(tag)
        {
            return false;
        }
        self.attributes.iter().all(|cond| match (attr(&cond.name), &cond.value) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(actual), Some(expected)) => actual == expected,
        })
    }
}

/// Parse the inside of `[...]`.
fn parse_attribute_block<'input>(
    block: &mut Parser<'input, '_>,
) -> Result<AttributeSelector, ParseError<'input, ()>> {
    let name = block.expect_ident()?.to_ascii_lowercase();
    if block.is_exhausted() {
        return Ok(AttributeSelector { name, value: None });
    }
    block.expect_delim('=')?;
    let value = block.expect_ident_or_string()?.as_ref().to_owned();
    block.expect_exhausted()?;
    Ok(AttributeSelector {
        name,
        value: Some(value),
    })
}

/// Parse a compound selector such as `[data-bucket="default"]` or `style[media]`.
///
/// # Errors
/// Returns [`SyntaxError::Empty`] for blank input and
/// [`SyntaxError::UnsupportedSelector`] for combinators, pseudo-classes,
/// classes, ids and attribute operators other than `=`.
pub fn parse_compound_selector(selector: &str) -> Result<CompoundSelector, SyntaxError> {
    let trimmed = selector.trim();
    if trimmed.is_empty() {
        return Err(SyntaxError::Empty);
    }
    let unsupported = || SyntaxError::UnsupportedSelector(trimmed.to_owned());

    let mut input = ParserInput::new(trimmed);
    let mut parser = Parser::new(&mut input);
    let mut compound = CompoundSelector::default();
    let mut first = true;
    while let Ok(token) = parser.next_including_whitespace().cloned() {
        match token {
            Token::Ident(name) if first => {
                compound.tag = Some(name.to_ascii_lowercase());
            }
            Token::Delim('*') if first => {}
            Token::SquareBracketBlock => {
                let attribute = parser
                    .parse_nested_block(parse_attribute_block)
                    .map_err(|_| unsupported())?;
                compound.attributes.push(attribute);
            }
            _ => return Err(unsupported()),
        }
        first = false;
    }
    Ok(compound)
}
