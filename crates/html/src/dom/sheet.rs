use anyhow::{Context as _, Error, bail};
use css_syntax::{CssRule, parse_rule};

/// The rule collection behind a `<style>` element (`HTMLStyleElement.sheet`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleSheet {
    rules: Vec<CssRule>,
}

impl StyleSheet {
    /// Rules in insertion order (`cssRules`).
    pub fn css_rules(&self) -> &[CssRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Parse `rule` and insert it at `index`, returning the index.
    ///
    /// # Errors
    /// `IndexSizeError` when `index` is past the end, or the parse error when
    /// `rule` is not exactly one valid rule. The sheet is unchanged on error.
    pub fn insert_rule(&mut self, rule: &str, index: usize) -> Result<usize, Error> {
        if index > self.rules.len() {
            bail!(
                "IndexSizeError: index {index} exceeds rule count {}",
                self.rules.len()
            );
        }
        let parsed = parse_rule(rule).with_context(|| format!("failed to insert rule '{rule}'"))?;
        self.rules.insert(index, parsed);
        Ok(index)
    }

    /// Remove the rule at `index`.
    ///
    /// # Errors
    /// `IndexSizeError` when `index` is out of bounds.
    pub fn delete_rule(&mut self, index: usize) -> Result<CssRule, Error> {
        if index >= self.rules.len() {
            bail!(
                "IndexSizeError: index {index} exceeds rule count {}",
                self.rules.len()
            );
        }
        Ok(self.rules.remove(index))
    }

    /// Serialized rules, one per line.
    pub fn to_css_text(&self) -> String {
        self.rules
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
