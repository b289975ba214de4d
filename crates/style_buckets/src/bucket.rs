//! Style buckets and their cascade order.

use anyhow::{Error, anyhow};
use core::fmt::{self, Display, Formatter};
use core::str::FromStr;

/// Attribute that tags a `<style>` element with the bucket it holds.
pub const BUCKET_ATTRIBUTE: &str = "data-make-styles-bucket";

/// Cascade-priority class of a group of rules.
///
/// Variants are declared in cascade order, so the derived `Ord` agrees with
/// [`STYLE_BUCKET_ORDERING`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StyleBucket {
    /// Catch-all for rules without a more specific bucket.
    Default,
    /// `:link`
    Link,
    /// `:visited`
    Visited,
    /// `:focus-within`
    FocusWithin,
    /// `:focus`
    Focus,
    /// `:focus-visible`
    FocusVisible,
    /// `:hover`
    Hover,
    /// `:active`
    Active,
    /// `@keyframes`
    Keyframes,
    /// Other at-rules such as `@media` and `@supports`.
    AtRules,
}

/// Every bucket, lowest cascade priority first. Containers appear in the
/// document in this order.
pub const STYLE_BUCKET_ORDERING: [StyleBucket; 10] = [
    StyleBucket::Default,
    StyleBucket::Link,
    StyleBucket::Visited,
    StyleBucket::FocusWithin,
    StyleBucket::Focus,
    StyleBucket::FocusVisible,
    StyleBucket::Hover,
    StyleBucket::Active,
    StyleBucket::Keyframes,
    StyleBucket::AtRules,
];

impl StyleBucket {
    /// Short token used by rule generators (`""` for the catch-all).
    pub const fn short_name(self) -> &'static str {
        match self {
            Self::Default => "",
            Self::Link => "l",
            Self::Visited => "v",
            Self::FocusWithin => "w",
            Self::Focus => "f",
            Self::FocusVisible => "i",
            Self::Hover => "h",
            Self::Active => "a",
            Self::Keyframes => "k",
            Self::AtRules => "t",
        }
    }

    /// Value of [`BUCKET_ATTRIBUTE`] for this bucket. The catch-all is spelled
    /// `default` so the attribute never ends up empty.
    pub const fn marker(self) -> &'static str {
        match self {
            Self::Default => "default",
            other => other.short_name(),
        }
    }

    /// Index into [`STYLE_BUCKET_ORDERING`].
    pub const fn position(self) -> usize {
        match self {
            Self::Default => 0,
            Self::Link => 1,
            Self::Visited => 2,
            Self::FocusWithin => 3,
            Self::Focus => 4,
            Self::FocusVisible => 5,
            Self::Hover => 6,
            Self::Active => 7,
            Self::Keyframes => 8,
            Self::AtRules => 9,
        }
    }

    /// Buckets that follow this one, nearest first.
    pub fn later_buckets(self) -> &'static [Self] {
        STYLE_BUCKET_ORDERING
            .get(self.position() + 1..)
            .unwrap_or_default()
    }

    /// Attribute selector matching this bucket's container.
    pub fn selector(self) -> String {
        format!("[{BUCKET_ATTRIBUTE}=\"{}\"]", self.marker())
    }

    /// Look a bucket up by its short token.
    ///
    /// # Errors
    /// Fails for tokens outside the closed set.
    pub fn from_short_name(name: &str) -> Result<Self, Error> {
        STYLE_BUCKET_ORDERING
            .iter()
            .copied()
            .find(|bucket| bucket.short_name() == name)
            .ok_or_else(|| anyhow!("unknown style bucket '{name}'"))
    }

    /// Look a bucket up by its attribute value.
    pub fn from_marker(marker: &str) -> Option<Self> {
        STYLE_BUCKET_ORDERING
            .iter()
            .copied()
            .find(|bucket| bucket.marker() == marker)
    }
}

impl FromStr for StyleBucket {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Self::from_short_name(name)
    }
}

impl Display for StyleBucket {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.marker())
    }
}
