//! A renderer that writes generated rules into their bucket's container.

use crate::bucket::StyleBucket;
use crate::resolver::get_style_sheet_for_bucket;
use crate::state::RendererState;
use crate::target::StyleTarget;
use anyhow::Error;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::collections::{BTreeMap, HashMap};

/// Rules grouped by the bucket they belong to.
pub type CssRulesByBucket = BTreeMap<StyleBucket, Vec<String>>;

static NEXT_RENDERER_ID: AtomicUsize = AtomicUsize::new(0);

/// Renderer configuration.
#[derive(Default)]
pub struct RendererOptions {
    /// Rules for which this returns `false` are recorded as seen but never
    /// inserted into a sheet.
    pub filter_css_rule: Option<Box<dyn Fn(&str) -> bool>>,
}

impl fmt::Debug for RendererOptions {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("RendererOptions")
            .field("filter_css_rule", &self.filter_css_rule.is_some())
            .finish()
    }
}

/// Counts from one [`StyleRenderer::insert_css_rules`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InsertionReport {
    pub inserted: usize,
    /// Already inserted earlier, in this bucket or another one.
    pub cached: usize,
    pub filtered: usize,
    /// Rejected by the sheet, see the warning log for details.
    pub rejected: usize,
}

/// Owns a document and inserts rules into ordered bucket containers.
pub struct StyleRenderer<T: StyleTarget> {
    id: String,
    target: T,
    state: RendererState<T::Element>,
    insertion_cache: HashMap<String, StyleBucket>,
    options: RendererOptions,
}

impl<T: StyleTarget> StyleRenderer<T> {
    pub fn new(target: T) -> Self {
        Self::with_options(target, RendererOptions::default())
    }

    pub fn with_options(target: T, options: RendererOptions) -> Self {
        let id = format!("d{}", NEXT_RENDERER_ID.fetch_add(1, Ordering::Relaxed));
        log::debug!("created style renderer {id} with {options:?}");
        Self {
            id,
            target,
            state: RendererState::new(),
            insertion_cache: HashMap::new(),
            options,
        }
    }

    /// Process-unique renderer id, `d0`, `d1`, ...
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// Direct access to the document. Mutations made here are not tracked by the
    /// bucket cache.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    pub fn state(&self) -> &RendererState<T::Element> {
        &self.state
    }

    pub fn into_target(self) -> T {
        self.target
    }

    /// Bucket a rule was first inserted under, if any.
    pub fn inserted_bucket(&self, rule: &str) -> Option<StyleBucket> {
        self.insertion_cache.get(rule).copied()
    }

    /// Append each rule to the end of its bucket's sheet, once per renderer.
    ///
    /// A rule the sheet refuses is logged and skipped; the rest of the batch
    /// is still inserted.
    ///
    /// # Errors
    /// Fails only when a bucket container cannot be resolved.
    pub fn insert_css_rules(&mut self, css_rules: &CssRulesByBucket) -> Result<InsertionReport, Error> {
        let mut report = InsertionReport::default();
        for (bucket, rules) in css_rules {
            for rule in rules {
                if self.insertion_cache.contains_key(rule) {
                    report.cached += 1;
                    continue;
                }
                let sheet = get_style_sheet_for_bucket(*bucket, &mut self.target, &mut self.state)?;
                self.insertion_cache.insert(rule.clone(), *bucket);

                if let Some(filter) = &self.options.filter_css_rule
                    && !filter(rule)
                {
                    report.filtered += 1;
                    continue;
                }
                match sheet.insert_rule(rule, sheet.len()) {
                    Ok(_) => report.inserted += 1,
                    Err(err) => {
                        log::warn!("There was a problem inserting the following rule: \"{rule}\": {err:#}");
                        report.rejected += 1;
                    }
                }
            }
        }
        log::trace!("renderer {} inserted rules: {report:?}", self.id);
        Ok(report)
    }
}
