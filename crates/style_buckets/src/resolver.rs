//! Lazy creation and ordering of per-bucket `<style>` containers.

use crate::bucket::{BUCKET_ATTRIBUTE, StyleBucket};
use crate::state::RendererState;
use crate::target::StyleTarget;
use anyhow::{Context as _, Error, anyhow, bail};
use html::StyleSheet;

/// Find or create the `<style>` container for `bucket`.
///
/// A cached container is returned without touching the document. Otherwise a
/// container already in the document (server-rendered markup) is adopted, and
/// failing that a new one is inserted into the head before the container of
/// the nearest later bucket that already has one. Containers therefore always
/// appear in [`STYLE_BUCKET_ORDERING`](crate::STYLE_BUCKET_ORDERING) order.
///
/// # Errors
/// Fails when the document has no head, when the insertion fails, or when an
/// element tagged for `bucket` is not a style container.
pub fn resolve_style_element<T: StyleTarget>(
    bucket: StyleBucket,
    target: &mut T,
    state: &mut RendererState<T::Element>,
) -> Result<T::Element, Error> {
    if let Some(element) = state.get(bucket) {
        log::trace!("style bucket '{bucket}' served from cache");
        return Ok(element);
    }

    if let Some(existing) = target.query_selector(&bucket.selector())? {
        if target.sheet(existing).is_none() {
            bail!("element {existing:?} is tagged for style bucket '{bucket}' but is not a style container");
        }
        debug_assert_eq!(
            target.get_attribute(existing, BUCKET_ATTRIBUTE),
            Some(bucket.marker()),
            "query for style bucket '{bucket}' matched a container with another marker"
        );
        state.insert(bucket, existing);
        log::debug!("adopted existing container {existing:?} for style bucket '{bucket}'");
        return Ok(existing);
    }

    // Earlier buckets are never anchors.
    let anchor = bucket
        .later_buckets()
        .iter()
        .find_map(|later| state.get(*later));
    let head = target
        .head()
        .ok_or_else(|| anyhow!("document has no <head> to hold style bucket '{bucket}'"))?;

    let element = target.create_element("style");
    target.set_attribute(element, BUCKET_ATTRIBUTE, bucket.marker())?;
    target
        .insert_before(head, element, anchor)
        .with_context(|| format!("failed to insert container for style bucket '{bucket}'"))?;
    state.insert(bucket, element);
    log::debug!("created container {element:?} for style bucket '{bucket}' before {anchor:?}");
    Ok(element)
}

/// Rule collection of the container for `bucket`, creating the container on first use.
///
/// # Errors
/// See [`resolve_style_element`].
pub fn get_style_sheet_for_bucket<'target, T: StyleTarget>(
    bucket: StyleBucket,
    target: &'target mut T,
    state: &mut RendererState<T::Element>,
) -> Result<&'target mut StyleSheet, Error> {
    let element = resolve_style_element(bucket, target, state)?;
    target
        .sheet_mut(element)
        .ok_or_else(|| anyhow!("container {element:?} for style bucket '{bucket}' has no sheet"))
}
