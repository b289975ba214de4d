use html::DOM;
use style_buckets::{
    BUCKET_ATTRIBUTE, CssRulesByBucket, InsertionReport, RendererOptions, StyleBucket,
    StyleRenderer,
};

fn rules(entries: &[(StyleBucket, &str)]) -> CssRulesByBucket {
    let mut by_bucket = CssRulesByBucket::new();
    for (bucket, rule) in entries {
        by_bucket.entry(*bucket).or_default().push((*rule).to_owned());
    }
    by_bucket
}

/// `(marker, rules)` for every style container in the head, in document order.
fn head_snapshot(dom: &DOM) -> Vec<(String, Vec<String>)> {
    let head = dom.head().unwrap();
    dom.children(head)
        .into_iter()
        .filter_map(|child| {
            let marker = dom.get_attr(child, BUCKET_ATTRIBUTE)?.to_owned();
            let sheet = dom.sheet(child)?;
            Some((marker, sheet.css_rules().iter().map(ToString::to_string).collect()))
        })
        .collect()
}

#[test]
fn rules_land_in_ordered_bucket_containers() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut renderer = StyleRenderer::new(DOM::with_skeleton());

    let report = renderer
        .insert_css_rules(&rules(&[(StyleBucket::Hover, ".a:hover { color: red }")]))
        .unwrap();
    assert_eq!(report.inserted, 1);
    renderer
        .insert_css_rules(&rules(&[
            (StyleBucket::AtRules, "@media (min-width: 10px) { .a { color: green } }"),
            (StyleBucket::Default, ".a { color: blue }"),
            (StyleBucket::Default, ".b { margin: 0 }"),
        ]))
        .unwrap();

    let snapshot = head_snapshot(renderer.target());
    assert_eq!(
        snapshot,
        vec![
            (
                String::from("default"),
                vec![
                    String::from(".a { color: blue; }"),
                    String::from(".b { margin: 0; }")
                ]
            ),
            (String::from("h"), vec![String::from(".a:hover { color: red; }")]),
            (
                String::from("t"),
                vec![String::from("@media (min-width: 10px) { .a { color: green } }")]
            ),
        ]
    );
    assert_eq!(renderer.state().len(), 3);
}

#[test]
fn each_rule_is_inserted_once_per_renderer() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut renderer = StyleRenderer::new(DOM::with_skeleton());
    let batch = rules(&[
        (StyleBucket::Focus, ".a { color: red }"),
        (StyleBucket::Focus, ".a:focus { outline: 0 }"),
        (StyleBucket::Default, ".a { color: red }"),
    ]);

    let first = renderer.insert_css_rules(&batch).unwrap();
    assert_eq!(
        first,
        InsertionReport {
            inserted: 2,
            cached: 1,
            filtered: 0,
            rejected: 0
        }
    );
    assert_eq!(renderer.inserted_bucket(".a { color: red }"), Some(StyleBucket::Default));

    let second = renderer.insert_css_rules(&batch).unwrap();
    assert_eq!(second.inserted, 0);
    assert_eq!(second.cached, 3);

    let snapshot = head_snapshot(renderer.target());
    assert_eq!(snapshot[0].1.len(), 1);
    assert_eq!(snapshot[1].1, vec![String::from(".a:focus { outline: 0; }")]);
}

#[test]
fn filtered_rules_are_remembered_but_not_inserted() {
    let _ = env_logger::builder().is_test(true).try_init();
    let options = RendererOptions {
        filter_css_rule: Some(Box::new(|rule: &str| !rule.contains("-moz-"))),
    };
    let mut renderer = StyleRenderer::with_options(DOM::with_skeleton(), options);
    let report = renderer
        .insert_css_rules(&rules(&[
            (StyleBucket::Default, ".a::-moz-focus-inner { border: 0 }"),
            (StyleBucket::Default, ".a { border: 0 }"),
        ]))
        .unwrap();
    assert_eq!(report.inserted, 1);
    assert_eq!(report.filtered, 1);
    assert_eq!(
        renderer.inserted_bucket(".a::-moz-focus-inner { border: 0 }"),
        Some(StyleBucket::Default)
    );
    assert_eq!(head_snapshot(renderer.target())[0].1.len(), 1);
}

#[test]
fn rejected_rules_do_not_abort_the_batch() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut renderer = StyleRenderer::new(DOM::with_skeleton());
    let report = renderer
        .insert_css_rules(&rules(&[
            (StyleBucket::Active, ".a:active"),
            (StyleBucket::Active, ".b:active { color: red } .c { color: blue }"),
            (StyleBucket::Active, ".d:active { color: red }"),
        ]))
        .unwrap();
    assert_eq!(report.rejected, 2);
    assert_eq!(report.inserted, 1);
    assert_eq!(
        head_snapshot(renderer.target()),
        vec![(String::from("a"), vec![String::from(".d:active { color: red; }")])]
    );
}

#[test]
fn missing_head_propagates() {
    let mut renderer = StyleRenderer::new(DOM::new());
    let result = renderer.insert_css_rules(&rules(&[(StyleBucket::Default, ".a { color: red }")]));
    assert!(result.is_err());
    assert!(renderer.state().is_empty());
    assert_eq!(renderer.inserted_bucket(".a { color: red }"), None);
}

#[test]
fn server_rendered_containers_receive_new_rules() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut dom = DOM::with_skeleton();
    let head = dom.head().unwrap();
    let ssr = dom.create_element("style");
    dom.set_attr(ssr, BUCKET_ATTRIBUTE, "default").unwrap();
    dom.append_child(head, ssr).unwrap();
    dom.sheet_mut(ssr)
        .unwrap()
        .insert_rule(".ssr { color: red }", 0)
        .unwrap();

    let mut renderer = StyleRenderer::new(dom);
    renderer
        .insert_css_rules(&rules(&[(StyleBucket::Default, ".client { color: blue }")]))
        .unwrap();
    assert_eq!(renderer.state().get(StyleBucket::Default), Some(ssr));

    let dom = renderer.into_target();
    assert_eq!(
        head_snapshot(&dom),
        vec![(
            String::from("default"),
            vec![
                String::from(".ssr { color: red; }"),
                String::from(".client { color: blue; }")
            ]
        )]
    );
}

#[test]
fn renderer_ids_are_unique() {
    let first = StyleRenderer::new(DOM::with_skeleton());
    let second = StyleRenderer::new(DOM::with_skeleton());
    assert_ne!(first.id(), second.id());
    assert!(first.id().starts_with('d'));
}
