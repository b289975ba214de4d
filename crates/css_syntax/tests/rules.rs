use css_syntax::{CssRule, SyntaxError, parse_compound_selector, parse_rule, parse_stylesheet};

#[test]
fn parses_single_style_rule_with_declarations() {
    let rule = parse_rule(".fz0hm9 { color: red; padding: 0 !important }").unwrap();
    let CssRule::Style(style) = &rule else {
        panic!("expected a style rule, got {rule:?}");
    };
    assert_eq!(style.prelude, ".fz0hm9");
    assert_eq!(style.declarations.len(), 2);
    assert_eq!(style.declarations[0].name, "color");
    assert_eq!(style.declarations[0].value, "red");
    assert!(!style.declarations[0].important);
    assert_eq!(style.declarations[1].value, "0");
    assert!(style.declarations[1].important);
    assert_eq!(rule.to_string(), ".fz0hm9 { color: red; padding: 0 !important; }");
}

#[test]
fn important_flag_ignores_ascii_case() {
    let rule = parse_rule(".a { color: red !IMPORTANT; margin: 0 !Important }").unwrap();
    let CssRule::Style(style) = &rule else {
        panic!("expected a style rule, got {rule:?}");
    };
    assert_eq!(style.declarations[0].value, "red");
    assert!(style.declarations[0].important);
    assert_eq!(style.declarations[1].value, "0");
    assert!(style.declarations[1].important);
    assert_eq!(rule.to_string(), ".a { color: red !important; margin: 0 !important; }");
}

#[test]
fn keeps_keyframes_and_media_as_at_rules() {
    let keyframes = parse_rule("@keyframes f1 { from { opacity: 0 } to { opacity: 1 } }").unwrap();
    assert!(keyframes.is_at_rule("keyframes"));
    let CssRule::At(at) = &keyframes else {
        panic!("expected an at-rule");
    };
    assert_eq!(at.prelude, "f1");
    assert_eq!(at.block.as_deref(), Some("from { opacity: 0 } to { opacity: 1 }"));

    let media = parse_rule("@MEDIA screen and (max-width: 100px) { .a { color: red } }").unwrap();
    assert!(media.is_at_rule("media"));

    let import = parse_rule("@import url(theme.css);").unwrap();
    assert_eq!(import.to_string(), "@import url(theme.css);");
}

#[test]
fn rejects_empty_invalid_and_multiple_rules() {
    assert_eq!(parse_rule("   "), Err(SyntaxError::Empty));
    assert!(matches!(parse_rule("div"), Err(SyntaxError::Invalid(_))));
    assert!(matches!(parse_rule("{ color: red }"), Err(SyntaxError::Invalid(_))));
    assert_eq!(
        parse_rule(".a { color: red } .b { color: blue }"),
        Err(SyntaxError::MultipleRules(2))
    );
}

#[test]
fn lenient_stylesheet_drops_broken_rules() {
    let rules = parse_stylesheet(".a { color: red } { broken } .b:hover { color: blue }");
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[1].to_string(), ".b:hover { color: blue; }");
}

#[test]
fn parses_attribute_selectors() {
    let selector = parse_compound_selector(r#"[data-make-styles-bucket="default"]"#).unwrap();
    assert_eq!(selector.tag, None);
    assert_eq!(selector.attributes.len(), 1);
    assert_eq!(selector.attributes[0].name, "data-make-styles-bucket");
    assert_eq!(selector.attributes[0].value.as_deref(), Some("default"));

    let tagged = parse_compound_selector("STYLE[media][data-x=h]").unwrap();
    assert_eq!(tagged.tag.as_deref(), Some("style"));
    assert_eq!(tagged.attributes[0].value, None);
    assert_eq!(tagged.attributes[1].value.as_deref(), Some("h"));
}

#[test]
fn selector_matching_checks_tag_and_values() {
    let selector = parse_compound_selector(r#"style[data-b="h"]"#).unwrap();
    let attrs = [("data-b", "h")];
    let lookup = |name: &str| attrs.iter().find(|(key, _)| *key == name).map(|(_, val)| *val);
    assert!(selector.matches("style", lookup));
    assert!(!selector.matches("div", lookup));

    let other = parse_compound_selector(r#"[data-b="a"]"#).unwrap();
    assert!(!other.matches("style", lookup));
    let presence = parse_compound_selector("[data-b]").unwrap();
    assert!(presence.matches("div", lookup));
    assert!(!presence.matches("div", |_: &str| None));
}

#[test]
fn rejects_unsupported_selectors() {
    for selector in ["div span", ".cls", "#id", "a:hover", "[x~=y]", "[x=\"y\" i]"] {
        assert!(
            matches!(
                parse_compound_selector(selector),
                Err(SyntaxError::UnsupportedSelector(_))
            ),
            "expected {selector} to be rejected"
        );
    }
    assert_eq!(parse_compound_selector(""), Err(SyntaxError::Empty));
}
