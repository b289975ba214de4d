use core::fmt;

use super::{DOM, DOMNode, NodeKind};
use indextree::NodeId;

use serde_json::{Map, Value, json};

// -----------------------
// Module-scope helpers
// -----------------------

fn flush_text(children: &mut Vec<Value>, text_buf: &mut String) {
    if !text_buf.trim().is_empty() {
        children.push(json!({ "type": "text", "text": text_buf.clone() }));
    }
    text_buf.clear();
}

fn push_non_null(children: &mut Vec<Value>, value: Value) {
    if !value.is_null() {
        children.push(value);
    }
}

fn coalesce_children(dom: &DOM, id: NodeId) -> Vec<Value> {
    let mut children: Vec<Value> = Vec::new();
    let mut text_buf = String::new();
    for child in id.children(&dom.dom) {
        let Some(child_ref) = dom.dom.get(child) else {
            continue;
        };
        if let NodeKind::Text { text } = &child_ref.get().kind {
            text_buf.push_str(text);
            continue;
        }
        flush_text(&mut children, &mut text_buf);
        push_non_null(&mut children, node_to_json(dom, child));
    }
    flush_text(&mut children, &mut text_buf);
    children
}

fn sorted_attrs(node: &DOMNode) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = node.attrs.iter().cloned().collect();
    pairs.sort_by(|left, right| left.0.cmp(&right.0));
    pairs
}

fn node_to_json(dom: &DOM, id: NodeId) -> Value {
    let Some(node_ref) = dom.dom.get(id) else {
        return Value::Null;
    };
    let node = node_ref.get();
    match &node.kind {
        NodeKind::Document => json!({ "type": "document", "children": coalesce_children(dom, id) }),
        NodeKind::Element { tag } => {
            let mut attrs_obj = Map::new();
            for (key, value) in sorted_attrs(node) {
                attrs_obj.insert(key, Value::String(value));
            }
            let mut element = json!({
                "type": "element",
                "tag": tag,
                "attrs": Value::Object(attrs_obj),
                "children": coalesce_children(dom, id),
            });
            if let Some(sheet) = &node.sheet
                && let Some(object) = element.as_object_mut()
            {
                let rules: Vec<Value> = sheet
                    .css_rules()
                    .iter()
                    .map(|rule| Value::String(rule.to_string()))
                    .collect();
                object.insert(String::from("rules"), Value::Array(rules));
            }
            element
        }
        NodeKind::Text { text } => {
            if text.trim().is_empty() {
                Value::Null
            } else {
                json!({ "type": "text", "text": text })
            }
        }
    }
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
    out
}

fn write_indent(formatter: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        formatter.write_str("  ")?;
    }
    Ok(())
}

fn fmt_node(
    dom: &DOM,
    id: NodeId,
    formatter: &mut fmt::Formatter<'_>,
    depth: usize,
) -> fmt::Result {
    let Some(node_ref) = dom.dom.get(id) else {
        return Ok(());
    };
    let node = node_ref.get();
    match &node.kind {
        NodeKind::Document => {
            write_indent(formatter, depth)?;
            writeln!(formatter, "#document")?;
        }
        NodeKind::Element { tag } => {
            write_indent(formatter, depth)?;
            write!(formatter, "<{tag}")?;
            for (key, value) in sorted_attrs(node) {
                write!(formatter, " {key}=\"{}\"", escape_text(&value))?;
            }
            writeln!(formatter, ">")?;
            if let Some(sheet) = &node.sheet {
                for rule in sheet.css_rules() {
                    write_indent(formatter, depth + 1)?;
                    writeln!(formatter, "{rule}")?;
                }
            }
        }
        NodeKind::Text { text } => {
            // Skip pure-whitespace text nodes in the printer for cleaner output
            if text.chars().all(char::is_whitespace) {
                return Ok(());
            }
            write_indent(formatter, depth)?;
            writeln!(formatter, "\"{}\"", escape_text(text))?;
            return Ok(());
        }
    }
    for child in id.children(&dom.dom) {
        fmt_node(dom, child, formatter, depth + 1)?;
    }
    if let NodeKind::Element { tag } = &node.kind {
        write_indent(formatter, depth)?;
        writeln!(formatter, "</{tag}>")?;
    }
    Ok(())
}

impl fmt::Debug for DOM {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(formatter, "DOM")?;
        fmt_node(self, self.root, formatter, 0)
    }
}

impl DOM {
    /// Build a deterministic JSON representation of the DOM.
    /// Schema:
    /// - Document: { "type":"document", "children":[ ... ] }
    /// - Element: { "type":"element", "tag": "style", "attrs": {..}, "children":[ ... ], "rules": [..] }
    /// - Text: { "type":"text", "text":"..." }
    ///
    /// `rules` is only present on `<style>` elements.
    pub fn to_json_value(&self) -> Value {
        node_to_json(self, self.root)
    }

    /// Pretty JSON string for snapshots and test comparisons.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string_pretty(&self.to_json_value()).unwrap_or_else(|_| String::from("{}"))
    }
}
