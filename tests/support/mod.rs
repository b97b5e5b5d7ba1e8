//! Builders for block stream values
#![allow(dead_code)]

use serde_json::{json, Value};
use tag_balance::blocks::{BlockKind, StreamChild};

pub fn html_embed(code: &str) -> StreamChild {
    StreamChild::new(BlockKind::HtmlEmbed, json!({ "code": code }))
}

pub fn external_link(url: &str, display_text: Option<&str>) -> Value {
    json!({
        "display_text": display_text,
        "external_link": url,
        "internal_link": null,
        "document_link": null,
    })
}

pub fn internal_link(page_id: u64, display_text: &str) -> Value {
    json!({
        "display_text": display_text,
        "external_link": "",
        "internal_link": page_id,
        "document_link": null,
    })
}

pub fn simple_link(display_text: &str, url: &str) -> Value {
    json!({
        "type": "simple_link",
        "value": { "display_text": display_text, "link": url, "image": null },
    })
}

pub fn stream(children: Vec<StreamChild>) -> String {
    serde_json::to_string(&children).expect("serialize stream")
}
