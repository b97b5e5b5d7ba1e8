//! Block streams as stored in a page body
mod support;

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use support::{external_link, html_embed, internal_link, simple_link, stream};
use tag_balance::blocks::{
    parse_stream, validate_block, validate_stream, BlockError, BlockKind, StreamChild,
};
use tag_balance::profile::Profile;

fn page_body() -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("page_body.json");
    fs::read_to_string(path).expect("read page body fixture")
}

#[test]
fn test_page_body_fixture() {
    let children = parse_stream(&page_body()).expect("parse page body");
    assert_eq!(children.len(), 5);
    assert_eq!(children[0].id.as_deref(), Some("5f1c3a"));

    let errors = validate_stream(&children, &Profile::strict());
    let rejected: Vec<(usize, &str)> = errors
        .iter()
        .map(|e| (e.index, e.block_type.as_str()))
        .collect();
    assert_eq!(
        rejected,
        vec![(1, "two_column_html_embed"), (4, "external_content_embed")]
    );

    let table = errors[0].error.fields().expect("field errors");
    assert_eq!(
        table.get("code").unwrap(),
        ["one or more tags were never closed: table"]
    );

    let embed = errors[1].error.fields().expect("field errors");
    assert_eq!(
        embed.get("url").unwrap(),
        ["Enter a valid URL starting with https://"]
    );
    assert_eq!(
        embed.get("aspect_ratio").unwrap(),
        ["Ensure this value is less than or equal to 3.0."]
    );
}

#[test]
fn test_html_embed_round_trip_through_json() {
    let json = stream(vec![
        html_embed("<div>Test html code</div>"),
        html_embed("<div><span>x</div></span>"),
    ]);
    let children = parse_stream(&json).expect("parse stream");

    let errors = validate_stream(&children, &Profile::strict());
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].to_string(),
        "block 1 (html_embed): Code validation error: code: expected closing tag for 'span', got 'div' (line 1, column 13)"
    );
}

#[test]
fn test_profile_applies_to_html_fields() {
    let child = html_embed("<p>Call us<br>today</p>");

    assert!(validate_block(&child, &Profile::strict()).is_err());
    assert!(validate_block(&child, &Profile::html5()).is_ok());
}

#[test]
fn test_link_block_rules() {
    let strict = Profile::strict();

    let ok = StreamChild::new(BlockKind::LinkBlock, internal_link(7, "About us"));
    assert!(validate_block(&ok, &strict).is_ok());

    let no_text = StreamChild::new(
        BlockKind::LinkBlock,
        external_link("https://example.com", None),
    );
    let err = validate_block(&no_text, &strict).unwrap_err();
    assert_eq!(
        err.fields().unwrap().get("display_text").unwrap(),
        ["Display text is required if using an external link"]
    );
    assert!(err.to_string().starts_with("Link block validation error: "));

    let empty = StreamChild::new(BlockKind::LinkBlock, json!({}));
    assert!(validate_block(&empty, &strict).is_ok());
}

#[test]
fn test_sidebar_links_are_required() {
    let child = StreamChild::new(
        BlockKind::SidebarLink,
        json!({
            "title": "Resources",
            "links": [internal_link(3, "Annual report"), {"display_text": ""}]
        }),
    );
    let err = validate_block(&child, &Profile::strict()).unwrap_err();
    let fields: Vec<&str> = err.fields().unwrap().fields().collect();

    assert_eq!(
        fields,
        vec![
            "links.1.document_link",
            "links.1.external_link",
            "links.1.internal_link"
        ]
    );
}

#[test]
fn test_columnated_links_minimum() {
    let one = StreamChild::new(
        BlockKind::ColumnatedLinks,
        json!({ "title": "Find out more", "links": [simple_link("Blog", "/blog")] }),
    );
    let err = validate_block(&one, &Profile::strict()).unwrap_err();
    assert_eq!(
        err.fields().unwrap().get("links").unwrap(),
        ["The minimum number of items is 2"]
    );

    let two = StreamChild::new(
        BlockKind::ColumnatedLinks,
        json!({
            "links": [simple_link("Blog", "/blog"), simple_link("News", "/news")],
            "cta_button": external_link("https://example.com/give", Some("Give"))
        }),
    );
    assert!(validate_block(&two, &Profile::strict()).is_ok());
}

#[test]
fn test_full_hero_checks_video_and_buttons() {
    let child = StreamChild::new(
        BlockKind::FullHero,
        json!({
            "image": 12,
            "heading": "Together we can",
            "video_code": "<iframe src=\"https://video.example.com/1\">",
            "cta_buttons": [
                {"type": "cta_button", "value": internal_link(1, "Join")},
                {
                    "type": "cta_button",
                    "value": {"internal_link": 1, "document_link": 2, "display_text": "Both"}
                }
            ]
        }),
    );
    let err = validate_block(&child, &Profile::strict()).unwrap_err();
    let fields = err.fields().unwrap();

    assert_eq!(
        fields.get("video_code").unwrap(),
        ["one or more tags were never closed: iframe"]
    );
    assert!(fields.contains("cta_buttons.1.internal_link"));
    assert!(fields.contains("cta_buttons.1.document_link"));
    assert!(!fields.contains("cta_buttons.0.internal_link"));
}

#[test]
fn test_tile_needs_exactly_one_link() {
    let child = StreamChild::new(
        BlockKind::Tile,
        json!({
            "title": "Volunteer",
            "link_block": {"internal_link": 4, "external_link": "https://example.com"}
        }),
    );
    let err = validate_block(&child, &Profile::strict()).unwrap_err();

    assert_eq!(
        err.fields().unwrap().get("link.external_link").unwrap(),
        ["Must provide exactly one link type"]
    );
}

#[test]
fn test_malformed_block_value() {
    let child = StreamChild::new(BlockKind::ExternalContentEmbed, json!({"aspect_ratio": "wide"}));
    let err = validate_block(&child, &Profile::strict()).unwrap_err();

    assert!(matches!(
        err,
        BlockError::Malformed { ref block_type, .. } if block_type == "external_content_embed"
    ));
}

#[test]
fn test_zero_aspect_ratio_is_out_of_range() {
    let child = StreamChild::new(
        BlockKind::ExternalContentEmbed,
        json!({"url": "https://example.com/x", "aspect_ratio": 0}),
    );
    let err = validate_block(&child, &Profile::strict()).unwrap_err();

    assert_eq!(
        err.fields().unwrap().get("aspect_ratio").unwrap(),
        ["Ensure this value is greater than or equal to 0.05."]
    );

    let unset = StreamChild::new(
        BlockKind::ExternalContentEmbed,
        json!({"url": "https://example.com/x", "aspect_ratio": null}),
    );
    assert!(validate_block(&unset, &Profile::strict()).is_ok());
}
