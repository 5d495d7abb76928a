//! End-to-end tests over the public pipeline functions.

use chrono::NaiveDate;
use folio_document::folio_meta::{FrontMatter, parse_front_matter};
use folio_document::folio_renderer::render_to_html;
use folio_document::folio_sections::{Section, parse_sections};
use folio_document::{DocumentOptions, parse_document, render_document};
use folio_storage::{MockStorage, Storage, StorageError};
use pretty_assertions::assert_eq;

const DEMO: &str = "---\ntitle: Demo\n---\n# Intro\nSee [here](http://x).\n## Details\n* a\n* b";

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 31).unwrap()
}

#[test]
fn test_front_matter_defaults() {
    let meta = parse_front_matter("");
    assert_eq!(meta.title, "Untitled");
    assert_eq!(meta.description, "");
    assert_eq!(meta.category, "Uncategorized");
    assert_eq!(meta.date.len(), "YYYY-MM-DD".len());
}

#[test]
fn test_front_matter_override_keeps_other_defaults() {
    let meta = FrontMatter::parse_with_date("---\ntitle: Foo\ncustom: bar\n---\nbody", day());
    assert_eq!(meta.title, "Foo");
    assert_eq!(meta.get("custom"), Some("bar"));
    assert_eq!(meta.description, "");
    assert_eq!(meta.category, "Uncategorized");
    assert_eq!(meta.date, "2025-01-31");
}

#[test]
fn test_section_order_and_boundaries() {
    assert_eq!(
        parse_sections("# A\nhello\n## B\nworld"),
        vec![
            Section {
                id: "a".to_owned(),
                title: "A".to_owned(),
                level: 1,
                content: "# A\nhello".to_owned(),
            },
            Section {
                id: "b".to_owned(),
                title: "B".to_owned(),
                level: 2,
                content: "## B\nworld".to_owned(),
            },
        ]
    );
}

#[test]
fn test_no_headings_no_sections() {
    assert!(parse_sections("just text, no headings").is_empty());
}

#[test]
fn test_emphasis_not_double_wrapped() {
    let html = render_to_html("**bold** and *italic*");
    assert_eq!(html.matches("<strong>bold</strong>").count(), 1);
    assert_eq!(html.matches("<em>italic</em>").count(), 1);
    assert_eq!(render_to_html(&html), html);
}

#[test]
fn test_list_grouping() {
    let html = render_to_html("* one\n* two\n* three");
    assert_eq!(html.matches("<ul>").count(), 1);
    assert_eq!(html.matches("<li>").count(), 3);
}

#[test]
fn test_image_is_not_a_link() {
    let html = render_to_html("![alt](img.png)");
    assert!(html.contains(r#"<img src="img.png" alt="alt">"#));
    assert!(!html.contains("<a"));
}

#[test]
fn test_admonition_typing() {
    let warning = render_to_html("> [!WARNING]\n> text");
    let note = render_to_html("> [!NOTE]\n> text");
    let tip = render_to_html("> [!TIP]\n> text");
    assert!(warning.contains("note-warning"));
    assert!(note.contains("note-info"));
    assert!(tip.contains("note-tip"));
    assert_ne!(warning, note);
    assert_ne!(warning, tip);
}

#[test]
fn test_demo_document() {
    let parsed = parse_document(DEMO);
    assert_eq!(parsed.front_matter.title, "Demo");
    let ids: Vec<&str> = parsed.sections.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["intro", "details"]);

    let rendered = render_document(DEMO, &DocumentOptions::default().with_today(day()));
    assert_eq!(
        rendered.html.matches(r#"<a href="http://x">here</a>"#).count(),
        1
    );
    assert_eq!(rendered.html.matches("<ul>").count(), 1);
    assert_eq!(rendered.html.matches("<li>").count(), 2);
    assert_eq!(
        rendered.html,
        "<h1 id=\"intro\">Intro</h1>\n<p>See <a href=\"http://x\">here</a>.</p>\n<h2 id=\"details\">Details</h2>\n<ul><li>a</li><li>b</li></ul>"
    );
    assert_eq!(rendered.sections, parsed.sections);
}

#[test]
fn test_headings_in_code_agree_between_sections_and_html() {
    let body = "# Real\n```sh\n# comment, not a heading\n```\n## Also real";
    let rendered = render_document(body, &DocumentOptions::default().with_today(day()));
    assert_eq!(rendered.sections.len(), 2);
    assert_eq!(rendered.html.matches("<h").count(), 2);
}

#[test]
fn test_untrusted_post_is_escaped() {
    let options = DocumentOptions {
        escape_html: true,
        ..Default::default()
    }
    .with_today(day());
    let rendered = render_document("# Hi\n<img src=x onerror=alert(1)>", &options);
    assert!(!rendered.html.contains("<img"));
    assert!(rendered.html.contains("&lt;img src=x onerror=alert(1)&gt;"));
}

#[test]
fn test_rendering_from_storage() {
    let storage = MockStorage::new().with_post("demo", DEMO);

    let raw = storage.read("demo").unwrap();
    let rendered = render_document(&raw, &DocumentOptions::default().with_today(day()));
    assert_eq!(rendered.front_matter.title, "Demo");

    assert!(matches!(
        storage.read("missing"),
        Err(StorageError::NotFound(_))
    ));
}
