//! Library API integration tests
use pith_core::*;

fn get_fixture_path(name: &str) -> String {
    format!("../../tests/fixtures/{}", name)
}

fn read_fixture(name: &str) -> String {
    std::fs::read_to_string(get_fixture_path(name)).unwrap()
}

#[test]
fn test_extract_api() {
    let article = extract(&read_fixture("article.html")).expect("should extract");

    let meta = article.meta();
    assert_eq!(meta.title.as_deref(), Some("Ferris Learns to Swim"));
    assert_eq!(meta.lang.as_deref(), Some("en"));
    assert_eq!(meta.description.as_deref(), Some("A short story about a crab and the sea."));
    assert_eq!(meta.favicon.as_deref(), Some("/favicon.ico"));

    let text = article.text();
    assert!(text.starts_with("Ferris Learns to Swim\n\nFerris had always lived"));
    assert!(text.ends_with("the edge of the world."));
    assert!(!text.contains("Home"));
    assert!(!text.contains("Example Stories"));
}

#[test]
fn test_extract_with_url_resolves_links() {
    let article = extract_with_url(&read_fixture("article.html"), "https://example.com/stories/ferris-swims")
        .expect("should extract");

    assert_eq!(article.meta().favicon.as_deref(), Some("https://example.com/favicon.ico"));
    assert_eq!(article.thumbnail().map(|t| t.src.as_str()), Some("https://example.com/img/ferris.png"));
}

#[test]
fn test_extract_from_reader() {
    let file = std::fs::File::open(get_fixture_path("unicode.html")).unwrap();
    let article = extract_from_reader(file).expect("should extract");

    assert_eq!(article.meta().lang.as_deref(), Some("ja"));
    assert!(article.text().contains("朝の東京はとても静かです"));
    assert!(!article.text().contains("ホーム"));
}

#[test]
fn test_thumbnail_precedes_selected_blocks() {
    let article = extract(&read_fixture("article.html")).unwrap();

    let thumb = article.thumbnail().expect("og:image matches a body image");
    assert_eq!((thumb.width, thumb.height), (Some(640), Some(360)));

    let out = article.output();
    let tags: Vec<_> = out.children(article.body()).filter_map(|c| out.tag(c)).collect();
    assert_eq!(tags, vec!["h1", "img", "p", "p", "p", "p"]);
}

#[test]
fn test_title_appears_once_in_head_and_once_as_heading() {
    let html = format!(
        "<html><head><title>Hello</title></head><body><div><p>{}</p></div></body></html>",
        "Some paragraph text. ".repeat(10)
    );
    let article = extract(&html).unwrap();
    let rendered = article.html().unwrap();

    assert_eq!(rendered.matches("<title>Hello</title>").count(), 1);
    assert_eq!(rendered.matches("<h1>Hello</h1>").count(), 1);
    assert!(rendered.find("<title>Hello</title>") < rendered.find("<body>"));

    let out = article.output();
    let first = out.first_child(article.body()).unwrap();
    assert_eq!(out.tag(first), Some("h1"));
}

#[test]
fn test_region_invariants_on_fixtures() {
    for name in ["article.html", "unicode.html"] {
        let article = extract(&read_fixture(name)).unwrap();
        let region = article.region();

        assert!(region.start <= region.smax && region.smax <= region.end, "{}", name);

        let longest = article.records().iter().map(BlockRecord::len).max().unwrap();
        assert_eq!(article.records()[region.smax].len(), longest);
        assert!(article.records()[..region.smax].iter().all(|r| r.len() < longest));
    }
}

#[test]
fn test_text_conservation_on_fixture() {
    let article = extract(&read_fixture("article.html")).unwrap();
    let cleaned = article.cleaned();
    let body = article.records()[0].block;

    let total: usize = article.records().iter().map(BlockRecord::len).sum();
    assert_eq!(total, cleaned.text_content(body).len());
}

#[test]
fn test_cleaning_leaves_no_boilerplate() {
    let article = extract(&read_fixture("article.html")).unwrap();
    let cleaned = article.cleaned();
    let body = article.records()[0].block;
    let tags = TagSets::standard();

    for id in cleaned.descendants(body) {
        match cleaned.data(id) {
            NodeData::Comment(_) => panic!("comment survived cleaning"),
            NodeData::Element(el) => {
                assert!(!tags.is_ignored(&el.tag), "<{}> survived cleaning", el.tag);
                assert!(el.attr("class").is_none());
            }
            _ => {}
        }
    }
}

#[test]
fn test_custom_leash_widens_region() {
    let html = read_fixture("article.html");

    let narrow = extract(&html).unwrap();
    let wide = Extractor::with_config(
        ExtractConfig::builder().leash(LeashParams::new(0.0, 10.0, 0.0, 40.0).unwrap()).build(),
    )
    .extract(&html)
    .unwrap();

    assert!(wide.region().start <= narrow.region().start);
    assert!(wide.region().end >= narrow.region().end);
    assert!(wide.text().contains("Example Stories"));
}

#[test]
fn test_custom_tags() {
    let html = "<html><body><aside>Sidebar text that is fairly long, long enough to matter.</aside>\
                <p>Main text that is the longest block on this small page by quite a margin, surely.</p></body></html>";
    let tags = TagSets::builder().with(TagClass::Ignore, "aside").build();

    let article = Extractor::with_config(ExtractConfig::builder().tags(tags).build()).extract(html).unwrap();

    assert!(!article.density().contains("Sidebar"));
}

#[test]
fn test_no_body() {
    let result = extract(&read_fixture("frameset.html"));
    assert!(matches!(result, Err(PithError::NoBody)));
}

#[test]
fn test_empty_body() {
    let article = extract("<html><head></head><body></body></html>").unwrap();

    assert_eq!(article.records().len(), 1);
    assert_eq!(article.region().span(), 0..=0);
    assert_eq!(article.text(), "");
    assert_eq!(article.density(), "0 (0) - \n");
}

#[test]
fn test_article_output_formats() {
    let article = extract(&read_fixture("article.html")).unwrap();

    #[cfg(feature = "markdown")]
    {
        let md = article.to_format(OutputFormat::Markdown).unwrap();
        assert!(md.contains("# Ferris Learns to Swim"));
    }

    let json: serde_json::Value = serde_json::from_str(&article.to_format(OutputFormat::Json).unwrap()).unwrap();
    assert!(json.get("meta").is_some());
    assert!(json.get("density").is_some());
    assert!(json.get("content").is_some());

    let html = article.to_format(OutputFormat::Html).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_extractor_is_reusable() {
    let extractor = Extractor::new();
    let first = extractor.extract(&read_fixture("article.html")).unwrap();
    let second = extractor.extract(&read_fixture("article.html")).unwrap();

    assert_eq!(first.html().unwrap(), second.html().unwrap());
}

#[test]
fn test_fetch_file() {
    let html = fetch_file(get_fixture_path("article.html")).unwrap();
    assert!(html.contains("Ferris"));

    let missing = fetch_file(get_fixture_path("missing.html"));
    assert!(matches!(missing, Err(PithError::FileNotFound(_))));
}
