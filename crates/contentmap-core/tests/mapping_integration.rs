//! End-to-end tests for mapping published content onto models


use contentmap_core::models::{BaseContentModel, BaseElementModel};
use contentmap_core::{
    ContentMapper, Error, MapperOptions, MemoryContent, MemoryElement, ModelPropertyService,
    Source,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use test_support::{Article, Event, TestPage};
use uuid::Uuid;

#[test]
fn test_map_test_page() {
    let content = test_support::test_page();
    let mapper = ContentMapper::<TestPage>::default();

    let page = mapper.map(&Source::from(&content)).expect("testPage should map");
    assert_eq!(page, TestPage { id: 1001, title: "Hello".to_string() });
}

#[test]
fn test_other_content_type_is_rejected() {
    let content = MemoryContent::builder("otherPage")
        .id(1001)
        .property("title", "Hello")
        .build();
    let mapper = ContentMapper::<TestPage>::default();
    let source = Source::from(&content);

    assert!(!mapper.can_map(&source));
    match mapper.map(&source) {
        Err(Error::Ineligible { source_type, destination_type }) => {
            assert_eq!(source_type, "MemoryContent");
            assert_eq!(destination_type, "TestPage");
        }
        other => panic!("expected ineligible error, got {:?}", other),
    }
}

#[test]
fn test_built_in_field_beats_property() {
    let content = MemoryContent::builder("testPage")
        .id(7)
        .property("id", 99)
        .property("title", "Built-in wins")
        .build();

    let page = ContentMapper::<TestPage>::default()
        .map(&Source::from(&content))
        .unwrap();
    assert_eq!(page.id, 7);
}

#[test]
fn test_failed_member_does_not_affect_others() {
    let content = MemoryContent::builder("article")
        .name("Launch")
        .property("title", "We shipped")
        .property("rating", "not-a-number")
        .property("featured", "yes")
        .property("tags", vec!["news", "release"])
        .build();

    let article = ContentMapper::<Article>::default()
        .map(&Source::from(&content))
        .unwrap();

    assert_eq!(
        article,
        Article {
            name: "Launch".to_string(),
            title: "We shipped".to_string(),
            rating: 0,
            featured: true,
            tags: vec!["news".to_string(), "release".to_string()],
        }
    );
}

#[test]
fn test_missing_and_null_properties_keep_defaults() {
    let json = r#"{
        "id": 12,
        "contentTypeAlias": "article",
        "name": "Draft",
        "properties": { "title": null, "rating": 4 }
    }"#;
    let content = MemoryContent::from_json_str(json).unwrap();

    let article = ContentMapper::<Article>::default()
        .map(&Source::from(&content))
        .unwrap();
    assert_eq!(article.name, "Draft");
    assert_eq!(article.title, "");
    assert_eq!(article.rating, 4);
    assert!(article.tags.is_empty());
}

#[test]
fn test_registry_fallback_splits_tags() {
    let content = MemoryContent::builder("article")
        .property("tags", "rust,cms,,mapping")
        .build();
    let source = Source::from(&content);

    let without = ContentMapper::<Article>::default().map(&source).unwrap();
    assert!(without.tags.is_empty());

    let with = test_support::mapper_with_options::<Article>(test_support::registry_options())
        .map(&source)
        .unwrap();
    assert_eq!(with.tags, vec!["rust", "cms", "mapping"]);
}

#[test]
fn test_registry_clears_unparsable_optional_date() {
    let mapper = test_support::mapper_with_options::<Event>(test_support::registry_options());

    let garbage = MemoryContent::builder("event").property("starts", "garbage").build();
    let event = mapper.map(&Source::from(&garbage)).unwrap();
    assert_eq!(event.starts, None);

    let valid = MemoryContent::builder("event")
        .property("starts", "2024-05-06T01:02:03")
        .build();
    let event = mapper.map(&Source::from(&valid)).unwrap();
    assert_eq!(
        event.starts.map(|dt| dt.format("%Y-%m-%dT%H:%M:%S").to_string()),
        Some("2024-05-06T01:02:03".to_string())
    );
}

#[test]
fn test_base_content_model_reads_every_built_in() {
    let key = Uuid::new_v4();
    let content = MemoryContent::builder("homePage")
        .id(1)
        .key(key)
        .name("Home")
        .url("/")
        .absolute_url("https://example.com/")
        .level(1)
        .sort_order(3)
        .template_id(Some(1050))
        .build();

    let model = ContentMapper::<BaseContentModel>::default()
        .map(&Source::from(&content))
        .unwrap();

    assert_eq!(model.id, 1);
    assert_eq!(model.key, key);
    assert_eq!(model.content_type_alias, "homePage");
    assert_eq!(model.url, "/");
    assert_eq!(model.absolute_url, "https://example.com/");
    assert_eq!(model.level, 1);
    assert_eq!(model.sort_order, 3);
    assert!(model.is_visible);
    assert_eq!(model.template_id, Some(1050));
}

#[test]
fn test_element_source() {
    let key = Uuid::new_v4();
    let element = MemoryElement::new("heroBlock", key).with_property("title", "Hero");
    let source = Source::element(&element);

    let model = ContentMapper::<BaseElementModel>::default().map(&source).unwrap();
    assert_eq!(model.key, key);
    assert_eq!(model.content_type_alias, "heroBlock");

    // content models do not accept elements
    assert!(ContentMapper::<BaseContentModel>::default().map(&source).unwrap_err().is_ineligible());
}

#[test]
fn test_property_cache_is_stable() {
    let service = ModelPropertyService::new();
    let first = service.get_properties::<Article>();
    let second = service.get_properties::<Article>();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(service.cached_types(), 1);

    let names: Vec<_> = first.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Name", "Title", "Rating", "Featured", "Tags"]);
}

#[test]
fn test_uncached_service_recomputes() {
    let options = MapperOptions {
        enable_property_cache: false,
        ..MapperOptions::default()
    };
    let mapper = test_support::mapper_with_options::<TestPage>(options);
    let page = mapper.map(&Source::from(&test_support::test_page())).unwrap();

    assert_eq!(page.title, "Hello");
}

#[test]
fn test_mapper_is_shareable_across_threads() {
    let mapper = Arc::new(ContentMapper::<TestPage>::default());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let mapper = Arc::clone(&mapper);
            std::thread::spawn(move || {
                let content = MemoryContent::builder("testPage")
                    .id(i)
                    .property("title", format!("Page {}", i))
                    .build();
                mapper.map(&Source::from(&content)).unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let page = handle.join().unwrap();
        assert_eq!(page.id, i as i32);
        assert_eq!(page.title, format!("Page {}", i));
    }
}
