//! Integration tests for mapping profiles and the bundled base models


use contentmap_core::mapping::resolver::MediaUrlResolver;
use contentmap_core::models::{BaseMediaModel, BaseSeoModel, ImageModel};
use contentmap_core::profile::MappingProfile;
use contentmap_core::{
    BaseMappingProfile, ContentMapperFactory, Error, MapperOptions, MappingConfiguration,
    MemoryContent, Source, SourceType, Value,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use test_support::Article;

fn base_factory() -> ContentMapperFactory {
    let configuration = MappingConfiguration::with_profiles(&[&BaseMappingProfile]);
    ContentMapperFactory::with_configuration(configuration, MapperOptions::default())
}

#[test]
fn test_seo_model_from_profile() {
    let content = MemoryContent::builder("landingPage")
        .id(40)
        .name("Spring Sale")
        .property("metaTitle", "Spring Sale | Shop")
        .property("metaDescription", "Everything must go")
        .property("ogImage", Value::Json(json!({ "url": "/media/spring.jpg" })))
        .property("noIndex", "1")
        .build();

    let seo = base_factory()
        .create_mapper::<BaseSeoModel>()
        .map(&Source::from(&content))
        .unwrap();

    assert_eq!(seo.content.id, 40);
    assert_eq!(seo.content.name, "Spring Sale");
    assert_eq!(seo.meta_title.as_deref(), Some("Spring Sale | Shop"));
    assert_eq!(seo.meta_description.as_deref(), Some("Everything must go"));
    assert_eq!(seo.meta_keywords, None);
    assert_eq!(seo.og_image.as_deref(), Some("/media/spring.jpg"));
    assert!(seo.no_index);
}

#[test]
fn test_media_model_from_json_node() {
    let json = r#"{
        "id": 2001,
        "contentTypeAlias": "Image",
        "name": "Harbour",
        "url": "/media/harbour.jpg",
        "properties": {
            "umbracoExtension": "jpg",
            "umbracoBytes": "48213",
            "umbracoWidth": 1920,
            "umbracoHeight": 1080
        }
    }"#;
    let content = MemoryContent::from_json_str(json).unwrap();
    let factory = base_factory();
    let source = Source::from(&content);

    let media = factory.create_mapper::<BaseMediaModel>().map(&source).unwrap();
    assert_eq!(media.id, 2001);
    assert_eq!(media.url, "/media/harbour.jpg");
    assert_eq!(media.extension, "jpg");
    assert_eq!(media.bytes, 48213);
    assert_eq!(media.width, Some(1920));
    assert_eq!(media.height, Some(1080));

    let image = factory.create_mapper::<ImageModel>().map(&source).unwrap();
    assert_eq!(
        image,
        ImageModel {
            src: "/media/harbour.jpg".to_string(),
            alt: "Harbour".to_string(),
            width: Some(1920),
            height: Some(1080),
        }
    );
}

struct ArticleProfile;

impl MappingProfile for ArticleProfile {
    fn configure(&self, configuration: &mut MappingConfiguration) {
        configuration
            .create_map::<Article>(SourceType::PublishedContent)
            .for_member("Title", |m| m.map_from_property("headline"))
            .for_member("Tags", |m| m.resolve_using(MediaUrlResolver::new("unused")))
            .ignore("Rating");
    }
}

#[test]
fn test_custom_profile() {
    let content = MemoryContent::builder("article")
        .property("headline", "Configured")
        .property("title", "Ignored alias")
        .property("rating", 5)
        .build();
    let configuration =
        MappingConfiguration::with_profiles(&[&BaseMappingProfile, &ArticleProfile]);
    assert_eq!(configuration.len(), 4);
    assert_eq!(ArticleProfile.name(), "ArticleProfile");

    let factory = ContentMapperFactory::with_configuration(configuration, MapperOptions::default());
    let article = factory.create_mapper::<Article>().map(&Source::from(&content)).unwrap();

    assert_eq!(article.title, "Configured");
    assert_eq!(article.rating, 0);
    assert!(article.tags.is_empty());
}

#[test]
fn test_auto_map_disabled_uses_configured_members_only() {
    let content = MemoryContent::builder("article")
        .name("Named")
        .property("headline", "Configured")
        .property("featured", true)
        .build();
    let options = MapperOptions {
        auto_map_unmatched_properties: false,
        ..MapperOptions::default()
    };
    let factory = ContentMapperFactory::with_configuration(
        MappingConfiguration::with_profiles(&[&ArticleProfile]),
        options,
    );
    let article = factory.create_mapper::<Article>().map(&Source::from(&content)).unwrap();

    assert_eq!(article.name, "Named");
    assert_eq!(article.title, "Configured");
    assert!(!article.featured);
}

#[test]
fn test_validate_reports_unknown_members() {
    let mut configuration = MappingConfiguration::new();
    configuration
        .create_map::<Article>(SourceType::PublishedContent)
        .for_member("Subtitle", |m| m.map_from_property("subtitle"));

    match configuration.validate() {
        Err(Error::Configuration { validation_errors, .. }) => {
            assert_eq!(validation_errors.len(), 1);
            assert!(validation_errors[0].contains("Subtitle"));
        }
        other => panic!("expected configuration error, got {:?}", other),
    }
}
