//! Integration tests for runtime mapper lookup


use contentmap_core::models::BaseContentModel;
use contentmap_core::{ContentMapperFactory, Error, Source};
use pretty_assertions::assert_eq;
use std::any::TypeId;
use test_support::TestPage;

fn factory() -> ContentMapperFactory {
    let mut factory = ContentMapperFactory::default();
    factory.register::<TestPage>().register::<BaseContentModel>();
    factory
}

#[test]
fn test_map_by_model_name() {
    let content = test_support::test_page();
    let mapper = factory().create_mapper_for_name("TestPage").unwrap();

    let model = mapper.map(&Source::from(&content)).unwrap();
    let page = model.downcast::<TestPage>().expect("mapper builds TestPage");
    assert_eq!(*page, TestPage { id: 1001, title: "Hello".to_string() });
}

#[test]
fn test_runtime_mapper_keeps_eligibility() {
    let content = contentmap_core::MemoryContent::builder("blogPost").build();
    let mapper = factory().create_mapper_for_type(TypeId::of::<TestPage>()).unwrap();

    assert!(!mapper.can_map(&Source::from(&content)));
    assert!(matches!(
        mapper.map(&Source::from(&content)),
        Err(Error::Ineligible { .. })
    ));
}

#[test]
fn test_mappers_share_services() {
    let factory = factory();
    let content = test_support::test_page();
    let source = Source::from(&content);

    factory.create_mapper::<TestPage>().map(&source).unwrap();
    factory.create_mapper_for_name("BaseContentModel").unwrap().map(&source).unwrap();

    assert_eq!(factory.property_mapper().property_service().cached_types(), 2);
}

#[test]
fn test_unknown_model_name() {
    match factory().create_mapper_for_name("Unknown") {
        Err(Error::Configuration { message, .. }) => assert!(message.contains("Unknown")),
        Err(other) => panic!("unexpected error: {}", other),
        Ok(_) => panic!("Unknown is not registered"),
    }
}
