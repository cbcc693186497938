mod common;

use oralis_core::models::intake::Language;
use oralis_core::models::section::SectionId;
use oralis_core::models::selection::Tone;
use oralis_pipeline::{ContentRepository, InMemoryRepository, RepositoryError};

use common::*;

#[tokio::test]
async fn tone_variant_is_preferred_over_default() {
    let repository = InMemoryRepository::new(library());

    let empathic = repository
        .get_content("B_SUMMARY_GENERAL", Tone::Empathic, Language::En)
        .await
        .unwrap()
        .expect("summary exists");
    assert!(empathic.starts_with("Thank you for taking the time"));

    let neutral = repository
        .get_content("B_SUMMARY_GENERAL", Tone::Neutral, Language::En)
        .await
        .unwrap()
        .expect("summary exists");
    assert!(neutral.starts_with("Based on your answers"));
}

#[tokio::test]
async fn unknown_block_and_missing_language_are_absent() {
    let repository = InMemoryRepository::new(library());

    assert_eq!(
        repository
            .get_content("NO_SUCH_BLOCK", Tone::Neutral, Language::En)
            .await
            .unwrap(),
        None
    );
    assert_eq!(
        repository
            .get_content("B_INTRO_GENERAL", Tone::Neutral, Language::Nl)
            .await
            .unwrap(),
        None
    );
}

#[tokio::test]
async fn scenario_sections_are_keyed_by_section_number() {
    let repository = InMemoryRepository::new(library());

    let bundle = repository
        .get_scenario_sections("S01", Tone::Neutral, Language::En)
        .await
        .unwrap()
        .expect("S01 bundle");
    assert_eq!(bundle.scenario_id, "S01");
    assert!(bundle.text(SectionId::PERSONAL_SUMMARY).is_some());
    assert!(bundle.text(SectionId::SITUATION).is_none());

    assert!(
        repository
            .get_scenario_sections("S99", Tone::Neutral, Language::En)
            .await
            .unwrap()
            .is_none()
    );
}

#[test]
fn demo_library_covers_every_catalog_block() {
    let catalog = catalog();
    let library = library();
    let content = catalog.content();

    let ids = content
        .warnings
        .iter()
        .map(|r| r.target.block_id.as_str())
        .chain(content.blocks.iter().map(|r| r.target.block_id.as_str()))
        .chain(content.modules.iter().map(|r| r.target.block_id.as_str()))
        .chain(content.statics.iter().map(|s| s.block_id.as_str()))
        .chain(
            catalog
                .scenarios()
                .iter()
                .flat_map(|s| s.nuance_blocks.iter().chain(&s.cost_blocks))
                .map(String::as_str),
        );
    for id in ids {
        assert!(library.blocks.contains_key(id), "no demo text for {id}");
    }
    for scenario in catalog.scenarios() {
        assert!(
            library.scenarios.contains_key(&scenario.id),
            "no demo bundle for {}",
            scenario.id
        );
    }
}

#[test]
fn malformed_library_is_a_serialization_error() {
    let err = InMemoryRepository::from_json(r#"{ "blocks": [] }"#).unwrap_err();
    assert!(matches!(err, RepositoryError::Serialization(_)));
}

#[test]
fn missing_library_file_is_an_io_error() {
    let err = InMemoryRepository::load(std::path::Path::new("/nonexistent/content.json")).unwrap_err();
    assert!(matches!(err, RepositoryError::Io(_)));
}
