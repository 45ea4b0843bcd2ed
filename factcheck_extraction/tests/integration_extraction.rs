//! Corpus-to-claims run over a small synthetic corpus.

use factcheck_corpus::build_record;
use factcheck_extraction::{CategorizerConfig, CategoryExtractor, ClaimStructurer};

fn corpus() -> Vec<factcheck_core::CorpusRecord> {
    let templates = [
        ("{}'s birth place is Warsaw.", "1.0"),
        ("Paris is {}'s death place.", "0.0"),
        ("{}'s award is Nobel Prize.", "1.0"),
    ];
    let names = ["Marie Curie", "Pierre Curie", "Irene Curie", "Eve Curie"];

    let mut records = Vec::new();
    for round in 0..4 {
        for (t, (template, label)) in templates.iter().enumerate() {
            for name in names {
                let id = format!("{round}-{t}-{name}");
                let text = template.replace("{}", name);
                records.push(build_record(&id, Some((*label).to_string()), &text));
            }
        }
    }
    records
}

#[test]
fn categories_drive_structuring() {
    let records = corpus();
    let config = CategorizerConfig {
        promotion_threshold: 10,
        ..CategorizerConfig::default()
    };
    let categories = CategoryExtractor::new(config).extract(&records);

    assert!(categories.contains(&"birth place".to_string()));
    assert!(categories.contains(&"award".to_string()));
    assert!(!categories.contains(&"place".to_string()));
    assert!(!categories.contains(&"birth".to_string()));

    let claims = ClaimStructurer::new(categories.clone()).structure(&records);
    assert!(!claims.is_empty());
    for claim in &claims {
        assert!(categories.contains(&claim.category));
        assert!(claim.text.contains(claim.category.as_str()));
    }

    let birth = claims
        .iter()
        .find(|c| c.category == "birth place")
        .map(|c| (c.entity.as_str(), c.related_entity.as_str()));
    assert_eq!(birth, Some(("Marie Curie ", "Warsaw")));
}

#[test]
fn extraction_is_deterministic() {
    let records = corpus();
    let extractor = CategoryExtractor::with_defaults();
    assert_eq!(extractor.extract(&records), extractor.extract(&records));
}
