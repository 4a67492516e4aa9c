//! Region insight behavior over the embedded reference tables.

use std::sync::Arc;

use price_insight::reference::ReferenceData;
use price_insight::workflows::insight::{RegionInsightService, TemplateTextGenerator};

fn service() -> RegionInsightService<TemplateTextGenerator> {
    let reference = ReferenceData::embedded().expect("embedded data parses");
    RegionInsightService::new(Arc::new(TemplateTextGenerator), Arc::new(reference))
}

#[test]
fn every_known_outcode_gets_a_distinct_summary() {
    let service = service();
    let reference = ReferenceData::embedded().expect("embedded data parses");

    let mut summaries = Vec::new();
    for record in reference.outcodes() {
        let insight = service.summarize(&record.id).expect("insight");
        assert_eq!(insight.region_code, record.id);
        assert!(insight.summary.contains(&record.name));
        summaries.push(insight.summary);
    }

    summaries.sort();
    summaries.dedup();
    assert_eq!(summaries.len(), reference.outcodes().len());
}

#[test]
fn repeated_calls_are_identical() {
    let service = service();
    let first = service.summarize("SE15").expect("insight");
    let second = service.summarize("SE15").expect("insight");
    assert_eq!(first, second);
    assert!(!first.summary.is_empty());
}
