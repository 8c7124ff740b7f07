use std::time::Instant;

use crate::aggregator::Aggregate;
use crate::contract::SearchResults;
use crate::model::{NoteRef, TagRef};
use crate::selection::SelectionCursor;
use crate::snippet::highlighted_snippet;

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

#[test]
fn cursor_step_on_large_list_p95_under_15ms() {
    let notes: Vec<NoteRef> = (0..8_000)
        .map(|i| NoteRef::new(i, &format!("Note {i:05}")))
        .collect();
    let tags: Vec<TagRef> = (0..2_000)
        .map(|i| TagRef::new(i, &format!("tag-{i}")))
        .collect();
    let aggregate = Aggregate::from_results(&SearchResults::new(notes, tags));
    let active = aggregate.active_list();

    let mut cursor = SelectionCursor::new();
    cursor.reseed(active);
    cursor.retreat(active);
    cursor.retreat(active);

    let mut batch_p95 = Vec::with_capacity(5);
    for _ in 0..5 {
        let mut samples = Vec::with_capacity(80);
        for _ in 0..80 {
            let start = Instant::now();
            cursor.advance(active);
            cursor.retreat(active);
            samples.push(start.elapsed().as_secs_f64() * 1000.0);
        }
        batch_p95.push(p95_ms(&mut samples));
    }

    batch_p95.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let median_p95 = batch_p95[batch_p95.len() / 2];

    assert!(
        median_p95 <= 15.0,
        "median batch p95 too high: {median_p95:.3}ms (budget 15.0ms); batches={batch_p95:?}",
    );
}

#[test]
fn snippet_on_long_content_p95_under_15ms() {
    let content = format!(
        "{}<mark>needle</mark>{}",
        "lorem ipsum ".repeat(2_000),
        " dolor sit".repeat(2_000)
    );

    let mut samples = Vec::with_capacity(200);
    for _ in 0..200 {
        let start = Instant::now();
        let snippet = highlighted_snippet(&content);
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
        assert!(snippet.contains("<mark>needle</mark>"));
    }

    let p95 = p95_ms(&mut samples);
    assert!(p95 <= 15.0, "snippet p95 too high: {p95:.3}ms (budget 15.0ms)");
}
