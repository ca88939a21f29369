//! Benchmarks for filter extraction and reply synthesis.
//!
//! Extraction runs once per chat turn and per smart-search keystroke, so
//! it should stay well under a millisecond per utterance.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nyumba_chat::{FilterExtractor, ResponseSynthesizer};

const UTTERANCES: &[&str] = &[
    "2 bedroom apartment in Nairobi under 50k with parking",
    "luxury 3 bed house in Karen between 80k and 120k",
    "studio in Kilimani with wifi and a gym, max 30,000",
    "cheap bedsitter around Kasarani from 8 thousand",
    "hello, can you help me find something?",
    "I want a family home with a big compound, swimming pool, security and a balcony \
     somewhere in Westlands or Kilimani, ideally four bedrooms, budget up to 150k",
];

fn bench_extract(c: &mut Criterion) {
    let extractor = FilterExtractor::new();
    // Compile the lazy patterns outside the measured loop.
    let _ = extractor.extract(UTTERANCES[0]);

    c.bench_function("extract_mixed_utterances", |b| {
        b.iter(|| {
            for u in UTTERANCES {
                black_box(extractor.extract(black_box(u)));
            }
        })
    });
}

fn bench_extract_and_synthesize(c: &mut Criterion) {
    let extractor = FilterExtractor::new();
    let synthesizer = ResponseSynthesizer::new();

    c.bench_function("extract_and_synthesize", |b| {
        b.iter(|| {
            for u in UTTERANCES {
                let filters = extractor.extract(black_box(u));
                black_box(synthesizer.synthesize(&filters, u));
            }
        })
    });
}

criterion_group!(benches, bench_extract, bench_extract_and_synthesize);
criterion_main!(benches);
