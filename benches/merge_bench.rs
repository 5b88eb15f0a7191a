use criterion::{black_box, criterion_group, criterion_main, Criterion};

use readpair_con::example_gen::generate_read_pair;
use readpair_con::merge::ReadMerger;
use readpair_con::read::ConfidenceSequence;

pub fn bench_merge(c: &mut Criterion) {
    let seq_lens = [300, 800];
    let error_rates = [0.0, 0.01, 0.05];

    let mut benchmark_group = c.benchmark_group("merge-group");
    benchmark_group.sample_size(10);

    let merger = ReadMerger::default();
    for &sl in seq_lens.iter() {
        for &er in error_rates.iter() {
            let (_template, read1, read2) = generate_read_pair(0, sl, er).unwrap();
            let test_label = format!("merge_{sl}_{er}");
            benchmark_group.bench_function(&test_label, |b| b.iter(|| {
                black_box(merger.merge(&read1, &read2).unwrap())
            }));
        }
    }

    // many independent pairs at once
    let pairs: Vec<(ConfidenceSequence, ConfidenceSequence)> = (0..64)
        .map(|seed| {
            let (_template, read1, read2) = generate_read_pair(seed, 500, 0.01).unwrap();
            (read1, read2)
        })
        .collect();
    benchmark_group.bench_function("merge_batch_64x500", |b| b.iter(|| {
        black_box(merger.merge_batch(&pairs))
    }));

    benchmark_group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
