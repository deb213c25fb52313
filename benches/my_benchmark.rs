use criterion::{criterion_group, criterion_main, Criterion, BenchmarkId};
use rand::{rngs::StdRng, SeedableRng};
use word_salad::{generator::{WordSearchGenerator, WordSearchGeneratorSettings}, word::Word};

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("word_search");

    for size in [10usize, 20, 30]
    {
        let generator = WordSearchGenerator
        {
            words: vec!["Hello", "world", "asdf", "myname", "sesame", "yeeee", "nouyt"].into_iter().map(|s| Word::new(s).unwrap()).collect(),
            settings: WordSearchGeneratorSettings { width: size, height: size, ..Default::default() },
        };

        group.bench_function(BenchmarkId::new("Generate", size),
            |b| 
            {
                let mut rng = StdRng::seed_from_u64(0);
                b.iter(|| generator.generate(&mut rng).unwrap())
            });
    }

    group.finish();

}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
