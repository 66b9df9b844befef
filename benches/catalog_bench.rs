//! Benchmarks for catalog filtering and sorting
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use movie_reviews::catalog::{Category, MovieQuery, SortKey};
use movie_reviews::models::Movie;

const GENRES: [&str; 6] = ["Action", "Drama", "Comedy", "Sci-Fi", "Horror", "Romance"];

fn create_catalog(count: usize) -> Vec<Movie> {
    (0..count)
        .map(|i| Movie {
            imdb_id: format!("tt{:07}", i),
            title: format!("Movie {} {}", (i * 7919) % 1000, GENRES[i % GENRES.len()]),
            poster: None,
            backdrops: Vec::new(),
            genres: vec![
                GENRES[i % GENRES.len()].to_string(),
                GENRES[(i / 3) % GENRES.len()].to_string(),
            ],
            release_date: (i % 10 != 0)
                .then(|| format!("{}-{:02}-{:02}", 1970 + i % 55, 1 + i % 12, 1 + i % 28)),
            trailer_link: None,
            review_ids: Vec::new(),
        })
        .collect()
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [100, 1000, 10000] {
        let movies = create_catalog(size);
        group.throughput(Throughput::Elements(size as u64));

        let query = MovieQuery::new()
            .search("movie 4")
            .category(Category::Genre("Drama".to_string()));

        group.bench_with_input(BenchmarkId::new("search_and_category", size), &movies, |b, movies| {
            b.iter(|| query.filter(black_box(movies)).len())
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");

    for size in [100, 1000, 10000] {
        let movies = create_catalog(size);
        group.throughput(Throughput::Elements(size as u64));

        for sort in [SortKey::Title, SortKey::ReleaseDate] {
            let query = MovieQuery::new().sort(sort);
            group.bench_with_input(BenchmarkId::new(sort.as_str(), size), &movies, |b, movies| {
                b.iter(|| query.apply(black_box(movies)).len())
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_sort);
criterion_main!(benches);
