use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use fixture_mock::resolver::candidate::query_signature;
use fixture_mock::{FixtureRequest, FixtureResolver, HostAliases};
use std::fs;
use tempfile::TempDir;

fn create_fixture_tree(endpoints: usize) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let api = dir.path().join("example.com/api");
    fs::create_dir_all(&api).unwrap();
    for i in 0..endpoints {
        fs::write(api.join(format!("endpoint{i}.mock")), r#"{"data": []}"#).unwrap();
        fs::write(
            api.join(format!("endpoint{i}.query-json.post.mock")),
            r#"{"data": {}}"#,
        )
        .unwrap();
    }
    dir
}

fn bench_resolve(c: &mut Criterion) {
    let tree = create_fixture_tree(100);
    let resolver = FixtureResolver::new(
        tree.path(),
        HostAliases::new().with("foo.bar", "example.com"),
    )
    .unwrap();

    let mut group = c.benchmark_group("resolve");

    let cases = [
        (
            "exact_query_and_method",
            FixtureRequest::new("POST", "example.com", "/api/endpoint50").with_query("query=json"),
        ),
        (
            "fallback_to_bare",
            FixtureRequest::new("PUT", "foo.bar", "/api/endpoint50").with_query("foo=bar"),
        ),
        (
            "not_found",
            FixtureRequest::new("DELETE", "example.com", "/api/missing").with_query("a=1"),
        ),
    ];

    for (name, request) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), request, |b, request| {
            b.iter(|| resolver.resolve(black_box(request)))
        });
    }

    group.finish();
}

fn bench_candidates(c: &mut Criterion) {
    let tree = create_fixture_tree(0);
    let resolver = FixtureResolver::new(tree.path(), HostAliases::new()).unwrap();
    let request = FixtureRequest::new("POST", "example.com", "/api/v1/articles/1/comments")
        .with_query("page[size]=20&page[number]=3&include=author,tags&sort=-created");

    c.bench_function("candidates", |b| {
        b.iter(|| resolver.candidates(black_box(&request)))
    });

    c.bench_function("query_signature", |b| {
        b.iter(|| query_signature(black_box(request.query())))
    });
}

criterion_group!(benches, bench_resolve, bench_candidates);
criterion_main!(benches);
