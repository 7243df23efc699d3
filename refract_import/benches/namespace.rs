//! Namespace Access Benchmarks
//!
//! Measures the hot paths of the import system:
//!
//! 1. **Passthrough reads**: plain attributes through the lazy facade
//! 2. **Resolved reads**: cached submodule handles through the facade
//! 3. **Cache hits**: repeated imports through the resolver
//! 4. **Name parsing**: dotted-name splitting and validation

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use refract_core::{ModuleObject, Value, intern};
use refract_import::{
    BuiltinRegistry, DottedName, ImportResolver, LazyNamespace, ModuleLoader,
};
use std::sync::Arc;

// =============================================================================
// Benchmark Helpers
// =============================================================================

/// A resolver with "pkg" and three submodules registered.
fn bench_resolver() -> Arc<ImportResolver> {
    let registry = Arc::new(BuiltinRegistry::new());
    for name in ["pkg", "pkg.alpha", "pkg.beta", "pkg.gamma"] {
        registry.register(name, move || ModuleObject::new(name));
    }
    Arc::new(ImportResolver::new(registry as Arc<dyn ModuleLoader>))
}

fn installed_namespace(resolver: &Arc<ImportResolver>) -> Arc<LazyNamespace> {
    let ns =
        LazyNamespace::install(resolver, "pkg", &["alpha", "beta", "gamma"]).unwrap();
    ns.set("VERSION", Value::string(intern("1.0")));
    ns
}

// =============================================================================
// Facade Benchmarks
// =============================================================================

fn bench_facade_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("facade_access");

    group.bench_function("passthrough_attr", |b| {
        let resolver = bench_resolver();
        let ns = installed_namespace(&resolver);

        b.iter(|| black_box(ns.get("VERSION").unwrap()))
    });

    group.bench_function("resolved_submodule", |b| {
        let resolver = bench_resolver();
        let ns = installed_namespace(&resolver);
        // Warm up: resolve once so iterations hit the cached handle.
        let _ = ns.get("alpha").unwrap();

        b.iter(|| black_box(ns.get("alpha").unwrap()))
    });

    group.bench_function("missing_attr_error", |b| {
        let resolver = bench_resolver();
        let ns = installed_namespace(&resolver);

        b.iter(|| black_box(ns.get("delta").is_err()))
    });

    group.finish();
}

// =============================================================================
// Resolver Benchmarks
// =============================================================================

fn bench_resolver_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolver_cache");

    group.bench_function("import_cached_simple", |b| {
        let resolver = bench_resolver();
        let _ = resolver.import_module("pkg").unwrap();

        b.iter(|| black_box(resolver.import_module("pkg").unwrap()))
    });

    group.bench_function("import_cached_dotted", |b| {
        let resolver = bench_resolver();
        let _ = resolver.import_module("pkg.beta").unwrap();

        b.iter(|| black_box(resolver.import_module("pkg.beta").unwrap()))
    });

    group.finish();
}

// =============================================================================
// Name Parsing Benchmarks
// =============================================================================

fn bench_name_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("name_parsing");

    group.bench_function("parse_simple", |b| {
        b.iter(|| black_box(DottedName::parse(black_box("pkg"))))
    });

    group.bench_function("parse_three_parts", |b| {
        b.iter(|| black_box(DottedName::parse(black_box("pkg.sub.leaf"))))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_facade_access,
    bench_resolver_cache,
    bench_name_parsing
);
criterion_main!(benches);
