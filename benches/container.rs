#![allow(dead_code)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::sync::Arc;
use wirebox::{
    demo::{wiring::indexed_container, BoxStrategy, ConsoleLogger},
    Container, Inject, Lifetime, Registration, RegistryBuilder,
};

struct A(Arc<B>, Arc<C>);
struct B(i32);
struct C(Arc<CA>);
struct CA(Arc<CAA>);
struct CAA(Arc<CAAA>);
struct CAAA(Arc<CAAAA>);
struct CAAAA(Arc<CAAAAA>);
struct CAAAAA;

fn registry(lifetime: Lifetime) -> RegistryBuilder {
    RegistryBuilder::new()
        .provide(|| Ok(CAAAAA), lifetime)
        .unwrap()
        .provide(|Inject(caaaaa): Inject<CAAAAA>| Ok(CAAAA(caaaaa)), lifetime)
        .unwrap()
        .provide(|Inject(caaaa): Inject<CAAAA>| Ok(CAAA(caaaa)), lifetime)
        .unwrap()
        .provide(|Inject(caaa): Inject<CAAA>| Ok(CAA(caaa)), lifetime)
        .unwrap()
        .provide(|Inject(caa): Inject<CAA>| Ok(CA(caa)), lifetime)
        .unwrap()
        .provide(|Inject(ca): Inject<CA>| Ok(C(ca)), lifetime)
        .unwrap()
        .provide(|| Ok(B(2)), lifetime)
        .unwrap()
        .register(
            Registration::constructor(|Inject(b): Inject<B>, Inject(c): Inject<C>| Ok(A(b, c)))
                .lifetime(lifetime)
                .finalizer(|_: Arc<A>| {}),
        )
        .unwrap()
}

#[inline]
fn container_resolve(container: &Container) {
    let _ = container.resolve::<A>().unwrap();
}

#[inline]
fn container_dispose(container: &Container) {
    let _ = container.resolve::<A>().unwrap();

    container.dispose();
}

fn criterion_benchmark(c: &mut Criterion) {
    let singletons = Container::new(registry(Lifetime::Singleton));
    let transients = Container::new(registry(Lifetime::Transient));
    let app = indexed_container(Box::new(ConsoleLogger)).unwrap();

    c.bench_function("container_new", |b| b.iter(|| Container::new(registry(Lifetime::Singleton))))
        .bench_function("container_resolve_singleton_cached", |b| b.iter(|| container_resolve(&singletons)))
        .bench_function("container_resolve_transient", |b| b.iter(|| container_resolve(&transients)))
        .bench_function("container_dispose", |b| b.iter(|| container_dispose(&singletons)))
        .bench_function("container_try_resolve_keyed", |b| {
            b.iter(|| {
                let _ = app.try_resolve_keyed::<BoxStrategy>("StrategyA").unwrap();
            })
        });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
