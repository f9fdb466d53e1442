//! Benchmarks for sitemap rendering.

use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use smap_config::{GlobalSitemapOptions, SectionDescriptor, SectionSource, SitemapConfig};
use smap_render::Sitemap;
use smap_store::{Item, ItemOrderBy, MemoryStore};

/// Build a page tree with the given depth and breadth.
fn create_page_tree(depth: usize, breadth: usize) -> MemoryStore {
    fn create_level(
        store: &mut MemoryStore,
        next_id: &mut u64,
        parent: Option<u64>,
        current_depth: usize,
        max_depth: usize,
        breadth: usize,
    ) {
        if current_depth > max_depth {
            return;
        }

        for i in 0..breadth {
            let id = *next_id;
            *next_id += 1;
            let mut item = Item::new(id, format!("Page {current_depth}-{i}"))
                .with_url(format!("/page-{id}/"))
                .with_menu_order(i64::try_from(i).unwrap());
            if let Some(parent) = parent {
                item = item.with_parent(parent);
            }
            store.insert_item("page", item);
            create_level(store, next_id, Some(id), current_depth + 1, max_depth, breadth);
        }
    }

    let mut store = MemoryStore::new().with_content_type("page", "Pages");
    let mut next_id = 1;
    create_level(&mut store, &mut next_id, None, 0, depth, breadth);
    store
}

fn page_section(hierarchical: bool, max_depth: usize) -> SitemapConfig {
    SitemapConfig {
        sections: vec![SectionDescriptor {
            source: SectionSource::ContentType {
                name: "page".to_owned(),
                order_by: ItemOrderBy::MenuOrder,
            },
            hierarchical,
            max_depth,
            ..SectionDescriptor::default()
        }],
        options: GlobalSitemapOptions::default(),
    }
}

fn bench_render_modes(c: &mut Criterion) {
    let sitemap = Sitemap::new(Arc::new(create_page_tree(4, 4)));

    let mut group = c.benchmark_group("render_modes");

    group.bench_function("flat", |b| b.iter(|| sitemap.render(&page_section(false, 0))));

    group.bench_function("hierarchical", |b| {
        b.iter(|| sitemap.render(&page_section(true, 0)))
    });

    group.bench_function("hierarchical_depth_2", |b| {
        b.iter(|| sitemap.render(&page_section(true, 2)))
    });

    group.finish();
}

fn bench_render_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_scaling");

    for breadth in [2, 4, 8] {
        let sitemap = Sitemap::new(Arc::new(create_page_tree(3, breadth)));
        let config = page_section(true, 0);
        group.bench_with_input(BenchmarkId::from_parameter(breadth), &config, |b, config| {
            b.iter(|| sitemap.render(config));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_modes, bench_render_scaling);
criterion_main!(benches);
