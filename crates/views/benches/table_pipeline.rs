use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use tradedesk_core::DateRange;
use tradedesk_purchasing::PurchaseOrder;
use tradedesk_views::ResourceTable;

fn orders(n: usize) -> Vec<PurchaseOrder> {
    let suppliers = ["Rehan Steel", "Ali Cement", "Bilal & Sons", "Chaudhry Bros"];
    (0..n)
        .map(|i| {
            serde_json::from_value(serde_json::json!({
                "_id": format!("po{i}"),
                "supplier": suppliers[i % suppliers.len()],
                "product": format!("Item {}", i % 97),
                "quantity": (i % 50) + 1,
                "price": (i * 37) % 1000,
                "orderDate": format!("2024-{:02}-{:02}", (i % 12) + 1, (i % 28) + 1),
            }))
            .unwrap()
        })
        .collect()
}

fn bench_table_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_pipeline");

    for size in [100usize, 1_000, 10_000] {
        let mut table: ResourceTable<PurchaseOrder> = ResourceTable::new(10);
        table.set_records(orders(size));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("search_only", size), &size, |b, _| {
            table.set_search("steel");
            table.set_sort(None);
            table.set_date_range(DateRange::default());
            b.iter(|| black_box(table.page_rows().len()));
        });

        group.bench_with_input(
            BenchmarkId::new("search_dates_sorted", size),
            &size,
            |b, _| {
                table.set_search("item");
                table.set_date_range(DateRange::parse("2024-03-01", "2024-09-30").unwrap());
                table.toggle_sort("total");
                b.iter(|| black_box(table.page_rows().len()));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_table_pipeline);
criterion_main!(benches);
