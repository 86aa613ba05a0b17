use annotext_engine::{Cmd, Editor, Point, Range};
use criterion::{Criterion, criterion_group, criterion_main};
mod common;

fn bench_command_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("commands");
    group.sample_size(10);

    let editor = Editor::new(common::generate_document(100));

    group.bench_function("insert_command", |b| {
        let mut e = editor.clone();
        e.select(Some(Range::caret(Point::new(50, 10))));
        b.iter(|| {
            let cmd = Cmd::InsertText {
                text: std::hint::black_box("test".to_string()),
            };
            let patch = e.apply(cmd);
            std::hint::black_box(patch);
        });
    });

    group.bench_function("split_block_command", |b| {
        let mut e = editor.clone();
        b.iter(|| {
            e.select(Some(Range::caret(Point::new(50, 10))));
            let patch = e.apply(Cmd::SplitBlock);
            std::hint::black_box(patch);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_command_operations);
criterion_main!(benches);
