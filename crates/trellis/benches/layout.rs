use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use trellis::{Dim, Expanse, Pos, Result, TermBuf, Tree, ViewId};

/// A root holding `rows` x `cols` bordered cells chained by sibling
/// references, so every layout pass sorts a dense dependency graph.
fn grid(rows: usize, cols: usize) -> Result<(Tree, ViewId)> {
    let mut t = Tree::new();
    let root = t.new_view();
    t.set_width(root, Dim::fill())?;
    t.set_height(root, Dim::fill())?;
    let mut above: Vec<Option<ViewId>> = vec![None; cols];
    for _ in 0..rows {
        let mut left: Option<ViewId> = None;
        for slot in above.iter_mut() {
            let v = t.new_view();
            t.add(root, v)?;
            t.set_x(v, left.map_or(Pos::Absolute(0), |l| Pos::right(l) - 1))?;
            t.set_y(v, slot.map_or(Pos::Absolute(0), |a| Pos::bottom(a) - 1))?;
            t.set_width(v, Dim::percent(100 / cols as i32) + 1)?;
            t.set_height(v, 4)?;
            t.set_border(v, None)?;
            t.set_superview_renders_line_canvas(v, true)?;
            t.set_text(v, "cell")?;
            left = Some(v);
            *slot = Some(v);
        }
    }
    Ok((t, root))
}

fn benchmark_layout(c: &mut Criterion) {
    c.bench_function("layout_grid_20x10", |b| {
        b.iter(|| {
            let (mut t, root) = grid(20, 10).expect("Failed to build grid");
            t.layout(root, black_box(Expanse::new(200, 80)))
                .expect("Failed to lay out");
        })
    });

    c.bench_function("draw_grid_20x10", |b| {
        let (mut t, root) = grid(20, 10).expect("Failed to build grid");
        let size = Expanse::new(200, 80);
        t.layout(root, size).expect("Failed to lay out");
        let mut tb = TermBuf::empty(size);
        b.iter(|| {
            t.set_needs_display(root).expect("Failed to mark");
            t.draw(root, Some(&mut tb)).expect("Failed to draw");
            black_box(&tb);
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = benchmark_layout
}
criterion_main!(benches);
