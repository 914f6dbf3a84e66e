use layout::{BoardConfig, Canvas, LayoutEngine, PackState, Rgb, Tiling, Viewport};

#[derive(Debug, PartialEq)]
enum Op {
    Clear(Rgb),
    Fill(Vec<(i32, i32)>, Rgb),
    Glyph(i32, i32, u32),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl Canvas for Recorder {
    fn clear(&mut self, color: Rgb) {
        self.ops.push(Op::Clear(color));
    }

    fn fill_polygon(&mut self, points: &[(i32, i32)], color: Rgb) {
        self.ops.push(Op::Fill(points.to_vec(), color));
    }

    fn draw_glyph(&mut self, x: i32, y: i32, size: u32) {
        self.ops.push(Op::Glyph(x, y, size));
    }
}

impl Recorder {
    fn fills(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Fill(..))).count()
    }

    fn glyphs(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, Op::Glyph(..))).count()
    }
}

#[test]
fn repaint_before_layout_only_clears() {
    let engine = LayoutEngine::new();
    let mut canvas = Recorder::default();
    engine.render(&mut canvas);
    assert_eq!(canvas.ops, vec![Op::Clear([0, 0, 0])]);
}

#[test]
fn unresolvable_layout_only_clears() {
    let mut engine = LayoutEngine::with_config(&BoardConfig {
        board_count: 100,
        ..BoardConfig::default()
    });
    engine.resize(Viewport::new(10, 10));
    let mut canvas = Recorder::default();
    engine.render(&mut canvas);
    assert_eq!(canvas.ops, vec![Op::Clear([0, 0, 0])]);
}

#[test]
fn chessboard_frame_fills_every_cell_once() {
    let mut engine = LayoutEngine::with_config(&BoardConfig::default());
    engine.resize(Viewport::new(800, 600));
    let mut canvas = Recorder::default();
    engine.render(&mut canvas);

    assert_eq!(canvas.ops[0], Op::Clear([0, 0, 0]));
    assert_eq!(canvas.fills(), 64);
    assert_eq!(
        canvas.ops[1],
        Op::Fill(vec![(104, 4), (178, 4), (178, 78), (104, 78)], [128, 64, 32])
    );
    // Glyph follows the fill of the cell it sits on.
    assert_eq!(canvas.ops[2], Op::Glyph(115, 15, 52));

    let frame = engine.frame().unwrap();
    let expected = frame.boards[0]
        .cells
        .iter()
        .filter(|c| c.glyph.overlay)
        .count();
    assert_eq!(canvas.glyphs(), expected);
}

#[test]
fn every_board_is_drawn_inside_the_viewport() {
    let vp = Viewport::new(1024, 700);
    let mut engine = LayoutEngine::with_config(&BoardConfig {
        board_count: 7,
        tiling: Tiling::Hex { x: 3, y: 3, z: 3 },
        rotation: 0.3,
        ..BoardConfig::default()
    });
    engine.resize(vp);
    assert!(matches!(engine.packing(), PackState::Ready(_)));

    let frame = engine.frame().unwrap();
    assert_eq!(frame.boards.len(), 7);
    for board in &frame.boards {
        for cell in &board.cells {
            for &(x, y) in &cell.polygon {
                assert!((0..=1024).contains(&x), "x {x} out of viewport");
                assert!((0..=700).contains(&y), "y {y} out of viewport");
            }
        }
    }
}

#[test]
fn boards_differ_only_by_translation() {
    let mut engine = LayoutEngine::with_config(&BoardConfig {
        board_count: 3,
        rotation: 1.1,
        ..BoardConfig::default()
    });
    engine.resize(Viewport::new(900, 300));
    let frame = engine.frame().unwrap();
    let first = &frame.boards[0].cells;
    for board in &frame.boards[1..] {
        let (x0, y0) = first[0].polygon[0];
        let (x1, y1) = board.cells[0].polygon[0];
        let (sx, sy) = (x1 - x0, y1 - y0);
        for (a, b) in first.iter().zip(&board.cells) {
            for (&(ax, ay), &(bx, by)) in a.polygon.iter().zip(&b.polygon) {
                assert!((bx - ax - sx).abs() <= 1);
                assert!((by - ay - sy).abs() <= 1);
            }
        }
    }
}

#[test]
fn zero_boards_render_nothing() {
    let mut engine = LayoutEngine::with_config(&BoardConfig {
        board_count: 0,
        ..BoardConfig::default()
    });
    engine.resize(Viewport::new(800, 600));
    assert_eq!(engine.packing(), &PackState::Empty);
    let mut canvas = Recorder::default();
    engine.render(&mut canvas);
    assert_eq!(canvas.fills(), 0);
}
