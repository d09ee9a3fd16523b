use castellan::{movegen, Board, Color, Coord};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const BOARDS: [(&str, &str); 8] = [
    (
        "initial",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "sicilian",
        "r1b1k2r/2qnbppp/p2ppn2/1p4B1/3NPPP1/2N2Q2/PPP4P/2KR1B1R w kq - 0 11",
    ),
    (
        "middle",
        "1rq1r1k1/1p3ppp/pB3n2/3ppP2/Pbb1P3/1PN2B2/2P2QPP/R1R4K w - - 1 21",
    ),
    (
        "open_position",
        "4r1k1/3R1ppp/8/5P2/p7/6PP/4pK2/1rN1B3 w - - 4 43",
    ),
    ("queen", "6K1/8/8/1k3q2/3Q4/8/8/8 w - - 0 1"),
    (
        "pawn_promote",
        "8/PPPPPPPP/8/2k1K3/8/8/pppppppp/8 w - - 0 1",
    ),
    ("mated", "rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3"),
    (
        "max",
        "3Q4/1Q4Q1/4Q3/2Q4R/Q4Q2/3Q4/NR4Q1/kN1BB1K1 w - - 0 1",
    ),
];

fn boards() -> impl Iterator<Item = (&'static str, Board)> {
    BOARDS
        .iter()
        .map(|&(name, fen)| (name, Board::from_fen(fen).unwrap()))
}

fn bench_legal_moves(c: &mut Criterion) {
    let mut group = c.benchmark_group("legal_moves");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(board.legal_moves(board.side()).len()))
        });
    }
}

fn bench_attempt_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("attempt_move");
    for (name, board) in boards() {
        let moves = board.legal_moves(board.side());
        group.bench_function(name, |b| {
            b.iter(|| {
                for mv in &moves {
                    let mut copy = board.clone();
                    black_box(copy.attempt_move(mv.src(), mv.dst()).is_ok());
                }
            })
        });
    }
}

fn bench_is_valid_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_valid_move");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for src in Coord::iter() {
                    if board.get(src).is_none() {
                        continue;
                    }
                    for dst in Coord::iter() {
                        black_box(board.is_valid_move(src, dst));
                    }
                }
            })
        });
    }
}

fn bench_is_attacked(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_attacked");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| {
                for color in [Color::White, Color::Black] {
                    for coord in Coord::iter() {
                        black_box(movegen::is_cell_attacked(board.raw(), coord, color));
                    }
                }
            })
        });
    }
}

fn bench_is_check(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_check");
    for (name, board) in boards() {
        group.bench_function(name, |b| b.iter(|| black_box(board.is_check(board.side()))));
    }
}

fn bench_is_checkmate(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_checkmate");
    for (name, board) in boards() {
        group.bench_function(name, |b| {
            b.iter(|| black_box(board.is_checkmate(board.side())))
        });
    }
}

criterion_group!(
    chess,
    bench_legal_moves,
    bench_attempt_move,
    bench_is_valid_move,
    bench_is_attacked,
    bench_is_check,
    bench_is_checkmate,
);

criterion_main!(chess);
