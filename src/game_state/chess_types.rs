//! Flat value types shared by every layer of the board core.
//!
//! Squares, pieces and moves are plain integers so the hot paths never touch
//! the heap. A `Piece` is `kind * 2 + color`, which keeps both halves
//! recoverable with a shift and a mask.

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        if index & 1 == 0 {
            Color::White
        } else {
            Color::Black
        }
    }
}

/// Piece kind without color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PieceKind::Pawn),
            1 => Some(PieceKind::Knight),
            2 => Some(PieceKind::Bishop),
            3 => Some(PieceKind::Rook),
            4 => Some(PieceKind::Queen),
            5 => Some(PieceKind::King),
            _ => None,
        }
    }
}

pub const ALL_PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

/// Board square index (`0 == a1`, `63 == h8`).
pub type Square = u8;

/// Set of squares, one bit per square.
pub type Bitboard = u64;

/// Colored piece identity: `kind * 2 + color`.
pub type Piece = u8;

pub const W_PAWN: Piece = 0;
pub const B_PAWN: Piece = 1;
pub const W_KNIGHT: Piece = 2;
pub const B_KNIGHT: Piece = 3;
pub const W_BISHOP: Piece = 4;
pub const B_BISHOP: Piece = 5;
pub const W_ROOK: Piece = 6;
pub const B_ROOK: Piece = 7;
pub const W_QUEEN: Piece = 8;
pub const B_QUEEN: Piece = 9;
pub const W_KING: Piece = 10;
pub const B_KING: Piece = 11;

/// Mailbox sentinel for an empty square.
pub const NO_PIECE: Piece = 12;

pub const PIECE_COUNT: usize = 12;

#[inline]
pub const fn make_piece(kind: PieceKind, color: Color) -> Piece {
    (kind.index() * 2 + color.index()) as Piece
}

#[inline]
pub const fn piece_color(piece: Piece) -> Color {
    Color::from_index(piece as usize)
}

#[inline]
pub const fn piece_kind(piece: Piece) -> Option<PieceKind> {
    PieceKind::from_index((piece >> 1) as usize)
}

/// Castling right bits, one per (side, wing).
pub type CastlingRights = u8;
pub const CASTLE_WHITE_QUEENSIDE: CastlingRights = 0b0001;
pub const CASTLE_WHITE_KINGSIDE: CastlingRights = 0b0010;
pub const CASTLE_BLACK_QUEENSIDE: CastlingRights = 0b0100;
pub const CASTLE_BLACK_KINGSIDE: CastlingRights = 0b1000;
pub const CASTLE_ALL: CastlingRights = 0b1111;

pub const A1: Square = 0;
pub const B1: Square = 1;
pub const C1: Square = 2;
pub const D1: Square = 3;
pub const E1: Square = 4;
pub const F1: Square = 5;
pub const G1: Square = 6;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const B8: Square = 57;
pub const C8: Square = 58;
pub const D8: Square = 59;
pub const E8: Square = 60;
pub const F8: Square = 61;
pub const G8: Square = 62;
pub const H8: Square = 63;

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;

pub const RANK_1: Bitboard = 0x0000_0000_0000_00FF;
pub const RANK_2: Bitboard = RANK_1 << 8;
pub const RANK_7: Bitboard = RANK_1 << 48;
pub const RANK_8: Bitboard = RANK_1 << 56;

#[inline]
pub const fn square_bb(square: Square) -> Bitboard {
    1u64 << square
}
