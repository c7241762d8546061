//! 16-bit move encoding.
//!
//! ```text
//! 15..12      11..6        5..0
//! move kind   from square  to square
//! ```
//!
//! The kind nibble uses flag bits so the generator can compose it cheaply:
//! bit 2 marks a capture, bit 3 a promotion, and for promotions the low two
//! bits select knight, bishop, rook or queen.

use crate::game_state::chess_types::*;
use crate::utils::algebraic::square_name;

/// Packed move: to-square, from-square and kind tag.
pub type Move = u16;

/// Never produced by the generator (a1 to a1).
pub const NULL_MOVE: Move = 0;

const TO_SHIFT: u16 = 0;
const FROM_SHIFT: u16 = 6;
const KIND_SHIFT: u16 = 12;
const SQUARE_MASK: u16 = 0x3F;
const KIND_MASK: u16 = 0xF;

pub const FLAG_CAPTURE: u8 = 0b0100;
pub const FLAG_PROMOTION: u8 = 0b1000;

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Quiet = 0,
    DoublePawnPush = 1,
    KingCastle = 2,
    QueenCastle = 3,
    Capture = 4,
    EnPassant = 5,
    PromoKnight = 8,
    PromoBishop = 9,
    PromoRook = 10,
    PromoQueen = 11,
    PromoCaptureKnight = 12,
    PromoCaptureBishop = 13,
    PromoCaptureRook = 14,
    PromoCaptureQueen = 15,
}

impl MoveKind {
    #[inline]
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            0 => Some(MoveKind::Quiet),
            1 => Some(MoveKind::DoublePawnPush),
            2 => Some(MoveKind::KingCastle),
            3 => Some(MoveKind::QueenCastle),
            4 => Some(MoveKind::Capture),
            5 => Some(MoveKind::EnPassant),
            8 => Some(MoveKind::PromoKnight),
            9 => Some(MoveKind::PromoBishop),
            10 => Some(MoveKind::PromoRook),
            11 => Some(MoveKind::PromoQueen),
            12 => Some(MoveKind::PromoCaptureKnight),
            13 => Some(MoveKind::PromoCaptureBishop),
            14 => Some(MoveKind::PromoCaptureRook),
            15 => Some(MoveKind::PromoCaptureQueen),
            _ => None,
        }
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.bits() & FLAG_CAPTURE != 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.bits() & FLAG_PROMOTION != 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveKind::KingCastle | MoveKind::QueenCastle)
    }

    /// Piece kind a promotion produces; `None` for every other kind.
    #[inline]
    pub const fn promotion_piece_kind(self) -> Option<PieceKind> {
        if !self.is_promotion() {
            return None;
        }
        PieceKind::from_index(PieceKind::Knight.index() + (self.bits() & 0b11) as usize)
    }
}

#[inline]
pub const fn encode_move(from: Square, to: Square, kind: MoveKind) -> Move {
    encode_move_bits(from, to, kind.bits())
}

/// Encode with a raw kind nibble, as composed by the generator from flag bits.
#[inline]
pub const fn encode_move_bits(from: Square, to: Square, kind_bits: u8) -> Move {
    ((to as u16) << TO_SHIFT)
        | ((from as u16) << FROM_SHIFT)
        | (((kind_bits as u16) & KIND_MASK) << KIND_SHIFT)
}

#[inline]
pub const fn move_from(mv: Move) -> Square {
    ((mv >> FROM_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub const fn move_to(mv: Move) -> Square {
    ((mv >> TO_SHIFT) & SQUARE_MASK) as Square
}

#[inline]
pub const fn move_kind_bits(mv: Move) -> u8 {
    ((mv >> KIND_SHIFT) & KIND_MASK) as u8
}

/// Decode the kind tag.
///
/// Tags 6 and 7 are unassigned; a move carrying one did not come from this
/// codec and replaying it would desynchronize the board, so this panics.
#[inline]
pub fn move_kind(mv: Move) -> MoveKind {
    match MoveKind::from_bits(move_kind_bits(mv)) {
        Some(kind) => kind,
        None => panic!(
            "move {mv:#06x} carries unassigned kind tag {}",
            move_kind_bits(mv)
        ),
    }
}

/// Colored piece placed on the destination by a promotion of `color`.
#[inline]
pub fn promoted_piece(kind: MoveKind, color: Color) -> Option<Piece> {
    kind.promotion_piece_kind()
        .map(|piece_kind| make_piece(piece_kind, color))
}

/// Coordinate form, e.g. `e2e4`; promotions append the piece letter (`e7e8q`).
pub fn move_to_long_algebraic(mv: Move) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(square_name(move_from(mv)));
    out.push_str(square_name(move_to(mv)));

    if let Some(kind) = MoveKind::from_bits(move_kind_bits(mv)) {
        if let Some(piece_kind) = kind.promotion_piece_kind() {
            out.push(promotion_char(piece_kind));
        }
    }

    out
}

pub fn promotion_char(piece_kind: PieceKind) -> char {
    match piece_kind {
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        _ => 'q',
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoding_places_fields_in_their_bit_ranges() {
        let mv = encode_move(12, 28, MoveKind::DoublePawnPush);
        assert_eq!(mv & 0x3F, 28);
        assert_eq!((mv >> 6) & 0x3F, 12);
        assert_eq!(mv >> 12, 1);
        assert_eq!(move_from(mv), 12);
        assert_eq!(move_to(mv), 28);
        assert_eq!(move_kind(mv), MoveKind::DoublePawnPush);
    }

    #[test]
    fn promotion_kinds_map_to_pieces() {
        assert_eq!(MoveKind::PromoKnight.promotion_piece_kind(), Some(PieceKind::Knight));
        assert_eq!(MoveKind::PromoBishop.promotion_piece_kind(), Some(PieceKind::Bishop));
        assert_eq!(MoveKind::PromoCaptureRook.promotion_piece_kind(), Some(PieceKind::Rook));
        assert_eq!(MoveKind::PromoCaptureQueen.promotion_piece_kind(), Some(PieceKind::Queen));
        assert_eq!(MoveKind::Capture.promotion_piece_kind(), None);
        assert_eq!(promoted_piece(MoveKind::PromoQueen, Color::Black), Some(B_QUEEN));
        assert_eq!(promoted_piece(MoveKind::PromoCaptureKnight, Color::White), Some(W_KNIGHT));
    }

    #[test]
    fn flag_bits_compose_into_named_kinds() {
        assert_eq!(MoveKind::from_bits(FLAG_CAPTURE), Some(MoveKind::Capture));
        assert_eq!(
            MoveKind::from_bits(FLAG_CAPTURE | MoveKind::EnPassant.bits()),
            Some(MoveKind::EnPassant)
        );
        assert_eq!(
            MoveKind::from_bits(FLAG_PROMOTION | FLAG_CAPTURE | 3),
            Some(MoveKind::PromoCaptureQueen)
        );
        assert!(MoveKind::EnPassant.is_capture());
        assert!(!MoveKind::KingCastle.is_capture());
        assert_eq!(MoveKind::from_bits(6), None);
        assert_eq!(MoveKind::from_bits(7), None);
    }

    #[test]
    #[should_panic(expected = "unassigned kind tag")]
    fn decoding_an_unassigned_tag_panics() {
        let _ = move_kind(encode_move_bits(12, 20, 7));
    }

    #[test]
    fn long_algebraic_text() {
        assert_eq!(move_to_long_algebraic(encode_move(12, 28, MoveKind::DoublePawnPush)), "e2e4");
        assert_eq!(move_to_long_algebraic(encode_move(52, 60, MoveKind::PromoQueen)), "e7e8q");
        assert_eq!(
            move_to_long_algebraic(encode_move(49, 56, MoveKind::PromoCaptureKnight)),
            "b7a8n"
        );
    }
}
