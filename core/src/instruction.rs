use std::fmt;

use crate::opcode::Opcode;

/// Every operation in the Chip-8 instruction set, plus a catch-all for encodings outside it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    /// `00E0` clear the screen
    Cls,
    /// `00EE` return from a subroutine
    Ret,
    /// `1nnn` jump to nnn
    Jp,
    /// `2nnn` call the subroutine at nnn
    Call,
    /// `3xkk` skip if Vx == kk
    SeByte,
    /// `4xkk` skip if Vx != kk
    SneByte,
    /// `5xy0` skip if Vx == Vy
    SeReg,
    /// `6xkk` Vx = kk
    LdByte,
    /// `7xkk` Vx += kk
    AddByte,
    /// `8xy0` Vx = Vy
    LdReg,
    /// `8xy1` Vx |= Vy
    Or,
    /// `8xy2` Vx &= Vy
    And,
    /// `8xy3` Vx ^= Vy
    Xor,
    /// `8xy4` Vx += Vy with carry
    AddReg,
    /// `8xy5` Vx -= Vy with no-borrow
    Sub,
    /// `8xy6` Vx >>= 1
    Shr,
    /// `8xy7` Vx = Vy - Vx with no-borrow
    Subn,
    /// `8xyE` Vx <<= 1
    Shl,
    /// `9xy0` skip if Vx != Vy
    SneReg,
    /// `Annn` I = nnn
    LdI,
    /// `Bnnn` jump to nnn + V0
    JpV0,
    /// `Cxkk` Vx = random & kk
    Rnd,
    /// `Dxyn` draw an n row sprite from I at (Vx, Vy)
    Drw,
    /// `Ex9E` skip if the key Vx is pressed
    Skp,
    /// `ExA1` skip if the key Vx isn't pressed
    Sknp,
    /// `Fx07` Vx = delay timer
    LdVxDt,
    /// `Fx0A` wait for a key and store it in Vx
    LdVxK,
    /// `Fx15` delay timer = Vx
    LdDtVx,
    /// `Fx18` sound timer = Vx
    LdStVx,
    /// `Fx1E` I += Vx
    AddI,
    /// `Fx29` I = address of the font glyph for Vx
    LdF,
    /// `Fx33` store the decimal digits of Vx at I..I+3
    LdB,
    /// `Fx55` store V0..=Vx at I..
    LdIVx,
    /// `Fx65` read V0..=Vx from I..
    LdVxI,
    Unsupported,
}

/// A decoded instruction: what it does and the raw encoding its operands come from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub operation: Operation,
    pub raw: u16,
}

/// Classifies a raw instruction. Never fails; unknown encodings are `Operation::Unsupported`.
pub fn decode(raw: u16) -> Instruction {
    use Operation::*;

    let operation = match raw {
        0x00E0 => Cls,
        0x00EE => Ret,
        _ => match raw.nibbles() {
            (0x1, ..) => Jp,
            (0x2, ..) => Call,
            (0x3, ..) => SeByte,
            (0x4, ..) => SneByte,
            (0x5, ..) => SeReg,
            (0x6, ..) => LdByte,
            (0x7, ..) => AddByte,
            (0x8, .., 0x0) => LdReg,
            (0x8, .., 0x1) => Or,
            (0x8, .., 0x2) => And,
            (0x8, .., 0x3) => Xor,
            (0x8, .., 0x4) => AddReg,
            (0x8, .., 0x5) => Sub,
            (0x8, .., 0x6) => Shr,
            (0x8, .., 0x7) => Subn,
            (0x8, .., 0xE) => Shl,
            (0x9, ..) => SneReg,
            (0xA, ..) => LdI,
            (0xB, ..) => JpV0,
            (0xC, ..) => Rnd,
            (0xD, ..) => Drw,
            (0xE, _, 0x9, 0xE) => Skp,
            (0xE, _, 0xA, 0x1) => Sknp,
            (0xF, _, 0x0, 0x7) => LdVxDt,
            (0xF, _, 0x0, 0xA) => LdVxK,
            (0xF, _, 0x1, 0x5) => LdDtVx,
            (0xF, _, 0x1, 0x8) => LdStVx,
            (0xF, _, 0x1, 0xE) => AddI,
            (0xF, _, 0x2, 0x9) => LdF,
            (0xF, _, 0x3, 0x3) => LdB,
            (0xF, _, 0x5, 0x5) => LdIVx,
            (0xF, _, 0x6, 0x5) => LdVxI,
            _ => Unsupported,
        },
    };

    Instruction { operation, raw }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Operation::*;

        let op = self.raw;
        match self.operation {
            Cls => write!(f, "CLS"),
            Ret => write!(f, "RET"),
            Jp => write!(f, "JP {:#05X}", op.addr()),
            Call => write!(f, "CALL {:#05X}", op.addr()),
            SeByte => write!(f, "SE V{:X}, {:#04X}", op.x(), op.kk()),
            SneByte => write!(f, "SNE V{:X}, {:#04X}", op.x(), op.kk()),
            SeReg => write!(f, "SE V{:X}, V{:X}", op.x(), op.y()),
            LdByte => write!(f, "LD V{:X}, {:#04X}", op.x(), op.kk()),
            AddByte => write!(f, "ADD V{:X}, {:#04X}", op.x(), op.kk()),
            LdReg => write!(f, "LD V{:X}, V{:X}", op.x(), op.y()),
            Or => write!(f, "OR V{:X}, V{:X}", op.x(), op.y()),
            And => write!(f, "AND V{:X}, V{:X}", op.x(), op.y()),
            Xor => write!(f, "XOR V{:X}, V{:X}", op.x(), op.y()),
            AddReg => write!(f, "ADD V{:X}, V{:X}", op.x(), op.y()),
            Sub => write!(f, "SUB V{:X}, V{:X}", op.x(), op.y()),
            Shr => write!(f, "SHR V{:X}", op.x()),
            Subn => write!(f, "SUBN V{:X}, V{:X}", op.x(), op.y()),
            Shl => write!(f, "SHL V{:X}", op.x()),
            SneReg => write!(f, "SNE V{:X}, V{:X}", op.x(), op.y()),
            LdI => write!(f, "LD I, {:#05X}", op.addr()),
            JpV0 => write!(f, "JP V0, {:#05X}", op.addr()),
            Rnd => write!(f, "RND V{:X}, {:#04X}", op.x(), op.kk()),
            Drw => write!(f, "DRW V{:X}, V{:X}, {}", op.x(), op.y(), op.n()),
            Skp => write!(f, "SKP V{:X}", op.x()),
            Sknp => write!(f, "SKNP V{:X}", op.x()),
            LdVxDt => write!(f, "LD V{:X}, DT", op.x()),
            LdVxK => write!(f, "LD V{:X}, K", op.x()),
            LdDtVx => write!(f, "LD DT, V{:X}", op.x()),
            LdStVx => write!(f, "LD ST, V{:X}", op.x()),
            AddI => write!(f, "ADD I, V{:X}", op.x()),
            LdF => write!(f, "LD F, V{:X}", op.x()),
            LdB => write!(f, "LD B, V{:X}", op.x()),
            LdIVx => write!(f, "LD [I], V{:X}", op.x()),
            LdVxI => write!(f, "LD V{:X}, [I]", op.x()),
            Unsupported => write!(f, "??? {:#06X}", op),
        }
    }
}
