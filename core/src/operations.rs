//! One routine per operation.
//!
//! Every routine runs after the program counter has already been moved past the
//! instruction, so skips add 2 more and jumps simply overwrite it.

use crate::constants::{ADDRESS_MASK, FLAG_REGISTER, FONT_GLYPH_SIZE};
use crate::error::Chip8Error;
use crate::instruction::Operation;
use crate::keypad::InputSource;
use crate::opcode::Opcode;
use crate::state::State;

pub type Execute = fn(op: u16, state: &mut State, input: &dyn InputSource) -> Result<(), Chip8Error>;

/// Selects the routine for an operation; there is none for `Unsupported`
pub fn routine(operation: Operation) -> Option<Execute> {
    use Operation::*;

    let execute: Execute = match operation {
        Cls => cls,
        Ret => ret,
        Jp => jump,
        Call => call,
        SeByte => ske,
        SneByte => skne,
        SeReg => skre,
        LdByte => load,
        AddByte => add,
        LdReg => mv,
        Or => or,
        And => and,
        Xor => xor,
        AddReg => addr,
        Sub => sub,
        Shr => shr,
        Subn => subn,
        Shl => shl,
        SneReg => skrne,
        LdI => loadi,
        JpV0 => jumpi,
        Rnd => rand,
        Drw => draw,
        Skp => skpr,
        Sknp => skup,
        LdVxDt => moved,
        LdVxK => keyd,
        LdDtVx => loads,
        LdStVx => ld,
        AddI => addi,
        LdF => ldspr,
        LdB => bcd,
        LdIVx => stor,
        LdVxI => read,
        Unsupported => return None,
    };
    Some(execute)
}

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc = state.pc.wrapping_add(0x2);
    }
}

/// clear
pub fn cls(_op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.frame_buffer.clear();
    state.draw_flag = true;
    Ok(())
}

/// PC = STACK.pop()
pub fn ret(_op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.pc = state.stack.pop()?;
    Ok(())
}

/// PC = addr
pub fn jump(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.pc = op.addr();
    Ok(())
}

/// STACK.push(PC); PC = addr
pub fn call(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.stack.push(state.pc)?;
    state.pc = op.addr();
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let condition = state.v[op.x()] == op.kk();
    skip_if(state, condition);
    Ok(())
}

/// if Vx != kk then pc += 2
pub fn skne(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let condition = state.v[op.x()] != op.kk();
    skip_if(state, condition);
    Ok(())
}

/// if Vx == Vy then pc += 2
pub fn skre(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let condition = state.v[op.x()] == state.v[op.y()];
    skip_if(state, condition);
    Ok(())
}

/// Vx = kk
pub fn load(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.v[op.x()] = op.kk();
    Ok(())
}

/// Vx += kk
/// Overflow wraps and VF is left alone
pub fn add(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.v[op.x()].wrapping_add(op.kk());
    Ok(())
}

/// Vx = Vy
pub fn mv(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.v[op.y()];
    Ok(())
}

/// Vx |= Vy
pub fn or(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.v[op.x()] |= state.v[op.y()];
    Ok(())
}

/// Vx &= Vy
pub fn and(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.v[op.x()] &= state.v[op.y()];
    Ok(())
}

/// Vx ^= Vy
pub fn xor(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.v[op.x()] ^= state.v[op.y()];
    Ok(())
}

// The flag setting routines below write Vx first and VF last, so when x is F
// the flag wins.

/// Vx += Vy; VF = overflow
pub fn addr(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let (res, over) = state.v[op.x()].overflowing_add(state.v[op.y()]);
    state.v[op.x()] = res;
    state.v[FLAG_REGISTER] = u8::from(over);
    Ok(())
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vx.wrapping_sub(vy);
    state.v[FLAG_REGISTER] = u8::from(vx > vy);
    Ok(())
}

/// Vx >>= 1; VF = the bit shifted out
pub fn shr(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx >> 1;
    state.v[FLAG_REGISTER] = vx & 0x1;
    Ok(())
}

/// Vx = Vy - Vx; VF = !underflow
pub fn subn(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let (vx, vy) = (state.v[op.x()], state.v[op.y()]);
    state.v[op.x()] = vy.wrapping_sub(vx);
    state.v[FLAG_REGISTER] = u8::from(vy >= vx);
    Ok(())
}

/// Vx <<= 1; VF = the bit shifted out
pub fn shl(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let vx = state.v[op.x()];
    state.v[op.x()] = vx << 1;
    state.v[FLAG_REGISTER] = vx >> 7;
    Ok(())
}

/// if Vx != Vy then pc += 2
pub fn skrne(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let condition = state.v[op.x()] != state.v[op.y()];
    skip_if(state, condition);
    Ok(())
}

/// I = addr
pub fn loadi(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.i = op.addr();
    Ok(())
}

/// PC = V0 + addr
pub fn jumpi(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.pc = (op.addr() + u16::from(state.v[0x0])) & ADDRESS_MASK;
    Ok(())
}

/// Vx = rand_byte & kk
pub fn rand(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let rand_byte: u8 = rand::random();
    state.v[op.x()] = rand_byte & op.kk();
    Ok(())
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n byte sprite at memory I onto the FrameBuffer.
/// VF is set if any pixel was erased, cleared otherwise.
pub fn draw(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let sprite = state.memory.read_range(state.i, op.n() as usize);
    let x = state.v[op.x()] as usize;
    let y = state.v[op.y()] as usize;
    let collision = state.frame_buffer.draw_sprite(x, y, &sprite);
    state.v[FLAG_REGISTER] = u8::from(collision);
    state.draw_flag = true;
    Ok(())
}

/// if Vx.pressed then pc += 2
pub fn skpr(op: u16, state: &mut State, input: &dyn InputSource) -> Result<(), Chip8Error> {
    let condition = input.current_key() == Some(state.v[op.x()]);
    skip_if(state, condition);
    Ok(())
}

/// if !Vx.pressed then pc += 2
pub fn skup(op: u16, state: &mut State, input: &dyn InputSource) -> Result<(), Chip8Error> {
    let condition = input.current_key() != Some(state.v[op.x()]);
    skip_if(state, condition);
    Ok(())
}

/// Vx = DT
pub fn moved(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.v[op.x()] = state.delay_timer;
    Ok(())
}

/// await keypress for Vx
/// The Chip8 stops fetching instructions until the key arrives
pub fn keyd(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.register_needing_key = Some(op.x());
    Ok(())
}

/// DT = Vx
pub fn loads(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.delay_timer = state.v[op.x()];
    Ok(())
}

/// ST = Vx
pub fn ld(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.sound_timer = state.v[op.x()];
    Ok(())
}

/// I += Vx, wrapping within the 12-bit address space
pub fn addi(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.i = (state.i + u16::from(state.v[op.x()])) & ADDRESS_MASK;
    Ok(())
}

/// I = Vx * 5
/// Set I to the memory address of the font glyph for Vx
/// See constants::SPRITE_SHEET for more details
pub fn ldspr(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    state.i = u16::from(state.v[op.x()]) * FONT_GLYPH_SIZE;
    Ok(())
}

/// mem[I..I+3] = bcd(Vx)
/// Store the hundreds, tens and ones of Vx in memory starting at address I
pub fn bcd(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    let vx = state.v[op.x()];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    for (offset, digit) in digits.iter().enumerate() {
        state.memory.write_byte(state.i + offset as u16, *digit);
    }
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    for register in 0..=op.x() {
        state
            .memory
            .write_byte(state.i + register as u16, state.v[register]);
    }
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(op: u16, state: &mut State, _input: &dyn InputSource) -> Result<(), Chip8Error> {
    for register in 0..=op.x() {
        state.v[register] = state.memory.read_byte(state.i + register as u16);
    }
    Ok(())
}
