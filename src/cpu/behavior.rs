// (c) 2023 John A. Breaux
// This code is licensed under MIT license (see LICENSE for details)

//! Contains implementations for each Chip-8 instruction, and the tables that
//! dispatch to them

use super::*;
use crate::error::Error;

/// An instruction handler. Reads its operands from the current [Opcode].
type Handler<'a> = fn(&mut Engine<'a>) -> Result<()>;

impl<'a> Engine<'a> {
    /// Instruction families, indexed by the upper nibble of the opcode
    #[rustfmt::skip]
    pub(super) const FAMILIES: [Handler<'a>; 16] = [
        Self::special,          Self::jump,
        Self::call,             Self::skip_equals_immediate,
        Self::skip_not_equals_immediate, Self::skip_equals,
        Self::load_immediate,   Self::add_immediate,
        Self::arithmetic,       Self::skip_not_equals,
        Self::load_i_immediate, Self::jump_indexed,
        Self::rand,             Self::draw,
        Self::key,              Self::advanced,
    ];

    /// ALU operations, indexed by the low nibble of an `8xyn` opcode.
    /// `8xyE` is folded onto the last entry.
    #[rustfmt::skip]
    pub(super) const ALU: [Handler<'a>; 9] = [
        Self::load,  Self::or,         Self::and,
        Self::xor,   Self::add,        Self::sub,
        Self::shift_right, Self::backwards_sub, Self::shift_left,
    ];
}

// Operand helpers
impl Engine<'_> {
    #[inline(always)]
    fn x(&self) -> Reg {
        self.cpu.opcode.x()
    }
    #[inline(always)]
    fn y(&self) -> Reg {
        self.cpu.opcode.y()
    }
    #[inline(always)]
    fn vx(&self) -> u8 {
        self.state.v[self.x()]
    }
    #[inline(always)]
    fn vy(&self) -> u8 {
        self.state.v[self.y()]
    }
    #[inline(always)]
    fn set_vx(&mut self, value: u8) {
        let x = self.x();
        self.state.v[x] = value;
    }
    #[inline(always)]
    fn set_vf(&mut self, value: u8) {
        self.state.v[0xf] = value;
    }
    #[inline(always)]
    fn skip(&mut self) {
        self.state.pc = self.state.pc.wrapping_add(2);
    }
    fn unknown(&self) -> Result<()> {
        let word = self.cpu.opcode.word();
        log::warn!("{:03x}: unknown opcode {word:04x}", self.state.pc.wrapping_sub(2));
        Err(Error::UnknownOpcode { word })
    }
}

/// |`0nnn`| Issues a "System call" (ML routine)
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`00e0`| Clear screen memory to all 0       |
/// |`00ee`| Return from subroutine             |
/// |`0nnn`| Ignored                            |
impl Engine<'_> {
    fn special(&mut self) -> Result<()> {
        match self.cpu.opcode.addr() {
            0x0e0 => self.clear_screen(),
            0x0ee => self.ret(),
            _ => self.sys(),
        }
        Ok(())
    }
    /// |`00e0`| Clears the screen memory to 0
    #[inline(always)]
    pub(super) fn clear_screen(&mut self) {
        self.screen.reset();
    }
    /// |`00ee`| Returns from subroutine
    ///
    /// # Panics
    /// On stack underflow.
    #[inline(always)]
    pub(super) fn ret(&mut self) {
        self.state.sp = self.state.sp.wrapping_sub(1);
        self.state.pc = self.state.stack[self.state.sp as usize];
    }
    /// |`0nnn`| Would run native code on the host machine. Does nothing.
    #[inline(always)]
    pub(super) fn sys(&mut self) {}
}

/// |`1aaa`| Sets pc to an absolute address
impl Engine<'_> {
    /// |`1aaa`| Sets the program counter to an absolute address
    #[inline(always)]
    fn jump(&mut self) -> Result<()> {
        self.state.pc = self.cpu.opcode.addr();
        Ok(())
    }
}

/// |`2aaa`| Pushes pc onto the stack, then jumps to a
impl Engine<'_> {
    /// |`2aaa`| Pushes pc onto the stack, then jumps to a
    ///
    /// # Panics
    /// On stack overflow.
    #[inline(always)]
    fn call(&mut self) -> Result<()> {
        self.state.stack[self.state.sp as usize] = self.state.pc;
        self.state.sp += 1;
        self.state.pc = self.cpu.opcode.addr();
        Ok(())
    }
}

/// |`3xbb`| Skips next instruction if register X == b
impl Engine<'_> {
    /// |`3xbb`| Skips the next instruction if register X == b
    #[inline(always)]
    fn skip_equals_immediate(&mut self) -> Result<()> {
        if self.vx() == self.cpu.opcode.imm() {
            self.skip();
        }
        Ok(())
    }
}

/// |`4xbb`| Skips next instruction if register X != b
impl Engine<'_> {
    /// |`4xbb`| Skips the next instruction if register X != b
    #[inline(always)]
    fn skip_not_equals_immediate(&mut self) -> Result<()> {
        if self.vx() != self.cpu.opcode.imm() {
            self.skip();
        }
        Ok(())
    }
}

/// |`5xyn`| Performs a register-register comparison
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`5XY0`| Skip next instruction if vX == vY  |
impl Engine<'_> {
    /// |`5xy0`| Skips the next instruction if register X == register Y
    #[inline(always)]
    fn skip_equals(&mut self) -> Result<()> {
        if self.vx() == self.vy() {
            self.skip();
        }
        Ok(())
    }
}

/// |`6xbb`| Loads immediate byte b into register vX
impl Engine<'_> {
    #[inline(always)]
    fn load_immediate(&mut self) -> Result<()> {
        self.set_vx(self.cpu.opcode.imm());
        Ok(())
    }
}

/// |`7xbb`| Adds immediate byte b to register vX
impl Engine<'_> {
    /// |`7xbb`| Adds immediate byte b to register vX. Does not touch vF.
    #[inline(always)]
    fn add_immediate(&mut self) -> Result<()> {
        self.set_vx(self.vx().wrapping_add(self.cpu.opcode.imm()));
        Ok(())
    }
}

/// |`8xyn`| Performs ALU operation
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`8xy0`| X = Y                              |
/// |`8xy1`| X = X \| Y                         |
/// |`8xy2`| X = X & Y                          |
/// |`8xy3`| X = X ^ Y                          |
/// |`8xy4`| X = X + Y; Set vF=carry            |
/// |`8xy5`| X = X - Y; Set vF=(Y > X)          |
/// |`8xy6`| X = X >> 1; Set vF=shifted-out bit |
/// |`8xy7`| X = Y - X; Set vF=(Y > X)          |
/// |`8xyE`| X = X << 1; Set vF=shifted-out bit |
///
/// Where an operation sets vF, vF is written after vX.
impl Engine<'_> {
    fn arithmetic(&mut self) -> Result<()> {
        match self.cpu.opcode.n() as usize {
            0xe => Self::ALU[Self::ALU.len() - 1](self),
            n if n < Self::ALU.len() => Self::ALU[n](self),
            _ => self.unknown(),
        }
    }
    /// |`8xy0`| Loads the value of y into x
    #[inline(always)]
    fn load(&mut self) -> Result<()> {
        self.set_vx(self.vy());
        Ok(())
    }
    /// |`8xy1`| Performs bitwise or of vX and vY, and stores the result in vX
    #[inline(always)]
    fn or(&mut self) -> Result<()> {
        self.set_vx(self.vx() | self.vy());
        Ok(())
    }
    /// |`8xy2`| Performs bitwise and of vX and vY, and stores the result in vX
    #[inline(always)]
    fn and(&mut self) -> Result<()> {
        self.set_vx(self.vx() & self.vy());
        Ok(())
    }
    /// |`8xy3`| Performs bitwise xor of vX and vY, and stores the result in vX
    #[inline(always)]
    fn xor(&mut self) -> Result<()> {
        self.set_vx(self.vx() ^ self.vy());
        Ok(())
    }
    /// |`8xy4`| Performs addition of vX and vY, and stores the result in vX
    #[inline(always)]
    fn add(&mut self) -> Result<()> {
        let sum = self.vx() as u16 + self.vy() as u16;
        self.set_vx(sum as u8);
        self.set_vf((sum >> 8) as u8 & 1);
        Ok(())
    }
    /// |`8xy5`| Performs subtraction of vX and vY, and stores the result in vX
    ///
    /// vF is 1 when vY > vX, and 0 otherwise.
    #[inline(always)]
    fn sub(&mut self) -> Result<()> {
        let (x, y) = (self.vx(), self.vy());
        self.set_vx(x.wrapping_sub(y));
        self.set_vf((y > x).into());
        Ok(())
    }
    /// |`8xy6`| Performs bitwise right shift of vX
    #[inline(always)]
    fn shift_right(&mut self) -> Result<()> {
        let x = self.vx();
        self.set_vx(x >> 1);
        self.set_vf(x & 1);
        Ok(())
    }
    /// |`8xy7`| Performs subtraction of vY and vX, and stores the result in vX
    ///
    /// vF is 1 when vY > vX, and 0 otherwise.
    #[inline(always)]
    fn backwards_sub(&mut self) -> Result<()> {
        let (x, y) = (self.vx(), self.vy());
        self.set_vx(y.wrapping_sub(x));
        self.set_vf((y > x).into());
        Ok(())
    }
    /// |`8xyE`| Performs bitwise left shift of vX
    #[inline(always)]
    fn shift_left(&mut self) -> Result<()> {
        let x = self.vx();
        self.set_vx(x << 1);
        self.set_vf(x >> 7);
        Ok(())
    }
}

/// |`9xyn`| Performs a register-register comparison
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`9XY0`| Skip next instruction if vX != vY  |
impl Engine<'_> {
    /// |`9xy0`| Skip next instruction if X != y
    #[inline(always)]
    fn skip_not_equals(&mut self) -> Result<()> {
        if self.vx() != self.vy() {
            self.skip();
        }
        Ok(())
    }
}

/// |`Aaaa`| Load address #a into register I
impl Engine<'_> {
    #[inline(always)]
    fn load_i_immediate(&mut self) -> Result<()> {
        self.state.i = self.cpu.opcode.addr();
        Ok(())
    }
}

/// |`Baaa`| Jump to &adr + v0
impl Engine<'_> {
    #[inline(always)]
    fn jump_indexed(&mut self) -> Result<()> {
        self.state.pc = (self.state.v[0] as Adr).wrapping_add(self.cpu.opcode.addr());
        Ok(())
    }
}

/// |`Cxbb`| Stores a random number & the provided byte into vX
impl Engine<'_> {
    #[inline(always)]
    fn rand(&mut self) -> Result<()> {
        let value = self.state.random() & self.cpu.opcode.imm();
        self.set_vx(value);
        Ok(())
    }
}

/// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
impl Engine<'_> {
    /// |`Dxyn`| Draws n-byte sprite to the screen at coordinates (vX, vY)
    ///
    /// Each sprite bit is XORed onto the screen. vF is set to 1 if any lit
    /// pixel is turned off. It is never cleared by this instruction.
    ///
    /// With [Quirks::screen_wrap], coordinates wrap around each axis.
    /// Without it, the linear pixel index `x + y * WIDTH` wraps around the
    /// whole framebuffer.
    fn draw(&mut self) -> Result<()> {
        let (x, y) = (self.vx() as usize, self.vy() as usize);
        let i = self.state.i as usize;
        let wrap = self.cpu.flags.quirks.screen_wrap;
        for row in 0..self.cpu.opcode.n() as usize {
            let sprite = self.mem[Mem::FONT + i + row];
            for bit in 0..8 {
                if sprite & (0x80 >> bit) == 0 {
                    continue;
                }
                let index = if wrap {
                    (y + row) % Screen::HEIGHT * Screen::WIDTH + (x + bit) % Screen::WIDTH
                } else {
                    (x + bit + (y + row) * Screen::WIDTH) % Screen::LEN
                };
                if self.screen.toggle(index, true) {
                    self.set_vf(1);
                }
            }
        }
        Ok(())
    }
}

/// |`Exbb`| Skips instruction on value of keypress
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`eX9e`| Skip next instruction if key == vX |
/// |`eXa1`| Skip next instruction if key != vX |
impl Engine<'_> {
    fn key(&mut self) -> Result<()> {
        match self.cpu.opcode.imm() {
            0x9e => self.skip_key_equals(),
            0xa1 => self.skip_key_not_equals(),
            _ => return self.unknown(),
        }
        Ok(())
    }
    /// |`Ex9E`| Skip next instruction if key == vX
    #[inline(always)]
    fn skip_key_equals(&mut self) {
        if self.state.keys[self.vx() as usize & 0xf] {
            self.skip();
        }
    }
    /// |`ExA1`| Skip next instruction if key != vX
    #[inline(always)]
    fn skip_key_not_equals(&mut self) {
        if !self.state.keys[self.vx() as usize & 0xf] {
            self.skip();
        }
    }
}

/// |`Fxbb`| Performs IO
///
/// |opcode| effect                             |
/// |------|------------------------------------|
/// |`fX07`| Set vX to value in delay timer     |
/// |`fX0a`| Wait for input, store key in vX    |
/// |`fX15`| Set delay timer to the value in vX |
/// |`fX18`| Set sound timer to the value in vX |
/// |`fX1e`| Add vX to I                        |
/// |`fX29`| Load sprite for character x into I |
/// |`fX33`| BCD convert X into I[0..3]         |
/// |`fX55`| DMA Stor from I to registers 0..=X |
/// |`fX65`| DMA Load from I to registers 0..=X |
impl Engine<'_> {
    fn advanced(&mut self) -> Result<()> {
        match self.cpu.opcode.imm() {
            0x07 => self.load_delay_timer(),
            0x0a => self.wait_for_key(),
            0x15 => self.store_delay_timer(),
            0x18 => self.store_sound_timer(),
            0x1e => self.add_i(),
            0x29 => self.load_sprite(),
            0x33 => self.bcd_convert(),
            0x55 => self.store_dma(),
            0x65 => self.load_dma(),
            _ => return self.unknown(),
        }
        Ok(())
    }
    /// |`Fx07`| Get the current DT, and put it in vX
    #[inline(always)]
    fn load_delay_timer(&mut self) {
        self.set_vx(self.state.delay);
    }
    /// |`Fx0A`| Wait for key, then vX = K
    ///
    /// The key is picked up by [Engine::check_for_keys] on later ticks.
    #[inline(always)]
    fn wait_for_key(&mut self) {
        log::trace!("v{:X} waiting for key", self.x());
        self.cpu.flags.keypause = true;
    }
    /// |`Fx15`| Load vX into DT
    #[inline(always)]
    fn store_delay_timer(&mut self) {
        self.state.delay = self.vx();
    }
    /// |`Fx18`| Load vX into ST
    #[inline(always)]
    fn store_sound_timer(&mut self) {
        self.state.sound = self.vx();
    }
    /// |`Fx1e`| Add vX to I
    #[inline(always)]
    fn add_i(&mut self) {
        self.state.i = self.state.i.wrapping_add(self.vx() as Adr);
    }
    /// |`Fx29`| Load sprite for character vX into I
    #[inline(always)]
    fn load_sprite(&mut self) {
        self.state.i = (Mem::FONT + self.vx() as usize * Screen::BYTES_PER_GLYPH) as Adr;
    }
    /// |`Fx33`| BCD convert vX into I`[0..3]`
    #[inline(always)]
    fn bcd_convert(&mut self) {
        let (x, i) = (self.vx(), self.state.i as usize);
        self.mem[i] = x / 100 % 10;
        self.mem[i + 1] = x / 10 % 10;
        self.mem[i + 2] = x % 10;
    }
    /// |`Fx55`| DMA Stor from I to registers 0..=X
    ///
    /// # Quirk
    /// With [Quirks::dma_inc], I is left at I + X + 1 after the transfer.
    #[inline(always)]
    fn store_dma(&mut self) {
        let (x, i) = (self.x(), self.state.i as usize);
        self.mem[i..=i + x].copy_from_slice(&self.state.v[..=x]);
        if self.cpu.flags.quirks.dma_inc {
            self.state.i = self.state.i.wrapping_add(x as Adr + 1);
        }
    }
    /// |`Fx65`| DMA Load from I to registers 0..=X
    ///
    /// # Quirk
    /// With [Quirks::dma_inc], I is left at I + X + 1 after the transfer.
    #[inline(always)]
    fn load_dma(&mut self) {
        let (x, i) = (self.x(), self.state.i as usize);
        self.state.v[..=x].copy_from_slice(&self.mem[i..=i + x]);
        if self.cpu.flags.quirks.dma_inc {
            self.state.i = self.state.i.wrapping_add(x as Adr + 1);
        }
    }
}
