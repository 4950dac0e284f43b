//! Testing methods on chip8_vm's structs
use chip8_vm::prelude::*;
use std::{
    collections::hash_map::DefaultHasher,
    hash::{Hash, Hasher},
};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn chip8() {
    let ch8 = Chip8::default(); // Default
    let ch82 = ch8.clone(); // Clone
    assert_eq!(ch8, ch82); // PartialEq
    println!("{ch8:?}"); // Debug
}

#[test]
fn error() {
    let errors = [
        Error::LoadOverflow {
            region: Region::Program,
            len: 0xe00,
            capacity: 0xe00,
        },
        Error::UnknownOpcode { word: 0xf0ff },
        Error::InvalidKey { key: 0x10 },
        Error::InvalidRegister { reg: 0x10 },
        Error::from(std::io::Error::from(std::io::ErrorKind::NotFound)),
    ];
    for error in errors {
        println!("{error} {error:?}");
    }
    assert_eq!(
        "opcode f0ff not recognized",
        Error::UnknownOpcode { word: 0xf0ff }.to_string()
    );
}

mod region {
    use super::*;
    #[test]
    #[allow(clippy::clone_on_copy)]
    fn copy_clone() {
        let r1 = Region::Charset;
        let r2 = r1;
        assert_eq!(r1, r2.clone());
    }
    #[test]
    fn display() {
        assert_eq!("Charset", Region::Charset.to_string());
        assert_eq!("Program", Region::Program.to_string());
    }
    #[test]
    fn ord() {
        assert!(Region::Charset < Region::Program);
    }
    #[test]
    fn range() {
        assert_eq!(0x000..0x200, Region::Charset.range());
        assert_eq!(0x200..0x1000, Region::Program.range());
    }
    #[test]
    fn hash() {
        assert_ne!(hash_of(&Region::Charset), hash_of(&Region::Program));
    }
}

mod quirks {
    use super::*;
    #[test]
    fn from_true() {
        let quirks_true = Quirks::from(true);
        assert_eq!(
            quirks_true,
            Quirks {
                dma_inc: true,
                screen_wrap: true,
            }
        );
        assert_eq!(Quirks::default(), quirks_true);
    }
    #[test]
    fn from_false() {
        let quirks_false = Quirks::from(false);
        assert_eq!(
            quirks_false,
            Quirks {
                dma_inc: false,
                screen_wrap: false,
            }
        );
    }
    #[test]
    fn ord() {
        assert!(Quirks::from(false) < Quirks::from(true));
    }
    #[test]
    fn hash() {
        assert_eq!(hash_of(&Quirks::from(true)), hash_of(&Quirks::default()));
    }
}

mod flags {
    use super::*;
    #[test]
    fn default() {
        let flags = Flags::default();
        assert!(!flags.debug);
        assert!(!flags.keypause);
        assert_eq!(Quirks::default(), flags.quirks);
    }
    #[test]
    fn debug_toggle() {
        let mut flags = Flags::default();
        flags.debug();
        assert!(flags.debug);
        flags.debug();
        assert!(!flags.debug);
    }
}

mod opcode {
    use super::*;
    #[test]
    fn fields() {
        let op = Opcode::new(0xd3a7);
        assert_eq!(0xd3a7, op.word());
        assert_eq!(0x3a7, op.addr());
        assert_eq!(0xa7, op.imm());
        assert_eq!(0xd, op.u());
        assert_eq!(0x3, op.x());
        assert_eq!(0xa, op.y());
        assert_eq!(0x7, op.n());
    }
    #[test]
    fn display() {
        assert_eq!("00e0", Opcode::new(0x00e0).to_string());
    }
    #[test]
    fn conversions() {
        let word: u16 = Opcode::from(0x1234).into();
        assert_eq!(0x1234, word);
    }
}

mod cpu {
    use super::*;
    #[test]
    fn new() {
        let cpu = CPU::new(Flags {
            debug: true,
            ..Default::default()
        });
        assert!(cpu.flags.debug);
        assert_eq!(0, cpu.cycle());
        assert_eq!(Opcode::default(), cpu.opcode());
    }
    #[test]
    fn reset_keeps_config() {
        let mut cpu = CPU::new(Flags {
            debug: true,
            keypause: true,
            quirks: Quirks::from(false),
        });
        cpu.reset();
        assert!(cpu.flags.debug);
        assert!(!cpu.flags.keypause);
        assert_eq!(Quirks::from(false), cpu.flags.quirks);
    }
}

mod screen {
    use super::*;
    #[test]
    fn new() {
        let screen = Screen::new();
        assert_eq!(Screen::LEN, screen.pixels().len());
        assert_eq!(0, screen.lit());
        assert_eq!(Screen::default(), screen);
    }
    #[test]
    fn get() {
        let mut screen = Screen::new();
        screen[Screen::LEN - 1] = true;
        assert_eq!(Some(true), screen.get(Screen::WIDTH - 1, Screen::HEIGHT - 1));
        assert_eq!(None, screen.get(0, Screen::HEIGHT));
    }
    #[test]
    fn debug() {
        println!("{:?}", Screen::new());
    }
}

mod dis {
    use super::*;
    #[test]
    fn default() {
        assert_ne!(Dis::default(), Dis::plain());
    }
    #[test]
    fn every_word() {
        let dis = Dis::plain();
        for word in 0..=0xffff {
            assert!(!dis.once(word).is_empty());
        }
    }
    #[test]
    fn insn_display() {
        assert_eq!("call   2a4", Insn::call { n: 0x2a4 }.to_string());
    }
}
