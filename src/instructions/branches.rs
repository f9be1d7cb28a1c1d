//! # Branch Instructions
//!
//! BCC, BCS, BEQ, BNE, BMI, BPL, BVC and BVS. All branches use relative
//! addressing with a signed 8-bit offset from the next instruction.
//!
//! Timing:
//! - 2 tacts if the branch is not taken
//! - 3 tacts if taken to the same page
//! - 4 tacts if taken across a page boundary

use crate::opcodes::Mnemonic;
use crate::{MemoryBus, CPU};

pub(crate) fn execute_branch<M: MemoryBus>(cpu: &mut CPU<M>, mnemonic: Mnemonic) {
    let taken = match mnemonic {
        Mnemonic::Bcc => !cpu.flag_c,
        Mnemonic::Bcs => cpu.flag_c,
        Mnemonic::Bne => !cpu.flag_z,
        Mnemonic::Beq => cpu.flag_z,
        Mnemonic::Bpl => !cpu.flag_n,
        Mnemonic::Bmi => cpu.flag_n,
        Mnemonic::Bvc => !cpu.flag_v,
        Mnemonic::Bvs => cpu.flag_v,
        _ => false,
    };
    branch_if(cpu, taken);
}

fn branch_if<M: MemoryBus>(cpu: &mut CPU<M>, taken: bool) {
    let offset = cpu.fetch_byte() as i8;
    if !taken {
        return;
    }

    cpu.dummy_read(cpu.pc);
    let target = cpu.pc.wrapping_add_signed(offset as i16);
    if (cpu.pc ^ target) & 0xFF00 != 0 {
        // The low byte is added first; the high byte is fixed one tact later
        cpu.dummy_read((cpu.pc & 0xFF00) | (target & 0x00FF));
    }
    cpu.pc = target;
}
