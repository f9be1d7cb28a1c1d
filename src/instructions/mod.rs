//! # 6510 Instruction Implementations
//!
//! Instructions are organized by category. Each one is a standalone function
//! taking a mutable reference to the CPU and the addressing mode decoded from
//! `OPCODE_TABLE`. Tacts are not added here: every bus access made through the
//! CPU's access helpers costs one tact, so timings follow from the access
//! pattern.
//!
//! ## Categories
//!
//! - **alu**: ADC, SBC, AND, ORA, EOR, CMP, CPX, CPY, BIT
//! - **branches**: BCC, BCS, BEQ, BNE, BMI, BPL, BVC, BVS
//! - **shifts**: ASL, LSR, ROL, ROR
//! - **load_store**: LDA, LDX, LDY, STA, STX, STY
//! - **inc_dec**: INC, DEC, INX, INY, DEX, DEY
//! - **control**: JMP, JSR, RTS, RTI, BRK, NOP, JAM, interrupt entry
//! - **stack**: PHA, PHP, PLA, PLP
//! - **flags**: CLC, SEC, CLI, SEI, CLD, SED, CLV
//! - **transfer**: TAX, TAY, TXA, TYA, TSX, TXS
//! - **undocumented**: the illegal opcodes (SLO, RLA, ... SHA, TAS)

pub(crate) mod alu;
pub(crate) mod branches;
pub(crate) mod control;
pub(crate) mod flags;
pub(crate) mod inc_dec;
pub(crate) mod load_store;
pub(crate) mod shifts;
pub(crate) mod stack;
pub(crate) mod transfer;
pub(crate) mod undocumented;

use crate::opcodes::Mnemonic;
use crate::{MemoryBus, CPU, OPCODE_TABLE};

/// Decodes and executes an already fetched opcode.
pub(crate) fn execute<M: MemoryBus>(cpu: &mut CPU<M>, opcode: u8) {
    let metadata = &OPCODE_TABLE[opcode as usize];
    let mode = metadata.addressing_mode;

    use Mnemonic::*;
    match metadata.mnemonic {
        Adc => alu::execute_adc(cpu, mode),
        Sbc | Usbc => alu::execute_sbc(cpu, mode),
        And => alu::execute_and(cpu, mode),
        Ora => alu::execute_ora(cpu, mode),
        Eor => alu::execute_eor(cpu, mode),
        Cmp => alu::execute_cmp(cpu, mode),
        Cpx => alu::execute_cpx(cpu, mode),
        Cpy => alu::execute_cpy(cpu, mode),
        Bit => alu::execute_bit(cpu, mode),

        Bcc | Bcs | Bne | Beq | Bpl | Bmi | Bvc | Bvs => {
            branches::execute_branch(cpu, metadata.mnemonic)
        }

        Asl => shifts::execute_asl(cpu, mode),
        Lsr => shifts::execute_lsr(cpu, mode),
        Rol => shifts::execute_rol(cpu, mode),
        Ror => shifts::execute_ror(cpu, mode),

        Lda => load_store::execute_lda(cpu, mode),
        Ldx => load_store::execute_ldx(cpu, mode),
        Ldy => load_store::execute_ldy(cpu, mode),
        Sta => load_store::execute_sta(cpu, mode),
        Stx => load_store::execute_stx(cpu, mode),
        Sty => load_store::execute_sty(cpu, mode),

        Inc => inc_dec::execute_inc(cpu, mode),
        Dec => inc_dec::execute_dec(cpu, mode),
        Inx => inc_dec::execute_inx(cpu),
        Iny => inc_dec::execute_iny(cpu),
        Dex => inc_dec::execute_dex(cpu),
        Dey => inc_dec::execute_dey(cpu),

        Jmp => control::execute_jmp(cpu, mode),
        Jsr => control::execute_jsr(cpu),
        Rts => control::execute_rts(cpu),
        Rti => control::execute_rti(cpu),
        Brk => control::execute_brk(cpu),
        Nop => control::execute_nop(cpu, mode),
        Jam => cpu.jam(),

        Pha => stack::execute_pha(cpu),
        Php => stack::execute_php(cpu),
        Pla => stack::execute_pla(cpu),
        Plp => stack::execute_plp(cpu),

        Clc => flags::execute_clc(cpu),
        Sec => flags::execute_sec(cpu),
        Cli => flags::execute_cli(cpu),
        Sei => flags::execute_sei(cpu),
        Cld => flags::execute_cld(cpu),
        Sed => flags::execute_sed(cpu),
        Clv => flags::execute_clv(cpu),

        Tax => transfer::execute_tax(cpu),
        Tay => transfer::execute_tay(cpu),
        Txa => transfer::execute_txa(cpu),
        Tya => transfer::execute_tya(cpu),
        Tsx => transfer::execute_tsx(cpu),
        Txs => transfer::execute_txs(cpu),

        Slo => undocumented::execute_slo(cpu, mode),
        Rla => undocumented::execute_rla(cpu, mode),
        Sre => undocumented::execute_sre(cpu, mode),
        Rra => undocumented::execute_rra(cpu, mode),
        Sax => undocumented::execute_sax(cpu, mode),
        Lax => undocumented::execute_lax(cpu, mode),
        Dcp => undocumented::execute_dcp(cpu, mode),
        Isc => undocumented::execute_isc(cpu, mode),
        Anc => undocumented::execute_anc(cpu, mode),
        Alr => undocumented::execute_alr(cpu, mode),
        Arr => undocumented::execute_arr(cpu, mode),
        Ane => undocumented::execute_ane(cpu, mode),
        Lxa => undocumented::execute_lxa(cpu, mode),
        Sbx => undocumented::execute_sbx(cpu, mode),
        Las => undocumented::execute_las(cpu, mode),
        Sha => undocumented::execute_sha(cpu, mode),
        Shx => undocumented::execute_shx(cpu, mode),
        Shy => undocumented::execute_shy(cpu, mode),
        Tas => undocumented::execute_tas(cpu, mode),
    }
}
