use mips_asm::bits::decode_bits;
use mips_asm::{encode_line, AsmError};
use pretty_assertions::assert_eq;

fn word(bits: &str) -> u32 {
    let compact: String = bits.chars().filter(|c| !c.is_whitespace()).collect();
    assert_eq!(compact.len(), 32);
    decode_bits(&compact) as u32
}

#[test]
fn add_matches_field_pattern() {
    let w = encode_line("add $t0,$t1,$t2").unwrap();
    assert_eq!(w, word("000000 01001 01010 01000 00000 100000"));
    assert_eq!(w, 19546144);
    assert_eq!(encode_line("add $t0 $t1 $t2").unwrap(), w);
}

#[test]
fn sw_splits_offset_and_base() {
    let w = encode_line("sw $t0, 4($sp)").unwrap();
    assert_eq!(w, word("101011 11101 01000 0000000000000100"));
    assert_eq!(w, 0xAFA8_0004);
}

#[test]
fn lw_negative_offset_is_twos_complement() {
    assert_eq!(encode_line("lw $t1 -4($sp)").unwrap(), 0x8FA9_FFFC);
}

#[test]
fn r_type_funct_codes() {
    assert_eq!(encode_line("sub $t1 $t2 $t3").unwrap(), 0x014B_4822);
    assert_eq!(encode_line("and $s0 $s1 $s2").unwrap(), 0x0232_8024);
    assert_eq!(encode_line("or $s0 $s1 $s2").unwrap(), 0x0232_8025);
    assert_eq!(encode_line("slt $t0 $t1 $t2").unwrap(), 0x012A_402A);
}

#[test]
fn shifts_take_literal_shamt_and_zero_rs() {
    assert_eq!(encode_line("sll $t0 $t1 2").unwrap(), 0x0009_4080);
    assert_eq!(encode_line("srl $t0 $t1 2").unwrap(), 0x0009_4082);
    assert_eq!(encode_line("sll $zero $zero 0").unwrap(), 0);
}

#[test]
fn jr_only_sets_rs() {
    assert_eq!(encode_line("jr $ra").unwrap(), 0x03E0_0008);
}

#[test]
fn branches_use_rs_rt_offset() {
    assert_eq!(encode_line("beq $t0 $t1 -2").unwrap(), 0x1109_FFFE);
    assert_eq!(encode_line("bne $t0 $zero 5").unwrap(), 0x1500_0005);
    assert_eq!(encode_line("blez $t0 $zero 3").unwrap(), 0x1900_0003);
    assert_eq!(encode_line("bgtz $t0 $zero 3").unwrap(), 0x1D00_0003);
}

#[test]
fn immediates() {
    assert_eq!(encode_line("lui $t0 4097").unwrap(), 0x3C08_1001);
    assert_eq!(encode_line("ori $t0 $t0 16").unwrap(), 0x3508_0010);
}

#[test]
fn jumps_take_26_bit_address() {
    assert_eq!(encode_line("j 1024").unwrap(), 0x0800_0400);
    assert_eq!(encode_line("jal 1024").unwrap(), 0x0C00_0400);
    // wraps silently
    assert_eq!(encode_line("j -1").unwrap(), 0x0BFF_FFFF);
}

#[test]
fn errors_name_the_offending_token() {
    assert_eq!(
        encode_line("foo bar").unwrap_err(),
        AsmError::UnsupportedInstruction { mnemonic: "foo".into() }
    );
    assert_eq!(
        encode_line("add $t0 $t1 $x9").unwrap_err(),
        AsmError::UnknownRegister { name: "$x9".into() }
    );
    assert_eq!(
        encode_line("beq $t0 $t1 ten").unwrap_err(),
        AsmError::MalformedLiteral { text: "ten".into() }
    );
    assert_eq!(
        encode_line("lw $t0 ($sp)").unwrap_err(),
        AsmError::MalformedLiteral { text: "".into() }
    );
    assert_eq!(
        encode_line("sw $t0 4").unwrap_err(),
        AsmError::MalformedMemoryOperand { text: "4".into() }
    );
    assert_eq!(
        encode_line("ori $t0 $t1").unwrap_err(),
        AsmError::MissingOperand { mnemonic: "ori".into(), index: 3 }
    );
}

#[test]
fn mnemonics_are_case_sensitive() {
    assert!(matches!(
        encode_line("ADD $t0 $t1 $t2"),
        Err(AsmError::UnsupportedInstruction { .. })
    ));
}
