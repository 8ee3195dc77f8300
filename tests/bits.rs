use mips_asm::bits::{decode_bits, encode_field};

#[test]
fn decode_inverts_encode_for_unsigned_values() {
    for width in [1usize, 5, 6, 16, 26, 32] {
        let max = (1u64 << width) - 1;
        for v in [0, 1, max / 2, max - 1, max] {
            let s = encode_field(v as i64, width);
            assert_eq!(s.len(), width);
            assert_eq!(decode_bits(&s), v, "width {width} value {v}");
        }
    }
}

#[test]
fn negatives_decode_as_unsigned_pattern() {
    assert_eq!(encode_field(-1, 5), "11111");
    assert_eq!(decode_bits("11111"), 31);
    assert_eq!(decode_bits(&encode_field(-4, 16)), 0xFFFC);
    assert_eq!(decode_bits(&encode_field(-1, 32)), u32::MAX as u64);
}

#[test]
fn width_is_always_respected() {
    assert_eq!(encode_field(1 << 20, 16).len(), 16);
    assert_eq!(encode_field(-70000, 16).len(), 16);
    assert_eq!(encode_field(i64::MIN, 26).len(), 26);
}
