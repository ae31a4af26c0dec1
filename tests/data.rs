use dcpu16_asm::assemble;
use pretty_assertions::assert_eq;

#[test]
fn two_char_string_is_one_word() {
    assert_eq!(assemble("DAT \"HI\"").unwrap().words(), &[0x4849]);
}

#[test]
fn odd_string_pads_low_byte() {
    assert_eq!(assemble("DAT \"HIT\"").unwrap().words(), &[0x4849, 0x5400]);
}

#[test]
fn mixed_items_keep_order() {
    let asm = assemble("dat 0x170, \"ab\", 3, 'c'").unwrap();
    assert_eq!(asm.words(), &[0x0170, 0x6162, 0x0003, 0x6300]);
}

#[test]
fn separators_inside_strings() {
    let asm = assemble(r#"DAT "a;b", "x,""#).unwrap();
    assert_eq!(asm.words(), &[0x613B, 0x6200, 0x782C]);
}

#[test]
fn backslashes_are_packed_verbatim() {
    let asm = assemble(r#"DAT "a\nb""#).unwrap();
    assert_eq!(asm.words(), &[0x615C, 0x6E62]);

    let asm = assemble(r#"DAT "C:\path""#).unwrap();
    assert_eq!(asm.words(), &[0x433A, 0x5C70, 0x6174, 0x6800]);

    // the quote after a backslash does not close the string
    let asm = assemble(r#"DAT "\"", 1"#).unwrap();
    assert_eq!(asm.words(), &[0x5C22, 0x0001]);
}

#[test]
fn data_is_addressable_by_label() {
    let asm = assemble("SET A, [msg]\n:msg DAT \"hey\", 0").unwrap();
    assert_eq!(asm.address_of("msg"), Some(2));
    assert_eq!(asm.words(), &[0x7801, 0x0002, 0x6865, 0x7900, 0x0000]);
}

#[test]
fn empty_dat_emits_nothing() {
    let asm = assemble(":here DAT\nSET PC, here").unwrap();
    assert_eq!(asm.address_of("here"), Some(0));
    assert_eq!(asm.words(), &[0x7DC1, 0x0000]);
    assert!(asm.listing().iter().all(|e| e.line == 2));
}
