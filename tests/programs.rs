use dcpu16_asm::{assemble, Symbol};
use pretty_assertions::assert_eq;

const SAMPLE: &str = include_str!("../demos/sample.asm");
const HELLO: &str = include_str!("../demos/hello.asm");

#[test]
fn sample_program_matches_reference_words() {
    let asm = assemble(SAMPLE).unwrap();
    let expected: Vec<u16> = vec![
        0x7c01, 0x0030, // SET A, 0x30
        0x7de1, 0x1000, 0x0020, // SET [0x1000], 0x20
        0x7803, 0x1000, // SUB A, [0x1000]
        0xc00d, // IFN A, 0x10
        0x7dc1, 0x001a, // SET PC, crash
        0xa861, // SET I, 10
        0x7c01, 0x2000, // SET A, 0x2000
        0x2161, 0x2000, // :loop SET [0x2000+I], [A]
        0x8463, // SUB I, 1
        0x806d, // IFN I, 0
        0x7dc1, 0x000d, // SET PC, loop
        0x9031, // SET X, 0x4
        0x7c10, 0x0018, // JSR testsub
        0x7dc1, 0x001a, // SET PC, crash
        0x9037, // :testsub SHL X, 4
        0x61c1, // SET PC, POP
        0x7dc1, 0x001a, // :crash SET PC, crash
    ];
    assert_eq!(asm.words(), expected.as_slice());
    assert_eq!(
        asm.symbols(),
        vec![
            Symbol { addr: 0x0d, name: "loop".into() },
            Symbol { addr: 0x18, name: "testsub".into() },
            Symbol { addr: 0x1a, name: "crash".into() },
        ]
    );
}

#[test]
fn sample_program_bytes_are_big_endian() {
    let bytes = assemble(SAMPLE).unwrap().to_bytes();
    assert_eq!(bytes.len(), 28 * 2);
    assert_eq!(&bytes[..6], &[0x7c, 0x01, 0x00, 0x30, 0x7d, 0xe1]);
    assert_eq!(&bytes[bytes.len() - 2..], &[0x00, 0x1a]);
}

#[test]
fn hello_world_with_lowercase_source() {
    let asm = assemble(HELLO).unwrap();
    let mut expected: Vec<u16> = vec![
        0x8061, // set i, 0
        0x816d, 18, // :next ifn [message+i], 0
        0x7dc1, 7, // set pc, print
        0x7dc1, 16, // set pc, halt
        0x5801, 18, // :print set a, [message+i]
        0x7c0a, 0xf000, // bor a, 0xF000
        0x0161, 0x8000, // set [0x8000+i], a
        0x8462, // add i, 1
        0x7dc1, 1, // set pc, next
        0x7dc1, 16, // :halt set pc, halt
    ];
    expected.extend([0x4865, 0x6c6c, 0x6f2c, 0x2077, 0x6f72, 0x6c64, 0x2100, 0]);
    assert_eq!(asm.words(), expected.as_slice());
    assert_eq!(asm.address_of("message"), Some(18));
}

#[test]
fn forward_and_backward_references_agree() {
    let src = "\
        SET PC, target   ; forward
        SET A, 1
:target SET B, 2
        SET PC, target   ; backward
";
    let asm = assemble(src).unwrap();
    assert_eq!(asm.address_of("target"), Some(3));
    let w = asm.words();
    assert_eq!(w[1], 3);
    assert_eq!(w[w.len() - 1], 3);
}

#[test]
fn first_line_label_is_zero() {
    let asm = assemble(":loop ADD A, 1\nSET PC, loop").unwrap();
    assert_eq!(asm.address_of("loop"), Some(0));
    assert_eq!(asm.words(), &[0x8402, 0x7dc1, 0x0000]);
}

#[test]
fn empty_source_is_an_empty_image() {
    let asm = assemble("").unwrap();
    assert!(asm.words().is_empty());
    assert!(asm.to_bytes().is_empty());
    let asm = assemble("; nothing here\n\n   \n").unwrap();
    assert!(asm.words().is_empty());
}

#[test]
fn crlf_line_endings() {
    let asm = assemble("SET A, 0x30\r\n:x SET PC, x\r\n").unwrap();
    assert_eq!(asm.words(), &[0x7c01, 0x0030, 0x7dc1, 0x0002]);
}

#[test]
fn symbols_serialize_as_addr_name_pairs() {
    let asm = assemble(":start SET A, 1").unwrap();
    let json = serde_json::to_value(asm.symbols()).unwrap();
    assert_eq!(json, serde_json::json!([{ "addr": 0, "name": "start" }]));
}
