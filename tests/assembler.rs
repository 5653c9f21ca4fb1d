use urm::assembler::{
    self,
    model::{Inst, Kind},
    phases::{
        parse, resolve,
        types::{Loc, Located},
    },
    Error,
};

#[test]
fn unsupported_kind() {
    assert_eq!(
        assembler::assemble("Z(1)\n  X(1)"),
        Err(Error::Parse(Located::with_loc(
            Loc::new(2, 3),
            parse::Error::UnsupportedKind(String::from("X"))
        )))
    );
}

#[test]
fn wrong_arity() {
    assert_eq!(
        assembler::assemble("J(1,2)"),
        Err(Error::Parse(Located::with_loc(
            Loc::new(1, 1),
            parse::Error::Malformed(String::from("J"), Kind::Jump, 2)
        )))
    );
}

#[test]
fn unresolved_label() {
    assert_eq!(
        assembler::assemble("S(1)\nJ(1,2,missing)"),
        Err(Error::Resolve(Located::with_loc(
            Loc::new(2, 1),
            resolve::Error::UnknownLabel(String::from("missing"))
        )))
    );
}

#[test]
fn errors_name_their_phase() {
    let err = assembler::assemble("J(1,1,nowhere)").unwrap_err();
    assert!(err.to_string().contains("Resolver"));
    assert!(err.to_string().contains("nowhere"));
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let program = assembler::assemble("# header\n\n   \nS(1)\n  # indented\nS(1)").unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program.get(2), Some(&Inst::Succ(1)));
}

#[test]
fn later_label_wins() {
    let program = assembler::assemble("S(1) top\nS(2) top\nJ(1,1,top)").unwrap();
    assert_eq!(program.label("top"), Some(2));
    assert_eq!(program.get(3), Some(&Inst::Jump(1, 1, 2)));
}

#[test]
fn resolving_twice_changes_nothing() {
    let program =
        assembler::assemble("J(1,2,end) start\nS(2) a b\nS(3)\nJ(1,1,start)\nend").unwrap();

    let again = resolve::resolve(program.to_parsed_lines()).unwrap();
    assert_eq!(again, program);
    assert_eq!(again.origin(1), Some("end"));
    assert_eq!(resolve::resolve(again.to_parsed_lines()).unwrap(), program);
}

#[test]
fn display_is_reparseable() {
    let source = "Z(4)\nS(1)\nT(1, 2)\nJ(1, 2, 1)";
    let program = assembler::assemble(source).unwrap();
    let shown = program
        .insts()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    assert_eq!(shown, source);
    assert_eq!(assembler::assemble(&shown).unwrap(), program);
}

#[test]
fn bare_instruction_heads_are_not_labels() {
    assert_eq!(
        assembler::assemble("S1\nZ(2)"),
        Err(Error::Parse(Located::with_loc(
            Loc::new(1, 1),
            parse::Error::Malformed(String::from("S1"), Kind::Succ, 0)
        )))
    );
    assert_eq!(
        assembler::assemble("X 1\nZ(2)"),
        Err(Error::Parse(Located::with_loc(
            Loc::new(1, 1),
            parse::Error::UnsupportedKind(String::from("X"))
        )))
    );
}

#[test]
fn oversized_register_is_not_a_label() {
    assert_eq!(
        assembler::assemble("S(99999999999999999999)"),
        Err(Error::Parse(Located::with_loc(
            Loc::new(1, 3),
            parse::Error::LiteralOutOfRange(String::from("99999999999999999999"))
        )))
    );
}
