mod tests {
    use status_led_vm::Opcode;

    #[test]
    fn test_from_bits() {
        assert_eq!(Opcode::from_bits(0x00), Some(Opcode::LOAD));
        assert_eq!(Opcode::from_bits(0x81), Some(Opcode::ADD | Opcode::REPEAT));
        // 0x08 is not assigned
        assert_eq!(Opcode::from_bits(0x08), None);
        assert_eq!(Opcode::from_bits(0x09), None);
    }

    #[test]
    fn test_contains() {
        let opcode = Opcode::ADD | Opcode::DIV;
        assert!(opcode.contains(Opcode::ADD));
        assert!(opcode.contains(Opcode::DIV));
        assert!(!opcode.contains(Opcode::RSHIFT));
        assert!(!opcode.contains(Opcode::LOAD));
        assert!(!opcode.is_load());
        assert!(Opcode::LOAD.is_load());
        assert!(!opcode.repeats());
        assert!(opcode.with(Opcode::REPEAT).repeats());
    }

    #[test]
    fn test_effect_order() {
        let position = |opcode: Opcode| {
            Opcode::EFFECT_ORDER
                .iter()
                .position(|step| *step == opcode)
                .unwrap()
        };
        assert!(position(Opcode::ADD) < position(Opcode::RSHIFT));
        assert!(position(Opcode::RSHIFT) < position(Opcode::LSHIFT));
        assert!(position(Opcode::LSHIFT) < position(Opcode::USOURCE));
        assert!(position(Opcode::USOURCE) < position(Opcode::DSOURCE));
        assert!(position(Opcode::DSOURCE) < position(Opcode::DIV));
        assert!(!Opcode::EFFECT_ORDER.contains(&Opcode::REPEAT));
    }
}
