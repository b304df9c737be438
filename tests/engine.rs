mod tests {
    use status_led_vm::content::BUILTIN;
    use status_led_vm::{
        Animation, BankInstruction as B, BrightnessStore, Catalog, ColorInstruction as C,
        ConfigError, Engine, EngineConfig, Instant, LedGroup, MAX_LEVEL, Opcode, RamSelection,
    };

    const DARK_COLOR: [C; 1] = [C::load(1000, [0, 0, 0, 0])];

    fn engine<'a>(
        catalog: Catalog<'a>,
        store: &'a BrightnessStore,
        selection: RamSelection,
        now: u16,
    ) -> Engine<'a, RamSelection> {
        let mut engine = Engine::new(catalog, store, selection, &EngineConfig::default()).unwrap();
        engine.initialize(now);
        engine
    }

    #[test]
    fn test_initialize_blanks_everything() {
        let store = BrightnessStore::new();
        let engine = engine(BUILTIN, &store, RamSelection::new(2), 0);

        assert_eq!(engine.selected_index(), 2);
        assert_eq!(store.bank(), [0; 7]);
        assert_eq!(store.color(), [0; 4]);
        for group in [LedGroup::Bank, LedGroup::Color] {
            let playback = engine.playback(group);
            assert_eq!(playback.elapsed_ms(), 0);
            assert_eq!(playback.last_instruction(), None);
            assert_eq!(playback.repeat_counter(), 0);
        }
    }

    #[test]
    fn test_load_is_exact() {
        const BANK: [B; 2] = [
            B::load(100, [1, 2, 3, 4, 5, 6, 7]),
            B::load(100, [15, 14, 13, 12, 11, 10, 9]),
        ];
        let animations = [Animation::new("load", &BANK, &DARK_COLOR).unwrap()];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            0,
        );

        engine.tick(1);
        assert_eq!(store.bank(), [1, 2, 3, 4, 5, 6, 7]);

        engine.tick(100);
        assert_eq!(store.bank(), [15, 14, 13, 12, 11, 10, 9]);
        assert_eq!(engine.bank_levels(), &store.bank());
    }

    #[test]
    fn test_add_overflow_goes_black() {
        const BANK: [B; 2] = [B::load(100, [14; 7]), B::add(100, [5; 7])];
        let animations = [Animation::new("wrap", &BANK, &DARK_COLOR).unwrap()];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            0,
        );

        engine.tick(1);
        assert_eq!(store.bank(), [14; 7]);
        engine.tick(100);
        assert_eq!(store.bank(), [0; 7]);
    }

    #[test]
    fn test_same_timestamp_is_a_no_op() {
        const BANK: [B; 3] = [
            B::load(100, [0; 7]),
            B::add(100, [1; 7]).repeat(3),
            B::load(100, [15; 7]),
        ];
        let animations = [Animation::new("repeat", &BANK, &DARK_COLOR).unwrap()];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            0,
        );

        engine.tick(150);
        let levels = store.bank();
        let elapsed = engine.playback(LedGroup::Bank).elapsed_ms();
        let last = engine.playback(LedGroup::Bank).last_instruction();
        let counter = engine.playback(LedGroup::Bank).repeat_counter();

        engine.tick(150);
        assert_eq!(store.bank(), levels);
        assert_eq!(engine.playback(LedGroup::Bank).elapsed_ms(), elapsed);
        assert_eq!(engine.playback(LedGroup::Bank).last_instruction(), last);
        assert_eq!(engine.playback(LedGroup::Bank).repeat_counter(), counter);
    }

    #[test]
    fn test_repeat_applies_operand_plus_one_times() {
        const BANK: [B; 3] = [
            B::load(100, [0; 7]),
            B::add(100, [1, 0, 0, 0, 0, 0, 0]).repeat(3),
            B::load(100, [15; 7]),
        ];
        let animations = [Animation::new("repeat", &BANK, &DARK_COLOR).unwrap()];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            0,
        );

        engine.tick(1);
        assert_eq!(store.bank(), [0; 7]);

        engine.tick(101);
        assert_eq!(store.bank()[0], 1);
        assert_eq!(engine.playback(LedGroup::Bank).repeat_counter(), 3);
        assert_eq!(engine.playback(LedGroup::Bank).last_instruction(), Some(0));
        assert_eq!(engine.playback(LedGroup::Bank).elapsed_ms(), 1);

        engine.tick(201);
        assert_eq!(store.bank()[0], 2);
        engine.tick(301);
        assert_eq!(store.bank()[0], 3);
        engine.tick(401);
        assert_eq!(store.bank()[0], 4);
        assert_eq!(engine.playback(LedGroup::Bank).last_instruction(), Some(1));
        assert_eq!(engine.playback(LedGroup::Bank).elapsed_ms(), 101);

        // Still inside the repeated instruction, nothing is reapplied
        engine.tick(451);
        assert_eq!(store.bank()[0], 4);

        engine.tick(501);
        assert_eq!(store.bank(), [15; 7]);
    }

    #[test]
    fn test_repeat_at_first_instruction_keeps_cadence() {
        const BANK: [B; 2] = [
            B::add(100, [1, 0, 0, 0, 0, 0, 0]).repeat(3),
            B::load(100, [9; 7]),
        ];
        let animations = [Animation::new("first", &BANK, &DARK_COLOR).unwrap()];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            0,
        );

        engine.tick(10);
        assert_eq!(store.bank()[0], 1);
        assert_eq!(engine.playback(LedGroup::Bank).elapsed_ms(), 0);
        assert_eq!(engine.playback(LedGroup::Bank).owed_ms(), 90);

        for t in (20..400u16).step_by(10) {
            engine.tick(t);
            let expected = u8::try_from(t / 100 + 1).unwrap();
            assert_eq!(store.bank()[0], expected, "at {t} ms");
            assert!(engine.playback(LedGroup::Bank).elapsed_ms() <= 100);
            // No spurious bank restart, which would also zero the color timer
            assert_eq!(engine.playback(LedGroup::Color).elapsed_ms(), t);
        }
        assert_eq!(engine.playback(LedGroup::Bank).last_instruction(), Some(0));

        engine.tick(400);
        assert_eq!(store.bank(), [9; 7]);
        assert_eq!(engine.playback(LedGroup::Color).elapsed_ms(), 400);
    }

    #[test]
    fn test_color_repeat_longer_than_its_offset() {
        const BANK: [B; 1] = [B::load(1000, [0; 7])];
        const COLOR: [C; 3] = [
            C::load(10, [0; 4]),
            C::add(100, [1; 4]).repeat(2),
            C::load(100, [9; 4]),
        ];
        let animations = [Animation::new("color", &BANK, &COLOR).unwrap()];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            0,
        );

        for t in (5..=320u16).step_by(5) {
            engine.tick(t);
            let expected = match t {
                0..10 => 0,
                10..110 => 1,
                110..210 => 2,
                210..310 => 3,
                _ => 9,
            };
            assert_eq!(store.color(), [expected; 4], "at {t} ms");
            if t < 210 {
                assert_eq!(engine.playback(LedGroup::Color).last_instruction(), Some(0));
            }
        }
        assert_eq!(engine.playback(LedGroup::Color).last_instruction(), Some(2));
    }

    #[test]
    fn test_repeat_zero_applies_once() {
        const BANK: [B; 2] = [B::add(100, [1; 7]).repeat(0), B::load(100, [9; 7])];
        let animations = [Animation::new("once", &BANK, &DARK_COLOR).unwrap()];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            0,
        );

        engine.tick(10);
        engine.tick(50);
        assert_eq!(store.bank(), [1; 7]);
        engine.tick(100);
        assert_eq!(store.bank(), [9; 7]);
    }

    #[test]
    fn test_diffusion_through_engine() {
        const BANK: [B; 2] = [
            B::load(100, [0; 7]),
            B::new(100, [50, 0, 0, 0, 0, 0, 0], Opcode::USOURCE, 0),
        ];
        let animations = [Animation::new("source", &BANK, &DARK_COLOR).unwrap()];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            0,
        );

        engine.tick(1);
        engine.tick(100);
        assert_eq!(store.bank(), [15, 15, 15, 5, 0, 0, 0]);
    }

    #[test]
    fn test_bank_loops_and_resets_color_timer() {
        const BANK: [B; 2] = [B::load(100, [1; 7]), B::load(100, [2; 7])];
        const COLOR: [C; 2] = [C::load(50, [1, 0, 0, 0]), C::add(50, [1, 1, 1, 1])];
        let animations = [Animation::new("loop", &BANK, &COLOR).unwrap()];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            0,
        );

        engine.tick(10);
        assert_eq!(store.bank(), [1; 7]);
        assert_eq!(store.color(), [1, 0, 0, 0]);

        engine.tick(60);
        assert_eq!(store.color(), [2, 1, 1, 1]);

        // Color timeline is exhausted and holds its last instruction
        engine.tick(150);
        assert_eq!(store.bank(), [2; 7]);
        assert_eq!(store.color(), [2, 1, 1, 1]);
        assert_eq!(engine.playback(LedGroup::Color).elapsed_ms(), 150);
        assert_eq!(engine.playback(LedGroup::Color).last_instruction(), Some(1));

        // Bank loop restarts both timers
        engine.tick(200);
        assert_eq!(store.bank(), [1; 7]);
        assert_eq!(store.color(), [1, 0, 0, 0]);
        assert_eq!(engine.playback(LedGroup::Bank).elapsed_ms(), 0);
        assert_eq!(engine.playback(LedGroup::Bank).last_instruction(), Some(0));
        assert_eq!(engine.playback(LedGroup::Color).elapsed_ms(), 0);
        assert_eq!(engine.playback(LedGroup::Color).last_instruction(), Some(0));
    }

    #[test]
    fn test_select_resets_playback() {
        const FIRST: [B; 2] = [B::load(100, [1; 7]), B::load(100, [2; 7])];
        const SECOND: [B; 1] = [B::load(100, [7; 7])];
        let animations = [
            Animation::new("first", &FIRST, &DARK_COLOR).unwrap(),
            Animation::new("second", &SECOND, &DARK_COLOR).unwrap(),
        ];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            0,
        );

        engine.tick(150);
        assert_eq!(store.bank(), [2; 7]);

        engine.select(1);
        assert_eq!(engine.selected_index(), 1);
        assert_eq!(engine.selection().index(), 1);
        assert_eq!(engine.selection().writes(), 1);
        for group in [LedGroup::Bank, LedGroup::Color] {
            let playback = engine.playback(group);
            assert_eq!(playback.elapsed_ms(), 0);
            assert_eq!(playback.last_instruction(), None);
            assert_eq!(playback.repeat_counter(), 0);
        }

        engine.tick(160);
        assert_eq!(store.bank(), [7; 7]);
        assert_eq!(engine.current().name(), "second");
    }

    #[test]
    fn test_select_out_of_range_is_ignored() {
        let store = BrightnessStore::new();
        let mut engine = engine(BUILTIN, &store, RamSelection::new(1), 0);
        engine.tick(120);
        let elapsed = engine.playback(LedGroup::Bank).elapsed_ms();

        engine.select(BUILTIN.len());
        engine.select(u8::MAX);
        assert_eq!(engine.selected_index(), 1);
        assert_eq!(engine.selection().writes(), 0);
        assert_eq!(engine.playback(LedGroup::Bank).elapsed_ms(), elapsed);
    }

    #[test]
    fn test_select_next_wraps() {
        let store = BrightnessStore::new();
        let last = BUILTIN.len() - 1;
        let mut engine = engine(BUILTIN, &store, RamSelection::new(last - 1), 0);

        engine.select_next();
        assert_eq!(engine.selected_index(), last);
        engine.select_next();
        assert_eq!(engine.selected_index(), 0);
        assert_eq!(engine.selection().writes(), 2);
    }

    #[test]
    fn test_invalid_persisted_index_falls_back() {
        let store = BrightnessStore::new();
        let mut engine = engine(BUILTIN, &store, RamSelection::new(200), 0);
        assert_eq!(engine.selected_index(), 0);
        assert_eq!(engine.current().name(), "kitt");

        engine.tick(10);
        assert_eq!(engine.selection().index(), 0);
        assert_eq!(engine.selection().writes(), 1);
    }

    #[test]
    fn test_timestamp_wraparound() {
        const BANK: [B; 3] = [
            B::load(10, [1; 7]),
            B::load(10, [2; 7]),
            B::load(10, [3; 7]),
        ];
        let animations = [Animation::new("wrap", &BANK, &DARK_COLOR).unwrap()];
        let store = BrightnessStore::new();
        let mut engine = engine(
            Catalog::new(&animations).unwrap(),
            &store,
            RamSelection::new(0),
            65_530,
        );

        engine.tick(65_535);
        assert_eq!(store.bank(), [1; 7]);
        engine.tick(4);
        assert_eq!(engine.playback(LedGroup::Bank).elapsed_ms(), 10);
        assert_eq!(store.bank(), [2; 7]);
    }

    #[test]
    fn test_tick_at_uses_low_bits() {
        let store = BrightnessStore::new();
        let mut engine = engine(BUILTIN, &store, RamSelection::new(0), 0);
        engine.tick_at(Instant::from_millis(65_536 + 10));
        assert_eq!(engine.playback(LedGroup::Bank).elapsed_ms(), 10);
        assert_eq!(engine.playback(LedGroup::Color).elapsed_ms(), 10);
    }

    #[test]
    fn test_levels_stay_in_range() {
        for index in 0..BUILTIN.len() {
            let store = BrightnessStore::new();
            let mut engine = engine(BUILTIN, &store, RamSelection::new(index), 65_000);
            for t in (7..20_000u16).step_by(7) {
                engine.tick(65_000u16.wrapping_add(t));
                assert!(store.bank().iter().all(|level| *level <= MAX_LEVEL));
                assert!(store.color().iter().all(|level| *level <= MAX_LEVEL));
            }
        }
    }

    #[test]
    fn test_rejects_split_outside_bank() {
        let store = BrightnessStore::new();
        for split in [0, 7, 12] {
            let config = EngineConfig { split_point: split };
            let result = Engine::new(BUILTIN, &store, RamSelection::new(0), &config);
            assert!(matches!(result, Err(ConfigError::SplitOutOfRange(s)) if s == split));
        }
        let config = EngineConfig { split_point: 3 };
        assert!(Engine::new(BUILTIN, &store, RamSelection::new(0), &config).is_ok());
    }

    #[test]
    fn test_selection_by_mutable_reference() {
        let store = BrightnessStore::new();
        let mut selection = RamSelection::new(0);
        {
            let mut engine =
                Engine::new(BUILTIN, &store, &mut selection, &EngineConfig::default()).unwrap();
            engine.initialize(0);
            engine.select(3);
        }
        assert_eq!(selection.index(), 3);
        assert_eq!(selection.writes(), 1);
    }
}
