//! Integration tests: exercise the full console flow against a simulated
//! USB bus with a mix of Gorb and foreign devices.

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::console::Console;
    use crate::transport::mock::MockBackend;
    use crate::transport::DeviceEntry;

    fn gorb_config() -> Config {
        Config {
            manufacturer: "Gorb".to_string(),
        }
    }

    /// A bus with three devices, two of them Gorb, a foreign one in
    /// between. The interesting property: filtered `list` indices and
    /// unfiltered `connect` indices diverge after index 0.
    fn mixed_bus() -> MockBackend {
        MockBackend::new(vec![
            MockBackend::entry("Gorb", "Gorb Mouse A", "p0"),
            MockBackend::entry("Elsewhere Inc", "Foreign Keyboard", "p1"),
            MockBackend::entry("Gorb", "Gorb Mouse B", "p2"),
        ])
    }

    #[test]
    fn list_shows_two_matching_devices_with_indices_0_and_1() {
        let mut console = Console::new(mixed_bus(), gorb_config());
        let out = console.handle_line("list");

        assert!(out.contains("Gorb Mouse A"));
        assert!(out.contains("Gorb Mouse B"));
        assert!(!out.contains("Foreign Keyboard"));
        // Filtered indices are 0 and 1 even though the second Gorb device
        // sits at unfiltered position 2. The idx column is 3 wide.
        assert!(out.contains("| 0   |"));
        assert!(out.contains("| 1   |"));
        assert!(!out.contains("| 2   |"));
    }

    #[test]
    fn connect_uses_the_unfiltered_index_space() {
        let mut console = Console::new(mixed_bus(), gorb_config());

        // Unfiltered index 0 is a Gorb device: succeeds.
        assert_eq!(
            console.handle_line("connect 0"),
            "connected to: Gorb Mouse A"
        );
        console.handle_line("disconnect");

        // `list` showed "Gorb Mouse B" at filtered index 1, but unfiltered
        // index 1 is the foreign device: connect refuses it.
        assert_eq!(console.handle_line("connect 1"), "error idx");

        // The second Gorb device is reachable at its unfiltered index.
        assert_eq!(
            console.handle_line("connect 2"),
            "connected to: Gorb Mouse B"
        );
    }

    #[test]
    fn full_session_cycle_writes_expected_reports() {
        let backend = mixed_bus();
        let written = std::sync::Arc::clone(&backend.written);
        let mut console = Console::new(backend, gorb_config());

        console.handle_line("connect 0");
        assert_eq!(console.handle_line("setdpi 5000"), "setdpi success : 5000");
        assert_eq!(
            console.handle_line("macro 10 -10 11000000"),
            "send macro success : 10 -10"
        );
        console.handle_line("disconnect");

        let reports = written.lock().unwrap();
        assert_eq!(
            reports.as_slice(),
            &[
                vec![0x00, 0x02, 0x88, 0x13],
                vec![0x00, 0x03, 0x0A, 0x00, 0xF6, 0xFF, 0xC0],
            ]
        );
    }

    #[test]
    fn per_command_failures_never_poison_the_loop() {
        let mut console = Console::new(mixed_bus(), gorb_config());

        // A barrage of bad input, all answered, none fatal.
        for line in [
            "foobar",
            "connect",
            "connect nine",
            "connect 99",
            "setdpi 800",
            "macro 1 1",
            "disconnect",
        ] {
            assert!(!console.handle_line(line).is_empty());
        }

        // The console still works afterwards.
        assert_eq!(
            console.handle_line("connect 0"),
            "connected to: Gorb Mouse A"
        );
        assert_eq!(console.handle_line("setdpi 800"), "setdpi success : 800");
    }

    #[test]
    fn devices_with_missing_fields_render_as_na() {
        let backend = MockBackend::new(vec![DeviceEntry {
            manufacturer: Some("Gorb".to_string()),
            product_id: None,
            product_string: None,
            usage: None,
            path: "p0".to_string(),
        }]);
        let mut console = Console::new(backend, gorb_config());

        let out = console.handle_line("list");
        assert!(out.contains("N/A"));

        // Connect still works; the product line falls back to empty.
        assert_eq!(console.handle_line("connect 0"), "connected to: ");
    }
}
