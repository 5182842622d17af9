//! Edge case and boundary condition tests for readings and display payloads

use core::sync::atomic::AtomicBool;

use tach_lcd::{
    configure_display,
    hal::{MockDelay, MockLcd, MockTach, MockTilt},
    message::MAX_BUF_LEN,
    transform::{decode_angle, rpm_from_pulses, tilt_from_angle, ANGLE_MAX},
    Config, DisplayLine, ExitStatus, LcdMessage, Monitor, ShutdownFlag,
};

fn monitor_with(tach: MockTach, config: &Config) -> Monitor<MockTach, MockLcd, MockTilt> {
    let lcd = configure_display(MockLcd::new()).unwrap();
    Monitor::new(tach, lcd, MockTilt::new(), config)
}

// ============================================================================
// Pulse Count Boundaries
// ============================================================================

#[test]
fn negative_pulse_count_is_displayed_as_is() {
    let mut tach = MockTach::new();
    tach.queue_pulses(-18);

    let mut monitor = monitor_with(tach, &Config::default());
    let report = monitor.step().unwrap();
    assert!(report.rpm < 0.0);

    let (_, lcd, _) = monitor.into_parts();
    assert_eq!(lcd.line_text(1), Some("RPMS: -77.8    "));
}

#[test]
fn huge_pulse_count_stays_in_buffer() {
    for pulses in [i32::MAX, i32::MIN] {
        let mut tach = MockTach::new();
        tach.queue_pulses(pulses);

        let mut monitor = monitor_with(tach, &Config::default());
        monitor.step().unwrap();

        let (_, lcd, _) = monitor.into_parts();
        let (_, msg) = &lcd.requests[2];
        assert!(msg.text().starts_with("RPMS: "));
        assert!(msg.text().len() < MAX_BUF_LEN);
        assert_eq!(msg.kbuf[MAX_BUF_LEN - 1], 0);
    }
}

#[test]
fn rpm_is_linear_in_pulses() {
    let one = rpm_from_pulses(1);
    assert!((rpm_from_pulses(100) - 100.0 * one).abs() < 1e-2);
    assert_eq!(rpm_from_pulses(0), 0.0);
}

// ============================================================================
// Angle Boundaries
// ============================================================================

#[test]
fn angle_never_exceeds_fourteen_bits() {
    for b0 in [0x00u8, 0x3F, 0x40, 0x80, 0xFF] {
        for b1 in [0x00u8, 0x03, 0xFC, 0xFF] {
            assert!(decode_angle([b0, b1]) <= ANGLE_MAX);
        }
    }
}

#[test]
fn tilt_range_covers_both_signs() {
    assert_eq!(tilt_from_angle(0), 2800);
    assert_eq!(tilt_from_angle(2800), 0);
    assert_eq!(tilt_from_angle(ANGLE_MAX), 2800 - 0x3FFF);
}

// ============================================================================
// Payload Boundaries
// ============================================================================

#[test]
fn payload_targets_its_line() {
    let rpm = LcdMessage::rpm(1.0);
    let tilt = LcdMessage::tilt(1);
    assert_eq!(rpm.line(), Some(DisplayLine::First));
    assert_eq!(tilt.line(), Some(DisplayLine::Second));
    assert_eq!(rpm.nth_character, 0);
    assert_eq!(tilt.nth_character, 0);
}

#[test]
fn overlong_text_is_truncated_with_terminator() {
    let long = "x".repeat(200);
    let msg = LcdMessage::format(DisplayLine::First, format_args!("{}", long));
    assert_eq!(msg.text().len(), MAX_BUF_LEN - 1);
    assert_eq!(msg.kbuf[MAX_BUF_LEN - 1], 0);
}

#[test]
fn empty_payload_has_no_text() {
    let msg = LcdMessage::empty();
    assert_eq!(msg.text(), "");
    assert!(msg.kbuf.iter().all(|&b| b == 0));
}

// ============================================================================
// Loop Boundaries
// ============================================================================

#[test]
fn zero_interval_still_checks_flag_each_cycle() {
    let mut tach = MockTach::new();
    for _ in 0..4 {
        tach.queue_pulses(1);
    }
    let config = Config {
        interval_ms: 0,
        ..Config::default()
    };

    let raw = AtomicBool::new(false);
    let flag = ShutdownFlag::new(&raw);
    let mut delay = MockDelay::new().with_shutdown_after(4, flag);

    let mut monitor = monitor_with(tach, &config);
    assert_eq!(monitor.run(&mut delay, flag), ExitStatus::Shutdown);
    assert_eq!(delay.pauses_ms, vec![0, 0, 0, 0]);
}

#[test]
fn tach_running_dry_mid_run_is_short_read() {
    let mut tach = MockTach::new();
    tach.queue_pulses(3);
    tach.queue_pulses(4);

    let raw = AtomicBool::new(false);
    let mut delay = MockDelay::new();
    let mut monitor = monitor_with(tach, &Config::default());

    let status = monitor.run(&mut delay, ShutdownFlag::new(&raw));
    assert_eq!(status.code(), -2);
    assert_eq!(delay.pauses_ms.len(), 2);
}
