//! Unit tests for raw acquisition and the averaging filter

use crate::common::{create_initialized_driver, test_utils::assert_float_eq, MockDelay};
use qmc5883l::{Config, Error, MagData};

#[test]
fn test_raw_read_byte_order() {
    let (mut driver, interface) = create_initialized_driver(Config::default());

    // The first byte of each pair is the high byte
    interface.set_register(0x00, 0x2E);
    interface.set_register(0x01, 0xE0);
    interface.set_register(0x02, 0x00);
    interface.set_register(0x03, 0x64);
    interface.set_register(0x04, 0xFF);
    interface.set_register(0x05, 0xFF);

    let sample = driver.read_raw().unwrap();
    assert_eq!(sample.x, 0x2EE0);
    assert_eq!(sample.y, 0x0064);
    assert_eq!(sample.z, -1);
}

#[test]
fn test_raw_read_negative_values() {
    let (mut driver, interface) = create_initialized_driver(Config::default());

    interface.set_mag_data(-12000, -1, i16::MIN);

    let sample = driver.read_raw().unwrap();
    assert_eq!(
        sample,
        MagData {
            x: -12000,
            y: -1,
            z: i16::MIN
        }
    );
}

#[test]
fn test_raw_read_bus_failure() {
    let (mut driver, interface) = create_initialized_driver(Config::default());

    interface.fail_next_read();
    let result = driver.read_raw();
    assert!(matches!(result, Err(Error::Bus(_))));

    // A later read succeeds; the failure is not sticky
    interface.set_mag_data(1, 2, 3);
    assert!(driver.read_raw().is_ok());
}

#[test]
fn test_filtered_read_identical_samples_2g() {
    let (mut driver, interface) = create_initialized_driver(Config::default());

    // Ten identical samples of 12000 counts at 2G (12000 counts/Gauss)
    // must average to exactly 1.0 Gauss
    interface.set_mag_data(12000, -12000, 6000);

    let field = driver.read(&mut MockDelay).unwrap();
    assert_float_eq(field.x, 1.0, 1e-12);
    assert_float_eq(field.y, -1.0, 1e-12);
    assert_float_eq(field.z, 0.5, 1e-12);
}

#[test]
fn test_filtered_read_identical_samples_8g() {
    let config = Config::default().with_range_gauss(8).unwrap();
    let (mut driver, interface) = create_initialized_driver(config);

    // At 8G the sensitivity drops to 3000 counts/Gauss
    interface.set_mag_data(12000, 3000, -3000);

    let field = driver.read(&mut MockDelay).unwrap();
    assert_float_eq(field.x, 4.0, 1e-12);
    assert_float_eq(field.y, 1.0, 1e-12);
    assert_float_eq(field.z, -1.0, 1e-12);
}

#[test]
fn test_filtered_read_averages_sequence() {
    let (mut driver, interface) = create_initialized_driver(Config::default());

    // x sums to 55000, y to -55000, z to 0
    let sequence: Vec<[i16; 3]> = (1i16..=10)
        .map(|i| [i * 1000, -i * 1000, if i % 2 == 0 { 500 } else { -500 }])
        .collect();
    interface.set_mag_sequence(sequence);

    let field = driver.read(&mut MockDelay).unwrap();
    assert_float_eq(field.x, 5500.0 / 12000.0, 1e-12);
    assert_float_eq(field.y, -5500.0 / 12000.0, 1e-12);
    assert_float_eq(field.z, 0.0, 1e-12);
}

#[test]
fn test_filtered_read_issues_ten_block_reads() {
    let (mut driver, interface) = create_initialized_driver(Config::default());

    interface.set_mag_data(100, 200, 300);
    driver.read(&mut MockDelay).unwrap();

    let block_reads = interface
        .operations()
        .iter()
        .filter(|op| {
            matches!(
                op,
                crate::common::Operation::ReadRegister { address: 0x00, .. }
            )
        })
        .count();
    assert_eq!(block_reads, 10);
}

#[test]
fn test_filtered_read_aborts_on_first_failure() {
    let (mut driver, interface) = create_initialized_driver(Config::default());

    interface.set_mag_data(100, 200, 300);
    interface.fail_next_read();

    let result = driver.read(&mut MockDelay);
    assert!(matches!(result, Err(Error::Bus(_))));
}

#[test]
fn test_filtered_read_aborts_mid_sequence() {
    let (mut driver, interface) = create_initialized_driver(Config::default());

    interface.set_mag_data(100, 200, 300);
    // Fail the 7th of the 10 block reads
    interface.fail_read_number(7);

    let result = driver.read(&mut MockDelay);
    assert!(
        matches!(result, Err(Error::Bus(_))),
        "no partial average may be returned"
    );

    // The remaining raw reads were never issued
    let block_reads = interface
        .operations()
        .iter()
        .filter(|op| {
            matches!(
                op,
                crate::common::Operation::ReadRegister { address: 0x00, .. }
            )
        })
        .count();
    assert_eq!(block_reads, 6);
}

#[test]
fn test_filtered_read_recovers_after_failure() {
    let (mut driver, interface) = create_initialized_driver(Config::default());

    interface.set_mag_data(12000, 0, 0);
    interface.fail_read_number(3);
    assert!(driver.read(&mut MockDelay).is_err());

    let field = driver.read(&mut MockDelay).unwrap();
    assert_float_eq(field.x, 1.0, 1e-12);
}

#[test]
fn test_data_ready_reflects_status_bit() {
    let (mut driver, interface) = create_initialized_driver(Config::default());

    assert!(!driver.data_ready().unwrap());

    interface.set_register(0x06, 0x01);
    assert!(driver.data_ready().unwrap());

    // OVL/DOR bits alone do not signal readiness
    interface.set_register(0x06, 0x06);
    assert!(!driver.data_ready().unwrap());
}
