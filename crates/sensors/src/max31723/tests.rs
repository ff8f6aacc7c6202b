use super::report::{
    format_hex, format_nibbles, fraction_line, report_line, temperature_line, write_decoded,
    write_report,
};
use super::*;
use crate::mock_spi::MockSpi;
use crate::spi_bus::SpiBus;
use crate::types::{BusConfig, DriverError};

#[test]
fn frames_carry_address_then_dummy_byte() {
    assert_eq!(register_frame(Register::Status.address()), [0x00, 0xFF]);
    assert_eq!(register_frame(Register::TemperatureMsb.address()), [0x02, 0xFF]);
    assert_eq!(register_frame(Register::TemperatureLsb.address()), [0x01, 0xFF]);
}

#[test]
fn value_is_second_received_byte() {
    assert_eq!(register_value(&[0xAA, 0x55]), 0x55);
}

#[test]
fn read_register_returns_second_byte_of_bus_reply() {
    let mut spi = MockSpi::new();
    spi.push_response(&[0xAA, 0x55]);
    let bus = SpiBus::new(spi);
    let mut reader = SensorRegisterReader::new(bus.acquire_bus());

    assert_eq!(reader.read_register(Register::Status).unwrap(), 0x55);
}

#[test]
fn hex_is_uppercase_and_unpadded() {
    assert_eq!(format_hex(0x09), "0X9");
    assert_eq!(format_hex(0x00), "0X0");
    assert_eq!(format_hex(0x1C), "0X1C");
    assert_eq!(report_line(Register::Status.label(), 0x09), "MAX31723 STATUS: 0X9");
}

#[test]
fn labels_match_console_output() {
    assert_eq!(Register::Status.label(), "MAX31723 STATUS");
    assert_eq!(Register::TemperatureMsb.label(), "Temperature MSB");
    assert_eq!(Register::TemperatureLsb.label(), "Temperature LSB");
}

#[test]
fn full_dump_reads_status_msb_lsb_in_order() {
    let mut spi = MockSpi::new();
    spi.push_response(&[0x00, 0x40]);
    spi.push_response(&[0x02, 0x1C]);
    spi.push_response(&[0x01, 0x80]);
    let bus = SpiBus::new(spi);

    let mut reader = SensorRegisterReader::new(bus.acquire_bus());
    reader.configure(&BusConfig::default()).unwrap();
    let dump = reader.read_all().unwrap();
    drop(reader);

    let mut out = Vec::new();
    write_report(&mut out, &dump).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "MAX31723 STATUS: 0X40\nTemperature MSB: 0X1C\nTemperature LSB: 0X80\n"
    );

    let spi = bus.into_inner();
    assert_eq!(
        spi.sent_frames().to_vec(),
        vec![vec![0x00u8, 0xFF], vec![0x02, 0xFF], vec![0x01, 0xFF]]
    );
    assert_eq!(spi.applied_config(), Some(&BusConfig::default()));
}

#[test]
fn transfer_failure_stops_the_dump() {
    let mut spi = MockSpi::with_registers([(0x00, 0x40), (0x02, 0x1C)]);
    spi.fail_next_transfer();
    let bus = SpiBus::new(spi);
    let mut reader = SensorRegisterReader::new(bus.acquire_bus());

    assert!(matches!(reader.read_all(), Err(DriverError::SpiError(_))));
    // The bus is usable again after the failed pass.
    let dump = reader.read_all().unwrap();
    assert_eq!(dump.status, 0x40);
    assert_eq!(dump.temperature_msb, 0x1C);
    assert_eq!(dump.temperature_lsb, 0x00);
}

#[test]
fn temperature_decodes_twos_complement_msb() {
    assert_eq!(Temperature { msb: 0x19, lsb: 0x80 }.celsius(), 25.5);
    assert_eq!(Temperature { msb: 0xFF, lsb: 0x80 }.celsius(), -0.5);
    assert_eq!(Temperature { msb: 0x00, lsb: 0x00 }.celsius(), 0.0);
    assert_eq!(
        temperature_line(&Temperature { msb: 0x1C, lsb: 0x80 }),
        "Final Temperature: 28.5000"
    );
    assert_eq!(fraction_line(&Temperature { msb: 0x1C, lsb: 0x40 }), "Temp_Fraction: 0.2500");
}

#[test]
fn read_temperature_reads_msb_before_lsb() {
    let bus = SpiBus::new(MockSpi::with_registers([(0x02, 0x19), (0x01, 0x40)]));
    let mut reader = SensorRegisterReader::new(bus.acquire_bus());

    let temperature = reader.read_temperature().unwrap();
    assert_eq!(temperature, Temperature { msb: 0x19, lsb: 0x40 });
    assert_eq!(temperature.celsius(), 25.25);

    let guard = reader.into_bus();
    assert_eq!(guard.port().sent_frames()[0], vec![0x02u8, 0xFF]);
}

#[test]
fn decoded_report_lists_bits_and_temperature() {
    assert_eq!(format_nibbles(0x40), "0100 0000");
    assert_eq!(format_nibbles(0x1C), "0001 1100");

    let dump = RegisterDump {
        status: 0x40,
        temperature_msb: 0x1C,
        temperature_lsb: 0x80,
    };
    let mut out = Vec::new();
    write_decoded(&mut out, &dump).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "MAX31723 STATUS bits: 0100 0000\n\
         Temperature MSB bits: 0001 1100\n\
         Temperature LSB bits: 1000 0000\n\
         Temp_Fraction: 0.5000\n\
         Final Temperature: 28.5000\n"
    );
}
