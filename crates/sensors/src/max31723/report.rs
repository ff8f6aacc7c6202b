//! Console formatting for register values.

use std::io::{self, Write};

use super::registers::Register;

/// Values from one status/temperature pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterDump {
    pub status: u8,
    pub temperature_msb: u8,
    pub temperature_lsb: u8,
}

impl RegisterDump {
    pub fn value(&self, register: Register) -> u8 {
        match register {
            Register::Status => self.status,
            Register::TemperatureMsb => self.temperature_msb,
            Register::TemperatureLsb => self.temperature_lsb,
        }
    }

    /// One report line per register, in read order.
    pub fn lines(&self) -> [String; 3] {
        Register::DUMP_ORDER.map(|register| report_line(register.label(), self.value(register)))
    }

    pub fn temperature(&self) -> Temperature {
        Temperature {
            msb: self.temperature_msb,
            lsb: self.temperature_lsb,
        }
    }
}

/// Raw temperature register pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Temperature {
    pub msb: u8,
    pub lsb: u8,
}

impl Temperature {
    /// Fractional part carried by the LSB.
    pub fn fraction(&self) -> f64 {
        f64::from(self.lsb) / 256.0
    }

    /// MSB is the signed integer part, LSB the binary fraction in 1/256ths.
    pub fn celsius(&self) -> f64 {
        f64::from(self.msb as i8) + self.fraction()
    }
}

/// `0X` followed by uppercase hex digits, no zero padding (9 -> `0X9`).
pub fn format_hex(value: u8) -> String {
    format!("0X{:X}", value)
}

pub fn report_line(label: &str, value: u8) -> String {
    format!("{}: {}", label, format_hex(value))
}

/// Bits MSB first, split into nibbles: `0x40` -> `0100 0000`.
pub fn format_nibbles(value: u8) -> String {
    format!("{:04b} {:04b}", value >> 4, value & 0x0F)
}

pub fn fraction_line(temperature: &Temperature) -> String {
    format!("Temp_Fraction: {:.4}", temperature.fraction())
}

pub fn temperature_line(temperature: &Temperature) -> String {
    format!("Final Temperature: {:.4}", temperature.celsius())
}

pub fn write_report<W: Write>(out: &mut W, dump: &RegisterDump) -> io::Result<()> {
    for line in dump.lines() {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Bit dump of every register, the LSB fraction, then the decoded temperature.
pub fn write_decoded<W: Write>(out: &mut W, dump: &RegisterDump) -> io::Result<()> {
    for register in Register::DUMP_ORDER {
        writeln!(out, "{} bits: {}", register.label(), format_nibbles(dump.value(register)))?;
    }
    let temperature = dump.temperature();
    writeln!(out, "{}", fraction_line(&temperature))?;
    writeln!(out, "{}", temperature_line(&temperature))
}
