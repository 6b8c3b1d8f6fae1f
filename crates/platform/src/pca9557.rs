//! PCA9557 8-bit I2C I/O expander driver.
//!
//! Reference: NXP PCA9557 datasheet (Rev. 6), §6.2 register map.
//! The second board revision hangs its five status LEDs off IO3–IO7.

/// 7-bit I2C address as strapped on the board (A2..A0 = 001, base 0x18).
pub const PCA9557_I2C_ADDR: u8 = 0x19;
/// Register 0: input port (read-only, reflects pin levels).
pub const REG_INPUT_PORT: u8 = 0x00;
/// Register 1: output port (drives pins configured as outputs).
pub const REG_OUTPUT_PORT: u8 = 0x01;
/// Register 2: polarity inversion for the input port.
pub const REG_POLARITY: u8 = 0x02;
/// Register 3: configuration (1 = input, 0 = output; reset 0xFF).
pub const REG_CONFIG: u8 = 0x03;

/// Output register value written at boot (IO0, IO1 high).
pub const OUTPUT_INIT: u8 = 0x03;
/// Configuration written at boot: IO0–IO2 outputs, IO3–IO7 inputs.
pub const CONFIG_INIT: u8 = 0xF8;

/// Mask with bit `bit` set, if `bit` names a pin.
#[inline]
#[must_use]
pub const fn pin_mask(bit: u8) -> Option<u8> {
    if bit < 8 {
        Some(1 << bit)
    } else {
        None
    }
}

/// Apply `high` to `bit` of a port image.
#[inline]
#[must_use]
pub const fn with_bit(port: u8, mask: u8, high: bool) -> u8 {
    if high {
        port | mask
    } else {
        port & !mask
    }
}

/// Driver error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pca9557Error<E> {
    /// Bus transfer failed
    Bus(E),
    /// Pin index above 7
    InvalidBit(u8),
}

impl<E> From<E> for Pca9557Error<E> {
    fn from(e: E) -> Self {
        Self::Bus(e)
    }
}

impl<E: embedded_hal::i2c::Error> core::fmt::Display for Pca9557Error<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "PCA9557 bus error: {}", e.kind()),
            Self::InvalidBit(bit) => write!(f, "PCA9557 has no pin {bit}"),
        }
    }
}

#[cfg(feature = "std")]
impl<E: embedded_hal::i2c::Error> std::error::Error for Pca9557Error<E> {}

/// PCA9557 on a blocking I2C bus.
pub struct Pca9557<I> {
    i2c: I,
    addr: u8,
    output: u8,
}

impl<I: embedded_hal::i2c::I2c> Pca9557<I> {
    /// Wrap the bus. Nothing is written until [`init`](Self::init).
    pub fn new(i2c: I, addr: u8) -> Self {
        Self {
            i2c,
            addr,
            output: 0xFF,
        }
    }

    /// Write the output register, then the direction register.
    ///
    /// Output first so pins switching to output come up at the intended
    /// level.
    pub fn init(&mut self, output: u8, config: u8) -> Result<(), I::Error> {
        self.i2c.write(self.addr, &[REG_OUTPUT_PORT, output])?;
        self.i2c.write(self.addr, &[REG_CONFIG, config])?;
        self.output = output;
        Ok(())
    }

    /// Drive one output pin (read-modify-write of the output register).
    pub fn set_output_state(&mut self, bit: u8, high: bool) -> Result<(), Pca9557Error<I::Error>> {
        let mask = pin_mask(bit).ok_or(Pca9557Error::InvalidBit(bit))?;
        let mut current = [0u8; 1];
        self.i2c
            .write_read(self.addr, &[REG_OUTPUT_PORT], &mut current)?;
        let next = with_bit(current[0], mask, high);
        self.i2c.write(self.addr, &[REG_OUTPUT_PORT, next])?;
        self.output = next;
        Ok(())
    }

    /// Read the input port.
    pub fn read_inputs(&mut self) -> Result<u8, I::Error> {
        let mut buf = [0u8; 1];
        self.i2c.write_read(self.addr, &[REG_INPUT_PORT], &mut buf)?;
        Ok(buf[0])
    }

    /// Last output register value written by this driver.
    pub fn output_state(&self) -> u8 {
        self.output
    }

    /// Give the bus back.
    pub fn release(self) -> I {
        self.i2c
    }
}
