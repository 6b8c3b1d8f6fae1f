//! Single addressable RGB pixel used as a status LED.

use platform::{Brightness, Led};
use smart_leds::{brightness, SmartLedsWrite, RGB8};

/// One WS2812-style pixel showing a fixed colour.
pub struct RgbLed<W> {
    writer: W,
    color: RGB8,
    level: Brightness,
    lit: bool,
}

impl<W> RgbLed<W>
where
    W: SmartLedsWrite<Color = RGB8>,
    W::Error: core::fmt::Debug,
{
    /// Dark pixel that lights in `color`.
    pub fn new(writer: W, color: RGB8) -> Self {
        Self {
            writer,
            color,
            level: Brightness::FULL,
            lit: false,
        }
    }

    /// Change the lit colour; applied immediately when lit.
    pub fn set_color(&mut self, color: RGB8) -> Result<(), W::Error> {
        self.color = color;
        if self.lit {
            self.show(color)?;
        }
        Ok(())
    }

    /// Give the writer back.
    pub fn release(self) -> W {
        self.writer
    }

    fn show(&mut self, color: RGB8) -> Result<(), W::Error> {
        let scaled = brightness(core::iter::once(color), self.level.to_u8_scale());
        self.writer.write(scaled)
    }
}

impl<W> Led for RgbLed<W>
where
    W: SmartLedsWrite<Color = RGB8>,
    W::Error: core::fmt::Debug,
{
    type Error = W::Error;

    fn turn_on(&mut self) -> Result<(), Self::Error> {
        self.show(self.color)?;
        self.lit = true;
        Ok(())
    }

    fn turn_off(&mut self) -> Result<(), Self::Error> {
        self.show(RGB8::default())?;
        self.lit = false;
        Ok(())
    }

    fn is_dimmable(&self) -> bool {
        true
    }

    fn set_brightness(&mut self, level: Brightness) -> Result<(), Self::Error> {
        self.level = level;
        if self.lit {
            self.show(self.color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    #[derive(Default)]
    struct FakeStrip {
        frames: Vec<Vec<RGB8>>,
    }

    impl SmartLedsWrite for FakeStrip {
        type Error = Infallible;
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), Self::Error>
        where
            T: IntoIterator<Item = I>,
            I: Into<Self::Color>,
        {
            self.frames.push(iterator.into_iter().map(Into::into).collect());
            Ok(())
        }
    }

    const BLUE: RGB8 = RGB8 { r: 0, g: 0, b: 200 };

    #[test]
    fn on_off_writes_colour_then_black() {
        let mut led = RgbLed::new(FakeStrip::default(), BLUE);
        led.turn_on().unwrap();
        led.turn_off().unwrap();
        let frames = led.release().frames;
        assert_eq!(frames, vec![vec![BLUE], vec![RGB8::default()]]);
    }

    #[test]
    fn brightness_scales_colour_while_lit() {
        let mut led = RgbLed::new(FakeStrip::default(), BLUE);
        led.turn_on().unwrap();
        led.set_brightness(Brightness::OFF).unwrap();
        let frames = led.release().frames;
        assert_eq!(frames.last().unwrap(), &vec![RGB8::default()]);
    }

    #[test]
    fn brightness_while_dark_writes_nothing() {
        let mut led = RgbLed::new(FakeStrip::default(), BLUE);
        led.set_brightness(Brightness::new(10)).unwrap();
        assert!(led.release().frames.is_empty());
    }
}
