//! Desktop preview window.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window};

use super::{DisplaySink, Rotation};
use crate::colors::BLACK;
use crate::config::BOARD_SIZE;
use crate::error::DisplayError;
use crate::render::Frame;

/// Window scale: screen pixels per board cell.
const WINDOW_SCALE: u32 = 40;

/// Simulator window showing the board enlarged.
pub struct WindowDisplay {
    display: SimulatorDisplay<Rgb888>,
    window: Window,
    rotation: Rotation,
}

impl WindowDisplay {
    pub fn new(rotation: Rotation) -> Self {
        let display = SimulatorDisplay::new(Size::new(BOARD_SIZE as u32, BOARD_SIZE as u32));
        let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).pixel_spacing(2).build();
        let window = Window::new("ISS Matrix", &output_settings);
        Self { display, window, rotation }
    }

    fn show(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        let frame = self.rotation.rotate(frame);
        let pixels = frame.pixels().iter().enumerate().map(|(i, &color)| {
            Pixel(Point::new((i % BOARD_SIZE) as i32, (i / BOARD_SIZE) as i32), color)
        });
        self.display.draw_iter(pixels).ok();
        self.window.update(&self.display);

        if self.window.events().any(|ev| matches!(ev, SimulatorEvent::Quit)) {
            return Err(DisplayError::Closed);
        }
        Ok(())
    }
}

impl DisplaySink for WindowDisplay {
    fn present(&mut self, frame: &Frame) -> Result<(), DisplayError> {
        self.show(frame)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.display.clear(BLACK).ok();
        self.window.update(&self.display);
        Ok(())
    }
}
