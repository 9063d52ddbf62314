//! Slider value source.

use std::cell::Cell;
use std::rc::Rc;

/// Shared slider value in [0,1] (0 = bottom, 1 = top). The widget owns the
/// writes; the input adapter only reads.
#[derive(Debug, Clone)]
pub struct SliderHandle(Rc<Cell<f64>>);

impl SliderHandle {
    pub fn new(value: f64) -> Self {
        Self(Rc::new(Cell::new(value.clamp(0.0, 1.0))))
    }

    pub fn get(&self) -> f64 {
        self.0.get()
    }

    pub fn set(&self, value: f64) {
        if value.is_finite() {
            self.0.set(value.clamp(0.0, 1.0));
        }
    }
}

#[derive(Debug, Clone)]
pub struct SliderInput {
    slider: SliderHandle,
}

impl SliderInput {
    pub fn new(slider: SliderHandle) -> Self {
        Self { slider }
    }

    pub fn value01(&self) -> f64 {
        self.slider.get()
    }
}
