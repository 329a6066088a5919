//! Easel — a minimal freehand drawing canvas.
//!
//! A toolbar (color picker, eraser, brush-size slider, clear, open image,
//! save to PNG) over a fixed-size raster surface that responds to mouse
//! drags. The stroke renderer and exporter live in the library so they can
//! be exercised against in-memory surfaces; the binary wires them to an
//! eframe event loop.

pub mod app;
pub mod canvas;
pub mod io;
pub mod logger;
pub mod tools;
