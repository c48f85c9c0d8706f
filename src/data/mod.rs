//! Numerical core: stroke capture data, resampling, the spectral transform,
//! epicycle reconstruction, and the playback state machines.

pub mod epicycles;
pub mod fft;
pub mod resample;
pub mod session;
pub mod stroke;
pub mod timebase;
pub mod trail;
