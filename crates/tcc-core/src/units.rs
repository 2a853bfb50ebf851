// tcc-core/src/units.rs

use uom::si::f64::{ElectricCurrent as UomElectricCurrent, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Current = UomElectricCurrent;
pub type Time = UomTime;

#[inline]
pub fn amps(v: f64) -> Current {
    use uom::si::electric_current::ampere;
    Current::new::<ampere>(v)
}

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}
