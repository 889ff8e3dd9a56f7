//! Heat transfer and air-standard cycle models

pub mod conduction;
pub mod cycles;
pub mod exchanger;

pub use conduction::{HeatConduction1D, TemperatureHistory};
pub use cycles::{CycleResult, DieselCycle, IntakeState, OttoCycle, StatePoint};
pub use exchanger::{
    effectiveness, ArrangementCurve, DoublePipeExchanger, ExchangerStreams, FlowArrangement,
    MarchResult, NtuSweep, SweepRequest,
};
