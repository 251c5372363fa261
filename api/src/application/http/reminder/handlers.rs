pub mod trigger_sweep;
