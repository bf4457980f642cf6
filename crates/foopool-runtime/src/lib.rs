pub mod sim_loop;
pub mod sinks;
