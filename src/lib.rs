#[allow(non_snake_case)]
pub mod Examples;
#[allow(non_snake_case)]
pub mod Kinetics;
#[allow(non_snake_case)]
pub mod ReactorsZeroD;
#[allow(non_snake_case)]
pub mod Thermodynamics;
pub mod context;
pub mod settings;
