mod config;
mod convergence;
mod release;
mod scenario;
mod telemetry;
