mod component;
mod determinism;
mod limits;
mod scenarios;
