pub mod accumulation;
pub mod burndown;
pub mod time;
