//! System Maven repository: Maven-2 layout lookup of module descriptors and
//! artifacts on the local filesystem.

pub mod repository;
