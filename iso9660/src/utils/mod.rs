//! Low-level helpers shared by the descriptor and directory codecs

pub mod datetime;
pub mod endian;
pub mod sector;
pub mod string;
