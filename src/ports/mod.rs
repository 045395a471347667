//! Ports（usecase と外界の境界）

pub mod outbound;
