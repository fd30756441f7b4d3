#![allow(dead_code)]

pub mod architecture;
pub mod assertions;
pub mod exports;
pub mod notifier;
pub mod snapshot;
