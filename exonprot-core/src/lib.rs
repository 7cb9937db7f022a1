#[macro_use]
mod par;

pub mod alphabets;
pub mod error;
pub mod io;
pub mod seq;
pub mod translate;
